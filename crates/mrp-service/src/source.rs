//! 資料來源介面

use async_trait::async_trait;
use mrp_core::{BomLineItem, Component, Forecast, Product};

/// 推演所需的四個唯讀資料集
///
/// 實作者負責傳輸與格式轉換，回傳的資料必須已是強型別。
#[async_trait]
pub trait MrpDataSource: Send + Sync {
    /// 物料庫存（SOH）
    async fn list_components(&self) -> anyhow::Result<Vec<Component>>;

    /// 產品主檔
    async fn list_products(&self) -> anyhow::Result<Vec<Product>>;

    /// BOM 明細
    async fn list_bom_line_items(&self) -> anyhow::Result<Vec<BomLineItem>>;

    /// 銷售預測
    async fn list_forecasts(&self) -> anyhow::Result<Vec<Forecast>>;
}

/// 記憶體資料來源
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    components: Vec<Component>,
    products: Vec<Product>,
    line_items: Vec<BomLineItem>,
    forecasts: Vec<Forecast>,
}

impl InMemorySource {
    pub fn new(
        components: Vec<Component>,
        products: Vec<Product>,
        line_items: Vec<BomLineItem>,
        forecasts: Vec<Forecast>,
    ) -> Self {
        Self {
            components,
            products,
            line_items,
            forecasts,
        }
    }
}

#[async_trait]
impl MrpDataSource for InMemorySource {
    async fn list_components(&self) -> anyhow::Result<Vec<Component>> {
        Ok(self.components.clone())
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn list_bom_line_items(&self) -> anyhow::Result<Vec<BomLineItem>> {
        Ok(self.line_items.clone())
    }

    async fn list_forecasts(&self) -> anyhow::Result<Vec<Forecast>> {
        Ok(self.forecasts.clone())
    }
}
