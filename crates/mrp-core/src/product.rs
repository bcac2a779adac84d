//! 產品與 BOM 明細模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// BOM 明細（屬於單一產品）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLineItem {
    /// 所屬產品內部ID
    pub product_id: String,

    /// 物料編碼（引用，非擁有）
    pub part_code: String,

    /// 每箱用量（缺失時為 None）
    pub per_shipper: Option<Decimal>,

    /// 物料類型
    pub part_type: String,

    /// 物料描述
    pub part_description: String,
}

impl BomLineItem {
    /// 創建新的 BOM 明細
    pub fn new(product_id: String, part_code: String, per_shipper: Decimal) -> Self {
        Self {
            product_id,
            part_code,
            per_shipper: Some(per_shipper),
            part_type: String::new(),
            part_description: String::new(),
        }
    }

    /// 建構器模式：設置物料類型
    pub fn with_part_type(mut self, part_type: String) -> Self {
        self.part_type = part_type;
        self
    }

    /// 建構器模式：設置物料描述
    pub fn with_part_description(mut self, part_description: String) -> Self {
        self.part_description = part_description;
        self
    }

    /// 每箱用量，缺失視為 0
    pub fn quantity_per_shipper(&self) -> Decimal {
        self.per_shipper.unwrap_or(Decimal::ZERO)
    }

    /// 是否為散裝供應（即成品容器本身，不需計劃）
    pub fn is_bulk_supplied(&self, marker: &str) -> bool {
        self.part_type == marker
    }
}

/// 產品（成品 SKU）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 內部ID（BOM 關聯用）
    pub id: String,

    /// 產品編碼
    pub product_code: String,

    /// 描述
    pub description: String,

    /// BOM 明細（附加前為空）
    pub components: Vec<BomLineItem>,

    /// 每箱件數
    pub units_per_shipper: Option<Decimal>,

    /// 每箱價格
    pub price_per_shipper: Option<Decimal>,

    /// 每箱生產分鐘數
    pub mins_per_shipper: Option<Decimal>,

    /// 日產能
    pub daily_run_rate: Option<Decimal>,

    /// 時產能
    pub hourly_run_rate: Option<Decimal>,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: String, product_code: String, description: String) -> Self {
        Self {
            id,
            product_code,
            description,
            components: Vec::new(),
            units_per_shipper: None,
            price_per_shipper: None,
            mins_per_shipper: None,
            daily_run_rate: None,
            hourly_run_rate: None,
        }
    }

    /// 建構器模式：設置 BOM 明細
    pub fn with_components(mut self, components: Vec<BomLineItem>) -> Self {
        self.components = components;
        self
    }

    /// 建構器模式：設置每箱價格
    pub fn with_price_per_shipper(mut self, price: Decimal) -> Self {
        self.price_per_shipper = Some(price);
        self
    }

    /// 建構器模式：設置每箱生產分鐘數
    pub fn with_mins_per_shipper(mut self, mins: Decimal) -> Self {
        self.mins_per_shipper = Some(mins);
        self
    }

    /// 建構器模式：設置每箱件數
    pub fn with_units_per_shipper(mut self, units: Decimal) -> Self {
        self.units_per_shipper = Some(units);
        self
    }

    /// 是否已有 BOM
    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }

    /// 散裝供應明細（成品容器）
    pub fn bulk_supplied_line(&self, marker: &str) -> Option<&BomLineItem> {
        self.components.iter().find(|c| c.is_bulk_supplied(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_per_shipper_is_zero() {
        let mut line = BomLineItem::new("P1".to_string(), "C100".to_string(), Decimal::from(2));
        assert_eq!(line.quantity_per_shipper(), Decimal::from(2));

        line.per_shipper = None;
        assert_eq!(line.quantity_per_shipper(), Decimal::ZERO);
    }

    #[test]
    fn test_bulk_supplied_line() {
        let product = Product::new("P1".to_string(), "SKU-1".to_string(), "Shampoo".to_string())
            .with_components(vec![
                BomLineItem::new("P1".to_string(), "C100".to_string(), Decimal::from(2))
                    .with_part_type("Label".to_string()),
                BomLineItem::new("P1".to_string(), "BULK-1".to_string(), Decimal::from(12))
                    .with_part_type("Bulk - Supplied".to_string()),
            ]);

        assert!(product.has_components());
        let bulk = product.bulk_supplied_line("Bulk - Supplied").unwrap();
        assert_eq!(bulk.part_code, "BULK-1");
        assert!(product.bulk_supplied_line("Pallet").is_none());
    }
}
