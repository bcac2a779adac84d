//! 推演服務：並行讀取資料來源後交給計算器

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mrp_calc::{
    ProjectionCalculator, ProjectionReport, ProjectionReporter, ProjectionSummary,
    RecommendationRow,
};
use mrp_core::{
    BomLineItem, Component, Forecast, InventoryProjection, MrpError, Product, ProjectionConfig,
    Result,
};

use crate::source::MrpDataSource;

/// 讀取完成的輸入資料
struct ProjectionInputs {
    components: Vec<Component>,
    products: Vec<Product>,
    line_items: Vec<BomLineItem>,
    forecasts: Vec<Forecast>,
}

/// 推演服務
///
/// 每次 [`run`](Self::run) 都重新讀取全部資料集，呼叫之間不保留任何狀態。
pub struct ProjectionService {
    source: Arc<dyn MrpDataSource>,
    calculator: ProjectionCalculator,
}

impl ProjectionService {
    /// 創建推演服務（配置先經過驗證）
    pub fn new(source: Arc<dyn MrpDataSource>, config: ProjectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            calculator: ProjectionCalculator::new(config),
        })
    }

    /// 使用預設配置
    pub fn with_defaults(source: Arc<dyn MrpDataSource>) -> Self {
        Self {
            source,
            calculator: ProjectionCalculator::default(),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.calculator.config()
    }

    /// 執行一次完整推演
    ///
    /// 任一資料集讀取失敗即回傳錯誤，不產生部分結果。
    pub async fn run(&self) -> Result<ProjectionReport> {
        let inputs = self.fetch_inputs().await?;

        let report = self.calculator.calculate(
            inputs.components,
            inputs.products,
            inputs.line_items,
            inputs.forecasts,
        );

        if !report.warnings.is_empty() {
            tracing::warn!("推演完成，資料品質警告 {} 筆", report.warnings.len());
        }

        Ok(report)
    }

    /// 執行推演，只回傳物料推演清單
    pub async fn run_projection(&self) -> Result<Vec<InventoryProjection>> {
        Ok(self.run().await?.projections)
    }

    /// 依配置的關鍵物料上限產生摘要
    pub fn summarize(&self, projections: &[InventoryProjection]) -> ProjectionSummary {
        ProjectionReporter::summarize_with_limit(projections, self.config().critical_limit)
    }

    pub fn recommend_purchases(
        &self,
        projections: &[InventoryProjection],
    ) -> Vec<RecommendationRow> {
        ProjectionReporter::recommend_purchases(projections)
    }

    async fn fetch_inputs(&self) -> Result<ProjectionInputs> {
        tracing::debug!("並行讀取四個資料集");

        let fetch = async {
            let (components, products, line_items, forecasts) = futures::try_join!(
                labelled("components", self.source.list_components()),
                labelled("products", self.source.list_products()),
                labelled("bom", self.source.list_bom_line_items()),
                labelled("forecasts", self.source.list_forecasts()),
            )?;

            Ok::<_, MrpError>(ProjectionInputs {
                components,
                products,
                line_items,
                forecasts,
            })
        };

        match self.config().fetch_timeout_secs {
            Some(seconds) => tokio::time::timeout(Duration::from_secs(seconds), fetch)
                .await
                .map_err(|_| {
                    tracing::error!("讀取資料逾時（{} 秒）", seconds);
                    MrpError::FetchTimeout { seconds }
                })?,
            None => fetch.await,
        }
    }
}

/// 將來源錯誤標上資料集名稱
async fn labelled<T>(
    dataset: &'static str,
    fetch: impl Future<Output = anyhow::Result<T>>,
) -> Result<T> {
    fetch.await.map_err(|e| {
        tracing::error!(dataset, error = %e, "讀取資料失敗");
        MrpError::DataFetch {
            dataset: dataset.to_string(),
            message: format!("{e:#}"),
        }
    })
}
