//! 庫存推演主計算器

use mrp_core::{BomLineItem, Component, Forecast, Product, ProjectionConfig};

use crate::aggregation::DemandAggregator;
use crate::bom::BomAttacher;
use crate::netting::NettingCalculator;
use crate::ProjectionReport;

/// 推演計算器（純計算，不做 I/O）
#[derive(Debug, Clone, Default)]
pub struct ProjectionCalculator {
    config: ProjectionConfig,
}

impl ProjectionCalculator {
    /// 創建新的推演計算器
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// 主推演入口：BOM 附加 → 需求彙總 → 淨額推演
    pub fn calculate(
        &self,
        components: Vec<Component>,
        products: Vec<Product>,
        line_items: Vec<BomLineItem>,
        forecasts: Vec<Forecast>,
    ) -> ProjectionReport {
        tracing::info!(
            "開始庫存推演：物料 {} 筆，產品 {} 筆，BOM 明細 {} 筆，預測 {} 筆",
            components.len(),
            products.len(),
            line_items.len(),
            forecasts.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: BOM 附加
        tracing::debug!("Step 1: BOM 附加");
        let products = BomAttacher::attach(products, line_items);

        // Step 2: 需求彙總
        tracing::debug!("Step 2: 需求彙總");
        let aggregation = DemandAggregator::aggregate(&products, &forecasts, &self.config);
        tracing::debug!("需求物料數量: {}", aggregation.len());

        // Step 3: 淨額推演與健康分類
        tracing::debug!("Step 3: 淨額推演");
        let projections = NettingCalculator::project(&aggregation, &components, &self.config);

        let mut report = ProjectionReport::empty();
        report.projections = projections;
        report.warnings = aggregation.warnings;
        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("庫存推演完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("推演物料數量: {}", report.projections.len());

        report
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}
