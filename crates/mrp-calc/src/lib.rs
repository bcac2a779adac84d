//! # MRP Calculation Engine
//!
//! 庫存推演計算引擎：BOM 附加、需求彙總、淨額推演與報表

pub mod aggregation;
pub mod bom;
pub mod calculator;
pub mod dashboard;
pub mod netting;
pub mod summary;

// Re-export 主要類型
pub use aggregation::{ComponentDemandAggregate, DemandAggregation, DemandAggregator};
pub use bom::BomAttacher;
pub use calculator::ProjectionCalculator;
pub use dashboard::{DashboardCalculator, DashboardStats};
pub use netting::NettingCalculator;
pub use summary::{ExportRecord, ProjectionReporter, ProjectionSummary, RecommendationRow};

use serde::Serialize;

/// 推演結果
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    /// 物料推演
    pub projections: Vec<mrp_core::InventoryProjection>,

    /// 資料品質警告
    pub warnings: Vec<DataQualityWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ProjectionReport {
    /// 創建空的推演結果
    pub fn empty() -> Self {
        Self {
            projections: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }
}

/// 資料品質警告（不中斷推演）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityWarning {
    pub product_code: String,
    pub part_code: String,
    pub message: String,
}

impl DataQualityWarning {
    pub fn new(product_code: String, part_code: String, message: String) -> Self {
        Self {
            product_code,
            part_code,
            message,
        }
    }
}
