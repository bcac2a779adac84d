//! # MRP Projection
//!
//! 包材庫存推演：由銷售預測與 BOM 推算物料需求，逐月模擬庫存消耗並分類健康狀態。
//!
//! ```no_run
//! use std::sync::Arc;
//! use mrp_projection::{JsonDirSource, ProjectionService};
//!
//! # async fn demo() -> mrp_projection::Result<()> {
//! let service = ProjectionService::with_defaults(Arc::new(JsonDirSource::new("data")));
//! let report = service.run().await?;
//! let summary = service.summarize(&report.projections);
//! println!("shortage: {}", summary.shortage_count);
//! # Ok(())
//! # }
//! ```

pub mod logging;

pub use mrp_calc::{
    DashboardCalculator, DashboardStats, DataQualityWarning, ProjectionCalculator,
    ProjectionReport, ProjectionReporter, ProjectionSummary, RecommendationRow,
};
pub use mrp_core::{
    AmountCheck, BomLineItem, Component, Forecast, HealthStatus, InventoryProjection,
    MonthlyProjection, MrpError, PoStatus, Priority, Product, ProjectionConfig, PurchaseOrder,
    Result, YearMonth, DEFAULT_BULK_SUPPLIED_PART_TYPE,
};
pub use mrp_service::{InMemorySource, JsonDirSource, MrpDataSource, ProjectionService};

pub use mrp_calc;
pub use mrp_core;
pub use mrp_service;
