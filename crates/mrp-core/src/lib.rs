//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod component;
pub mod config;
pub mod forecast;
pub mod month;
pub mod product;
pub mod projection;
pub mod purchase_order;

// Re-export 主要類型
pub use component::Component;
pub use config::{ProjectionConfig, DEFAULT_BULK_SUPPLIED_PART_TYPE};
pub use forecast::Forecast;
pub use month::YearMonth;
pub use product::{BomLineItem, Product};
pub use projection::{HealthStatus, InventoryProjection, MonthlyProjection, Priority};
pub use purchase_order::{AmountCheck, PoStatus, PurchaseOrder, AMOUNT_TOLERANCE};

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("讀取 {dataset} 資料失敗: {message}")]
    DataFetch { dataset: String, message: String },

    #[error("讀取資料逾時（{seconds} 秒）")]
    FetchTimeout { seconds: u64 },

    #[error("無效的月份: {0}")]
    InvalidMonth(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("產品 {0} 缺少散裝供應明細")]
    MissingBulkSupplied(String),

    #[error("金額差異仍為 {difference}，請先修正 PO 明細")]
    AmountMismatch { difference: rust_decimal::Decimal },

    #[error("匯出錯誤: {0}")]
    Export(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MrpError>;
