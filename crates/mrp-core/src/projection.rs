//! 庫存推演結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Component, YearMonth};

/// 整體健康狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// 庫存足以覆蓋計劃時界需求
    Healthy,
    /// 部分覆蓋
    Risk,
    /// 短缺
    Shortage,
}

impl HealthStatus {
    /// 對應的處理優先級
    pub fn priority(&self) -> Priority {
        match self {
            HealthStatus::Shortage => Priority::High,
            HealthStatus::Risk => Priority::Medium,
            HealthStatus::Healthy => Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Risk => "Risk",
            HealthStatus::Shortage => "Shortage",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 優先級（Low < Medium < High）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(label)
    }
}

/// 單月推演
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    /// 月份
    pub month: YearMonth,

    /// 當月總需求
    pub total_demand: Decimal,

    /// 覆蓋率（0-100）
    pub coverage_percentage: Decimal,

    /// 當月結束後預計庫存（不為負）
    pub projected_stock: Decimal,

    /// 短缺量
    pub shortfall: Decimal,

    /// 可覆蓋天數
    pub days_of_coverage: i64,
}

/// 單一物料的庫存推演
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryProjection {
    /// 物料（缺少 SOH 記錄時為佔位物料）
    pub component: Component,

    /// 是否有實際 SOH 記錄
    pub has_stock_record: bool,

    /// 使用此物料的產品編碼
    pub skus_used_in: Vec<String>,

    /// 顯示用物料類型
    pub display_part_type: String,

    /// 顯示用描述
    pub display_description: String,

    /// 計劃時界需求
    pub four_month_demand: Decimal,

    /// 計劃時界淨需求
    pub net_four_month_demand: Decimal,

    /// 全部月份需求總和
    pub total_annual_demand: Decimal,

    /// 計劃時界平均月需求
    pub average_monthly_demand: Decimal,

    /// 逐月推演（升序，僅計劃時界）
    pub projections: Vec<MonthlyProjection>,

    /// 整體健康狀態
    pub overall_health: HealthStatus,

    pub priority: Priority,

    /// 建議動作
    pub recommended_action: String,
}

impl InventoryProjection {
    pub fn part_code(&self) -> &str {
        &self.component.part_code
    }

    pub fn current_stock(&self) -> Decimal {
        self.component.stock
    }

    /// 建議訂購量（淨需求向上取整）
    pub fn recommended_quantity(&self) -> Decimal {
        self.net_four_month_demand.ceil()
    }
}
