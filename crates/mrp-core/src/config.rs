//! 庫存推演配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MrpError;

/// 散裝供應物料類型的預設標記
pub const DEFAULT_BULK_SUPPLIED_PART_TYPE: &str = "Bulk - Supplied";

/// 推演參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// 計劃時界（月）
    pub planning_horizon_months: usize,

    /// 風險門檻（相對計劃時界需求的比例）
    pub risk_coverage_ratio: Decimal,

    /// 每月天數（可覆蓋天數計算基準）
    pub days_per_month: Decimal,

    /// 散裝供應標記（此類型的 BOM 明細不計入需求）
    pub bulk_supplied_part_type: String,

    /// 關鍵物料清單長度
    pub critical_limit: usize,

    /// 讀取資料逾時（秒），僅作用於資料讀取階段
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            planning_horizon_months: 4,
            risk_coverage_ratio: Decimal::new(5, 1),
            days_per_month: Decimal::from(30),
            bulk_supplied_part_type: DEFAULT_BULK_SUPPLIED_PART_TYPE.to_string(),
            critical_limit: 10,
            fetch_timeout_secs: None,
        }
    }
}

impl ProjectionConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MrpError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置計劃時界
    pub fn with_planning_horizon_months(mut self, months: usize) -> Self {
        self.planning_horizon_months = months;
        self
    }

    /// 建構器模式：設置風險門檻
    pub fn with_risk_coverage_ratio(mut self, ratio: Decimal) -> Self {
        self.risk_coverage_ratio = ratio;
        self
    }

    /// 建構器模式：設置每月天數
    pub fn with_days_per_month(mut self, days: Decimal) -> Self {
        self.days_per_month = days;
        self
    }

    /// 建構器模式：設置散裝供應標記
    pub fn with_bulk_supplied_part_type(mut self, marker: String) -> Self {
        self.bulk_supplied_part_type = marker;
        self
    }

    /// 建構器模式：設置關鍵物料清單長度
    pub fn with_critical_limit(mut self, limit: usize) -> Self {
        self.critical_limit = limit;
        self
    }

    /// 建構器模式：設置讀取逾時
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = Some(secs);
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> crate::Result<()> {
        if self.planning_horizon_months == 0 {
            return Err(MrpError::InvalidConfig(
                "計劃時界必須至少 1 個月".to_string(),
            ));
        }
        if self.risk_coverage_ratio < Decimal::ZERO || self.risk_coverage_ratio > Decimal::ONE {
            return Err(MrpError::InvalidConfig(format!(
                "風險門檻必須介於 0 與 1 之間: {}",
                self.risk_coverage_ratio
            )));
        }
        if self.days_per_month <= Decimal::ZERO {
            return Err(MrpError::InvalidConfig(format!(
                "每月天數必須大於 0: {}",
                self.days_per_month
            )));
        }
        Ok(())
    }
}
