//! 銷售預測模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::YearMonth;

/// 銷售預測（與產品一對一，可缺）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// 產品編碼
    pub product_code: String,

    /// 描述
    pub description: Option<String>,

    /// 月份 → 預測出貨箱數
    pub monthly: BTreeMap<YearMonth, Decimal>,
}

impl Forecast {
    /// 創建空的預測
    pub fn new(product_code: String) -> Self {
        Self {
            product_code,
            description: None,
            monthly: BTreeMap::new(),
        }
    }

    /// 建構器模式：設置某月預測量（同月覆寫）
    pub fn with_month(mut self, month: YearMonth, quantity: Decimal) -> Self {
        self.monthly.insert(month, quantity);
        self
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// 依月份升序迭代
    pub fn months(&self) -> impl Iterator<Item = (&YearMonth, &Decimal)> {
        self.monthly.iter()
    }

    /// 預測總量
    pub fn total(&self) -> Decimal {
        self.monthly
            .values()
            .fold(Decimal::ZERO, |acc, qty| acc.saturating_add(*qty))
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_builder() {
        let forecast = Forecast::new("SKU-1".to_string())
            .with_month("2025-02".parse().unwrap(), Decimal::from(50))
            .with_month("2025-01".parse().unwrap(), Decimal::from(100))
            .with_description("Shampoo 500ml".to_string());

        assert_eq!(forecast.total(), Decimal::from(150));

        let months: Vec<String> = forecast.months().map(|(m, _)| m.to_string()).collect();
        assert_eq!(months, vec!["2025-01", "2025-02"]);
    }
}
