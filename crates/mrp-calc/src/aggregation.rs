//! 需求彙總（BOM 展開）

use mrp_core::{Forecast, Product, ProjectionConfig, YearMonth};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::DataQualityWarning;

/// 單一物料的彙總需求
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDemandAggregate {
    /// 物料編碼
    pub part_code: String,

    /// 月份 → 需求量
    pub demand: BTreeMap<YearMonth, Decimal>,

    /// 使用此物料的產品編碼（首次出現順序）
    pub skus: Vec<String>,

    /// 首次觀察到的物料類型
    pub part_type: Option<String>,

    /// 首次觀察到的描述
    pub description: Option<String>,
}

impl ComponentDemandAggregate {
    /// 創建空的彙總
    pub fn new(part_code: String) -> Self {
        Self {
            part_code,
            demand: BTreeMap::new(),
            skus: Vec::new(),
            part_type: None,
            description: None,
        }
    }

    /// 記錄使用此物料的產品
    fn record_sku(&mut self, sku: &str) {
        if !self.skus.iter().any(|s| s == sku) {
            self.skus.push(sku.to_string());
        }
    }

    /// 記錄顯示資料（先寫入者為準）
    fn record_display(&mut self, part_type: &str, description: &str) {
        if self.part_type.is_none() {
            self.part_type = Some(part_type.to_string());
        }
        if self.description.is_none() {
            self.description = Some(description.to_string());
        }
    }

    /// 累加某月需求（超出範圍時取上限）
    pub fn add_demand(&mut self, month: YearMonth, quantity: Decimal) {
        let total = self.demand.entry(month).or_insert(Decimal::ZERO);
        *total = total.saturating_add(quantity);
    }

    /// 依月份升序排列的需求
    pub fn sorted_demand(&self) -> Vec<(YearMonth, Decimal)> {
        let mut months: Vec<(YearMonth, Decimal)> =
            self.demand.iter().map(|(m, q)| (*m, *q)).collect();
        months.sort_by_key(|(month, _)| *month);
        months
    }

    /// 所有月份需求總和
    pub fn total_demand(&self) -> Decimal {
        self.demand
            .values()
            .fold(Decimal::ZERO, |acc, qty| acc.saturating_add(*qty))
    }
}

/// 需求彙總結果
#[derive(Debug, Clone, Default)]
pub struct DemandAggregation {
    /// 物料編碼 → 彙總需求
    pub aggregates: BTreeMap<String, ComponentDemandAggregate>,

    /// 資料品質警告
    pub warnings: Vec<DataQualityWarning>,
}

impl DemandAggregation {
    pub fn get(&self, part_code: &str) -> Option<&ComponentDemandAggregate> {
        self.aggregates.get(part_code)
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }
}

/// 需求彙總器
pub struct DemandAggregator;

impl DemandAggregator {
    /// 將產品月預測透過 BOM 展開為物料月需求
    ///
    /// 沒有預測或沒有 BOM 的產品直接略過；散裝供應明細不計入。
    pub fn aggregate(
        products: &[Product],
        forecasts: &[Forecast],
        config: &ProjectionConfig,
    ) -> DemandAggregation {
        let forecast_map = Self::create_forecast_map(forecasts);
        let mut result = DemandAggregation::default();

        for product in products {
            let Some(forecast) = forecast_map.get(product.product_code.as_str()) else {
                tracing::debug!("產品 {} 沒有預測，略過", product.product_code);
                continue;
            };

            if !product.has_components() {
                tracing::debug!("產品 {} 沒有 BOM，略過", product.product_code);
                continue;
            }

            for line in &product.components {
                if line.is_bulk_supplied(&config.bulk_supplied_part_type) {
                    continue;
                }

                let per_shipper = match line.per_shipper {
                    Some(qty) if qty > Decimal::ZERO => qty,
                    other => {
                        let message = match other {
                            None => "缺少每箱用量，需求以 0 計".to_string(),
                            Some(qty) => format!("每箱用量為 {qty}，需求以 0 計"),
                        };
                        tracing::warn!(
                            product_code = %product.product_code,
                            part_code = %line.part_code,
                            "{}",
                            message
                        );
                        result.warnings.push(DataQualityWarning::new(
                            product.product_code.clone(),
                            line.part_code.clone(),
                            message,
                        ));
                        Decimal::ZERO
                    }
                };

                let aggregate = result
                    .aggregates
                    .entry(line.part_code.clone())
                    .or_insert_with(|| ComponentDemandAggregate::new(line.part_code.clone()));
                aggregate.record_sku(&product.product_code);
                aggregate.record_display(&line.part_type, &line.part_description);

                for (month, quantity) in forecast.months() {
                    let demand = match quantity.checked_mul(per_shipper) {
                        Some(demand) => demand,
                        None => {
                            let message = format!(
                                "{month} 需求 {quantity} × {per_shipper} 超出數值範圍，以上限計"
                            );
                            tracing::warn!(
                                product_code = %product.product_code,
                                part_code = %line.part_code,
                                "{}",
                                message
                            );
                            result.warnings.push(DataQualityWarning::new(
                                product.product_code.clone(),
                                line.part_code.clone(),
                                message,
                            ));
                            quantity.saturating_mul(per_shipper)
                        }
                    };
                    aggregate.add_demand(*month, demand);
                }
            }
        }

        tracing::debug!(
            "需求彙總完成：物料 {} 個，警告 {} 筆",
            result.aggregates.len(),
            result.warnings.len()
        );

        result
    }

    /// 建立產品編碼 → 預測映射（重複時保留第一筆）
    fn create_forecast_map(forecasts: &[Forecast]) -> HashMap<&str, &Forecast> {
        let mut map = HashMap::new();
        for forecast in forecasts {
            map.entry(forecast.product_code.as_str()).or_insert(forecast);
        }
        map
    }
}
