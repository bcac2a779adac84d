//! 庫存淨額推演與健康分類

use mrp_core::{
    Component, HealthStatus, InventoryProjection, MonthlyProjection, ProjectionConfig, YearMonth,
};
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::aggregation::{ComponentDemandAggregate, DemandAggregation};

/// 顯示資料缺失時的預設值
const NOT_AVAILABLE: &str = "N/A";

/// 健康狀態建議動作
const MONITOR_ACTION: &str = "Monitor stock";

/// 庫存淨額推演器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 為每個彙總物料產生一筆庫存推演
    ///
    /// 物料之間互相獨立，以並行方式計算；輸出順序與彙總順序一致。
    pub fn project(
        aggregation: &DemandAggregation,
        components: &[Component],
        config: &ProjectionConfig,
    ) -> Vec<InventoryProjection> {
        let component_map = Self::create_component_map(components);
        let aggregates: Vec<&ComponentDemandAggregate> = aggregation.aggregates.values().collect();

        aggregates
            .par_iter()
            .map(|aggregate| {
                let component = component_map.get(aggregate.part_code.as_str()).copied();
                Self::project_component(aggregate, component, config)
            })
            .collect()
    }

    /// 單物料推演
    pub fn project_component(
        aggregate: &ComponentDemandAggregate,
        component: Option<&Component>,
        config: &ProjectionConfig,
    ) -> InventoryProjection {
        let display_part_type = Self::display_value(aggregate.part_type.as_deref());
        let display_description = Self::display_value(aggregate.description.as_deref());

        let has_stock_record = component.is_some();
        let component = match component {
            Some(component) => component.clone(),
            None => {
                tracing::warn!(
                    part_code = %aggregate.part_code,
                    "找不到 SOH 記錄，以零庫存推演"
                );
                Component::placeholder(
                    aggregate.part_code.clone(),
                    display_description.clone(),
                    display_part_type.clone(),
                )
            }
        };
        let current_stock = component.stock;

        let sorted_demand = aggregate.sorted_demand();
        let horizon_len = sorted_demand.len().min(config.planning_horizon_months);
        let horizon = &sorted_demand[..horizon_len];

        let four_month_demand = horizon
            .iter()
            .fold(Decimal::ZERO, |acc, (_, qty)| acc.saturating_add(*qty));
        let net_four_month_demand = (four_month_demand - current_stock).max(Decimal::ZERO);
        let overall_health =
            Self::classify_health(current_stock, four_month_demand, config.risk_coverage_ratio);

        let projections = Self::simulate_depletion(current_stock, horizon, config.days_per_month);

        let total_annual_demand = aggregate.total_demand();
        let average_monthly_demand = if horizon_len > 0 {
            four_month_demand / Decimal::from(horizon_len as u64)
        } else {
            Decimal::ZERO
        };

        let priority = overall_health.priority();
        let recommended_action = Self::recommended_action(overall_health, net_four_month_demand);

        InventoryProjection {
            component,
            has_stock_record,
            skus_used_in: aggregate.skus.clone(),
            display_part_type,
            display_description,
            four_month_demand,
            net_four_month_demand,
            total_annual_demand,
            average_monthly_demand,
            projections,
            overall_health,
            priority,
            recommended_action,
        }
    }

    /// 健康分類（相等時取較健康的分類）
    pub fn classify_health(
        current_stock: Decimal,
        horizon_demand: Decimal,
        risk_ratio: Decimal,
    ) -> HealthStatus {
        if current_stock >= horizon_demand {
            HealthStatus::Healthy
        } else if current_stock >= risk_ratio.saturating_mul(horizon_demand) {
            HealthStatus::Risk
        } else {
            HealthStatus::Shortage
        }
    }

    /// 逐月庫存消耗推演
    ///
    /// 月份必須已升序排列；只有一個滾動庫存值跨月傳遞，預計庫存不報負值。
    pub fn simulate_depletion(
        initial_stock: Decimal,
        months: &[(YearMonth, Decimal)],
        days_per_month: Decimal,
    ) -> Vec<MonthlyProjection> {
        let mut results = Vec::with_capacity(months.len());
        let mut running_stock = initial_stock;

        for &(month, demand) in months {
            let coverage_percentage = if demand > Decimal::ZERO {
                Self::scaled_ratio(running_stock, Decimal::ONE_HUNDRED, demand)
                    .map_or(Decimal::ONE_HUNDRED, |pct| pct.min(Decimal::ONE_HUNDRED))
            } else {
                Decimal::ONE_HUNDRED
            };

            let shortfall = (demand - running_stock).max(Decimal::ZERO);
            let projected_stock = (running_stock - demand).max(Decimal::ZERO);

            let days_of_coverage = if demand > Decimal::ZERO {
                Self::scaled_ratio(running_stock, days_per_month, demand)
                    .and_then(|days| days.floor().to_i64())
                    .unwrap_or(i64::MAX)
            } else {
                days_per_month.floor().to_i64().unwrap_or(i64::MAX)
            };

            results.push(MonthlyProjection {
                month,
                total_demand: demand,
                coverage_percentage,
                projected_stock,
                shortfall,
                days_of_coverage,
            });

            running_stock = projected_stock;
        }

        results
    }

    /// `value × scale ÷ divisor`，先乘後除；乘積溢位時改為先除後乘，仍溢位回傳 None
    fn scaled_ratio(value: Decimal, scale: Decimal, divisor: Decimal) -> Option<Decimal> {
        value
            .checked_mul(scale)
            .and_then(|scaled| scaled.checked_div(divisor))
            .or_else(|| {
                value
                    .checked_div(divisor)
                    .and_then(|ratio| ratio.checked_mul(scale))
            })
    }

    /// 建議動作文字
    fn recommended_action(health: HealthStatus, net_demand: Decimal) -> String {
        match health {
            HealthStatus::Healthy => MONITOR_ACTION.to_string(),
            HealthStatus::Risk | HealthStatus::Shortage => {
                format!("Order {} units", net_demand.ceil().normalize())
            }
        }
    }

    fn display_value(value: Option<&str>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// 創建物料映射
    fn create_component_map(components: &[Component]) -> HashMap<&str, &Component> {
        let mut map = HashMap::new();
        for component in components {
            map.entry(component.part_code.as_str()).or_insert(component);
        }
        map
    }
}
