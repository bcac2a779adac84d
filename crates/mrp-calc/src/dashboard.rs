//! 儀表板統計

use mrp_core::{Component, Product, PurchaseOrder};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// 儀表板統計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// 未出貨 PO 數
    pub open_po_count: usize,
    /// 未出貨 PO 總金額
    pub total_open_value: Decimal,
    /// 低於安全庫存的物料數
    pub components_at_risk_count: usize,
    /// 需要核對的 PO 數
    pub attention_po_count: usize,
    /// 未出貨 PO 所需工時
    pub total_open_work_hours: Decimal,
    /// 已出貨 PO 平均週轉天數
    pub average_turnaround_days: Decimal,
}

/// 儀表板計算器
pub struct DashboardCalculator;

impl DashboardCalculator {
    pub fn calculate(
        purchase_orders: &[PurchaseOrder],
        products: &[Product],
        components: &[Component],
    ) -> DashboardStats {
        let product_map: HashMap<&str, &Product> = products
            .iter()
            .map(|p| (p.product_code.as_str(), p))
            .collect();
        let minutes = Decimal::from(60);

        let mut open_po_count = 0;
        let mut total_open_value = Decimal::ZERO;
        let mut attention_po_count = 0;
        let mut total_open_work_hours = Decimal::ZERO;
        let mut total_turnaround_days = 0i64;
        let mut completed_po_count = 0i64;

        for po in purchase_orders {
            let mins_per_shipper = product_map
                .get(po.product_code.as_str())
                .and_then(|p| p.mins_per_shipper)
                .unwrap_or(Decimal::ZERO);

            if po.is_open() {
                open_po_count += 1;
                total_open_value = total_open_value.saturating_add(po.system_amount);
                let work_minutes = po.ordered_qty_shippers.saturating_mul(mins_per_shipper);
                total_open_work_hours = total_open_work_hours.saturating_add(work_minutes / minutes);
            } else if let Some(days) = po.turnaround_days() {
                total_turnaround_days += days;
                completed_po_count += 1;
            }

            if po.needs_attention() {
                attention_po_count += 1;
            }
        }

        let components_at_risk_count = components
            .iter()
            .filter(|c| c.is_below_safety_stock())
            .count();

        let average_turnaround_days = if completed_po_count > 0 {
            Decimal::from(total_turnaround_days) / Decimal::from(completed_po_count)
        } else {
            Decimal::ZERO
        };

        DashboardStats {
            open_po_count,
            total_open_value,
            components_at_risk_count,
            attention_po_count,
            total_open_work_hours,
            average_turnaround_days,
        }
    }
}
