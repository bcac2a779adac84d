//! 推演彙總、採購建議與表格匯出

use mrp_core::{HealthStatus, InventoryProjection, MrpError, Priority};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// 預設關鍵物料清單長度
pub const DEFAULT_CRITICAL_LIMIT: usize = 10;

/// 推演彙總
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub total_components: usize,
    pub healthy_count: usize,
    pub risk_count: usize,
    pub shortage_count: usize,

    /// 所有物料全部月份需求總和
    pub total_demand_value: Decimal,

    /// 高優先級物料（依淨需求遞減）
    pub critical_components: Vec<InventoryProjection>,
}

/// 採購建議
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRow {
    pub part_code: String,
    pub description: String,
    pub current_stock: Decimal,
    pub recommended_quantity: Decimal,
    pub priority: Priority,
    pub reason: String,
}

/// 匯出資料列（欄位順序固定）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportRecord {
    columns: Vec<(String, String)>,
}

impl ExportRecord {
    fn push(&mut self, column: impl Into<String>, value: impl ToString) {
        self.columns.push((column.into(), value.to_string()));
    }

    /// 依欄位名稱取值
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// 推演報表
pub struct ProjectionReporter;

impl ProjectionReporter {
    /// 彙總（關鍵物料取前 10 筆）
    pub fn summarize(projections: &[InventoryProjection]) -> ProjectionSummary {
        Self::summarize_with_limit(projections, DEFAULT_CRITICAL_LIMIT)
    }

    /// 彙總，自訂關鍵物料清單長度
    pub fn summarize_with_limit(
        projections: &[InventoryProjection],
        critical_limit: usize,
    ) -> ProjectionSummary {
        let count = |health: HealthStatus| {
            projections
                .iter()
                .filter(|p| p.overall_health == health)
                .count()
        };

        let total_demand_value = projections
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.total_annual_demand));

        let mut critical: Vec<&InventoryProjection> = projections
            .iter()
            .filter(|p| p.priority == Priority::High)
            .collect();
        critical.sort_by(|a, b| b.net_four_month_demand.cmp(&a.net_four_month_demand));

        ProjectionSummary {
            total_components: projections.len(),
            healthy_count: count(HealthStatus::Healthy),
            risk_count: count(HealthStatus::Risk),
            shortage_count: count(HealthStatus::Shortage),
            total_demand_value,
            critical_components: critical.into_iter().take(critical_limit).cloned().collect(),
        }
    }

    /// 採購建議：淨需求大於 0 的物料，依優先級遞減（同級保持原順序）
    pub fn recommend_purchases(projections: &[InventoryProjection]) -> Vec<RecommendationRow> {
        let mut rows: Vec<RecommendationRow> = projections
            .iter()
            .filter(|p| p.net_four_month_demand > Decimal::ZERO)
            .map(|p| RecommendationRow {
                part_code: p.part_code().to_string(),
                description: p.display_description.clone(),
                current_stock: p.current_stock(),
                recommended_quantity: p.recommended_quantity(),
                priority: p.priority,
                reason: format!(
                    "{}: {} month demand {} exceeds stock on hand {}",
                    p.overall_health,
                    p.projections.len(),
                    p.four_month_demand.normalize(),
                    p.current_stock().normalize()
                ),
            })
            .collect();

        rows.sort_by(|a, b| b.priority.cmp(&a.priority));
        rows
    }

    /// 轉為匯出資料列，月份欄位按位置編號（Month 1, Month 2, …）
    pub fn export_records(projections: &[InventoryProjection]) -> Vec<ExportRecord> {
        projections.iter().map(Self::export_record).collect()
    }

    fn export_record(projection: &InventoryProjection) -> ExportRecord {
        let component = &projection.component;
        let mut record = ExportRecord::default();

        record.push("Part Code", &component.part_code);
        record.push("Description", &projection.display_description);
        record.push("Part Type", &projection.display_part_type);
        record.push("Current Stock", component.stock.normalize());
        record.push(
            "Safety Stock",
            component
                .safety_stock
                .map(|s| s.normalize().to_string())
                .unwrap_or_default(),
        );
        record.push("Health", projection.overall_health);
        record.push("Priority", projection.priority);
        record.push("4-Month Demand", projection.four_month_demand.normalize());
        record.push("Net 4-Month Demand", projection.net_four_month_demand.normalize());
        record.push("Total Demand", projection.total_annual_demand.normalize());
        record.push(
            "Average Monthly Demand",
            projection.average_monthly_demand.round_dp(2).normalize(),
        );
        record.push("Used In SKUs", projection.skus_used_in.join(", "));
        record.push("Recommended Action", &projection.recommended_action);

        for (index, month) in projection.projections.iter().enumerate() {
            let n = index + 1;
            record.push(format!("Month {n}"), month.month);
            record.push(format!("Month {n} Demand"), month.total_demand.normalize());
            record.push(
                format!("Month {n} Coverage %"),
                month.coverage_percentage.round_dp(1).normalize(),
            );
            record.push(
                format!("Month {n} Projected SOH"),
                month.projected_stock.normalize(),
            );
        }

        record
    }

    /// 以 CSV 寫出匯出資料（月份較少的列以空白補齊）
    pub fn write_csv<W: Write>(
        projections: &[InventoryProjection],
        writer: W,
    ) -> mrp_core::Result<()> {
        let records = Self::export_records(projections);
        let header: Vec<String> = records
            .iter()
            .max_by_key(|r| r.len())
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default();

        let mut csv_writer = csv::Writer::from_writer(writer);
        if !header.is_empty() {
            csv_writer
                .write_record(&header)
                .map_err(|e| MrpError::Export(e.to_string()))?;
        }

        for record in &records {
            let mut row: Vec<&str> = record.values().collect();
            row.resize(header.len(), "");
            csv_writer
                .write_record(&row)
                .map_err(|e| MrpError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| MrpError::Export(e.to_string()))?;
        Ok(())
    }
}
