//! 簡單庫存推演示例

use std::sync::Arc;

use mrp_projection::{
    logging, BomLineItem, Component, Forecast, InMemorySource, Product, ProjectionConfig,
    ProjectionReporter, ProjectionService, YearMonth,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    println!("=== 簡單庫存推演示例 ===\n");

    let components = vec![
        Component::new("C100".to_string(), "Front label".to_string(), Decimal::from(180)),
        Component::new("C200".to_string(), "Pump cap".to_string(), Decimal::from(40))
            .with_safety_stock(Decimal::from(100)),
        Component::new("C300".to_string(), "Shipper carton".to_string(), Decimal::from(5000)),
    ];

    let products = vec![
        Product::new("P1".to_string(), "SKU-1".to_string(), "Shampoo 500ml".to_string()),
        Product::new("P2".to_string(), "SKU-2".to_string(), "Conditioner 500ml".to_string()),
    ];

    let line_items = vec![
        BomLineItem::new("P1".to_string(), "C100".to_string(), Decimal::from(2))
            .with_part_type("Label".to_string()),
        BomLineItem::new("P1".to_string(), "C200".to_string(), Decimal::from(12))
            .with_part_type("Closure".to_string()),
        BomLineItem::new("P1".to_string(), "BULK-1".to_string(), Decimal::from(12))
            .with_part_type("Bulk - Supplied".to_string()),
        BomLineItem::new("P2".to_string(), "C200".to_string(), Decimal::from(12))
            .with_part_type("Closure".to_string()),
        BomLineItem::new("P2".to_string(), "C300".to_string(), Decimal::ONE)
            .with_part_type("Carton".to_string()),
    ];

    let forecasts = vec![
        Forecast::new("SKU-1".to_string())
            .with_month("2025-01".parse::<YearMonth>()?, Decimal::from(100))
            .with_month("2025-02".parse::<YearMonth>()?, Decimal::from(50))
            .with_month("2025-03".parse::<YearMonth>()?, Decimal::from(80)),
        Forecast::new("SKU-2".to_string())
            .with_month("2025-01".parse::<YearMonth>()?, Decimal::from(20))
            .with_month("2025-02".parse::<YearMonth>()?, Decimal::from(20)),
    ];

    let source = InMemorySource::new(components, products, line_items, forecasts);
    let service = ProjectionService::new(Arc::new(source), ProjectionConfig::default())?;

    let report = service.run().await?;
    let summary = service.summarize(&report.projections);

    println!("物料推演:");
    for projection in &report.projections {
        println!(
            "  - {} ({}): 庫存 {}, 四個月需求 {}, 狀態 {}, 建議 {}",
            projection.part_code(),
            projection.display_description,
            projection.current_stock(),
            projection.four_month_demand,
            projection.overall_health,
            projection.recommended_action
        );
    }

    println!(
        "\n摘要: 共 {} 項，健康 {}，風險 {}，短缺 {}",
        summary.total_components,
        summary.healthy_count,
        summary.risk_count,
        summary.shortage_count
    );

    println!("\n採購建議:");
    for row in service.recommend_purchases(&report.projections) {
        println!(
            "  - [{}] {} 建議採購 {}",
            row.priority, row.part_code, row.recommended_quantity
        );
    }

    println!("\nCSV 匯出:");
    ProjectionReporter::write_csv(&report.projections, std::io::stdout())?;

    Ok(())
}
