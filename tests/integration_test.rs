//! 集成測試

use std::sync::Arc;

use chrono::NaiveDate;
use mrp_projection::*;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;

fn month(raw: &str) -> YearMonth {
    raw.parse().unwrap()
}

fn label_line(product_id: &str, part_code: &str, per_shipper: i64) -> BomLineItem {
    BomLineItem::new(
        product_id.to_string(),
        part_code.to_string(),
        Decimal::from(per_shipper),
    )
    .with_part_type("Label".to_string())
}

fn product(id: &str, code: &str) -> Product {
    Product::new(id.to_string(), code.to_string(), format!("{code} product"))
}

fn service(source: InMemorySource) -> ProjectionService {
    logging::init_test();
    ProjectionService::with_defaults(Arc::new(source))
}

#[tokio::test]
async fn test_single_product_scenario() {
    // SKU-1 每箱用 2 個 C100，預測 1 月 100 箱、2 月 50 箱，C100 庫存 180
    let source = InMemorySource::new(
        vec![Component::new(
            "C100".to_string(),
            "Front label".to_string(),
            Decimal::from(180),
        )],
        vec![product("P1", "SKU-1")],
        vec![label_line("P1", "C100", 2)],
        vec![Forecast::new("SKU-1".to_string())
            .with_month(month("2025-01"), Decimal::from(100))
            .with_month(month("2025-02"), Decimal::from(50))],
    );

    let projections = service(source).run_projection().await.unwrap();

    assert_eq!(projections.len(), 1);
    let c100 = &projections[0];
    assert_eq!(c100.part_code(), "C100");
    assert!(c100.has_stock_record);
    assert_eq!(c100.four_month_demand, Decimal::from(300));
    assert_eq!(c100.net_four_month_demand, Decimal::from(120));
    assert_eq!(c100.overall_health, HealthStatus::Risk);
    assert_eq!(c100.priority, Priority::Medium);

    let jan = &c100.projections[0];
    assert_eq!(jan.month, month("2025-01"));
    assert_eq!(jan.total_demand, Decimal::from(200));
    assert_eq!(jan.coverage_percentage, Decimal::from(90));
    assert_eq!(jan.shortfall, Decimal::from(20));
    assert_eq!(jan.projected_stock, Decimal::ZERO);

    let feb = &c100.projections[1];
    assert_eq!(feb.total_demand, Decimal::from(100));
    assert_eq!(feb.coverage_percentage, Decimal::ZERO);
    assert_eq!(feb.shortfall, Decimal::from(100));
    assert_eq!(feb.projected_stock, Decimal::ZERO);
}

#[rstest]
#[case(300, HealthStatus::Healthy)]
#[case(150, HealthStatus::Risk)]
#[case(149, HealthStatus::Shortage)]
#[tokio::test]
async fn test_health_boundaries(#[case] stock: i64, #[case] expected: HealthStatus) {
    let source = InMemorySource::new(
        vec![Component::new(
            "C100".to_string(),
            "Front label".to_string(),
            Decimal::from(stock),
        )],
        vec![product("P1", "SKU-1")],
        vec![label_line("P1", "C100", 3)],
        vec![Forecast::new("SKU-1".to_string()).with_month(month("2025-01"), Decimal::from(100))],
    );

    let projections = service(source).run_projection().await.unwrap();

    assert_eq!(projections[0].overall_health, expected);
}

#[tokio::test]
async fn test_exclusion_and_bulk_lines() {
    let source = InMemorySource::new(
        Vec::new(),
        vec![
            product("P1", "SKU-1"),
            product("P2", "SKU-2"),
            product("P3", "SKU-3"),
        ],
        vec![
            label_line("P1", "C100", 1),
            BomLineItem::new("P1".to_string(), "BULK-1".to_string(), Decimal::from(12))
                .with_part_type(DEFAULT_BULK_SUPPLIED_PART_TYPE.to_string()),
            // SKU-2 有 BOM 但沒有預測
            label_line("P2", "C200", 1),
        ],
        vec![
            Forecast::new("SKU-1".to_string()).with_month(month("2025-01"), Decimal::from(10)),
            // SKU-3 有預測但沒有 BOM
            Forecast::new("SKU-3".to_string()).with_month(month("2025-01"), Decimal::from(10)),
        ],
    );

    let projections = service(source).run_projection().await.unwrap();

    let codes: Vec<&str> = projections.iter().map(|p| p.part_code()).collect();
    assert_eq!(codes, vec!["C100"]);
    // 無 SOH 記錄的物料以 0 庫存推演
    assert!(!projections[0].has_stock_record);
    assert_eq!(projections[0].overall_health, HealthStatus::Shortage);
}

#[tokio::test]
async fn test_shared_component_and_ordering() {
    let source = InMemorySource::new(
        vec![
            Component::new("B".to_string(), "Cap".to_string(), Decimal::from(1000)),
            Component::new("A".to_string(), "Label".to_string(), Decimal::from(1000)),
        ],
        vec![product("P1", "SKU-1"), product("P2", "SKU-2")],
        vec![
            label_line("P1", "B", 1),
            label_line("P2", "B", 2),
            label_line("P2", "A", 1),
        ],
        vec![
            Forecast::new("SKU-1".to_string()).with_month(month("2025-02"), Decimal::from(10)),
            Forecast::new("SKU-2".to_string())
                .with_month(month("2025-01"), Decimal::from(5))
                .with_month(month("2025-02"), Decimal::from(5)),
        ],
    );

    let projections = service(source).run_projection().await.unwrap();

    assert_eq!(projections[0].part_code(), "A");
    let b = &projections[1];
    assert_eq!(b.skus_used_in, vec!["SKU-1".to_string(), "SKU-2".to_string()]);
    assert_eq!(b.projections[0].month, month("2025-01"));
    assert_eq!(b.projections[0].total_demand, Decimal::from(10));
    assert_eq!(b.projections[1].total_demand, Decimal::from(20));
    assert_eq!(b.four_month_demand, Decimal::from(30));
}

#[tokio::test]
async fn test_missing_per_shipper_is_reported() {
    let mut line = label_line("P1", "C100", 0);
    line.per_shipper = None;
    let source = InMemorySource::new(
        Vec::new(),
        vec![product("P1", "SKU-1")],
        vec![line],
        vec![Forecast::new("SKU-1".to_string()).with_month(month("2025-01"), Decimal::from(10))],
    );

    let report = service(source).run().await.unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].part_code, "C100");
    assert_eq!(report.projections[0].four_month_demand, Decimal::ZERO);
}

#[tokio::test]
async fn test_json_directory_run() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, value: serde_json::Value| {
        std::fs::write(dir.path().join(name), value.to_string()).unwrap();
    };

    write(
        "components.json",
        json!([
            { "partCode": "C100", "soh": "180", "description": "Front label" },
            { "partCode": "C200", "stockOnHand": "n/a" }
        ]),
    );
    write(
        "products.json",
        json!([{ "id": "P1", "productCode": "SKU-1", "description": "Shampoo" }]),
    );
    write(
        "bom.json",
        json!([
            { "productId": "P1", "partCode": "C100", "perShipper": "2", "partType": "Label" },
            { "productId": "P1", "partCode": "C200", "perShipper": 1, "partType": "Cap" }
        ]),
    );
    write(
        "forecasts.json",
        json!([{
            "productCode": "SKU-1",
            "monthlyForecast": { "2025-02": 50, "2025-01": "100", "bad": 10 }
        }]),
    );

    logging::init_test();
    let service = ProjectionService::with_defaults(Arc::new(JsonDirSource::new(dir.path())));
    let projections = service.run_projection().await.unwrap();

    assert_eq!(projections.len(), 2);
    assert_eq!(projections[0].net_four_month_demand, Decimal::from(120));
    assert_eq!(projections[1].current_stock(), Decimal::ZERO);
    assert!(projections[1].has_stock_record);

    let mut csv = Vec::new();
    ProjectionReporter::write_csv(&projections, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_json_directory_with_embedded_components() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, value: serde_json::Value| {
        std::fs::write(dir.path().join(name), value.to_string()).unwrap();
    };

    write(
        "components.json",
        json!([{ "partCode": "C100", "stock": 180 }]),
    );
    write(
        "products.json",
        json!([{
            "id": "P1",
            "productCode": "SKU-1",
            "components": [
                { "partCode": "C100", "perShipper": 2, "partType": "Label" },
                { "partCode": "BULK-1", "perShipper": 12, "partType": "Bulk - Supplied" }
            ]
        }]),
    );
    write("bom.json", json!([]));
    write(
        "forecasts.json",
        json!([{ "productCode": "SKU-1", "monthlyForecast": { "2025-01": 100 } }]),
    );

    logging::init_test();
    let service = ProjectionService::with_defaults(Arc::new(JsonDirSource::new(dir.path())));
    let projections = service.run_projection().await.unwrap();

    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].part_code(), "C100");
    assert_eq!(projections[0].four_month_demand, Decimal::from(200));
    assert_eq!(projections[0].overall_health, HealthStatus::Risk);
}

#[tokio::test]
async fn test_missing_dataset_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("components.json"), "[]").unwrap();

    let service = ProjectionService::with_defaults(Arc::new(JsonDirSource::new(dir.path())));
    let err = service.run().await.unwrap_err();

    assert!(matches!(err, MrpError::DataFetch { .. }));
}

#[test]
fn test_purchase_order_lifecycle() {
    let received = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let sku = product("P1", "SKU-1")
        .with_price_per_shipper(Decimal::from(24))
        .with_mins_per_shipper(Decimal::from(6))
        .with_components(vec![BomLineItem::new(
            "P1".to_string(),
            "BULK-1".to_string(),
            Decimal::from(12),
        )
        .with_part_type(DEFAULT_BULK_SUPPLIED_PART_TYPE.to_string())]);

    let mut po = PurchaseOrder::new(
        "PO-100".to_string(),
        "SKU-1".to_string(),
        "Acme".to_string(),
        received,
    );
    assert!(po.needs_attention());

    // 1200 件 = 100 箱 × 24 = 2400，客戶金額差 10 超出容許值
    let check = po
        .update_amounts(
            &sku,
            Decimal::from(1200),
            Decimal::from(2410),
            DEFAULT_BULK_SUPPLIED_PART_TYPE,
        )
        .unwrap();
    assert_eq!(check.shippers, Decimal::from(100));
    assert!(po.needs_attention());
    assert!(po.resolve_check(&sku, DEFAULT_BULK_SUPPLIED_PART_TYPE).is_err());

    po.update_amounts(
        &sku,
        Decimal::from(1200),
        Decimal::from(2403),
        DEFAULT_BULK_SUPPLIED_PART_TYPE,
    )
    .unwrap();
    assert!(po.is_open());

    let stats = DashboardCalculator::calculate(std::slice::from_ref(&po), &[sku.clone()], &[]);
    assert_eq!(stats.open_po_count, 1);
    assert_eq!(stats.total_open_value, Decimal::from(2400));
    assert_eq!(stats.total_open_work_hours, Decimal::from(10));

    po.despatch(received + chrono::Duration::days(6), "DK-9".to_string());
    let stats = DashboardCalculator::calculate(std::slice::from_ref(&po), &[sku], &[]);
    assert_eq!(stats.open_po_count, 0);
    assert_eq!(stats.average_turnaround_days, Decimal::from(6));

    po.reopen();
    assert!(po.is_open());
    assert!(po.delivery_date.is_none());
}
