//! 資料正規化
//!
//! 來源資料的欄位名稱與數值格式不一致（例如庫存可能放在 `stock`、`soh`
//! 或 `stockOnHand`），所有差異都在這裡轉成強型別，計算層不再判斷欄位名稱。

use mrp_core::{BomLineItem, Component, Forecast, Product, YearMonth};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

const PART_CODE_FIELDS: &[&str] = &["partCode", "part_code", "productId", "product_id"];
const STOCK_FIELDS: &[&str] = &["stock", "soh", "stockOnHand", "stock_on_hand", "quantity"];
const SAFETY_STOCK_FIELDS: &[&str] = &["safetyStock", "safety_stock"];
const PART_TYPE_FIELDS: &[&str] = &["partType", "part_type"];
const DESCRIPTION_FIELDS: &[&str] = &["description"];

const PRODUCT_ID_FIELDS: &[&str] = &["id", "productId", "product_id"];
const PRODUCT_CODE_FIELDS: &[&str] = &["productCode", "product_code"];

const LINE_PRODUCT_ID_FIELDS: &[&str] = &["productId", "product_id"];
const LINE_PART_CODE_FIELDS: &[&str] = &["partCode", "part_code", "componentCode"];
const PER_SHIPPER_FIELDS: &[&str] = &["perShipper", "per_shipper", "quantityPerShipper"];
const PART_DESCRIPTION_FIELDS: &[&str] = &["partDescription", "part_description", "description"];

const MONTHLY_FORECAST_FIELDS: &[&str] = &["monthlyForecast", "monthly_forecast", "monthly"];

/// 資料正規化器
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// 正規化物料庫存記錄
    pub fn components(rows: &[Value]) -> Vec<Component> {
        rows.iter()
            .filter_map(|row| Self::object(row, "SOH"))
            .filter_map(|row| {
                let Some(part_code) = text(row, PART_CODE_FIELDS) else {
                    tracing::warn!("SOH 記錄缺少物料編碼，略過");
                    return None;
                };

                let mut stock = number(row, STOCK_FIELDS, &part_code).unwrap_or(Decimal::ZERO);
                if stock < Decimal::ZERO {
                    tracing::warn!(part_code = %part_code, %stock, "庫存為負值，以 0 計");
                    stock = Decimal::ZERO;
                }

                let description = text(row, DESCRIPTION_FIELDS).unwrap_or_default();
                let mut component = Component::new(part_code.clone(), description, stock);
                component.safety_stock = number(row, SAFETY_STOCK_FIELDS, &part_code);
                component.part_type = text(row, PART_TYPE_FIELDS);
                Some(component)
            })
            .collect()
    }

    /// 正規化產品記錄（內嵌的 BOM 明細一併轉換）
    pub fn products(rows: &[Value]) -> Vec<Product> {
        rows.iter()
            .filter_map(|row| Self::object(row, "產品"))
            .filter_map(|row| {
                let Some(product_code) = text(row, PRODUCT_CODE_FIELDS) else {
                    tracing::warn!("產品記錄缺少產品編碼，略過");
                    return None;
                };
                let id = text(row, PRODUCT_ID_FIELDS).unwrap_or_else(|| product_code.clone());
                let description = text(row, DESCRIPTION_FIELDS).unwrap_or_default();

                let mut product = Product::new(id.clone(), product_code.clone(), description);
                product.units_per_shipper =
                    number(row, &["unitsPerShipper", "units_per_shipper"], &product_code);
                product.price_per_shipper =
                    number(row, &["pricePerShipper", "price_per_shipper"], &product_code);
                product.mins_per_shipper =
                    number(row, &["minsPerShipper", "mins_per_shipper"], &product_code);
                product.daily_run_rate =
                    number(row, &["dailyRunRate", "daily_run_rate"], &product_code);
                product.hourly_run_rate =
                    number(row, &["hourlyRunRate", "hourly_run_rate"], &product_code);

                if let Some(Value::Array(lines)) = row.get("components") {
                    product.components = lines
                        .iter()
                        .filter_map(|line| Self::object(line, "BOM"))
                        .filter_map(|line| Self::line_item(line, Some(id.as_str())))
                        .collect();
                }

                Some(product)
            })
            .collect()
    }

    /// 正規化 BOM 明細記錄
    pub fn bom_line_items(rows: &[Value]) -> Vec<BomLineItem> {
        rows.iter()
            .filter_map(|row| Self::object(row, "BOM"))
            .filter_map(|row| Self::line_item(row, None))
            .collect()
    }

    /// 正規化預測記錄（無效月份鍵略過）
    pub fn forecasts(rows: &[Value]) -> Vec<Forecast> {
        rows.iter()
            .filter_map(|row| Self::object(row, "預測"))
            .filter_map(|row| {
                let Some(product_code) = text(row, PRODUCT_CODE_FIELDS) else {
                    tracing::warn!("預測記錄缺少產品編碼，略過");
                    return None;
                };

                let mut forecast = Forecast::new(product_code.clone());
                forecast.description = text(row, DESCRIPTION_FIELDS);

                let monthly = MONTHLY_FORECAST_FIELDS
                    .iter()
                    .find_map(|key| row.get(*key).and_then(Value::as_object));
                if let Some(monthly) = monthly {
                    for (key, value) in monthly {
                        match YearMonth::from_str(key) {
                            Ok(month) => {
                                let qty = coerce_decimal(value, key, &product_code);
                                forecast.monthly.insert(month, qty);
                            }
                            Err(_) => {
                                tracing::warn!(
                                    product_code = %product_code,
                                    month = %key,
                                    "無效的月份鍵，略過"
                                );
                            }
                        }
                    }
                }

                Some(forecast)
            })
            .collect()
    }

    fn line_item(row: &Map<String, Value>, owner: Option<&str>) -> Option<BomLineItem> {
        let product_id = match owner {
            Some(id) => id.to_string(),
            None => text(row, LINE_PRODUCT_ID_FIELDS)?,
        };
        let Some(part_code) = text(row, LINE_PART_CODE_FIELDS) else {
            tracing::warn!(product_id = %product_id, "BOM 明細缺少物料編碼，略過");
            return None;
        };

        Some(BomLineItem {
            per_shipper: number(row, PER_SHIPPER_FIELDS, &part_code),
            part_type: text(row, PART_TYPE_FIELDS).unwrap_or_default(),
            part_description: text(row, PART_DESCRIPTION_FIELDS).unwrap_or_default(),
            product_id,
            part_code,
        })
    }

    fn object<'a>(row: &'a Value, dataset: &str) -> Option<&'a Map<String, Value>> {
        let object = row.as_object();
        if object.is_none() {
            tracing::warn!("{} 記錄不是物件，略過", dataset);
        }
        object
    }
}

/// 取第一個存在的文字欄位（數字轉為文字）
fn text(row: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match row.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// 取第一個存在的數值欄位；欄位不存在或為 null 時回傳 None
fn number(row: &Map<String, Value>, keys: &[&str], record: &str) -> Option<Decimal> {
    keys.iter().find_map(|key| match row.get(*key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(coerce_decimal(value, key, record)),
    })
}

/// 數值轉換：無法解析時以 0 計並記錄警告
pub fn coerce_decimal(value: &Value, field: &str, record: &str) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string())
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::warn!(record = %record, field = %field, value = %value, "非數值資料，以 0 計");
        Decimal::ZERO
    })
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stock_field_fallbacks() {
        let rows = vec![
            json!({ "partCode": "C1", "stock": 10 }),
            json!({ "partCode": "C2", "soh": "20" }),
            json!({ "part_code": "C3", "stockOnHand": 30.5 }),
            json!({ "productId": "C4", "quantity": 40, "description": "Cap" }),
        ];

        let components = RecordNormalizer::components(&rows);

        assert_eq!(components.len(), 4);
        assert_eq!(components[0].stock, Decimal::from(10));
        assert_eq!(components[1].stock, Decimal::from(20));
        assert_eq!(components[2].stock, Decimal::new(305, 1));
        assert_eq!(components[3].part_code, "C4");
        assert_eq!(components[3].description, "Cap");
    }

    #[test]
    fn test_malformed_numbers_coerce_to_zero() {
        let rows = vec![
            json!({ "partCode": "C1", "stock": "lots" }),
            json!({ "partCode": "C2", "stock": true }),
            json!({ "partCode": "C3" }),
            json!({ "partCode": "C4", "stock": -5 }),
            json!({ "stock": 10 }),
            json!("not an object"),
        ];

        let components = RecordNormalizer::components(&rows);

        assert_eq!(components.len(), 4);
        assert!(components.iter().all(|c| c.stock == Decimal::ZERO));
    }

    #[test]
    fn test_products_with_embedded_components() {
        let rows = vec![json!({
            "id": "doc-1",
            "productCode": "SKU-1",
            "description": "Shampoo",
            "pricePerShipper": "24.50",
            "components": [
                { "partCode": "C100", "perShipper": 2, "partType": "Label", "partDescription": "Front label" },
                { "partCode": "BULK-1", "perShipper": 12, "partType": "Bulk - Supplied" }
            ]
        })];

        let products = RecordNormalizer::products(&rows);

        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.id, "doc-1");
        assert_eq!(product.price_per_shipper, Some(Decimal::new(2450, 2)));
        assert_eq!(product.components.len(), 2);
        assert_eq!(product.components[0].product_id, "doc-1");
        assert_eq!(product.components[0].per_shipper, Some(Decimal::from(2)));
        assert_eq!(product.components[1].part_type, "Bulk - Supplied");
    }

    #[test]
    fn test_bom_line_items_keep_missing_per_shipper() {
        let rows = vec![
            json!({ "productId": "P1", "partCode": "C1", "perShipper": 1.5 }),
            json!({ "productId": "P1", "partCode": "C2" }),
            json!({ "partCode": "C3", "perShipper": 1 }),
        ];

        let lines = RecordNormalizer::bom_line_items(&rows);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].per_shipper, Some(Decimal::new(15, 1)));
        assert_eq!(lines[1].per_shipper, None);
    }

    #[test]
    fn test_forecasts_skip_invalid_months() {
        let rows = vec![json!({
            "productCode": "SKU-1",
            "monthlyForecast": { "2025-01": 100, "2025-02": "50", "Jul-25": 10, "2025-03": "n/a" }
        })];

        let forecasts = RecordNormalizer::forecasts(&rows);

        assert_eq!(forecasts.len(), 1);
        let monthly = &forecasts[0].monthly;
        assert_eq!(monthly.len(), 3);
        assert_eq!(monthly[&"2025-01".parse::<YearMonth>().unwrap()], Decimal::from(100));
        assert_eq!(monthly[&"2025-02".parse::<YearMonth>().unwrap()], Decimal::from(50));
        assert_eq!(monthly[&"2025-03".parse::<YearMonth>().unwrap()], Decimal::ZERO);
    }
}
