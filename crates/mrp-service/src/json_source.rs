//! JSON 目錄資料來源
//!
//! 目錄內需有 `components.json`、`products.json`、`bom.json`、`forecasts.json`，
//! 每個檔案為物件陣列，讀入後交由 [`RecordNormalizer`] 轉換。

use anyhow::Context;
use async_trait::async_trait;
use mrp_core::{BomLineItem, Component, Forecast, Product};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::normalize::RecordNormalizer;
use crate::source::MrpDataSource;

pub const COMPONENTS_FILE: &str = "components.json";
pub const PRODUCTS_FILE: &str = "products.json";
pub const BOM_FILE: &str = "bom.json";
pub const FORECASTS_FILE: &str = "forecasts.json";

/// JSON 目錄資料來源
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_rows(&self, file_name: &str) -> anyhow::Result<Vec<Value>> {
        let path = self.dir.join(file_name);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("無法讀取檔案: {}", path.display()))?;
        let rows: Vec<Value> = serde_json::from_str(&raw)
            .with_context(|| format!("JSON 格式錯誤: {}", path.display()))?;

        tracing::debug!(file = %path.display(), rows = rows.len(), "讀取 JSON 資料");
        Ok(rows)
    }
}

#[async_trait]
impl MrpDataSource for JsonDirSource {
    async fn list_components(&self) -> anyhow::Result<Vec<Component>> {
        let rows = self.read_rows(COMPONENTS_FILE).await?;
        Ok(RecordNormalizer::components(&rows))
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        let rows = self.read_rows(PRODUCTS_FILE).await?;
        Ok(RecordNormalizer::products(&rows))
    }

    async fn list_bom_line_items(&self) -> anyhow::Result<Vec<BomLineItem>> {
        let rows = self.read_rows(BOM_FILE).await?;
        Ok(RecordNormalizer::bom_line_items(&rows))
    }

    async fn list_forecasts(&self) -> anyhow::Result<Vec<Forecast>> {
        let rows = self.read_rows(FORECASTS_FILE).await?;
        Ok(RecordNormalizer::forecasts(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_reads_and_normalizes_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(COMPONENTS_FILE),
            r#"[{ "partCode": "C100", "soh": "180", "description": "Front label" }]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(FORECASTS_FILE),
            r#"[{ "productCode": "SKU-1", "monthlyForecast": { "2025-01": 100 } }]"#,
        )
        .unwrap();

        let source = JsonDirSource::new(dir.path());
        let components = source.list_components().await.unwrap();
        let forecasts = source.list_forecasts().await.unwrap();

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].stock, Decimal::from(180));
        assert_eq!(forecasts[0].total(), Decimal::from(100));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirSource::new(dir.path());

        let err = source.list_products().await.unwrap_err();

        assert!(format!("{err:#}").contains(PRODUCTS_FILE));
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BOM_FILE), "{ not json").unwrap();
        let source = JsonDirSource::new(dir.path());

        let err = source.list_bom_line_items().await.unwrap_err();

        assert!(err.to_string().contains("JSON"));
    }
}
