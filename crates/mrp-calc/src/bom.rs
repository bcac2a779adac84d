//! BOM 附加

use mrp_core::{BomLineItem, Product};
use std::collections::HashMap;

/// BOM 附加器
pub struct BomAttacher;

impl BomAttacher {
    /// 將 BOM 明細依所屬產品ID附加到產品上
    ///
    /// 產品記錄內嵌的明細保留，BOM 資料集的明細接在其後。
    /// 兩者皆無的產品得到空的 BOM，不視為錯誤。
    pub fn attach(products: Vec<Product>, line_items: Vec<BomLineItem>) -> Vec<Product> {
        let mut grouped = Self::group_by_product(line_items);

        products
            .into_iter()
            .map(|mut product| {
                if let Some(lines) = grouped.remove(&product.id) {
                    product.components.extend(lines);
                }
                product
            })
            .collect()
    }

    /// 按產品ID分組明細（保持原始順序）
    fn group_by_product(line_items: Vec<BomLineItem>) -> HashMap<String, Vec<BomLineItem>> {
        let mut grouped = HashMap::new();
        for item in line_items {
            grouped
                .entry(item.product_id.clone())
                .or_insert_with(Vec::new)
                .push(item);
        }
        grouped
    }
}
