//! 物料庫存（SOH）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 物料（含現有庫存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// 物料編碼
    pub part_code: String,

    /// 描述
    pub description: String,

    /// 現有庫存
    pub stock: Decimal,

    /// 安全庫存
    pub safety_stock: Option<Decimal>,

    /// 物料類型（自由文字分類）
    pub part_type: Option<String>,
}

impl Component {
    /// 創建新的物料記錄
    pub fn new(part_code: String, description: String, stock: Decimal) -> Self {
        Self {
            part_code,
            description,
            stock,
            safety_stock: None,
            part_type: None,
        }
    }

    /// 缺少 SOH 記錄時的零庫存佔位物料
    pub fn placeholder(part_code: String, description: String, part_type: String) -> Self {
        Self {
            part_code,
            description,
            stock: Decimal::ZERO,
            safety_stock: Some(Decimal::ZERO),
            part_type: Some(part_type),
        }
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, safety_stock: Decimal) -> Self {
        self.safety_stock = Some(safety_stock);
        self
    }

    /// 建構器模式：設置物料類型
    pub fn with_part_type(mut self, part_type: String) -> Self {
        self.part_type = Some(part_type);
        self
    }

    /// 檢查庫存是否低於安全庫存（未設定安全庫存視為 0）
    pub fn is_below_safety_stock(&self) -> bool {
        self.stock < self.safety_stock.unwrap_or(Decimal::ZERO)
    }
}
