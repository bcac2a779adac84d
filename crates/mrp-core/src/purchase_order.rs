//! 客戶採購訂單（PO）模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{MrpError, Product};

/// 金額差異容許值
pub const AMOUNT_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// PO 狀態標籤（可多選）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoStatus {
    #[serde(rename = "PO Check")]
    PoCheck,
    Open,
    #[serde(rename = "Wip Called")]
    WipCalled,
    #[serde(rename = "Packaging Called")]
    PackagingCalled,
    #[serde(rename = "In Production")]
    InProduction,
    #[serde(rename = "Despatched/ Completed")]
    DespatchedCompleted,
    #[serde(rename = "PO Canceled")]
    Canceled,
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PoStatus::PoCheck => "PO Check",
            PoStatus::Open => "Open",
            PoStatus::WipCalled => "Wip Called",
            PoStatus::PackagingCalled => "Packaging Called",
            PoStatus::InProduction => "In Production",
            PoStatus::DespatchedCompleted => "Despatched/ Completed",
            PoStatus::Canceled => "PO Canceled",
        };
        f.write_str(label)
    }
}

/// 金額核對結果
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCheck {
    /// 訂購箱數
    pub shippers: Decimal,
    /// 系統計算金額
    pub system_amount: Decimal,
    /// 與客戶金額的差異（絕對值）
    pub difference: Decimal,
}

impl AmountCheck {
    /// 依產品散裝供應明細與每箱價格核對 PO 金額
    pub fn evaluate(
        product: &Product,
        ordered_qty_pieces: Decimal,
        customer_amount: Decimal,
        bulk_marker: &str,
    ) -> crate::Result<Self> {
        let per_shipper = product
            .bulk_supplied_line(bulk_marker)
            .map(|line| line.quantity_per_shipper())
            .unwrap_or(Decimal::ZERO);
        if per_shipper.is_zero() {
            return Err(MrpError::MissingBulkSupplied(product.product_code.clone()));
        }

        let price_per_shipper = product.price_per_shipper.unwrap_or(Decimal::ZERO);
        let shippers = ordered_qty_pieces / per_shipper;
        let system_amount = shippers * price_per_shipper;
        let difference = (customer_amount - system_amount).abs();

        Ok(Self {
            shippers,
            system_amount,
            difference,
        })
    }

    /// 差異是否在容許範圍內
    pub fn is_within_tolerance(&self) -> bool {
        self.difference <= AMOUNT_TOLERANCE
    }

    /// 核對後應設定的狀態
    pub fn status(&self) -> PoStatus {
        if self.is_within_tolerance() {
            PoStatus::Open
        } else {
            PoStatus::PoCheck
        }
    }
}

/// 客戶採購訂單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,

    /// PO 號碼
    pub po_number: String,

    /// 產品編碼
    pub product_code: String,

    /// 客戶名稱
    pub customer_name: String,

    /// 狀態標籤
    pub statuses: Vec<PoStatus>,

    /// 建立日期
    pub po_created_date: NaiveDate,

    /// 收單日期
    pub po_received_date: NaiveDate,

    /// 要求交貨日期
    pub requested_delivery_date: Option<NaiveDate>,

    /// 訂購箱數
    pub ordered_qty_shippers: Decimal,

    /// 訂購件數
    pub ordered_qty_pieces: Decimal,

    /// 客戶金額
    pub customer_amount: Decimal,

    /// 系統金額
    pub system_amount: Decimal,

    /// 出貨日期
    pub delivery_date: Option<NaiveDate>,

    /// 出貨單號
    pub delivery_docket_number: Option<String>,
}

impl PurchaseOrder {
    /// 創建新的 PO（初始狀態為 PO Check）
    pub fn new(
        po_number: String,
        product_code: String,
        customer_name: String,
        po_received_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            po_number,
            product_code,
            customer_name,
            statuses: vec![PoStatus::PoCheck],
            po_created_date: po_received_date,
            po_received_date,
            requested_delivery_date: None,
            ordered_qty_shippers: Decimal::ZERO,
            ordered_qty_pieces: Decimal::ZERO,
            customer_amount: Decimal::ZERO,
            system_amount: Decimal::ZERO,
            delivery_date: None,
            delivery_docket_number: None,
        }
    }

    /// 建構器模式：設置訂購量與金額
    pub fn with_order(
        mut self,
        ordered_qty_shippers: Decimal,
        ordered_qty_pieces: Decimal,
        customer_amount: Decimal,
        system_amount: Decimal,
    ) -> Self {
        self.ordered_qty_shippers = ordered_qty_shippers;
        self.ordered_qty_pieces = ordered_qty_pieces;
        self.customer_amount = customer_amount;
        self.system_amount = system_amount;
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_statuses(mut self, statuses: Vec<PoStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn has_status(&self, status: PoStatus) -> bool {
        self.statuses.contains(&status)
    }

    /// 尚未出貨完成
    pub fn is_open(&self) -> bool {
        !self.has_status(PoStatus::DespatchedCompleted)
    }

    /// 需要人工核對
    pub fn needs_attention(&self) -> bool {
        self.has_status(PoStatus::PoCheck)
    }

    /// 切換狀態標籤：已有則移除，否則加入；清空後回到 Open
    pub fn toggle_status(&mut self, status: PoStatus) -> &[PoStatus] {
        if self.has_status(status) {
            self.statuses.retain(|s| *s != status);
        } else {
            self.statuses.push(status);
        }

        if self.statuses.is_empty() {
            self.statuses.push(PoStatus::Open);
        }

        &self.statuses
    }

    /// 修改訂購件數與客戶金額，重新計算箱數、系統金額與狀態
    pub fn update_amounts(
        &mut self,
        product: &Product,
        ordered_qty_pieces: Decimal,
        customer_amount: Decimal,
        bulk_marker: &str,
    ) -> crate::Result<AmountCheck> {
        let check =
            AmountCheck::evaluate(product, ordered_qty_pieces, customer_amount, bulk_marker)?;

        self.ordered_qty_pieces = ordered_qty_pieces;
        self.customer_amount = customer_amount;
        self.ordered_qty_shippers = check.shippers;
        self.system_amount = check.system_amount;
        self.statuses = vec![check.status()];

        Ok(check)
    }

    /// 解除 PO Check：金額差異仍超出容許值時失敗
    pub fn resolve_check(&mut self, product: &Product, bulk_marker: &str) -> crate::Result<()> {
        let check = AmountCheck::evaluate(
            product,
            self.ordered_qty_pieces,
            self.customer_amount,
            bulk_marker,
        )?;
        if !check.is_within_tolerance() {
            return Err(MrpError::AmountMismatch {
                difference: check.difference.round_dp(2),
            });
        }

        self.statuses = vec![PoStatus::Open];
        Ok(())
    }

    /// 出貨完成
    pub fn despatch(&mut self, delivery_date: NaiveDate, docket_number: String) {
        self.statuses = vec![PoStatus::DespatchedCompleted];
        self.delivery_date = Some(delivery_date);
        self.delivery_docket_number = Some(docket_number);
    }

    /// 重新開啟已出貨的 PO，並清除出貨資訊
    pub fn reopen(&mut self) {
        self.statuses = vec![PoStatus::Open];
        self.delivery_date = None;
        self.delivery_docket_number = None;
    }

    /// 收單到出貨的天數
    pub fn turnaround_days(&self) -> Option<i64> {
        self.delivery_date
            .map(|delivered| (delivered - self.po_received_date).num_days().abs())
    }
}
