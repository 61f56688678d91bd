use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use kd_common::Rupees;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

use crate::capabilities::Role;

#[derive(Debug, Clone, Error)]
#[error("Invalid status value: {0}")]
pub struct ConversionError(String);

//--------------------------------------   PaymentStatus     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// No payment notification has been reconciled against the order yet.
    Pending,
    /// A payment notification matched the order; the money is accounted for.
    Confirmed,
    /// The order was cancelled before payment arrived.
    Failed,
}

impl PaymentStatus {
    /// The one-directional payment flow: `Pending` can move to `Confirmed` (matcher) or `Failed` (cancellation).
    /// `Confirmed` and `Failed` are terminal.
    pub fn can_transition_to(self, new: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((self, new), (Pending, Confirmed) | (Pending, Failed))
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Confirmed => write!(f, "Confirmed"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. But this conversion cannot fail. Defaulting to Pending");
            PaymentStatus::Pending
        })
    }
}

//--------------------------------------  OrderStatusType    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been accepted and stock reserved, but not packed yet.
    Processing,
    /// The goods have been packed and are awaiting delivery.
    Packed,
    /// The goods reached the customer. Terminal.
    Delivered,
    /// The order was abandoned by staff or customer. Terminal.
    Cancelled,
}

impl OrderStatusType {
    /// Fulfilment moves strictly forward: Processing → Packed → Delivered. Cancellation is allowed from
    /// Processing or Packed. Delivered and Cancelled accept no further transitions.
    pub fn can_transition_to(self, new: OrderStatusType) -> bool {
        use OrderStatusType::*;
        matches!((self, new), (Processing, Packed) | (Packed, Delivered) | (Processing | Packed, Cancelled))
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatusType::Delivered | OrderStatusType::Cancelled)
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Processing => write!(f, "Processing"),
            OrderStatusType::Packed => write!(f, "Packed"),
            OrderStatusType::Delivered => write!(f, "Delivered"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Packed" => Ok(Self::Packed),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Processing");
            OrderStatusType::Processing
        })
    }
}

//-------------------------------------- TransactionStatus   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// The notification was reconciled against a pending order.
    Matched,
    /// No pending order fit the notification; kept for manual review.
    Unmatched,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Matched => write!(f, "Matched"),
            TransactionStatus::Unmatched => write!(f, "Unmatched"),
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Matched" => Self::Matched,
            "Unmatched" => Self::Unmatched,
            _ => {
                error!("Invalid transaction status: {value}. Defaulting to Unmatched");
                Self::Unmatched
            },
        }
    }
}

//--------------------------------------    StockAction      ---------------------------------------------------------
/// What kind of mutation a stock-history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum StockAction {
    /// Initial quantity on catalog entry.
    Add,
    /// A direct edit of the quantity field.
    Update,
    /// An order-intake deduction.
    Deduct,
}

impl Display for StockAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockAction::Add => write!(f, "ADD"),
            StockAction::Update => write!(f, "UPDATE"),
            StockAction::Deduct => write!(f, "DEDUCT"),
        }
    }
}

//--------------------------------------      Product        ---------------------------------------------------------
/// A catalog entry. `(name, district, unique_number)` is unique (name compared case-insensitively), and
/// `quantity` never goes negative.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub district: String,
    pub added_by: String,
    pub price: Rupees,
    pub unique_number: i64,
    pub category: String,
}

//--------------------------------------     NewProduct      ---------------------------------------------------------
/// A catalog submission. The store assigns the id and the per-(name, district) unique number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub district: String,
    pub added_by: String,
    pub price: Rupees,
    pub category: String,
}

//--------------------------------------   ProductUpdate     ---------------------------------------------------------
/// A partial catalog edit. Only the supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub district: Option<String>,
    pub added_by: Option<String>,
    pub price: Option<Rupees>,
    pub category: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.district.is_none()
            && self.added_by.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

//--------------------------------------       Order         ---------------------------------------------------------
/// A customer order. `total_amount` and `product_ids` are derived by intake, never taken from the caller.
/// Orders are never deleted; cancellation is a status.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub telegram_id: String,
    pub name: String,
    pub address: String,
    /// The raw order text as submitted, retained for audit and display.
    pub order_details: String,
    /// Comma-joined product ids in document order, as matched by intake.
    pub product_ids: String,
    pub total_amount: Rupees,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatusType,
    pub phone: String,
    pub district: String,
    pub date_ordered: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn product_id_list(&self) -> Vec<i64> {
        self.product_ids.split(',').filter_map(|s| s.trim().parse().ok()).collect()
    }
}

//--------------------------------------      NewOrder       ---------------------------------------------------------
/// An order submission. The item lines live in `order_details`; intake parses them itself and computes
/// everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub telegram_id: String,
    pub name: String,
    pub address: String,
    pub order_details: String,
    pub phone: String,
    pub district: String,
}

//--------------------------------------    OrderUpdate      ---------------------------------------------------------
/// A staff-driven status change. Either field may be omitted; supplying neither is a no-op error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub payment_status: Option<PaymentStatus>,
    pub order_status: Option<OrderStatusType>,
}

//--------------------------------------    Transaction      ---------------------------------------------------------
/// One processed payment notification. Append-only: transactions are never edited after creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Rupees,
    pub sender_phone: String,
    pub upi_id: Option<String>,
    pub transaction_id: Option<String>,
    pub sms_phone: String,
    pub date_received: DateTime<Utc>,
    /// Set only when the notification matched an order.
    pub order_id: Option<i64>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

//--------------------------------------   NewTransaction    ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Rupees,
    pub sender_phone: String,
    pub sms_phone: String,
    pub order_id: Option<i64>,
    pub status: TransactionStatus,
    pub upi_id: Option<String>,
    pub transaction_id: Option<String>,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn matched(amount: Rupees, phone: &str, order_id: i64) -> Self {
        Self {
            amount,
            sender_phone: phone.to_string(),
            sms_phone: phone.to_string(),
            order_id: Some(order_id),
            status: TransactionStatus::Matched,
            upi_id: None,
            transaction_id: None,
            note: None,
        }
    }

    pub fn unmatched(amount: Rupees, phone: &str) -> Self {
        Self {
            amount,
            sender_phone: phone.to_string(),
            sms_phone: phone.to_string(),
            order_id: None,
            status: TransactionStatus::Unmatched,
            upi_id: None,
            transaction_id: None,
            note: None,
        }
    }

    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.note = Some(note.into());
        self
    }
}

//--------------------------------------        User         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub telegram_id: String,
    pub name: String,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub district: String,
    pub registered_at: DateTime<Utc>,
    pub language: String,
}

//--------------------------------------      NewUser        ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub telegram_id: String,
    pub name: String,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub district: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "English".to_string()
}

//--------------------------------------     UserUpdate      ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub primary_phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub district: Option<String>,
    pub language: Option<String>,
}

//--------------------------------------  RoleAssignment     ---------------------------------------------------------
/// A (user, role) pair. At most one assignment exists per pair; re-assigning replaces the prior entry.
/// `district` is required for roles scoped to one (see [`Role::requires_district`]).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub telegram_id: String,
    pub role: Role,
    pub district: Option<String>,
}

//--------------------------------------      Setting        ---------------------------------------------------------
/// Generic string configuration, e.g. `low_stock_threshold`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

//--------------------------------------      UserInfo       ---------------------------------------------------------
/// Extended address record, upserted as a whole.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub telegram_id: String,
    pub name: String,
    pub house_name: Option<String>,
    pub landmark: Option<String>,
    pub ward_no: Option<String>,
    pub panchayat: Option<String>,
    pub block: Option<String>,
    pub sub_district: Option<String>,
    pub district: String,
    pub state: String,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------    NewUserInfo      ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserInfo {
    pub telegram_id: String,
    pub name: String,
    pub house_name: Option<String>,
    pub landmark: Option<String>,
    pub ward_no: Option<String>,
    pub panchayat: Option<String>,
    pub block: Option<String>,
    pub sub_district: Option<String>,
    pub district: String,
    pub state: String,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
}

//--------------------------------------   StockHistory      ---------------------------------------------------------
/// Audit entry for a stock-affecting mutation. Not used for recomputation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHistory {
    pub id: i64,
    pub product_id: i64,
    pub action: StockAction,
    pub quantity: i64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn payment_status_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Failed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Confirmed));
    }

    #[test]
    fn order_status_transitions() {
        use OrderStatusType::*;
        assert!(Processing.can_transition_to(Packed));
        assert!(Packed.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Packed.can_transition_to(Cancelled));
        assert!(!Processing.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Packed));
        assert!(!Cancelled.can_transition_to(Processing));
        assert!(Delivered.is_terminal() && Cancelled.is_terminal());
    }

    #[test]
    fn wire_format_is_camel_case() {
        let order = NewOrder {
            telegram_id: "user1".into(),
            name: "Raj Kumar".into(),
            address: "Main Road, Block A".into(),
            order_details: "Potato 2 SouthDelhi 6338398272 1".into(),
            phone: "9876543210".into(),
            district: "SouthDelhi".into(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("telegramId").is_some());
        assert!(json.get("orderDetails").is_some());
    }

    #[test]
    fn status_strings_round_trip() {
        assert_eq!(PaymentStatus::from("Confirmed".to_string()), PaymentStatus::Confirmed);
        assert_eq!("Packed".parse::<OrderStatusType>().unwrap(), OrderStatusType::Packed);
        assert_eq!(StockAction::Deduct.to_string(), "DEDUCT");
    }
}
