use kd_common::Rupees;
use thiserror::Error;

use crate::db_types::{Order, OrderUpdate, PaymentStatus};

/// Order reads and the status write path. Order creation lives on
/// [`ConsoleDatabase`](super::ConsoleDatabase) because it is atomic with stock deduction.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// All orders, optionally restricted to one district.
    async fn fetch_orders(&self, district: Option<&str>) -> Result<Vec<Order>, OrderError>;

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderError>;

    async fn fetch_orders_by_payment_status(&self, status: PaymentStatus) -> Result<Vec<Order>, OrderError>;

    /// The payment-matching lookup: the oldest `Pending` order whose total equals `amount` and whose phone
    /// matches `phone` under `+91`-prefix-tolerant comparison.
    async fn fetch_pending_order_by_amount_and_phone(
        &self,
        amount: Rupees,
        phone: &str,
    ) -> Result<Option<Order>, OrderError>;

    /// Writes the supplied status fields. Transition legality is the caller's concern
    /// (see [`OrderFlowApi`](crate::OrderFlowApi)). Returns `None` if the order does not exist.
    async fn update_order_statuses(&self, id: i64, update: OrderUpdate) -> Result<Option<Order>, OrderError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("We have an internal database problem: {0}")]
    DatabaseError(String),
    #[error("Order with id {0} does not exist")]
    OrderNotFound(i64),
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        OrderError::DatabaseError(e.to_string())
    }
}
