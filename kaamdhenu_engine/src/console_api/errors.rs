use kd_common::Rupees;
use thiserror::Error;

use crate::{
    db_types::{OrderStatusType, PaymentStatus},
    traits::{CatalogError, ConsoleDbError, LedgerError, OrderError},
};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    /// Unknown item or insufficient stock. The message names the offending triple or the
    /// available/requested amounts.
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("Quantity for {product} must be positive (got {quantity})")]
    InvalidQuantity { product: String, quantity: i64 },
    #[error("Payment amount must be positive (got {0})")]
    InvalidAmount(Rupees),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Cannot change order status from {from} to {to}")]
    OrderStatusChangeForbidden { from: OrderStatusType, to: OrderStatusType },
    #[error("Cannot change payment status from {from} to {to}")]
    PaymentStatusChangeForbidden { from: PaymentStatus, to: PaymentStatus },
    #[error("The requested order change would result in a no-op")]
    StatusChangeNoOp,
    #[error("{0}")]
    Order(#[from] OrderError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Database(#[from] ConsoleDbError),
}
