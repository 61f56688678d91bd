use thiserror::Error;

use crate::{
    db_types::{NewOrder, NewTransaction, Order, Transaction},
    traits::{
        data_objects::{DashboardStats, ResolvedLine},
        CatalogError,
        CatalogManagement,
        LedgerError,
        LedgerManagement,
        OrderError,
        OrderManagement,
        SettingsError,
        SettingsManagement,
        UserApiError,
        UserManagement,
    },
};

/// The highest-level behaviour a backend must support to drive the console. Beyond the per-concern traits,
/// this adds the operations that span several tables and must commit or fail as a unit.
#[allow(async_fn_in_trait)]
pub trait ConsoleDatabase:
    Clone + CatalogManagement + OrderManagement + LedgerManagement + UserManagement + SettingsManagement
{
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Takes a fully resolved order and, in a single transaction:
    /// * deducts stock for every line, re-checking availability under the transaction (so a concurrent order
    ///   cannot oversell), and writing a `DEDUCT` stock-history entry per line;
    /// * computes the total as Σ line price × quantity;
    /// * inserts the order with `Pending`/`Processing` initial statuses.
    ///
    /// Either everything commits or nothing does: a failure on any line leaves every product's stock
    /// untouched.
    async fn insert_order_with_deductions(
        &self,
        order: NewOrder,
        lines: &[ResolvedLine],
    ) -> Result<Order, ConsoleDbError>;

    /// Flips the order's payment status from `Pending` to `Confirmed` and appends the matched transaction,
    /// in one transaction. Fails with [`ConsoleDbError::OrderNotPending`] if the order's payment status
    /// changed since it was fetched; the caller then files the notification as unmatched instead.
    async fn confirm_order_payment(
        &self,
        order_id: i64,
        transaction: NewTransaction,
    ) -> Result<(Order, Transaction), ConsoleDbError>;

    /// The dashboard counters, read in one snapshot. The low-stock threshold comes from the
    /// `low_stock_threshold` setting (default 100 when unset or unparseable).
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, ConsoleDbError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), ConsoleDbError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum ConsoleDbError {
    #[error("We have an internal database problem: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Order(#[from] OrderError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    User(#[from] UserApiError),
    #[error("{0}")]
    Settings(#[from] SettingsError),
    #[error("Order {0} is not awaiting payment")]
    OrderNotPending(i64),
}

impl From<sqlx::Error> for ConsoleDbError {
    fn from(e: sqlx::Error) -> Self {
        ConsoleDbError::DatabaseError(e.to_string())
    }
}
