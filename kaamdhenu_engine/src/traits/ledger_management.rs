use thiserror::Error;

use crate::db_types::{NewTransaction, Transaction};

/// The append-only payment ledger. Transactions are written once per processed notification and never
/// mutated afterwards.
#[allow(async_fn_in_trait)]
pub trait LedgerManagement {
    async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError>;

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, LedgerError>;

    async fn fetch_unmatched_transactions(&self) -> Result<Vec<Transaction>, LedgerError>;
}

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("We have an internal database problem: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}
