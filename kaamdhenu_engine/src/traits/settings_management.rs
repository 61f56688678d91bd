use thiserror::Error;

use crate::db_types::Setting;

/// Generic string configuration, e.g. the low-stock threshold.
#[allow(async_fn_in_trait)]
pub trait SettingsManagement {
    async fn fetch_setting(&self, key: &str) -> Result<Option<Setting>, SettingsError>;

    /// Insert-or-replace.
    async fn set_setting(&self, setting: Setting) -> Result<Setting, SettingsError>;
}

#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("We have an internal database problem: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for SettingsError {
    fn from(e: sqlx::Error) -> Self {
        SettingsError::DatabaseError(e.to_string())
    }
}
