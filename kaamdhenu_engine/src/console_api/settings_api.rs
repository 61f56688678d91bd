use log::*;

use crate::{
    db_types::Setting,
    traits::{SettingsError, SettingsManagement},
};

pub const LOW_STOCK_THRESHOLD_KEY: &str = "low_stock_threshold";

/// String configuration reads and writes.
pub struct SettingsApi<B> {
    db: B,
}

impl<B> SettingsApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> SettingsApi<B>
where B: SettingsManagement
{
    pub async fn fetch_setting(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        self.db.fetch_setting(key).await
    }

    pub async fn set_setting(&self, setting: Setting) -> Result<Setting, SettingsError> {
        let setting = self.db.set_setting(setting).await?;
        debug!("🪛️ Setting {} updated to {}", setting.key, setting.value);
        Ok(setting)
    }
}
