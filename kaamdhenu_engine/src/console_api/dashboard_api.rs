use crate::traits::{ConsoleDatabase, ConsoleDbError, DashboardStats};

/// Read-only summary counters for the landing page. No write path.
pub struct DashboardApi<B> {
    db: B,
}

impl<B> DashboardApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> DashboardApi<B>
where B: ConsoleDatabase
{
    pub async fn fetch_stats(&self) -> Result<DashboardStats, ConsoleDbError> {
        self.db.fetch_dashboard_stats().await
    }
}
