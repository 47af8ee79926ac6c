// Dashboard statistics endpoint.

use crate::client::{EnergyApi, FetchOutcome};
use crate::error::Error;
use crate::models::RawDashboardStats;

impl EnergyApi {
    /// Fetch the aggregate usage counters.
    ///
    /// `GET /api/dashboard-stats`
    pub async fn dashboard_stats(&self) -> Result<FetchOutcome<RawDashboardStats>, Error> {
        let url = self.api_url("dashboard-stats");
        self.get_json(url).await
    }
}
