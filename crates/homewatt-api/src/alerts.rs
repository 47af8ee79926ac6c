// Threshold alerts endpoint.

use crate::client::{EnergyApi, FetchOutcome};
use crate::error::Error;
use crate::models::RawAlertEntry;

impl EnergyApi {
    /// Fetch the most recent threshold alerts, newest first.
    ///
    /// `GET /api/alerts`
    pub async fn alerts(&self) -> Result<FetchOutcome<Vec<RawAlertEntry>>, Error> {
        let url = self.api_url("alerts");
        self.get_json(url).await
    }
}
