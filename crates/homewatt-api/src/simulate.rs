// Simulation and threshold endpoints.
//
// `simulate-data` seeds usage logs for every appliance and can take a
// while; callers pause their polling around it.

use serde_json::json;

use crate::client::{EnergyApi, MutationAck};
use crate::error::Error;

impl EnergyApi {
    /// Generate simulated usage data for every appliance.
    ///
    /// `POST /api/simulate-data`
    pub async fn simulate_data(&self) -> Result<MutationAck, Error> {
        let url = self.api_url("simulate-data");
        self.post_empty(url).await
    }

    /// Re-evaluate threshold alerts against current monthly usage.
    ///
    /// `POST /api/simulate-alerts`
    pub async fn simulate_alerts(&self) -> Result<MutationAck, Error> {
        let url = self.api_url("simulate-alerts");
        self.post_empty(url).await
    }

    /// Set the warning/critical monthly kWh thresholds.
    ///
    /// `POST /api/update-thresholds` (JSON)
    pub async fn update_thresholds(
        &self,
        warning_kwh: f64,
        critical_kwh: f64,
    ) -> Result<MutationAck, Error> {
        let url = self.api_url("update-thresholds");
        self.post_json(
            url,
            &json!({ "warning_kwh": warning_kwh, "critical_kwh": critical_kwh }),
        )
        .await
    }
}
