// Live energy readings endpoint.

use crate::client::{EnergyApi, FetchOutcome};
use crate::error::Error;
use crate::models::RawEnergyReading;

impl EnergyApi {
    /// Fetch the latest reading per appliance (feeds the live chart).
    ///
    /// `GET /api/energy-readings`
    pub async fn energy_readings(&self) -> Result<FetchOutcome<Vec<RawEnergyReading>>, Error> {
        let url = self.api_url("energy-readings");
        self.get_json(url).await
    }
}
