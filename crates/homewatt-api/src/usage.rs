// Usage history endpoints.

use crate::client::{EnergyApi, FetchOutcome, MutationAck};
use crate::error::Error;
use crate::models::RawHistoryEntry;

impl EnergyApi {
    /// Fetch the usage history.
    ///
    /// `GET /api/usage-history`
    ///
    /// The shape varies by backend revision: per-log entries or monthly
    /// aggregates. Both arrive as [`RawHistoryEntry`] rows.
    pub async fn usage_history(&self) -> Result<FetchOutcome<Vec<RawHistoryEntry>>, Error> {
        let url = self.api_url("usage-history");
        self.get_json(url).await
    }

    /// Delete a single usage log.
    ///
    /// `DELETE /api/delete-usage-log/{id}`
    pub async fn delete_usage_log(&self, log_id: i64) -> Result<MutationAck, Error> {
        let url = self.api_url(&format!("delete-usage-log/{log_id}"));
        self.delete(url).await
    }
}
