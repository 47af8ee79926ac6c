// Appliance endpoints: listing, detail, CRUD, and the status toggle.

use crate::client::{EnergyApi, FetchOutcome, MutationAck};
use crate::error::Error;
use crate::models::{ApplianceUpdate, NewAppliance, RawApplianceDetail, RawApplianceUsage};

impl EnergyApi {
    /// List the appliances of one room.
    ///
    /// `GET /api/appliances?room_id={id}`
    pub async fn appliances(
        &self,
        room_id: i64,
    ) -> Result<FetchOutcome<Vec<RawApplianceUsage>>, Error> {
        let mut url = self.api_url("appliances");
        url.query_pairs_mut()
            .append_pair("room_id", &room_id.to_string());
        self.get_json(url).await
    }

    /// Fetch a single appliance (edit-form prefill).
    ///
    /// `GET /api/appliance/{id}`
    pub async fn appliance(
        &self,
        appliance_id: i64,
    ) -> Result<FetchOutcome<RawApplianceDetail>, Error> {
        let url = self.api_url(&format!("appliance/{appliance_id}"));
        self.get_json(url).await
    }

    /// Create an appliance in a room.
    ///
    /// `POST /api/add-appliance` (form-encoded)
    pub async fn add_appliance(&self, appliance: &NewAppliance) -> Result<MutationAck, Error> {
        let url = self.api_url("add-appliance");
        self.post_form(url, appliance).await
    }

    /// Update an appliance's name, quantity, and power ratings.
    ///
    /// `POST /api/edit-appliance/{id}` (JSON)
    pub async fn edit_appliance(
        &self,
        appliance_id: i64,
        update: &ApplianceUpdate,
    ) -> Result<MutationAck, Error> {
        let url = self.api_url(&format!("edit-appliance/{appliance_id}"));
        self.post_json(url, update).await
    }

    /// Flip an appliance's on/off status.
    ///
    /// `POST /api/update-appliance` (form-encoded)
    pub async fn update_appliance_status(
        &self,
        appliance_id: i64,
        status: &str,
    ) -> Result<MutationAck, Error> {
        let url = self.api_url("update-appliance");
        self.post_form(
            url,
            &[
                ("appliance_id", appliance_id.to_string()),
                ("status", status.to_string()),
            ],
        )
        .await
    }

    /// Delete an appliance. The backend cascades to its usage logs.
    ///
    /// `DELETE /api/delete-appliance/{id}`
    pub async fn delete_appliance(&self, appliance_id: i64) -> Result<MutationAck, Error> {
        let url = self.api_url(&format!("delete-appliance/{appliance_id}"));
        self.delete(url).await
    }
}
