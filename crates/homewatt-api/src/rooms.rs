// Room endpoints: listing, per-room usage, and CRUD.
//
// Create uses a form body and edit a JSON body -- the backend grew these
// endpoints at different times and kept both conventions.

use serde_json::json;

use crate::client::{EnergyApi, FetchOutcome, MutationAck};
use crate::error::Error;
use crate::models::{RawRoom, RawRoomUsage};

impl EnergyApi {
    /// List rooms (id + name only, for pickers).
    ///
    /// `GET /api/rooms`
    pub async fn rooms(&self) -> Result<FetchOutcome<Vec<RawRoom>>, Error> {
        let url = self.api_url("rooms");
        self.get_json(url).await
    }

    /// Fetch every room with its nested appliances and usage figures.
    ///
    /// `GET /api/room-usage`
    pub async fn room_usage(&self) -> Result<FetchOutcome<Vec<RawRoomUsage>>, Error> {
        let url = self.api_url("room-usage");
        self.get_json(url).await
    }

    /// Fetch a single room (edit-form prefill).
    ///
    /// `GET /api/room-usage/{id}`
    pub async fn room(&self, room_id: i64) -> Result<FetchOutcome<RawRoom>, Error> {
        let url = self.api_url(&format!("room-usage/{room_id}"));
        self.get_json(url).await
    }

    /// Create a room.
    ///
    /// `POST /api/add-room` (form-encoded)
    pub async fn add_room(&self, room_name: &str) -> Result<MutationAck, Error> {
        let url = self.api_url("add-room");
        self.post_form(url, &[("room_name", room_name)]).await
    }

    /// Rename a room.
    ///
    /// `POST /api/edit-room/{id}` (JSON)
    pub async fn edit_room(&self, room_id: i64, room_name: &str) -> Result<MutationAck, Error> {
        let url = self.api_url(&format!("edit-room/{room_id}"));
        self.post_json(url, &json!({ "room_name": room_name })).await
    }

    /// Delete a room. The backend cascades to its appliances and logs.
    ///
    /// `DELETE /api/delete-room/{id}`
    pub async fn delete_room(&self, room_id: i64) -> Result<MutationAck, Error> {
        let url = self.api_url(&format!("delete-room/{room_id}"));
        self.delete(url).await
    }
}
