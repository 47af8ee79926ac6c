// homewatt-api: Async Rust client for the energy-monitoring backend REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

// Endpoint modules — inherent methods on `EnergyApi`, one file per resource.
mod alerts;
mod appliances;
mod auth;
mod readings;
mod rooms;
mod simulate;
mod stats;
mod usage;

pub use client::{EnergyApi, FetchOutcome, MutationAck};
pub use error::Error;
