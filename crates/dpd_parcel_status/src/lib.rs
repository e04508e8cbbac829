//! DPD parcel status lookup
//!
//! Maps a parcel label number (airway bill) to its current status through
//! `getTrackingData` of the DPD ParcelLifeCycleService.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use logic::{ParcelStatus, ParcelStatusError, StatusRecord};
pub use routes::routes;
