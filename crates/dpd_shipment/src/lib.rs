//! DPD shipments
//!
//! Builds a `storeOrders` request (parcels, sender, recipient, Predict and
//! print options), submits it to the DPD ShipmentService and returns the
//! air way bills with their tracking links and the label document.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

pub use error::ShipmentError;
pub use logic::{create_shipment, Shipment};
pub use models::{
    Address, GeneralShipmentDataPatch, ParcelResponse, ParcelSpec, PredictChannel, PredictSpec,
    PrintOptionsPatch, ShipmentRequest, ShipmentResponse, PREDICT_COUNTRIES, TRACKING_URL,
};
pub use routes::routes;
