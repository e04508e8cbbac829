// --- File: crates/dpd_shipment/src/handlers.rs ---

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use dpd_auth::SessionProvider;
use dpd_common::{map_json_error, DpdError};

use crate::logic::create_shipment;
use crate::models::{ShipmentRequest, ShipmentResponse};

/// Shared state for the shipment routes.
#[derive(Clone)]
pub struct ShipmentState {
    pub session: Arc<SessionProvider>,
}

/// `POST /dpd/shipments`
#[axum::debug_handler]
pub async fn create_shipment_handler(
    State(state): State<Arc<ShipmentState>>,
    Json(payload): Json<ShipmentRequest>,
) -> Result<Json<ShipmentResponse>, Response> {
    info!("Shipment requested with {} parcel(s)", payload.parcels.len());

    let authorisation = match state.session.authorisation().await {
        Ok(authorisation) => authorisation,
        Err(err) => return Err(DpdError::from(err).into_response()),
    };
    let defaults = &state.session.config().shipment;

    map_json_error(create_shipment(&authorisation, defaults, payload).await)
}
