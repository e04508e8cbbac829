// --- File: crates/dpd_shipment/src/routes.rs ---

use crate::handlers::{create_shipment_handler, ShipmentState};
use axum::{routing::post, Router};
use dpd_auth::SessionProvider;
use std::sync::Arc;

/// Creates a router containing all shipment routes.
pub fn routes(session: Arc<SessionProvider>) -> Router {
    let state = Arc::new(ShipmentState { session });

    Router::new()
        .route("/dpd/shipments", post(create_shipment_handler))
        .with_state(state)
}
