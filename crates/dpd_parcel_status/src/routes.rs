// --- File: crates/dpd_parcel_status/src/routes.rs ---

use crate::handlers::{get_parcel_status_handler, ParcelStatusState};
use axum::{routing::get, Router};
use dpd_auth::SessionProvider;
use std::sync::Arc;

/// Creates a router containing all parcel status routes.
pub fn routes(session: Arc<SessionProvider>) -> Router {
    let state = Arc::new(ParcelStatusState { session });

    Router::new()
        .route("/dpd/parcels/{awb}/status", get(get_parcel_status_handler))
        .with_state(state)
}
