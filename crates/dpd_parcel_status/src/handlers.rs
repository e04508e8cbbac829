// --- File: crates/dpd_parcel_status/src/handlers.rs ---

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use dpd_auth::SessionProvider;
use dpd_common::{handle_json_result, not_found, DpdError};

use crate::logic::{ParcelStatus, ParcelStatusError, StatusRecord};

/// Shared state for the parcel status routes.
#[derive(Clone)]
pub struct ParcelStatusState {
    pub session: Arc<SessionProvider>,
}

/// `GET /dpd/parcels/{awb}/status`
#[axum::debug_handler]
pub async fn get_parcel_status_handler(
    State(state): State<Arc<ParcelStatusState>>,
    Path(awb): Path<String>,
) -> Result<Json<StatusRecord>, Response> {
    info!("Parcel status requested for {}", awb);
    handle_json_result(lookup(&state, &awb).await)
}

async fn lookup(state: &ParcelStatusState, awb: &str) -> Result<StatusRecord, DpdError> {
    let status = match fetch(state, awb).await {
        // A stale token: drop the session and try once more with a fresh one.
        Err(ParcelStatusError::SessionRejected(message)) => {
            warn!("DPD session rejected ({}), logging in again", message);
            state.session.invalidate().await;
            match fetch(state, awb).await {
                Err(ParcelStatusError::SessionRejected(_)) => None,
                other => other?,
            }
        }
        other => other?,
    };

    status.ok_or_else(|| not_found(format!("No current status for parcel {}", awb)))
}

async fn fetch(
    state: &ParcelStatusState,
    awb: &str,
) -> Result<Option<StatusRecord>, ParcelStatusError> {
    let authorisation = state.session.authorisation().await?;
    ParcelStatus::new(&authorisation)?.fetch_status(awb).await
}
