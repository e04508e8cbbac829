#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::StatusRecord;

#[utoipa::path(
    get,
    path = "/dpd/parcels/{awb}/status", // Path relative to /api
    params(("awb" = String, Path, description = "DPD parcel label number", example = "09981122330100")),
    responses(
        (status = 200, description = "Current parcel status", body = StatusRecord),
        (status = 400, description = "Empty parcel label number"),
        (status = 404, description = "DPD has no current status for this parcel"),
        (status = 502, description = "DPD service error")
    ),
    tag = "DPD Parcel Status"
)]
fn doc_get_parcel_status_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_get_parcel_status_handler),
    components(schemas(StatusRecord)),
    tags((name = "DPD Parcel Status", description = "Parcel tracking through the DPD ParcelLifeCycleService"))
)]
pub struct ParcelStatusApiDoc;
