#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{
    Address, GeneralShipmentDataPatch, ParcelResponse, ParcelSpec, PredictSpec, PrintOptionsPatch,
    ShipmentRequest, ShipmentResponse,
};

#[utoipa::path(
    post,
    path = "/dpd/shipments", // Path relative to /api
    request_body = ShipmentRequest,
    responses(
        (status = 200, description = "Shipment stored, air way bills and label returned", body = ShipmentResponse),
        (status = 400, description = "Invalid parcel, predict or order data"),
        (status = 401, description = "DPD rejected the credentials"),
        (status = 502, description = "DPD rejected the shipment or the service failed")
    ),
    tag = "DPD Shipment"
)]
fn doc_create_shipment_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_shipment_handler),
    components(schemas(
        ShipmentRequest,
        ShipmentResponse,
        ParcelSpec,
        PredictSpec,
        Address,
        GeneralShipmentDataPatch,
        PrintOptionsPatch,
        ParcelResponse
    )),
    tags((name = "DPD Shipment", description = "Order creation and labels through the DPD ShipmentService"))
)]
pub struct ShipmentApiDoc;
