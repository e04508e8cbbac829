// --- File: crates/dpd_shipment/src/error.rs ---
use dpd_common::{external_service_error, DpdError, HttpStatusCode, SoapError};
use thiserror::Error;

/// Errors raised while building or submitting a DPD shipment.
#[derive(Error, Debug)]
pub enum ShipmentError {
    /// A parcel dimension is below 1
    #[error("Minimum value for \"{0}\" is 1")]
    DimensionTooSmall(&'static str),

    /// A rounded-up parcel dimension needs more than three digits
    #[error("Value for \"{0}\" exceeds 999")]
    DimensionTooLarge(&'static str),

    #[error("Parcel weight must be a positive number")]
    InvalidWeight,

    /// The weight in decagrams does not fit the wire field
    #[error("Parcel weight {0} g is too large")]
    WeightTooLarge(f64),

    #[error("Predict channel not allowed: {0}")]
    PredictChannelNotAllowed(String),

    #[error("Predict email address not valid")]
    InvalidPredictEmail,

    #[error("Predict value ({0}) empty")]
    EmptyPredictValue(&'static str),

    #[error("Predict service not available for this destination")]
    PredictNotAvailable,

    #[error("Create at least 1 parcel")]
    NoParcels,

    /// `storeOrders` succeeded but the shipment response carries faults
    #[error("DPD rejected the shipment: {0}")]
    Rejected(String),

    /// `storeOrders` answered with a SOAP fault
    #[error("DPD shipment fault: {0}")]
    Fault(String),

    #[error("Invalid DPD shipment response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Soap(#[from] SoapError),
}

impl ShipmentError {
    /// Local input problems, detected before anything is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ShipmentError::DimensionTooSmall(_)
                | ShipmentError::DimensionTooLarge(_)
                | ShipmentError::InvalidWeight
                | ShipmentError::WeightTooLarge(_)
                | ShipmentError::PredictChannelNotAllowed(_)
                | ShipmentError::InvalidPredictEmail
                | ShipmentError::EmptyPredictValue(_)
                | ShipmentError::PredictNotAvailable
                | ShipmentError::NoParcels
        )
    }
}

impl From<ShipmentError> for DpdError {
    fn from(err: ShipmentError) -> Self {
        match err {
            ShipmentError::Rejected(message) | ShipmentError::Fault(message) => {
                external_service_error("DPD ShipmentService", message)
            }
            ShipmentError::InvalidResponse(message) => DpdError::ParseError(message),
            ShipmentError::Soap(e) => e.into(),
            other => DpdError::ValidationError(other.to_string()),
        }
    }
}

impl HttpStatusCode for ShipmentError {
    fn status_code(&self) -> u16 {
        match self {
            e if e.is_validation() => 400,
            _ => 502,
        }
    }
}
