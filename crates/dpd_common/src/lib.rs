// --- File: crates/dpd_common/src/lib.rs ---

pub mod endpoints; // Environments, service URLs and namespaces
pub mod error; // Error handling
pub mod http; // HTTP client and axum error responses
pub mod logging; // Logging utilities
pub mod soap; // SOAP envelopes, faults and calls

pub use endpoints::{DpdService, Endpoints, Environment, AUTHENTICATION_NS};

pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error, DpdError,
    HttpStatusCode,
};

pub use http::{
    client::{create_client, HTTP_CLIENT},
    handle_json_result, map_json_error, IntoHttpResponse,
};

pub use soap::{SoapClient, SoapError, SoapFault};
