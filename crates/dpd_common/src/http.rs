// --- File: crates/dpd_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{DpdError, HttpStatusCode};

pub mod client;

/// Extension trait for DpdError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for DpdError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for DpdError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a `Result<T, DpdError>` into a JSON handler result.
pub fn handle_json_result<T>(result: Result<T, DpdError>) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
{
    result.map(Json).map_err(|err| err.into_response())
}

/// Converts a domain-specific error into a JSON handler result through `DpdError`.
pub fn map_json_error<T, E>(result: Result<T, E>) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
    E: Into<DpdError>,
{
    result.map(Json).map_err(|err| err.into().into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::validation_error;

    #[test]
    fn test_error_response_status() {
        let response = validation_error("Create at least 1 parcel").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_handle_json_result_ok() {
        let result = handle_json_result(Ok::<_, DpdError>(vec![1, 2, 3]));
        assert!(result.is_ok());
    }
}
