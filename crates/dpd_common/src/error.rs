// --- File: crates/dpd_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

use crate::soap::SoapError;

/// The base error type for all DPD client errors.
///
/// Each operation crate has its own error enum and implements
/// `From<SpecificError> for DpdError` so the HTTP layer only deals with this one.
#[derive(Error, Debug)]
pub enum DpdError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The carrier rejected the credentials or the session token
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Local input validation failed before anything was sent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The carrier answered with a fault
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DpdError {
    fn status_code(&self) -> u16 {
        match self {
            DpdError::HttpError(_) => 502,
            DpdError::ParseError(_) => 502,
            DpdError::ConfigError(_) => 500,
            DpdError::AuthError(_) => 401,
            DpdError::ValidationError(_) => 400,
            DpdError::ExternalServiceError { .. } => 502,
            DpdError::NotFoundError(_) => 404,
            DpdError::TimeoutError(_) => 504,
            DpdError::InternalError(_) => 500,
        }
    }
}

impl From<SoapError> for DpdError {
    fn from(err: SoapError) -> Self {
        match err {
            SoapError::RequestError(e) if e.is_timeout() => DpdError::TimeoutError(e.to_string()),
            SoapError::RequestError(e) => DpdError::HttpError(e.to_string()),
            SoapError::Http { status, body } => {
                DpdError::HttpError(format!("status {}: {}", status, body))
            }
            SoapError::Fault(fault) => external_service_error("DPD", fault.fault_string),
            SoapError::Parse(e) => DpdError::ParseError(e.to_string()),
            SoapError::Encode(msg) => internal_error(msg),
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> DpdError {
    DpdError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> DpdError {
    DpdError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> DpdError {
    DpdError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> DpdError {
    DpdError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> DpdError {
    DpdError::InternalError(message.to_string())
}
