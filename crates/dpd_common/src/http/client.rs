// --- File: crates/dpd_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A shared HTTP client with the default timeout, reused by every SOAP call
/// that does not ask for a specific timeout.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT_SECS).unwrap_or_else(|_| Client::new())
});

/// Creates a new HTTP client with the given timeout.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Returns the shared client for the default timeout, a dedicated one otherwise.
pub fn client_for_timeout(timeout_secs: u64) -> Result<Client, ReqwestError> {
    if timeout_secs == DEFAULT_TIMEOUT_SECS {
        Ok(HTTP_CLIENT.clone())
    } else {
        create_client(timeout_secs)
    }
}
