// --- File: crates/dpd_auth/src/error.rs ---
use dpd_common::{config_error, DpdError, HttpStatusCode, SoapError};
use thiserror::Error;

/// Errors of the DPD LoginService.
#[derive(Error, Debug)]
pub enum AuthorisationError {
    /// A credential is empty; nothing was sent
    #[error("DPD credentials incomplete: {0} is missing")]
    MissingCredentials(&'static str),

    /// The login service answered with a fault
    #[error("DPD authentication failed: {0}")]
    Rejected(String),

    /// The login service answered without a usable token
    #[error("Invalid DPD authentication response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Soap(#[from] SoapError),
}

impl From<AuthorisationError> for DpdError {
    fn from(err: AuthorisationError) -> Self {
        match err {
            AuthorisationError::MissingCredentials(field) => {
                config_error(format!("DPD credential missing: {}", field))
            }
            AuthorisationError::Rejected(message) => {
                DpdError::AuthError(format!("DPD authentication failed: {}", message))
            }
            AuthorisationError::InvalidResponse(message) => DpdError::ParseError(message),
            AuthorisationError::Soap(e) => e.into(),
        }
    }
}

impl HttpStatusCode for AuthorisationError {
    fn status_code(&self) -> u16 {
        match self {
            AuthorisationError::MissingCredentials(_) => 500,
            AuthorisationError::Rejected(_) => 401,
            AuthorisationError::InvalidResponse(_) => 502,
            AuthorisationError::Soap(_) => 502,
        }
    }
}
