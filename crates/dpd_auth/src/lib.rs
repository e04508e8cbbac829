//! DPD LoginService integration
//!
//! Exchanges a delisId/password pair for the short-lived token every other DPD
//! service expects in its `authentication` SOAP header.
//!
//! ```rust,no_run
//! use dpd_auth::Authorisation;
//! use dpd_config::DpdConfig;
//!
//! async fn login(config: DpdConfig) -> Result<(), dpd_auth::AuthorisationError> {
//!     let authorisation = Authorisation::authenticate(&config).await?;
//!     println!("sending depot: {}", authorisation.token().depot);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logic;
pub mod models;
pub mod session;

pub use error::AuthorisationError;
pub use logic::Authorisation;
pub use models::AuthToken;
pub use session::SessionProvider;
