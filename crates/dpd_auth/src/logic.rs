// --- File: crates/dpd_auth/src/logic.rs ---

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use dpd_common::soap::{operation_element, push_text, Element, SoapClient};
use dpd_common::{DpdService, SoapError, AUTHENTICATION_NS};
use dpd_config::DpdConfig;

use crate::error::AuthorisationError;
use crate::models::AuthToken;

const AUTH_FAULT_MESSAGE: [&str; 2] = ["authenticationFault", "errorMessage"];

/// An authenticated DPD session: the configuration it was obtained with and
/// the token returned by `getAuth`.
///
/// Shipment and parcel status calls borrow it to build their
/// `authentication` SOAP header.
#[derive(Debug, Clone)]
pub struct Authorisation {
    config: DpdConfig,
    token: AuthToken,
}

impl Authorisation {
    /// Exchanges the configured credentials for a session token.
    pub async fn authenticate(config: &DpdConfig) -> Result<Self, AuthorisationError> {
        let client = SoapClient::for_service(config, DpdService::Login)?;
        Self::authenticate_with(config, &client).await
    }

    /// Same as [`Authorisation::authenticate`] over an already built client.
    pub async fn authenticate_with(
        config: &DpdConfig,
        client: &SoapClient,
    ) -> Result<Self, AuthorisationError> {
        if config.delis_id.trim().is_empty() {
            return Err(AuthorisationError::MissingCredentials("delis_id"));
        }
        if config.password.is_empty() {
            return Err(AuthorisationError::MissingCredentials("password"));
        }

        let mut body = operation_element("ns", "getAuth", DpdService::Login.namespace());
        push_text(&mut body, "delisId", config.delis_id.as_str());
        push_text(&mut body, "password", config.password.as_str());
        push_text(&mut body, "messageLanguage", config.message_language.as_str());

        let response = match client.call("getAuth", None, body).await {
            Ok(response) => response,
            Err(SoapError::Fault(fault)) => {
                let message = fault.message_at(&AUTH_FAULT_MESSAGE);
                if message != "Service Unavailable" {
                    debug!("DPD: {}", message);
                } else {
                    warn!("DPD: LoginService unavailable");
                }
                return Err(AuthorisationError::Rejected(message));
            }
            Err(e) => return Err(e.into()),
        };

        let token = AuthToken::from_response(&response, &config.message_language)?;
        debug!("DPD: Authorisation successful, depot {}", token.depot);

        Ok(Self {
            config: config.clone(),
            token,
        })
    }

    /// Builds a session from a token obtained elsewhere.
    pub fn from_token(config: DpdConfig, token: AuthToken) -> Self {
        Self { config, token }
    }

    pub fn config(&self) -> &DpdConfig {
        &self.config
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn staging(&self) -> bool {
        self.config.staging
    }

    pub fn customer_number(&self) -> Option<&str> {
        self.config.customer_number.as_deref()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token.is_expired(now)
    }

    /// The `authentication` SOAP header entry required by every call after login.
    pub fn auth_header(&self) -> Element {
        let mut header = operation_element("auth", "authentication", AUTHENTICATION_NS);
        push_text(&mut header, "delisId", self.token.delis_id.as_str());
        push_text(&mut header, "authToken", self.token.auth_token.as_str());
        push_text(
            &mut header,
            "messageLanguage",
            self.token.message_language.as_str(),
        );
        header
    }
}
