//! Session token holder shared by long-running callers.
//!
//! DPD tokens are short-lived. [`SessionProvider`] keeps the current
//! [`Authorisation`] and logs in again once it is about to expire.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use dpd_config::DpdConfig;

use crate::error::AuthorisationError;
use crate::logic::Authorisation;

pub struct SessionProvider {
    config: DpdConfig,
    current: RwLock<Option<Arc<Authorisation>>>,
}

impl SessionProvider {
    /// No call is made until the first [`SessionProvider::authorisation`].
    pub fn new(config: DpdConfig) -> Self {
        Self {
            config,
            current: RwLock::new(None),
        }
    }

    /// Starts from an existing session.
    pub fn with_authorisation(authorisation: Authorisation) -> Self {
        Self {
            config: authorisation.config().clone(),
            current: RwLock::new(Some(Arc::new(authorisation))),
        }
    }

    pub fn config(&self) -> &DpdConfig {
        &self.config
    }

    /// Current session, logging in first when there is none or it expired.
    pub async fn authorisation(&self) -> Result<Arc<Authorisation>, AuthorisationError> {
        {
            let current = self.current.read().await;
            if let Some(authorisation) = current.as_ref() {
                if !authorisation.is_expired(Utc::now()) {
                    return Ok(authorisation.clone());
                }
            }
        }

        let mut current = self.current.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(authorisation) = current.as_ref() {
            if !authorisation.is_expired(Utc::now()) {
                return Ok(authorisation.clone());
            }
        }

        info!("DPD: requesting a new session token for {}", self.config.delis_id);
        let fresh = Arc::new(Authorisation::authenticate(&self.config).await?);
        *current = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drops the cached session, e.g. after DPD rejected the token.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthToken;

    #[tokio::test]
    async fn test_valid_session_is_reused_without_network() {
        let config = DpdConfig {
            delis_id: "KD12345".to_string(),
            password: "pw".to_string(),
            base_url: Some("http://127.0.0.1:1".to_string()),
            ..DpdConfig::default()
        };
        let token = AuthToken {
            delis_id: "KD12345".to_string(),
            customer_uid: None,
            auth_token: "still-valid".to_string(),
            depot: "0522".to_string(),
            auth_token_expires: None,
            message_language: "en_EN".to_string(),
        };
        let provider =
            SessionProvider::with_authorisation(Authorisation::from_token(config, token));

        let session = provider.authorisation().await.unwrap();
        assert_eq!(session.token().auth_token, "still-valid");
    }
}
