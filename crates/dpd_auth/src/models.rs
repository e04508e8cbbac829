use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Europe::Amsterdam;
use serde::{Deserialize, Serialize};

use dpd_common::soap::{child_text, Element};

use crate::error::AuthorisationError;

/// Tokens are refreshed this long before DPD says they expire.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

/// The `return` element of a `getAuth` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken {
    pub delis_id: String,
    pub customer_uid: Option<String>,
    pub auth_token: String,
    /// Sending depot, copied into every shipment.
    pub depot: String,
    /// Raw `authTokenExpires` value (`xsd:dateTime`).
    pub auth_token_expires: Option<String>,
    /// Always the configured language, not the one DPD echoes back.
    pub message_language: String,
}

impl AuthToken {
    pub(crate) fn from_response(
        response: &Element,
        message_language: &str,
    ) -> Result<Self, AuthorisationError> {
        let ret = response
            .get_child("return")
            .ok_or_else(|| AuthorisationError::InvalidResponse("missing return element".into()))?;

        let required = |name: &'static str| {
            child_text(ret, name)
                .ok_or_else(|| AuthorisationError::InvalidResponse(format!("missing {}", name)))
        };

        Ok(Self {
            delis_id: required("delisId")?,
            customer_uid: child_text(ret, "customerUid"),
            auth_token: required("authToken")?,
            depot: required("depot")?,
            auth_token_expires: child_text(ret, "authTokenExpires"),
            message_language: message_language.to_string(),
        })
    }

    /// Parsed expiry. Values without an offset are Amsterdam local time.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.auth_token_expires.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Amsterdam
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// A token whose expiry cannot be read is treated as still valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires) => now + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires: Option<&str>) -> AuthToken {
        AuthToken {
            delis_id: "KD12345".to_string(),
            customer_uid: Some("KD12345".to_string()),
            auth_token: "token".to_string(),
            depot: "0522".to_string(),
            auth_token_expires: expires.map(str::to_string),
            message_language: "nl_NL".to_string(),
        }
    }

    #[test]
    fn test_expires_at_local_time_is_amsterdam() {
        // January: Amsterdam is UTC+1
        let t = token(Some("2025-01-15T10:00:00.0"));
        let expected = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        assert_eq!(t.expires_at(), Some(expected));
    }

    #[test]
    fn test_expires_at_with_offset() {
        let t = token(Some("2025-07-01T12:30:00+02:00"));
        let expected = Utc.with_ymd_and_hms(2025, 7, 1, 10, 30, 0).unwrap();
        assert_eq!(t.expires_at(), Some(expected));
    }

    #[test]
    fn test_is_expired_honours_margin() {
        let t = token(Some("2025-07-01T12:00:00Z"));
        let well_before = Utc.with_ymd_and_hms(2025, 7, 1, 11, 0, 0).unwrap();
        let inside_margin = Utc.with_ymd_and_hms(2025, 7, 1, 11, 58, 0).unwrap();
        assert!(!t.is_expired(well_before));
        assert!(t.is_expired(inside_margin));
    }

    #[test]
    fn test_unknown_expiry_never_expires() {
        assert!(!token(None).is_expired(Utc::now()));
        assert!(!token(Some("tomorrow")).is_expired(Utc::now()));
    }
}
