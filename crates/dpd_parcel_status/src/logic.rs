// --- File: crates/dpd_parcel_status/src/logic.rs ---

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use dpd_auth::{Authorisation, AuthorisationError};
use dpd_common::soap::{
    child_text, children_named, find_path, operation_element, path_text, push_text, Element,
    SoapClient,
};
use dpd_common::{DpdError, DpdService, SoapError};

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum ParcelStatusError {
    #[error("Parcel label number must not be empty")]
    EmptyParcelLabelNumber,

    /// DPD no longer accepts the session token
    #[error("DPD rejected the session token: {0}")]
    SessionRejected(String),

    #[error(transparent)]
    Authorisation(#[from] AuthorisationError),

    #[error(transparent)]
    Soap(#[from] SoapError),
}

impl From<ParcelStatusError> for DpdError {
    fn from(err: ParcelStatusError) -> Self {
        match err {
            ParcelStatusError::EmptyParcelLabelNumber => {
                DpdError::ValidationError(err.to_string())
            }
            ParcelStatusError::SessionRejected(message) => DpdError::AuthError(message),
            ParcelStatusError::Authorisation(e) => e.into(),
            ParcelStatusError::Soap(e) => e.into(),
        }
    }
}

/// Faults DPD raises for transient or token problems; they read as "no status".
const IGNORED_FAULTS: [&str; 2] = ["Service Unavailable", "Fault occured: Fault occured"];
const SESSION_FAULT_PREFIX: &str = "Fault occured: The element 'authentication' in namespace";

fn is_session_fault(fault_string: &str) -> bool {
    fault_string.starts_with(SESSION_FAULT_PREFIX)
}

fn is_ignored_fault(fault_string: &str) -> bool {
    IGNORED_FAULTS.contains(&fault_string) || is_session_fault(fault_string)
}

// --- Data Structures ---

/// The current status of a parcel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusRecord {
    #[cfg_attr(feature = "openapi", schema(example = "DELIVERED"))]
    pub status_code: String,
    #[cfg_attr(feature = "openapi", schema(example = "Delivered"))]
    pub status_label: String,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "The parcel has been delivered successfully.")
    )]
    pub status_description: String,
}

/// Looks up parcel statuses with an authenticated session.
pub struct ParcelStatus {
    authorisation: Authorisation,
    client: SoapClient,
}

impl ParcelStatus {
    pub fn new(authorisation: &Authorisation) -> Result<Self, ParcelStatusError> {
        let client = SoapClient::for_service(authorisation.config(), DpdService::ParcelLifeCycle)?;
        Ok(Self::with_client(authorisation, client))
    }

    pub fn with_client(authorisation: &Authorisation, client: SoapClient) -> Self {
        Self {
            authorisation: authorisation.clone(),
            client,
        }
    }

    /// Current status of the parcel with label number `awb`.
    ///
    /// `Ok(None)` when DPD knows nothing yet, when no status is flagged as
    /// current, or when DPD answers with one of its transient faults.
    pub async fn get_status(&self, awb: &str) -> Result<Option<StatusRecord>, ParcelStatusError> {
        match self.fetch_status(awb).await {
            Err(ParcelStatusError::SessionRejected(_)) => Ok(None),
            other => other,
        }
    }

    /// Like [`ParcelStatus::get_status`], but a rejected session token is
    /// reported as [`ParcelStatusError::SessionRejected`] so the caller can
    /// log in again.
    pub async fn fetch_status(
        &self,
        awb: &str,
    ) -> Result<Option<StatusRecord>, ParcelStatusError> {
        let awb = awb.trim();
        if awb.is_empty() {
            return Err(ParcelStatusError::EmptyParcelLabelNumber);
        }

        let mut body = operation_element(
            "ns",
            "getTrackingData",
            DpdService::ParcelLifeCycle.namespace(),
        );
        push_text(&mut body, "parcelLabelNumber", awb);

        let response = match self
            .client
            .call(
                "getTrackingData",
                Some(self.authorisation.auth_header()),
                body,
            )
            .await
        {
            Ok(response) => response,
            Err(SoapError::Fault(fault)) if is_session_fault(&fault.fault_string) => {
                warn!("DPD: session token rejected for {}", awb);
                return Err(ParcelStatusError::SessionRejected(fault.fault_string));
            }
            Err(SoapError::Fault(fault)) if is_ignored_fault(&fault.fault_string) => {
                warn!("DPD: parcel status for {} unavailable: {}", awb, fault.fault_string);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let record = current_status(&response);
        debug!("DPD: parcel {} status {:?}", awb, record.as_ref().map(|r| &r.status_code));
        Ok(record)
    }
}

/// Picks the `statusInfo` flagged `isCurrentStatus` from a `getTrackingDataResponse`.
fn current_status(response: &Element) -> Option<StatusRecord> {
    let tracking_result = response.get_child("trackingresult")?;

    children_named(tracking_result, "statusInfo")
        .find(|info| {
            child_text(info, "isCurrentStatus")
                .map(|v| is_xsd_true(&v))
                .unwrap_or(false)
        })
        .map(|info| StatusRecord {
            status_code: child_text(info, "status").unwrap_or_default(),
            status_label: path_text(info, &["label", "content"]).unwrap_or_default(),
            status_description: description_text(info),
        })
}

/// `xsd:boolean` truth: `true` or `1`.
fn is_xsd_true(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// `description/content/content`; multi-line descriptions are joined.
fn description_text(info: &Element) -> String {
    find_path(info, &["description"])
        .map(|description| {
            children_named(description, "content")
                .filter_map(|line| child_text(line, "content"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpd_common::soap::parse_envelope;

    fn response(xml_body: &str) -> Element {
        let xml = format!(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>
<ns2:getTrackingDataResponse xmlns:ns2="http://dpd.com/common/service/types/ParcelLifeCycleService/2.0">{}</ns2:getTrackingDataResponse>
</soap:Body></soap:Envelope>"#,
            xml_body
        );
        parse_envelope(xml.as_bytes())
            .unwrap()
            .body_content()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_current_status_is_selected() {
        let response = response(
            r#"<trackingresult>
  <statusInfo>
    <status>ACCEPTED</status>
    <label><content>Accepted</content></label>
    <isCurrentStatus>false</isCurrentStatus>
  </statusInfo>
  <statusInfo>
    <status>ON_THE_ROAD</status>
    <label><content>On the road</content></label>
    <description>
      <content><content>The parcel is on its way</content></content>
      <content><content>to the recipient.</content></content>
    </description>
    <isCurrentStatus>true</isCurrentStatus>
  </statusInfo>
  <statusInfo>
    <status>DELIVERED</status>
    <label><content>Delivered</content></label>
  </statusInfo>
</trackingresult>"#,
        );

        let record = current_status(&response).unwrap();
        assert_eq!(record.status_code, "ON_THE_ROAD");
        assert_eq!(record.status_label, "On the road");
        assert_eq!(
            record.status_description,
            "The parcel is on its way to the recipient."
        );
    }

    #[test]
    fn test_current_status_flag_as_number() {
        let response = response(
            r#"<trackingresult>
  <statusInfo><status>ACCEPTED</status><isCurrentStatus>0</isCurrentStatus></statusInfo>
  <statusInfo>
    <status>DELIVERED</status>
    <label><content>Delivered</content></label>
    <isCurrentStatus>1</isCurrentStatus>
  </statusInfo>
</trackingresult>"#,
        );

        let record = current_status(&response).unwrap();
        assert_eq!(record.status_code, "DELIVERED");
        assert_eq!(record.status_description, "");
        assert!(is_xsd_true("TRUE"));
        assert!(!is_xsd_true("0"));
        assert!(!is_xsd_true("yes"));
    }

    #[test]
    fn test_missing_tracking_result_is_none() {
        assert!(current_status(&response("")).is_none());
        assert!(current_status(&response("<trackingresult/>")).is_none());
    }

    #[test]
    fn test_no_current_status_is_none() {
        let response = response(
            "<trackingresult><statusInfo><status>ACCEPTED</status></statusInfo></trackingresult>",
        );
        assert!(current_status(&response).is_none());
    }

    #[test]
    fn test_ignored_faults() {
        assert!(is_ignored_fault("Service Unavailable"));
        assert!(is_ignored_fault("Fault occured: Fault occured"));
        assert!(is_ignored_fault(
            "Fault occured: The element 'authentication' in namespace 'http://dpd.com' is missing"
        ));
        assert!(!is_ignored_fault("Parcel label number unknown"));
        assert!(is_session_fault(
            "Fault occured: The element 'authentication' in namespace 'http://dpd.com' is missing"
        ));
        assert!(!is_session_fault("Service Unavailable"));
    }
}
