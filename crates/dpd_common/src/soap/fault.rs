//! SOAP faults returned by the DPD services.

use std::fmt;
use xmltree::Element;

use super::envelope::{child_text, path_text};

/// A SOAP 1.1 Fault.
///
/// DPD puts the useful message in `detail`, e.g.
/// `detail/authenticationFault/errorMessage` for the login service and
/// `detail/faults/message` for the shipment service.
#[derive(Debug, Clone)]
pub struct SoapFault {
    pub fault_code: String,
    pub fault_string: String,
    pub detail: Option<Element>,
}

impl SoapFault {
    pub fn from_element(fault: &Element) -> Self {
        Self {
            fault_code: child_text(fault, "faultcode").unwrap_or_default(),
            fault_string: child_text(fault, "faultstring").unwrap_or_default(),
            detail: fault
                .get_child("detail")
                .filter(|d| d.children.iter().any(|n| n.as_element().is_some()))
                .cloned(),
        }
    }

    /// Text below `detail` at the given path, e.g. `["faults", "message"]`.
    pub fn detail_text(&self, path: &[&str]) -> Option<String> {
        self.detail.as_ref().and_then(|d| path_text(d, path))
    }

    /// The detail message at `path`, falling back to the fault string.
    pub fn message_at(&self, path: &[&str]) -> String {
        self.detail_text(path)
            .unwrap_or_else(|| self.fault_string.clone())
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fault_string, self.fault_code)
    }
}

#[cfg(test)]
mod tests {
    use crate::soap::parse_envelope;

    const AUTH_FAULT: &str = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Fault occured</faultstring>
      <detail>
        <ns1:authenticationFault xmlns:ns1="http://dpd.com/common/service/types/Authentication/2.0">
          <errorCode>LOGIN_8</errorCode>
          <errorMessage>The combination of user and password is invalid.</errorMessage>
        </ns1:authenticationFault>
      </detail>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

    #[test]
    fn test_parse_fault_with_detail() {
        let envelope = parse_envelope(AUTH_FAULT.as_bytes()).unwrap();
        let fault = envelope.fault().unwrap();

        assert_eq!(fault.fault_code, "soap:Server");
        assert_eq!(fault.fault_string, "Fault occured");
        assert_eq!(
            fault.detail_text(&["authenticationFault", "errorMessage"]).as_deref(),
            Some("The combination of user and password is invalid.")
        );
        assert_eq!(
            fault.detail_text(&["authenticationFault", "errorCode"]).as_deref(),
            Some("LOGIN_8")
        );
    }

    #[test]
    fn test_fault_without_detail_falls_back_to_fault_string() {
        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
<soap:Body><soap:Fault><faultcode>soap:Client</faultcode><faultstring>Service Unavailable</faultstring></soap:Fault></soap:Body>
</soap:Envelope>"#;
        let fault = parse_envelope(xml.as_bytes()).unwrap().fault().unwrap();

        assert!(fault.detail.is_none());
        assert_eq!(fault.message_at(&["faults", "message"]), "Service Unavailable");
        assert_eq!(fault.to_string(), "Service Unavailable (soap:Client)");
    }
}
