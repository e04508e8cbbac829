//! HTTP transport for SOAP calls.

use reqwest::{header::CONTENT_TYPE, Client};
use tracing::debug;
use xmltree::Element;

use dpd_config::DpdConfig;

use super::envelope::{build_envelope, parse_envelope};
use super::{SoapError, SoapParseError};
use crate::endpoints::{DpdService, Endpoints};
use crate::http::client::client_for_timeout;

/// Posts SOAP envelopes to one DPD service endpoint.
#[derive(Debug, Clone)]
pub struct SoapClient {
    http: Client,
    endpoint: String,
    service: DpdService,
    trace: bool,
}

impl SoapClient {
    pub fn new(http: Client, endpoint: impl Into<String>, service: DpdService, trace: bool) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            service,
            trace,
        }
    }

    /// Client for `service` with the endpoint, timeout and tracing taken from `config`.
    pub fn for_service(config: &DpdConfig, service: DpdService) -> Result<Self, SoapError> {
        let http = client_for_timeout(config.timeout_secs)?;
        let endpoint = Endpoints::from_config(config).service_url(service);
        Ok(Self::new(http, endpoint, service, config.tracing))
    }

    /// Sends `body` (the operation element) and returns the first element of
    /// the response Body.
    ///
    /// The response body is read whatever the HTTP status is, since faults
    /// come back as HTTP 500.
    pub async fn call(
        &self,
        operation: &str,
        header: Option<Element>,
        body: Element,
    ) -> Result<Element, SoapError> {
        let service_name = self.service.name();
        let request_xml =
            build_envelope(header, body).map_err(|e| SoapError::Encode(e.to_string()))?;

        if self.trace {
            debug!("{}: SOAP-Request {}: {}", service_name, operation, request_xml);
        }

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", "\"\"")
            .body(request_xml)
            .send()
            .await?;

        let status = response.status();
        let raw_body = response.text().await?;

        if self.trace {
            debug!("{}: SOAP-Response {}: {}", service_name, operation, raw_body);
        }

        let envelope = match parse_envelope(raw_body.as_bytes()) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(SoapError::Http {
                    status: status.as_u16(),
                    body: raw_body,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(fault) = envelope.fault() {
            debug!("{}: {} answered with fault {}", service_name, operation, fault);
            return Err(SoapError::Fault(fault));
        }

        if !status.is_success() {
            return Err(SoapError::Http {
                status: status.as_u16(),
                body: raw_body,
            });
        }

        envelope
            .body_content()
            .cloned()
            .ok_or(SoapError::Parse(SoapParseError::EmptyBody))
    }
}
