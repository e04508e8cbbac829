//! # SOAP support for the DPD web services
//!
//! DPD only speaks SOAP 1.1 document/literal. This module builds request
//! envelopes, posts them and turns the answer into either the operation's
//! response element or a [`SoapFault`].
//!
//! ```ignore
//! use dpd_common::soap::{operation_element, push_text, SoapClient};
//!
//! let mut body = operation_element("ns", "getTrackingData", service.namespace());
//! push_text(&mut body, "parcelLabelNumber", "09981122330100");
//! let response = client.call("getTrackingData", Some(auth_header), body).await?;
//! ```

mod client;
mod envelope;
mod fault;

use thiserror::Error;

pub use client::SoapClient;
pub use envelope::{
    build_envelope, child_text, children_named, find_path, first_child_element,
    operation_element, parse_envelope, path_text, push_child, push_opt_text, push_text,
    text_element, SoapEnvelope, SOAP_ENV_NS,
};
pub use fault::SoapFault;
pub use xmltree::Element;

/// Error while reading a SOAP envelope
#[derive(Debug, Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("Empty SOAP Body")]
    EmptyBody,
}

/// Error of a single SOAP round trip
#[derive(Debug, Error)]
pub enum SoapError {
    #[error("SOAP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The endpoint did not answer with a SOAP envelope at all
    #[error("SOAP endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("SOAP fault: {0}")]
    Fault(SoapFault),

    #[error("Malformed SOAP response: {0}")]
    Parse(#[from] SoapParseError),

    #[error("Failed to encode SOAP request: {0}")]
    Encode(String),
}

impl SoapError {
    pub fn as_fault(&self) -> Option<&SoapFault> {
        match self {
            SoapError::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}
