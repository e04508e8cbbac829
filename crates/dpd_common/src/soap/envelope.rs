//! SOAP 1.1 envelope construction and parsing.

use std::io::BufReader;
use xmltree::{Element, XMLNode};

use super::{SoapFault, SoapParseError};

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// A parsed SOAP envelope. Both parts keep the raw XML element.
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    pub header: Option<Element>,
    pub body: Element,
}

impl SoapEnvelope {
    /// First element inside the Body: the operation response or a Fault.
    pub fn body_content(&self) -> Option<&Element> {
        first_child_element(&self.body)
    }

    pub fn fault(&self) -> Option<SoapFault> {
        self.body_content()
            .filter(|e| e.name == "Fault")
            .map(SoapFault::from_element)
    }
}

/// Builds a request envelope around `body`, with an optional SOAP header entry.
pub fn build_envelope(header: Option<Element>, body: Element) -> Result<String, xmltree::Error> {
    let mut envelope = Element::new("soapenv:Envelope");
    envelope
        .attributes
        .insert("xmlns:soapenv".to_string(), SOAP_ENV_NS.to_string());

    if let Some(header_entry) = header {
        let mut header_elem = Element::new("soapenv:Header");
        header_elem.children.push(XMLNode::Element(header_entry));
        envelope.children.push(XMLNode::Element(header_elem));
    }

    let mut body_elem = Element::new("soapenv:Body");
    body_elem.children.push(XMLNode::Element(body));
    envelope.children.push(XMLNode::Element(body_elem));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parses a complete SOAP envelope.
pub fn parse_envelope(xml: &[u8]) -> Result<SoapEnvelope, SoapParseError> {
    let root = Element::parse(BufReader::new(xml))?;

    if root.name != "Envelope" {
        return Err(SoapParseError::MissingEnvelope);
    }

    let header = root.get_child("Header").cloned();
    let body = root
        .get_child("Body")
        .cloned()
        .ok_or(SoapParseError::MissingBody)?;

    Ok(SoapEnvelope { header, body })
}

/// Creates a namespace-qualified operation element, e.g. `ns:getAuth`.
pub fn operation_element(prefix: &str, operation: &str, namespace: &str) -> Element {
    let mut elem = Element::new(&format!("{}:{}", prefix, operation));
    elem.attributes
        .insert(format!("xmlns:{}", prefix), namespace.to_string());
    elem
}

/// `<name>value</name>`
pub fn text_element(name: &str, value: impl Into<String>) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(value.into()));
    elem
}

/// Appends `<name>value</name>` to `parent`.
pub fn push_text(parent: &mut Element, name: &str, value: impl Into<String>) {
    parent
        .children
        .push(XMLNode::Element(text_element(name, value)));
}

/// Appends `<name>value</name>` to `parent` when `value` is set.
pub fn push_opt_text(parent: &mut Element, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        push_text(parent, name, value);
    }
}

pub fn push_child(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

pub fn first_child_element(elem: &Element) -> Option<&Element> {
    elem.children.iter().find_map(|n| n.as_element())
}

/// All direct children named `name`, in document order.
pub fn children_named<'a>(elem: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    elem.children
        .iter()
        .filter_map(|n| n.as_element())
        .filter(move |e| e.name == name)
}

/// Walks nested children by local name.
pub fn find_path<'a>(elem: &'a Element, path: &[&str]) -> Option<&'a Element> {
    path.iter()
        .try_fold(elem, |current, name| current.get_child(*name))
}

/// Trimmed text of the element reached by `path`; `None` when missing or empty.
pub fn path_text(elem: &Element, path: &[&str]) -> Option<String> {
    find_path(elem, path)
        .and_then(|e| e.get_text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Trimmed text of the direct child `name`.
pub fn child_text(elem: &Element, name: &str) -> Option<String> {
    path_text(elem, &[name])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_envelope_with_header() {
        let mut header = operation_element("auth", "authentication", "urn:auth");
        push_text(&mut header, "authToken", "abc");
        let mut body = operation_element("ns", "getTrackingData", "urn:track");
        push_text(&mut body, "parcelLabelNumber", "0123");

        let xml = build_envelope(Some(header), body).unwrap();

        assert!(xml.contains("xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\""));
        assert!(xml.contains("<soapenv:Header>"));
        assert!(xml.contains("<authToken>abc</authToken>"));
        assert!(xml.contains("xmlns:ns=\"urn:track\""));
        assert!(xml.contains("<parcelLabelNumber>0123</parcelLabelNumber>"));
    }

    #[test]
    fn test_build_envelope_without_header() {
        let body = operation_element("ns", "getAuth", "urn:login");
        let xml = build_envelope(None, body).unwrap();
        assert!(!xml.contains("Header"));
        assert!(xml.contains("ns:getAuth"));
    }

    #[test]
    fn test_text_is_escaped() {
        let body = text_element("name1", "Smith & Sons <BV>");
        let xml = build_envelope(None, body).unwrap();
        assert!(xml.contains("Smith &amp; Sons &lt;BV>") || xml.contains("Smith &amp; Sons &lt;BV&gt;"));
    }

    #[test]
    fn test_parse_envelope_and_paths() {
        let xml = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:getAuthResponse xmlns:ns2="http://dpd.com/common/service/types/LoginService/2.1">
      <return>
        <delisId>KD12345</delisId>
        <depot> 0522 </depot>
      </return>
    </ns2:getAuthResponse>
  </soap:Body>
</soap:Envelope>"#;

        let envelope = parse_envelope(xml.as_bytes()).unwrap();
        assert!(envelope.header.is_none());
        assert!(envelope.fault().is_none());

        let response = envelope.body_content().unwrap();
        assert_eq!(response.name, "getAuthResponse");
        assert_eq!(path_text(response, &["return", "delisId"]).as_deref(), Some("KD12345"));
        assert_eq!(path_text(response, &["return", "depot"]).as_deref(), Some("0522"));
        assert!(path_text(response, &["return", "authToken"]).is_none());
    }

    #[test]
    fn test_parse_rejects_non_envelope() {
        let err = parse_envelope(b"<html><body>502 Bad Gateway</body></html>").unwrap_err();
        assert!(matches!(err, SoapParseError::MissingEnvelope));
    }

    #[test]
    fn test_parse_rejects_missing_body() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Header/></s:Envelope>"#;
        let err = parse_envelope(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapParseError::MissingBody));
    }

    #[test]
    fn test_children_named_keeps_order() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body>
<r><item>1</item><other/><item>2</item></r></s:Body></s:Envelope>"#;
        let envelope = parse_envelope(xml.as_bytes()).unwrap();
        let r = envelope.body_content().unwrap();
        let values: Vec<String> = children_named(r, "item")
            .filter_map(|e| e.get_text().map(|t| t.to_string()))
            .collect();
        assert_eq!(values, vec!["1", "2"]);
    }
}
