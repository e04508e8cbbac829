use dpd_common::soap::{operation_element, path_text, push_text, SoapClient, SoapError};
use dpd_common::{create_client, DpdService};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRACKING_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:getTrackingDataResponse xmlns:ns2="http://dpd.com/common/service/types/ParcelLifeCycleService/2.0">
      <trackingresult>
        <statusInfo><status>DELIVERED</status></statusInfo>
      </trackingresult>
    </ns2:getTrackingDataResponse>
  </soap:Body>
</soap:Envelope>"#;

const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Service Unavailable</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

fn client_for(server: &MockServer) -> SoapClient {
    SoapClient::new(
        create_client(5).unwrap(),
        format!("{}/services/ParcelLifeCycleService/V2_0/", server.uri()),
        DpdService::ParcelLifeCycle,
        true,
    )
}

fn tracking_body() -> dpd_common::soap::Element {
    let mut body = operation_element(
        "ns",
        "getTrackingData",
        DpdService::ParcelLifeCycle.namespace(),
    );
    push_text(&mut body, "parcelLabelNumber", "09981122330100");
    body
}

#[tokio::test]
async fn test_call_returns_response_element() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/ParcelLifeCycleService/V2_0/"))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(body_string_contains("<parcelLabelNumber>09981122330100</parcelLabelNumber>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRACKING_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .call("getTrackingData", None, tracking_body())
        .await
        .unwrap();

    assert_eq!(response.name, "getTrackingDataResponse");
    assert_eq!(
        path_text(&response, &["trackingresult", "statusInfo", "status"]).as_deref(),
        Some("DELIVERED")
    );
}

#[tokio::test]
async fn test_call_surfaces_fault_from_http_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(FAULT_RESPONSE))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call("getTrackingData", None, tracking_body())
        .await
        .unwrap_err();

    let fault = err.as_fault().expect("expected a SOAP fault");
    assert_eq!(fault.fault_string, "Service Unavailable");
}

#[tokio::test]
async fn test_call_reports_non_soap_error_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call("getTrackingData", None, tracking_body())
        .await
        .unwrap_err();

    match err {
        SoapError::Http { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("maintenance"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
