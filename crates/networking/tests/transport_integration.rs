//! Submission transports against a mock endpoint.

use networking::{
    build_transport, DeliveryMode, FireAndForgetTransport, HttpTransport, RsvpPayload,
    SubmissionResult, SubmissionTransport, TransportConfig,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TransportConfig {
    TransportConfig::new(format!("{}/rsvp", server.uri())).with_timeout(Duration::from_secs(5))
}

fn payload() -> RsvpPayload {
    RsvpPayload::new("Meera Iyer", "+91 98765 43210")
}

#[tokio::test]
async fn test_direct_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rsvp"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Meera Iyer", "phone": "+91 98765 43210" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    assert_eq!(transport.submit(&payload()).await, SubmissionResult::Success);
}

#[tokio::test]
async fn test_direct_server_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rsvp"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let result = transport.submit(&payload()).await;
    assert!(matches!(result, SubmissionResult::Failure(ref reason) if reason.contains("500")));
}

#[tokio::test]
async fn test_direct_does_not_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rsvp"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    assert!(!transport.submit(&payload()).await.is_success());
}

#[tokio::test]
async fn test_direct_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(200));
    let transport = HttpTransport::new(&config).unwrap();
    assert!(matches!(
        transport.submit(&payload()).await,
        SubmissionResult::Failure(_)
    ));
}

#[tokio::test]
async fn test_fire_and_forget_reports_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rsvp"))
        .and(header("content-type", "text/plain;charset=utf-8"))
        .and(body_json(json!({ "name": "Meera Iyer", "phone": "+91 98765 43210" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = FireAndForgetTransport::new(&config_for(&server)).unwrap();
    assert_eq!(transport.submit(&payload()).await, SubmissionResult::Unknown);
}

#[tokio::test]
async fn test_fire_and_forget_ignores_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let transport = FireAndForgetTransport::new(&config_for(&server)).unwrap();
    assert_eq!(transport.submit(&payload()).await, SubmissionResult::Unknown);
}

#[tokio::test]
async fn test_build_transport_follows_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let direct = build_transport(&config_for(&server)).unwrap();
    assert_eq!(direct.submit(&payload()).await, SubmissionResult::Success);

    let opaque =
        build_transport(&config_for(&server).with_mode(DeliveryMode::FireAndForget)).unwrap();
    assert_eq!(opaque.submit(&payload()).await, SubmissionResult::Unknown);
}
