#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use damwatch_api::models::ValveControlRequest;
use damwatch_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Liveness probe ──────────────────────────────────────────────────

#[tokio::test]
async fn test_health_ok() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "service": "Smart Dam System",
            "version": "2.0"
        })))
        .mount(&server)
        .await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.service.as_deref(), Some("Smart Dam System"));
}

// ── Readings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_readings_decode() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/readings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "r2",
                "temp": 28.5,
                "humidity": 61.0,
                "distance": 42.0,
                "percent": 82.0,
                "vibration": false,
                "valve_state": "CLOSED",
                "human_detected": false,
                "timestamp": "15 Jun 2024, 10:35 AM IST"
            },
            {
                "_id": "r1",
                "temp": 28.1,
                "timestamp": "15 Jun 2024, 10:30 AM IST"
            }
        ])))
        .mount(&server)
        .await;

    let readings = client.readings().await.unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].id, "r2");
    assert_eq!(readings[0].percent, Some(82.0));
    // Absent numeric fields decode to None, not zero.
    assert_eq!(readings[1].humidity, None);
    assert_eq!(readings[1].percent, None);
}

// ── Valve ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_valve_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/valve/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "OPEN",
            "mode": "MANUAL",
            "reason": "MANUAL_OPEN",
            "timestamp": "15 Jun 2024, 10:35 AM IST"
        })))
        .mount(&server)
        .await;

    let status = client.valve_status().await.unwrap();
    assert_eq!(status.state, "OPEN");
    assert_eq!(status.mode, "MANUAL");
    assert_eq!(status.reason, "MANUAL_OPEN");
}

#[tokio::test]
async fn test_valve_control_success() {
    let (server, client) = setup().await;

    let request = ValveControlRequest {
        mode: "MANUAL".into(),
        command: "CLOSE".into(),
        user_role: "admin".into(),
        user_id: "operator".into(),
    };

    Mock::given(method("POST"))
        .and(path("/api/valve/control"))
        .and(body_json(json!({
            "mode": "MANUAL",
            "command": "CLOSE",
            "userRole": "admin",
            "userId": "operator"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let ack = client.valve_control(&request).await.unwrap();
    assert!(ack.success);
}

#[tokio::test]
async fn test_valve_control_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/valve/control"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "success": false, "error": "Admin only" })),
        )
        .mount(&server)
        .await;

    let request = ValveControlRequest {
        mode: "MANUAL".into(),
        command: "OPEN".into(),
        user_role: "user".into(),
        user_id: "guest".into(),
    };

    let result = client.valve_control(&request).await;
    assert!(
        matches!(result, Err(Error::Http { status: 403 })),
        "expected HTTP 403 error, got: {result:?}"
    );
}

// ── Alert logs ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_alert_logs_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts/vibration/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "a1",
                "type": "vibration",
                "level": "HIGH",
                "nodeId": "node-3",
                "timestamp": "15 Jun 2024, 09:00 AM IST"
            }
        ])))
        .mount(&server)
        .await;

    let logs = client.alert_logs("vibration").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "vibration");
    assert_eq!(logs[0].node_id.as_deref(), Some("node-3"));
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_mapping() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.weather().await;
    match result {
        Err(Error::Http { status }) => assert_eq!(status, 500),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_decode_error_mapping() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rainfall"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.rainfall().await;
    match result {
        Err(Error::Decode { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Decode error, got: {other:?}"),
    }
}
