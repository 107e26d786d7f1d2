use std::time::Duration;

use console_engine::{
    ApiSettings, FailureKind, LogRecord, ReqwestApi, ResultRecord, VerificationApi,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(&ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("api client")
}

fn record(email: &str, status: &str, details: &str) -> ResultRecord {
    ResultRecord {
        email: email.to_string(),
        status: status.to_string(),
        details: details.to_string(),
    }
}

#[tokio::test]
async fn verify_posts_raw_text_and_decodes_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "emails": "a@x.com, b@x.com\nbad" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "email": "a@x.com", "status": "Valid", "details": "ok" },
            { "email": "b@x.com", "status": "Risky", "details": "catch-all" },
            { "email": "bad", "status": "Invalid", "details": "syntax" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = api_for(&server)
        .verify("a@x.com, b@x.com\nbad")
        .await
        .expect("verify ok");

    assert_eq!(
        results,
        vec![
            record("a@x.com", "Valid", "ok"),
            record("b@x.com", "Risky", "catch-all"),
            record("bad", "Invalid", "syntax"),
        ]
    );
}

#[tokio::test]
async fn verify_maps_forbidden_to_quota_with_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "Trial limit reached." })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).verify("a@x.com").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::QuotaExceeded(Some("Trial limit reached.".to_string()))
    );
}

#[tokio::test]
async fn verify_forbidden_without_json_body_is_still_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access Denied"))
        .mount(&server)
        .await;

    let err = api_for(&server).verify("a@x.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::QuotaExceeded(None));
}

#[tokio::test]
async fn verify_other_status_is_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "No emails provided" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).verify("a@x.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}

#[tokio::test]
async fn verify_rejects_malformed_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "email": "a@x.com", "status": 7, "details": "" }])),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).verify("a@x.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn verify_reports_network_failure() {
    // Reserve a port, then close it so the connection is refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let api = ReqwestApi::new(&ApiSettings {
        base_url: format!("http://127.0.0.1:{port}"),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.verify("a@x.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn verify_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let api = ReqwestApi::new(&ApiSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.verify("a@x.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn export_posts_results_and_returns_payload() {
    let server = MockServer::start().await;
    let csv = "Email,Status,Comment/Details\r\na@x.com,Valid,ok\r\n";
    Mock::given(method("POST"))
        .and(path("/api/export"))
        .and(body_json(json!({
            "results": [{ "email": "a@x.com", "status": "Valid", "details": "ok" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
        .mount(&server)
        .await;

    let payload = api_for(&server)
        .export(&[record("a@x.com", "Valid", "ok")])
        .await
        .expect("export ok");
    assert_eq!(payload.as_ref(), csv.as_bytes());
}

#[tokio::test]
async fn export_failure_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/export"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .export(&[record("a@x.com", "Valid", "ok")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn stats_decode_with_and_without_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "credits_used": 120,
            "credits_total": 4000,
            "logs": [{
                "email": "a@x.com",
                "status": "Valid",
                "details": "ok",
                "time": "2026-10-16 09:12:00"
            }]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "credits_used": 0,
            "credits_total": 10
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let first = api.stats().await.expect("stats ok");
    assert_eq!(first.credits_used, 120);
    assert_eq!(first.credits_total, 4000);
    assert_eq!(
        first.logs,
        vec![LogRecord {
            email: "a@x.com".to_string(),
            status: "Valid".to_string(),
            details: "ok".to_string(),
            time: "2026-10-16 09:12:00".to_string(),
        }]
    );

    let second = api.stats().await.expect("stats ok");
    assert_eq!(second.credits_total, 10);
    assert!(second.logs.is_empty());
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/console/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "credits_used": 1,
            "credits_total": 2
        })))
        .mount(&server)
        .await;

    let api = ReqwestApi::new(&ApiSettings {
        base_url: format!("{}/console", server.uri()),
        ..ApiSettings::default()
    })
    .unwrap();
    assert_eq!(api.stats().await.unwrap().credits_used, 1);
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestApi::new(&ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
