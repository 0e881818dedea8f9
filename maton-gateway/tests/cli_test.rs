//! End-to-end runs of the binaries against a mocked gateway.

use std::process::Output;

use serde_json::json;
use tokio::process::Command;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DASHBOARD_BIN: &str = env!("CARGO_BIN_EXE_create-btc-dashboard");
const SEND_ALERT_BIN: &str = env!("CARGO_BIN_EXE_send-alert");

/// Run `bin` in an empty directory, pointed at `gateway`.
async fn run(bin: &str, args: &[&str], gateway: &MockServer, api_key: Option<&str>) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .current_dir(dir.path())
        .env("MATON_GATEWAY_URL", gateway.uri())
        .env_remove("MATON_API_KEY")
        .env_remove("RUST_LOG");
    if let Some(key) = api_key {
        cmd.env("MATON_API_KEY", key);
    }
    cmd.output().await.unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// A gateway that must not be called.
async fn untouched_gateway() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_dashboard_without_api_key_fails_before_network() {
    let server = untouched_gateway().await;
    let output = run(DASHBOARD_BIN, &[], &server, None).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("MATON_API_KEY"));
}

#[tokio::test]
async fn test_send_alert_without_api_key_fails_before_network() {
    let server = untouched_gateway().await;
    let output = run(SEND_ALERT_BIN, &["C0123456789", "hello"], &server, None).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("MATON_API_KEY"));
}

#[tokio::test]
async fn test_send_alert_requires_two_arguments() {
    let server = untouched_gateway().await;
    let cases: [&[&str]; 2] = [&[], &["C0123456789"]];

    for args in cases {
        let output = run(SEND_ALERT_BIN, args, &server, Some("test-key")).await;
        assert!(!output.status.success(), "args {:?} should fail", args);
        assert!(
            stderr(&output).contains("Usage"),
            "no usage for {:?}: {}",
            args,
            stderr(&output)
        );
    }
}

#[tokio::test]
async fn test_send_alert_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slack/api/chat.postMessage"))
        .and(body_json(json!({
            "channel": "C0123456789",
            "text": "BTC Alert: Whale detected!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "ts": "1234.5"})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(
        SEND_ALERT_BIN,
        &["C0123456789", "BTC Alert: Whale detected!"],
        &server,
        Some("test-key"),
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Channel: C0123456789"));
    assert!(out.contains("Timestamp: 1234.5"));
}

#[tokio::test]
async fn test_send_alert_reports_slack_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slack/api/chat.postMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "channel_not_found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = run(SEND_ALERT_BIN, &["C0123456789", "hi"], &server, Some("test-key")).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert_eq!(err.matches("channel_not_found").count(), 1, "stderr: {}", err);
}

#[tokio::test]
async fn test_send_alert_reports_http_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"invalid_token"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(SEND_ALERT_BIN, &["C0123456789", "hi"], &server, Some("bad-key")).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("403"));
    assert!(err.contains(r#"{"error":"invalid_token"}"#));
    assert_eq!(err.matches("invalid_token").count(), 1, "stderr: {}", err);
}

#[tokio::test]
async fn test_dashboard_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/google-sheets/v4/spreadsheets"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"spreadsheetId": "X", "spreadsheetUrl": "Y"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/google-sheets/v4/spreadsheets/X/values/A1:append"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/google-sheets/v4/spreadsheets/X/values/A2:append"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(DASHBOARD_BIN, &[], &server, Some("test-key")).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Dashboard ready: Y"));
    assert!(out.contains("Spreadsheet ID: X"));
}

#[tokio::test]
async fn test_dashboard_stops_on_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/google-sheets/v4/spreadsheets"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"invalid_token"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(DASHBOARD_BIN, &[], &server, Some("bad-key")).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("HTTP Error 403"));
    assert!(err.contains(r#"{"error":"invalid_token"}"#));

    // Only the create call reached the gateway.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_unicode_environment_does_not_crash() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let server = untouched_gateway().await;
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(SEND_ALERT_BIN)
        .args(["C0123456789", "hi"])
        .current_dir(dir.path())
        .env("MATON_GATEWAY_URL", server.uri())
        .env("UNRELATED_VAR", OsString::from_vec(vec![0xff, 0xfe]))
        .env_remove("MATON_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("MATON_API_KEY environment variable not set"));
}
