//! Tests for `HttpFetcher` against a local mock server: request shape,
//! error truncation, and a full Edit command over the wire.

mod test_utils;

use keyrelay::config::{Config, NetworkConfig};
use keyrelay::error::ShortcutError;
use keyrelay::fragment::{FragmentKind, FragmentRequest};
use keyrelay::host::{HostAction, MemoryHost};
use keyrelay::net::{FragmentFetcher, HttpFetcher, SCRIPT_ACCEPT};
use keyrelay::session::Session;
use keyrelay::shortcuts::{CommandId, Verdict};
use pretty_assertions::assert_eq;
use test_utils::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn network(server: &MockServer) -> NetworkConfig {
    NetworkConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    }
}

fn edit_request(token: Option<&str>) -> FragmentRequest {
    FragmentRequest {
        kind: FragmentKind::Edit,
        href: "/x/edit.dialog".to_string(),
        csrf_token: token.map(str::to_string),
    }
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn test_fetch_sends_ajax_headers_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/edit.dialog"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("X-CSRF-Token", "tok"))
        .and(header("Accept", SCRIPT_ACCEPT))
        .respond_with(ResponseTemplate::new(200).set_body_string("dialogBox.open()"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&network(&server)).unwrap();
    let body = fetcher.fetch(&edit_request(Some("tok"))).await.unwrap();

    assert_eq!(body, "dialogBox.open()");
}

#[tokio::test]
async fn test_fetch_without_token_omits_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/edit.dialog"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&network(&server)).unwrap();
    fetcher.fetch(&edit_request(None)).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("x-csrf-token"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_body_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/edit.dialog"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(450)))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&network(&server)).unwrap();
    let err = fetcher.fetch(&edit_request(Some("tok"))).await.unwrap_err();

    assert_eq!(
        err,
        ShortcutError::Remote {
            action: "Edit",
            reason: format!("HTTP 500 Internal Server Error :: {}", "x".repeat(200)),
        }
    );
}

#[tokio::test]
async fn test_cross_origin_href_never_reaches_server() {
    let server = MockServer::start().await;
    let fetcher = HttpFetcher::new(&network(&server)).unwrap();

    let request = FragmentRequest {
        href: "https://example.com/x/edit.dialog".to_string(),
        ..edit_request(None)
    };
    let err = fetcher.fetch(&request).await.unwrap_err();

    assert!(matches!(err, ShortcutError::Remote { action: "Edit", .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Whole command over the wire
// ============================================================================

#[tokio::test]
async fn test_edit_command_runs_served_script() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/edit.dialog"))
        .and(header("X-CSRF-Token", "tok-9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("dialogBox.open()"))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = MemoryHost::new().with_platform("MacIntel");
    host.modal_constructor = true;
    host.meta.insert("csrf-token".to_string(), "tok-9".to_string());
    let (dialog, _) = add_dialog(&mut host, "Visit");
    add_actions_button(
        &mut host,
        dialog,
        &[r#"<a href="/x/edit.dialog">Edit</a>"#],
    );

    let config = Config {
        network: network(&server),
        ..Config::default()
    };
    let fetcher = HttpFetcher::new(&config.network).unwrap();
    let mut session = Session::new(host, fetcher, &config);

    let verdict = session.key(&cmd_ctrl("KeyE")).await;

    assert_eq!(verdict, Verdict::Handled(CommandId::OpenEditDialog));
    assert_eq!(
        session.host().actions,
        vec![HostAction::ExecuteScript("dialogBox.open()".to_string())]
    );
}
