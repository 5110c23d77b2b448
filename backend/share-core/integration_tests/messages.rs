use crate::helpers::{RecordingTabOpener, SHORTEN_PATH, STORAGE_PATH, created, service_for, shortened};

use share_core::messages::{ShareRequest, ShareResponse, handle_request};

use models::TabRecord;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_create_message_when_handled_then_returns_short_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("msg1"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/msg1"))
        .mount(&server)
        .await;

    let request = ShareRequest::CreateShareLink {
        tabs: vec![TabRecord::new("https://a.com").with_title("A")],
    };

    let response = handle_request(&service_for(&server), &RecordingTabOpener::default(), request).await;

    assert_eq!(
        response,
        ShareResponse::ShortUrl {
            short_url: String::from("https://bit.ly/msg1")
        }
    );
}

/// **VALUE**: Verifies that a failing create becomes an `{error, kind}` response.
///
/// **WHY THIS MATTERS**: Message handlers must always answer; a dropped error leaves the
/// popup spinning forever.
///
/// **BUG THIS CATCHES**: Would catch errors being swallowed or the kind string missing.
#[tokio::test]
async fn given_storage_failure_when_handling_create_then_returns_error_with_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request: ShareRequest = serde_json::from_value(json!({
        "type": "CREATE_SHARE_LINK",
        "tabs": [{"url": "https://a.com"}]
    }))
    .unwrap();

    let response = handle_request(&service_for(&server), &RecordingTabOpener::default(), request).await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "Could not store tabs (HTTP 500)", "kind": "storage"})
    );
}

#[tokio::test]
async fn given_empty_create_message_when_handled_then_validation_kind() {
    let server = MockServer::start().await;

    let request = ShareRequest::CreateShareLink { tabs: Vec::new() };
    let response = handle_request(&service_for(&server), &RecordingTabOpener::default(), request).await;

    match response {
        ShareResponse::Error { kind, .. } => assert_eq!(kind, "validation"),
        other => panic!("Expected error response, got {other:?}"),
    }
}

#[tokio::test]
async fn given_resolve_message_when_handled_then_returns_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/xyz")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "record": {"urls": ["https://a.com"]}
        })))
        .mount(&server)
        .await;

    let request = ShareRequest::ResolveShareLink {
        url: format!("{}{STORAGE_PATH}/xyz", server.uri()),
    };
    let response = handle_request(&service_for(&server), &RecordingTabOpener::default(), request).await;

    assert_eq!(
        response,
        ShareResponse::Urls {
            urls: vec![String::from("https://a.com")]
        }
    );
}

#[tokio::test]
async fn given_open_tabs_message_when_handled_then_reports_counts() {
    let server = MockServer::start().await;
    let opener = RecordingTabOpener::rejecting(&["https://bad.example"]);

    let request = ShareRequest::OpenTabs {
        urls: vec![String::from("https://a.com"), String::from("https://bad.example")],
    };
    let response = handle_request(&service_for(&server), &opener, request).await;

    assert_eq!(
        response,
        ShareResponse::Opened {
            success: false,
            opened: 1,
            failed: 1
        }
    );
    assert_eq!(opener.calls().len(), 2);
}
