use crate::helpers::{STORAGE_KEY, STORAGE_PATH, created, service_for, shortened, tabs};

use share_core::{ShareError, ShareErrorKind, StorageOperation};

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that resolving reads `{base}/{id}` and returns `record.urls` in order.
///
/// **WHY THIS MATTERS**: This is the receiving half of sharing; order is the order the
/// sender's tabs were in.
///
/// **BUG THIS CATCHES**: Would catch sorting, deduplication, or a wrong read path.
#[tokio::test]
async fn given_stored_blob_when_resolving_then_returns_urls_in_order() {
    // GIVEN: A stored blob
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/abc123")))
        .and(header("X-Master-Key", STORAGE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "record": {"urls": ["https://a.com", "https://b.com"]},
            "metadata": {"id": "abc123", "private": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Resolving the long-form URL
    let urls = service_for(&server)
        .resolve_share_link(&format!("{}{STORAGE_PATH}/abc123", server.uri()))
        .await
        .unwrap();

    // THEN: Exactly the stored list
    assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
}

/// **VALUE**: Verifies that stored entries come back unfiltered.
///
/// **WHY THIS MATTERS**: Resolve is a read; filtering is the caller's choice.
///
/// **BUG THIS CATCHES**: Would catch resolve silently dropping entries.
#[tokio::test]
async fn given_blob_with_odd_entries_when_resolving_then_returns_them_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/odd")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "record": {"urls": ["not-a-url", "", "https://a.com"]}
        })))
        .mount(&server)
        .await;

    let urls = service_for(&server)
        .resolve_share_link(&format!("{}{STORAGE_PATH}/odd", server.uri()))
        .await
        .unwrap();

    assert_eq!(urls, vec!["not-a-url", "", "https://a.com"]);
}

#[tokio::test]
async fn given_missing_blob_when_resolving_then_storage_read_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Bin not found"})))
        .mount(&server)
        .await;

    let error = service_for(&server)
        .resolve_share_link(&format!("{}{STORAGE_PATH}/gone", server.uri()))
        .await
        .unwrap_err();

    match error {
        ShareError::Storage {
            operation,
            status_code,
            ..
        } => {
            assert_eq!(operation, StorageOperation::Read);
            assert_eq!(status_code.map(|code| code.0), Some(404));
        }
        other => panic!("Expected storage read error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_body_without_record_urls_when_resolving_then_storage_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"record": {"tabs": []}})))
        .mount(&server)
        .await;

    let error = service_for(&server)
        .resolve_share_link(&format!("{}{STORAGE_PATH}/weird", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Storage);
}

#[tokio::test]
async fn given_unparsable_url_when_resolving_then_validation_error_without_requests() {
    let server = MockServer::start().await;

    let error = service_for(&server)
        .resolve_share_link("definitely not a url")
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: Verifies that the long URL from create resolves back to the shared tabs.
///
/// **WHY THIS MATTERS**: Create and resolve must agree on the long-form URL template.
///
/// **BUG THIS CATCHES**: Would catch create and resolve building the blob URL differently.
#[tokio::test]
async fn given_created_link_when_resolving_its_long_url_then_reads_same_blob() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("roundtrip"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(shortened("https://bit.ly/rt"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/roundtrip")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "record": {"urls": ["https://a.com", "https://b.com"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let shared = service
        .create_share_link_with_long_url(&tabs(&["https://a.com", "https://b.com"]))
        .await
        .unwrap();

    let urls = service.resolve_share_link(shared.long_url.as_str()).await.unwrap();

    assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
}

/// **VALUE**: Verifies that an id needing escapes is read from the same path it was created at.
///
/// **WHY THIS MATTERS**: Create and resolve must agree on the wire path, or a valid link
/// points at a blob that does not exist.
///
/// **BUG THIS CATCHES**: Would catch the escaped id being encoded a second time on resolve.
#[tokio::test]
async fn given_escaped_blob_id_when_resolving_then_requests_path_encoded_once() {
    // GIVEN: Storage that assigns an id containing a space
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("ab c"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(shortened("https://bit.ly/esc"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/ab%20c")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "record": {"urls": ["https://a.com"]}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let shared = service
        .create_share_link_with_long_url(&tabs(&["https://a.com"]))
        .await
        .unwrap();

    // WHEN: Resolving the created long URL and a hand-written escaped URL
    let from_created = service.resolve_share_link(shared.long_url.as_str()).await.unwrap();
    let from_escaped = service
        .resolve_share_link(&format!("{}{STORAGE_PATH}/ab%20c", server.uri()))
        .await
        .unwrap();

    // THEN: Both read `/ab%20c`, never `/ab%2520c`
    assert_eq!(shared.long_url.path(), format!("{STORAGE_PATH}/ab%20c"));
    assert_eq!(from_created, vec!["https://a.com"]);
    assert_eq!(from_escaped, vec!["https://a.com"]);
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.method.as_str() == "GET")
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(paths, vec![format!("{STORAGE_PATH}/ab%20c"); 2]);
}
