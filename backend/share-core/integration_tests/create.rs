use crate::helpers::{
    EchoShortener, SHORTEN_PATH, SHORTEN_TOKEN, STORAGE_KEY, STORAGE_PATH, SequentialBlobIds,
    config_for, created, service_for, shortened, tabs,
};

use share_core::{ShareError, ShareErrorKind, ShareLinkService, StorageOperation};

use std::collections::HashSet;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the full happy path: one storage create, then one shorten, in order,
/// with the right headers and bodies.
///
/// **WHY THIS MATTERS**: This is the product. The shorten body must carry the long-form
/// storage URL built from `metadata.id`, and each backend needs its own credential.
///
/// **BUG THIS CATCHES**: Would catch swapped credentials, a wrong long URL template,
/// titles leaking into the bundle, or the two calls happening out of order.
#[tokio::test]
async fn given_valid_tabs_when_creating_link_then_stores_then_shortens() {
    // GIVEN: Both backends answer successfully
    let server = MockServer::start().await;
    let long_url = format!("{}{STORAGE_PATH}/65f1c0ffee", server.uri());

    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .and(header("X-Master-Key", STORAGE_KEY))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"urls": ["https://a.com/", "https://b.com/x"]})))
        .respond_with(created("65f1c0ffee"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .and(header("authorization", format!("Bearer {SHORTEN_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"long_url": long_url})))
        .respond_with(shortened("https://bit.ly/3abcDEF"))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut input = tabs(&["https://a.com/", "https://b.com/x"]);
    input[0].title = Some(String::from("Not sent"));

    // WHEN: Creating a share link
    let shared = service.create_share_link_with_long_url(&input).await.unwrap();

    // THEN: The shortener's link is returned verbatim
    assert_eq!(shared.short_link.as_str(), "https://bit.ly/3abcDEF");
    assert_eq!(shared.long_url.as_str(), long_url);
    assert_eq!(shared.reference.as_str(), "65f1c0ffee");

    // AND: Storage was called before the shortener
    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec![STORAGE_PATH, SHORTEN_PATH]);
}

/// **VALUE**: Verifies that an empty tab list fails with `Validation` and sends nothing.
///
/// **WHY THIS MATTERS**: Each create leaves durable third-party state. Empty shares would
/// litter the storage account.
///
/// **BUG THIS CATCHES**: Would catch validation moved after the storage call.
#[tokio::test]
async fn given_no_tabs_when_creating_link_then_validation_error_without_requests() {
    // GIVEN: A server that would accept anything
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created("never"))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Creating with no tabs
    let result = service_for(&server).create_share_link(&[]).await;

    // THEN: Validation error, zero requests
    assert_eq!(result.unwrap_err().kind(), ShareErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_non_web_tab_when_creating_link_then_validation_error_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created("never"))
        .expect(0)
        .mount(&server)
        .await;

    let result = service_for(&server)
        .create_share_link(&tabs(&["https://a.com", "chrome://settings"]))
        .await;

    assert_eq!(result.unwrap_err().kind(), ShareErrorKind::Validation);
}

/// **VALUE**: Verifies that a storage failure surfaces as `Storage` and the shortener is
/// never called.
///
/// **WHY THIS MATTERS**: Without a blob there is nothing to shorten; calling the shortener
/// anyway would create a dead link.
///
/// **BUG THIS CATCHES**: Would catch a missing status check that parses the error body as
/// if it were a success.
#[tokio::test]
async fn given_storage_500_when_creating_link_then_storage_error_and_no_shorten() {
    // GIVEN: Storage fails
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"message":"Internal error"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/never"))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Creating
    let error = service_for(&server)
        .create_share_link(&tabs(&["https://a.com"]))
        .await
        .unwrap_err();

    // THEN: Storage error with diagnostics
    match error {
        ShareError::Storage {
            operation,
            status_code,
            body,
            ..
        } => {
            assert_eq!(operation, StorageOperation::Create);
            assert_eq!(status_code.map(|code| code.0), Some(500));
            assert_eq!(body.as_deref(), Some(r#"{"message":"Internal error"}"#));
        }
        other => panic!("Expected storage error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_storage_body_without_id_when_creating_link_then_storage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"metadata": {}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/never"))
        .expect(0)
        .mount(&server)
        .await;

    let error = service_for(&server)
        .create_share_link(&tabs(&["https://a.com"]))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Storage);
    assert_eq!(error.status_code(), None);
}

/// **VALUE**: Verifies that a shortener failure yields `Shortening` and leaves the blob alone.
///
/// **WHY THIS MATTERS**: There is no compensation step. The caller must learn which blob
/// was orphaned and that nothing tried to delete it.
///
/// **BUG THIS CATCHES**: Would catch the error being reported as `Storage`, or a cleanup
/// request sneaking in.
#[tokio::test]
async fn given_shortener_401_when_creating_link_then_shortening_error_and_blob_kept() {
    // GIVEN: Storage works, shortener rejects the token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("orphan42"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("FORBIDDEN"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Creating
    let error = service_for(&server)
        .create_share_link(&tabs(&["https://a.com"]))
        .await
        .unwrap_err();

    // THEN: Shortening error naming the orphaned blob
    assert_eq!(error.kind(), ShareErrorKind::Shortening);
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.orphaned_reference().map(|r| r.as_str()), Some("orphan42"));
    assert!(!error.is_retryable());

    // AND: Only the two POSTs were made; nothing deleted the blob
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.method.as_str() == "POST"));
}

#[tokio::test]
async fn given_shortener_body_without_link_when_creating_link_then_shortening_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("abc"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = service_for(&server)
        .create_share_link(&tabs(&["https://a.com"]))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Shortening);
    assert_eq!(error.orphaned_reference().map(|r| r.as_str()), Some("abc"));
}

/// **VALUE**: Verifies that identical creates are independent: two blobs, two links.
///
/// **WHY THIS MATTERS**: There is no deduplication. Callers that retry must know each
/// attempt creates new remote state.
///
/// **BUG THIS CATCHES**: Would catch an accidental cache keyed on the tab list.
#[tokio::test]
async fn given_same_tabs_twice_when_creating_links_then_two_independent_links() {
    // GIVEN: Storage issues fresh ids, shortener echoes them
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(SequentialBlobIds::default())
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(EchoShortener)
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let input = tabs(&["https://a.com", "https://b.com"]);

    // WHEN: Creating twice
    let first = service.create_share_link(&input).await.unwrap();
    let second = service.create_share_link(&input).await.unwrap();

    // THEN: Distinct links
    assert_ne!(first, second);
    assert_eq!(first.as_str(), "https://bit.ly/blob0");
    assert_eq!(second.as_str(), "https://bit.ly/blob1");
}

/// **VALUE**: Verifies that one service handles concurrent creates without interference.
///
/// **WHY THIS MATTERS**: The service is shared across handlers; it holds no per-call state.
///
/// **BUG THIS CATCHES**: Would catch shared mutable state creeping into the service.
#[tokio::test]
async fn given_concurrent_creates_when_awaited_then_each_gets_its_own_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(SequentialBlobIds::default())
        .expect(5)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(EchoShortener)
        .expect(5)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let handles: Vec<_> = (0..5)
        .map(|i| {
            let service: ShareLinkService = service.clone();
            tokio::spawn(async move {
                service
                    .create_share_link(&tabs(&[format!("https://site{i}.com").as_str()]))
                    .await
            })
        })
        .collect();

    let mut links = HashSet::new();
    for handle in handles {
        links.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(links.len(), 5);
}

/// **VALUE**: Verifies that a configured timeout surfaces as a timed-out `Shortening` error.
///
/// **WHY THIS MATTERS**: Without a timeout a hung shortener blocks the caller forever.
///
/// **BUG THIS CATCHES**: Would catch `timeout` being ignored when building the client, or
/// the timeout flag being lost when mapping the error.
#[tokio::test]
async fn given_slow_shortener_and_timeout_when_creating_link_then_timed_out_shortening_error() {
    // GIVEN: A shortener slower than the configured timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("slow1"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/late").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(300));
    let service = ShareLinkService::new(config).unwrap();

    // WHEN: Creating
    let error = service
        .create_share_link(&tabs(&["https://a.com"]))
        .await
        .unwrap_err();

    // THEN: Shortening kind, flagged as timeout and retryable
    assert_eq!(error.kind(), ShareErrorKind::Shortening);
    assert!(error.is_timeout());
    assert!(error.is_retryable());
}

#[tokio::test]
async fn given_custom_key_header_when_creating_link_then_sends_key_under_that_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .and(header("X-Access-Key", STORAGE_KEY))
        .respond_with(created("custom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/custom"))
        .mount(&server)
        .await;

    let config = config_for(&server).with_storage_api_key_header("X-Access-Key");
    let service = ShareLinkService::new(config).unwrap();

    let link = service.create_share_link(&tabs(&["https://a.com"])).await.unwrap();

    assert_eq!(link.as_str(), "https://bit.ly/custom");
}
