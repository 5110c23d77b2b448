use crate::helpers::{SHORTEN_PATH, STORAGE_PATH, created, service_for, shortened, tabs};

use share_core::ShareErrorKind;

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that an already-cancelled token stops the create before any request.
///
/// **WHY THIS MATTERS**: A UI that closes while the user clicks "share" must not leave a blob.
///
/// **BUG THIS CATCHES**: Would catch the cancellation check racing the request (unbiased
/// select) and sending it anyway.
#[tokio::test]
async fn given_cancelled_token_when_creating_link_then_cancelled_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created("never"))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();

    let error = service_for(&server)
        .create_share_link_cancellable(&tabs(&["https://a.com"]), &token)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Cancelled);
}

/// **VALUE**: Verifies that cancelling mid-request yields `Cancelled` and skips the shortener.
///
/// **WHY THIS MATTERS**: Cancellation discards the in-flight request; the blob may already
/// exist and is left as is.
///
/// **BUG THIS CATCHES**: Would catch the token being checked only between steps, which
/// would leave the caller waiting on a hung storage call.
#[tokio::test]
async fn given_slow_storage_when_cancelled_mid_request_then_cancelled_and_no_shorten() {
    // GIVEN: Storage that takes a long time
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("slow").set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/never"))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        canceller.cancel();
    });

    // WHEN: Creating with the token
    let started = std::time::Instant::now();
    let error = service_for(&server)
        .create_share_link_cancellable(&tabs(&["https://a.com"]), &token)
        .await
        .unwrap_err();

    // THEN: Cancelled well before the storage delay elapsed
    assert_eq!(error.kind(), ShareErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn given_cancelled_token_when_resolving_then_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();

    let error = service_for(&server)
        .resolve_share_link_cancellable(&format!("{}{STORAGE_PATH}/abc", server.uri()), &token)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Cancelled);
}

/// **VALUE**: Verifies that cancelling while the shortener is pending yields `Cancelled`
/// after exactly one stored blob.
///
/// **WHY THIS MATTERS**: The blob is already durable at that point; cancellation must stop
/// waiting without storing again or touching the stored blob.
///
/// **BUG THIS CATCHES**: Would catch the shorten step ignoring the token, or a retry that
/// re-runs the storage call.
#[tokio::test]
async fn given_slow_shortener_when_cancelled_after_store_then_cancelled_with_one_blob() {
    // GIVEN: Fast storage, slow shortener
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("kept"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/late").set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        canceller.cancel();
    });

    // WHEN: Creating with the token
    let started = std::time::Instant::now();
    let error = service_for(&server)
        .create_share_link_cancellable(&tabs(&["https://a.com"]), &token)
        .await
        .unwrap_err();

    // THEN: Cancelled promptly, one storage POST, no cleanup request
    assert_eq!(error.kind(), ShareErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(5));
    let storage_posts = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == STORAGE_PATH)
        .count();
    assert_eq!(storage_posts, 1);
}
