use crate::helpers::{STORAGE_PATH, command, config_for, output, storage_url, stored};

use tabshare::commands::{RetryPolicy, execute, resolve_with_retries};

use share_core::ShareLinkService;

use std::io::empty;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAST_RETRY: Duration = Duration::from_millis(10);

#[tokio::test]
async fn given_stored_blob_when_running_resolve_then_prints_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/abc")))
        .respond_with(stored(&["https://a.com", "https://b.com"]))
        .mount(&server)
        .await;

    let share_url = format!("{}/abc", storage_url(&server));
    let mut out = Vec::new();
    execute(
        command(&["resolve", share_url.as_str()]),
        || Ok(config_for(&server)),
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(output(out), "https://a.com\nhttps://b.com\n");
}

#[tokio::test]
async fn given_stored_blob_when_running_resolve_open_dry_run_then_prints_urls_and_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/abc")))
        .respond_with(stored(&["https://a.com"]))
        .mount(&server)
        .await;

    let share_url = format!("{}/abc", storage_url(&server));
    let mut out = Vec::new();
    execute(
        command(&["resolve", share_url.as_str(), "--open", "--dry-run"]),
        || Ok(config_for(&server)),
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(output(out), "https://a.com\nOpened 1 of 1 tabs\n");
}

/// **VALUE**: Verifies that a transient 503 is retried and the second attempt wins.
///
/// **WHY THIS MATTERS**: Reads are idempotent; a brief storage outage should not fail
/// a resolve when the user asked for retries.
///
/// **BUG THIS CATCHES**: Would catch the retry loop ignoring `is_retryable()` or
/// stopping after the first failure.
#[tokio::test]
async fn given_transient_failure_when_resolving_with_retries_then_succeeds() {
    // GIVEN: First read returns 503, later reads succeed
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/abc")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/abc")))
        .respond_with(stored(&["https://a.com"]))
        .mount(&server)
        .await;

    let service = ShareLinkService::new(config_for(&server)).unwrap();
    let share_url = format!("{}/abc", storage_url(&server));

    // WHEN: Resolving with two retries
    let urls = resolve_with_retries(
        &service,
        &share_url,
        RetryPolicy::new(2).with_initial_interval(FAST_RETRY),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    // THEN: URLs returned after exactly two requests
    assert_eq!(urls, vec!["https://a.com"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

/// **VALUE**: Verifies that a 404 is not retried.
///
/// **WHY THIS MATTERS**: A missing blob will stay missing; retrying only delays the error.
///
/// **BUG THIS CATCHES**: Would catch retrying every error instead of transient ones.
#[tokio::test]
async fn given_missing_blob_when_resolving_with_retries_then_fails_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/gone")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let service = ShareLinkService::new(config_for(&server)).unwrap();
    let share_url = format!("{}/gone", storage_url(&server));

    let error = resolve_with_retries(
        &service,
        &share_url,
        RetryPolicy::new(3).with_initial_interval(FAST_RETRY),
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn given_persistent_failure_when_retries_exhausted_then_returns_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{STORAGE_PATH}/abc")))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let service = ShareLinkService::new(config_for(&server)).unwrap();
    let share_url = format!("{}/abc", storage_url(&server));

    let error = resolve_with_retries(
        &service,
        &share_url,
        RetryPolicy::new(2).with_initial_interval(FAST_RETRY),
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(error.is_retryable());
    assert_eq!(error.status_code(), Some(502));
}
