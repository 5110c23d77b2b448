use crate::helpers::RecordingTabOpener;

use share_core::error::OpenTabError;
use share_core::open_tabs;

/// **VALUE**: Verifies that the opener is invoked once per entry, valid or not.
///
/// **WHY THIS MATTERS**: Opening is a pass-through; the host decides what it accepts.
///
/// **BUG THIS CATCHES**: Would catch URL validation sneaking into `open_tabs`.
#[tokio::test]
async fn given_mixed_urls_when_opening_then_opener_called_for_each() {
    // GIVEN: An opener that accepts everything
    let opener = RecordingTabOpener::default();

    // WHEN: Opening a valid and an invalid URL
    let report = open_tabs(&opener, &["https://x.com", "not-a-url"]).await;

    // THEN: Both were passed to the opener
    let mut calls = opener.calls();
    calls.sort();
    assert_eq!(calls, vec!["https://x.com", "not-a-url"]);
    assert_eq!(report.len(), 2);
    assert!(report.all_opened());
}

/// **VALUE**: Verifies that one rejected URL does not stop the others and is reported.
///
/// **WHY THIS MATTERS**: A shared list with one dead entry must still open the rest.
///
/// **BUG THIS CATCHES**: Would catch `?`-style short-circuiting over the batch.
#[tokio::test]
async fn given_one_rejected_url_when_opening_then_others_still_open() {
    // GIVEN: An opener that rejects the middle URL
    let opener = RecordingTabOpener::rejecting(&["https://b.com"]);
    let urls = vec![
        String::from("https://a.com"),
        String::from("https://b.com"),
        String::from("https://c.com"),
    ];

    // WHEN: Opening all
    let report = open_tabs(&opener, &urls).await;

    // THEN: Two opened, one failed, outcomes in input order
    assert_eq!(report.opened(), 2);
    assert!(!report.all_opened());
    let order: Vec<&str> = report.outcomes().iter().map(|o| o.url.as_str()).collect();
    assert_eq!(order, vec!["https://a.com", "https://b.com", "https://c.com"]);

    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    match &failed[0].result {
        Err(OpenTabError::Rejected { url, .. }) => assert_eq!(url, "https://b.com"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn given_no_urls_when_opening_then_empty_report() {
    let opener = RecordingTabOpener::default();
    let urls: Vec<String> = Vec::new();

    let report = open_tabs(&opener, &urls).await;

    assert!(report.is_empty());
    assert!(opener.calls().is_empty());
}
