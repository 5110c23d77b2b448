use crate::helpers::{
    SHORTEN_PATH, STORAGE_PATH, config_for, created, no_config, output, shortened,
};

use tabshare::commands::message;

use share_core::error::ConfigError;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn response(out: Vec<u8>) -> Value {
    let text = output(out);
    assert!(text.ends_with('\n'), "response should be one line");
    serde_json::from_str(text.trim_end()).unwrap()
}

/// **VALUE**: Verifies the stdin/stdout message bridge answers a create request.
///
/// **WHY THIS MATTERS**: Native-messaging hosts speak exactly this JSON; a renamed
/// field breaks the extension silently.
///
/// **BUG THIS CATCHES**: Would catch `shortUrl` losing its camelCase name.
#[tokio::test]
async fn given_create_request_on_stdin_when_handled_then_writes_short_url() {
    // GIVEN: Working backends
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("m1"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/m1"))
        .mount(&server)
        .await;

    let request = json!({
        "type": "CREATE_SHARE_LINK",
        "tabs": [{"url": "https://a.com", "title": "A", "favIconUrl": "https://a.com/f.ico"}]
    })
    .to_string();

    // WHEN: Handling the message
    let mut out = Vec::new();
    message(|| Ok(config_for(&server)), request.as_bytes(), false, &mut out)
        .await
        .unwrap();

    // THEN: One JSON line with the short URL
    assert_eq!(response(out), json!({"shortUrl": "https://bit.ly/m1"}));
}

#[tokio::test]
async fn given_shortener_failure_when_handled_then_writes_shortening_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .respond_with(created("m2"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let request = r#"{"type":"CREATE_SHARE_LINK","tabs":[{"url":"https://a.com"}]}"#;

    let mut out = Vec::new();
    message(|| Ok(config_for(&server)), request.as_bytes(), false, &mut out)
        .await
        .unwrap();

    let value = response(out);
    assert_eq!(value["kind"], "shortening");
    assert!(value["error"].as_str().unwrap().contains("HTTP 403"));
}

#[tokio::test]
async fn given_unparsable_request_when_handled_then_validation_error_without_config() {
    let mut out = Vec::new();

    message(no_config, "not json".as_bytes(), false, &mut out)
        .await
        .unwrap();

    assert_eq!(response(out)["kind"], "validation");
}

#[tokio::test]
async fn given_unknown_message_type_when_handled_then_validation_error() {
    let mut out = Vec::new();

    message(no_config, r#"{"type":"CLOSE_TABS"}"#.as_bytes(), false, &mut out)
        .await
        .unwrap();

    assert_eq!(response(out)["kind"], "validation");
}

/// **VALUE**: Verifies missing credentials become a `config` error response.
///
/// **WHY THIS MATTERS**: The host always expects a reply; exiting without one leaves
/// the caller waiting.
///
/// **BUG THIS CATCHES**: Would catch config errors escaping as `Err` instead of a response.
#[tokio::test]
async fn given_config_failure_when_handled_then_writes_config_error() {
    let request = r#"{"type":"RESOLVE_SHARE_LINK","url":"https://api.jsonbin.io/v3/b/abc"}"#;

    let mut out = Vec::new();
    message(
        || Err(ConfigError::validation("storage API key is not set")),
        request.as_bytes(),
        false,
        &mut out,
    )
    .await
    .unwrap();

    let value = response(out);
    assert_eq!(value["kind"], "config");
    assert!(
        value["error"]
            .as_str()
            .unwrap()
            .starts_with("Share service is not configured")
    );
}
