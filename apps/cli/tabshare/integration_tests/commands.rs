use crate::helpers::{
    SHORTEN_PATH, SHORTEN_TOKEN, STORAGE_KEY, STORAGE_PATH, command, config_for, created,
    no_config, output, shortened, storage_url,
};

use tabshare::cli::Cli;
use tabshare::commands::{execute, run};
use tabshare::error::CliError;

use std::io::empty;

use clap::Parser;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// **VALUE**: Verifies `create --long` prints the short link then the long-form URL.
///
/// **WHY THIS MATTERS**: Scripts read the first line as the link to hand out.
///
/// **BUG THIS CATCHES**: Would catch the line order swapping or the long URL missing its id.
#[tokio::test]
async fn given_urls_when_running_create_long_then_prints_short_and_long_url() {
    // GIVEN: Storage and shortener mocks
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .and(body_json(json!({"urls": ["https://a.com", "https://b.com"]})))
        .respond_with(created("cli1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/cli1"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Running create --long
    let mut out = Vec::new();
    execute(
        command(&["create", "https://a.com", "https://b.com", "--long"]),
        || Ok(config_for(&server)),
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    // THEN: Two lines, short first
    assert_eq!(
        output(out),
        format!("https://bit.ly/cli1\n{}/cli1\n", storage_url(&server))
    );
}

#[tokio::test]
async fn given_invalid_url_when_running_create_then_fails_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let result = execute(
        command(&["create", "ftp://a.com"]),
        || Ok(config_for(&server)),
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await;

    match result {
        Err(CliError::Share(e)) => assert_eq!(e.kind().as_str(), "validation"),
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert!(out.is_empty());
}

/// **VALUE**: Verifies that `run` reads the TOML config file and uses it.
///
/// **WHY THIS MATTERS**: `--config` is how most users point the CLI at their credentials.
///
/// **BUG THIS CATCHES**: Would catch the config path flag being ignored.
#[tokio::test]
async fn given_config_file_when_running_create_then_uses_configured_backends() {
    // GIVEN: A config file pointing at the mock server
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORAGE_PATH))
        .and(header("X-Master-Key", STORAGE_KEY))
        .respond_with(created("file1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHORTEN_PATH))
        .respond_with(shortened("https://bit.ly/file1"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "storage_base_url = \"{}\"\nstorage_api_key = \"{STORAGE_KEY}\"\nshorten_base_url = \"{}{SHORTEN_PATH}\"\nshorten_api_token = \"{SHORTEN_TOKEN}\"\n",
            storage_url(&server),
            server.uri()
        ),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "tabshare",
        "--config",
        config_path.to_str().unwrap(),
        "--timeout-ms",
        "5000",
        "create",
        "https://a.com",
    ])
    .unwrap();

    // WHEN: Running through the top-level entry point
    let mut out = Vec::new();
    run(cli, empty(), &mut out, &CancellationToken::new())
        .await
        .unwrap();

    // THEN: Short link printed
    assert_eq!(output(out), "https://bit.ly/file1\n");
}

#[tokio::test]
async fn given_missing_config_file_when_running_create_then_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from([
        "tabshare",
        "--config",
        dir.path().join("absent.toml").to_str().unwrap(),
        "create",
        "https://a.com",
    ])
    .unwrap();

    let mut out = Vec::new();
    let result = run(cli, empty(), &mut out, &CancellationToken::new()).await;

    match result {
        Err(CliError::Share(e)) => assert_eq!(e.kind().as_str(), "config"),
        other => panic!("Expected config error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_urls_when_running_encode_then_prints_share_string() {
    let mut out = Vec::new();

    execute(
        command(&["encode", "https://a.com", "https://b.com"]),
        no_config,
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(output(out), "https://a.com;https://b.com\n");
}

#[tokio::test]
async fn given_share_string_when_running_decode_then_prints_one_url_per_line() {
    let mut out = Vec::new();

    execute(
        command(&["decode", " https://a.com ; chrome://newtab/ ;https://b.com"]),
        no_config,
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(output(out), "https://a.com\nhttps://b.com\n");
}

#[tokio::test]
async fn given_text_without_urls_when_running_decode_then_input_error() {
    let mut out = Vec::new();

    let result = execute(
        command(&["decode", "hello;world"]),
        no_config,
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(CliError::Input { .. })));
}

#[tokio::test]
async fn given_urls_when_running_open_dry_run_then_prints_urls_and_summary() {
    let mut out = Vec::new();

    execute(
        command(&["open", "https://a.com", "https://b.com", "--dry-run"]),
        no_config,
        empty(),
        &mut out,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        output(out),
        "https://a.com\nhttps://b.com\nOpened 2 of 2 tabs\n"
    );
}
