//! Mock share backends and command-line parsing shortcuts.

use tabshare::cli::{Cli, Command};

use share_core::ShareConfig;
use share_core::error::ConfigError;

use clap::Parser;
use serde_json::json;
use wiremock::{MockServer, ResponseTemplate};

pub const STORAGE_KEY: &str = "$2a$10$Qm9vYmFyYmF6cXV4MTIzNDU2Nzg5MGFiY2RlZg";
pub const SHORTEN_TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";
pub const STORAGE_PATH: &str = "/v3/b";
pub const SHORTEN_PATH: &str = "/v4/shorten";

pub fn storage_url(server: &MockServer) -> String {
    format!("{}{STORAGE_PATH}", server.uri())
}

pub fn config_for(server: &MockServer) -> ShareConfig {
    ShareConfig::new(
        &storage_url(server),
        STORAGE_KEY,
        &format!("{}{SHORTEN_PATH}", server.uri()),
        SHORTEN_TOKEN,
    )
    .expect("mock config should be valid")
}

/// Config loader for commands that must not touch the share service.
pub fn no_config() -> Result<ShareConfig, ConfigError> {
    panic!("config must not be loaded for this command")
}

pub fn command(args: &[&str]) -> Command {
    let argv = std::iter::once("tabshare").chain(args.iter().copied());
    Cli::try_parse_from(argv)
        .expect("arguments should parse")
        .command
}

pub fn created(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "record": {"urls": []},
        "metadata": {"id": id, "private": true}
    }))
}

pub fn shortened(link: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({ "link": link }))
}

pub fn stored(urls: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "record": {"urls": urls},
        "metadata": {"private": true}
    }))
}

pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("output should be UTF-8")
}
