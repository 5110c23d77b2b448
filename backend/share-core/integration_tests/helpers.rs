//! Shared fixtures: a mock backend pair on one `MockServer`, and a recording opener.

use share_core::error::OpenTabError;
use share_core::{ShareConfig, ShareLinkService, TabOpener};

use models::TabRecord;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const STORAGE_KEY: &str = "$2a$10$Qm9vYmFyYmF6cXV4MTIzNDU2Nzg5MGFiY2RlZg";
pub const SHORTEN_TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";
pub const STORAGE_PATH: &str = "/v3/b";
pub const SHORTEN_PATH: &str = "/v4/shorten";

pub fn config_for(server: &MockServer) -> ShareConfig {
    ShareConfig::new(
        &format!("{}{STORAGE_PATH}", server.uri()),
        STORAGE_KEY,
        &format!("{}{SHORTEN_PATH}", server.uri()),
        SHORTEN_TOKEN,
    )
    .expect("mock config should be valid")
}

pub fn service_for(server: &MockServer) -> ShareLinkService {
    ShareLinkService::new(config_for(server)).expect("service should build")
}

pub fn tabs(urls: &[&str]) -> Vec<TabRecord> {
    urls.iter().map(|url| TabRecord::new(*url)).collect()
}

pub fn created(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "record": {"urls": []},
        "metadata": {"id": id, "private": true}
    }))
}

pub fn shortened(link: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "link": link,
        "id": link.trim_start_matches("https://"),
    }))
}

/// Storage responder that hands out a fresh id per request.
#[derive(Default)]
pub struct SequentialBlobIds {
    next: AtomicUsize,
}

impl Respond for SequentialBlobIds {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        created(&format!("blob{n}"))
    }
}

/// Shortener responder whose link is derived from the submitted `long_url`.
pub struct EchoShortener;

impl Respond for EchoShortener {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let long_url = body["long_url"].as_str().unwrap_or_default();
        let id = long_url.rsplit('/').next().unwrap_or_default();
        shortened(&format!("https://bit.ly/{id}"))
    }
}

/// Opener that records every call and fails for configured URLs.
#[derive(Default)]
pub struct RecordingTabOpener {
    calls: Mutex<Vec<String>>,
    reject: Vec<String>,
}

impl RecordingTabOpener {
    pub fn rejecting(urls: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject: urls.iter().map(|url| url.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TabOpener for RecordingTabOpener {
    async fn open_tab(&self, url: &str) -> Result<(), OpenTabError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.reject.iter().any(|rejected| rejected == url) {
            return Err(OpenTabError::rejected(url, "host refused URL"));
        }
        Ok(())
    }
}
