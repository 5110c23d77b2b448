//! Subcommand implementations.
//!
//! Command output goes to the writer handed in by the caller; diagnostics go
//! through `log`. Creating a link is never retried: a retry would store a
//! second blob.

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::opener::{PrintTabOpener, SystemTabOpener};

use models::{TabRecord, encode_share_string, parse_share_string};
use share_core::error::ConfigError;
use share_core::messages::{ShareRequest, ShareResponse, handle_request};
use share_core::{
    OpenTabsReport, ShareConfig, ShareError, ShareErrorKind, ShareLinkService, TabOpener,
    open_tabs,
};

use std::io::{Read, Write, stderr};
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use log::{debug, info, warn};
use tokio::time::sleep as TokioSleep;
use tokio_util::sync::CancellationToken;

const RETRY_INITIAL_INTERVAL: Duration = Duration::from_millis(500);

/// How `resolve` retries transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub initial_interval: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            initial_interval: RETRY_INITIAL_INTERVAL,
        }
    }

    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            current_interval: self.initial_interval,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

/// Run the parsed command line, loading config only for commands that talk
/// to the share service.
pub async fn run<R, W>(
    cli: Cli,
    input: R,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<(), CliError>
where
    R: Read,
    W: Write + Send,
{
    let config_path = cli.config;
    let timeout = cli.timeout_ms.map(Duration::from_millis);

    let load_config = move || -> Result<ShareConfig, ConfigError> {
        let config = ShareConfig::load(config_path.as_deref())?;
        Ok(match timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        })
    };

    execute(cli.command, load_config, input, out, cancel).await
}

pub async fn execute<F, R, W>(
    command: Command,
    load_config: F,
    input: R,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<(), CliError>
where
    F: FnOnce() -> Result<ShareConfig, ConfigError>,
    R: Read,
    W: Write + Send,
{
    match command {
        Command::Create { urls, long } => {
            let service = ShareLinkService::new(load_config()?)?;
            create(&service, &urls, long, out, cancel).await
        }
        Command::Resolve {
            url,
            open,
            retries,
            dry_run,
        } => {
            let service = ShareLinkService::new(load_config()?)?;
            let urls =
                resolve_with_retries(&service, &url, RetryPolicy::new(retries), cancel).await?;
            if open {
                open_urls(&urls, dry_run, out).await
            } else {
                write_lines(&urls, out)
            }
        }
        Command::Open { urls, dry_run } => open_urls(&urls, dry_run, out).await,
        Command::Encode { urls } => {
            writeln!(out, "{}", encode_share_string(urls.as_slice())).map_err(CliError::output)
        }
        Command::Decode { text } => decode(&text, out),
        Command::Message { dry_run } => message(load_config, input, dry_run, out).await,
    }
}

pub async fn create<W: Write>(
    service: &ShareLinkService,
    urls: &[String],
    long: bool,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let tabs: Vec<TabRecord> = urls.iter().map(|url| TabRecord::new(url.as_str())).collect();

    let shared = service
        .create_share_link_cancellable(&tabs, cancel)
        .await
        .inspect_err(|e| {
            if let Some(reference) = e.orphaned_reference() {
                warn!("Blob {reference} was stored but no short link was created");
            }
        })?;

    writeln!(out, "{}", shared.short_link).map_err(CliError::output)?;
    if long {
        writeln!(out, "{}", shared.long_url).map_err(CliError::output)?;
    }
    Ok(())
}

/// Resolve `url`, retrying only failures the service marks as transient.
pub async fn resolve_with_retries(
    service: &ShareLinkService,
    url: &str,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<Vec<String>, ShareError> {
    let mut backoff = policy.backoff();
    let mut attempt = 0;

    loop {
        match service.resolve_share_link_cancellable(url, cancel).await {
            Ok(urls) => return Ok(urls),
            Err(e) if e.is_retryable() && attempt < policy.retries => {
                attempt += 1;
                let Some(delay) = backoff.next_backoff() else {
                    return Err(e);
                };
                warn!(
                    "Resolve attempt {attempt}/{} failed ({}), retrying after {delay:?}",
                    policy.retries,
                    e.user_message()
                );
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(ShareError::cancelled()),
                    _ = TokioSleep(delay) => {}
                }
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn open_urls<W: Write + Send>(
    urls: &[String],
    dry_run: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let report = if dry_run {
        let opener = PrintTabOpener::new(&mut *out);
        open_tabs(&opener, urls).await
    } else {
        open_tabs(&SystemTabOpener, urls).await
    };

    write_report(&report, out)
}

fn write_report<W: Write>(report: &OpenTabsReport, out: &mut W) -> Result<(), CliError> {
    for outcome in report.failed() {
        if let Err(e) = &outcome.result {
            writeln!(out, "failed: {} ({})", outcome.url, e.message()).map_err(CliError::output)?;
        }
    }
    writeln!(out, "Opened {} of {} tabs", report.opened(), report.len())
        .map_err(CliError::output)?;

    if report.all_opened() {
        Ok(())
    } else {
        Err(CliError::open_failed(
            report.len() - report.opened(),
            report.len(),
        ))
    }
}

fn decode<W: Write>(text: &str, out: &mut W) -> Result<(), CliError> {
    let urls = parse_share_string(text);
    if urls.is_empty() {
        return Err(CliError::input("No http(s) URLs found in share string"));
    }
    write_lines(&urls, out)
}

fn write_lines<W: Write>(lines: &[String], out: &mut W) -> Result<(), CliError> {
    for line in lines {
        writeln!(out, "{line}").map_err(CliError::output)?;
    }
    Ok(())
}

/// Answer one JSON request from `input` with one JSON line on `out`.
///
/// Failures, including unparsable requests and missing config, are reported
/// inside the response rather than as an `Err`.
pub async fn message<F, R, W>(
    load_config: F,
    mut input: R,
    dry_run: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    F: FnOnce() -> Result<ShareConfig, ConfigError>,
    R: Read,
    W: Write,
{
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .map_err(|e| CliError::input(format!("Failed to read request: {e}")))?;

    let response = match serde_json::from_str::<ShareRequest>(&raw) {
        Ok(request) => dispatch(load_config, request, dry_run).await,
        Err(e) => {
            warn!("Unparsable request: {e}");
            ShareResponse::Error {
                error: format!("Invalid input: {e}"),
                kind: ShareErrorKind::Validation.as_str().to_string(),
            }
        }
    };

    if response.is_error() {
        info!("Answering with an error response");
    }

    let json = serde_json::to_string(&response)
        .map_err(|e| CliError::input(format!("Failed to encode response: {e}")))?;
    writeln!(out, "{json}").map_err(CliError::output)
}

async fn dispatch<F>(load_config: F, request: ShareRequest, dry_run: bool) -> ShareResponse
where
    F: FnOnce() -> Result<ShareConfig, ConfigError>,
{
    let service = match load_config()
        .map_err(ShareError::from)
        .and_then(ShareLinkService::new)
    {
        Ok(service) => service,
        Err(e) => {
            warn!("Share service unavailable: {e}");
            return ShareResponse::Error {
                error: e.user_message(),
                kind: e.kind().as_str().to_string(),
            };
        }
    };

    let opener: Box<dyn TabOpener> = if dry_run {
        debug!("Dry run: OPEN_TABS URLs go to stderr");
        Box::new(PrintTabOpener::new(stderr()))
    } else {
        Box::new(SystemTabOpener)
    };

    handle_request(&service, &*opener, request).await
}
