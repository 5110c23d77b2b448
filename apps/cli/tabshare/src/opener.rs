//! Tab openers for a terminal host: the platform URL launcher, or a dry run
//! that only prints.

use share_core::TabOpener;
use share_core::error::OpenTabError;

use std::io::Write;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command as TokioCommand;

#[cfg(target_os = "macos")]
const OPENER_PROGRAM: &str = "open";
#[cfg(target_os = "macos")]
const OPENER_ARGS: &[&str] = &[];

#[cfg(target_os = "windows")]
const OPENER_PROGRAM: &str = "cmd";
#[cfg(target_os = "windows")]
const OPENER_ARGS: &[&str] = &["/C", "start", ""];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER_PROGRAM: &str = "xdg-open";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER_ARGS: &[&str] = &[];

pub(crate) fn build_open_command(url: &str) -> TokioCommand {
    let mut cmd = TokioCommand::new(OPENER_PROGRAM);
    cmd.args(OPENER_ARGS)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTabOpener;

#[async_trait]
impl TabOpener for SystemTabOpener {
    async fn open_tab(&self, url: &str) -> Result<(), OpenTabError> {
        debug!("Launching {OPENER_PROGRAM} for {url}");

        let status = build_open_command(url)
            .status()
            .await
            .map_err(|e| OpenTabError::launch(url, format!("Failed to run {OPENER_PROGRAM}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(OpenTabError::rejected(
                url,
                format!("{OPENER_PROGRAM} exited with {status}"),
            ))
        }
    }
}

/// Writes each URL on its own line instead of opening it.
#[derive(Debug)]
pub struct PrintTabOpener<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> PrintTabOpener<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> TabOpener for PrintTabOpener<W> {
    async fn open_tab(&self, url: &str) -> Result<(), OpenTabError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| OpenTabError::launch(url, "Output lock poisoned"))?;
        writeln!(out, "{url}").map_err(|e| OpenTabError::launch(url, e.to_string()))
    }
}
