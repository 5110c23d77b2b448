//! Environment variable names and `.env` discovery.

use std::path::PathBuf;

use log::{info, warn};

pub const STORAGE_BASE_URL: &str = "TABSHARE_STORAGE_BASE_URL";
pub const STORAGE_API_KEY: &str = "TABSHARE_STORAGE_API_KEY";
pub const STORAGE_API_KEY_HEADER: &str = "TABSHARE_STORAGE_API_KEY_HEADER";
pub const SHORTEN_BASE_URL: &str = "TABSHARE_SHORTEN_BASE_URL";
pub const SHORTEN_API_TOKEN: &str = "TABSHARE_SHORTEN_API_TOKEN";
pub const TIMEOUT_MS: &str = "TABSHARE_TIMEOUT_MS";

/// Result of attempting to load a `.env` file; `path` is `None` when none was loaded.
#[derive(Debug)]
pub struct EnvLoadResult {
    pub path: Option<PathBuf>,
}

/// Process environment lookup; unset and non-unicode values read as absent.
pub fn process_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            warn!("Env var {name} contains invalid unicode, ignoring");
            None
        }
    }
}

/// Load `.env` from the working directory, then next to the executable.
///
/// Existing process variables are never overwritten.
pub fn try_load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {}", path.display());
        return EnvLoadResult { path: Some(path) };
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let env_path = exe_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(()) => {
                    info!("Loaded .env from: {}", env_path.display());
                    return EnvLoadResult { path: Some(env_path) };
                }
                Err(e) => warn!("Failed to parse .env at {}: {e}", env_path.display()),
            }
        }
    }

    EnvLoadResult { path: None }
}
