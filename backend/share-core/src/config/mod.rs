//! Share service configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults (JSONBin and Bitly endpoints, `X-Master-Key` header)
//! 2. TOML file (`{config_dir}/tabshare/config.toml` unless a path is given)
//! 3. `.env` file and process environment (`TABSHARE_*`)
//!
//! Secrets are never compiled in. They are wrapped in [`RedactedApiKey`]
//! as soon as they are validated.

pub mod env;
pub mod validation;

use crate::error::ConfigError;
use crate::{DEFAULT_SHORTEN_BASE_URL, DEFAULT_STORAGE_API_KEY_HEADER, DEFAULT_STORAGE_BASE_URL};

use common::{ErrorLocation, RedactedApiKey};

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

const CONFIG_DIR_NAME: &str = "tabshare";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Raw, unvalidated settings as they appear in the TOML file or environment.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShareConfigFile {
    pub storage_base_url: Option<String>,
    pub storage_api_key: Option<String>,
    pub storage_api_key_header: Option<String>,
    pub shorten_base_url: Option<String>,
    pub shorten_api_token: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Validated settings injected into [`crate::ShareLinkService::new`].
#[derive(Debug, Clone)]
pub struct ShareConfig {
    pub storage_base_url: Url,
    pub storage_api_key: RedactedApiKey,
    pub storage_api_key_header: String,
    pub shorten_base_url: Url,
    pub shorten_api_token: RedactedApiKey,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ShareConfig {
    /// Build a config from explicit values, applying the same checks as [`ShareConfig::load`].
    #[track_caller]
    pub fn new(
        storage_base_url: &str,
        storage_api_key: impl Into<String>,
        shorten_base_url: &str,
        shorten_api_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        ShareConfigFile {
            storage_base_url: Some(storage_base_url.to_string()),
            storage_api_key: Some(storage_api_key.into()),
            storage_api_key_header: None,
            shorten_base_url: Some(shorten_base_url.to_string()),
            shorten_api_token: Some(shorten_api_token.into()),
            timeout_ms: None,
        }
        .resolve()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_storage_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.storage_api_key_header = header.into();
        self
    }

    /// Load from file and environment.
    ///
    /// With `path = None` the default location is tried; a missing file there
    /// is fine as long as the environment supplies the secrets. An explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match env::try_load_dotenv().path {
            Some(path) => debug!("Environment overlay includes {}", path.display()),
            None => debug!("No .env file found - using process environment only"),
        }

        let file = match path {
            Some(path) => ShareConfigFile::read(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => ShareConfigFile::read(&path)?,
                Some(path) => {
                    debug!("No config file at {}, using defaults", path.display());
                    ShareConfigFile::default()
                }
                None => ShareConfigFile::default(),
            },
        };

        file.with_env_overrides(env::process_env)?.resolve()
    }
}

impl ShareConfigFile {
    /// Parse a TOML config file.
    #[track_caller]
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            location: ErrorLocation::here(),
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ShareConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            location: ErrorLocation::here(),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!("Config loaded from {}", path.display());
        Ok(file)
    }

    /// Overlay `TABSHARE_*` variables found through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::STORAGE_BASE_URL) {
            self.storage_base_url = Some(value);
        }
        if let Some(value) = lookup(env::STORAGE_API_KEY) {
            self.storage_api_key = Some(value);
        }
        if let Some(value) = lookup(env::STORAGE_API_KEY_HEADER) {
            self.storage_api_key_header = Some(value);
        }
        if let Some(value) = lookup(env::SHORTEN_BASE_URL) {
            self.shorten_base_url = Some(value);
        }
        if let Some(value) = lookup(env::SHORTEN_API_TOKEN) {
            self.shorten_api_token = Some(value);
        }
        if let Some(value) = lookup(env::TIMEOUT_MS) {
            let millis = value.trim().parse::<u64>().map_err(|e| {
                ConfigError::validation(format!("{} must be a whole number of milliseconds: {e}", env::TIMEOUT_MS))
            })?;
            self.timeout_ms = Some(millis);
        }
        Ok(self)
    }

    /// Fill defaults and validate every field.
    #[track_caller]
    pub fn resolve(self) -> Result<ShareConfig, ConfigError> {
        let storage_base_url = validation::validate_base_url(
            "storage_base_url",
            self.storage_base_url.as_deref().unwrap_or(DEFAULT_STORAGE_BASE_URL),
        )?;
        let shorten_base_url = validation::validate_base_url(
            "shorten_base_url",
            self.shorten_base_url.as_deref().unwrap_or(DEFAULT_SHORTEN_BASE_URL),
        )?;

        let storage_api_key = validation::validate_secret("storage_api_key", self.storage_api_key)?;
        let shorten_api_token =
            validation::validate_secret("shorten_api_token", self.shorten_api_token)?;

        let storage_api_key_header = self
            .storage_api_key_header
            .unwrap_or_else(|| DEFAULT_STORAGE_API_KEY_HEADER.to_string());
        validation::validate_header_name("storage_api_key_header", &storage_api_key_header)?;

        let timeout = match self.timeout_ms {
            Some(0) => {
                return Err(ConfigError::validation("timeout_ms must be greater than zero"));
            }
            Some(millis) => Some(Duration::from_millis(millis)),
            None => None,
        };

        Ok(ShareConfig {
            storage_base_url,
            storage_api_key,
            storage_api_key_header,
            shorten_base_url,
            shorten_api_token,
            timeout,
        })
    }
}

/// `{config_dir}/tabshare/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
