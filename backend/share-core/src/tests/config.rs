// Unit tests for config loading and validation.
// Env-mutating tests are serialized; everything else uses injected lookups.

use crate::config::validation::detect_placeholder;
use crate::config::{ShareConfig, ShareConfigFile, env};
use crate::error::ConfigError;
use crate::{DEFAULT_SHORTEN_BASE_URL, DEFAULT_STORAGE_API_KEY_HEADER, DEFAULT_STORAGE_BASE_URL};

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use serial_test::serial;

const STORAGE_KEY: &str = "$2a$10$Qm9vYmFyYmF6cXV4MTIzNDU2Nzg5MGFiY2RlZg";
const SHORTEN_TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";

fn secrets_only() -> ShareConfigFile {
    ShareConfigFile {
        storage_api_key: Some(STORAGE_KEY.to_string()),
        shorten_api_token: Some(SHORTEN_TOKEN.to_string()),
        ..ShareConfigFile::default()
    }
}

/// **VALUE**: Verifies that secrets alone produce a config pointing at the public backends.
///
/// **WHY THIS MATTERS**: Most users only set two secrets. Defaults must point at the real
/// JSONBin and Bitly endpoints with the JSONBin key header.
///
/// **BUG THIS CATCHES**: Would catch a typo in a default constant or a missing default.
#[test]
fn given_only_secrets_when_resolving_then_uses_default_endpoints() {
    // GIVEN/WHEN: Resolving a file with only secrets
    let config = secrets_only().resolve().unwrap();

    // THEN: Defaults filled in, no timeout
    assert_eq!(config.storage_base_url.as_str(), DEFAULT_STORAGE_BASE_URL);
    assert_eq!(config.shorten_base_url.as_str(), DEFAULT_SHORTEN_BASE_URL);
    assert_eq!(config.storage_api_key_header, DEFAULT_STORAGE_API_KEY_HEADER);
    assert_eq!(config.storage_api_key.expose(), STORAGE_KEY);
    assert_eq!(config.timeout, None);
}

/// **VALUE**: Verifies that template placeholder secrets are rejected.
///
/// **WHY THIS MATTERS**: Sample configs carry `$YOUR_JSONBIN_KEY` and `YOUR_BITLY_TOKEN`.
/// Sending them produces a confusing 401 after the blob step.
///
/// **BUG THIS CATCHES**: Would catch placeholder detection being removed or made
/// case-sensitive.
#[test]
fn given_placeholder_secrets_when_resolving_then_returns_validation_error() {
    for (key, token) in [
        ("$YOUR_JSONBIN_KEY", SHORTEN_TOKEN),
        (STORAGE_KEY, "YOUR_BITLY_TOKEN"),
        (STORAGE_KEY, "<your token here>"),
        ("xxxxxxxxxxxxxxxx", SHORTEN_TOKEN),
    ] {
        let file = ShareConfigFile {
            storage_api_key: Some(key.to_string()),
            shorten_api_token: Some(token.to_string()),
            ..ShareConfigFile::default()
        };

        let result = file.resolve();

        assert!(
            matches!(result, Err(ConfigError::Validation { .. })),
            "Expected rejection for key={key:?} token={token:?}"
        );
    }
}

#[test]
fn given_missing_secret_when_resolving_then_names_the_field() {
    let file = ShareConfigFile {
        storage_api_key: Some(STORAGE_KEY.to_string()),
        ..ShareConfigFile::default()
    };

    let err = file.resolve().unwrap_err();

    assert!(err.to_string().contains("shorten_api_token"), "Got: {err}");
}

#[test]
fn given_bad_urls_or_timeout_when_resolving_then_rejects() {
    let non_http = ShareConfigFile {
        storage_base_url: Some("ftp://files.example.com/b".to_string()),
        ..secrets_only()
    };
    let garbage = ShareConfigFile {
        shorten_base_url: Some("not a url".to_string()),
        ..secrets_only()
    };
    let zero_timeout = ShareConfigFile {
        timeout_ms: Some(0),
        ..secrets_only()
    };
    let bad_header = ShareConfigFile {
        storage_api_key_header: Some("X Master Key".to_string()),
        ..secrets_only()
    };

    assert!(non_http.resolve().is_err());
    assert!(garbage.resolve().is_err());
    assert!(zero_timeout.resolve().is_err());
    assert!(bad_header.resolve().is_err());
}

/// **VALUE**: Verifies that environment values override file values.
///
/// **WHY THIS MATTERS**: Deployments keep the endpoint in a file and inject secrets via
/// env; a rotated token in env must win over a stale one on disk.
///
/// **BUG THIS CATCHES**: Would catch override order being reversed.
#[test]
fn given_env_lookup_when_overriding_then_env_wins() {
    // GIVEN: A file with a stale token and an env map with a new one
    let file = ShareConfigFile {
        shorten_api_token: Some("stale-token-0000000000".to_string()),
        ..secrets_only()
    };
    let env_map: HashMap<&str, &str> = HashMap::from([
        (env::SHORTEN_API_TOKEN, "fresh-token-1234567890"),
        (env::TIMEOUT_MS, "2500"),
        (env::STORAGE_BASE_URL, "https://storage.internal/v3/b"),
    ]);

    // WHEN: Applying overrides
    let config = file
        .with_env_overrides(|name| env_map.get(name).map(|v| v.to_string()))
        .unwrap()
        .resolve()
        .unwrap();

    // THEN: Env values are used
    assert_eq!(config.shorten_api_token.expose(), "fresh-token-1234567890");
    assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    assert_eq!(config.storage_base_url.as_str(), "https://storage.internal/v3/b");
}

#[test]
fn given_non_numeric_timeout_env_when_overriding_then_returns_validation_error() {
    let result = secrets_only().with_env_overrides(|name| {
        (name == env::TIMEOUT_MS).then(|| String::from("soon"))
    });

    assert!(matches!(result, Err(ConfigError::Validation { .. })));
}

/// **VALUE**: Verifies TOML parsing of a full config file.
///
/// **WHY THIS MATTERS**: The config file is the documented way to point at a
/// self-hosted storage backend.
///
/// **BUG THIS CATCHES**: Would catch a field rename that silently ignores a setting
/// (unknown fields are denied).
#[test]
fn given_toml_file_when_reading_then_parses_all_fields() {
    // GIVEN: A config file on disk
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
storage_base_url = "https://storage.example.com/v3/b"
storage_api_key = "{STORAGE_KEY}"
storage_api_key_header = "X-Access-Key"
shorten_base_url = "https://short.example.com/v4/shorten"
shorten_api_token = "{SHORTEN_TOKEN}"
timeout_ms = 5000
"#
    )
    .unwrap();

    // WHEN: Reading and resolving
    let config = ShareConfigFile::read(file.path()).unwrap().resolve().unwrap();

    // THEN: Every field is honored
    assert_eq!(config.storage_base_url.host_str(), Some("storage.example.com"));
    assert_eq!(config.storage_api_key_header, "X-Access-Key");
    assert_eq!(config.shorten_base_url.path(), "/v4/shorten");
    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
}

#[test]
fn given_unknown_field_when_reading_toml_then_returns_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "storage_url = \"https://typo.example.com\"").unwrap();

    let result = ShareConfigFile::read(file.path());

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn given_missing_explicit_path_when_loading_then_returns_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let result = ShareConfig::load(Some(&path));

    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

/// **VALUE**: Verifies end-to-end loading with real process environment variables.
///
/// **WHY THIS MATTERS**: The CLI calls `ShareConfig::load`; this is the path real users hit.
///
/// **BUG THIS CATCHES**: Would catch `load` forgetting to apply env overrides.
#[test]
#[serial]
fn given_process_env_when_loading_then_env_secrets_are_used() {
    // GIVEN: A config file without secrets, secrets in env
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "storage_base_url = \"https://storage.example.com/v3/b\"").unwrap();

    // SAFETY: serialized with every other env-mutating test in this crate.
    unsafe {
        std::env::set_var(env::STORAGE_API_KEY, STORAGE_KEY);
        std::env::set_var(env::SHORTEN_API_TOKEN, SHORTEN_TOKEN);
    }

    // WHEN: Loading
    let result = ShareConfig::load(Some(file.path()));

    unsafe {
        std::env::remove_var(env::STORAGE_API_KEY);
        std::env::remove_var(env::SHORTEN_API_TOKEN);
    }

    // THEN: File URL plus env secrets
    let config = result.unwrap();
    assert_eq!(config.storage_base_url.as_str(), "https://storage.example.com/v3/b");
    assert_eq!(config.shorten_api_token.expose(), SHORTEN_TOKEN);
}

#[test]
fn given_real_looking_keys_when_detecting_placeholder_then_none() {
    assert_eq!(detect_placeholder(STORAGE_KEY), None);
    assert_eq!(detect_placeholder(SHORTEN_TOKEN), None);
    assert_eq!(detect_placeholder("aaaaaaaaaa"), Some("repeated_char"));
}

/// **VALUE**: Verifies that bcrypt-shaped keys containing `...` or `xxx` runs are accepted.
///
/// **WHY THIS MATTERS**: JSONBin master keys are `$2a$10$` plus characters from
/// `[./A-Za-z0-9]`; a substring check on `...` or `xxx` rejects real keys with no override.
///
/// **BUG THIS CATCHES**: Would catch placeholder markers being matched as substrings again.
#[test]
fn given_bcrypt_key_with_dot_and_x_runs_when_resolving_then_accepted() {
    for key in [
        "$2a$10$Qm9vYmF...mF6cXV4...MTIzNDU2Nzg5MGFi",
        "$2a$10$Qm9vYmFyXxXcXV4MTIzNDU2Nzg5MGFiY2RlZg",
    ] {
        // GIVEN: A real-looking key
        let file = ShareConfigFile {
            storage_api_key: Some(key.to_string()),
            ..secrets_only()
        };

        // WHEN: Resolving
        let config = file.resolve();

        // THEN: Accepted verbatim
        assert_eq!(config.unwrap().storage_api_key.expose(), key);
    }
}

#[test]
fn given_whole_value_placeholder_when_detecting_then_matched() {
    assert_eq!(detect_placeholder("..."), Some("..."));
    assert_eq!(detect_placeholder("XXX"), Some("xxx"));
    assert_eq!(detect_placeholder("$2a$10$abc...def"), None);
}

#[test]
#[serial]
fn given_dotenv_search_when_loading_then_reported_path_is_a_real_file() {
    let result = env::try_load_dotenv();

    if let Some(path) = result.path {
        assert!(path.is_file(), "Reported .env does not exist: {}", path.display());
    }
}
