use crate::cli::{Cli, Command};
use crate::logger::DEFAULT_LOG_LEVEL;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use log::LevelFilter;

#[test]
fn given_cli_definition_when_checked_then_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn given_create_with_urls_when_parsed_then_collects_all_urls() {
    let cli = Cli::try_parse_from(["tabshare", "create", "https://a.com", "https://b.com", "--long"])
        .unwrap();

    assert_eq!(
        cli.command,
        Command::Create {
            urls: vec![String::from("https://a.com"), String::from("https://b.com")],
            long: true,
        }
    );
}

/// **VALUE**: Verifies that `create` with no URLs is rejected by the parser.
///
/// **WHY THIS MATTERS**: An empty create would only fail later, after config loading,
/// with a less helpful message.
///
/// **BUG THIS CATCHES**: Would catch `required = true` being dropped from the URL list.
#[test]
fn given_create_without_urls_when_parsed_then_fails() {
    // GIVEN/WHEN: No URLs
    let result = Cli::try_parse_from(["tabshare", "create"]);

    // THEN: Parse error
    assert!(result.is_err());
}

#[test]
fn given_resolve_flags_when_parsed_then_fields_set() {
    let cli = Cli::try_parse_from([
        "tabshare",
        "resolve",
        "https://api.jsonbin.io/v3/b/abc",
        "--open",
        "--dry-run",
        "--retries",
        "3",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Command::Resolve {
            url: String::from("https://api.jsonbin.io/v3/b/abc"),
            open: true,
            retries: 3,
            dry_run: true,
        }
    );
}

#[test]
fn given_resolve_dry_run_without_open_when_parsed_then_fails() {
    let result = Cli::try_parse_from(["tabshare", "resolve", "https://x.com/b/1", "--dry-run"]);

    assert!(result.is_err());
}

/// **VALUE**: Verifies that a zero timeout is rejected at parse time.
///
/// **WHY THIS MATTERS**: A zero timeout would make every request fail immediately.
///
/// **BUG THIS CATCHES**: Would catch the `range(1..)` parser being removed.
#[test]
fn given_zero_timeout_when_parsed_then_fails() {
    let result = Cli::try_parse_from(["tabshare", "--timeout-ms", "0", "encode", "https://a.com"]);

    assert!(result.is_err());
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_accepted() {
    let cli = Cli::try_parse_from([
        "tabshare",
        "decode",
        "https://a.com;https://b.com",
        "--config",
        "/tmp/tabshare.toml",
        "--timeout-ms",
        "2500",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/tmp/tabshare.toml")));
    assert_eq!(cli.timeout_ms, Some(2500));
}

#[test]
fn given_verbosity_flags_when_computing_level_then_maps_to_filter() {
    let quiet = Cli::try_parse_from(["tabshare", "-q", "message"]).unwrap();
    let default = Cli::try_parse_from(["tabshare", "message"]).unwrap();
    let verbose = Cli::try_parse_from(["tabshare", "-v", "message"]).unwrap();
    let very_verbose = Cli::try_parse_from(["tabshare", "-vv", "message"]).unwrap();

    assert_eq!(quiet.log_level(), LevelFilter::Error);
    assert_eq!(default.log_level(), DEFAULT_LOG_LEVEL);
    assert_eq!(verbose.log_level(), LevelFilter::Debug);
    assert_eq!(very_verbose.log_level(), LevelFilter::Trace);
}

#[test]
fn given_log_file_flag_when_building_options_then_included() {
    let cli = Cli::try_parse_from(["tabshare", "--log-file", "/tmp/tabshare.log", "message"]).unwrap();

    let options = cli.log_options();

    assert_eq!(options.log_file, Some(PathBuf::from("/tmp/tabshare.log")));
}
