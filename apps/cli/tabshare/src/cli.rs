//! Command-line arguments.

use crate::logger::{DEFAULT_LOG_LEVEL, LogOptions};

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, value_parser};
use log::LevelFilter;

/// Share browser tabs as one short link, and open shared links again.
#[derive(Debug, Parser)]
#[command(name = "tabshare", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/tabshare/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Per-request HTTP timeout in milliseconds
    #[arg(long, global = true, value_name = "MS", value_parser = value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Store URLs and print a short link to them
    Create {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,

        /// Also print the long-form storage URL
        #[arg(long)]
        long: bool,
    },

    /// Print (or open) the URLs behind a long-form share URL
    Resolve {
        #[arg(value_name = "URL")]
        url: String,

        /// Open the URLs instead of printing them
        #[arg(long)]
        open: bool,

        /// Retry transient failures this many times
        #[arg(long, default_value_t = 0, value_name = "N")]
        retries: u32,

        /// With --open, print the URLs instead of launching them
        #[arg(long, requires = "open")]
        dry_run: bool,
    },

    /// Open URLs in the default browser
    Open {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,

        /// Print the URLs instead of launching them
        #[arg(long)]
        dry_run: bool,
    },

    /// Join URLs into a semicolon share string
    Encode {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },

    /// Split a share string into one URL per line
    Decode {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Answer one JSON request read from stdin
    Message {
        /// Print OPEN_TABS URLs to stderr instead of launching them
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            level: self.log_level(),
            log_file: self.log_file.clone(),
        }
    }
}
