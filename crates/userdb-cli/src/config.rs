//! Global options and their resolution
//!
//! Every option can come from a flag, an environment variable, or a `.env`
//! file in the working directory (loaded before parsing).

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use userdb_core::logging_facility::Profile;

pub const DEFAULT_DB_PATH: &str = ".userdb/users.db";

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable message per line
    Text,
    /// One JSON document per command
    Json,
}

/// How log events are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn profile(&self) -> Profile {
        match self {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to the users database
    #[arg(
        long,
        global = true,
        env = "USERDB_DATABASE",
        default_value = DEFAULT_DB_PATH
    )]
    pub db: PathBuf,

    /// Output format
    #[arg(
        long,
        global = true,
        env = "USERDB_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Text
    )]
    pub format: OutputFormat,

    /// Log format
    #[arg(
        long,
        global = true,
        env = "USERDB_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Filter used unless `RUST_LOG` is set
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
