//! CLI argument parsing with clap
//!
//! One subcommand per facade operation, plus `check` for configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::facade::TimeUnit;

/// Command-line driver for the key-value facade
#[derive(Parser, Debug)]
#[command(name = "kvfacade")]
#[command(about = "Typed key-value operations against the configured store")]
#[command(long_about = "
kvfacade runs a single key-value operation against the configured store
(Redis or the in-process memory store) and prints the result.

EXAMPLES:
    # Store a value for ten minutes
    kvfacade set session:42 token --ttl 10 --unit minutes

    # Read it back
    kvfacade get session:42

    # Push to the head of a list and read the whole list
    kvfacade lpush events signup
    kvfacade lrange events 0 -1

    # Write several hash fields at once
    kvfacade hmset user:7 name=alice plan=pro

    # Validate configuration and connect to the store
    kvfacade --env production check
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{environment}.toml` overlay. Defaults to KVFACADE_APP_ENV.
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Set a string value, optionally with an expiry
    Set {
        key: String,
        value: String,

        /// Expire after this many units
        #[arg(long, value_name = "N", value_parser = super::validation::validate_ttl)]
        ttl: Option<u64>,

        /// Unit of --ttl (default: seconds)
        #[arg(long, value_enum, requires = "ttl")]
        unit: Option<TtlUnit>,
    },
    /// Get a string value
    Get { key: String },
    /// Insert a value at the head of a list
    Lpush { key: String, value: String },
    /// Print list elements between START and END (inclusive, -1 is the last)
    Lrange {
        key: String,
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        end: i64,
    },
    /// Write FIELD=VALUE pairs into a hash
    Hmset {
        key: String,
        #[arg(required = true, value_name = "FIELD=VALUE", value_parser = super::validation::parse_field_pair)]
        fields: Vec<(String, String)>,
    },
    /// Read one hash field
    Hget { key: String, field: String },
    /// Read every field of a hash
    Hgetall { key: String },
    /// Delete a key
    Del { key: String },
    /// Validate configuration and connect to the store
    Check,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Units accepted by `set --unit`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtlUnit {
    #[value(name = "ms", alias = "milliseconds")]
    Milliseconds,
    #[value(name = "seconds", alias = "s")]
    Seconds,
    #[value(name = "minutes", alias = "m")]
    Minutes,
    #[value(name = "hours", alias = "h")]
    Hours,
    #[value(name = "days", alias = "d")]
    Days,
}

impl Cli {
    /// Log level forced by `--verbose` / `--quiet`, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

impl From<TtlUnit> for TimeUnit {
    fn from(unit: TtlUnit) -> Self {
        match unit {
            TtlUnit::Milliseconds => TimeUnit::Milliseconds,
            TtlUnit::Seconds => TimeUnit::Seconds,
            TtlUnit::Minutes => TimeUnit::Minutes,
            TtlUnit::Hours => TimeUnit::Hours,
            TtlUnit::Days => TimeUnit::Days,
        }
    }
}
