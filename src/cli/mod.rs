//! CLI module for kvfacade
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration loading with CLI overrides
//! - Command execution against the configured store

pub mod executor;
pub mod parser;
pub mod validation;

pub use executor::{execute_command, run_operation};
pub use parser::{Cli, Commands, Environment, TtlUnit};

use crate::config::{ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load configuration, applying `--config` and `--env` over the environment
///
/// # Errors
/// Returns error if configuration loading or validation fails
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut loader = match &cli.config {
        // An explicit file sidesteps the KVFACADE_CONFIG_DIR/FILE exclusivity check
        Some(path) => ConfigLoader::default().with_config_file(path),
        None => ConfigLoader::new()?,
    };

    if let Some(env) = cli.env {
        loader = loader.with_environment(env.into());
    }

    Ok(loader.load()?)
}

/// Initialize logger from settings, honoring `--verbose` / `--quiet`
///
/// # Errors
/// Returns error if logger initialization fails
pub fn init_logger_from_settings(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let mut logger_settings = settings.logger.clone();
    if let Some(level) = cli.log_level_override() {
        logger_settings.level = level.to_string();
    }

    init_logger(logger_settings.into_logger_config()?)
}
