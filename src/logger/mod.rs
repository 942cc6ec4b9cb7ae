//! Logger Module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact or JSON format

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use std::sync::Mutex;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer must come before the console layer or ANSI codes leak into
    // span fields in the file output (tokio-rs/tracing#1817).
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(())
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = Mutex::new(writer::open_log_file(config)?);
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_rejects_invalid_config_before_installing() {
        let mut config = LoggerConfig::default();
        config.console.enabled = false;
        assert!(init_logger(config).is_err());
    }

    #[test]
    fn test_file_layer_for_each_format() {
        let dir = tempdir().unwrap();
        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            let config = FileConfig {
                enabled: true,
                path: dir.path().join(format!("{}.log", format.as_str())),
                append: true,
                format,
            };
            assert!(file_layer(&config).is_ok());
            assert!(config.path.exists());
        }
    }

    #[test]
    fn test_json_file_layer_writes_events() {
        let dir = tempdir().unwrap();
        let config = FileConfig {
            enabled: true,
            path: dir.path().join("events.log"),
            append: false,
            format: LogFormat::Json,
        };
        let subscriber = tracing_subscriber::registry().with(file_layer(&config).unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(operation = "get_string", key = "k", "Store operation failed");
        });

        let contents = std::fs::read_to_string(&config.path).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["fields"]["operation"], "get_string");
        assert_eq!(line["fields"]["key"], "k");
        assert_eq!(line["level"], "ERROR");
    }
}
