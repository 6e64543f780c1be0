//! # Logging
//!
//! Installs a `tracing-subscriber` registry built from [`LoggingConfig`].
//!
//! The frame codec itself never logs. Only the stream layer emits events, so
//! this is optional for library users who already install their own subscriber.

use crate::config::{LogFormat, LogOutput, LoggingConfig};
use crate::error::{constants, CodecError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`.
///
/// Every configured output receives every event at or above the configured
/// level. Fails if the config does not validate, the log file cannot be
/// opened, or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| CodecError::LoggingError(e.to_string()))?;

    let layers: Vec<BoxedLayer> = match &config.output {
        LogOutput::Console => vec![console_layer(config.format)],
        LogOutput::File { path } => vec![file_layer(path, config.format)?],
        LogOutput::Both { path } => vec![
            console_layer(config.format),
            file_layer(path, config.format)?,
        ],
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(LevelFilter::from(config.level))
        .try_init()
        .map_err(|e| CodecError::LoggingError(format!("{}: {e}", constants::ERR_LOG_INIT)))?;

    tracing::info!(level = ?config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    fmt_layer(std::io::stdout, true, format)
}

fn file_layer(path: &Path, format: LogFormat) -> Result<BoxedLayer> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            CodecError::LoggingError(format!(
                "{} {}: {e}",
                constants::ERR_LOG_FILE_OPEN,
                path.display()
            ))
        })?;
    Ok(fmt_layer(Mutex::new(file), false, format))
}

fn fmt_layer<W>(writer: W, ansi: bool, format: LogFormat) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(ansi && format == LogFormat::Plain)
        .with_writer(writer);

    match format {
        LogFormat::Plain => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
