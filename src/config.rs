//! # Configuration Management
//!
//! Wire constants and runtime configuration for the TLV codec.
//!
//! The wire constants below are part of the frame contract and never change
//! at runtime. [`CodecConfig`] lets a deployment tighten the payload limit for
//! its streams; it can never raise it above [`MAX_PAYLOAD_SIZE`].
//!
//! ## Configuration Sources
//! - TOML files via [`Config::from_file`] or strings via [`Config::from_toml`]
//! - `TLV_CODEC_*` environment variables via [`Config::from_env`]
//!
//! ```toml
//! [codec]
//! max_payload_size = 1048576
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! output = { to = "file", path = "/var/log/frames.log" }
//! ```

use crate::error::{constants, CodecError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// Type tag for binary payloads
pub const TYPE_BINARY: u8 = 1;

/// Type tag for text payloads
pub const TYPE_TEXT: u8 = 2;

/// Tag byte plus big-endian u32 length
pub const HEADER_LEN: usize = 5;

/// Max allowed payload size (10 MiB)
pub const MAX_PAYLOAD_SIZE: usize = 10 << 20;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CodecError::ConfigError(format!("{} {}: {e}", constants::ERR_CONFIG_READ, path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// Missing sections and fields take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `TLV_CODEC_MAX_PAYLOAD_SIZE`, `TLV_CODEC_LOG_LEVEL`,
    /// `TLV_CODEC_LOG_FORMAT` and `TLV_CODEC_LOG_FILE`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(size) = env_var("TLV_CODEC_MAX_PAYLOAD_SIZE") {
            config.codec.max_payload_size = size.parse().map_err(|e| {
                CodecError::ConfigError(format!("TLV_CODEC_MAX_PAYLOAD_SIZE '{size}': {e}"))
            })?;
        }
        if let Some(level) = env_var("TLV_CODEC_LOG_LEVEL") {
            config.logging.level = parse_env("TLV_CODEC_LOG_LEVEL", &level)?;
        }
        if let Some(format) = env_var("TLV_CODEC_LOG_FORMAT") {
            config.logging.format = parse_env("TLV_CODEC_LOG_FORMAT", &format)?;
        }
        if let Some(path) = env_var("TLV_CODEC_LOG_FILE") {
            config.logging.output = LogOutput::File { path: path.into() };
        }

        config.validate()?;
        Ok(config)
    }

    /// Write this configuration as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;
        std::fs::write(path, content)
            .map_err(|e| CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE)))
    }

    pub fn validate(&self) -> Result<()> {
        self.codec.validate()?;
        self.logging.validate()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse an environment value through the same names the TOML form accepts.
fn parse_env<T: for<'de> Deserialize<'de>>(name: &str, value: &str) -> Result<T> {
    T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(value))
        .map_err(|e| CodecError::ConfigError(format!("{name} '{value}': {e}")))
}

/// Frame codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest content length a stream will accept or send, in bytes
    pub max_payload_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

impl CodecConfig {
    /// The limit must be non-zero and no larger than [`MAX_PAYLOAD_SIZE`].
    pub fn validate(&self) -> Result<()> {
        match self.max_payload_size {
            0 => Err(CodecError::ConfigError(
                "max_payload_size cannot be 0".to_string(),
            )),
            size if size > MAX_PAYLOAD_SIZE => Err(CodecError::ConfigError(format!(
                "max_payload_size {size} exceeds the wire maximum of {MAX_PAYLOAD_SIZE}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Verbosity of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Line format of log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Where log events go
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(tag = "to", rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output, with ANSI colors for plain lines
    #[default]
    Console,
    /// Append to a file
    File { path: PathBuf },
    /// Standard output and a file, each receiving every event
    Both { path: PathBuf },
}

impl LogOutput {
    /// Log file, if this output writes one
    pub fn file(&self) -> Option<&Path> {
        match self {
            LogOutput::Console => None,
            LogOutput::File { path } | LogOutput::Both { path } => Some(path),
        }
    }
}

/// Logging configuration consumed by [`crate::utils::logging::init_logging`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
}

impl LoggingConfig {
    /// A log file must have a name and live in an existing directory.
    pub fn validate(&self) -> Result<()> {
        let Some(path) = self.output.file() else {
            return Ok(());
        };
        if path.file_name().is_none() {
            return Err(CodecError::ConfigError(format!(
                "log file path {} has no file name",
                path.display()
            )));
        }
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
                Err(CodecError::ConfigError(format!(
                    "log directory {} does not exist",
                    dir.display()
                )))
            }
            _ => Ok(()),
        }
    }
}
