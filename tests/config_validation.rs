//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use tlv_codec::config::{
    CodecConfig, Config, LogFormat, LogLevel, LogOutput, LoggingConfig, MAX_PAYLOAD_SIZE,
};
use tlv_codec::CodecError;

fn config_error(result: tlv_codec::Result<impl std::fmt::Debug>) -> String {
    match result {
        Err(CodecError::ConfigError(msg)) => msg,
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_default_config_validates() {
    let config = Config::default();
    config.validate().expect("default config should be valid");
    assert_eq!(config.codec.max_payload_size, MAX_PAYLOAD_SIZE);
    assert_eq!(config.logging.output, LogOutput::Console);
}

#[test]
fn test_zero_payload_size() {
    let config = CodecConfig {
        max_payload_size: 0,
    };
    assert!(config_error(config.validate()).contains("cannot be 0"));
}

#[test]
fn test_payload_size_cannot_exceed_wire_maximum() {
    let mut config = Config::default();
    config.codec.max_payload_size = MAX_PAYLOAD_SIZE + 1;
    assert!(config_error(config.validate()).contains("exceeds the wire maximum"));
}

#[test]
fn test_tighter_payload_size_is_valid() {
    let config = CodecConfig {
        max_payload_size: 64 * 1024,
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_log_file_directory_must_exist() {
    let logging = LoggingConfig {
        output: LogOutput::File {
            path: PathBuf::from("/nonexistent-tlv-codec-dir/codec.log"),
        },
        ..LoggingConfig::default()
    };
    assert!(config_error(logging.validate()).contains("does not exist"));
}

#[test]
fn test_log_file_needs_a_name() {
    let logging = LoggingConfig {
        output: LogOutput::Both {
            path: PathBuf::from("/"),
        },
        ..LoggingConfig::default()
    };
    assert!(config_error(logging.validate()).contains("no file name"));
}

#[test]
fn test_from_toml() {
    let config = Config::from_toml(
        r#"
        [codec]
        max_payload_size = 4096

        [logging]
        level = "debug"
        format = "json"
        output = { to = "file", path = "frames.log" }
        "#,
    )
    .expect("valid TOML");

    assert_eq!(config.codec.max_payload_size, 4096);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(
        config.logging.output,
        LogOutput::File {
            path: PathBuf::from("frames.log")
        }
    );
}

#[test]
fn test_missing_sections_use_defaults() {
    let config = Config::from_toml("[logging]\nlevel = \"warn\"\n").expect("partial TOML is valid");
    assert_eq!(config.codec.max_payload_size, MAX_PAYLOAD_SIZE);
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.logging.format, LogFormat::Plain);
}

#[test]
fn test_bad_values_rejected() {
    assert!(config_error(Config::from_toml("[logging]\nlevel = \"loud\"\n")).contains("parse"));
    assert!(matches!(
        Config::from_toml("[logging]\noutput = { to = \"syslog\" }\n"),
        Err(CodecError::ConfigError(_))
    ));
    // Parsed but out of range
    assert!(config_error(Config::from_toml("[codec]\nmax_payload_size = 0\n")).contains("cannot be 0"));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("codec.toml");

    let config = Config {
        codec: CodecConfig {
            max_payload_size: 8192,
        },
        logging: LoggingConfig {
            level: LogLevel::Warn,
            format: LogFormat::Json,
            output: LogOutput::Both {
                path: dir.path().join("codec.log"),
            },
        },
    };
    config.save_to_file(&path).expect("save");

    let loaded = Config::from_file(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file() {
    let msg = config_error(Config::from_file("/nonexistent/codec.toml"));
    assert!(msg.contains("/nonexistent/codec.toml"));
}

#[test]
fn test_from_env_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log = dir.path().join("env.log");

    std::env::set_var("TLV_CODEC_MAX_PAYLOAD_SIZE", "2048");
    std::env::set_var("TLV_CODEC_LOG_LEVEL", "trace");
    std::env::set_var("TLV_CODEC_LOG_FORMAT", "json");
    std::env::set_var("TLV_CODEC_LOG_FILE", &log);

    let config = Config::from_env().expect("valid env");
    assert_eq!(config.codec.max_payload_size, 2048);
    assert_eq!(config.logging.level, LogLevel::Trace);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.output, LogOutput::File { path: log });

    std::env::set_var("TLV_CODEC_LOG_FORMAT", "xml");
    assert!(config_error(Config::from_env()).contains("TLV_CODEC_LOG_FORMAT"));
    std::env::remove_var("TLV_CODEC_LOG_FORMAT");

    std::env::set_var("TLV_CODEC_MAX_PAYLOAD_SIZE", "lots");
    assert!(config_error(Config::from_env()).contains("TLV_CODEC_MAX_PAYLOAD_SIZE"));

    std::env::set_var("TLV_CODEC_MAX_PAYLOAD_SIZE", (MAX_PAYLOAD_SIZE + 1).to_string());
    assert!(config_error(Config::from_env()).contains("exceeds the wire maximum"));

    std::env::remove_var("TLV_CODEC_MAX_PAYLOAD_SIZE");
    std::env::remove_var("TLV_CODEC_LOG_LEVEL");
    std::env::remove_var("TLV_CODEC_LOG_FILE");
}
