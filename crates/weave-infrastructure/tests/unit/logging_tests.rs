//! Logging Tests

use tempfile::TempDir;
use tracing::Level;
use weave_infrastructure::constants::{DEFAULT_LOG_LEVEL, LOG_MAX_FILES};
use weave_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
    assert_eq!(config.max_files, LOG_MAX_FILES);
}

#[test]
fn test_init_logging_tolerates_repeat_calls() {
    let dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        json_format: true,
        file_output: Some(dir.path().join("runtime.log")),
        ..LoggingConfig::default()
    };

    init_logging(config.clone()).unwrap();
    init_logging(config).unwrap();
}

#[test]
fn test_init_logging_rejects_unknown_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(config).is_err());
}
