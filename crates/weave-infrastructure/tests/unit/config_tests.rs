//! Configuration Tests

use figment::Jail;
use tempfile::TempDir;
use weave_domain::constants::{DEFAULT_BRIDGE_TIMEOUT_MS, DEFAULT_MAX_RESOLUTION_DEPTH};
use weave_infrastructure::config::loader::validate_runtime_config;
use weave_infrastructure::config::{ConfigLoader, RuntimeConfig};

#[test]
fn test_defaults_are_valid() {
    let config = RuntimeConfig::default();
    validate_runtime_config(&config).unwrap();

    assert!(config.detector.detection_enabled);
    assert!(!config.detector.auto_record_edges);
    assert_eq!(config.detector.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
    assert_eq!(config.scheduler.bridge_timeout_ms, DEFAULT_BRIDGE_TIMEOUT_MS);
    assert!(!config.registry.reject_overrides);
}

#[test]
fn test_validation_rejects_zero_limits() {
    let mut config = RuntimeConfig::default();
    config.scheduler.bridge_timeout_ms = 0;
    assert!(validate_runtime_config(&config).is_err());

    let mut config = RuntimeConfig::default();
    config.detector.max_resolution_depth = 0;
    assert!(validate_runtime_config(&config).is_err());

    let mut config = RuntimeConfig::default();
    config.optimizer.frequent_threshold = 0;
    assert!(validate_runtime_config(&config).is_err());

    let mut config = RuntimeConfig::default();
    config.logging.level = "chatty".to_string();
    assert!(validate_runtime_config(&config).is_err());
}

// Every test that calls `load` runs inside a Jail: the jail lock keeps
// environment mutations of one test out of the others.

#[test]
fn test_save_then_load() {
    Jail::expect_with(|_jail| {
        let temp_dir = TempDir::new().expect("temp dir");
        let config_path = temp_dir.path().join("saved.toml");

        let mut original = RuntimeConfig::default();
        original.detector.auto_record_edges = true;
        original.optimizer.top_n = 3;

        let loader = ConfigLoader::new().with_config_path(&config_path);
        loader
            .save_to_file(&original, &config_path)
            .expect("config saves");
        let loaded = loader.load().expect("config loads");

        assert!(loaded.detector.auto_record_edges);
        assert_eq!(loaded.optimizer.top_n, 3);
        Ok(())
    });
}

#[test]
fn test_toml_file_then_env_override() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "weave.toml",
            r#"
            [detector]
            auto_record_edges = true
            max_resolution_depth = 16

            [scheduler]
            bridge_timeout_ms = 250
            "#,
        )?;
        jail.set_env("WEAVE_SCHEDULER__BRIDGE_TIMEOUT_MS", "900");

        let config = ConfigLoader::new().load().expect("config loads");
        assert!(config.detector.auto_record_edges);
        assert_eq!(config.detector.max_resolution_depth, 16);
        assert_eq!(config.scheduler.bridge_timeout_ms, 900);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_REGISTRY__REJECT_OVERRIDES", "true");

        let config = ConfigLoader::new()
            .with_env_prefix("APP")
            .load()
            .expect("config loads");
        assert!(config.registry.reject_overrides);
        Ok(())
    });
}

#[test]
fn test_invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("WEAVE_OPTIMIZER__FREQUENT_THRESHOLD", "0");
        assert!(ConfigLoader::new().load().is_err());
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        let config = ConfigLoader::new()
            .with_config_path(jail.directory().join("absent.toml"))
            .load()
            .expect("config loads");
        assert_eq!(
            config.detector.max_resolution_depth,
            DEFAULT_MAX_RESOLUTION_DEPTH
        );
        Ok(())
    });
}
