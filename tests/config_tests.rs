use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use voxcart::config::{AppConfig, ConfigError};

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.llm.base_url, "http://localhost:8080");
    assert_eq!(config.llm.timeout_ms, 5_000);
    assert_eq!(config.recovery.failure_threshold, 3);
    assert_eq!(config.recovery.resume_delay(), Duration::from_millis(1_000));
    assert_eq!(config.recovery.restart_delay(), Duration::from_millis(2_000));
    assert_eq!(config.recovery.action_log_capacity, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AppConfig::from_toml_str(
        r#"
        [llm]
        base_url = "http://gpu-box:9000"

        [recovery]
        restart_delay_ms = 500
        "#,
    )
    .expect("valid toml");

    assert_eq!(config.llm.base_url, "http://gpu-box:9000");
    assert_eq!(config.llm.timeout_ms, 5_000);
    assert_eq!(config.recovery.restart_delay_ms, 500);
    assert_eq!(config.recovery.failure_threshold, 3);
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("VOXCART_LLM_URL", "http://other:8081"),
        ("VOXCART_LLM_API_KEY", "secret"),
        ("VOXCART_FAILURE_THRESHOLD", "5"),
        ("VOXCART_LOG", "  "),
    ]);
    let mut config = AppConfig::default();

    config
        .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
        .expect("overrides apply");

    assert_eq!(config.llm.base_url, "http://other:8081");
    assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
    assert_eq!(config.recovery.failure_threshold, 5);
    assert_eq!(config.logging.filter, "info", "Blank override is ignored");
}

#[test]
fn test_bad_env_override_is_rejected() {
    let mut config = AppConfig::default();
    let result = config.apply_env_overrides(|key| (key == "VOXCART_FAILURE_THRESHOLD").then(|| "three".to_string()));
    assert!(matches!(result, Err(ConfigError::InvalidEnvOverride { .. })));
}

#[test]
fn test_validation() {
    let mut config = AppConfig::default();
    config.recovery.failure_threshold = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let mut config = AppConfig::default();
    config.llm.base_url = " ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[logging]\nfilter = \"voxcart=debug\"").expect("write config");

    let config = AppConfig::from_file(file.path()).expect("config loads");
    assert_eq!(config.logging.filter, "voxcart=debug");

    let mut broken = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(broken, "[recovery\nfailure_threshold = ").expect("write config");
    assert!(matches!(AppConfig::from_file(broken.path()), Err(ConfigError::ParseFile { .. })));

    let missing = AppConfig::from_file(std::path::Path::new("/definitely/not/here.toml"));
    assert!(matches!(missing, Err(ConfigError::ReadFile { .. })));
}
