use pretty_assertions::assert_eq;
use std::collections::HashMap;
use varest_receiver::{Error, config::Config};

const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 7001
  max_body_bytes: 4096
  logs:
    level: "debug"
    file: "logs/receiver.log"
"#;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_full_config_parses() {
    let config = Config::from_yaml(SAMPLE_CONFIG_YAML).unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 7001);
    assert_eq!(config.server.max_body_bytes, 4096);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.server.logs.file.as_deref(), Some("logs/receiver.log"));
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
    assert_eq!(config.server.logs.level, "info");
    assert_eq!(
        config.server.logs.file.as_deref(),
        Some("varest_receiver.log")
    );
}

#[test]
fn test_empty_document_is_default() {
    let config = Config::from_yaml("  \n").unwrap();
    assert_eq!(config.server.port, 6000);
}

#[test]
fn test_null_log_file_disables_file_sink() {
    let config = Config::from_yaml("server:\n  logs:\n    file: null\n").unwrap();
    assert_eq!(config.server.logs.file, None);
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let result = Config::from_yaml("server:\n  port: \"not-a-number\"\n");
    assert!(matches!(result, Err(Error::Yaml(_))));
}

#[test]
fn test_env_overrides_file_values() {
    let mut config = Config::from_yaml(SAMPLE_CONFIG_YAML).unwrap();

    config
        .apply_overrides(env_from(&[
            ("PORT", "8123"),
            ("HOST", "0.0.0.0"),
            ("LOG_FILE", "/var/log/receiver.log"),
        ]))
        .unwrap();

    assert_eq!(config.server.port, 8123);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(
        config.server.logs.file.as_deref(),
        Some("/var/log/receiver.log")
    );
}

#[test]
fn test_empty_log_file_override_disables_file_sink() {
    let mut config = Config::default();
    config.apply_overrides(env_from(&[("LOG_FILE", "")])).unwrap();
    assert_eq!(config.server.logs.file, None);
}

#[test]
fn test_no_overrides_keeps_values() {
    let mut config = Config::from_yaml(SAMPLE_CONFIG_YAML).unwrap();
    config.apply_overrides(env_from(&[])).unwrap();
    assert_eq!(config.server.port, 7001);
}

#[test]
fn test_invalid_port_override_is_config_error() {
    let mut config = Config::default();

    let err = config
        .apply_overrides(env_from(&[("PORT", "sixty-thousand")]))
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid PORT value: 'sixty-thousand'"
    );
}
