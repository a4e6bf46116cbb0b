#![allow(clippy::unwrap_used)]

use super::*;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.ai.model, DEFAULT_MODEL);
    assert_eq!(config.ai.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.ai.api_key(), None);
}

#[test]
fn test_parse_full_file() {
    let config = AppConfig::parse(
        r#"
log_filter = "debug"

[ai]
api_key = "secret"
model = "gemini-pro"
endpoint = "http://localhost:9999"
"#,
    )
    .unwrap();
    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.ai.api_key(), Some("secret"));
    assert_eq!(config.ai.model, "gemini-pro");
    assert_eq!(config.ai.endpoint, "http://localhost:9999");
}

#[test]
fn test_parse_partial_file_keeps_defaults() {
    let config = AppConfig::parse("[ai]\napi_key = \"k\"\n").unwrap();
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.ai.model, DEFAULT_MODEL);
    assert_eq!(config.ai.api_key(), Some("k"));
}

#[test]
fn test_parse_malformed_file_fails() {
    assert!(AppConfig::parse("log_filter = [").is_err());
    assert!(AppConfig::parse("log_filter = 5").is_err());
}

#[test]
fn test_load_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_malformed_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[ai\n").unwrap();
    let err = AppConfig::load(&path).unwrap_err();
    assert!(format!("{err}").contains("config.toml"));
}

#[test]
fn test_blank_key_counts_as_missing() {
    let config = AppConfig::parse("[ai]\napi_key = \"   \"\n").unwrap();
    assert_eq!(config.ai.api_key(), None);
}

#[test]
fn test_env_overrides_file() {
    let config = AppConfig::parse("[ai]\napi_key = \"file\"\n")
        .unwrap()
        .with_env(env(&[("FINTRACK_API_KEY", "env"), ("FINTRACK_LOG", "trace")]));
    assert_eq!(config.ai.api_key(), Some("env"));
    assert_eq!(config.log_filter, "trace");
}

#[test]
fn test_env_falls_back_to_generic_key() {
    let config = AppConfig::default().with_env(env(&[("API_KEY", "generic")]));
    assert_eq!(config.ai.api_key(), Some("generic"));

    let config = AppConfig::default()
        .with_env(env(&[("API_KEY", "generic"), ("FINTRACK_API_KEY", "specific")]));
    assert_eq!(config.ai.api_key(), Some("specific"));
}

#[test]
fn test_blank_env_is_ignored() {
    let config = AppConfig::parse("[ai]\napi_key = \"file\"\n")
        .unwrap()
        .with_env(env(&[("FINTRACK_API_KEY", ""), ("FINTRACK_LOG", " ")]));
    assert_eq!(config.ai.api_key(), Some("file"));
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_paths_layout() {
    let paths = AppPaths {
        data_dir: "/data".into(),
        config_dir: "/conf".into(),
    };
    assert_eq!(paths.db_path(), std::path::Path::new("/data/fintrack.db"));
    assert_eq!(paths.log_path(), std::path::Path::new("/data/fintrack.log"));
    assert_eq!(paths.config_path(), std::path::Path::new("/conf/config.toml"));
}
