use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ADLENS_ENV"));
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.output_dir, Path::new("./reports"));
    assert_eq!(cfg.mapping_path, Path::new("./config/mapping.yaml"));
    assert_eq!(cfg.currency_symbol, "¥");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("ADLENS_ENV", "production");
    map.insert("ADLENS_LOG_LEVEL", "debug");
    map.insert("ADLENS_OUTPUT_DIR", "/tmp/out");
    map.insert("ADLENS_MAPPING_PATH", "/etc/adlens/mapping.yaml");
    map.insert("ADLENS_CURRENCY_SYMBOL", "$");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.output_dir, Path::new("/tmp/out"));
    assert_eq!(cfg.mapping_path, Path::new("/etc/adlens/mapping.yaml"));
    assert_eq!(cfg.currency_symbol, "$");
}

#[test]
fn build_app_config_log_level_defaults_follow_env() {
    for (env, expected) in [("development", "debug"), ("test", "warn"), ("production", "info")] {
        let mut map = HashMap::new();
        map.insert("ADLENS_ENV", env);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, expected, "default log level for {env}");
    }
}

#[test]
fn build_app_config_explicit_log_level_overrides_env_default() {
    let mut map = HashMap::new();
    map.insert("ADLENS_ENV", "test");
    map.insert("ADLENS_LOG_LEVEL", "trace");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "trace");
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = HashMap::new();
    map.insert("ADLENS_ENV", "qa");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADLENS_ENV"),
        "expected InvalidEnvVar(ADLENS_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_blank_log_level() {
    let mut map = HashMap::new();
    map.insert("ADLENS_LOG_LEVEL", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADLENS_LOG_LEVEL"),
        "expected InvalidEnvVar(ADLENS_LOG_LEVEL), got: {result:?}"
    );
}
