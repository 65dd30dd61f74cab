use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("ADLENS_ENV", "development"))?;
    let log_level = or_default("ADLENS_LOG_LEVEL", env.default_log_level());
    let output_dir = PathBuf::from(or_default("ADLENS_OUTPUT_DIR", "./reports"));
    let mapping_path = PathBuf::from(or_default(
        "ADLENS_MAPPING_PATH",
        "./config/mapping.yaml",
    ));
    let currency_symbol = or_default("ADLENS_CURRENCY_SYMBOL", "¥");

    if log_level.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADLENS_LOG_LEVEL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        output_dir,
        mapping_path,
        currency_symbol,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADLENS_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
