use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Ten years.
const MAX_LISTING_TTL_DAYS: i64 = 3_650;
/// One year.
const MAX_STALE_AFTER_HOURS: i64 = 8_760;

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_bounded = |var: &str, default: &str, max: i64| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value <= 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be greater than zero, got {value}"),
            });
        }
        if value > max {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be at most {max}, got {value}"),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("JOBSYNC_ENV", "development"))?;
    let log_level = or_default("JOBSYNC_LOG_LEVEL", "info");
    let taxonomy_path = PathBuf::from(or_default(
        "JOBSYNC_TAXONOMY_PATH",
        "./config/taxonomy.yaml",
    ));
    let state_path = PathBuf::from(or_default("JOBSYNC_STATE_PATH", "./data/state.json"));
    let listing_ttl_days = parse_bounded("JOBSYNC_LISTING_TTL_DAYS", "30", MAX_LISTING_TTL_DAYS)?;
    let stale_after_hours = parse_bounded("JOBSYNC_STALE_AFTER_HOURS", "24", MAX_STALE_AFTER_HOURS)?;

    Ok(AppConfig {
        env,
        log_level,
        taxonomy_path,
        state_path,
        listing_ttl_days,
        stale_after_hours,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JOBSYNC_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
