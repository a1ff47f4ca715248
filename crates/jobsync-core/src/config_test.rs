use std::collections::HashMap;
use std::env::VarError;

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
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "JOBSYNC_ENV"));
}

#[test]
fn build_app_config_uses_defaults_when_env_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.taxonomy_path.to_str(), Some("./config/taxonomy.yaml"));
    assert_eq!(cfg.state_path.to_str(), Some("./data/state.json"));
    assert_eq!(cfg.listing_ttl_days, 30);
    assert_eq!(cfg.stale_after_hours, 24);
    assert_eq!(cfg.listing_ttl(), chrono::Duration::days(30));
    assert_eq!(cfg.stale_after(), chrono::Duration::hours(24));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("JOBSYNC_ENV", "production");
    map.insert("JOBSYNC_LOG_LEVEL", "debug");
    map.insert("JOBSYNC_STATE_PATH", "/var/lib/jobsync/state.json");
    map.insert("JOBSYNC_LISTING_TTL_DAYS", "14");
    map.insert("JOBSYNC_STALE_AFTER_HOURS", "48");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.state_path.to_str(), Some("/var/lib/jobsync/state.json"));
    assert_eq!(cfg.listing_ttl_days, 14);
    assert_eq!(cfg.stale_after_hours, 48);
}

#[test]
fn build_app_config_rejects_non_numeric_ttl() {
    let mut map = HashMap::new();
    map.insert("JOBSYNC_LISTING_TTL_DAYS", "a month");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSYNC_LISTING_TTL_DAYS"),
        "expected InvalidEnvVar(JOBSYNC_LISTING_TTL_DAYS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_stale_window() {
    let mut map = HashMap::new();
    map.insert("JOBSYNC_STALE_AFTER_HOURS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "JOBSYNC_STALE_AFTER_HOURS" && reason.contains("greater than zero")),
        "expected InvalidEnvVar(JOBSYNC_STALE_AFTER_HOURS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_stale_window_beyond_a_year() {
    let mut map = HashMap::new();
    map.insert("JOBSYNC_STALE_AFTER_HOURS", "9999999999999");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "JOBSYNC_STALE_AFTER_HOURS" && reason.contains("at most 8760")),
        "expected InvalidEnvVar(JOBSYNC_STALE_AFTER_HOURS), got: {result:?}"
    );
}

#[test]
fn build_app_config_bounds_listing_ttl() {
    let mut map = HashMap::new();
    map.insert("JOBSYNC_LISTING_TTL_DAYS", "3651");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSYNC_LISTING_TTL_DAYS"),
        "expected InvalidEnvVar(JOBSYNC_LISTING_TTL_DAYS), got: {result:?}"
    );

    map.insert("JOBSYNC_LISTING_TTL_DAYS", "3650");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.listing_ttl(), chrono::Duration::days(3650));
}
