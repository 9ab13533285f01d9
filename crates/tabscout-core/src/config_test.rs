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
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.agent_url, "http://localhost:5001");
    assert_eq!(cfg.stock_backend_url, "http://localhost:5000");
    assert_eq!(
        cfg.gemini_base_url,
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(cfg.gemini_model, "gemini-2.0-flash");
    assert_eq!(cfg.news_window.label(), "August 2021");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.poll_interval_ms, 1000);
    assert_eq!(cfg.poll_max_attempts, 120);
    assert_eq!(cfg.user_agent, "tabscout/0.1 (page-embeddings)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("TABSCOUT_AGENT_URL", "http://agent.local:9000");
    map.insert("TABSCOUT_GEMINI_MODEL", "gemini-1.5-pro");
    map.insert("TABSCOUT_NEWS_MONTH", "2024-03");
    map.insert("TABSCOUT_POLL_INTERVAL_MS", "250");
    map.insert("TABSCOUT_POLL_MAX_ATTEMPTS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.agent_url, "http://agent.local:9000");
    assert_eq!(cfg.gemini_model, "gemini-1.5-pro");
    assert_eq!(cfg.news_window.label(), "March 2024");
    assert_eq!(cfg.poll_interval_ms, 250);
    assert_eq!(cfg.poll_max_attempts, 10);
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("TABSCOUT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TABSCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TABSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_poll_attempts() {
    let mut map = HashMap::new();
    map.insert("TABSCOUT_POLL_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TABSCOUT_POLL_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(TABSCOUT_POLL_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_malformed_news_month() {
    let mut map = HashMap::new();
    map.insert("TABSCOUT_NEWS_MONTH", "August 2021");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TABSCOUT_NEWS_MONTH"),
        "expected InvalidEnvVar(TABSCOUT_NEWS_MONTH), got: {result:?}"
    );
}

#[test]
fn parse_news_month_trims_whitespace() {
    let window = parse_news_month(" 2022-11 ").unwrap();
    assert_eq!(window.label(), "November 2022");
}
