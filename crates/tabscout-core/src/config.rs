use chrono::NaiveDate;

use crate::app_config::{AppConfig, NewsWindow};
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
/// Every variable has a default, so the only failures are unparseable values.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let agent_url = or_default("TABSCOUT_AGENT_URL", "http://localhost:5001");
    let stock_backend_url = or_default("TABSCOUT_STOCK_BACKEND_URL", "http://localhost:5000");
    let gemini_base_url = or_default(
        "TABSCOUT_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let gemini_model = or_default("TABSCOUT_GEMINI_MODEL", "gemini-2.0-flash");
    let news_window = parse_news_month(&or_default("TABSCOUT_NEWS_MONTH", "2021-08"))?;

    let request_timeout_secs = parse_u64("TABSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let poll_interval_ms = parse_u64("TABSCOUT_POLL_INTERVAL_MS", "1000")?;
    let poll_max_attempts = parse_u32("TABSCOUT_POLL_MAX_ATTEMPTS", "120")?;
    if poll_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TABSCOUT_POLL_MAX_ATTEMPTS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("TABSCOUT_USER_AGENT", "tabscout/0.1 (page-embeddings)");
    let log_level = or_default("TABSCOUT_LOG_LEVEL", "info");

    Ok(AppConfig {
        agent_url,
        stock_backend_url,
        gemini_base_url,
        gemini_model,
        news_window,
        request_timeout_secs,
        poll_interval_ms,
        poll_max_attempts,
        user_agent,
        log_level,
    })
}

/// Parse a `YYYY-MM` month into a [`NewsWindow`].
fn parse_news_month(raw: &str) -> Result<NewsWindow, ConfigError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map(|month_start| NewsWindow { month_start })
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "TABSCOUT_NEWS_MONTH".to_string(),
            reason: format!("expected YYYY-MM, got '{raw}': {e}"),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
