//! Shared configuration and rendering helpers for the tabscout clients.

pub mod app_config;
pub mod config;
pub mod html;

pub use app_config::{AppConfig, NewsWindow};
pub use config::{load_app_config, load_app_config_from_env};
pub use html::escape_html;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
