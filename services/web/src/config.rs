use askwell_core::{AppwriteEnv, RuntimeMode, env as appwrite_env};
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Default ids of the question collection and its attachment bucket.
pub const DEFAULT_DATABASE_ID: &str = "main-stackflow";
pub const DEFAULT_QUESTION_COLLECTION_ID: &str = "questions";
pub const DEFAULT_QUESTION_ATTACHMENT_BUCKET_ID: &str = "question-attachment";

/// Holds all configuration loaded from the environment at startup.
///
/// Missing Appwrite settings are not an error here; the client factory
/// degrades to stubs instead.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub mode: RuntimeMode,
    pub appwrite: AppwriteEnv,
    pub database_id: String,
    pub question_collection_id: String,
    pub question_attachment_bucket_id: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            log_level,
            mode: RuntimeMode::from_env(),
            appwrite: appwrite_env::resolve(),
            database_id: var_or("APPWRITE_DATABASE_ID", DEFAULT_DATABASE_ID),
            question_collection_id: var_or(
                "APPWRITE_QUESTION_COLLECTION_ID",
                DEFAULT_QUESTION_COLLECTION_ID,
            ),
            question_attachment_bucket_id: var_or(
                "APPWRITE_QUESTION_ATTACHMENT_BUCKET_ID",
                DEFAULT_QUESTION_ATTACHMENT_BUCKET_ID,
            ),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
