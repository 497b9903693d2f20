//! Appwrite Environment Resolution
//!
//! Reads the endpoint, project id and API key the backend clients need. Each
//! value has an ordered list of variable names; the first non-empty one wins.
//! Nothing here fails: an unset value resolves to an empty string, which the
//! client factory reads as "unconfigured".

use serde::Serialize;
use std::fmt;

/// Variables consulted for the Appwrite endpoint, in priority order.
pub const ENDPOINT_VARS: &[&str] = &[
    "NEXT_PUBLIC_APPWRITE_ENDPOINT",
    "APPWRITE_ENDPOINT",
    "NEXT_PUBLIC_APPWRITE_URL",
];

/// Variables consulted for the Appwrite project id, in priority order.
pub const PROJECT_ID_VARS: &[&str] = &["NEXT_PUBLIC_APPWRITE_PROJECT_ID", "APPWRITE_PROJECT_ID"];

/// Variables consulted for the server API key.
pub const API_KEY_VARS: &[&str] = &["APPWRITE_API_KEY"];

/// Connection settings for the Appwrite backend, resolved once at startup.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppwriteEnv {
    pub endpoint: String,
    pub project_id: String,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl AppwriteEnv {
    /// True when no endpoint was found; the factory will not try the SDK.
    pub fn is_unconfigured(&self) -> bool {
        self.endpoint.is_empty()
    }
}

// The API key must never end up in logs.
impl fmt::Debug for AppwriteEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppwriteEnv")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field(
                "api_key",
                &if self.api_key.is_empty() { "" } else { "<redacted>" },
            )
            .finish()
    }
}

/// Resolves the Appwrite settings from the process environment.
pub fn resolve() -> AppwriteEnv {
    resolve_with(|name| std::env::var(name).ok())
}

/// Resolves the Appwrite settings through an arbitrary variable lookup.
pub fn resolve_with<F>(lookup: F) -> AppwriteEnv
where
    F: Fn(&str) -> Option<String>,
{
    AppwriteEnv {
        endpoint: first_non_empty(&lookup, ENDPOINT_VARS),
        project_id: first_non_empty(&lookup, PROJECT_ID_VARS),
        api_key: first_non_empty(&lookup, API_KEY_VARS),
    }
}

fn first_non_empty<F>(lookup: &F, names: &[&str]) -> String
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Whether the process runs as a production deployment.
///
/// Outside production the client factory logs why it fell back to stubs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    /// Reads `APP_ENV`, then `NODE_ENV`. Anything but `production` is development.
    pub fn from_env() -> Self {
        let value = ["APP_ENV", "NODE_ENV"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        Self::parse(&value)
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeMode::Production
    }
}
