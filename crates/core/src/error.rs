use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Hint attached to every unavailable-service error.
pub const REMEDIATION_HINT: &str = "Enable the `appwrite` feature and set the Appwrite env vars (e.g. NEXT_PUBLIC_APPWRITE_ENDPOINT).";

/// The backend services a handle can stand for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Client,
    Databases,
    Storage,
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceName::Client => write!(f, "client"),
            ServiceName::Databases => write!(f, "databases"),
            ServiceName::Storage => write!(f, "storage"),
        }
    }
}

/// Errors surfaced to callers of a document or object store.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Appwrite service \"{service}\" is not available. {hint}")]
    Unavailable {
        service: ServiceName,
        hint: &'static str,
    },

    #[cfg(feature = "appwrite")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Appwrite returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn unavailable(service: ServiceName) -> Self {
        ServiceError::Unavailable {
            service,
            hint: REMEDIATION_HINT,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ServiceError::Unavailable { .. })
    }
}

/// Failures while constructing clients. The factory turns these into stubs.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("SDK does not provide the {0} service")]
    Missing(ServiceName),

    #[error("Failed to construct {service}: {reason}")]
    Construction {
        service: ServiceName,
        reason: String,
    },
}

impl SdkError {
    pub fn construction(service: ServiceName, reason: impl ToString) -> Self {
        SdkError::Construction {
            service,
            reason: reason.to_string(),
        }
    }
}
