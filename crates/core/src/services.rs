//! Backend Service Contracts
//!
//! The traits the rest of the application talks to. A live SDK implements
//! them over HTTP; stub handles implement them by failing with
//! [`ServiceError::Unavailable`].

use crate::{
    error::{SdkError, ServiceError, ServiceName},
    models::{DocumentList, FileInfo},
    query::Query,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Query-oriented record storage, addressed by database id and collection id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists the documents of a collection matching `queries`.
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, ServiceError>;
}

/// Binary object storage organised in buckets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the metadata of a stored file.
    async fn get_file(&self, bucket_id: &str, file_id: &str) -> Result<FileInfo, ServiceError>;

    /// Builds the public preview URL of a file. No request is made.
    fn preview_url(&self, bucket_id: &str, file_id: &str) -> Result<String, ServiceError>;
}

/// Outcome of applying one setting to a base client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Setting {
    Applied,
    Unsupported,
}

/// The SDK's base client, from which service clients are derived.
///
/// Settings default to [`Setting::Unsupported`] so an SDK only implements what
/// it actually exposes; the factory skips the rest.
#[cfg_attr(test, mockall::automock)]
pub trait BaseClient: Send + Sync {
    fn set_endpoint(&mut self, _endpoint: &str) -> Setting {
        Setting::Unsupported
    }

    fn set_project(&mut self, _project_id: &str) -> Setting {
        Setting::Unsupported
    }

    fn set_key(&mut self, _api_key: &str) -> Setting {
        Setting::Unsupported
    }

    fn databases(&self) -> Result<Arc<dyn DocumentStore>, SdkError> {
        Err(SdkError::Missing(ServiceName::Databases))
    }

    fn storage(&self) -> Result<Arc<dyn ObjectStore>, SdkError> {
        Err(SdkError::Missing(ServiceName::Storage))
    }
}

/// An SDK able to produce base clients.
#[cfg_attr(test, mockall::automock)]
pub trait Sdk: Send + Sync {
    fn name(&self) -> &'static str;

    fn new_client(&self) -> Result<Box<dyn BaseClient>, SdkError>;
}
