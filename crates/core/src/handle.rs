//! Live-or-Stub Client Handles
//!
//! A [`ClientHandle`] is decided once at startup. A stub never turns live;
//! every call on it fails with an unavailable error naming its service, while
//! inspecting it (`is_stub`, `Debug`, `status`) always succeeds.

use crate::{
    error::{ServiceError, ServiceName},
    models::{DocumentList, FileInfo},
    query::Query,
    services::{BaseClient, DocumentStore, ObjectStore},
};
use async_trait::async_trait;
use serde::Serialize;
use std::{fmt, sync::Arc};

pub enum ClientHandle<T: ?Sized> {
    Live(Arc<T>),
    Stub(ServiceName),
}

pub type ClientRef = ClientHandle<dyn BaseClient>;
pub type DatabasesRef = ClientHandle<dyn DocumentStore>;
pub type StorageRef = ClientHandle<dyn ObjectStore>;

/// The base client a stubbed `client` handle stands for. Every setting is
/// accepted and reported as unsupported, so configuring it never fails, and
/// it hands out no service clients.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubClient;

impl BaseClient for StubClient {}

/// Whether a handle is backed by a real client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleStatus {
    Live,
    Stub,
}

impl<T: ?Sized> ClientHandle<T> {
    pub fn is_stub(&self) -> bool {
        matches!(self, ClientHandle::Stub(_))
    }

    pub fn is_live(&self) -> bool {
        !self.is_stub()
    }

    pub fn status(&self) -> HandleStatus {
        match self {
            ClientHandle::Live(_) => HandleStatus::Live,
            ClientHandle::Stub(_) => HandleStatus::Stub,
        }
    }

    /// The live client, or the unavailable error a stub reports on use.
    pub fn dispatch(&self) -> Result<&T, ServiceError> {
        match self {
            ClientHandle::Live(inner) => Ok(inner.as_ref()),
            ClientHandle::Stub(service) => Err(ServiceError::unavailable(*service)),
        }
    }
}

impl<T: ?Sized> Clone for ClientHandle<T> {
    fn clone(&self) -> Self {
        match self {
            ClientHandle::Live(inner) => ClientHandle::Live(Arc::clone(inner)),
            ClientHandle::Stub(service) => ClientHandle::Stub(*service),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ClientHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientHandle::Live(_) => write!(f, "Live(..)"),
            ClientHandle::Stub(service) => write!(f, "Stub({})", service),
        }
    }
}

#[async_trait]
impl DocumentStore for ClientHandle<dyn DocumentStore> {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, ServiceError> {
        self.dispatch()?
            .list_documents(database_id, collection_id, queries)
            .await
    }
}

#[async_trait]
impl ObjectStore for ClientHandle<dyn ObjectStore> {
    async fn get_file(&self, bucket_id: &str, file_id: &str) -> Result<FileInfo, ServiceError> {
        self.dispatch()?.get_file(bucket_id, file_id).await
    }

    fn preview_url(&self, bucket_id: &str, file_id: &str) -> Result<String, ServiceError> {
        self.dispatch()?.preview_url(bucket_id, file_id)
    }
}
