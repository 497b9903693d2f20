//! Appwrite REST SDK
//!
//! A thin `reqwest` implementation of the backend contracts against the
//! Appwrite HTTP API. Compiled only with the `appwrite` feature.

use crate::{
    error::{SdkError, ServiceError, ServiceName},
    models::{ApiErrorBody, DocumentList, FileInfo},
    query::Query,
    services::{BaseClient, DocumentStore, ObjectStore, Sdk, Setting},
    urls::preview_url,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const RESPONSE_FORMAT_HEADER: &str = "X-Appwrite-Response-Format";
const RESPONSE_FORMAT: &str = "1.5.0";

/// Produces [`AppwriteClient`]s.
#[derive(Clone, Debug)]
pub struct AppwriteSdk {
    pub timeout: Duration,
}

impl Default for AppwriteSdk {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl Sdk for AppwriteSdk {
    fn name(&self) -> &'static str {
        "appwrite-rest"
    }

    fn new_client(&self) -> Result<Box<dyn BaseClient>, SdkError> {
        Ok(Box::new(AppwriteClient::new(self.timeout)?))
    }
}

/// The configurable base client. Service clients copy its settings when
/// they are created.
pub struct AppwriteClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    pub fn new(timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("askwell/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SdkError::construction(ServiceName::Client, e))?;
        Ok(Self {
            http,
            endpoint: String::new(),
            project_id: String::new(),
            api_key: None,
        })
    }

    fn connection(&self, service: ServiceName) -> Result<Connection, SdkError> {
        let base = Url::parse(&self.endpoint)
            .map_err(|e| SdkError::construction(service, format!("invalid endpoint: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(SdkError::construction(
                service,
                format!("endpoint '{}' is not an http(s) URL", self.endpoint),
            ));
        }
        Ok(Connection {
            http: self.http.clone(),
            base,
            project_id: self.project_id.clone(),
            api_key: self.api_key.clone(),
        })
    }
}

impl BaseClient for AppwriteClient {
    fn set_endpoint(&mut self, endpoint: &str) -> Setting {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        Setting::Applied
    }

    fn set_project(&mut self, project_id: &str) -> Setting {
        self.project_id = project_id.to_string();
        Setting::Applied
    }

    fn set_key(&mut self, api_key: &str) -> Setting {
        self.api_key = Some(api_key.to_string());
        Setting::Applied
    }

    fn databases(&self) -> Result<Arc<dyn DocumentStore>, SdkError> {
        Ok(Arc::new(AppwriteDatabases {
            conn: self.connection(ServiceName::Databases)?,
        }))
    }

    fn storage(&self) -> Result<Arc<dyn ObjectStore>, SdkError> {
        Ok(Arc::new(AppwriteStorage {
            conn: self.connection(ServiceName::Storage)?,
        }))
    }
}

#[derive(Clone)]
struct Connection {
    http: reqwest::Client,
    base: Url,
    project_id: String,
    api_key: Option<String>,
}

impl Connection {
    fn get(&self, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        let mut request = self
            .http
            .get(url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT);
        if let Some(key) = &self.api_key {
            request = request.header(KEY_HEADER, key);
        }
        request
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            debug!(status = status.as_u16(), %message, "Appwrite request failed");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Document-store client over `/databases`.
pub struct AppwriteDatabases {
    conn: Connection,
}

#[async_trait]
impl DocumentStore for AppwriteDatabases {
    #[instrument(skip(self, queries), fields(queries = queries.len()))]
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, ServiceError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_param()))
            .collect();
        let request = self
            .conn
            .get(&[
                "databases",
                database_id,
                "collections",
                collection_id,
                "documents",
            ])
            .query(&params);
        self.conn.send(request).await
    }
}

/// Object-store client over `/storage`.
pub struct AppwriteStorage {
    conn: Connection,
}

#[async_trait]
impl ObjectStore for AppwriteStorage {
    #[instrument(skip(self))]
    async fn get_file(&self, bucket_id: &str, file_id: &str) -> Result<FileInfo, ServiceError> {
        let request = self
            .conn
            .get(&["storage", "buckets", bucket_id, "files", file_id]);
        self.conn.send(request).await
    }

    fn preview_url(&self, bucket_id: &str, file_id: &str) -> Result<String, ServiceError> {
        Ok(preview_url(
            self.conn.base.as_str().trim_end_matches('/'),
            bucket_id,
            file_id,
            &self.conn.project_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn client_for(endpoint: &str, key: Option<&str>) -> AppwriteClient {
        let mut client = AppwriteClient::new(Duration::from_secs(5)).unwrap();
        client.set_endpoint(endpoint);
        client.set_project("proj1");
        if let Some(key) = key {
            client.set_key(key);
        }
        client
    }

    #[tokio::test]
    async fn test_list_documents_sends_queries_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/databases/main/collections/questions/documents"))
            .and(header("X-Appwrite-Project", "proj1"))
            .and(header("X-Appwrite-Key", "secret"))
            .and(query_param(
                "queries[]",
                r#"{"attribute":"$createdAt","method":"orderDesc"}"#,
            ))
            .and(query_param("queries[]", r#"{"method":"limit","values":[15]}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "documents": [{
                    "$id": "abc123",
                    "$createdAt": "2024-03-01T12:00:00.000+00:00",
                    "title": "How do I center a div?",
                    "attachmentId": "att9"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/v1", server.uri()), Some("secret"));
        let databases = client.databases().unwrap();
        let list = databases
            .list_documents(
                "main",
                "questions",
                &[Query::order_desc("$createdAt"), Query::limit(15)],
            )
            .await
            .unwrap();

        assert_eq!(list.total, 1);
        assert_eq!(list.documents[0].id, "abc123");
        assert_eq!(list.documents[0].attachment_id(), Some("att9"));
    }

    #[tokio::test]
    async fn test_api_error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/databases/main/collections/missing/documents"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Collection with the requested ID could not be found.",
                "code": 404,
                "type": "collection_not_found"
            })))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/v1/", server.uri()), None);
        let err = client
            .databases()
            .unwrap()
            .list_documents("main", "missing", &[])
            .await
            .unwrap_err();

        match err {
            ServiceError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("could not be found"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_file_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/storage/buckets/bucket1/files/att9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "$id": "att9",
                "bucketId": "bucket1",
                "name": "div.png",
                "mimeType": "image/png",
                "sizeOriginal": 2048
            })))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/v1", server.uri()), None);
        let file = client
            .storage()
            .unwrap()
            .get_file("bucket1", "att9")
            .await
            .unwrap();
        assert_eq!(file.name, "div.png");
        assert_eq!(file.size_original, 2048);
    }

    #[test]
    fn test_storage_preview_url() {
        let client = client_for("https://cdn.example.com/v1/", None);
        let url = client
            .storage()
            .unwrap()
            .preview_url("bucket1", "att9")
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.example.com/v1/storage/buckets/bucket1/files/att9/preview?project=proj1"
        );
    }

    #[test]
    fn test_invalid_endpoint_fails_service_construction() {
        let client = client_for("not a url", None);
        assert!(matches!(
            client.databases().err(),
            Some(SdkError::Construction {
                service: ServiceName::Databases,
                ..
            })
        ));
        assert!(client.storage().is_err());
    }

    #[test]
    fn test_sdk_builds_unconfigured_client() {
        let sdk = AppwriteSdk::default();
        assert_eq!(sdk.name(), "appwrite-rest");
        assert!(sdk.new_client().is_ok());
    }
}
