//! Backend Records
//!
//! Shapes of the documents and files returned by the Appwrite REST API. System
//! attributes are `$`-prefixed; everything else lands in `data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Document {
    /// A user attribute as a string, if present and a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn attachment_id(&self) -> Option<&str> {
        self.str_field("attachmentId")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DocumentList {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Metadata of a stored file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileInfo {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "bucketId")]
    pub bucket_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    pub size_original: u64,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Error body returned by Appwrite on failed requests.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: String,
}
