//! API Models
//!
//! Response bodies of the JSON endpoints, annotated for OpenAPI generation
//! with `utoipa`.

use askwell_core::{ClientsStatus, HandleStatus, QuestionSummary};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct QuestionSummaryResponse {
    #[schema(example = "How do I center a div?")]
    pub title: String,
    #[schema(example = "/questions/abc123/how-do-i-center-a-div")]
    pub link: String,
    #[schema(
        example = "https://cdn.example.com/v1/storage/buckets/question-attachment/files/att9/preview?project=proj1"
    )]
    pub thumbnail: String,
}

impl From<QuestionSummary> for QuestionSummaryResponse {
    fn from(summary: QuestionSummary) -> Self {
        Self {
            title: summary.title,
            link: summary.link,
            thumbnail: summary.thumbnail,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    /// `ok` when every backend handle is live, `degraded` otherwise.
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "live")]
    pub client: String,
    #[schema(example = "live")]
    pub databases: String,
    #[schema(example = "stub")]
    pub storage: String,
}

impl From<ClientsStatus> for HealthResponse {
    fn from(status: ClientsStatus) -> Self {
        let all_live = [status.client, status.databases, status.storage]
            .iter()
            .all(|s| *s == HandleStatus::Live);
        Self {
            status: if all_live { "ok" } else { "degraded" }.to_string(),
            client: label(status.client),
            databases: label(status.databases),
            storage: label(status.storage),
        }
    }
}

fn label(status: HandleStatus) -> String {
    match status {
        HandleStatus::Live => "live".to_string(),
        HandleStatus::Stub => "stub".to_string(),
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
