//! Recent Questions Feed
//!
//! Fetches the newest questions from the document store and maps them to the
//! props the hero section renders. Store errors are returned unchanged; there
//! is no empty-list fallback.

use crate::{
    env::AppwriteEnv,
    error::ServiceError,
    models::Document,
    query::Query,
    services::DocumentStore,
    urls::{preview_url, question_link},
};
use serde::Serialize;

/// Number of questions shown in the hero section.
pub const RECENT_QUESTION_LIMIT: u32 = 15;

/// Where questions and their attachments live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionSource {
    pub database_id: String,
    pub collection_id: String,
    pub attachment_bucket_id: String,
    pub endpoint: String,
    pub project_id: String,
}

impl QuestionSource {
    pub fn new(
        env: &AppwriteEnv,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
        attachment_bucket_id: impl Into<String>,
    ) -> Self {
        Self {
            database_id: database_id.into(),
            collection_id: collection_id.into(),
            attachment_bucket_id: attachment_bucket_id.into(),
            endpoint: env.endpoint.clone(),
            project_id: env.project_id.clone(),
        }
    }
}

/// Display props for one question card.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QuestionSummary {
    pub title: String,
    pub link: String,
    pub thumbnail: String,
}

impl QuestionSummary {
    pub fn from_document(doc: &Document, source: &QuestionSource) -> Self {
        let title = doc.title().unwrap_or_default().to_string();
        Self {
            link: question_link(&doc.id, &title),
            thumbnail: preview_url(
                &source.endpoint,
                &source.attachment_bucket_id,
                doc.attachment_id().unwrap_or_default(),
                &source.project_id,
            ),
            title,
        }
    }
}

/// The newest questions, newest first, at most [`RECENT_QUESTION_LIMIT`].
pub async fn recent_questions(
    store: &dyn DocumentStore,
    source: &QuestionSource,
) -> Result<Vec<QuestionSummary>, ServiceError> {
    let queries = [
        Query::order_desc("$createdAt"),
        Query::limit(RECENT_QUESTION_LIMIT),
    ];
    let mut list = store
        .list_documents(&source.database_id, &source.collection_id, &queries)
        .await?;

    // Stable, so a store that already ordered the page is left untouched.
    list.documents
        .sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(list
        .documents
        .iter()
        .take(RECENT_QUESTION_LIMIT as usize)
        .map(|doc| QuestionSummary::from_document(doc, source))
        .collect())
}
