//! Link templates shared by the hero section and the storage client.

use crate::slug::slugify;

/// Public preview URL of a stored file. Built by interpolation only; a bad
/// file id gives a dead link rather than an error.
pub fn preview_url(endpoint: &str, bucket_id: &str, file_id: &str, project_id: &str) -> String {
    format!(
        "{}/storage/buckets/{}/files/{}/preview?project={}",
        endpoint.trim_end_matches('/'),
        bucket_id,
        file_id,
        project_id
    )
}

/// Relative link to a question page.
pub fn question_link(document_id: &str, title: &str) -> String {
    format!("/questions/{}/{}", document_id, slugify(title))
}
