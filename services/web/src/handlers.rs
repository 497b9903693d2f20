//! Axum Handlers
//!
//! The hero page, its JSON counterpart and a health report. Handlers do not
//! recover from backend failures; they turn them into error responses.

use askwell_core::ServiceError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::{
    hero,
    models::{ErrorResponse, HealthResponse, QuestionSummaryResponse},
    state::AppState,
};

pub enum ApiError {
    ServiceUnavailable(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ServiceUnavailable(message) => {
                warn!("Backend unavailable: {}", message);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        match err.downcast_ref::<ServiceError>() {
            Some(service_err) if service_err.is_unavailable() => {
                Self::ServiceUnavailable(service_err.to_string())
            }
            _ => Self::InternalServerError(err),
        }
    }
}

/// Server-rendered landing page with the recent-questions hero.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let html = hero::render(&state).await?;
    Ok(Html(html))
}

/// List the most recent questions.
#[utoipa::path(
    get,
    path = "/api/questions/recent",
    responses(
        (status = 200, description = "Up to 15 questions, newest first", body = [QuestionSummaryResponse]),
        (status = 503, description = "Backend not configured", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn recent_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuestionSummaryResponse>>, ApiError> {
    let questions = hero::load(&state).await?;
    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

/// Report which backend handles are live.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Backend handle status", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(state.clients.status().into())
}
