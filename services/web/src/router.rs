//! Axum Router Configuration
//!
//! This module defines the HTTP routing for the application: the rendered
//! landing page, the JSON API and the OpenAPI documentation.

use crate::{
    handlers,
    models::{ErrorResponse, HealthResponse, QuestionSummaryResponse},
    state::AppState,
};

use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::recent_questions, handlers::health),
    components(schemas(QuestionSummaryResponse, HealthResponse, ErrorResponse)),
    tags(
        (name = "Askwell", description = "Recent questions for the Askwell landing page")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let app_router = Router::new()
        .route("/", get(handlers::home))
        .route("/api/questions/recent", get(handlers::recent_questions))
        .route("/health", get(handlers::health))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(app_router)
}
