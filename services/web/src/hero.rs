//! Hero Section
//!
//! Server-side rendering of the landing hero: one query for the newest
//! questions, then the Handlebars template. A failed query fails the render.

use crate::{state::AppState, templates::HERO_TEMPLATE};
use askwell_core::{QuestionSummary, recent_questions};
use serde::Serialize;
use tracing::debug;

const SITE_NAME: &str = "Askwell";

#[derive(Serialize)]
struct HeroView<'a> {
    site_name: &'a str,
    products: &'a [QuestionSummary],
}

/// Loads the hero props for the current request.
pub async fn load(state: &AppState) -> anyhow::Result<Vec<QuestionSummary>> {
    let questions = recent_questions(&state.clients.databases, &state.questions).await?;
    debug!(count = questions.len(), "Loaded recent questions for hero section");
    Ok(questions)
}

/// Renders the full hero page.
pub async fn render(state: &AppState) -> anyhow::Result<String> {
    let products = load(state).await?;
    let html = state.templates.render(
        HERO_TEMPLATE,
        &HeroView {
            site_name: SITE_NAME,
            products: &products,
        },
    )?;
    Ok(html)
}
