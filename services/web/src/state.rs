//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the backend client
//! handles, the template registry and the configuration.

use crate::config::Config;
use askwell_core::{Clients, QuestionSource};
use handlebars::Handlebars;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub clients: Clients,
    pub questions: QuestionSource,
    pub templates: Arc<Handlebars<'static>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, clients: Clients, templates: Handlebars<'static>) -> Self {
        let questions = QuestionSource::new(
            &config.appwrite,
            config.database_id.clone(),
            config.question_collection_id.clone(),
            config.question_attachment_bucket_id.clone(),
        );
        Self {
            clients,
            questions,
            templates: Arc::new(templates),
            config: Arc::new(config),
        }
    }
}
