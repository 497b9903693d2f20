//! Askwell Core
//!
//! Backend plumbing for the Askwell question board: environment resolution,
//! the live-or-stub Appwrite client handles, and the recent-questions feed
//! rendered by the hero section.

#[cfg(feature = "appwrite")]
pub mod appwrite;
pub mod env;
pub mod error;
pub mod factory;
pub mod handle;
pub mod models;
pub mod query;
pub mod questions;
pub mod services;
pub mod slug;
pub mod urls;

pub use env::{AppwriteEnv, RuntimeMode};
pub use error::{SdkError, ServiceError, ServiceName};
pub use factory::{Clients, ClientsStatus, build_clients, default_sdk};
pub use handle::{ClientHandle, HandleStatus, StubClient};
pub use questions::{QuestionSource, QuestionSummary, RECENT_QUESTION_LIMIT, recent_questions};
