//! Askwell Web Library Crate
//!
//! Configuration, shared state, templates, handlers and routing for the
//! Askwell landing page service. The `web` binary is a thin wrapper around
//! this library.

pub mod config;
pub mod handlers;
pub mod hero;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;
