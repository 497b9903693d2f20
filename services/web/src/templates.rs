//! Handlebars templates for the server-rendered pages.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Values are HTML-escaped by Handlebars.

use handlebars::{Handlebars, TemplateError};

pub const HERO_TEMPLATE: &str = "hero";
pub const HERO_HEADER_PARTIAL: &str = "hero_header";

/// Builds the template registry used by [`crate::state::AppState`].
pub fn registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_partial(
        HERO_HEADER_PARTIAL,
        include_str!("../templates/hero_header.hbs"),
    )?;
    handlebars.register_template_string(HERO_TEMPLATE, include_str!("../templates/hero.hbs"))?;
    Ok(handlebars)
}
