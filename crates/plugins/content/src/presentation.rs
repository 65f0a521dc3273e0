//! One-shot deck generation from a [`PresentationRequest`].

use slideforge_core::{PresentationRequest, ValidationResult};
use tracing::debug;

use crate::outline::generate_outline;
use crate::recommend::recommend_theme;
use crate::render::render_deck;
use crate::validate::validate;

/// A rendered deck together with the choices made while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDeck {
    /// Theme written to the front-matter
    pub theme: String,
    pub outline: Vec<String>,
    pub markdown: String,
    pub validation: ValidationResult,
}

/// Generate a deck: pick a theme when none is given, outline the topic,
/// render, and validate the result.
pub fn generate_presentation(request: &PresentationRequest) -> GeneratedDeck {
    let theme = match request.theme.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(theme) => theme.to_string(),
        None => recommend_theme(&request.topic, request.style.as_deref()).to_string(),
    };

    let outline = generate_outline(&request.topic, request.duration_minutes);
    let markdown = render_deck(&request.topic, &request.author, &outline, &theme);
    let validation = validate(&markdown);

    debug!(
        topic = %request.topic,
        theme = %theme,
        valid = validation.is_valid,
        "Generated presentation"
    );

    GeneratedDeck {
        theme,
        outline,
        markdown,
        validation,
    }
}
