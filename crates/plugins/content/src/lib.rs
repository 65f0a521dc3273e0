//! Content plugins that turn presentation requests into Slidev markdown.
//!
//! Every function here is a pure text transform:
//!
//! - **Recommend**: pick a theme or layout from free-text hints
//! - **Outline**: derive ordered section labels from a topic and duration
//! - **Render**: assemble front-matter and `---`-separated slides
//! - **Validate**: check rendered markdown for structural problems
//! - **Presentation**: all of the above in one call
//!
//! # Example
//!
//! ```ignore
//! use slideforge_content::{generate_outline, recommend_theme, render_deck, validate};
//!
//! let theme = recommend_theme("Rust ownership", Some("technical"));
//! let outline = generate_outline("Rust ownership", 30);
//! let deck = render_deck("Rust ownership", "Ferris", &outline, theme);
//! assert!(validate(&deck).is_valid);
//! ```

pub mod outline;
pub mod presentation;
pub mod recommend;
pub mod render;
pub mod roles;
pub mod validate;

pub use outline::{generate_outline, slide_count};
pub use presentation::{generate_presentation, GeneratedDeck};
pub use recommend::{recommend_layout, recommend_theme};
pub use render::{
    render_code_block, render_comparison, render_deck, render_document, render_image_slide,
    render_slide_block, SLIDE_SEPARATOR,
};
pub use roles::SlideRole;
pub use validate::validate;
