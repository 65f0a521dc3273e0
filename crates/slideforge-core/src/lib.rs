//! Core types, catalogs, and error handling for slideforge.
//!
//! This crate provides the data model shared by the content generators,
//! the storage gateway, and the MCP tool host.

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{
    is_known_layout, is_known_theme, DEFAULT_CODE_LANGUAGE, DEFAULT_LAYOUT, DEFAULT_THEME, LAYOUTS,
    THEMES,
};
pub use error::{Error, Result};
pub use types::{
    DrawingOptions, FrontMatter, ImageLayout, PresentationRequest, Slide, SlideDocument,
    ValidationResult, DEFAULT_DURATION_MINUTES,
};
