//! Data model shared across slideforge crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_LAYOUT;

/// Presentation length used when a request does not specify one.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// A request to generate a presentation deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationRequest {
    pub topic: String,
    pub author: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

fn default_duration() -> i64 {
    DEFAULT_DURATION_MINUTES
}

impl PresentationRequest {
    /// Create a request with the default duration and no style hints.
    pub fn new(topic: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            author: author.into(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            theme: None,
            style: None,
        }
    }
}

// ============================================================================
// Slides
// ============================================================================

/// A single slide: optional layout, extra headmatter, and a markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    /// Layout name; `None` means the default layout
    pub layout: Option<String>,
    /// Additional `key: value` pairs rendered after the layout line
    pub headmatter: Vec<(String, String)>,
    /// Markdown body
    pub body: String,
}

impl Slide {
    /// Create a default-layout slide.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Set the layout. The `default` layout is stored as `None`.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        let layout = layout.into();
        self.layout = (layout != DEFAULT_LAYOUT).then_some(layout);
        self
    }

    /// Append a headmatter entry.
    pub fn with_headmatter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headmatter.push((key.into(), value.into()));
        self
    }

    /// Headmatter lines in render order: layout first, then extra entries.
    pub fn headmatter_lines(&self) -> Vec<String> {
        self.layout
            .iter()
            .map(|layout| format!("layout: {}", layout))
            .chain(
                self.headmatter
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value)),
            )
            .collect()
    }
}

/// Drawing (annotation) options for the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingOptions {
    pub enabled: bool,
    pub persist: bool,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            persist: false,
        }
    }
}

/// Deck-level configuration block preceding all slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub theme: String,
    pub title: String,
    pub author: String,
    pub transition: String,
    pub color_schema: String,
    pub drawings: DrawingOptions,
}

impl FrontMatter {
    /// Front-matter with the fixed transition, color schema and drawing options.
    pub fn new(
        theme: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            theme: theme.into(),
            title: title.into(),
            author: author.into(),
            transition: "slide-left".to_string(),
            color_schema: "auto".to_string(),
            drawings: DrawingOptions::default(),
        }
    }

    /// Render as `key: value` lines (without delimiters).
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("theme: {}", self.theme),
            format!("title: {}", self.title),
            format!("author: {}", self.author),
            format!("transition: {}", self.transition),
            format!("colorSchema: {}", self.color_schema),
            "drawings:".to_string(),
            format!("  enabled: {}", self.drawings.enabled),
            format!("  persist: {}", self.drawings.persist),
        ]
    }
}

/// An ordered sequence of slides, optionally preceded by deck front-matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDocument {
    pub front_matter: Option<FrontMatter>,
    pub slides: Vec<Slide>,
}

impl SlideDocument {
    /// Create an empty document with front-matter.
    pub fn with_front_matter(front_matter: FrontMatter) -> Self {
        Self {
            front_matter: Some(front_matter),
            slides: Vec::new(),
        }
    }

    /// Append a slide.
    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

// ============================================================================
// Image layouts
// ============================================================================

/// Layouts accepted by image slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageLayout {
    /// Full-bleed image, caption on the heading line
    #[default]
    Image,
    /// Image on the left, caption below the heading
    ImageLeft,
    /// Image on the right, caption below the heading
    ImageRight,
}

impl ImageLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageLayout::Image => "image",
            ImageLayout::ImageLeft => "image-left",
            ImageLayout::ImageRight => "image-right",
        }
    }
}

impl fmt::Display for ImageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageLayout {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "image" => Ok(ImageLayout::Image),
            "image-left" => Ok(ImageLayout::ImageLeft),
            "image-right" => Ok(ImageLayout::ImageRight),
            other => Err(crate::Error::Other(anyhow::anyhow!(
                "Unknown image layout '{}'. Expected image, image-left or image-right",
                other
            ))),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Outcome of structural validation of a rendered deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Build a result; valid exactly when `errors` is empty.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
