//! Fixed catalogs of recognized Slidev theme and layout names.
//!
//! Renderers accept any name verbatim; these lists only answer membership
//! questions and bound what the recommendation engine can return.

/// Theme used when nothing more specific applies.
pub const DEFAULT_THEME: &str = "seriph";

/// Layout name that renders without a `layout:` line.
pub const DEFAULT_LAYOUT: &str = "default";

/// Language tag for code blocks when none is given.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Recognized theme names.
pub const THEMES: &[&str] = &[
    "default",
    "seriph",
    "apple-basic",
    "bricks",
    "shibainu",
    "academic",
    "penguin",
    "light",
];

/// Recognized layout names (Slidev built-ins).
pub const LAYOUTS: &[&str] = &[
    "default",
    "center",
    "cover",
    "end",
    "fact",
    "full",
    "iframe",
    "iframe-left",
    "iframe-right",
    "image",
    "image-left",
    "image-right",
    "intro",
    "none",
    "quote",
    "section",
    "statement",
    "two-cols",
    "two-cols-header",
];

/// Check whether `name` is a catalog theme.
pub fn is_known_theme(name: &str) -> bool {
    THEMES.contains(&name)
}

/// Check whether `name` is a catalog layout.
pub fn is_known_layout(name: &str) -> bool {
    LAYOUTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_catalog_members() {
        assert!(is_known_theme(DEFAULT_THEME));
        assert!(is_known_layout(DEFAULT_LAYOUT));
    }

    #[test]
    fn test_membership_is_exact() {
        assert!(is_known_layout("two-cols"));
        assert!(!is_known_layout("Two-Cols"));
        assert!(!is_known_theme("dracula"));
        assert!(!is_known_theme(""));
    }
}
