//! Theme and layout recommendation from free-text hints.
//!
//! Rules are tested top to bottom against lower-cased input and the first
//! match wins. There is no scoring; identical input always yields the same
//! catalog name.

use slideforge_core::{DEFAULT_LAYOUT, DEFAULT_THEME};
use tracing::debug;

/// Where a theme rule looks for its keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Style hint first, then topic
    StyleThenTopic,
    /// Style hint only
    StyleOnly,
}

struct ThemeRule {
    keywords: &'static [&'static str],
    scope: Scope,
    theme: &'static str,
}

const THEME_RULES: &[ThemeRule] = &[
    ThemeRule {
        keywords: &["academic", "research", "science", "scientific", "study", "thesis"],
        scope: Scope::StyleThenTopic,
        theme: "academic",
    },
    ThemeRule {
        keywords: &["tech", "programming", "development", "software", "engineering", "developer"],
        scope: Scope::StyleThenTopic,
        theme: "apple-basic",
    },
    ThemeRule {
        keywords: &["creative", "fun", "playful", "artistic"],
        scope: Scope::StyleThenTopic,
        theme: "bricks",
    },
    ThemeRule {
        keywords: &["formal", "business", "corporate", "professional"],
        scope: Scope::StyleThenTopic,
        theme: "light",
    },
    ThemeRule {
        keywords: &["casual", "friendly", "relaxed"],
        scope: Scope::StyleOnly,
        theme: "penguin",
    },
];

const LAYOUT_RULES: &[(&[&str], &str)] = &[
    (&["comparison", "vs", "versus"], "two-cols"),
    (&["quote", "saying"], "quote"),
    (&["image", "picture", "photo"], "image"),
    (&["center", "focus"], "center"),
    (&["intro", "introduction"], "intro"),
    (&["end", "conclusion", "thank"], "end"),
];

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Recommend a theme for a topic and optional style hint.
pub fn recommend_theme(topic: &str, style: Option<&str>) -> &'static str {
    let topic = topic.to_lowercase();
    let style = style.map(str::to_lowercase).unwrap_or_default();

    let theme = THEME_RULES
        .iter()
        .find(|rule| {
            mentions(&style, rule.keywords)
                || (rule.scope == Scope::StyleThenTopic && mentions(&topic, rule.keywords))
        })
        .map(|rule| rule.theme)
        .unwrap_or(DEFAULT_THEME);

    debug!(theme, "Recommended theme");
    theme
}

/// Recommend a layout for a description of the slide's content.
pub fn recommend_layout(description: &str) -> &'static str {
    let description = description.to_lowercase();

    LAYOUT_RULES
        .iter()
        .find(|(keywords, _)| mentions(&description, keywords))
        .map(|(_, layout)| *layout)
        .unwrap_or(DEFAULT_LAYOUT)
}
