//! Slide role classification for outline labels.
//!
//! Outline items are plain strings, so a label's role is recovered by
//! keyword matching. The keywords here must stay in sync with the fixed
//! labels emitted by [`crate::outline`].

/// What an outline item is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRole {
    Introduction,
    Conclusion,
    QuestionsAndAnswers,
    /// Any other section
    Content,
}

/// Ordered role rules. First match wins.
const ROLE_RULES: &[(SlideRole, &[&str])] = &[
    (SlideRole::Introduction, &["introduction"]),
    (SlideRole::Conclusion, &["conclusion"]),
    (SlideRole::QuestionsAndAnswers, &["q&a"]),
];

impl SlideRole {
    /// Classify an outline label by case-insensitive substring match.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        ROLE_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| label.contains(k)))
            .map(|(role, _)| *role)
            .unwrap_or(SlideRole::Content)
    }

    /// Layout rendered for slides of this role.
    pub fn layout(&self) -> &'static str {
        match self {
            SlideRole::Introduction => "intro",
            SlideRole::Conclusion => "statement",
            SlideRole::QuestionsAndAnswers => "end",
            SlideRole::Content => slideforge_core::DEFAULT_LAYOUT,
        }
    }
}
