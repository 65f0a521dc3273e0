//! Outline generation from a topic and a talk duration.

use tracing::debug;

/// Fewest slides an outline is shaped for.
pub const MIN_SLIDES: i64 = 5;
/// Most slides an outline is shaped for.
pub const MAX_SLIDES: i64 = 20;

const TRAILER: [&str; 3] = ["Key Takeaways", "Conclusion", "Q&A"];

/// Number of slides budgeted for a talk: two minutes per slide, clamped.
pub fn slide_count(duration_minutes: i64) -> usize {
    // clamp keeps the value within 5..=20, so the cast cannot truncate
    duration_minutes.div_euclid(2).clamp(MIN_SLIDES, MAX_SLIDES) as usize
}

/// Generate ordered section labels for a talk.
///
/// The sequence is three fixed header items, `floor(count * 0.6)` generic
/// content items and three trailer items, cut to the first `count` entries.
/// Short talks therefore lose their trailer entirely.
pub fn generate_outline(topic: &str, duration_minutes: i64) -> Vec<String> {
    let count = slide_count(duration_minutes);
    let content_sections = count * 3 / 5;

    let outline: Vec<String> = [
        format!("Title: {}", topic),
        "Introduction and Overview".to_string(),
        "Background and Context".to_string(),
    ]
    .into_iter()
    .chain((1..=content_sections).map(|i| format!("Main Content {}", i)))
    .chain(TRAILER.iter().map(|s| s.to_string()))
    .take(count)
    .collect();

    debug!(
        duration_minutes,
        slide_count = count,
        items = outline.len(),
        "Generated outline"
    );
    outline
}
