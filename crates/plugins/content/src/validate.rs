//! Structural validation of rendered Slidev markdown.
//!
//! Checks, all applied independently:
//!
//! 1. the text contains a `---` separator somewhere
//! 2. the text starts with `---` (front-matter)
//! 3. no slide is empty once blank lines, `---` lines and `key: value`
//!    lines are ignored
//!
//! Slides are found by splitting on `"\n---\n"`. A segment holding only
//! headmatter (the deck front-matter, or a `layout: …` block right after a
//! separator) belongs to the segment that follows it.

use slideforge_core::ValidationResult;
use tracing::debug;

use crate::render::SLIDE_SEPARATOR;

const SEGMENT_DELIMITER: &str = "\n---\n";

/// Validate rendered markdown. Never fails; problems are reported in order.
pub fn validate(markdown: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if !markdown.contains(SLIDE_SEPARATOR) {
        errors.push("Missing slide separators (---)".to_string());
    }

    if !markdown.starts_with(SLIDE_SEPARATOR) {
        errors.push("Missing frontmatter at the beginning".to_string());
    }

    for (index, slide) in slides(markdown).iter().enumerate() {
        let has_content = slide
            .iter()
            .flat_map(|segment| segment.lines())
            .any(is_content_line);
        if !has_content {
            errors.push(format!("Slide {} appears to be empty", index + 1));
        }
    }

    debug!(errors = errors.len(), "Validated markdown");
    ValidationResult::from_errors(errors)
}

/// Group segments into slides, attaching headmatter to the segment after it.
fn slides(markdown: &str) -> Vec<Vec<&str>> {
    let starts_with_front_matter = markdown.starts_with(SLIDE_SEPARATOR);
    let mut segments = markdown.split(SEGMENT_DELIMITER).enumerate().peekable();

    let mut slides = Vec::new();
    let mut pending = Vec::new();

    while let Some((index, segment)) = segments.next() {
        let headmatter = if index == 0 {
            starts_with_front_matter
        } else {
            is_headmatter(segment)
        };

        pending.push(segment);
        if headmatter && segments.peek().is_some() {
            continue;
        }
        slides.push(std::mem::take(&mut pending));
    }

    slides
}

/// A segment made only of `key: value` (or indented) lines, starting right
/// after its separator.
fn is_headmatter(segment: &str) -> bool {
    let mut lines = segment.lines().peekable();
    let Some(first) = lines.peek() else {
        return false;
    };
    if first.trim().is_empty() || first.starts_with(char::is_whitespace) {
        return false;
    }
    lines.all(|line| {
        !line.trim().is_empty() && (line.contains(':') || line.starts_with(char::is_whitespace))
    })
}

/// Lines that count as slide content.
///
/// Any line containing `:` is taken for metadata, so prose such as
/// `Ratio: 3:1` does not count either.
fn is_content_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(SLIDE_SEPARATOR) && !trimmed.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::generate_outline;
    use crate::render::{render_deck, render_slide_block};
    use slideforge_core::Slide;

    #[test]
    fn test_generated_deck_is_valid() {
        for duration in [0, 10, 30, 60] {
            let outline = generate_outline("Borrow checking", duration);
            let deck = render_deck("Borrow checking", "Ferris", &outline, "seriph");
            let result = validate(&deck);
            assert!(result.is_valid, "duration {}: {:?}", duration, result.errors);
            assert!(result.errors.is_empty());
        }
    }

    #[test]
    fn test_plain_text_reports_missing_separators_and_frontmatter() {
        let result = validate("No separators or frontmatter");
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Missing slide separators (---)",
                "Missing frontmatter at the beginning"
            ]
        );
    }

    #[test]
    fn test_empty_text_reports_all_three_checks_in_order() {
        let result = validate("");
        assert_eq!(
            result.errors,
            vec![
                "Missing slide separators (---)",
                "Missing frontmatter at the beginning",
                "Slide 1 appears to be empty",
            ]
        );
    }

    #[test]
    fn test_separator_present_but_no_frontmatter() {
        let result = validate("# Intro\n\n---\n\n# Next");
        assert_eq!(result.errors, vec!["Missing frontmatter at the beginning"]);
    }

    #[test]
    fn test_empty_slide_is_numbered() {
        let markdown = "---\ntheme: seriph\n---\n\n# One\n\n---\n\n\n---\n\n# Three\n";
        let result = validate(markdown);
        assert_eq!(result.errors, vec!["Slide 2 appears to be empty"]);
    }

    #[test]
    fn test_frontmatter_only_is_empty() {
        let result = validate("---\ntheme: seriph\ntitle: Talk\n---\n");
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Slide 1 appears to be empty"]);
    }

    #[test]
    fn test_layout_headmatter_joins_following_slide() {
        let markdown = "---\ntheme: seriph\n---\n\n# One\n\n---\nlayout: center\nclass: text-center\n---\n\n# Two\n";
        assert!(validate(markdown).is_valid);
    }

    #[test]
    fn test_layout_headmatter_without_body_is_empty() {
        let markdown = "---\ntheme: seriph\n---\n\n# One\n\n---\nlayout: end\n---\n\n";
        let result = validate(markdown);
        assert_eq!(result.errors, vec!["Slide 2 appears to be empty"]);
    }

    #[test]
    fn test_colon_lines_count_as_metadata_so_ratio_only_slide_is_empty() {
        // Compatibility quirk: any line with a colon is treated as metadata.
        let markdown = "---\ntheme: seriph\n---\n\n# One\n\n---\n\nRatio: 3:1\n\n---\n\n# Three\n";
        let result = validate(markdown);
        assert_eq!(result.errors, vec!["Slide 2 appears to be empty"]);
    }

    #[test]
    fn test_standalone_block_trailing_separator_leaves_empty_slide() {
        let block = render_slide_block(&Slide::new("# Solo").with_layout("center"));
        let result = validate(&block);
        assert_eq!(result.errors, vec!["Slide 2 appears to be empty"]);
    }

    #[test]
    fn test_separator_inside_bullet_text_is_not_detected() {
        // Known gap: an item containing a bare `---` line splits the slide.
        let outline = vec!["Title: t".to_string(), "Item\n---\n".to_string()];
        let deck = render_deck("t", "a", &outline, "seriph");
        let result = validate(&deck);
        assert!(deck.matches("\n---\n").count() > 3);
        assert!(result.errors.iter().all(|e| e.starts_with("Slide ")));
    }

    #[test]
    fn test_is_headmatter() {
        assert!(is_headmatter("layout: center"));
        assert!(is_headmatter("layout: image\nimage: a.png"));
        assert!(is_headmatter("drawings:\n  persist: false"));
        assert!(!is_headmatter("\n# Title\n"));
        assert!(!is_headmatter("\nRatio: 3:1\n"));
        assert!(!is_headmatter("# Heading"));
        assert!(!is_headmatter(""));
    }
}
