//! Slidev markdown rendering.
//!
//! Two shapes are produced:
//!
//! - **Decks**: front-matter, then slides joined by `---` separators, with a
//!   slide's layout carried in a headmatter block directly after its separator.
//! - **Blocks**: a single self-contained slide wrapped as
//!   `---` / headmatter / `---` / body / `---`, ready to append to a deck.
//!
//! Nothing here escapes user text. A `---` line inside a bullet or a fence
//! inside code passes through unchanged.

use slideforge_core::{FrontMatter, ImageLayout, Slide, SlideDocument};
use tracing::debug;

use crate::roles::SlideRole;

/// Literal line separating slides.
pub const SLIDE_SEPARATOR: &str = "---";

// ============================================================================
// Documents and blocks
// ============================================================================

/// Render a document as Slidev markdown.
///
/// When the document has front-matter, the first slide's headmatter is
/// merged into it, as Slidev reads the first block for both.
pub fn render_document(document: &SlideDocument) -> String {
    let mut output = String::new();
    let mut slides = document.slides.iter();

    match (&document.front_matter, slides.next()) {
        (Some(front_matter), first) => {
            let mut lines = front_matter.lines();
            if let Some(first) = first {
                lines.extend(first.headmatter_lines());
            }
            push_headmatter(&mut output, &lines);
            output.push('\n');
            if let Some(first) = first {
                output.push_str(&first.body);
            }
        }
        (None, Some(first)) => {
            let lines = first.headmatter_lines();
            if !lines.is_empty() {
                push_headmatter(&mut output, &lines);
                output.push('\n');
            }
            output.push_str(&first.body);
        }
        (None, None) => {}
    }

    for slide in slides {
        output.push_str("\n\n");
        output.push_str(SLIDE_SEPARATOR);
        output.push('\n');
        let lines = slide.headmatter_lines();
        if !lines.is_empty() {
            for line in &lines {
                output.push_str(line);
                output.push('\n');
            }
            output.push_str(SLIDE_SEPARATOR);
            output.push('\n');
        }
        output.push('\n');
        output.push_str(&slide.body);
    }

    output.push('\n');
    output
}

/// Render one slide as a standalone block.
pub fn render_slide_block(slide: &Slide) -> String {
    let mut output = String::new();
    push_headmatter(&mut output, &slide.headmatter_lines());
    output.push('\n');
    output.push_str(&slide.body);
    output.push_str("\n\n");
    output.push_str(SLIDE_SEPARATOR);
    output.push('\n');
    output
}

fn push_headmatter(output: &mut String, lines: &[String]) {
    output.push_str(SLIDE_SEPARATOR);
    output.push('\n');
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(SLIDE_SEPARATOR);
    output.push('\n');
}

fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Decks
// ============================================================================

/// Build the slide document for a deck.
///
/// The first outline item is the title entry and is represented by the
/// title slide; every remaining item gets a table-of-contents bullet and
/// its own slide.
pub fn build_deck<S: AsRef<str>>(
    title: &str,
    author: &str,
    outline: &[S],
    theme: &str,
) -> SlideDocument {
    let sections = outline.get(1..).unwrap_or_default();

    let mut document = SlideDocument::with_front_matter(FrontMatter::new(theme, title, author));
    document.push(Slide::new(format!("# {}\n\nPresented by {}", title, author)));
    document.push(table_of_contents(sections));

    for section in sections {
        let section = section.as_ref();
        let role = SlideRole::classify(section);
        let body = match role {
            SlideRole::Introduction => introduction_body(section, title),
            SlideRole::Conclusion => conclusion_body(section, title),
            SlideRole::QuestionsAndAnswers => closing_body(section, author),
            SlideRole::Content => content_body(section),
        };
        document.push(Slide::new(body).with_layout(role.layout()));
    }

    debug!(title, theme, slides = document.len(), "Built deck");
    document
}

/// Render a complete deck.
pub fn render_deck<S: AsRef<str>>(title: &str, author: &str, outline: &[S], theme: &str) -> String {
    render_document(&build_deck(title, author, outline, theme))
}

fn table_of_contents<S: AsRef<str>>(sections: &[S]) -> Slide {
    let body = if sections.is_empty() {
        "# Table of Contents".to_string()
    } else {
        format!("# Table of Contents\n\n{}", bullets(sections))
    };
    Slide::new(body).with_layout("center")
}

fn introduction_body(section: &str, title: &str) -> String {
    format!(
        "# {section}\n\n\
         Welcome! Today we explore **{title}**.\n\n\
         - Why this topic matters\n\
         - What we will cover\n\
         - What you will take away"
    )
}

fn conclusion_body(section: &str, title: &str) -> String {
    format!(
        "# {section}\n\n\
         Thank you for exploring **{title}** with us.\n\n\
         - Recap of the key insights\n\
         - How to apply them\n\
         - Where to learn more"
    )
}

fn closing_body(section: &str, author: &str) -> String {
    format!(
        "# {section}\n\n\
         Thank you!\n\n\
         Questions are welcome. Reach out to {author}"
    )
}

fn content_body(section: &str) -> String {
    format!(
        "# {section}\n\n\
         ## Key Points\n\n\
         - First key point about {section}\n\
         - Second key point\n\
         - Third key point\n\n\
         ## Details\n\n\
         - Supporting detail\n\
         - Example or data point\n\
         - Further reading"
    )
}

// ============================================================================
// Standalone slides
// ============================================================================

/// Render a two-column comparison slide.
pub fn render_comparison<S: AsRef<str>>(
    title: &str,
    left_title: &str,
    left_items: &[S],
    right_title: &str,
    right_items: &[S],
) -> String {
    let column = |heading: &str, items: &[S]| {
        if items.is_empty() {
            format!("## {}", heading)
        } else {
            format!("## {}\n\n{}", heading, bullets(items))
        }
    };

    let body = format!(
        "# {}\n\n::left::\n\n{}\n\n::right::\n\n{}",
        title,
        column(left_title, left_items),
        column(right_title, right_items)
    );

    render_slide_block(&Slide::new(body).with_layout("two-cols"))
}

/// Render an image slide.
///
/// With the `image` layout the caption shares the heading line; the
/// side-by-side layouts put it in its own paragraph under the heading.
pub fn render_image_slide(
    title: &str,
    image_path: &str,
    caption: Option<&str>,
    layout: ImageLayout,
) -> String {
    let caption = caption.filter(|c| !c.is_empty());

    let body = match (layout, caption) {
        (ImageLayout::Image, Some(caption)) => format!("# {} *{}*", title, caption),
        (_, Some(caption)) => format!("# {}\n\n*{}*", title, caption),
        (_, None) => format!("# {}", title),
    };

    let slide = Slide::new(body)
        .with_layout(layout.as_str())
        .with_headmatter("image", image_path);
    render_slide_block(&slide)
}

/// Wrap code in a fenced block tagged with `language`.
pub fn render_code_block(code: &str, language: &str) -> String {
    format!("```{}\n{}\n```", language, code)
}
