//! MCP tool definitions.
//!
//! Every schema is closed (`additionalProperties: false`) so that
//! [`crate::arguments::parse`] can reject misspelled or stray fields.

use std::sync::OnceLock;

use serde_json::{json, Value};
use slideforge_core::{ImageLayout, THEMES};

use crate::protocol::ToolDefinition;

pub const CREATE_SLIDEV_PROJECT: &str = "create-slidev-project";
pub const GENERATE_PRESENTATION: &str = "generate-presentation";
pub const GENERATE_OUTLINE: &str = "generate-outline";
pub const RECOMMEND_THEME: &str = "recommend-theme";
pub const RECOMMEND_LAYOUT: &str = "recommend-layout";
pub const CREATE_COMPARISON: &str = "create-comparison";
pub const CREATE_IMAGE_SLIDE: &str = "create-image-slide";
pub const FORMAT_CODE: &str = "format-code";
pub const VALIDATE_CONTENT: &str = "validate-content";
pub const LIST_CATALOG: &str = "list-catalog";

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn duration_property() -> Value {
    json!({
        "type": "integer",
        "description": "Talk length in minutes (default: 30). Two minutes per slide, between 5 and 20 slides"
    })
}

fn theme_property() -> Value {
    json!({
        "type": "string",
        "description": format!(
            "Slidev theme. Known themes: {}. Other names are used verbatim",
            THEMES.join(", ")
        )
    })
}

fn output_path_property(action: &str) -> Value {
    json!({
        "type": "string",
        "description": format!("Relative file path to {}", action)
    })
}

/// All tools exposed by the server, built on first use.
pub fn tool_definitions() -> &'static [ToolDefinition] {
    static TOOLS: OnceLock<Vec<ToolDefinition>> = OnceLock::new();
    TOOLS.get_or_init(build_tools)
}

/// Owned copy of [`tool_definitions`] for `tools/list` responses.
pub fn available_tools() -> Vec<ToolDefinition> {
    tool_definitions().to_vec()
}

fn build_tools() -> Vec<ToolDefinition> {
    let image_layouts: Vec<&str> = [
        ImageLayout::Image,
        ImageLayout::ImageLeft,
        ImageLayout::ImageRight,
    ]
    .iter()
    .map(ImageLayout::as_str)
    .collect();

    vec![
        tool(
            CREATE_SLIDEV_PROJECT,
            "Scaffold a Slidev project directory with slides.md, package.json and README.md",
            json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Project directory name, relative to the output root"
                    },
                    "title": {
                        "type": "string",
                        "description": "Presentation title (default: project name)"
                    },
                    "author": {
                        "type": "string",
                        "description": "Presenter name (default: configured author)"
                    },
                    "theme": theme_property(),
                    "durationMinutes": duration_property()
                },
                "required": ["name"],
                "additionalProperties": false
            }),
        ),
        tool(
            GENERATE_PRESENTATION,
            "Generate a complete Slidev deck for a topic and optionally save it to a file",
            json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Presentation topic, used as the title"
                    },
                    "author": {
                        "type": "string",
                        "description": "Presenter name (default: configured author)"
                    },
                    "durationMinutes": duration_property(),
                    "theme": theme_property(),
                    "style": {
                        "type": "string",
                        "description": "Style hint for theme selection, e.g. academic, technical, casual"
                    },
                    "outputPath": output_path_property("write the deck to")
                },
                "required": ["topic"],
                "additionalProperties": false
            }),
        ),
        tool(
            GENERATE_OUTLINE,
            "Generate the ordered section outline for a talk",
            json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Presentation topic"
                    },
                    "durationMinutes": duration_property()
                },
                "required": ["topic"],
                "additionalProperties": false
            }),
        ),
        tool(
            RECOMMEND_THEME,
            "Recommend a Slidev theme from a topic and optional style hint",
            json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Presentation topic"
                    },
                    "style": {
                        "type": "string",
                        "description": "Style hint, e.g. academic, creative, formal, casual"
                    }
                },
                "required": ["topic"],
                "additionalProperties": false
            }),
        ),
        tool(
            RECOMMEND_LAYOUT,
            "Recommend a slide layout from a description of the slide content",
            json!({
                "type": "object",
                "properties": {
                    "description": {
                        "type": "string",
                        "description": "What the slide should show"
                    }
                },
                "required": ["description"],
                "additionalProperties": false
            }),
        ),
        tool(
            CREATE_COMPARISON,
            "Create a two-column comparison slide, optionally appending it to a deck",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Slide heading" },
                    "leftTitle": { "type": "string", "description": "Left column heading" },
                    "leftItems": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Left column bullet points"
                    },
                    "rightTitle": { "type": "string", "description": "Right column heading" },
                    "rightItems": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Right column bullet points"
                    },
                    "outputPath": output_path_property("an existing deck to append the slide to")
                },
                "required": ["title", "leftTitle", "leftItems", "rightTitle", "rightItems"],
                "additionalProperties": false
            }),
        ),
        tool(
            CREATE_IMAGE_SLIDE,
            "Create an image slide, optionally appending it to a deck",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Slide heading" },
                    "imagePath": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Image path or URL"
                    },
                    "caption": { "type": "string", "description": "Optional caption" },
                    "layout": {
                        "type": "string",
                        "enum": image_layouts,
                        "description": "Image layout (default: image)"
                    },
                    "outputPath": output_path_property("an existing deck to append the slide to")
                },
                "required": ["title", "imagePath"],
                "additionalProperties": false
            }),
        ),
        tool(
            FORMAT_CODE,
            "Wrap code in a fenced, language-tagged block for a slide",
            json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string", "description": "Source code" },
                    "language": {
                        "type": "string",
                        "description": "Language tag (default: configured code language)"
                    }
                },
                "required": ["code"],
                "additionalProperties": false
            }),
        ),
        tool(
            VALIDATE_CONTENT,
            "Check Slidev markdown for missing front-matter, missing separators and empty slides",
            json!({
                "type": "object",
                "properties": {
                    "content": { "type": "string", "description": "Markdown to check" },
                    "path": { "type": "string", "description": "Relative path of a deck file to check" }
                },
                "oneOf": [
                    { "required": ["content"] },
                    { "required": ["path"] }
                ],
                "additionalProperties": false
            }),
        ),
        tool(
            LIST_CATALOG,
            "List the known Slidev themes and layouts",
            json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        ),
    ]
}

/// Look up a tool definition by name.
pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    tool_definitions().iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_are_unique() {
        let tools = available_tools();
        let names: HashSet<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 10);
    }

    #[test]
    fn test_every_schema_is_a_closed_object() {
        for tool in available_tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert_eq!(
                tool.input_schema["additionalProperties"], false,
                "{}",
                tool.name
            );
            assert!(!tool.description.is_empty());
        }
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for tool in available_tools() {
            let properties = tool.input_schema["properties"].as_object().unwrap();
            if let Some(required) = tool.input_schema["required"].as_array() {
                for field in required {
                    let field = field.as_str().unwrap();
                    assert!(
                        properties.contains_key(field),
                        "{} requires undeclared {}",
                        tool.name,
                        field
                    );
                }
            }
        }
    }

    #[test]
    fn test_image_layout_enum() {
        let tool = find_tool(CREATE_IMAGE_SLIDE).unwrap();
        assert_eq!(
            tool.input_schema["properties"]["layout"]["enum"],
            json!(["image", "image-left", "image-right"])
        );
    }

    #[test]
    fn test_find_tool() {
        assert!(find_tool(GENERATE_OUTLINE).is_some());
        assert!(find_tool("get_issues").is_none());
    }

    #[test]
    fn test_definitions_are_built_once() {
        let first = find_tool(FORMAT_CODE).unwrap();
        let second = find_tool(FORMAT_CODE).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(tool_definitions(), tool_definitions()));
        assert_eq!(available_tools().len(), tool_definitions().len());
    }
}
