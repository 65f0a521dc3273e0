//! Tool handlers for MCP server.
//!
//! Each handler parses its arguments strictly, calls the content plugins,
//! and reads or writes through the [`DeckStore`] when a path is given.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use slideforge_content::{
    generate_outline, generate_presentation, recommend_layout, recommend_theme, render_code_block,
    render_comparison, render_deck, render_image_slide, validate,
};
use slideforge_core::config::DeckDefaults;
use slideforge_core::{
    is_known_theme, Error, ImageLayout, PresentationRequest, Result, ValidationResult,
    DEFAULT_LAYOUT, DEFAULT_THEME, LAYOUTS, THEMES,
};
use slideforge_storage::project::{scaffold_project, ProjectSpec};
use slideforge_storage::DeckStore;
use tracing::{debug, info, warn};

use crate::arguments;
use crate::protocol::{ToolCallResult, ToolDefinition};
use crate::tools::{
    self, CREATE_COMPARISON, CREATE_IMAGE_SLIDE, CREATE_SLIDEV_PROJECT, FORMAT_CODE,
    GENERATE_OUTLINE, GENERATE_PRESENTATION, LIST_CATALOG, RECOMMEND_LAYOUT, RECOMMEND_THEME,
    VALIDATE_CONTENT,
};

/// Trailer of a standalone slide block, dropped when appending to a deck.
const BLOCK_TRAILER: &str = "\n\n---\n";

/// Tool handler that executes tools against a deck store.
pub struct ToolHandler {
    store: Arc<dyn DeckStore>,
    defaults: DeckDefaults,
}

impl ToolHandler {
    /// Create a new tool handler.
    pub fn new(store: Arc<dyn DeckStore>, defaults: DeckDefaults) -> Self {
        Self { store, defaults }
    }

    /// Get available tool definitions.
    pub fn available_tools(&self) -> Vec<ToolDefinition> {
        tools::available_tools()
    }

    /// Execute a tool by name with arguments.
    pub async fn execute(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let Some(tool) = tools::find_tool(name) else {
            warn!("Unknown tool requested: {}", name);
            return ToolCallResult::error(Error::UnknownTool(name.to_string()).to_string());
        };

        let outcome = match tool.name.as_str() {
            CREATE_SLIDEV_PROJECT => self.handle_create_project(tool, arguments),
            GENERATE_PRESENTATION => self.handle_generate_presentation(tool, arguments),
            GENERATE_OUTLINE => self.handle_generate_outline(tool, arguments),
            RECOMMEND_THEME => handle_recommend_theme(tool, arguments),
            RECOMMEND_LAYOUT => handle_recommend_layout(tool, arguments),
            CREATE_COMPARISON => self.handle_create_comparison(tool, arguments),
            CREATE_IMAGE_SLIDE => self.handle_create_image_slide(tool, arguments),
            FORMAT_CODE => self.handle_format_code(tool, arguments),
            VALIDATE_CONTENT => self.handle_validate_content(tool, arguments),
            LIST_CATALOG => handle_list_catalog(tool, arguments),
            other => Err(Error::UnknownTool(other.to_string())),
        };

        match outcome {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Decks and projects
    // ------------------------------------------------------------------------

    fn handle_create_project(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: CreateProjectParams = arguments::parse(tool, arguments)?;

        let title = params.title.unwrap_or_else(|| params.name.clone());
        let author = self.resolve_author(tool, params.author)?;
        let theme = resolve_theme(params.theme, &title, None);
        let duration = params
            .duration_minutes
            .unwrap_or(self.defaults.duration_minutes);

        let outline = generate_outline(&title, duration);
        let slides = render_deck(&title, &author, &outline, &theme);
        let files = scaffold_project(
            self.store.as_ref(),
            &ProjectSpec {
                name: params.name.clone(),
                title,
                author,
                theme: theme.clone(),
                slides,
            },
        )?;

        Ok(format!(
            "Created Slidev project '{}' (theme: {}, {} outline items)\n\n\
             Files:\n- {}\n- {}\n- {}\n\n\
             Next steps:\n  cd {}\n  npm install\n  npm run dev",
            params.name,
            theme,
            outline.len(),
            files.slides.display(),
            files.manifest.display(),
            files.readme.display(),
            params.name
        ))
    }

    fn handle_generate_presentation(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: GeneratePresentationParams = arguments::parse(tool, arguments)?;

        let request = PresentationRequest {
            author: self.resolve_author(tool, params.author)?,
            duration_minutes: params
                .duration_minutes
                .unwrap_or(self.defaults.duration_minutes),
            theme: params.theme.map(|theme| check_theme(&theme)),
            style: params.style,
            topic: params.topic,
        };

        let deck = generate_presentation(&request);
        if !deck.validation.is_valid {
            warn!(
                topic = %request.topic,
                errors = deck.validation.errors.len(),
                "Generated deck failed validation"
            );
        }

        let mut summary = format!(
            "Generated presentation '{}' (theme: {}, {} outline items)",
            request.topic,
            deck.theme,
            deck.outline.len()
        );

        if let Some(path) = params.output_path {
            let written = self.store.write(&path, &deck.markdown)?;
            info!(path = %written.display(), "Saved presentation");
            summary.push_str(&format!("\nSaved to: {}", written.display()));
        }

        summary.push_str(&validation_summary(&deck.validation));
        Ok(format!("{}\n\n{}", summary, deck.markdown))
    }

    fn handle_generate_outline(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: GenerateOutlineParams = arguments::parse(tool, arguments)?;
        let duration = params
            .duration_minutes
            .unwrap_or(self.defaults.duration_minutes);

        let outline = generate_outline(&params.topic, duration);
        debug!(topic = %params.topic, duration, items = outline.len(), "Generated outline");

        Ok(outline
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    // ------------------------------------------------------------------------
    // Standalone slides
    // ------------------------------------------------------------------------

    fn handle_create_comparison(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: CreateComparisonParams = arguments::parse(tool, arguments)?;

        let block = render_comparison(
            &params.title,
            &params.left_title,
            &params.left_items,
            &params.right_title,
            &params.right_items,
        );

        self.finish_slide("comparison", block, params.output_path)
    }

    fn handle_create_image_slide(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: CreateImageSlideParams = arguments::parse(tool, arguments)?;

        let layout = match params.layout.as_deref() {
            Some(layout) => layout.parse::<ImageLayout>()?,
            None => ImageLayout::default(),
        };
        let block = render_image_slide(
            &params.title,
            &params.image_path,
            params.caption.as_deref(),
            layout,
        );

        self.finish_slide("image", block, params.output_path)
    }

    fn handle_format_code(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: FormatCodeParams = arguments::parse(tool, arguments)?;
        let language = params
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.defaults.code_language.clone());

        Ok(render_code_block(&params.code, &language))
    }

    /// Return the rendered block, appending it to `output_path` first when given.
    fn finish_slide(&self, kind: &str, block: String, output_path: Option<String>) -> Result<String> {
        match output_path {
            Some(path) => {
                let written = self.append_slide(&path, &block)?;
                Ok(format!(
                    "Appended {} slide to {}\n\n{}",
                    kind,
                    written.display(),
                    block
                ))
            }
            None => Ok(block),
        }
    }

    /// Append a standalone block to an existing deck.
    fn append_slide(&self, path: &str, block: &str) -> Result<PathBuf> {
        let deck = self
            .store
            .read(path)?
            .ok_or_else(|| Error::Storage(format!("Deck '{}' not found", path)))?;

        let slide = block.strip_suffix(BLOCK_TRAILER).unwrap_or(block);
        let updated = format!("{}\n\n{}\n", deck.trim_end(), slide);

        let written = self.store.write(path, &updated)?;
        info!(path = %written.display(), "Appended slide");
        Ok(written)
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    fn handle_validate_content(
        &self,
        tool: &ToolDefinition,
        arguments: Option<Value>,
    ) -> Result<String> {
        let params: ValidateContentParams = arguments::parse(tool, arguments)?;

        let content = match (params.content, params.path) {
            (Some(content), None) => content,
            (None, Some(path)) => self
                .store
                .read(&path)?
                .ok_or_else(|| Error::Storage(format!("Deck '{}' not found", path)))?,
            _ => {
                return Err(Error::invalid_argument(
                    &tool.name,
                    "exactly one of \"content\" or \"path\" is required",
                ))
            }
        };

        let result = validate(&content);
        debug!(valid = result.is_valid, errors = result.errors.len(), "Validated content");
        Ok(serde_json::to_string_pretty(&result)?)
    }

    fn resolve_author(&self, tool: &ToolDefinition, author: Option<String>) -> Result<String> {
        author
            .filter(|a| !a.trim().is_empty())
            .or_else(|| self.defaults.author.clone())
            .ok_or_else(|| {
                Error::invalid_argument(
                    &tool.name,
                    "\"author\" is required when no default author is configured",
                )
            })
    }
}

// ----------------------------------------------------------------------------
// Stateless tools
// ----------------------------------------------------------------------------

fn handle_recommend_theme(tool: &ToolDefinition, arguments: Option<Value>) -> Result<String> {
    let params: RecommendThemeParams = arguments::parse(tool, arguments)?;
    let theme = recommend_theme(&params.topic, params.style.as_deref());
    Ok(format!("Recommended theme: {}", theme))
}

fn handle_recommend_layout(tool: &ToolDefinition, arguments: Option<Value>) -> Result<String> {
    let params: RecommendLayoutParams = arguments::parse(tool, arguments)?;
    let layout = recommend_layout(&params.description);
    Ok(format!("Recommended layout: {}", layout))
}

fn handle_list_catalog(tool: &ToolDefinition, arguments: Option<Value>) -> Result<String> {
    let _: ListCatalogParams = arguments::parse(tool, arguments)?;
    let catalog = json!({
        "themes": THEMES,
        "layouts": LAYOUTS,
        "defaultTheme": DEFAULT_THEME,
        "defaultLayout": DEFAULT_LAYOUT,
    });
    Ok(serde_json::to_string_pretty(&catalog)?)
}

/// Use the requested theme verbatim, or recommend one from the topic.
fn resolve_theme(theme: Option<String>, topic: &str, style: Option<&str>) -> String {
    match theme.filter(|t| !t.trim().is_empty()) {
        Some(theme) => check_theme(&theme),
        None => recommend_theme(topic, style).to_string(),
    }
}

/// Warn about themes outside the catalog; they are still used as given.
fn check_theme(theme: &str) -> String {
    if !is_known_theme(theme) {
        warn!(theme = %theme, "Theme is not in the catalog, using it verbatim");
    }
    theme.to_string()
}

fn validation_summary(result: &ValidationResult) -> String {
    if result.is_valid {
        "\nValidation: passed".to_string()
    } else {
        format!(
            "\nValidation: {} issue(s)\n{}",
            result.errors.len(),
            result
                .errors
                .iter()
                .map(|e| format!("- {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }
}

// ----------------------------------------------------------------------------
// Parameters
// ----------------------------------------------------------------------------

/// Parameters for create-slidev-project tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateProjectParams {
    name: String,
    title: Option<String>,
    author: Option<String>,
    theme: Option<String>,
    #[serde(default, deserialize_with = "arguments::saturating_integer")]
    duration_minutes: Option<i64>,
}

/// Parameters for generate-presentation tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GeneratePresentationParams {
    topic: String,
    author: Option<String>,
    #[serde(default, deserialize_with = "arguments::saturating_integer")]
    duration_minutes: Option<i64>,
    theme: Option<String>,
    style: Option<String>,
    output_path: Option<String>,
}

/// Parameters for generate-outline tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GenerateOutlineParams {
    topic: String,
    #[serde(default, deserialize_with = "arguments::saturating_integer")]
    duration_minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecommendThemeParams {
    topic: String,
    style: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecommendLayoutParams {
    description: String,
}

/// Parameters for create-comparison tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateComparisonParams {
    title: String,
    left_title: String,
    left_items: Vec<String>,
    right_title: String,
    right_items: Vec<String>,
    output_path: Option<String>,
}

/// Parameters for create-image-slide tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateImageSlideParams {
    title: String,
    image_path: String,
    caption: Option<String>,
    layout: Option<String>,
    output_path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormatCodeParams {
    code: String,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ValidateContentParams {
    content: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListCatalogParams {}
