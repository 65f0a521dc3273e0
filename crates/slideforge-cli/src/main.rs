//! Slideforge CLI - Command-line interface for slideforge.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use slideforge_content::{generate_outline, generate_presentation, validate};
use slideforge_core::config::Config;
use slideforge_core::PresentationRequest;
use slideforge_mcp::{McpServer, ToolHandler};
use slideforge_storage::{DeckStore, FsStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slideforge")]
#[command(author, version, about = "Slideforge - Slidev presentation tools for AI assistants", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdin/stdout
    Serve {
        /// Directory that decks and projects are written to
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Generate a presentation deck
    Generate {
        /// Presentation topic
        #[arg(short, long)]
        topic: String,

        /// Presenter name
        #[arg(short, long)]
        author: Option<String>,

        /// Talk length in minutes
        #[arg(short, long)]
        duration: Option<i64>,

        /// Slidev theme (recommended from the topic when omitted)
        #[arg(long)]
        theme: Option<String>,

        /// Style hint for theme selection
        #[arg(long)]
        style: Option<String>,

        /// Write the deck to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the outline for a talk
    Outline {
        /// Presentation topic
        #[arg(short, long)]
        topic: String,

        /// Talk length in minutes
        #[arg(short, long)]
        duration: Option<i64>,
    },

    /// Check a deck for structural problems
    Validate {
        /// Markdown file to check
        file: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file path
    Path,

    /// Get a value (e.g. defaults.author)
    Get {
        /// Key in section.field form
        key: String,
    },

    /// Set a value (e.g. defaults.author "Ada Lovelace")
    Set {
        /// Key in section.field form
        key: String,
        /// New value
        value: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries MCP traffic and command output.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    match cli.command {
        Some(Commands::Serve { root }) => {
            let config = Config::load_from(&config_path)?;
            let root = root.unwrap_or_else(|| config.root_dir());
            tracing::info!("Serving decks from {}", root.display());

            let handler = ToolHandler::new(Arc::new(FsStore::new(root)), config.defaults);
            McpServer::new(handler).run().await?;
        }
        Some(Commands::Generate {
            topic,
            author,
            duration,
            theme,
            style,
            output,
        }) => {
            let config = Config::load_from(&config_path)?;
            let author = author.or(config.defaults.author).context(
                "No author given. Pass --author or run `slideforge config set defaults.author NAME`",
            )?;

            let request = PresentationRequest {
                duration_minutes: duration.unwrap_or(config.defaults.duration_minutes),
                theme,
                style,
                ..PresentationRequest::new(topic, author)
            };
            let deck = generate_presentation(&request);
            for error in &deck.validation.errors {
                tracing::warn!("{}", error);
            }

            match output {
                Some(path) => {
                    let written = write_file(&path, &deck.markdown)?;
                    tracing::info!(
                        "Wrote {} ({} outline items, theme: {})",
                        written.display(),
                        deck.outline.len(),
                        deck.theme
                    );
                }
                None => print!("{}", deck.markdown),
            }
        }
        Some(Commands::Outline { topic, duration }) => {
            let config = Config::load_from(&config_path)?;
            let duration = duration.unwrap_or(config.defaults.duration_minutes);
            for (i, item) in generate_outline(&topic, duration).iter().enumerate() {
                println!("{}. {}", i + 1, item);
            }
        }
        Some(Commands::Validate { file }) => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let result = validate(&content);

            if result.is_valid {
                println!("{}: valid", file.display());
            } else {
                for error in &result.errors {
                    println!("{}: {}", file.display(), error);
                }
                anyhow::bail!(
                    "{} has {} validation error(s)",
                    file.display(),
                    result.errors.len()
                );
            }
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                let config = Config::load_from(&config_path)?;
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigCommands::Path => println!("{}", config_path.display()),
            ConfigCommands::Get { key } => {
                let config = Config::load_from(&config_path)?;
                match config.get(&key)? {
                    Some(value) => println!("{}", value),
                    None => println!("(not set)"),
                }
            }
            ConfigCommands::Set { key, value } => {
                let mut config = Config::load_from(&config_path)?;
                config.set(&key, &value)?;
                config.save_to(&config_path)?;
                tracing::info!("Set {} in {}", key, config_path.display());
            }
        },
        None => {
            println!("Slideforge - Slidev presentation tools for AI assistants");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}

/// Write `contents` to `path` through a store rooted at its parent directory.
fn write_file(path: &Path, contents: &str) -> anyhow::Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid output path {}", path.display()))?;
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(FsStore::new(root).write(name, contents)?)
}
