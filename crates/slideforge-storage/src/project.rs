//! Slidev project scaffolding.
//!
//! A project is a directory holding `slides.md`, a `package.json` manifest
//! and a short README. Dependencies are declared, never installed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use slideforge_core::{is_known_theme, Error, Result};
use tracing::info;

use crate::{relative_path, DeckStore};

const SLIDEV_CLI_VERSION: &str = "^0.50.0";

/// What to scaffold.
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    /// Directory name, relative to the store root
    pub name: String,
    pub title: String,
    pub author: String,
    pub theme: String,
    /// Rendered deck written to `slides.md`
    pub slides: String,
}

/// Paths written by [`scaffold_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    pub slides: PathBuf,
    pub manifest: PathBuf,
    pub readme: PathBuf,
}

/// `package.json` contents for a Slidev project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub private: bool,
    #[serde(rename = "type")]
    pub module_type: String,
    pub author: String,
    pub scripts: BTreeMap<String, String>,
    pub dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Manifest for a project using `theme`.
    pub fn new(name: &str, author: &str, theme: &str) -> Self {
        let scripts = [
            ("build", "slidev build"),
            ("dev", "slidev --open"),
            ("export", "slidev export"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut dependencies = BTreeMap::new();
        dependencies.insert("@slidev/cli".to_string(), SLIDEV_CLI_VERSION.to_string());
        dependencies.insert(theme_package(theme), "latest".to_string());

        Self {
            name: package_name(name),
            private: true,
            module_type: "module".to_string(),
            author: author.to_string(),
            scripts,
            dependencies,
        }
    }
}

/// npm package providing a theme. Catalog themes are official `@slidev` packages.
pub fn theme_package(theme: &str) -> String {
    if is_known_theme(theme) {
        format!("@slidev/theme-{}", theme)
    } else {
        format!("slidev-theme-{}", theme)
    }
}

/// Lower-case, dash-separated npm package name.
fn package_name(name: &str) -> String {
    let mut result = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if !result.ends_with('-') && !result.is_empty() {
            result.push('-');
        }
    }
    let trimmed = result.trim_end_matches('-');
    if trimmed.is_empty() {
        "slides".to_string()
    } else {
        trimmed.to_string()
    }
}

fn readme(title: &str, author: &str) -> String {
    format!(
        "# {title}\n\n\
         Presentation by {author}, built with [Slidev](https://sli.dev).\n\n\
         ## Getting started\n\n\
         ```bash\n\
         npm install\n\
         npm run dev\n\
         ```\n\n\
         Edit `slides.md` to change the content.\n"
    )
}

/// Write a project directory through `store`.
///
/// Fails if the directory already has a `slides.md`.
pub fn scaffold_project(store: &dyn DeckStore, spec: &ProjectSpec) -> Result<ProjectFiles> {
    let dir = relative_path(&spec.name)?;
    let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

    if store.exists(&file("slides.md")) {
        return Err(Error::Storage(format!(
            "Project '{}' already exists",
            spec.name
        )));
    }

    let manifest = PackageManifest::new(&spec.name, &spec.author, &spec.theme);
    let manifest_json = serde_json::to_string_pretty(&manifest)?;

    let files = ProjectFiles {
        slides: store.write(&file("slides.md"), &spec.slides)?,
        manifest: store.write(&file("package.json"), &format!("{}\n", manifest_json))?,
        readme: store.write(&file("README.md"), &readme(&spec.title, &spec.author))?,
    };

    info!(project = %spec.name, theme = %spec.theme, "Scaffolded project");
    Ok(files)
}
