//! Build orchestration: validate, resolve, render, materialize.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::assets::{self, AssetError, BuildOutcome};
use crate::config;
use crate::resolver::{RenderTuple, ResolveError, Resolver};
use crate::templates;

/// Configuration for building the documentation pages.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory relative spec and template paths resolve against
    pub base_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// The declarative `rapidoc` page list, validated before use
    pub pages: serde_yaml::Value,

    /// Optional upstream bundle overriding the built-in rapidoc.js
    pub rapidoc_uri: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            output_dir: PathBuf::from("dist"),
            pages: serde_yaml::Value::Null,
            rapidoc_uri: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to render page {page:?}: {source}")]
    Template {
        page: String,
        source: minijinja::Error,
    },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Drives the two build hooks: page collection before rendering and
/// asset materialization after it.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Validate the page list and resolve every entry into a render
    /// tuple. A schema violation aborts before any file is touched.
    pub fn collect_pages(&self) -> Result<Vec<RenderTuple>, ResolveError> {
        let pages = config::validate_pages(&self.config.pages)?;
        Resolver::new(self.config.base_dir.clone(), self.config.output_dir.clone()).resolve(pages)
    }

    /// Post-render hook: put the viewer bundle in place, unless the
    /// build failed.
    pub async fn finish(&self, outcome: BuildOutcome) -> Result<(), AssetError> {
        assets::materialize(
            &self.config.output_dir,
            outcome,
            self.config.rapidoc_uri.as_deref(),
        )
        .await
    }

    /// Build every configured page, then materialize assets.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let rendered = self.render_all();
        let outcome = if rendered.is_ok() {
            BuildOutcome::Succeeded
        } else {
            BuildOutcome::Failed
        };
        self.finish(outcome).await?;

        let pages = rendered?;

        Ok(BuildResult {
            pages,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn render_all(&self) -> Result<usize, BuildError> {
        let tuples = self.collect_pages()?;
        let count = tuples.len();

        for tuple in tuples {
            self.render_page(tuple)?;
        }

        Ok(count)
    }

    fn render_page(&self, tuple: RenderTuple) -> Result<(), BuildError> {
        let html =
            templates::render_page(&tuple.template, &tuple.context).map_err(|source| {
                BuildError::Template {
                    page: tuple.page.clone(),
                    source,
                }
            })?;

        let output_path = self.config.output_dir.join(format!("{}.html", tuple.page));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;

        tracing::debug!("Rendered {}", output_path.display());

        Ok(())
    }
}
