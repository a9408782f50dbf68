//! Spec-source resolution: turns validated page entries into
//! render-ready contexts, copying or inlining spec files as needed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, PageConfig};
use crate::templates;

/// Output subdirectory local spec files are copied into.
pub const SPEC_DIR: &str = "_specs";

/// How a page's `spec` reference is turned into its final form.
/// Exactly one mode applies per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecSource {
    /// Parse the local file and inline it into the page as JSON
    Embed,
    /// Leave the URL untouched; the page fetches it at view time
    Remote,
    /// Copy the local file under `_specs/` and point the page there
    LocalCopy,
}

impl SpecSource {
    /// Classify an entry. `embed` wins over everything; a literal
    /// `http`/`https` prefix marks a remote spec; anything else is a
    /// local file to copy into the output tree.
    pub fn classify(embed: bool, spec: &str) -> Self {
        if embed {
            Self::Embed
        } else if spec.starts_with("http") {
            Self::Remote
        } else {
            Self::LocalCopy
        }
    }
}

/// Errors that can occur while resolving page entries.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot parse spec {spec:?}: {message}")]
    SpecParse { spec: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One render-ready page: the output identifier, the context acting as
/// the template's variable namespace, and the template source to
/// compile it with.
#[derive(Debug, Clone)]
pub struct RenderTuple {
    pub page: String,
    pub context: PageConfig,
    pub template: String,
}

/// Resolves validated page entries against a config root and an output
/// directory. Stateless across calls; resolving the same input twice
/// yields identical tuples.
pub struct Resolver {
    base_dir: PathBuf,
    output_dir: PathBuf,
}

impl Resolver {
    pub fn new(base_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            base_dir,
            output_dir,
        }
    }

    /// Resolve every entry into a render tuple, preserving input order.
    /// The list must already have passed [`crate::config::validate_pages`].
    pub fn resolve(&self, pages: Vec<PageConfig>) -> Result<Vec<RenderTuple>, ResolveError> {
        pages
            .into_iter()
            .map(|page| self.resolve_page(page))
            .collect()
    }

    fn resolve_page(&self, mut ctx: PageConfig) -> Result<RenderTuple, ResolveError> {
        let template = self.template_source(&ctx)?;

        match SpecSource::classify(ctx.embed, &ctx.spec) {
            SpecSource::Embed => ctx.spec = self.embed_spec(&ctx.spec)?,
            SpecSource::Remote => {}
            SpecSource::LocalCopy => ctx.spec = self.copy_spec(&ctx.spec)?,
        }

        // Templates assume the key is always present.
        if ctx.opts.is_none() {
            ctx.opts = Some(Default::default());
        }

        tracing::debug!("Resolved page {} (spec: {})", ctx.page, ctx.spec);

        Ok(RenderTuple {
            page: ctx.page.clone(),
            context: ctx,
            template,
        })
    }

    /// Read the override template, or fall back to the bundled one.
    /// Compilation is left to the rendering step.
    fn template_source(&self, ctx: &PageConfig) -> Result<String, ResolveError> {
        match &ctx.template {
            Some(path) => Ok(fs::read_to_string(self.base_dir.join(path))?),
            None => Ok(templates::DEFAULT_TEMPLATE.to_string()),
        }
    }

    /// Inline the whole spec as compact JSON so the generated page is
    /// browsable without any web server.
    fn embed_spec(&self, spec: &str) -> Result<String, ResolveError> {
        let parse_err = |message: String| ResolveError::SpecParse {
            spec: spec.to_string(),
            message,
        };

        let raw = fs::read_to_string(self.base_dir.join(spec))
            .map_err(|err| parse_err(err.to_string()))?;
        // YAML is a superset of JSON, so this accepts both.
        let contents: serde_json::Value =
            serde_yaml::from_str(&raw).map_err(|err| parse_err(err.to_string()))?;

        serde_json::to_string(&contents).map_err(|err| parse_err(err.to_string()))
    }

    /// Copy a local spec into the output tree so it is still reachable
    /// once the result is deployed, and return the rewritten reference.
    fn copy_spec(&self, spec: &str) -> Result<String, ResolveError> {
        let name = Path::new(spec).file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("spec path {spec:?} has no file name"),
            )
        })?;

        let spec_dir = self.output_dir.join(SPEC_DIR);
        fs::create_dir_all(&spec_dir)?;
        // Full overwrite; no staleness check.
        fs::copy(self.base_dir.join(spec), spec_dir.join(name))?;

        Ok(format!("{}/{}", SPEC_DIR, name.to_string_lossy()))
    }
}
