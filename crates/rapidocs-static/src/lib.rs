//! Static API documentation builder for OpenAPI/Swagger specifications.
//!
//! Resolves a declarative list of page configurations into render-ready
//! contexts, renders each page with the bundled (or an overriding)
//! RapiDoc template, and materializes the viewer bundle into the output
//! tree.

pub mod assets;
pub mod builder;
pub mod config;
pub mod resolver;
pub mod templates;

pub use assets::{AssetError, BuildOutcome};
pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use config::{ConfigError, PageConfig, RapidocOpts};
pub use resolver::{RenderTuple, ResolveError, Resolver, SpecSource};
