//! Initialize a rapidocs project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing rapidocs...");

    let config_path = Path::new("rapidoc.yml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write rapidoc.yml")?;
        tracing::info!("Created rapidoc.yml");
    } else {
        tracing::warn!("rapidoc.yml already exists. Use --yes to overwrite.");
    }

    let spec_path = Path::new("openapi.yaml");
    if !spec_path.exists() || yes {
        fs::write(spec_path, DEFAULT_SPEC).context("Failed to write openapi.yaml")?;
        tracing::info!("Created openapi.yaml");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'rapidocs build' to generate the documentation pages.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# rapidocs configuration

# Output directory for the generated pages
output: dist

# Optional upstream RapiDoc bundle; when set, it replaces the built-in
# rapidoc.js after a successful build.
# rapidoc_uri: https://unpkg.com/rapidoc/dist/rapidoc-min.js

# One entry per generated page. `spec` is either an HTTP(S) URL or a
# path relative to this file; `embed: true` inlines the whole spec so
# the page works offline.
rapidoc:
  - name: Example API
    page: api
    spec: ./openapi.yaml
    embed: true
    opts:
      theme: dark
      show-header: false
"#;

const DEFAULT_SPEC: &str = r#"openapi: "3.0.0"
info:
  title: Example API
  version: "1.0.0"
paths:
  /ping:
    get:
      summary: Health check
      responses:
        "200":
          description: The service is up
          content:
            application/json:
              schema:
                type: object
                properties:
                  status:
                    type: string
"#;
