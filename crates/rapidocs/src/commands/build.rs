//! Documentation build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rapidocs_static::{BuildConfig, SiteBuilder};
use serde::Deserialize;

/// Configuration file structure (rapidoc.yml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    /// Declarative page list; validated by rapidocs-static
    #[serde(default)]
    rapidoc: serde_yaml::Value,

    /// Upstream bundle overriding the built-in rapidoc.js
    #[serde(default)]
    rapidoc_uri: Option<String>,

    /// Output directory
    #[serde(default = "default_output")]
    output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

/// Load configuration from the given rapidoc.yml path.
fn load_config(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Run the build command. Relative spec and template paths resolve
/// against the config file's directory.
pub async fn run(config_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building API documentation pages...");

    let file_config = load_config(&config_path)?;
    let base_dir = config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = BuildConfig {
        base_dir,
        output_dir: output.unwrap_or(file_config.output),
        pages: file_config.rapidoc,
        rapidoc_uri: file_config.rapidoc_uri,
    };

    let result = SiteBuilder::new(config).build().await?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn builds_from_config_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("openapi.yaml"),
            "openapi: \"3.0.0\"\npaths: {}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("rapidoc.yml"),
            r#"
output: dist
rapidoc:
  - page: api
    spec: ./openapi.yaml
    embed: true
"#,
        )
        .unwrap();

        run(
            temp.path().join("rapidoc.yml"),
            Some(temp.path().join("site")),
        )
        .await
        .unwrap();

        assert!(temp.path().join("site/api.html").exists());
        assert!(temp.path().join("site/_static/rapidoc.js").exists());
    }

    #[tokio::test]
    async fn missing_config_file_fails() {
        let temp = tempdir().unwrap();
        let err = run(temp.path().join("rapidoc.yml"), None).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
