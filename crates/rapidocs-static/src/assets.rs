//! Materialization of the RapiDoc viewer bundle into the output tree.

use std::fs;
use std::path::Path;

/// Output subdirectory for static assets.
pub const STATIC_DIR: &str = "_static";

/// Filename the page template loads from `_static/`.
pub const SCRIPT_NAME: &str = "rapidoc.js";

// Minimal stand-in for the RapiDoc web component. It renders a plain
// placeholder so generated pages stay inspectable; configuring
// `rapidoc_uri` replaces it with a full upstream bundle.
const RAPIDOC_JS: &str = r#"/* rapidocs bundled fallback for <rapi-doc> */
(function () {
  'use strict';

  if (window.customElements && customElements.get('rapi-doc')) {
    return;
  }

  class RapiDocFallback extends HTMLElement {
    connectedCallback() {
      var specUrl = this.getAttribute('spec-url');
      this.innerHTML =
        '<div style="font-family: system-ui, sans-serif; padding: 2rem;">' +
        '<h1>API documentation</h1>' +
        (specUrl
          ? '<p>Specification: <a href="' + specUrl + '">' + specUrl + '</a></p>'
          : '<p>The specification is embedded in this page.</p>') +
        '<p>Set <code>rapidoc_uri</code> to a RapiDoc release bundle to render it interactively.</p>' +
        '</div>';
    }

    loadSpec(spec) {
      this.spec = spec;
    }
  }

  customElements.define('rapi-doc', RapiDocFallback);
})();
"#;

/// Signal from the host build, gating asset materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    Failed,
}

/// Errors that can occur while materializing assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to fetch rapidoc bundle from {uri}: {source}")]
    Fetch {
        uri: String,
        source: reqwest::Error,
    },
}

/// Put the viewer bundle in place under `_static/`.
///
/// Does nothing when the build failed, so no partial asset state is
/// ever written. On success the bundled script is always written
/// first; if an override URI is configured, the fetched bytes then
/// overwrite it under the same filename. No checksum or content-type
/// validation is performed, and a failed fetch aborts the build.
pub async fn materialize(
    output_dir: &Path,
    outcome: BuildOutcome,
    override_uri: Option<&str>,
) -> Result<(), AssetError> {
    if outcome == BuildOutcome::Failed {
        return Ok(());
    }

    let static_dir = output_dir.join(STATIC_DIR);
    fs::create_dir_all(&static_dir)?;

    let target = static_dir.join(SCRIPT_NAME);
    fs::write(&target, RAPIDOC_JS)?;

    // RapiDoc releases move faster than this crate, so the bundled
    // copy can be swapped for an upstream one at build time.
    if let Some(uri) = override_uri {
        tracing::info!("Fetching rapidoc bundle from {}", uri);

        let client = reqwest::Client::new();
        let response = client
            .get(uri)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| AssetError::Fetch {
                uri: uri.to_string(),
                source,
            })?;

        let bytes = response.bytes().await.map_err(|source| AssetError::Fetch {
            uri: uri.to_string(),
            source,
        })?;

        fs::write(&target, &bytes)?;
        tracing::debug!("Replaced bundled {} with {} bytes", SCRIPT_NAME, bytes.len());
    }

    Ok(())
}
