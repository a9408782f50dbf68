//! Declarative page configuration and schema validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One entry of the declarative `rapidoc` page list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Display label for the generated page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Relative output path of the page, without extension
    pub page: String,

    /// HTTP(S) URL of the spec, or a path relative to the config root
    pub spec: String,

    /// Inline the whole spec into the generated page
    #[serde(default)]
    pub embed: bool,

    /// Override template, relative to the config root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// RapiDoc presentation options, spread onto the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opts: Option<RapidocOpts>,
}

/// Presentation options recognized by the RapiDoc element. Keys outside
/// this set are rejected at validation time; values are type-checked
/// but not checked for semantic legality (an unknown `theme` string
/// passes through unchanged).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RapidocOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_description_headings_in_navbar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_header: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_authentication: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_server_selection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_api_list_style_selection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_spec_url_load: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_spec_file_load: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_spec_file_download: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_advanced_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_try: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_endpoints_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_tags: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_method_in_nav_bar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_path_in_nav_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_item_spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

/// The declarative list violates the schema. Raised before any build
/// I/O happens; `path` is the dotted path of the offending field,
/// starting with the entry index.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("improper rapidoc configuration at {path}: {message}")]
pub struct ConfigError {
    pub path: String,
    pub message: String,
}

/// Validate the whole page list in one pass.
///
/// Settings in a site config may contain improper values or typos; to
/// prevent misbehaviour deep in the build, every entry is checked for
/// required fields, value types, and unknown keys before anything is
/// rendered or copied. A missing list (`Null`) validates to no pages.
pub fn validate_pages(value: &serde_yaml::Value) -> Result<Vec<PageConfig>, ConfigError> {
    let entries = match value {
        serde_yaml::Value::Null => return Ok(Vec::new()),
        serde_yaml::Value::Sequence(entries) => entries,
        _ => {
            return Err(ConfigError {
                path: String::new(),
                message: "expected a list of page entries".to_string(),
            })
        }
    };

    let mut pages = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let page = validate_entry(index, entry)?;

        // Colliding identifiers would silently overwrite each other's
        // output file, so they are rejected up front.
        if !seen.insert(page.page.clone()) {
            return Err(ConfigError {
                path: format!("{index}.page"),
                message: format!("duplicate page identifier {:?}", page.page),
            });
        }

        pages.push(page);
    }

    Ok(pages)
}

/// Check a single entry, collecting any unknown keys with their dotted
/// path (tolerating none of them).
fn validate_entry(index: usize, entry: &serde_yaml::Value) -> Result<PageConfig, ConfigError> {
    let mut unknown = Vec::new();
    let result: Result<PageConfig, serde_yaml::Error> =
        serde_ignored::deserialize(entry.clone(), |path: serde_ignored::Path| {
            unknown.push(path.to_string());
        });

    let page = result.map_err(|err| ConfigError {
        path: index.to_string(),
        message: err.to_string(),
    })?;

    if let Some(key) = unknown.first() {
        return Err(ConfigError {
            path: format!("{index}.{key}"),
            message: "unknown configuration key".to_string(),
        });
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(source: &str) -> serde_yaml::Value {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn validates_full_entry() {
        let pages = validate_pages(&yaml(
            r#"
- name: Petstore
  page: api
  spec: ./openapi.yaml
  embed: true
  template: custom.html
  opts:
    theme: dark
    show-header: false
    render-style: read
"#,
        ))
        .unwrap();

        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.name.as_deref(), Some("Petstore"));
        assert_eq!(page.page, "api");
        assert_eq!(page.spec, "./openapi.yaml");
        assert!(page.embed);
        assert_eq!(page.template.as_deref(), Some("custom.html"));

        let opts = page.opts.as_ref().unwrap();
        assert_eq!(opts.theme.as_deref(), Some("dark"));
        assert_eq!(opts.show_header, Some(false));
        assert_eq!(opts.render_style.as_deref(), Some("read"));
    }

    #[test]
    fn minimal_entry_defaults() {
        let pages = validate_pages(&yaml("- {page: api, spec: ./openapi.yaml}")).unwrap();

        assert_eq!(pages[0].name, None);
        assert!(!pages[0].embed);
        assert_eq!(pages[0].template, None);
        assert_eq!(pages[0].opts, None);
    }

    #[test]
    fn missing_list_is_empty() {
        assert!(validate_pages(&serde_yaml::Value::Null).unwrap().is_empty());
        assert!(validate_pages(&yaml("[]")).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_list() {
        let err = validate_pages(&yaml("{page: api, spec: s}")).unwrap_err();
        assert!(err.message.contains("list"));
    }

    #[test]
    fn rejects_missing_spec() {
        let err = validate_pages(&yaml("- {page: api}")).unwrap_err();
        assert_eq!(err.path, "0");
        assert!(err.message.contains("spec"), "{}", err.message);
    }

    #[test]
    fn rejects_missing_page() {
        let err = validate_pages(&yaml("- {spec: ./openapi.yaml}")).unwrap_err();
        assert_eq!(err.path, "0");
        assert!(err.message.contains("page"), "{}", err.message);
    }

    #[test]
    fn rejects_unknown_top_level_key() {
        let err =
            validate_pages(&yaml("- {page: api, spec: s, specc: typo}")).unwrap_err();
        assert_eq!(err.path, "0.specc");
    }

    #[test]
    fn rejects_unknown_opts_key() {
        let err = validate_pages(&yaml(
            r#"
- {page: a, spec: s}
- page: b
  spec: s2
  opts:
    show-headr: true
"#,
        ))
        .unwrap_err();
        assert_eq!(err.path, "1.opts.show-headr");
    }

    #[test]
    fn rejects_wrong_opt_type() {
        let err = validate_pages(&yaml(
            "- {page: api, spec: s, opts: {allow-try: sure}}",
        ))
        .unwrap_err();
        assert_eq!(err.path, "0");
        assert!(err.message.contains("boolean"), "{}", err.message);
    }

    #[test]
    fn rejects_wrong_embed_type() {
        let err = validate_pages(&yaml("- {page: api, spec: s, embed: 1}")).unwrap_err();
        assert_eq!(err.path, "0");
    }

    #[test]
    fn rejects_duplicate_page_identifiers() {
        let err = validate_pages(&yaml(
            "[{page: api, spec: a}, {page: api, spec: b}]",
        ))
        .unwrap_err();
        assert_eq!(err.path, "1.page");
        assert!(err.message.contains("duplicate"));
    }

    #[test]
    fn error_message_names_the_path() {
        let err = validate_pages(&yaml("- {page: api, spec: s, extra: 1}")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "improper rapidoc configuration at 0.extra: unknown configuration key"
        );
    }

    #[test]
    fn empty_opts_serialize_to_empty_mapping() {
        let json = serde_json::to_string(&RapidocOpts::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn opts_keep_kebab_case_keys() {
        let opts = RapidocOpts {
            use_path_in_nav_bar: Some(true),
            nav_bg_color: Some("#fff".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"use-path-in-nav-bar\":true"));
        assert!(json.contains("\"nav-bg-color\":\"#fff\""));
    }
}
