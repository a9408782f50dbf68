//! Bundled page template and minijinja rendering.

use minijinja::Environment;

use crate::config::PageConfig;

/// Default page template, used when an entry carries no `template`
/// override. The page context is the variable namespace: `spec` is the
/// resolved reference (URL, `_specs/` path, or inline JSON in embed
/// mode) and `opts` is spread onto the element as attributes.
pub const DEFAULT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ name | default(page) }}</title>
  <script type="module" src="_static/rapidoc.js"></script>
  <style>html, body { margin: 0; height: 100%; }</style>
</head>
<body>
{% if embed %}
  <rapi-doc id="api"{% for key, value in opts | items %} {{ key }}="{{ value }}"{% endfor %}></rapi-doc>
  <script>
    document.addEventListener('DOMContentLoaded', function () {
      document.getElementById('api').loadSpec({{ spec | safe }});
    });
  </script>
{% else %}
  <rapi-doc spec-url="{{ spec }}"{% for key, value in opts | items %} {{ key }}="{{ value }}"{% endfor %}></rapi-doc>
{% endif %}
</body>
</html>
"##;

/// Compile a template source and render it with the page context.
///
/// Every page gets a fresh environment so an override template for one
/// entry can never shadow another entry's template.
pub fn render_page(source: &str, context: &PageConfig) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template_owned("page.html".to_string(), source.to_string())?;

    let template = env.get_template("page.html")?;
    template.render(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RapidocOpts;

    fn page(spec: &str, embed: bool) -> PageConfig {
        PageConfig {
            name: None,
            page: "api".to_string(),
            spec: spec.to_string(),
            embed,
            template: None,
            opts: Some(Default::default()),
        }
    }

    #[test]
    fn renders_remote_page() {
        let html = render_page(DEFAULT_TEMPLATE, &page("https://example.com/spec.yaml", false))
            .unwrap();

        assert!(html.contains(r#"spec-url="https://example.com/spec.yaml""#));
        assert!(html.contains("_static/rapidoc.js"));
        assert!(!html.contains("loadSpec"));
    }

    #[test]
    fn renders_embedded_spec_inline() {
        let html = render_page(
            DEFAULT_TEMPLATE,
            &page(r#"{"openapi":"3.0.0","paths":{}}"#, true),
        )
        .unwrap();

        assert!(html.contains(r#"loadSpec({"openapi":"3.0.0","paths":{}})"#));
        assert!(!html.contains("spec-url"));
    }

    #[test]
    fn spreads_opts_as_attributes() {
        let mut ctx = page("https://example.com/spec.yaml", false);
        ctx.opts = Some(RapidocOpts {
            theme: Some("dark".to_string()),
            allow_try: Some(false),
            ..Default::default()
        });

        let html = render_page(DEFAULT_TEMPLATE, &ctx).unwrap();

        assert!(html.contains(r#"theme="dark""#));
        assert!(html.contains(r#"allow-try="false""#));
    }

    #[test]
    fn title_falls_back_to_page_id() {
        let html = render_page(DEFAULT_TEMPLATE, &page("https://example.com/s.yaml", false))
            .unwrap();
        assert!(html.contains("<title>api</title>"));
    }

    #[test]
    fn title_uses_name_when_set() {
        let mut ctx = page("https://example.com/s.yaml", false);
        ctx.name = Some("Petstore API".to_string());

        let html = render_page(DEFAULT_TEMPLATE, &ctx).unwrap();
        assert!(html.contains("<title>Petstore API</title>"));
    }

    #[test]
    fn renders_custom_template() {
        let html = render_page("<h1>{{ page }}</h1>", &page("s", false)).unwrap();
        assert_eq!(html, "<h1>api</h1>");
    }
}
