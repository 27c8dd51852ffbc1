//! Full-page preview rendering.
//!
//! Wraps rendered document HTML in a standalone page with a file sidebar
//! and, when serving, a live-reload hook.

use serde::Serialize;
use tera::{Context, Tera};

const PAGE_TEMPLATE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if file %}{{ file }} - {% endif %}{{ title }}</title>
  <style>
    body { margin: 0; display: flex; font-family: sans-serif; }
    nav { min-width: 12rem; padding: 1rem; background: #f4f4f4; }
    nav a { display: block; padding: 0.25rem 0; color: inherit; }
    nav a.open { font-weight: bold; }
    main { flex: 1; padding: 1rem 2rem; }
  </style>
</head>
<body>
  {% if files %}
  <nav>
    {% for entry in files %}
    <a href="/files/{{ entry.name | urlencode }}"{% if entry.open %} class="open"{% endif %}>{{ entry.name }}</a>
    {% endfor %}
  </nav>
  {% endif %}
  <main id="preview-section">
{{ content | safe }}
  </main>
  {% if live_reload %}
  <script>
    new EventSource("/_mdpad/live-reload").addEventListener("reload", () => location.reload());
  </script>
  {% endif %}
</body>
</html>
"#;

#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Renders preview pages, wrapping Tera.
pub struct PreviewRenderer {
    tera: Tera,
    title: String,
}

impl PreviewRenderer {
    /// Create a preview renderer; `title` is shown in every page title.
    pub fn new(title: impl Into<String>) -> Result<Self, PreviewError> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
        Ok(Self {
            tera,
            title: title.into(),
        })
    }

    /// Render a full page around already-rendered document HTML.
    pub fn render_page(&self, page: &PageContext) -> Result<String, PreviewError> {
        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("file", &page.file);
        context.insert("files", &page.files);
        context.insert("content", &page.content);
        context.insert("live_reload", &page.live_reload);

        Ok(self.tera.render(PAGE_TEMPLATE_NAME, &context)?)
    }
}

/// Context passed to the page template.
#[derive(Debug, Default, Serialize)]
pub struct PageContext {
    /// Name of the document being previewed, if it has one
    pub file: Option<String>,
    /// Sidebar entries; the sidebar is omitted when empty
    pub files: Vec<FileEntry>,
    /// Rendered document HTML, inserted without escaping
    pub content: String,
    pub live_reload: bool,
}

/// A sidebar entry.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub open: bool,
}
