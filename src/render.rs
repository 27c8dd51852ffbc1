//! Markdown-to-HTML rendering.
//!
//! [`render`] is the single entry point for the dialect. It never fails:
//! markers that no rule matches pass through as literal characters.

pub mod pipeline;
pub mod preview;
pub mod watch;

use std::sync::LazyLock;

pub use pipeline::{Pipeline, Stage};
pub use preview::{FileEntry, PageContext, PreviewError, PreviewRenderer};
pub use watch::{FileWatcher, WatchError, WatchEvent};

static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::new);

/// Render `markdown` to HTML with the default pipeline.
pub fn render(markdown: &str) -> String {
    DEFAULT_RENDERER.render(markdown)
}

/// Owns a pipeline and renders documents through it.
///
/// The pipeline is built once and never changes, so a renderer can be
/// shared freely between threads.
pub struct Renderer {
    pipeline: Pipeline,
}

impl Renderer {
    /// Create a renderer with the default dialect pipeline.
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::default_pipeline(),
        }
    }

    /// Render a whole document.
    pub fn render(&self, markdown: &str) -> String {
        let html = self.pipeline.run(markdown);
        tracing::debug!(input = markdown.len(), output = html.len(), "rendered document");
        html
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.pipeline.stage_names()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::samples;

    #[test]
    fn test_render_is_deterministic() {
        let first = render(samples::WELCOME);
        let second = render(samples::WELCOME);
        assert_eq!(first, second);
        assert_eq!(Renderer::new().render(samples::WELCOME), first);
    }

    #[test]
    fn test_heading_with_following_paragraph() {
        assert_eq!(render("# Top\ntext"), "<h1>Top</h1><hr>\n<p>text</p>");
    }

    #[test]
    fn test_level_three_heading_only() {
        let html = render("### Title");
        assert_eq!(html, "<h3>Title</h3>");
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_four_hashes_render_as_text() {
        assert_eq!(render("#### Four"), "#### Four");
    }

    #[test]
    fn test_bold() {
        assert_eq!(render("**a**"), "<b>a</b>");
    }

    #[test]
    fn test_escaped_bold_renders_literal_markers() {
        assert_eq!(render(r"\*\*a\*\*"), "**a**");
    }

    #[test]
    fn test_underscore_bold_boundaries() {
        assert_eq!(render(" __a__ "), "<b> a </b>");
        assert_eq!(render("x__a__y"), "<p>x__a__y</p>");
    }

    #[test]
    fn test_escaped_underscores_are_restored() {
        assert_eq!(render(r"say \_this\_ now"), "<p>say _this_ now</p>");
    }

    #[test]
    fn test_strikethrough_around_escaped_tilde() {
        assert_eq!(render(r"~~\~~~"), "<s>~</s>");
    }

    #[test]
    fn test_link() {
        assert_eq!(render("[cap](http://x)"), "<a href='http://x'>cap</a>");
    }

    #[test]
    fn test_image_is_not_an_anchor() {
        let html = render("![cap](http://x)");
        assert_eq!(
            html,
            "<img src='http://x' title='cap' style='max-width: 80%' />"
        );
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_link_then_image_on_one_line() {
        assert_eq!(
            render("[a](x) and ![b](y)"),
            "<a href='x'>a</a> and <img src='y' title='b' style='max-width: 80%' />"
        );
    }

    #[test]
    fn test_image_then_link_on_one_line() {
        assert_eq!(
            render("![b](y) then [a](x)"),
            "<img src='y' title='b' style='max-width: 80%' /> then <a href='x'>a</a>"
        );
    }

    #[test]
    fn test_link_inside_paragraph() {
        assert_eq!(
            render("see [docs](http://x) here"),
            "<p>see <a href='http://x'>docs</a> here</p>"
        );
    }

    #[test]
    fn test_consecutive_lines_form_one_paragraph() {
        assert_eq!(render("first\nsecond"), "<p>first\nsecond</p>");
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        assert_eq!(render("first\n\nsecond"), "<p>first</p>\n\n<p>second</p>");
    }

    #[test]
    fn test_trailing_spaces_insert_break_inside_paragraph() {
        assert_eq!(render("line one  \nline two"), "<p>line one<br>\nline two</p>");
    }

    #[test]
    fn test_crlf_document() {
        assert_eq!(
            render("# T\r\nbody  \r\nnext"),
            "<h1>T</h1><hr>\r\n<p>body<br></p>\r\n<p>next</p>"
        );
        assert_eq!(render("a  \r\nb"), "<p>a<br></p>\r\n<p>b</p>");
    }

    #[test]
    fn test_accented_initial_letter_is_not_a_paragraph() {
        assert_eq!(render("Čau *světe*"), "Čau <i>světe</i>");
    }

    #[test]
    fn test_html_passes_through_unescaped() {
        assert_eq!(render("a < b & c"), "<p>a < b & c</p>");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_mixed_document() {
        let markdown = "# Notes\n\
                        Some **bold** and *italic*  \n\
                        still the same paragraph\n\
                        \n\
                        ![pic](p.png)\n\
                        ~~old~~ text";
        let expected = "<h1>Notes</h1><hr>\n\
                        <p>Some <b>bold</b> and <i>italic</i><br>\n\
                        still the same paragraph</p>\n\
                        \n\
                        <img src='p.png' title='pic' style='max-width: 80%' />\n\
                        <s>old</s> text";
        assert_eq!(render(markdown), expected);
    }

    #[test]
    fn test_renderer_stage_names() {
        assert_eq!(Renderer::new().stage_names().len(), 7);
    }
}
