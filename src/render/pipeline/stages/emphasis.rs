//! Emphasis stage.
//!
//! Bold is resolved before italic for both marker characters, so the
//! single-marker rules never see half of a double marker that was already
//! consumed. The underscore forms additionally need whitespace on both
//! sides, which keeps them from firing inside identifiers like
//! `snake_case_name`.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::{Boundary, Rule, apply_all};

/// Stage that rewrites bold, italic and strikethrough markers.
///
/// Star and tilde markers directly after a backslash are escaped: they are
/// left in place for the unescape stage. Span content never crosses a line
/// and never ends with a backslash.
pub struct EmphasisStage {
    rules: Vec<Rule>,
}

impl EmphasisStage {
    pub fn new() -> Self {
        let escaped = Boundary::NotPrecededBy('\\');
        Self {
            rules: vec![
                Rule::new("bold", r"\*\*([^\n]*?[^\n\\])\*\*", "<b>${1}</b>")
                    .with_boundary(escaped),
                Rule::new("italic", r"\*([^\n]*?[^\n\\])\*", "<i>${1}</i>").with_boundary(escaped),
                Rule::new(
                    "underscore-bold",
                    r"(\s)__([^_\n]*?[^\n\\])__(\s)",
                    "<b>${1}${2}${3}</b>",
                ),
                Rule::new(
                    "underscore-italic",
                    r"(\s)_([^_\n]*?[^\n\\])_(\s)",
                    "<i>${1}${2}${3}</i>",
                ),
                Rule::new("strikethrough", r"~~([^\n]*?[^\n\\])~~", "<s>${1}</s>")
                    .with_boundary(escaped),
            ],
        }
    }
}

impl Default for EmphasisStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for EmphasisStage {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn process(&self, text: &str) -> String {
        apply_all(&self.rules, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emphasis(text: &str) -> String {
        EmphasisStage::new().process(text)
    }

    #[test]
    fn test_bold() {
        assert_eq!(emphasis("**a**"), "<b>a</b>");
        assert_eq!(emphasis("x **bold** y"), "x <b>bold</b> y");
    }

    #[test]
    fn test_bold_is_shortest_match() {
        assert_eq!(emphasis("**a** and **b**"), "<b>a</b> and <b>b</b>");
    }

    #[test]
    fn test_italic() {
        assert_eq!(emphasis("*a*"), "<i>a</i>");
    }

    #[test]
    fn test_bold_then_italic_on_one_line() {
        assert_eq!(
            emphasis("**bold** and *it*"),
            "<b>bold</b> and <i>it</i>"
        );
    }

    #[test]
    fn test_inside_word() {
        assert_eq!(emphasis("U**PRO**ST*Ř*ED"), "U<b>PRO</b>ST<i>Ř</i>ED");
    }

    #[test]
    fn test_escaped_bold_is_left_for_unescape() {
        assert_eq!(emphasis(r"\*\*a\*\*"), r"\*\*a\*\*");
    }

    #[test]
    fn test_escaped_italic_opening() {
        assert_eq!(emphasis(r"\*a*"), r"\*a*");
    }

    #[test]
    fn test_content_cannot_end_with_backslash() {
        assert_eq!(emphasis(r"*a\*"), r"*a\*");
    }

    #[test]
    fn test_markers_do_not_cross_lines() {
        assert_eq!(emphasis("**a\nb**"), "**a\nb**");
        assert_eq!(emphasis("~~a\nb~~"), "~~a\nb~~");
    }

    #[test]
    fn test_unbalanced_markers_pass_through() {
        assert_eq!(emphasis("a ** b"), "a ** b");
        assert_eq!(emphasis("~ alone"), "~ alone");
    }

    #[test]
    fn test_underscore_bold_keeps_one_space_each_side() {
        assert_eq!(emphasis(" __a__ "), "<b> a </b>");
    }

    #[test]
    fn test_underscore_italic_keeps_one_space_each_side() {
        assert_eq!(emphasis("say _this_ now"), "say<i> this </i>now");
    }

    #[test]
    fn test_underscore_needs_boundary_whitespace() {
        assert_eq!(emphasis("x__a__y"), "x__a__y");
        assert_eq!(emphasis("snake_case_name"), "snake_case_name");
        assert_eq!(emphasis("__a__"), "__a__");
    }

    #[test]
    fn test_adjacent_underscore_spans_share_no_space() {
        // The first span consumes the space between them.
        assert_eq!(emphasis(" __a__ __b__ "), "<b> a </b>__b__ ");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(emphasis("~~gone~~"), "<s>gone</s>");
    }

    #[test]
    fn test_escaped_strikethrough() {
        assert_eq!(emphasis(r"\~~a~~"), r"\~~a~~");
        assert_eq!(emphasis(r"\~\~a\~\~"), r"\~\~a\~\~");
    }

    #[test]
    fn test_strikethrough_around_escaped_tilde() {
        assert_eq!(emphasis(r"~~\~~~"), r"<s>\~</s>");
    }
}
