//! Heading stage.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::{Rule, apply_all};

/// Stage that turns `#`, `##` and `###` lines into `<h1>`-`<h3>`.
///
/// A line matches a level when it starts with exactly that many `#`
/// followed by whitespace. Lines with four or more `#` match no level and
/// stay literal text. Level 1 headings are followed by a `<hr>`.
pub struct HeadingStage {
    rules: Vec<Rule>,
}

impl HeadingStage {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Rule::new("h3", r"(?mR)^#{3}\s+(.+)$", "<h3>${1}</h3>"),
                Rule::new("h2", r"(?mR)^#{2}\s+(.+)$", "<h2>${1}</h2>"),
                Rule::new("h1", r"(?mR)^#\s+(.+)$", "<h1>${1}</h1><hr>"),
            ],
        }
    }
}

impl Default for HeadingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for HeadingStage {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn process(&self, text: &str) -> String {
        apply_all(&self.rules, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> String {
        HeadingStage::new().process(text)
    }

    #[test]
    fn test_levels() {
        assert_eq!(heading("# One"), "<h1>One</h1><hr>");
        assert_eq!(heading("## Two"), "<h2>Two</h2>");
        assert_eq!(heading("### Three"), "<h3>Three</h3>");
    }

    #[test]
    fn test_level_three_only_produces_h3() {
        let html = heading("### Three");
        assert_eq!(html.matches("<h3>").count(), 1);
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_four_hashes_is_literal() {
        assert_eq!(heading("#### Four"), "#### Four");
    }

    #[test]
    fn test_requires_whitespace_after_hashes() {
        assert_eq!(heading("#tag"), "#tag");
        assert_eq!(heading("##tag"), "##tag");
    }

    #[test]
    fn test_only_column_zero() {
        assert_eq!(heading(" # indented"), " # indented");
        assert_eq!(heading("text # not a heading"), "text # not a heading");
    }

    #[test]
    fn test_every_line_is_scanned() {
        assert_eq!(
            heading("# A\ntext\n## B\n### C"),
            "<h1>A</h1><hr>\ntext\n<h2>B</h2>\n<h3>C</h3>"
        );
    }

    #[test]
    fn test_heading_text_is_not_escaped() {
        assert_eq!(heading("# a <b> & c"), "<h1>a <b> & c</h1><hr>");
    }

    #[test]
    fn test_crlf_line_ending_stays_outside_heading() {
        assert_eq!(heading("# T\r\nbody"), "<h1>T</h1><hr>\r\nbody");
        assert_eq!(heading("## A\r\n### B\r\n"), "<h2>A</h2>\r\n<h3>B</h3>\r\n");
    }
}
