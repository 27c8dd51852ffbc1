//! Paragraph stage.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::Rule;

/// Stage that wraps runs of letter-initial lines in `<p>`.
///
/// A run is a maximal block of consecutive lines that each start with an
/// ASCII letter. Any other line, including lines starting with accented
/// letters, ends the run and is left unwrapped.
pub struct ParagraphStage {
    rule: Rule,
}

impl ParagraphStage {
    pub fn new() -> Self {
        Self {
            rule: Rule::new(
                "paragraph",
                r"(?mR)^([A-Za-z].*(?:\n[A-Za-z].*)*)",
                "<p>${1}</p>",
            ),
        }
    }
}

impl Default for ParagraphStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for ParagraphStage {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn process(&self, text: &str) -> String {
        self.rule.apply(text)
    }
}
