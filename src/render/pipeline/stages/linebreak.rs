//! Hard line break stage.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::Rule;

/// Stage that replaces a trailing double space or backslash with `<br>`.
/// The newline itself is kept.
pub struct LinebreakStage {
    rule: Rule,
}

impl LinebreakStage {
    pub fn new() -> Self {
        Self {
            rule: Rule::new("linebreak", r"(?mR)(?:  |\\)$", "<br>"),
        }
    }
}

impl Default for LinebreakStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for LinebreakStage {
    fn name(&self) -> &'static str {
        "linebreak"
    }

    fn process(&self, text: &str) -> String {
        self.rule.apply(text)
    }
}
