//! Unescape stage.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::{Rule, apply_all};

/// Stage that removes the backslash from `\*`, `\_` and `\~`.
///
/// Runs last so the emphasis stage still sees the backslashes that
/// inhibit its markers.
pub struct UnescapeStage {
    rules: Vec<Rule>,
}

impl UnescapeStage {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Rule::new("star", r"\\\*", "*"),
                Rule::new("underscore", r"\\_", "_"),
                Rule::new("tilde", r"\\~", "~"),
            ],
        }
    }
}

impl Default for UnescapeStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for UnescapeStage {
    fn name(&self) -> &'static str {
        "unescape"
    }

    fn process(&self, text: &str) -> String {
        apply_all(&self.rules, text)
    }
}
