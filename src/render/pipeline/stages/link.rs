//! Link stage.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::{Boundary, Rule};

/// Stage that turns `[caption](target)` into an anchor.
///
/// A `[` directly after `!` starts image syntax and is skipped here; the
/// image stage handles it afterwards. Targets are used verbatim.
pub struct LinkStage {
    rule: Rule,
}

impl LinkStage {
    pub fn new() -> Self {
        Self {
            rule: Rule::new(
                "link",
                r"\[([^\n]+?)\]\(([^\n]+?)\)",
                "<a href='${2}'>${1}</a>",
            )
            .with_boundary(Boundary::NotPrecededBy('!')),
        }
    }
}

impl Default for LinkStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for LinkStage {
    fn name(&self) -> &'static str {
        "link"
    }

    fn process(&self, text: &str) -> String {
        self.rule.apply(text)
    }
}
