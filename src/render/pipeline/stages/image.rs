//! Image stage.

use crate::render::pipeline::Stage;
use crate::render::pipeline::rule::Rule;

/// Stage that turns `![caption](target)` into an `<img>`.
///
/// The caption becomes the image title and the rendered width is capped.
pub struct ImageStage {
    rule: Rule,
}

impl ImageStage {
    pub fn new() -> Self {
        Self {
            rule: Rule::new(
                "image",
                r"!\[([^\n]+?)\]\(([^\n]+?)\)",
                "<img src='${2}' title='${1}' style='max-width: 80%' />",
            ),
        }
    }
}

impl Default for ImageStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for ImageStage {
    fn name(&self) -> &'static str {
        "image"
    }

    fn process(&self, text: &str) -> String {
        self.rule.apply(text)
    }
}
