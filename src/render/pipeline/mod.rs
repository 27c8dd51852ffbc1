//! Rendering pipeline for the mdpad markdown dialect.
//!
//! The pipeline rewrites raw markdown into HTML through a fixed series of
//! stages, each consuming the full output of the previous one:
//! 1. Headings (`#`, `##`, `###`)
//! 2. Emphasis (bold, italic, strikethrough; escape-aware)
//! 3. Hard line breaks
//! 4. Paragraphs
//! 5. Links
//! 6. Images
//! 7. Unescaping of `\*`, `\_` and `\~`
//!
//! Stage order is part of the dialect. Moving a stage changes the output
//! of existing documents, so the default pipeline is the only one the
//! renderer uses.

mod rule;
pub mod stages;

pub use rule::{Boundary, Rule};

use stages::{
    EmphasisStage, HeadingStage, ImageStage, LinebreakStage, LinkStage, ParagraphStage,
    UnescapeStage,
};

/// A stage in the rendering pipeline.
///
/// A stage is a pure function of its input text. It never fails: text
/// that none of its rules match passes through unchanged.
pub trait Stage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Rewrite the whole document text.
    fn process(&self, text: &str) -> String;
}

/// The ordered list of stages a document is threaded through.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with the dialect's stages.
    ///
    /// Stages: heading → emphasis → linebreak → paragraph → link → image → unescape
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(HeadingStage::new());
        pipeline.add_stage(EmphasisStage::new());
        pipeline.add_stage(LinebreakStage::new());
        pipeline.add_stage(ParagraphStage::new());
        pipeline.add_stage(LinkStage::new());
        pipeline.add_stage(ImageStage::new());
        pipeline.add_stage(UnescapeStage::new());
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage in sequence over `text`.
    pub fn run(&self, text: &str) -> String {
        let mut current = text.to_string();
        for stage in &self.stages {
            current = stage.process(&current);
            tracing::trace!(stage = stage.name(), len = current.len(), "stage applied");
        }
        current
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stage_order() {
        let pipeline = Pipeline::default_pipeline();
        assert_eq!(
            pipeline.stage_names(),
            vec![
                "heading",
                "emphasis",
                "linebreak",
                "paragraph",
                "link",
                "image",
                "unescape"
            ]
        );
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.run("**a**\n# b"), "**a**\n# b");
    }

    #[test]
    fn test_unescape_before_emphasis_changes_output() {
        let mut reordered = Pipeline::new();
        reordered.add_stage(UnescapeStage::new());
        reordered.add_stage(EmphasisStage::new());

        let mut ordered = Pipeline::new();
        ordered.add_stage(EmphasisStage::new());
        ordered.add_stage(UnescapeStage::new());

        let input = r"\*\*a\*\*";
        assert_eq!(ordered.run(input), "**a**");
        assert_eq!(reordered.run(input), "<b>a</b>");
    }

    #[test]
    fn test_stages_see_previous_output() {
        // The heading stage emits `<h2>`, so the paragraph stage must not
        // treat the line as letter-initial text.
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(HeadingStage::new());
        pipeline.add_stage(ParagraphStage::new());

        assert_eq!(pipeline.run("## Title\nbody"), "<h2>Title</h2>\n<p>body</p>");
    }
}
