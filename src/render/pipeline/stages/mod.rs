//! The dialect's pipeline stages.
//!
//! 1. **HeadingStage** - `#`, `##` and `###` lines become headings
//! 2. **EmphasisStage** - bold, italic and strikethrough markers
//! 3. **LinebreakStage** - hard breaks for lines ending in two spaces or `\`
//! 4. **ParagraphStage** - letter-initial line runs become paragraphs
//! 5. **LinkStage** - `[caption](target)` anchors
//! 6. **ImageStage** - `![caption](target)` images
//! 7. **UnescapeStage** - restores escaped `*`, `_` and `~`

mod emphasis;
mod heading;
mod image;
mod linebreak;
mod link;
mod paragraph;
mod unescape;

pub use emphasis::EmphasisStage;
pub use heading::HeadingStage;
pub use image::ImageStage;
pub use linebreak::LinebreakStage;
pub use link::LinkStage;
pub use paragraph::ParagraphStage;
pub use unescape::UnescapeStage;
