//! Toolbar-style editing helpers.
//!
//! Each [`Wrapper`] inserts dialect markup around a selection, the way the
//! editor toolbar buttons do.

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("selection {start}..{end} is not valid for a text of {len} bytes")]
    InvalidSelection { start: usize, end: usize, len: usize },

    #[error("unknown format '{0}'")]
    UnknownWrapper(String),
}

/// Markup a toolbar button wraps around the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Wrapper {
    Bold,
    Italic,
    Strikethrough,
    Heading1,
    Heading2,
    Heading3,
    Link,
    Image,
}

impl Wrapper {
    /// All wrappers, in toolbar order.
    pub const ALL: [Wrapper; 8] = [
        Wrapper::Bold,
        Wrapper::Italic,
        Wrapper::Strikethrough,
        Wrapper::Heading1,
        Wrapper::Heading2,
        Wrapper::Heading3,
        Wrapper::Link,
        Wrapper::Image,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Wrapper::Bold => "**",
            Wrapper::Italic => "*",
            Wrapper::Strikethrough => "~~",
            Wrapper::Heading1 => "# ",
            Wrapper::Heading2 => "## ",
            Wrapper::Heading3 => "### ",
            Wrapper::Link => "[caption](",
            Wrapper::Image => "![hover text](",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Wrapper::Bold => "**",
            Wrapper::Italic => "*",
            Wrapper::Strikethrough => "~~",
            Wrapper::Heading1 | Wrapper::Heading2 | Wrapper::Heading3 => "",
            Wrapper::Link | Wrapper::Image => ")",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Wrapper::Bold => "bold",
            Wrapper::Italic => "italic",
            Wrapper::Strikethrough => "strikethrough",
            Wrapper::Heading1 => "heading1",
            Wrapper::Heading2 => "heading2",
            Wrapper::Heading3 => "heading3",
            Wrapper::Link => "link",
            Wrapper::Image => "image",
        }
    }
}

impl FromStr for Wrapper {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wrapper::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EditError::UnknownWrapper(s.to_string()))
    }
}

/// Wrap the bytes in `selection` with the wrapper's prefix and suffix.
///
/// An empty selection wraps the cursor position. The selection must lie
/// within `text` and on character boundaries.
pub fn wrap_selection(
    text: &str,
    selection: Range<usize>,
    wrapper: Wrapper,
) -> Result<String, EditError> {
    let Range { start, end } = selection;
    if start > end
        || end > text.len()
        || !text.is_char_boundary(start)
        || !text.is_char_boundary(end)
    {
        return Err(EditError::InvalidSelection {
            start,
            end,
            len: text.len(),
        });
    }

    let (prefix, suffix) = (wrapper.prefix(), wrapper.suffix());
    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len());
    out.push_str(&text[..start]);
    out.push_str(prefix);
    out.push_str(&text[start..end]);
    out.push_str(suffix);
    out.push_str(&text[end..]);
    Ok(out)
}
