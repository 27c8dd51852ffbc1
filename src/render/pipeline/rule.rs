//! Match-and-replace rules used by the pipeline stages.

use regex::Regex;

/// Condition on the character immediately before a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Accept a match wherever it starts.
    Any,
    /// Reject a match whose first character directly follows `char`.
    ///
    /// Rejected candidates are retried one character further on, which
    /// gives the same matches as a negative lookbehind.
    NotPrecededBy(char),
}

impl Boundary {
    fn allows(self, before: &str) -> bool {
        match self {
            Boundary::Any => true,
            Boundary::NotPrecededBy(c) => !before.ends_with(c),
        }
    }
}

/// A single match-and-replace operation within a stage.
///
/// The template may refer to capture groups as `${1}`, `${2}`, ...
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    template: &'static str,
    boundary: Boundary,
}

impl Rule {
    /// Create a rule from a pattern literal.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Rules are
    /// built from literals, so this is a programming error.
    pub fn new(name: &'static str, pattern: &str, template: &'static str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for rule '{name}': {e}"));
        Self {
            name,
            pattern,
            template,
            boundary: Boundary::Any,
        }
    }

    /// Require the character before each match to satisfy `boundary`.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace every accepted, non-overlapping match in `text`, scanning
    /// left to right.
    ///
    /// The template is expanded with [`regex::Captures::expand`].
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if !self.boundary.allows(&text[..whole.start()]) {
                pos = next_char(text, whole.start());
                continue;
            }

            out.push_str(&text[copied..whole.start()]);
            caps.expand(self.template, &mut out);
            copied = whole.end();
            pos = if whole.is_empty() {
                next_char(text, whole.end())
            } else {
                whole.end()
            };
        }

        out.push_str(&text[copied..]);
        out
    }
}

/// Byte offset of the character after the one starting at `at`.
fn next_char(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(at + 1, |c| at + c.len_utf8())
}

/// Apply `rules` in order, each one to the previous rule's output.
pub(crate) fn apply_all(rules: &[Rule], text: &str) -> String {
    let mut current = text.to_string();
    for rule in rules {
        current = rule.apply(&current);
        tracing::trace!(rule = rule.name(), "rule applied");
    }
    current
}
