//! Flat line model of a `.gitignore` file and the normalization pass.
//!
//! A `LineSequence` carries two flags, `normalized` and `sorted`, which are
//! fixed by whichever function produced the value. Later stages check them
//! instead of recomputing anything:
//! - `LineSequence::raw` builds unprocessed input (both flags false).
//! - `LineSequence::normalize` trims whitespace and drops duplicate entries.
//! - `Document::flatten` rebuilds a flat sequence from sorted sections.

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Whitespace before the content, optionally around a leading `!`.
fn leading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]*(!?)[ \t]*").expect("static regex"))
}

fn trailing_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+$").expect("static regex"))
}

/// Ordered lines of a `.gitignore` file or a part of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSequence {
    lines: Vec<String>,
    normalized: bool,
    sorted: bool,
}

impl LineSequence {
    /// Wrap lines exactly as read, with no processing applied.
    pub fn raw<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            normalized: false,
            sorted: false,
        }
    }

    pub(crate) fn with_flags(lines: Vec<String>, normalized: bool, sorted: bool) -> Self {
        Self {
            lines,
            normalized,
            sorted,
        }
    }

    /// Split file contents into lines. Accepts `\n` and `\r\n` endings.
    pub fn from_text(text: &str) -> Self {
        Self::raw(text.lines())
    }

    /// Render as file contents: every line terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Strip incidental whitespace and drop duplicate entries.
    ///
    /// - Trailing spaces/tabs are always removed.
    /// - Unless `allow_leading_whitespace` is set, leading spaces/tabs are
    ///   removed too; a leading `!` survives and whitespace right after it is
    ///   removed (`"! a"` becomes `"!a"`).
    /// - Non-blank lines are kept on first occurrence only. Blank lines are
    ///   never deduplicated.
    ///
    /// The `sorted` flag is carried over unchanged.
    pub fn normalize(&self, allow_leading_whitespace: bool) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique: Vec<String> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let line = if allow_leading_whitespace {
                Cow::Borrowed(line.as_str())
            } else {
                leading_pattern().replace(line, "$1")
            };
            let line = trailing_pattern().replace(&line, "").into_owned();
            if line.is_empty() || seen.insert(line.clone()) {
                unique.push(line);
            }
        }
        tracing::debug!(
            before = self.lines.len(),
            after = unique.len(),
            "normalized lines"
        );
        Self::with_flags(unique, true, self.sorted)
    }
}

impl<'a> IntoIterator for &'a LineSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// True for `#`-prefixed lines, which delimit sections.
pub fn is_header(line: &str) -> bool {
    line.starts_with('#')
}
