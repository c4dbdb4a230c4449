//! Section model: splitting normalized lines at `#` headers, sorting each
//! section and flattening the result back into lines.
//!
//! Design notes:
//! - Sections are kept in an append-only list. Header text is not a key, so
//!   two identical headers would stay two sections.
//! - `leading_blanks` is 0 or 1: only the blank line directly above a header
//!   is tracked. Longer runs leave the extra blanks in the previous body,
//!   where flattening drops them.
//! - Negated patterns sort by their positive form, so `!a/b` lands next to
//!   `a/b` rather than ahead of every unnegated entry.

use crate::error::{Result, TidyError};
use crate::lines::{is_header, LineSequence};
use std::collections::HashSet;

/// One header-delimited part of a normalized `.gitignore` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    header: Option<String>,
    body: LineSequence,
    leading_blanks: usize,
}

impl Section {
    /// Build a section. Fails when `body` has not been normalized.
    pub fn new(header: Option<String>, body: LineSequence, leading_blanks: usize) -> Result<Self> {
        if !body.is_normalized() {
            return Err(TidyError::InvariantViolation(
                "sections require normalized lines",
            ));
        }
        Ok(Self {
            header,
            body,
            leading_blanks,
        })
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn body(&self) -> &LineSequence {
        &self.body
    }

    pub fn leading_blanks(&self) -> usize {
        self.leading_blanks
    }

    pub fn is_sorted(&self) -> bool {
        self.body.is_sorted()
    }

    /// Return a copy with the body sorted; header and blanks are untouched.
    pub fn sort(&self) -> Section {
        Section {
            header: self.header.clone(),
            body: LineSequence::with_flags(sort_patterns(self.body.lines()), true, true),
            leading_blanks: self.leading_blanks,
        }
    }

    /// Lines this section contributes to the flat output: the leading blanks,
    /// the header if any, then the non-blank body lines.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        std::iter::repeat("")
            .take(self.leading_blanks)
            .chain(self.header.as_deref())
            .chain(
                self.body
                    .iter()
                    .map(String::as_str)
                    .filter(|line| !line.is_empty()),
            )
    }
}

/// Sort body lines by their unnegated form.
///
/// Each sorted candidate is emitted negated when `!candidate` appears in the
/// original body. If both `x` and `!x` are present, both slots become `!x`.
/// Blank lines take no part in the ordering and are kept ahead of patterns.
fn sort_patterns(lines: &[String]) -> Vec<String> {
    let (blanks, patterns): (Vec<&String>, Vec<&String>) =
        lines.iter().partition(|line| line.is_empty());
    let original: HashSet<&str> = patterns.iter().map(|line| line.as_str()).collect();
    let mut candidates: Vec<&str> = patterns
        .iter()
        .map(|line| line.strip_prefix('!').unwrap_or(line.as_str()))
        .collect();
    candidates.sort_unstable();

    let mut out: Vec<String> = blanks.into_iter().cloned().collect();
    out.extend(candidates.into_iter().map(|candidate| {
        let negated = format!("!{candidate}");
        if original.contains(negated.as_str()) {
            negated
        } else {
            candidate.to_string()
        }
    }));
    out
}

/// A whole `.gitignore` file as an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_sorted(&self) -> bool {
        self.sections.iter().all(Section::is_sorted)
    }

    pub fn is_normalized(&self) -> bool {
        self.sections.iter().all(|s| s.body.is_normalized())
    }

    /// Sort every section independently.
    pub fn sort(&self) -> Document {
        Document {
            sections: self.sections.iter().map(Section::sort).collect(),
        }
    }

    /// Concatenate all sections back into a flat line sequence.
    pub fn flatten(&self) -> LineSequence {
        let lines: Vec<String> = self
            .sections
            .iter()
            .flat_map(|section| section.output_lines())
            .map(str::to_string)
            .collect();
        LineSequence::with_flags(lines, self.is_normalized(), self.is_sorted())
    }
}

struct Draft {
    header: Option<String>,
    body: Vec<String>,
    leading_blanks: usize,
}

impl LineSequence {
    /// Partition normalized lines into sections at `#` headers.
    ///
    /// Lines before the first header form an unheaded root section, which is
    /// only emitted when the first line is not a header. Returns
    /// `InvariantViolation` if called on lines that were not normalized.
    pub fn split(&self) -> Result<Document> {
        if !self.is_normalized() {
            return Err(TidyError::InvariantViolation(
                "lines must be normalized before splitting",
            ));
        }
        let lines = self.lines();
        let mut drafts: Vec<Draft> = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if is_header(line) {
                let leading_blanks = usize::from(idx > 0 && lines[idx - 1].is_empty());
                drafts.push(Draft {
                    header: Some(line.clone()),
                    body: Vec::new(),
                    leading_blanks,
                });
            } else if let Some(current) = drafts.last_mut() {
                current.body.push(line.clone());
            } else {
                drafts.push(Draft {
                    header: None,
                    body: vec![line.clone()],
                    leading_blanks: 0,
                });
            }
        }
        tracing::debug!(sections = drafts.len(), "split lines into sections");

        let sections = drafts
            .into_iter()
            .map(|d| {
                Section::new(
                    d.header,
                    LineSequence::with_flags(d.body, true, false),
                    d.leading_blanks,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Document { sections })
    }
}
