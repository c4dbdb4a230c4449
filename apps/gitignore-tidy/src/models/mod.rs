//! Report models shared by the tidy runner and the output printers.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Terminal state of one tidy run on a file.
pub enum Status {
    /// The file has no lines; nothing was written.
    Empty,
    /// The file already equals its tidy form; nothing was written.
    AlreadyTidy,
    /// Tidy contents were written back.
    Written,
    /// The file would change, but writing was disabled (check/diff mode).
    WouldWrite,
    /// Reading, tidying or writing failed.
    Failed,
}

impl Status {
    pub fn changed(self) -> bool {
        matches!(self, Status::Written | Status::WouldWrite)
    }

    pub fn wrote(self) -> bool {
        matches!(self, Status::Written)
    }
}

#[derive(Debug, Clone, Serialize)]
/// Outcome for a single target file.
pub struct FileReport {
    pub file: String,
    pub status: Status,
    /// Contents as read, captured when a diff is requested.
    #[serde(skip)]
    pub original: Option<String>,
    /// Tidy contents, captured when the file would change and was not written.
    #[serde(skip)]
    pub tidy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(file: impl Into<String>, status: Status) -> Self {
        Self {
            file: file.into(),
            status,
            original: None,
            tidy: None,
            error: None,
        }
    }

    pub fn failed(file: impl Into<String>, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(file, Status::Failed)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers and exit codes.
pub struct Summary {
    pub total: usize,
    pub changed: usize,
    pub wrote: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        Summary {
            total: reports.len(),
            changed: reports.iter().filter(|r| r.status.changed()).count(),
            wrote: reports.iter().filter(|r| r.status.wrote()).count(),
            failed: reports
                .iter()
                .filter(|r| r.status == Status::Failed)
                .count(),
        }
    }
}
