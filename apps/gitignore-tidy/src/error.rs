//! Error type shared by the tidy pipeline, file handling and configuration.

use std::path::PathBuf;

/// Errors raised while tidying a file.
///
/// `NotFound`, `Io` and `Config` are user-facing and affect a single target.
/// `InvariantViolation` signals a broken internal contract (for example
/// splitting lines that were never normalized) and is not expected to surface
/// when the pipeline is driven through `tidy_lines`.
#[derive(Debug, thiserror::Error)]
pub enum TidyError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl TidyError {
    /// Map an I/O error on `path`, turning `ErrorKind::NotFound` into `NotFound`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TidyError::NotFound { path }
        } else {
            TidyError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, TidyError>;
