//! gitignore-tidy core library.
//!
//! Normalizes and deterministically reorders `.gitignore` files: duplicate
//! entries are dropped, incidental whitespace is stripped and patterns are
//! sorted within each `#`-delimited section. Negated patterns (`!x`) sort
//! next to their positive form.
//!
//! High-level modules:
//! - `lines`: Flat line model and the normalization pass.
//! - `sections`: Splitting into sections, per-section sorting, flattening.
//! - `tidy`: `tidy_lines` pipeline, single-file and parallel runners.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Per-file reports and summaries.
//! - `output`: Human/JSON printers.
//! - `logging`: Tracing subscriber setup.
//! - `error`: Error type shared by all of the above.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod error;
pub mod lines;
pub mod logging;
pub mod models;
pub mod output;
pub mod sections;
pub mod tidy;
pub mod utils;

pub use error::{Result, TidyError};
pub use lines::LineSequence;
pub use sections::{Document, Section};
pub use tidy::{tidy_file, tidy_lines, TidyOptions};
