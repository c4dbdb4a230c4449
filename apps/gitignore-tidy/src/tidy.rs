//! Tidy pipeline entry points and the per-file runner.
//!
//! `tidy_lines` is the pure core: normalize, split into sections, sort each
//! section and flatten. `tidy_file` wraps it with reading and writing back a
//! single file; `run_tidy` drives many files in parallel.

use crate::error::{Result, TidyError};
use crate::lines::LineSequence;
use crate::models::{FileReport, Status};
use crate::utils;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Options applied to every target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TidyOptions {
    pub allow_leading_whitespace: bool,
    /// Write tidy contents back. When false, changed files report `WouldWrite`.
    pub write: bool,
    /// Keep original and tidy contents on the report for diff output.
    pub capture: bool,
}

impl Default for TidyOptions {
    fn default() -> Self {
        Self {
            allow_leading_whitespace: false,
            write: true,
            capture: false,
        }
    }
}

/// Normalize and sort `lines` section by section.
pub fn tidy_lines(lines: &LineSequence, allow_leading_whitespace: bool) -> Result<LineSequence> {
    let document = lines.normalize(allow_leading_whitespace).split()?;
    Ok(document.sort().flatten())
}

/// Tidy one file in place.
///
/// - Empty files are left alone (`Status::Empty`).
/// - Files equal to their tidy form are not rewritten (`Status::AlreadyTidy`).
/// - Otherwise the tidy lines are written, each followed by `\n`, unless
///   `opts.write` is false (`Status::WouldWrite`).
pub fn tidy_file(path: &Path, opts: &TidyOptions) -> Result<FileReport> {
    let file = utils::rel_to_wd(path);
    let text = fs::read_to_string(path).map_err(|e| TidyError::from_io(path, e))?;
    let lines = LineSequence::from_text(&text);
    if lines.is_empty() {
        tracing::info!("File {} is empty, not writing.", file);
        return Ok(FileReport::new(file, Status::Empty));
    }

    let tidy = tidy_lines(&lines, opts.allow_leading_whitespace)?;
    if tidy.lines() == lines.lines() {
        tracing::info!("{} already tidy.", file);
        return Ok(FileReport::new(file, Status::AlreadyTidy));
    }

    let contents = tidy.to_text();
    let status = if opts.write {
        fs::write(path, &contents).map_err(|e| TidyError::from_io(path, e))?;
        tracing::info!("Successfully written {}.", file);
        Status::Written
    } else {
        tracing::info!("{} would be tidied.", file);
        Status::WouldWrite
    };
    let mut report = FileReport::new(file, status);
    if opts.capture {
        report.original = Some(text);
    }
    if !opts.write {
        report.tidy = Some(contents);
    }
    Ok(report)
}

/// Tidy every target in parallel. A failure on one file is recorded on its
/// report and does not stop the others. Reports come back in path order.
pub fn run_tidy(targets: &[PathBuf], opts: &TidyOptions) -> Vec<FileReport> {
    let mut reports: Vec<FileReport> = targets
        .par_iter()
        .map(|path| match tidy_file(path, opts) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "tidy failed");
                FileReport::failed(utils::rel_to_wd(path), err)
            }
        })
        .collect();
    reports.sort_by(|a, b| a.file.cmp(&b.file));
    reports
}

/// Resolve file arguments against `base`, expanding glob patterns.
///
/// Literal paths are kept even when missing so the runner can report them.
/// A glob without matches is kept as-is for the same reason. Duplicates are
/// dropped, first occurrence wins.
pub fn resolve_targets(patterns: &[String], base: &Path) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let joined = if base == Path::new(".") {
            PathBuf::from(pat)
        } else {
            base.join(pat)
        };
        let mut matched: Vec<PathBuf> = Vec::new();
        if utils::is_glob(pat) {
            match glob::glob(&joined.to_string_lossy()) {
                Ok(paths) => matched.extend(paths.flatten().filter(|p| p.is_file())),
                Err(err) => tracing::warn!(pattern = %pat, error = %err, "invalid glob pattern"),
            }
            matched.sort();
        }
        if matched.is_empty() {
            matched.push(joined);
        }
        for path in matched {
            if seen.insert(path.clone()) {
                targets.push(path);
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn tidy(lines: &[&str]) -> Vec<String> {
        tidy_lines(&LineSequence::raw(lines.iter().copied()), false)
            .unwrap()
            .into_lines()
    }

    const UNTIDY: &str = "a\nb\n!a/b\n\n# section 55\nx\n*.pdf";
    const TIDY: &str = "a\n!a/b\nb\n\n# section 55\n*.pdf\nx\n";

    #[test]
    fn test_tidy_lines_sections_and_negation() {
        assert_eq!(
            tidy(&["a", "b", "!a/b", "", "# section 55", "x", "*.pdf"]),
            vec!["a", "!a/b", "b", "", "# section 55", "*.pdf", "x"]
        );
    }

    #[test]
    fn test_tidy_lines_basic_sections() {
        let input = [
            "# section 1", "a", "x", "b", "# section 2", "z", "e", "!e/f/*", "*.pdf",
        ];
        let output = [
            "# section 1", "a", "b", "x", "# section 2", "*.pdf", "e", "!e/f/*", "z",
        ];
        assert_eq!(tidy(&input), output);
    }

    #[test]
    fn test_tidy_lines_blank_lines_collapse_before_header() {
        let input = [
            "# section 1", "a", "x", "b", "", "# section 2", "z", "e", "!e/f/*", "*.pdf", "",
            "", "# more",
        ];
        let output = [
            "# section 1", "a", "b", "x", "", "# section 2", "*.pdf", "e", "!e/f/*", "z", "",
            "# more",
        ];
        assert_eq!(tidy(&input), output);
    }

    #[test]
    fn test_tidy_lines_without_root_header() {
        let input = [
            "a", "x", "b", "", "# section 2", "z", "e", "!e/f/*", "*.pdf", "", "", "# more",
        ];
        let output = [
            "a", "b", "x", "", "# section 2", "*.pdf", "e", "!e/f/*", "z", "", "# more",
        ];
        assert_eq!(tidy(&input), output);
    }

    #[test]
    fn test_tidy_lines_drops_leading_blank_lines() {
        let input = [
            "", "", "a", "x", "b", "", "# section 2", "z", "e", "!e/f/*", "*.pdf", "", "",
            "# more",
        ];
        let output = [
            "a", "b", "x", "", "# section 2", "*.pdf", "e", "!e/f/*", "z", "", "# more",
        ];
        assert_eq!(tidy(&input), output);
    }

    #[test]
    fn test_tidy_lines_already_ordered_with_scattered_blanks() {
        let input = [
            "a", "b", "", "", "", "x", "", "# section 2", "*.pdf", "e", "!e/f/*", "", "", "z",
            "", "# more", "",
        ];
        let output = [
            "a", "b", "x", "", "# section 2", "*.pdf", "e", "!e/f/*", "z", "", "# more",
        ];
        assert_eq!(tidy(&input), output);
    }

    #[test]
    fn test_tidy_lines_respects_leading_whitespace_flag() {
        let input = LineSequence::raw(["x", " a"]);
        assert_eq!(tidy_lines(&input, false).unwrap().lines(), &["a", "x"]);
        assert_eq!(tidy_lines(&input, true).unwrap().lines(), &[" a", "x"]);
    }

    #[test]
    fn test_tidy_lines_empty() {
        assert!(tidy(&[]).is_empty());
    }

    #[test]
    fn test_tidy_file_writes_untidy_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, UNTIDY).unwrap();

        let report = tidy_file(&path, &TidyOptions::default()).unwrap();
        assert_eq!(report.status, Status::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), TIDY);

        let again = tidy_file(&path, &TidyOptions::default()).unwrap();
        assert_eq!(again.status, Status::AlreadyTidy);
    }

    #[test]
    fn test_tidy_file_empty_is_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let report = tidy_file(&path, &TidyOptions::default()).unwrap();
        assert_eq!(report.status, Status::Empty);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_tidy_file_already_tidy_without_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "a\nb").unwrap();
        let report = tidy_file(&path, &TidyOptions::default()).unwrap();
        assert_eq!(report.status, Status::AlreadyTidy);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb");
    }

    #[test]
    fn test_tidy_file_dry_run_captures_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, UNTIDY).unwrap();
        let opts = TidyOptions {
            write: false,
            capture: true,
            ..TidyOptions::default()
        };
        let report = tidy_file(&path, &opts).unwrap();
        assert_eq!(report.status, Status::WouldWrite);
        assert_eq!(report.original.as_deref(), Some(UNTIDY));
        assert_eq!(report.tidy.as_deref(), Some(TIDY));
        assert_eq!(fs::read_to_string(&path).unwrap(), UNTIDY);
    }

    #[test]
    fn test_tidy_file_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let err = tidy_file(&dir.path().join("nope"), &TidyOptions::default()).unwrap_err();
        assert!(matches!(err, TidyError::NotFound { .. }));
    }

    #[test]
    fn test_run_tidy_continues_after_missing_file() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a/.gitignore");
        let second = dir.path().join("b/.gitignore");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::write(&first, UNTIDY).unwrap();

        let reports = run_tidy(&[second, first.clone()], &TidyOptions::default());
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].status, Status::Written);
        assert_eq!(reports[1].status, Status::Failed);
        assert!(reports[1].error.as_deref().unwrap().contains("not found"));
        assert_eq!(fs::read_to_string(&first).unwrap(), TIDY);
    }

    #[test]
    fn test_resolve_targets_expands_globs_and_keeps_literals() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for sub in ["x", "y"] {
            fs::create_dir_all(root.join(sub)).unwrap();
            fs::write(root.join(sub).join(".gitignore"), "a\n").unwrap();
        }
        let targets = resolve_targets(
            &[
                "*/.gitignore".to_string(),
                "x/.gitignore".to_string(),
                "missing/.gitignore".to_string(),
            ],
            root,
        );
        assert_eq!(
            targets,
            vec![
                root.join("x/.gitignore"),
                root.join("y/.gitignore"),
                root.join("missing/.gitignore"),
            ]
        );
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "a", "b", "c/d", "*.log", "!e", "e/x", "!f/g", "!  e", "h", "!h/i", " a\t", "b  ",
            "", "", "   ", "# one", "# two", " # one",
        ])
        .prop_map(str::to_string)
    }

    /// Patterns per section; a root section without patterns counts as absent.
    fn section_sets(lines: &LineSequence) -> Vec<(Option<String>, BTreeSet<String>)> {
        lines
            .normalize(false)
            .split()
            .unwrap()
            .sections()
            .iter()
            .map(|s| {
                let patterns = s.body().iter().filter(|l| !l.is_empty()).cloned().collect();
                (s.header().map(str::to_string), patterns)
            })
            .filter(|(header, patterns): &(Option<String>, BTreeSet<String>)| {
                header.is_some() || !patterns.is_empty()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_tidy_lines_is_idempotent(lines in prop::collection::vec(line_strategy(), 0..24)) {
            let once = tidy_lines(&LineSequence::raw(lines), false).unwrap();
            let twice = tidy_lines(&once, false).unwrap();
            prop_assert_eq!(once.lines(), twice.lines());
        }

        #[test]
        fn prop_tidy_lines_keeps_patterns_per_section(lines in prop::collection::vec(line_strategy(), 0..24)) {
            let raw = LineSequence::raw(lines);
            let tidy = tidy_lines(&raw, false).unwrap();
            prop_assert_eq!(section_sets(&raw), section_sets(&tidy));
            for section in tidy.normalize(false).split().unwrap().sections() {
                let body: Vec<_> = section.body().iter().filter(|l| !l.is_empty()).collect();
                let unique: BTreeSet<_> = body.iter().collect();
                prop_assert_eq!(body.len(), unique.len());
            }
        }

        #[test]
        fn prop_tidy_lines_orders_negations_by_positive_form(lines in prop::collection::vec(line_strategy(), 0..24)) {
            let tidy = tidy_lines(&LineSequence::raw(lines), false).unwrap();
            for section in tidy.normalize(false).split().unwrap().sections() {
                let body: Vec<&str> = section
                    .body()
                    .iter()
                    .map(String::as_str)
                    .filter(|l| !l.is_empty())
                    .collect();
                let keys: Vec<&str> = body.iter().map(|l| l.strip_prefix('!').unwrap_or(*l)).collect();
                prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]), "unordered section: {:?}", body);

                let positive = body.iter().position(|l| *l == "h");
                let negated = body.iter().position(|l| *l == "!h/i");
                if let (Some(p), Some(n)) = (positive, negated) {
                    prop_assert_eq!(n, p + 1);
                }
            }
        }
    }
}
