//! Output rendering for tidy results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file fields and a top-level summary.

use crate::models::{FileReport, Status, Summary};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && utils::colors_enabled()
}

/// Print tidy results in the requested format. Diffs are shown for files
/// that would change when `diff` is set.
pub fn print_results(reports: &[FileReport], output: &str, diff: bool) {
    match output {
        "json" => {
            let out = compose_json(reports, diff);
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("{} {}", utils::error_prefix(), e),
            }
        }
        _ => {
            let color = use_colors(output);
            for r in reports {
                print_human(r, color, diff);
            }
            let summary = Summary::from_reports(reports);
            let line = format!(
                "— Summary — files={} changed={} written={} failed={}",
                summary.total, summary.changed, summary.wrote, summary.failed
            );
            if color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

fn print_human(r: &FileReport, color: bool, diff: bool) {
    match r.status {
        Status::Written => {
            if color {
                println!("{} {}", "tidied:".green().bold(), r.file.bold());
            } else {
                println!("tidied: {}", r.file);
            }
        }
        Status::WouldWrite => {
            if color {
                println!("{} {}", "would tidy:".yellow().bold(), r.file.bold());
            } else {
                println!("would tidy: {}", r.file);
            }
            if diff {
                if let Some(d) = build_line_diff(r.original.as_deref(), r.tidy.as_deref()) {
                    print_diff(&d, color);
                }
            }
        }
        Status::AlreadyTidy => {
            if color {
                println!("{} {}", "already tidy:".bright_black(), r.file);
            } else {
                println!("already tidy: {}", r.file);
            }
        }
        Status::Empty => {
            if color {
                println!("{} {}", "empty, not written:".bright_black(), r.file);
            } else {
                println!("empty, not written: {}", r.file);
            }
        }
        Status::Failed => {
            let msg = r.error.as_deref().unwrap_or("unknown error");
            if color {
                println!("{} {} — {}", "failed:".red().bold(), r.file.bold(), msg);
            } else {
                println!("failed: {} — {}", r.file, msg);
            }
        }
    }
}

fn print_diff(d: &str, color: bool) {
    for line in d.lines() {
        if !color {
            println!("{}", line);
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line.cyan());
        }
    }
}

/// Upper bound on LCS table cells; larger changed regions are shown as a
/// plain block replacement.
const MAX_DIFF_CELLS: usize = 4_000_000;

/// Line diff of old vs new contents.
///
/// Lines are matched along their longest common subsequence; unchanged lines
/// are prefixed with a space, removed with `-` and added with `+`. Returns
/// `None` if either side is missing.
///
/// The common prefix and suffix are trimmed before the LCS table is built.
/// If the remaining region still exceeds `MAX_DIFF_CELLS`, every old line in
/// it is removed and every new line added.
pub fn build_line_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old: Vec<&str> = old?.lines().collect();
    let new: Vec<&str> = new?.lines().collect();

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut out = String::from("--- old\n+++ new\n");
    for line in &old[..prefix] {
        out.push_str(&format!(" {line}\n"));
    }
    if (old_mid.len() + 1).saturating_mul(new_mid.len() + 1) > MAX_DIFF_CELLS {
        for line in old_mid {
            out.push_str(&format!("-{line}\n"));
        }
        for line in new_mid {
            out.push_str(&format!("+{line}\n"));
        }
    } else {
        push_lcs_diff(&mut out, old_mid, new_mid);
    }
    for line in &old[old.len() - suffix..] {
        out.push_str(&format!(" {line}\n"));
    }
    Some(out)
}

fn push_lcs_diff(out: &mut String, old: &[&str], new: &[&str]) {
    // lcs[i][j] = LCS length of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < old.len() || j < new.len() {
        if i < old.len() && j < new.len() && old[i] == new[j] {
            out.push_str(&format!(" {}\n", old[i]));
            i += 1;
            j += 1;
        } else if j < new.len() && (i == old.len() || lcs[i][j + 1] >= lcs[i + 1][j]) {
            out.push_str(&format!("+{}\n", new[j]));
            j += 1;
        } else {
            out.push_str(&format!("-{}\n", old[i]));
            i += 1;
        }
    }
}

/// Compose results JSON object (pure) for testing/snapshot purposes.
pub fn compose_json(reports: &[FileReport], diff: bool) -> JsonVal {
    let items: Vec<_> = reports
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "status": r.status,
                "changed": r.status.changed(),
                "wrote": r.status.wrote(),
                "diff": if diff { build_line_diff(r.original.as_deref(), r.tidy.as_deref()) } else { None },
                "error": r.error,
            })
        })
        .collect();
    let summary = Summary::from_reports(reports);
    json!({"results": items, "summary": summary})
}
