//! CLI argument parsing via `clap`.

use crate::config::{CliOverrides, OUTPUT_MODES};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gitignore-tidy",
    version,
    about = "Tidy up your .gitignore files",
    long_about = "gitignore-tidy — dedupe, trim and sort .gitignore patterns within each `#` section.\n\nConfiguration precedence: CLI > gitignore-tidy.toml > defaults.",
    after_help = "Examples:\n  gitignore-tidy\n  gitignore-tidy .gitignore docs/.gitignore\n  gitignore-tidy '**/.gitignore' --check\n  gitignore-tidy --diff --output json"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "Files or glob patterns to tidy (default: .gitignore)")]
    pub files: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "no_allow_leading_whitespace", help = "Keep leading whitespace in patterns")]
    pub allow_leading_whitespace: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "allow_leading_whitespace", help = "Strip leading whitespace even if the config allows it")]
    pub no_allow_leading_whitespace: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "no_check", help = "Exit non-zero if changes would occur (implies no write)")]
    pub check: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "check", help = "Turn off a `check` set in the config")]
    pub no_check: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "no_diff", help = "Show diffs for changed files (implies no write)")]
    pub diff: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "diff", help = "Turn off a `diff` set in the config")]
    pub no_diff: bool,
    #[arg(long, value_parser = OUTPUT_MODES, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Where to look for gitignore-tidy.toml (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

impl Cli {
    /// Flags that were actually passed; unset switches defer to config.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            repo_root: self.repo_root.clone(),
            files: self.files.clone(),
            output: self.output.clone(),
            allow_leading_whitespace: switch(
                self.allow_leading_whitespace,
                self.no_allow_leading_whitespace,
            ),
            check: switch(self.check, self.no_check),
            diff: switch(self.diff, self.no_diff),
        }
    }
}

/// `--flag` / `--no-flag` pair; neither passed leaves the config in charge.
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}
