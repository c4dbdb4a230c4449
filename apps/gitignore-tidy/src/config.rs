//! Configuration discovery and effective settings resolution.
//!
//! gitignore-tidy reads `gitignore-tidy.toml|yaml|yml` from the repository
//! root (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `files`: `[".gitignore"]`, relative to the working directory
//! - `output`: `human`
//! - `allow_leading_whitespace`, `check`, `diff`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Result, TidyError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_NAMES: [&str; 3] = ["gitignore-tidy.toml", "gitignore-tidy.yaml", "gitignore-tidy.yml"];

pub const OUTPUT_MODES: [&str; 2] = ["human", "json"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Root configuration loaded from `gitignore-tidy.toml|yaml`.
pub struct TidyConfig {
    /// Target files or glob patterns, relative to the repository root.
    pub files: Option<Vec<String>>,
    pub output: Option<String>,
    pub allow_leading_whitespace: Option<bool>,
    pub check: Option<bool>,
    pub diff: Option<bool>,
}

#[derive(Debug, Clone, Default)]
/// Flags as given on the command line; `None` means "not passed".
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub files: Vec<String>,
    pub output: Option<String>,
    pub allow_leading_whitespace: Option<bool>,
    pub check: Option<bool>,
    pub diff: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    /// Loaded config file, if any.
    pub config_path: Option<PathBuf>,
    /// File arguments together with the directory they are relative to.
    pub files: Vec<String>,
    pub files_base: PathBuf,
    pub output: String,
    pub allow_leading_whitespace: bool,
    pub check: bool,
    pub diff: bool,
}

impl Effective {
    /// Files are only written back when neither `check` nor `diff` is active.
    pub fn write(&self) -> bool {
        !(self.check || self.diff)
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a config file or a `.git` entry is found. A relative `start`
/// is made absolute against the working directory first, so the walk can
/// leave it.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());
    let start = start.as_path();
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file under `root`, TOML first.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.is_file())
}

/// Load `TidyConfig` from `root` if a config file is present.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, TidyConfig)>> {
    let Some(path) = find_config(root) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|e| TidyError::from_io(&path, e))?;
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let parsed = if is_toml {
        toml::from_str::<TidyConfig>(&s).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<TidyConfig>(&s).map_err(|e| e.to_string())
    };
    let cfg = parsed.map_err(|message| TidyError::Config {
        path: path.clone(),
        message,
    })?;
    Ok(Some((path, cfg)))
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (config_path, cfg) = match load_config(&repo_root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, TidyConfig::default()),
    };

    // CLI files are relative to the working directory, config files to the root
    let (files, files_base) = if !cli.files.is_empty() {
        (cli.files.clone(), PathBuf::from("."))
    } else if let Some(files) = cfg.files.filter(|f| !f.is_empty()) {
        (files, repo_root.clone())
    } else {
        (vec![".gitignore".to_string()], PathBuf::from("."))
    };

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if !OUTPUT_MODES.contains(&output.as_str()) {
        return Err(TidyError::Config {
            path: config_path.unwrap_or_else(|| repo_root.clone()),
            message: format!("unknown output mode '{}' (expected human|json)", output),
        });
    }
    let allow_leading_whitespace = cli
        .allow_leading_whitespace
        .or(cfg.allow_leading_whitespace)
        .unwrap_or(false);
    let check = cli.check.or(cfg.check).unwrap_or(false);
    let diff = cli.diff.or(cfg.diff).unwrap_or(false);

    Ok(Effective {
        repo_root,
        config_path,
        files,
        files_base,
        output,
        allow_leading_whitespace,
        check,
        diff,
    })
}
