//! Supporting helpers: console prefixes and path display.

use owo_colors::OwoColorize;
use std::path::Path;

pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Display `path` relative to the working directory when possible.
pub fn rel_to_wd(path: &Path) -> String {
    let shown = std::env::current_dir()
        .ok()
        .filter(|_| path.is_absolute())
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|rel| !rel.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf());
    shown.to_string_lossy().to_string()
}

/// True when `s` contains glob metacharacters.
pub fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '['])
}
