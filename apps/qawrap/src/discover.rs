//! Target expansion: turn user-supplied paths into absolute file lists.

use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default shell script extensions.
pub const SHELL_EXTENSIONS: &[&str] = &["sh", "bash", "ksh", "zsh"];

fn absolute(p: &Path) -> PathBuf {
    p.canonicalize().unwrap_or_else(|_| p.to_path_buf())
}

/// Expand `targets` into a sorted, de-duplicated list of absolute paths.
///
/// Files are taken as given regardless of extension; directories are searched
/// recursively for files ending in one of `extensions`. Missing paths are
/// skipped.
pub fn find_files(targets: &[String], extensions: &[String]) -> Vec<String> {
    let mut files: Vec<PathBuf> = Vec::new();
    for target in targets {
        let p = Path::new(target);
        if p.is_file() {
            files.push(absolute(p));
        } else if p.is_dir() {
            let base = Pattern::escape(&absolute(p).to_string_lossy());
            for ext in extensions {
                let pattern = format!("{}/**/*.{}", base.trim_end_matches('/'), ext);
                let Ok(entries) = glob(&pattern) else {
                    continue;
                };
                for entry in entries.flatten() {
                    if entry.is_file() {
                        files.push(absolute(&entry));
                    }
                }
            }
        }
    }
    files.sort();
    files.dedup();
    debug!(targets = targets.len(), files = files.len(), "discovered files");
    files
        .into_iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect()
}

/// Render `path` relative to `base` when that is shorter to read.
pub fn display_path(path: &str, base: &Path) -> String {
    match pathdiff::diff_paths(path, base) {
        Some(rel) if !rel.starts_with("..") && !rel.as_os_str().is_empty() => {
            rel.to_string_lossy().to_string()
        }
        _ => path.to_string(),
    }
}
