//! File enumeration (walkdir based).
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ScanError;

/// Directory-name substrings excluded from every scan: version-control
/// metadata and dependency caches.
pub const DEFAULT_IGNORE: &[&str] = &[".git", ".hg", ".svn", "node_modules", "target", "vendor"];

/// How ignore entries are compared against candidate paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IgnoreMode {
    /// Literal substring over the full path string. `vendor` also excludes
    /// `src/vendored.go`; kept as the default for behavioral compatibility.
    #[default]
    Substring,
    /// Whole path components only. `vendor` excludes `a/vendor/b.go` but
    /// keeps `src/vendored.go`.
    PathSegment,
}

/// Recursively list all non-directory paths under `root`, excluding any path
/// matched by an ignore entry, in lexical order.
///
/// The order is stable for a fixed filesystem snapshot so scan output is
/// reproducible. Any traversal error is fatal: an incomplete file list would
/// silently narrow the scan.
pub fn find_all_files(
    root: &Path,
    ignore: &[&str],
    mode: IgnoreMode,
) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ScanError::Enumeration {
            root: root.to_path_buf(),
            source: e,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if !is_ignored(entry.path(), ignore, mode) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_ignored(path: &Path, ignore: &[&str], mode: IgnoreMode) -> bool {
    match mode {
        IgnoreMode::Substring => {
            let full = path.to_string_lossy();
            ignore.iter().any(|dir| full.contains(dir))
        }
        IgnoreMode::PathSegment => path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|seg| ignore.contains(&seg)),
    }
}
