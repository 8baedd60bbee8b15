use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Directory names pruned from every scan (exact, case-sensitive).
/// Callers extend this set via `exclude_dirs`.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["venv", ".venv", "node_modules", "__pycache__", ".git"];

/// Build the effective exclusion set: defaults plus caller additions
pub fn exclusion_set<I, S>(extra: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut set: HashSet<String> = DEFAULT_EXCLUDE_DIRS
        .iter()
        .map(|s| s.to_string())
        .collect();
    set.extend(extra.into_iter().map(Into::into));
    set
}

/// Check if a path names a Python source file
pub fn is_python_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("py")
}

/// Resolve `root` to the list of Python files to scan.
///
/// - A `.py` file resolves to itself; any other file (or a missing path)
///   resolves to the empty list, not an error.
/// - A directory is walked recursively, pruning any directory whose name
///   is in `exclude_dirs`.
///
/// Results come back sorted by full path so scans are deterministic.
pub fn collect_python_files(root: &Path, exclude_dirs: &HashSet<String>) -> Vec<PathBuf> {
    if root.is_file() {
        return if is_python_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            // the root itself is never pruned, only directories below it
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map(|name| !exclude_dirs.contains(name))
                .unwrap_or(true)
        })
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                log::warn!("Failed to read entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_python_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}
