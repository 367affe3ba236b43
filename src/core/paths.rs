//! Path normalization utilities
//!
//! All relative locations reported by this tool use '/' as separator so
//! results compare equal across platforms.

use std::path::Path;

/// Normalize a path to use '/' as separator.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Containing directory of `path` expressed relative to `root`.
///
/// Returns `None` when the file sits directly at the root, or when the
/// path does not live under the root at all. The returned string uses
/// '/' separators regardless of platform.
pub fn relative_dir(path: &Path, root: &Path) -> Option<String> {
    let parent = path.parent()?;
    let rel = parent.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        None
    } else {
        Some(normalize_path(rel))
    }
}
