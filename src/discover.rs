//! Legacy rules-file discovery
//!
//! Walks a project tree depth-first, skips well-known non-project
//! subtrees, and wraps every readable `.cursorrules` variant into a
//! normalized global-prompt record. Best-effort throughout: a single
//! unreadable directory or file drops out of the result, it never
//! aborts the walk.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use walkdir::{DirEntry, WalkDir};

use crate::core::model::{DiscoveryResult, GlobalPrompt};
use crate::core::paths::relative_dir;
use crate::core::util::read_text_lossy;
use crate::workspace::ScanRoot;

/// Canonical legacy filename.
pub const RULES_FILENAME: &str = ".cursorrules";

/// Recognized single-suffix variants of the canonical name.
pub const RULES_EXTENSIONS: &[&str] = &["md", "txt"];

/// Directory basenames never descended into, at any depth below the
/// root. Matching is case-sensitive basename equality, not a pattern.
static PRUNED_DIRS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // version control metadata
        ".git",
        ".hg",
        ".svn",
        // dependency caches
        "node_modules",
        "bower_components",
        "vendor",
        ".venv",
        "venv",
        "__pycache__",
        // build output
        "target",
        "build",
        "dist",
        "out",
        // framework caches
        ".next",
        ".nuxt",
        ".turbo",
        ".cache",
        ".parcel-cache",
    ]
    .into_iter()
    .collect()
});

/// Whether a basename matches the legacy rules pattern: the canonical
/// name bare, or with exactly one recognized extension.
pub fn is_rules_filename(name: &str) -> bool {
    match name.strip_prefix(RULES_FILENAME) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|ext| RULES_EXTENSIONS.contains(&ext)),
        None => false,
    }
}

fn is_pruned(entry: &DirEntry) -> bool {
    // The root was chosen by the caller and is always entered, even if
    // its own basename sits on the denylist.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| PRUNED_DIRS.contains(name))
}

/// Discover legacy rules files under `root`.
///
/// Emits one record per readable match, in walk order. Never fails: a
/// missing or unlistable root yields an empty result, unreadable
/// subtrees are omitted, and a file that cannot be read between listing
/// and read is skipped without a warning.
pub fn discover(root: &ScanRoot) -> DiscoveryResult {
    let root = root.resolve();
    let mut result = DiscoveryResult::new();

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        // Classification precedes pattern matching: a directory that
        // happens to bear the canonical name is recursed, never matched.
        // Symlinks and other non-regular entries fall out here too.
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_rules_filename(name) {
            continue;
        }

        let Ok(content) = read_text_lossy(entry.path()) else {
            continue;
        };

        let dir = relative_dir(entry.path(), &root);
        result.push(GlobalPrompt::new(entry.path().to_path_buf(), dir, content));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn discover_at(root: &Path) -> DiscoveryResult {
        discover(&ScanRoot::path(root))
    }

    #[test]
    fn test_is_rules_filename() {
        assert!(is_rules_filename(".cursorrules"));
        assert!(is_rules_filename(".cursorrules.md"));
        assert!(is_rules_filename(".cursorrules.txt"));

        assert!(!is_rules_filename("cursorrules"));
        assert!(!is_rules_filename(".cursorrules.json"));
        assert!(!is_rules_filename(".cursorrules.md.bak"));
        assert!(!is_rules_filename("x.cursorrules"));
        assert!(!is_rules_filename(".cursorrulesmd"));
        assert!(!is_rules_filename(".cursorrules."));
    }

    #[test]
    fn test_discovers_root_file() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".cursorrules"), "be terse");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].content, "be terse");
        assert_eq!(result.items[0].relative_dir, None);
        assert!(result.items[0].source_path.is_absolute());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_discovers_nested_variants() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".cursorrules"), "root");
        write_file(&temp.path().join("packages/api/.cursorrules.md"), "api");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 2);

        let root_item = result
            .items
            .iter()
            .find(|i| i.relative_dir.is_none())
            .unwrap();
        assert_eq!(root_item.content, "root");

        let nested_item = result
            .items
            .iter()
            .find(|i| i.relative_dir.is_some())
            .unwrap();
        assert_eq!(nested_item.relative_dir.as_deref(), Some("packages/api"));
        assert_eq!(nested_item.content, "api");
    }

    #[test]
    fn test_relative_dir_uses_forward_slashes() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("a/b/c/.cursorrules.txt"), "deep");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].relative_dir.as_deref(), Some("a/b/c"));
    }

    #[test]
    fn test_missing_root_yields_empty_result() {
        let temp = tempdir().unwrap();
        let result = discover_at(&temp.path().join("does-not-exist"));
        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_file_still_matches() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".cursorrules"), "");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].content, "");
    }

    #[test]
    fn test_pruned_directories_are_not_entered() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("node_modules/pkg/.cursorrules"), "no");
        write_file(&temp.path().join(".git/.cursorrules"), "no");
        write_file(&temp.path().join("target/debug/.cursorrules.md"), "no");
        write_file(&temp.path().join("src/.cursorrules"), "yes");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].relative_dir.as_deref(), Some("src"));
    }

    #[test]
    fn test_prune_applies_at_any_depth() {
        let temp = tempdir().unwrap();
        write_file(
            &temp.path().join("packages/web/node_modules/x/.cursorrules"),
            "no",
        );

        let result = discover_at(temp.path());
        assert!(result.is_empty());
    }

    #[test]
    fn test_same_named_directory_is_not_a_match() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".cursorrules")).unwrap();
        write_file(&temp.path().join(".cursorrules/notes.txt"), "not rules");

        let result = discover_at(temp.path());
        assert!(result.is_empty());
    }

    #[test]
    fn test_same_named_directory_is_still_scanned() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".cursorrules/.cursorrules.txt"), "inner");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].relative_dir.as_deref(), Some(".cursorrules"));
    }

    #[test]
    fn test_non_matching_files_are_ignored() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("README.md"), "docs");
        write_file(&temp.path().join(".cursorrules.json"), "{}");
        write_file(&temp.path().join("sub/cursorrules"), "bare");

        let result = discover_at(temp.path());
        assert!(result.is_empty());
    }

    #[test]
    fn test_ids_are_deterministic_across_runs() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".cursorrules"), "a");
        write_file(&temp.path().join("docs/.cursorrules.md"), "b");

        let first = discover_at(temp.path());
        let second = discover_at(temp.path());

        let mut first_ids: Vec<_> = first.items.iter().map(|i| i.id.clone()).collect();
        let mut second_ids: Vec<_> = second.items.iter().map(|i| i.id.clone()).collect();
        first_ids.sort();
        second_ids.sort();

        assert_eq!(first_ids, second_ids);
        assert_ne!(first_ids[0], first_ids[1]);
    }

    #[test]
    fn test_identical_content_distinct_paths_distinct_ids() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("a/.cursorrules"), "same");
        write_file(&temp.path().join("b/.cursorrules"), "same");

        let result = discover_at(temp.path());
        assert_eq!(result.len(), 2);
        assert_ne!(result.items[0].id, result.items[1].id);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_skipped() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("real.txt"), "rules");
        std::os::unix::fs::symlink(
            temp.path().join("real.txt"),
            temp.path().join(".cursorrules"),
        )
        .unwrap();

        let result = discover_at(temp.path());
        assert!(result.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_omitted() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        write_file(&temp.path().join("open/.cursorrules"), "yes");
        write_file(&temp.path().join("locked/.cursorrules"), "hidden");

        let locked = temp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = discover_at(temp.path());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Root can run tests with CAP_DAC_OVERRIDE, in which case the
        // locked subtree is readable anyway; only assert the walk
        // completed and found the open match.
        assert!(result.items.iter().any(|i| i.content == "yes"));
        assert!(result.warnings.is_empty());
    }
}
