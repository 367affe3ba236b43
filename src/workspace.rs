//! Scan root resolution
//!
//! A scan can be rooted at a literal path or at a managed workspace
//! handle. Either form resolves to one absolute path before the walk
//! starts; nothing else in the engine touches this distinction.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace root does not exist: {path}")]
    Missing { path: PathBuf },

    #[error("workspace root is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

/// Opaque handle to a managed workspace checkout.
///
/// Opening validates the location; a literal [`ScanRoot::Path`] never
/// does, since a missing root is a legal empty scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        match root.metadata() {
            Err(_) => Err(WorkspaceError::Missing { path: root }),
            Ok(meta) if !meta.is_dir() => Err(WorkspaceError::NotADirectory { path: root }),
            Ok(_) => Ok(Self { root }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Root of a discovery pass: a bare path or a workspace handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRoot {
    Path(PathBuf),
    Workspace(Workspace),
}

impl ScanRoot {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ScanRoot::Path(path.into())
    }

    /// Resolve to a single absolute path. Infallible: an unresolvable
    /// location is returned as-is and the walk over it comes up empty.
    pub fn resolve(&self) -> PathBuf {
        let raw = match self {
            ScanRoot::Path(path) => path.as_path(),
            ScanRoot::Workspace(workspace) => workspace.root(),
        };
        raw.canonicalize()
            .or_else(|_| std::path::absolute(raw))
            .unwrap_or_else(|_| raw.to_path_buf())
    }
}

impl From<PathBuf> for ScanRoot {
    fn from(path: PathBuf) -> Self {
        ScanRoot::Path(path)
    }
}

impl From<&Path> for ScanRoot {
    fn from(path: &Path) -> Self {
        ScanRoot::Path(path.to_path_buf())
    }
}

impl From<Workspace> for ScanRoot {
    fn from(workspace: Workspace) -> Self {
        ScanRoot::Workspace(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_open_directory() {
        let temp = tempdir().unwrap();
        let workspace = Workspace::open(temp.path()).unwrap();
        assert_eq!(workspace.root(), temp.path());
    }

    #[test]
    fn test_workspace_open_missing() {
        let temp = tempdir().unwrap();
        let err = Workspace::open(temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, WorkspaceError::Missing { .. }));
    }

    #[test]
    fn test_workspace_open_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let err = Workspace::open(&file).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotADirectory { .. }));
    }

    #[test]
    fn test_scan_root_resolve_literal() {
        let temp = tempdir().unwrap();
        let resolved = ScanRoot::path(temp.path()).resolve();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_scan_root_resolve_relative() {
        let resolved = ScanRoot::path(".").resolve();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_scan_root_resolve_workspace() {
        let temp = tempdir().unwrap();
        let root = ScanRoot::from(Workspace::open(temp.path()).unwrap());
        assert!(root.resolve().is_absolute());
    }

    #[test]
    fn test_scan_root_from_path() {
        let root: ScanRoot = Path::new("/project").into();
        assert_eq!(root, ScanRoot::Path(PathBuf::from("/project")));
    }
}
