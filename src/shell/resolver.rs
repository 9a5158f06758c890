//! Path resolution and root confinement.
//!
//! Every path a client supplies goes through here before the filesystem is
//! touched. The confinement rule: after canonicalization, the result must be
//! the web root itself or a descendant of it. The check never runs on the raw
//! string, so `..` chains, redundant separators, and symlinks cannot smuggle
//! a path out of the jail.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a supplied path was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path (or, for creation targets, its parent) does not exist.
    #[error("path does not exist")]
    NotFound,

    /// The canonicalized path lies outside the web root.
    #[error("path escapes the web root")]
    OutsideRoot,
}

/// Resolves user-supplied paths against a base directory and confines the
/// result beneath a fixed root.
///
/// The root is canonicalized once at construction and never changes for the
/// process lifetime. Cloning is cheap enough that the terminal engine and the
/// listing endpoint each hold their own copy.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    label: String,
}

impl PathResolver {
    /// Create a resolver jailed to `root`.
    ///
    /// Fails if `root` does not exist or is not a directory. The prompt label
    /// defaults to the root's final path component.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(root.into())?;
        if !root.is_dir() {
            return Err(std::io::Error::other("web root is not a directory"));
        }
        let label = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Ok(Self { root, label })
    }

    /// Override the prompt label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The canonicalized root all resolution is confined to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The label standing in for the root in rendered paths.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolve `input` against `base` to an existing, in-root path.
    ///
    /// A leading separator does not escape the base: the input is always
    /// interpreted relative to it. `..` segments are allowed as long as the
    /// canonical result stays inside the root.
    pub fn resolve(&self, base: &Path, input: &str) -> Result<PathBuf, PathError> {
        let joined = base.join(input.trim_start_matches(['/', '\\']));
        let full = std::fs::canonicalize(&joined).map_err(|_| PathError::NotFound)?;
        if full.starts_with(&self.root) {
            Ok(full)
        } else {
            Err(PathError::OutsideRoot)
        }
    }

    /// Build a path for an entry that need not exist yet (create/rename
    /// targets). The final component is kept verbatim; the parent directory
    /// must exist and canonicalize inside the root.
    pub fn build(&self, base: &Path, input: &str) -> Result<PathBuf, PathError> {
        let joined = base.join(input.trim_start_matches(['/', '\\']));
        // A trailing `.` or `..` component has no well-defined name to create.
        let name = joined.file_name().ok_or(PathError::NotFound)?.to_owned();
        let parent = joined.parent().unwrap_or(&self.root);
        let parent = std::fs::canonicalize(parent).map_err(|_| PathError::NotFound)?;
        if !parent.starts_with(&self.root) {
            return Err(PathError::OutsideRoot);
        }
        Ok(parent.join(name))
    }

    /// Render an in-root path for display: the root label plus the relative
    /// suffix, e.g. `www/notes` for `/srv/www/notes` under root `/srv/www`.
    pub fn display_from_root(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => self.label.clone(),
            Ok(rel) => format!("{}{}{}", self.label, std::path::MAIN_SEPARATOR, rel.display()),
            Err(_) => self.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, PathResolver) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("notes/a.txt"), "hello").unwrap();
        let resolver = PathResolver::new(dir.path()).unwrap();
        (dir, resolver)
    }

    #[test]
    fn test_new_rejects_missing_root() {
        assert!(PathResolver::new("/no/such/directory/anywhere").is_err());
    }

    #[test]
    fn test_resolve_child() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        let resolved = resolver.resolve(&root, "notes").unwrap();
        assert_eq!(resolved, root.join("notes"));

        let file = resolver.resolve(&root, "notes/a.txt").unwrap();
        assert_eq!(file, root.join("notes/a.txt"));
    }

    #[test]
    fn test_resolve_missing() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        assert_eq!(
            resolver.resolve(&root, "nope.txt"),
            Err(PathError::NotFound)
        );
    }

    #[test]
    fn test_resolve_dotdot_escape() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        // The temp dir's parent exists, so this canonicalizes fine and must
        // be caught by the prefix check, not by a missing-path error.
        assert_eq!(resolver.resolve(&root, ".."), Err(PathError::OutsideRoot));
        assert_eq!(
            resolver.resolve(&root.join("notes"), "../.."),
            Err(PathError::OutsideRoot)
        );
    }

    #[test]
    fn test_resolve_deep_dotdot_chain() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        // Walks below root and back above it; only the canonical result matters.
        let resolved = resolver.resolve(&root, "notes/../notes/./a.txt").unwrap();
        assert_eq!(resolved, root.join("notes/a.txt"));
    }

    #[test]
    fn test_resolve_leading_separator_is_relative() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        // "/notes" must not be taken as an absolute host path.
        let resolved = resolver.resolve(&root, "/notes").unwrap();
        assert_eq!(resolved, root.join("notes"));
    }

    #[test]
    fn test_resolve_empty_is_base() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        assert_eq!(resolver.resolve(&root, "").unwrap(), root);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_escape() {
        let outside = TempDir::new().unwrap();
        let (dir, resolver) = fixture();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("way-out")).unwrap();
        let root = resolver.root().to_path_buf();

        assert_eq!(
            resolver.resolve(&root, "way-out"),
            Err(PathError::OutsideRoot)
        );
    }

    #[test]
    fn test_build_new_entry() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        let built = resolver.build(&root, "new.txt").unwrap();
        assert_eq!(built, root.join("new.txt"));

        let nested = resolver.build(&root, "notes/new.txt").unwrap();
        assert_eq!(nested, root.join("notes/new.txt"));
    }

    #[test]
    fn test_build_missing_parent() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        assert_eq!(
            resolver.build(&root, "ghost/new.txt"),
            Err(PathError::NotFound)
        );
    }

    #[test]
    fn test_build_parent_escape() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        assert_eq!(
            resolver.build(&root, "../new.txt"),
            Err(PathError::OutsideRoot)
        );
    }

    #[test]
    fn test_build_dotdot_name() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();

        assert!(resolver.build(&root, "..").is_err());
    }

    #[test]
    fn test_display_from_root() {
        let (_dir, resolver) = fixture();
        let root = resolver.root().to_path_buf();
        let label = resolver.label().to_string();

        assert_eq!(resolver.display_from_root(&root), label);
        assert_eq!(
            resolver.display_from_root(&root.join("notes")),
            format!("{}{}notes", label, std::path::MAIN_SEPARATOR)
        );
    }

    #[test]
    fn test_custom_label() {
        let (_dir, resolver) = fixture();
        let resolver = resolver.with_label("htdocs");
        let root = resolver.root().to_path_buf();

        assert_eq!(resolver.display_from_root(&root), "htdocs");
    }
}
