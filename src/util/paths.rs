//! Lexical path resolution.
//!
//! Every absolute path in a [`Manifest`](crate::core::Manifest) is produced
//! through a [`PathResolver`]. The default resolver never touches the
//! filesystem: it joins and folds `.`/`..` components.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Turns a possibly-relative path into an absolute one anchored at a base directory.
pub trait PathResolver {
    /// Make `dir` itself absolute. An empty `dir` means the current directory.
    fn absolute_dir(&self, dir: &Path) -> io::Result<PathBuf>;

    /// Resolve `path` against `dir`. `dir` is expected to be absolute already.
    fn resolve(&self, dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_lexically(path)
        } else {
            normalize_lexically(&dir.join(path))
        }
    }
}

/// The default resolver.
///
/// Relative base directories are anchored at the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalResolver;

impl PathResolver for LexicalResolver {
    fn absolute_dir(&self, dir: &Path) -> io::Result<PathBuf> {
        if dir.is_absolute() {
            return Ok(normalize_lexically(dir));
        }
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        std::path::absolute(dir).map(|abs| normalize_lexically(&abs))
    }
}

/// Resolver anchored at a fixed root, for callers that must not depend on the
/// working directory (relative base directories are joined onto `root`).
#[derive(Debug, Clone)]
pub struct RootedResolver {
    root: PathBuf,
}

impl RootedResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RootedResolver { root: root.into() }
    }
}

impl PathResolver for RootedResolver {
    fn absolute_dir(&self, dir: &Path) -> io::Result<PathBuf> {
        Ok(normalize_lexically(&self.root.join(dir)))
    }
}

/// Fold `.` and `..` components without consulting the filesystem.
///
/// `..` at the root is dropped, matching how the OS treats `/..`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\projects")
        } else {
            PathBuf::from("/projects")
        }
    }

    #[test]
    fn test_resolve_relative() {
        let dir = root().join("book");
        let resolved = LexicalResolver.resolve(&dir, Path::new("src/a.bas"));
        assert_eq!(resolved, dir.join("src").join("a.bas"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_folds_parent_components() {
        let dir = root().join("book");
        let resolved = LexicalResolver.resolve(&dir, Path::new("../shared/./c"));
        assert_eq!(resolved, root().join("shared").join("c"));
    }

    #[test]
    fn test_resolve_keeps_absolute() {
        let abs = root().join("elsewhere").join("x.cls");
        let resolved = LexicalResolver.resolve(&root(), &abs);
        assert_eq!(resolved, abs);
    }

    #[test]
    fn test_parent_at_root_is_dropped() {
        let path = root().join("..").join("..").join("a");
        let normalized = normalize_lexically(&path);
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("a"));
    }

    #[test]
    fn test_rooted_resolver_anchors_relative_dir() {
        let resolver = RootedResolver::new(root());
        assert_eq!(
            resolver.absolute_dir(Path::new("book")).unwrap(),
            root().join("book")
        );
        assert_eq!(resolver.absolute_dir(Path::new("")).unwrap(), root());
    }

    #[test]
    fn test_lexical_resolver_absolute_dir() {
        let dir = LexicalResolver.absolute_dir(Path::new("some/dir")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("some/dir"));
    }

    #[test]
    fn test_empty_dir_is_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let dir = LexicalResolver.absolute_dir(Path::new("")).unwrap();
        assert!(dir.is_absolute());
        assert_eq!(dir, normalize_lexically(&cwd));
        assert_eq!(LexicalResolver.absolute_dir(Path::new(".")).unwrap(), dir);
    }
}
