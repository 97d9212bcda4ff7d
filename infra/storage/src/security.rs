use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

fn escape(path: &Path, reason: &'static str) -> StorageError {
    StorageError::PathTraversalAttempt {
        message: path.display().to_string().into(),
        context: Some(reason.into()),
    }
}

/// Collapses `.` and `..` lexically, refusing anything that climbs above the root.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(segment) => out.push(segment),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(escape(path, "Path attempted to escape sandbox via '..'"));
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(escape(path, "Absolute paths are not allowed in sandbox"));
            },
        }
    }

    if out.as_os_str().is_empty() {
        return Err(escape(path, "Path resolves to the sandbox root itself"));
    }

    Ok(out)
}

/// Joins `path` onto `root` and verifies the result stays inside the sandbox.
///
/// The deepest ancestor that already exists is canonicalized, so a symlink pointing
/// outside the root is caught even when the target file does not exist yet.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let joined = root.join(normalize_relative(path.as_ref())?);

    let mut ancestor = Some(joined.as_path());
    while let Some(current) = ancestor {
        if current == root {
            return Ok(joined);
        }
        if current.exists() {
            let canonical = current.canonicalize().map_err(|source| StorageError::Io {
                source,
                context: Some(format!("Failed to verify {}", current.display()).into()),
            })?;
            return if canonical.starts_with(root) {
                Ok(joined)
            } else {
                Err(escape(&canonical, "Existing path is a symlink outside sandbox"))
            };
        }
        ancestor = current.parent();
    }

    Err(escape(&joined, "No valid parent directory found within sandbox"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_inner_parent() {
        let out = normalize_relative(Path::new("a/./b/../c.json")).unwrap();
        assert_eq!(out, PathBuf::from("a/c.json"));
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert!(normalize_relative(Path::new("../etc/passwd")).is_err());
        assert!(normalize_relative(Path::new("a/../../b")).is_err());
    }

    #[test]
    fn test_normalize_rejects_absolute_and_empty() {
        assert!(normalize_relative(Path::new("/etc/passwd")).is_err());
        assert!(normalize_relative(Path::new(".")).is_err());
    }
}
