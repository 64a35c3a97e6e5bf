//! Validation of repository-relative file paths.

use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Check that `path` is a relative path that stays inside the repository
/// and return its canonical form.
///
/// The canonical form joins the normal components with `/`, so `./a.txt`,
/// `a//b` and `dir/` name the same file as `a.txt`, `a/b` and `dir`.
/// Rejects empty paths, absolute paths, `..` components and anything that
/// would land in the `.sprig` metadata directory.
///
/// # Errors
/// Returns [`Error::InvalidPath`] describing the first violation found.
pub fn validate_path(path: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| invalid("path is not valid UTF-8"))?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("path cannot contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"));
            }
        }
    }

    match parts.first() {
        None => Err(invalid("path cannot be empty")),
        Some(&".sprig") => Err(invalid("path points into the .sprig directory")),
        Some(_) => Ok(parts.join("/")),
    }
}
