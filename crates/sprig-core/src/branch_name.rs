//! Branch name validation and newtype.
//!
//! Branch names double as command-line arguments (where `checkout` has to
//! tell a branch from a file path) and as keys in the persisted graph, so
//! they are restricted to a conservative character set.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A validated branch name.
///
/// # Examples
///
/// ```
/// use sprig_core::BranchName;
///
/// assert!(BranchName::new("feature/login").is_ok());
/// assert!(BranchName::new("-rf").is_err());
/// assert!(BranchName::new("a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    const MAX_LEN: usize = 128;

    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBranchName`] if the name is empty, too long,
    /// or contains characters outside `[A-Za-z0-9._/-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if let Some(reason) = violation(&name) {
            return Err(Error::InvalidBranchName {
                name,
                reason: reason.to_string(),
            });
        }
        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First rule `name` breaks, if any.
fn violation(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("branch name cannot be empty");
    }
    if name.len() > BranchName::MAX_LEN {
        return Some("branch name is too long");
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/')))
    {
        return Some(if bad.is_whitespace() || bad.is_control() {
            "branch name cannot contain whitespace or control characters"
        } else {
            "branch name may only contain letters, digits, '.', '_', '-' and '/'"
        });
    }
    if name.starts_with('-') {
        return Some("branch name cannot start with '-'");
    }
    if name.split('/').any(|part| part.is_empty()) {
        return Some("branch name cannot have empty '/' components");
    }
    if name.split('/').any(|part| part.starts_with('.')) {
        return Some("branch name components cannot start with '.'");
    }
    if name.contains("..") {
        return Some("branch name cannot contain '..'");
    }
    None
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for BranchName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::borrow::Borrow<str> for BranchName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for BranchName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BranchName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for BranchName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BranchName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
