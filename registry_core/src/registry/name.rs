//! Validation of client-supplied file names.
//!
//! A client name becomes the on-disk filename verbatim, so anything that
//! could escape the registry directory is rejected outright rather than
//! silently stripped. Silent stripping would let two distinct requested
//! names collide on the same stored file.

use crate::error::{AppError, Result};

/// A file name proven to resolve to a direct child of the registry
/// directory when joined to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeName(String);

impl SafeName {
    /// Validates a raw client-supplied name.
    ///
    /// Rejects empty names, the `.` and `..` path components, and any name
    /// containing a path separator or NUL byte.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || raw == "." || raw == ".." {
            return Err(AppError::InvalidName(raw.to_string()));
        }

        if raw.contains(['/', '\\', '\0']) {
            return Err(AppError::InvalidName(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SafeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
