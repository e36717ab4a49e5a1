//! Ergonomic error context helpers.
//!
//! Provides an extension trait for adding the offending file path to
//! `io::Result` values, converting them into [`StoreError::Io`].

use crate::base::storeerror::StoreError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Attach the file path an IO error was raised for.
    ///
    /// # Example
    /// ```ignore
    /// use firecookies::base::context::IoResultExt;
    ///
    /// let json = std::fs::read_to_string(&path).path_context(&path)?;
    /// // Error: "Cookie file IO failed for /tmp/cookies.json: No such file or directory"
    /// ```
    fn path_context(self, path: &Path) -> Result<T, StoreError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn path_context(self, path: &Path) -> Result<T, StoreError> {
        self.map_err(|e| StoreError::io_at(path, e))
    }
}
