//! Error types for plansplit.
//!
//! Every failure in the pipeline is fatal. The hierarchy mirrors the three
//! stages: reading the plan, decoding individual entries, and touching the
//! filesystem.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for plansplit.
#[derive(Debug, Error)]
pub enum PlanSplitError {
    /// The plan document could not be read or parsed.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// A single resource change entry could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A filesystem operation failed.
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}

/// Errors raised while reading the top-level plan document.
#[derive(Debug, Error)]
pub enum InputError {
    /// Standard input (or the given reader) could not be read.
    #[error("failed to read input: {source}")]
    Read {
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON or lacks a `resource_changes` array.
    #[error("failed to parse plan: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while decoding one resource change entry.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The entry does not have the `address`/`change` shape.
    #[error("failed to decode resource change {index}: {source}")]
    Entry {
        /// Position of the entry in `resource_changes`.
        index: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The address cannot be turned into a file name under the active policy.
    #[error("resource change {index} has unusable address {address:?}: {reason}")]
    UnsafeAddress {
        /// Position of the entry in `resource_changes`.
        index: usize,
        /// The offending address.
        address: String,
        /// Why the address was refused.
        reason: &'static str,
    },
}

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    /// Recursive removal of a directory.
    RemoveDir,
    /// Creation of a directory and its parents.
    CreateDir,
    /// Creation of an output file.
    CreateFile,
    /// Writing or flushing an output file.
    WriteFile,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::RemoveDir => "clean",
            Self::CreateDir => "create directory",
            Self::CreateFile => "create",
            Self::WriteFile => "write to",
        };
        f.write_str(verb)
    }
}

/// A filesystem failure, with the path it happened on.
#[derive(Debug, Error)]
#[error("failed to {operation} {path:?}: {source}")]
pub struct FilesystemError {
    /// The operation that failed.
    pub operation: FsOperation,
    /// Path the operation was applied to.
    pub path: PathBuf,
    /// Underlying IO error.
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for plansplit operations.
pub type Result<T> = std::result::Result<T, PlanSplitError>;

impl FilesystemError {
    /// Creates a filesystem error for `operation` on `path`.
    #[must_use]
    pub fn new(operation: FsOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            source,
        }
    }
}

impl PlanSplitError {
    /// Wraps an IO error from a filesystem operation.
    #[must_use]
    pub fn fs(operation: FsOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem(FilesystemError::new(operation, path, source))
    }

    /// Returns the index of the offending entry, if the error concerns one.
    #[must_use]
    pub const fn entry_index(&self) -> Option<usize> {
        match self {
            Self::Decode(DecodeError::Entry { index, .. } | DecodeError::UnsafeAddress { index, .. }) => {
                Some(*index)
            }
            _ => None,
        }
    }
}
