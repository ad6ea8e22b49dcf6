//! Error taxonomy for file access.

use std::path::{Path, PathBuf};

/// Result alias for accessor operations.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Classification of an [`AccessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was absent
    MissingArgument,
    /// Line range was malformed
    InvalidRange,
    /// An argument had an unsupported value
    InvalidArgument,
    /// Path resolved outside the project root
    AccessDenied,
    /// File does not exist
    NotFound,
    /// OS refused the operation
    PermissionDenied,
    /// File content is not UTF-8
    DecodeError,
    /// Target was missing after a write
    WriteVerificationFailed,
    /// Any other I/O failure
    UnknownIo,
}

/// Errors returned by the safe file accessor.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Required argument missing
    #[error("Missing required parameter '{0}'")]
    MissingArgument(String),

    /// Invalid line range
    #[error("{0}")]
    InvalidRange(String),

    /// Unsupported argument value
    #[error("Invalid value for '{name}': {reason}")]
    InvalidArgument {
        /// Argument name
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Path escapes the project root
    #[error("Access to '{}' is not allowed", .0.display())]
    AccessDenied(PathBuf),

    /// File not found
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permission denied by the OS
    #[error("Permission denied when accessing: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Content is not valid UTF-8
    #[error("Could not decode file as UTF-8: {}", .0.display())]
    DecodeError(PathBuf),

    /// Written file is not present afterwards
    #[error("Failed to write to file: {}", .0.display())]
    WriteVerificationFailed(PathBuf),

    /// Other I/O error, with the OS reason
    #[error("{reason}: {}", .path.display())]
    UnknownIo {
        /// Resolved path
        path: PathBuf,
        /// OS-reported reason
        reason: String,
    },
}

impl AccessError {
    /// Get the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgument(_) => ErrorKind::MissingArgument,
            Self::InvalidRange(_) => ErrorKind::InvalidRange,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::DecodeError(_) => ErrorKind::DecodeError,
            Self::WriteVerificationFailed(_) => ErrorKind::WriteVerificationFailed,
            Self::UnknownIo { .. } => ErrorKind::UnknownIo,
        }
    }

    /// Shorthand for a missing argument.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Shorthand for an invalid argument.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Map an I/O error raised while reading `path`.
    pub(crate) fn from_read(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => Self::DecodeError(path.to_path_buf()),
            _ => Self::unknown(err, path),
        }
    }

    /// Map an I/O error raised while writing `path`.
    ///
    /// Writes only distinguish permission failures; everything else keeps
    /// the OS reason.
    pub(crate) fn from_write(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::unknown(err, path),
        }
    }

    fn unknown(err: std::io::Error, path: &Path) -> Self {
        tracing::error!("I/O failure on {}: {}", path.display(), err);
        Self::UnknownIo {
            path: path.to_path_buf(),
            reason: os_reason(&err),
        }
    }
}

/// OS description of an error without the trailing `(os error N)`.
fn os_reason(err: &std::io::Error) -> String {
    let text = err.to_string();
    match text.rfind(" (os error") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}
