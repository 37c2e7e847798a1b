//! Scanner errors.
//!
//! The walk never surfaces these to callers: a failed directory listing is
//! converted into a `ScanError`, logged, recorded in the scan statistics, and
//! the walk moves on.

use std::io;
use std::path::PathBuf;

use super::error_code::{self, BurrowErrorCode};

/// Errors that can occur while listing a directory during a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },
}

impl ScanError {
    /// Classify an I/O failure observed while reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether this is an access failure (the expected, quiet case).
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::PermissionDenied { path } => path,
        }
    }
}

impl BurrowErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => error_code::PERMISSION_DENIED,
            Self::Io { .. } => error_code::SCAN_ERROR,
        }
    }
}
