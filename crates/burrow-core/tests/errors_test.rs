//! Tests for the burrow error types.

use std::io;
use std::path::PathBuf;

use burrow_core::errors::error_code::{self, BurrowErrorCode};
use burrow_core::errors::{ConfigError, ScanError};

#[test]
fn test_permission_denied_is_classified() {
    let err = ScanError::from_io(
        "/srv/locked",
        io::Error::from(io::ErrorKind::PermissionDenied),
    );
    assert!(err.is_permission_denied());
    assert_eq!(err.error_code(), error_code::PERMISSION_DENIED);
    assert_eq!(err.path(), PathBuf::from("/srv/locked"));
    assert_eq!(err.to_string(), "Permission denied: /srv/locked");
}

#[test]
fn test_other_io_errors_keep_source() {
    let err = ScanError::from_io("/srv/gone", io::Error::new(io::ErrorKind::NotFound, "gone"));
    assert!(!err.is_permission_denied());
    assert_eq!(err.error_code(), error_code::SCAN_ERROR);
    assert!(matches!(err, ScanError::Io { ref source, .. } if source.kind() == io::ErrorKind::NotFound));
    assert_eq!(err.to_string(), "IO error scanning /srv/gone: gone");
}

#[test]
fn test_code_string_format() {
    let err = ConfigError::ValidationFailed {
        field: "scan.max_files".into(),
        message: "must be greater than 0".into(),
    };
    assert_eq!(
        err.code_string(),
        "[CONFIG_ERROR] Config validation failed for scan.max_files: must be greater than 0"
    );
}

#[test]
fn test_every_error_has_a_code() {
    let errors: Vec<Box<dyn Fn() -> &'static str>> = vec![
        Box::new(|| ConfigError::FileNotFound { path: "/tmp".into() }.error_code()),
        Box::new(|| {
            ConfigError::ParseError {
                path: "/tmp".into(),
                message: "bad".into(),
            }
            .error_code()
        }),
        Box::new(|| ScanError::PermissionDenied { path: "/tmp".into() }.error_code()),
    ];
    for code in errors {
        assert!(!code().is_empty());
    }
}
