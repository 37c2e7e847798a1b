//! BurrowErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable code
/// alongside its human-readable message.
pub trait BurrowErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn code_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
