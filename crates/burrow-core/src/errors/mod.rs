//! Error handling for burrow.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod scan_error;

pub use config_error::ConfigError;
pub use error_code::BurrowErrorCode;
pub use scan_error::ScanError;
