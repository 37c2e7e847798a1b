//! burrow-core: shared foundations for the burrow scanner.
//!
//! - Errors: one `thiserror` enum per subsystem, each carrying an error code
//! - Config: TOML-based scan configuration with layered resolution
//! - Tracing: `tracing-subscriber` setup driven by `BURROW_LOG`

pub mod config;
pub mod errors;
pub mod tracing;

pub use config::{BurrowConfig, ScanConfig};
pub use errors::{BurrowErrorCode, ConfigError, ScanError};
