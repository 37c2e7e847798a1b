//! Configuration system for burrow.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod burrow_config;
pub mod scan_config;

pub use burrow_config::{BurrowConfig, CliOverrides};
pub use scan_config::ScanConfig;
