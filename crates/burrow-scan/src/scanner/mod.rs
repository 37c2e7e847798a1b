//! Scanner subsystem: breadth-first discovery with depth and file-count bounds.
//!
//! The walk itself lives in [`scanner`]; the filesystem and the exclusion
//! policy are traits so hosts and tests can substitute their own.

pub mod exclusion;
pub mod fs;
pub mod ignores;
pub mod scanner;
pub mod types;

pub use exclusion::{EscapeStyle, Escaped, ExclusionOracle, NoExclusions};
pub use fs::{FileSystem, StdFileSystem};
pub use ignores::{IgnoreOracle, PatternListOracle, DEFAULT_IGNORES};
pub use scanner::DirectoryScanner;
pub use types::{ScanLimits, ScanStats, ScannerState, WalkOutcome};
