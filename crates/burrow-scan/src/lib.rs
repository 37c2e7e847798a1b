//! burrow-scan: bounded breadth-first file enumeration.
//!
//! Collects the root-relative paths of regular files beneath a directory,
//! level by level, for consumption by a fuzzy file picker. The walk is bounded
//! by a depth limit and a file-count limit, consults an [`ExclusionOracle`]
//! for every entry, and shrugs off unreadable directories.

pub mod scanner;

pub use scanner::{
    DirectoryScanner, EscapeStyle, Escaped, ExclusionOracle, FileSystem, IgnoreOracle,
    NoExclusions, PatternListOracle, ScanLimits, ScanStats, ScannerState, StdFileSystem,
    WalkOutcome,
};
