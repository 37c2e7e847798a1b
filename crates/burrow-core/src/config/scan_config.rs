//! Scan configuration.

use serde::{Deserialize, Serialize};

/// Default breadth-first depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 15;
/// Default cap on the number of files collected by one walk.
pub const DEFAULT_MAX_FILES: usize = 10_000;

/// Configuration for the scanner subsystem.
///
/// Every field is optional so that configuration layers can be merged;
/// use the `effective_*` accessors to read resolved values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Deepest level the walk descends to. Default: 15.
    pub max_depth: Option<usize>,
    /// Maximum number of files returned by one walk. Default: 10000.
    pub max_files: Option<usize>,
    /// Descend into directories whose name starts with `.`. Default: false.
    pub scan_dot_directories: Option<bool>,
    /// Additional gitignore-style patterns to exclude.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Apply the built-in list of build/dependency/binary ignores. Default: true.
    pub use_default_ignores: Option<bool>,
    /// Honor `.gitignore` and `.burrowignore` at the scan root. Default: true.
    pub respect_gitignore: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective max depth, defaulting to 15.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Returns the effective max files, defaulting to 10000.
    pub fn effective_max_files(&self) -> usize {
        self.max_files.unwrap_or(DEFAULT_MAX_FILES)
    }

    pub fn effective_scan_dot_directories(&self) -> bool {
        self.scan_dot_directories.unwrap_or(false)
    }

    pub fn effective_use_default_ignores(&self) -> bool {
        self.use_default_ignores.unwrap_or(true)
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }
}
