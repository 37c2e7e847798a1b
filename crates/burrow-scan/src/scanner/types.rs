//! Scanner data types: ScanLimits, ScanStats, WalkOutcome, ScannerState.

use burrow_core::config::scan_config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES};
use burrow_core::config::ScanConfig;
use burrow_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Bounds applied to a walk. Both limits are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    max_depth: usize,
    max_files: usize,
    scan_dot_directories: bool,
}

impl ScanLimits {
    pub fn new(
        max_depth: usize,
        max_files: usize,
        scan_dot_directories: bool,
    ) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "max_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if max_files == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "max_files".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            max_depth,
            max_files,
            scan_dot_directories,
        })
    }

    /// Resolve limits from a (possibly partial) scan configuration.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.effective_max_depth(),
            config.effective_max_files(),
            config.effective_scan_dot_directories(),
        )
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn scan_dot_directories(&self) -> bool {
        self.scan_dot_directories
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_files: DEFAULT_MAX_FILES,
            scan_dot_directories: false,
        }
    }
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WalkOutcome {
    /// The frontier was exhausted.
    #[default]
    Completed,
    /// A file beyond `max_files` was found; everything after it was dropped.
    LimitReached,
}

/// Where a scanner is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    /// No memoized result.
    Idle,
    /// The memoized result covers the whole bounded tree.
    Done,
    /// The memoized result was cut short by the file limit.
    LimitStopped,
}

/// Aggregate statistics for one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Regular files counted, including the one that tripped the limit.
    pub files_found: usize,
    pub dirs_scanned: usize,
    pub dirs_unreadable: usize,
    /// Entries the exclusion oracle rejected.
    pub entries_excluded: usize,
    /// Directories not descended because the depth limit was reached.
    pub dirs_skipped_depth: usize,
    /// Dot-directories not descended.
    pub dirs_skipped_dot: usize,
    /// Entries skipped because their name is not valid UTF-8.
    pub entries_non_utf8: usize,
    /// Deepest level whose directories were expanded.
    pub depth_reached: usize,
    pub outcome: WalkOutcome,
    pub duration_ms: u64,
    /// Non-fatal listing failures.
    pub errors: Vec<String>,
}

impl ScanStats {
    pub fn limit_exceeded(&self) -> bool {
        self.outcome == WalkOutcome::LimitReached
    }
}
