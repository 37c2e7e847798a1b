//! Structured span field names used by the scanner.
//!
//! Keeping these in one place makes log queries stable across releases.

/// Scanner: root directory of the walk.
pub const SCAN_ROOT: &str = "scan_root";

/// Scanner: regular files counted, including one that tripped the file limit.
pub const FILES_FOUND: &str = "files_found";

/// Scanner: directories whose listing was read.
pub const DIRS_SCANNED: &str = "dirs_scanned";

/// Scanner: directories whose listing failed and were skipped.
pub const DIRS_UNREADABLE: &str = "dirs_unreadable";

/// Scanner: deepest breadth-first level expanded.
pub const DEPTH_REACHED: &str = "depth_reached";

/// Scanner: wall-clock duration of the walk in milliseconds.
pub const WALK_DURATION: &str = "walk_duration_ms";
