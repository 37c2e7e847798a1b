//! Breadth-first, depth- and count-limited directory walk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use burrow_core::errors::ScanError;
use burrow_core::tracing::metrics;
use tracing::{debug, debug_span, info, warn};

use super::exclusion::{ExclusionOracle, NoExclusions};
use super::fs::{FileSystem, StdFileSystem};
use super::types::{ScanLimits, ScanStats, ScannerState, WalkOutcome};

/// Enumerates regular files under a root, level by level, and memoizes the
/// resulting root-relative paths until invalidated.
///
/// A scanner performs at most one walk at a time: [`paths`](Self::paths)
/// takes `&mut self`. Share one across threads behind a `Mutex`.
///
/// ```no_run
/// use burrow_scan::DirectoryScanner;
///
/// let mut scanner = DirectoryScanner::new("/srv/project");
/// for path in scanner.paths() {
///     println!("{path}");
/// }
/// ```
#[derive(Debug)]
pub struct DirectoryScanner<O = NoExclusions, F = StdFileSystem> {
    root: PathBuf,
    limits: ScanLimits,
    oracle: O,
    fs: F,
    cache: Option<Walk>,
}

#[derive(Debug)]
struct Walk {
    paths: Vec<String>,
    stats: ScanStats,
}

/// Transient state of one walk.
struct WalkState {
    depth: usize,
    files_found: usize,
    paths: Vec<String>,
    stats: ScanStats,
}

impl DirectoryScanner {
    /// A scanner over the host filesystem with default limits and no
    /// exclusions. Does not touch the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            limits: ScanLimits::default(),
            oracle: NoExclusions,
            fs: StdFileSystem,
            cache: None,
        }
    }
}

impl<O, F> DirectoryScanner<O, F> {
    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self.cache = None;
        self
    }

    pub fn with_oracle<O2>(self, oracle: O2) -> DirectoryScanner<O2, F> {
        DirectoryScanner {
            root: self.root,
            limits: self.limits,
            oracle,
            fs: self.fs,
            cache: None,
        }
    }

    pub fn with_filesystem<F2>(self, fs: F2) -> DirectoryScanner<O, F2> {
        DirectoryScanner {
            root: self.root,
            limits: self.limits,
            oracle: self.oracle,
            fs,
            cache: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn limits(&self) -> &ScanLimits {
        &self.limits
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Drop the memoized result; the next [`paths`](Self::paths) call walks again.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Statistics of the memoized walk, if any.
    pub fn stats(&self) -> Option<&ScanStats> {
        self.cache.as_ref().map(|walk| &walk.stats)
    }

    pub fn state(&self) -> ScannerState {
        match &self.cache {
            None => ScannerState::Idle,
            Some(walk) if walk.stats.limit_exceeded() => ScannerState::LimitStopped,
            Some(_) => ScannerState::Done,
        }
    }
}

impl<O: ExclusionOracle, F> DirectoryScanner<O, F> {
    /// Point the scanner at a new root and rebase the oracle onto it.
    /// Setting the current root again keeps the memoized result.
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        if root != self.root {
            self.oracle.rebase(&root);
            self.root = root;
            self.invalidate();
        }
    }
}

impl<O, F> DirectoryScanner<O, F>
where
    O: ExclusionOracle,
    F: FileSystem,
{
    /// Root-relative paths of all regular files within the configured bounds,
    /// breadth-first, in listing order within each directory.
    ///
    /// Walks on first call and after [`invalidate`](Self::invalidate); returns
    /// the memoized result otherwise. Never fails: unreadable directories are
    /// skipped and hitting the file limit yields the partial result.
    pub fn paths(&mut self) -> &[String] {
        if self.cache.is_none() {
            self.cache = Some(self.walk());
        }
        self.cache.as_ref().map_or(&[][..], |walk| walk.paths.as_slice())
    }

    fn walk(&self) -> Walk {
        let span = debug_span!("bfs_walk", root = %self.root.display());
        let _guard = span.enter();
        let start = Instant::now();

        let mut state = WalkState {
            depth: 0,
            files_found: 0,
            paths: Vec::new(),
            stats: ScanStats::default(),
        };
        let mut frontier = vec![self.root.clone()];

        while !frontier.is_empty() {
            state.stats.depth_reached = state.depth;
            match self.expand_level(&frontier, &mut state) {
                Some(next) => frontier = next,
                None => {
                    state.stats.outcome = WalkOutcome::LimitReached;
                    break;
                }
            }
            state.depth += 1;
        }

        state.stats.files_found = state.files_found;
        state.stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            { metrics::SCAN_ROOT } = %self.root.display(),
            { metrics::FILES_FOUND } = state.stats.files_found,
            { metrics::DIRS_SCANNED } = state.stats.dirs_scanned,
            { metrics::DIRS_UNREADABLE } = state.stats.dirs_unreadable,
            { metrics::DEPTH_REACHED } = state.stats.depth_reached,
            { metrics::WALK_DURATION } = state.stats.duration_ms,
            limit_exceeded = state.stats.limit_exceeded(),
            "scan complete"
        );

        Walk {
            paths: state.paths,
            stats: state.stats,
        }
    }

    /// Expand every directory of one level. Returns the next frontier, or
    /// `None` once the file limit is exceeded, abandoning all pending work.
    fn expand_level(
        &self,
        frontier: &[PathBuf],
        state: &mut WalkState,
    ) -> Option<Vec<PathBuf>> {
        debug!(depth = state.depth, dirs = frontier.len(), "expanding level");
        let mut next = Vec::new();

        for dir in frontier {
            let entries = match self.fs.list_entries(dir) {
                Ok(entries) => entries,
                Err(err) => {
                    let err = ScanError::from_io(dir.as_path(), err);
                    if err.is_permission_denied() {
                        debug!(error = %err, "skipping unreadable directory");
                    } else {
                        warn!(error = %err, "skipping directory");
                    }
                    state.stats.dirs_unreadable += 1;
                    state.stats.errors.push(err.to_string());
                    continue;
                }
            };
            state.stats.dirs_scanned += 1;

            for name in entries {
                if name == "." || name == ".." {
                    continue;
                }
                let path = self.fs.join(dir, &name);
                let Some(relative) = name.to_str().and_then(|_| self.relative(&path)) else {
                    debug!(path = %path.display(), "skipping entry with non-UTF-8 name");
                    state.stats.entries_non_utf8 += 1;
                    continue;
                };

                let is_file = self.fs.is_regular_file(&path);
                let is_dir = !is_file && self.fs.is_directory(&path);

                if self
                    .oracle
                    .excluded_entry(&self.oracle.escape_style().apply(&relative), is_dir)
                {
                    state.stats.entries_excluded += 1;
                    continue;
                }

                if is_file {
                    state.files_found += 1;
                    if state.files_found > self.limits.max_files() {
                        debug!(path = %relative, "file limit exceeded");
                        return None;
                    }
                    state.paths.push(relative);
                } else if is_dir {
                    if state.depth >= self.limits.max_depth() {
                        state.stats.dirs_skipped_depth += 1;
                        continue;
                    }
                    if !self.limits.scan_dot_directories()
                        && name.as_encoded_bytes().starts_with(b".")
                    {
                        state.stats.dirs_skipped_dot += 1;
                        continue;
                    }
                    next.push(path);
                }
            }
        }

        Some(next)
    }

    /// `path` with the root prefix and its separator removed, or `None` when
    /// the result would not be valid UTF-8.
    fn relative(&self, path: &Path) -> Option<String> {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_str().map(str::to_owned),
            Err(_) => {
                let root = self.root.to_str()?;
                let prefix_len = root.trim_end_matches(std::path::is_separator).len();
                let full = path.to_str()?;
                Some(full.get(prefix_len + 1..).unwrap_or_default().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scanner_is_idle_and_lazy() {
        let scanner = DirectoryScanner::new("/definitely/not/here");
        assert_eq!(scanner.state(), ScannerState::Idle);
        assert!(scanner.stats().is_none());
        assert_eq!(scanner.limits(), &ScanLimits::default());
    }

    #[test]
    fn missing_root_yields_empty_result() {
        let mut scanner = DirectoryScanner::new("/definitely/not/here");
        assert!(scanner.paths().is_empty());
        let stats = scanner.stats().unwrap();
        assert_eq!(stats.dirs_unreadable, 1);
        assert_eq!(stats.errors.len(), 1);
        assert_eq!(scanner.state(), ScannerState::Done);
    }

    #[test]
    fn relative_strips_root_with_trailing_separator() {
        let scanner = DirectoryScanner::new("/srv/project/");
        assert_eq!(
            scanner.relative(Path::new("/srv/project/src/lib.rs")),
            Path::new("src").join("lib.rs").to_str().map(str::to_owned)
        );
    }

    #[cfg(unix)]
    #[test]
    fn relative_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let scanner = DirectoryScanner::new("/srv/project");
        let path = Path::new("/srv/project").join(OsStr::from_bytes(b"bad\xff.txt"));
        assert_eq!(scanner.relative(&path), None);
    }

    #[test]
    fn set_root_same_value_keeps_cache() {
        let mut scanner = DirectoryScanner::new("/definitely/not/here");
        scanner.paths();
        scanner.set_root("/definitely/not/here");
        assert_eq!(scanner.state(), ScannerState::Done);
        scanner.set_root("/somewhere/else");
        assert_eq!(scanner.state(), ScannerState::Idle);
        assert_eq!(scanner.root(), Path::new("/somewhere/else"));
    }
}
