//! Concrete exclusion oracles.
//!
//! - [`IgnoreOracle`]: gitignore semantics through the `ignore` crate, seeded
//!   with a default list of build outputs, dependency trees and binaries.
//! - [`PatternListOracle`]: an editor-style comma-separated wildcard list.

use std::path::{Path, PathBuf};

use burrow_core::config::ScanConfig;
use burrow_core::errors::ConfigError;
use glob::{MatchOptions, Pattern};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use super::exclusion::ExclusionOracle;

/// Directories that are never worth offering in a file picker.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Package managers
    "node_modules",
    "bower_components",
    ".pnpm",
    ".yarn",
    // Python
    "__pycache__",
    ".venv",
    "venv",
    ".eggs",
    "*.egg-info",
    // Build outputs
    "target",
    ".gradle",
    "dist",
    "_build",
    // Version control
    ".git",
    ".svn",
    ".hg",
    ".bzr",
    // Caches
    ".cache",
    ".parcel-cache",
    ".next",
    ".turbo",
    ".nyc_output",
];

/// Binary and generated file globs.
pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &[
    // Compiled
    "*.pyc",
    "*.pyo",
    "*.class",
    "*.o",
    "*.obj",
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    "*.a",
    "*.lib",
    // Archives
    "*.zip",
    "*.tar",
    "*.gz",
    "*.bz2",
    "*.xz",
    "*.7z",
    "*.jar",
    // Media
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.ico",
    "*.mp3",
    "*.mp4",
    "*.pdf",
    // Editor droppings
    "*.swp",
    "*.swo",
    ".DS_Store",
];

/// Name of the project-local ignore file read alongside `.gitignore`.
pub const BURROW_IGNORE_FILE: &str = ".burrowignore";

/// All default patterns, directories first.
pub static DEFAULT_IGNORES: std::sync::LazyLock<Vec<String>> = std::sync::LazyLock::new(|| {
    let mut patterns = Vec::new();
    patterns.extend(DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()));
    patterns.extend(DEFAULT_IGNORE_EXTENSIONS.iter().map(|s| s.to_string()));
    patterns
});

/// Gitignore-style exclusion rooted at the scan root.
///
/// Keeps the pieces it was built from so that a root change can reload the
/// new root's ignore files.
#[derive(Debug, Clone)]
pub struct IgnoreOracle {
    root: PathBuf,
    extra_patterns: Vec<String>,
    use_defaults: bool,
    respect_ignore_files: bool,
    gitignore: Gitignore,
}

impl IgnoreOracle {
    /// Build from explicit pieces.
    ///
    /// Ignore files that exist but fail to parse are logged and skipped; an
    /// invalid pattern in `extra_patterns` is a configuration error.
    pub fn new(
        root: &Path,
        extra_patterns: &[String],
        use_defaults: bool,
        respect_ignore_files: bool,
    ) -> Result<Self, ConfigError> {
        let gitignore = build_gitignore(root, extra_patterns, use_defaults, respect_ignore_files)?;
        Ok(Self {
            root: root.to_path_buf(),
            extra_patterns: extra_patterns.to_vec(),
            use_defaults,
            respect_ignore_files,
            gitignore,
        })
    }

    pub fn from_config(root: &Path, config: &ScanConfig) -> Result<Self, ConfigError> {
        Self::new(
            root,
            &config.extra_ignore,
            config.effective_use_default_ignores(),
            config.effective_respect_gitignore(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_ignored(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(relative_path, is_dir).is_ignore()
    }
}

impl ExclusionOracle for IgnoreOracle {
    /// Evaluates `relative_path` as a file. Directory-only patterns (`build/`)
    /// apply through [`excluded_entry`](ExclusionOracle::excluded_entry).
    fn excluded(&self, relative_path: &str) -> bool {
        self.is_ignored(Path::new(relative_path), false)
    }

    fn excluded_entry(&self, relative_path: &str, is_dir: bool) -> bool {
        self.is_ignored(Path::new(relative_path), is_dir)
    }

    fn rebase(&mut self, root: &Path) {
        if root == self.root.as_path() {
            return;
        }
        match build_gitignore(
            root,
            &self.extra_patterns,
            self.use_defaults,
            self.respect_ignore_files,
        ) {
            Ok(gitignore) => {
                self.root = root.to_path_buf();
                self.gitignore = gitignore;
            }
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "keeping previous ignore rules");
            }
        }
    }
}

fn build_gitignore(
    root: &Path,
    extra_patterns: &[String],
    use_defaults: bool,
    respect_ignore_files: bool,
) -> Result<Gitignore, ConfigError> {
    let mut builder = GitignoreBuilder::new(root);

    if use_defaults {
        for pattern in DEFAULT_IGNORES.iter() {
            builder
                .add_line(None, pattern)
                .map_err(|e| invalid_pattern(pattern, e))?;
        }
    }

    for pattern in extra_patterns {
        builder
            .add_line(None, pattern)
            .map_err(|e| invalid_pattern(pattern, e))?;
    }

    if respect_ignore_files {
        for name in [".gitignore", BURROW_IGNORE_FILE] {
            let file = root.join(name);
            if file.is_file() {
                if let Some(err) = builder.add(&file) {
                    tracing::warn!(path = %file.display(), error = %err, "skipping unreadable ignore file");
                }
            }
        }
    }

    let gitignore = builder
        .build()
        .map_err(|e| ConfigError::InvalidValue {
            field: "scan.extra_ignore".to_string(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        root = %root.display(),
        patterns = gitignore.num_ignores(),
        "ignore rules built"
    );
    Ok(gitignore)
}

fn invalid_pattern(pattern: &str, err: ignore::Error) -> ConfigError {
    ConfigError::InvalidValue {
        field: "scan.extra_ignore".to_string(),
        message: format!("{pattern:?}: {err}"),
    }
}

/// Comma-separated wildcard list such as `*.o,*.obj,.git,build/*`.
///
/// A pattern without a `/` is matched against the last path component; one
/// with a `/` is matched against the whole relative path, where `*` does not
/// cross separators. A literal comma is written `\,`.
#[derive(Debug, Clone)]
pub struct PatternListOracle {
    name_patterns: Vec<Pattern>,
    path_patterns: Vec<Pattern>,
}

const PATTERN_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl PatternListOracle {
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let mut name_patterns = Vec::new();
        let mut path_patterns = Vec::new();

        for raw in split_pattern_list(list) {
            let pattern = Pattern::new(&raw).map_err(|e| ConfigError::InvalidValue {
                field: "pattern_list".to_string(),
                message: format!("{raw:?}: {e}"),
            })?;
            if raw.contains('/') {
                path_patterns.push(pattern);
            } else {
                name_patterns.push(pattern);
            }
        }

        Ok(Self {
            name_patterns,
            path_patterns,
        })
    }
}

impl ExclusionOracle for PatternListOracle {
    fn excluded(&self, relative_path: &str) -> bool {
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        self.name_patterns
            .iter()
            .any(|p| p.matches_with(name, PATTERN_MATCH))
            || self
                .path_patterns
                .iter()
                .any(|p| p.matches_with(relative_path, PATTERN_MATCH))
    }
}

/// Split on unescaped commas, dropping empty items.
fn split_pattern_list(list: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = list.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => {
                let item = current.trim();
                if !item.is_empty() {
                    items.push(item.to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    let item = current.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
    items
}
