//! Top-level burrow configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ScanConfig;
use crate::errors::ConfigError;

/// Project-level config file name, looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = "burrow.toml";

pub const ENV_MAX_DEPTH: &str = "BURROW_SCAN_MAX_DEPTH";
pub const ENV_MAX_FILES: &str = "BURROW_SCAN_MAX_FILES";
pub const ENV_SCAN_DOT_DIRECTORIES: &str = "BURROW_SCAN_DOT_DIRECTORIES";

/// Top-level configuration.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BURROW_SCAN_*`)
/// 3. Project config (`burrow.toml` in the scan root)
/// 4. User config (`~/.burrow/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BurrowConfig {
    pub scan: ScanConfig,
}

/// Overrides supplied by the invoking layer (command flags, editor options).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub max_files: Option<usize>,
    pub scan_dot_directories: Option<bool>,
}

impl BurrowConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        ::tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        ::tracing::debug!(
            max_depth = config.scan.effective_max_depth(),
            max_files = config.scan.effective_max_files(),
            scan_dot_directories = config.scan.effective_scan_dot_directories(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Both limits must be positive when set.
    pub fn validate(config: &BurrowConfig) -> Result<(), ConfigError> {
        if config.scan.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.scan.max_files == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_files".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the user config path: `~/.burrow/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".burrow").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut BurrowConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BurrowConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut BurrowConfig, other: &BurrowConfig) {
        if other.scan.max_depth.is_some() {
            base.scan.max_depth = other.scan.max_depth;
        }
        if other.scan.max_files.is_some() {
            base.scan.max_files = other.scan.max_files;
        }
        if other.scan.scan_dot_directories.is_some() {
            base.scan.scan_dot_directories = other.scan.scan_dot_directories;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.use_default_ignores.is_some() {
            base.scan.use_default_ignores = other.scan.use_default_ignores;
        }
        if other.scan.respect_gitignore.is_some() {
            base.scan.respect_gitignore = other.scan.respect_gitignore;
        }
    }

    /// Apply `BURROW_SCAN_*` environment variables.
    fn apply_env_overrides(config: &mut BurrowConfig) -> Result<(), ConfigError> {
        if let Some(v) = parse_env::<usize>(ENV_MAX_DEPTH)? {
            config.scan.max_depth = Some(v);
        }
        if let Some(v) = parse_env::<usize>(ENV_MAX_FILES)? {
            config.scan.max_files = Some(v);
        }
        if let Some(v) = parse_env::<bool>(ENV_SCAN_DOT_DIRECTORIES)? {
            config.scan.scan_dot_directories = Some(v);
        }
        Ok(())
    }

    fn apply_cli_overrides(config: &mut BurrowConfig, cli: &CliOverrides) {
        if let Some(v) = cli.max_depth {
            config.scan.max_depth = Some(v);
        }
        if let Some(v) = cli.max_files {
            config.scan.max_files = Some(v);
        }
        if let Some(v) = cli.scan_dot_directories {
            config.scan.scan_dot_directories = Some(v);
        }
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("{val:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
