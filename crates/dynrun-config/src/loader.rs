//! Configuration Loader
//!
//! Finds the runner configuration and applies environment overrides.

use crate::runner::RunnerConfig;
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Preferred config file name
pub const CONFIG_FILE_NAME: &str = "dynrun.toml";
/// Legacy config file name
pub const PROPERTIES_FILE_NAME: &str = "application.properties";

pub const ENV_LIB_DIR: &str = "DYNRUN_LIB_DIR";
pub const ENV_LIB_NAME: &str = "DYNRUN_LIB_NAME";
pub const ENV_TOOL_TIMEOUT: &str = "DYNRUN_TOOL_TIMEOUT";
pub const ENV_LOG: &str = "DYNRUN_LOG";

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. `dynrun.toml` or `application.properties`, nearest to the start
///    directory; otherwise `~/.dynrun/dynrun.toml`
/// 2. Environment variables (DYNRUN_*)
/// 3. CLI flags (handled by caller)
pub struct ConfigLoader {
    /// Per-user config path; resolved from the home directory on first use
    global_config_path: Option<PathBuf>,
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone)]
pub struct Config {
    pub runner: RunnerConfig,

    /// File the configuration was read from
    pub source: PathBuf,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use `path` instead of `~/.dynrun/dynrun.toml` as the per-user fallback
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// In each directory from `start_dir` up to the root, `dynrun.toml` wins
    /// over `application.properties`. The per-user file is only consulted
    /// when neither exists anywhere on the way up.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let source = match Self::find_config_file(start_dir) {
            Some(path) => path,
            None => match self.global_config_path() {
                Some(path) if path.exists() => path,
                _ => return Err(ConfigError::NotFound(start_dir.to_path_buf())),
            },
        };

        self.load_from_file(&source)
    }

    /// Load configuration from a specific file
    ///
    /// A relative library directory in the file is taken relative to the
    /// file's own directory.
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        log::debug!("loading configuration from {}", config_path.display());
        let mut runner = RunnerConfig::load_from_file(config_path)?;
        if let Some(base) = config_path.parent() {
            runner.anchor_dir(base);
        }
        let runner = self.apply_env_overrides(runner)?;

        Ok(Config {
            runner,
            source: config_path.to_path_buf(),
        })
    }

    fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);

        while let Some(dir) = current {
            for name in [CONFIG_FILE_NAME, PROPERTIES_FILE_NAME] {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }

        None
    }

    fn global_config_path(&mut self) -> Option<PathBuf> {
        if self.global_config_path.is_none() {
            self.global_config_path = Self::global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME));
        }
        self.global_config_path.clone()
    }

    /// Apply environment variable overrides
    ///
    /// Empty `DYNRUN_LIB_DIR` resets to the working directory; other empty
    /// variables are ignored.
    pub fn apply_env_overrides(&self, mut config: RunnerConfig) -> ConfigResult<RunnerConfig> {
        if let Ok(dir) = env::var(ENV_LIB_DIR) {
            config.library.dir = if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }

        if let Some(name) = non_empty_var(ENV_LIB_NAME) {
            config.library.name = name;
        }

        if let Some(timeout) = non_empty_var(ENV_TOOL_TIMEOUT) {
            config.introspection.timeout_secs =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: ENV_TOOL_TIMEOUT.to_string(),
                        reason: format!("'{}' is not a number of seconds", timeout),
                    })?;
        }

        if let Some(level) = non_empty_var(ENV_LOG) {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Per-user configuration directory (~/.dynrun)
    pub fn global_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".dynrun"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_find_prefers_toml_in_same_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROPERTIES_FILE_NAME), "execFileName=bond\n").unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[library]\nname = \"fxForward\"\n").unwrap();

        let found = ConfigLoader::find_config_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_find_nearest_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[library]\nname = \"outer\"\n").unwrap();
        std::fs::write(dir.path().join("a").join(PROPERTIES_FILE_NAME), "execFileName=inner\n").unwrap();

        let found = ConfigLoader::find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join("a").join(PROPERTIES_FILE_NAME));
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir_all(nested.join(CONFIG_FILE_NAME)).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[library]\nname = \"outer\"\n").unwrap();

        let found = ConfigLoader::find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }
}
