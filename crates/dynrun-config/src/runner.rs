//! Runner configuration (dynrun.toml)

use crate::properties::{parse_properties, EXEC_FILE_DIR, EXEC_FILE_NAME};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Top-level runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Which native library to load
    pub library: LibraryConfig,

    /// Export listing settings
    #[serde(default)]
    pub introspection: IntrospectionConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Native library location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Directory holding the library; empty or absent means the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Base name without platform extension (e.g. `fxForward`)
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntrospectionConfig {
    /// Upper bound on the export listing tool, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default log level (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    dynrun_core::DEFAULT_TOOL_TIMEOUT.as_secs()
}

fn default_level() -> String {
    "info".to_string()
}

impl RunnerConfig {
    /// Configuration for a library in the working directory, all else default
    pub fn for_library(name: impl Into<String>) -> Self {
        Self {
            library: LibraryConfig {
                dir: None,
                name: name.into(),
            },
            introspection: IntrospectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load from a `.toml` or legacy `.properties` file
    ///
    /// Does not validate; call [`RunnerConfig::validate`] once all overrides
    /// are applied.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let is_properties = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("properties"));

        if is_properties {
            Self::from_properties(&content, path)
        } else {
            toml::from_str(&content).map_err(|error| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            })
        }
    }

    fn from_properties(content: &str, path: &Path) -> ConfigResult<Self> {
        let mut props = parse_properties(content, path)?;

        let name = props
            .remove(EXEC_FILE_NAME)
            .ok_or_else(|| ConfigError::MissingField {
                field: EXEC_FILE_NAME.to_string(),
                file: path.to_path_buf(),
            })?;

        let mut config = Self::for_library(name);
        config.library.dir = props
            .remove(EXEC_FILE_DIR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> ConfigResult<()> {
        if self.library.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "library.name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.introspection.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "introspection.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if log::LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }

        Ok(())
    }

    /// Full path of the library file with the platform extension
    pub fn library_path(&self, cwd: &Path) -> PathBuf {
        let file = dynrun_core::library_file_name(&self.library.name);
        match &self.library.dir {
            Some(dir) if !dir.as_os_str().is_empty() => cwd.join(dir).join(file),
            _ => cwd.join(file),
        }
    }

    /// Resolve a relative `library.dir` against `base` instead of the working directory
    ///
    /// Empty, absent and absolute directories are left as they are.
    pub fn anchor_dir(&mut self, base: &Path) {
        if let Some(dir) = &self.library.dir {
            if !dir.as_os_str().is_empty() && dir.is_relative() {
                self.library.dir = Some(base.join(dir));
            }
        }
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.introspection.timeout_secs)
    }
}
