//! dynrun configuration
//!
//! Settings for the runner: which library to load, how long export listing
//! may take, and the log level.
//!
//! # Sources
//!
//! Applied in order, later overriding earlier:
//! 1. A config file: `dynrun.toml`, or the legacy `application.properties`
//!    with `execFileDir` / `execFileName`, found by walking up from the start
//!    directory, falling back to `~/.dynrun/dynrun.toml`
//! 2. Environment variables (`DYNRUN_*`)
//! 3. CLI flags (handled by the caller)
//!
//! # Example
//!
//! ```no_run
//! use dynrun_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let library = config.runner.library_path(Path::new("."));
//! ```

pub mod loader;
pub mod properties;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Malformed property on line {line} of {file}")]
    PropertiesParseError { file: PathBuf, line: usize },

    #[error("Missing required field '{field}' in {file}")]
    MissingField { field: String, file: PathBuf },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use loader::{Config, ConfigLoader};
pub use runner::{IntrospectionConfig, LibraryConfig, LoggingConfig, RunnerConfig};
