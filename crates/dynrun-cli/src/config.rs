//! Runner configuration as seen by the CLI
//!
//! Config file and `DYNRUN_*` variables come from `dynrun-config`; flags given
//! on the command line override both.

use dynrun_config::{ConfigError, ConfigLoader, ConfigResult, RunnerConfig};
use std::path::{Path, PathBuf};

/// Values given as global flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub lib_dir: Option<PathBuf>,
    pub lib_name: Option<String>,
    pub timeout: Option<u64>,
}

/// Load, override and validate the configuration
///
/// Without a config file, `--lib-name` alone is enough to run.
pub fn resolve(overrides: &Overrides, cwd: &Path) -> ConfigResult<RunnerConfig> {
    let mut loader = ConfigLoader::new();

    let mut config = match &overrides.config {
        Some(path) => loader.load_from_file(path)?.runner,
        None => match loader.load_from_directory(cwd) {
            Ok(found) => {
                log::debug!("using configuration {}", found.source.display());
                found.runner
            }
            Err(ConfigError::NotFound(_)) if overrides.lib_name.is_some() => {
                loader.apply_env_overrides(RunnerConfig::for_library(String::new()))?
            }
            Err(e) => return Err(e),
        },
    };

    apply_overrides(&mut config, overrides);
    config.validate()?;
    Ok(config)
}

pub fn apply_overrides(config: &mut RunnerConfig, overrides: &Overrides) {
    if let Some(dir) = &overrides.lib_dir {
        config.library.dir = Some(dir.clone());
    }
    if let Some(name) = &overrides.lib_name {
        config.library.name = name.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.introspection.timeout_secs = timeout;
    }
}

/// REPL history file (~/.dynrun/history)
pub fn history_path() -> Option<PathBuf> {
    ConfigLoader::global_config_dir().map(|dir| dir.join("history"))
}
