//! The loaded library and the configuration it came from

use dynrun_config::RunnerConfig;
use dynrun_core::LibraryHandle;
use std::path::Path;

/// Everything a command needs; built once, borrowed by every dispatch
pub struct Session {
    config: RunnerConfig,
    library: LibraryHandle,
}

impl Session {
    /// Open the configured library relative to `cwd`
    pub fn open(config: RunnerConfig, cwd: &Path) -> dynrun_core::Result<Self> {
        let path = config.library_path(cwd);
        log::info!("Loading native library: {}", path.display());
        let library = LibraryHandle::open(&path, config.tool_timeout())?;
        log::info!(
            "Loaded {} ({} exported functions)",
            path.display(),
            library.symbols().len()
        );
        Ok(Self::new(config, library))
    }

    pub fn new(config: RunnerConfig, library: LibraryHandle) -> Self {
        Self { config, library }
    }

    pub fn library(&self) -> &LibraryHandle {
        &self.library
    }

    /// Configured base name, without extension
    pub fn library_name(&self) -> &str {
        &self.config.library.name
    }

    /// Release the native library
    pub fn close(self) -> dynrun_core::Result<()> {
        self.library.close()
    }
}
