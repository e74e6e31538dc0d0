//! Dynamic library handle
//!
//! Opens one shared library, records its exported symbol names once at
//! construction, and resolves entry points on demand. The recorded list is
//! what menus show; resolution always goes to the loader.

use crate::caller::NativeFunction;
use crate::error::{Error, IntrospectionError, Result};
use crate::exports::{ExportSource, ExportTool};
use libloading::Library;
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name for a library base name on the current platform
///
/// `library_file_name("fxForward")` is `fxForward.dll` on Windows and
/// `fxForward.so` elsewhere.
pub fn library_file_name(base: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.dll", base)
    } else {
        format!("{}.so", base)
    }
}

/// An opened native library and its discovered exports
#[derive(Debug)]
pub struct LibraryHandle {
    path: PathBuf,
    library: Library,
    symbols: Vec<String>,
}

impl LibraryHandle {
    /// Open `path` and list its exports with the platform's dump tool
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
        Self::open_with(path, &ExportTool::for_current_platform(timeout))
    }

    /// Open `path` and list its exports with `source`
    ///
    /// If listing fails the library is unloaded again before returning.
    pub fn open_with(path: impl AsRef<Path>, source: &dyn ExportSource) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Loading runs the library's initialisers
        let library = unsafe { Library::new(&path) }.map_err(|source| Error::LibraryLoad {
            path: path.clone(),
            source,
        })?;

        let symbols = match source.list_exports(&path) {
            Ok(symbols) => symbols,
            Err(IntrospectionError::UnsupportedPlatform(platform)) => {
                return Err(Error::UnsupportedPlatform(platform));
            }
            Err(source) => {
                return Err(Error::LibraryIntrospection {
                    path: path.clone(),
                    source,
                });
            }
        };

        log::info!(
            "loaded {} ({} exported symbol(s))",
            path.display(),
            symbols.len()
        );

        Ok(Self {
            path,
            library,
            symbols,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exported names in the order the dump tool listed them
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.symbols.iter().any(|s| s == name)
    }

    /// Resolve `name` against the library's real export table
    pub fn function(&self, name: &str) -> Result<NativeFunction<'_>> {
        let symbol = unsafe { self.library.get::<unsafe extern "C" fn()>(name.as_bytes()) }
            .map_err(|e| {
                log::debug!("lookup of {} failed: {}", name, e);
                Error::SymbolNotFound {
                    library: self.path.clone(),
                    symbol: name.to_string(),
                }
            })?;
        let code = *symbol as *const c_void;
        Ok(unsafe { NativeFunction::from_raw(name, code) })
    }

    /// Unload the library now instead of on drop
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.library
            .close()
            .map_err(|source| Error::LibraryLoad { path, source })
    }
}
