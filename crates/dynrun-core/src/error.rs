//! Error taxonomy for library loading and foreign calls
//!
//! Every error is local to the operation that raised it. A failed lookup or a
//! failed call never invalidates an already opened [`crate::LibraryHandle`].

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Top-level error for everything `dynrun-core` does
#[derive(Error, Debug)]
pub enum Error {
    /// The native image could not be opened (missing file, wrong
    /// architecture, unsatisfied dependencies)
    #[error("Failed to load library '{}': {source}", path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The export listing tool could not be run or its output was unusable
    #[error("Failed to list exports of '{}': {source}", path.display())]
    LibraryIntrospection {
        path: PathBuf,
        #[source]
        source: IntrospectionError,
    },

    /// The entry point is absent from the native export table
    #[error("Symbol '{symbol}' not found in library '{}'", library.display())]
    SymbolNotFound { library: PathBuf, symbol: String },

    /// Marshalling or invocation of a native function failed
    #[error("Native call '{function}' failed: {cause}")]
    NativeCall {
        function: String,
        #[source]
        cause: MarshalError,
    },

    /// Export listing has no implementation for this operating system
    #[error("Export listing is not supported on '{0}'")]
    UnsupportedPlatform(String),
}

impl Error {
    /// Wrap a marshalling failure with the name of the function being called
    pub fn native_call(function: impl Into<String>, cause: MarshalError) -> Self {
        Error::NativeCall {
            function: function.into(),
            cause,
        }
    }
}

/// Failures of the subprocess-based export listing
#[derive(Error, Debug)]
pub enum IntrospectionError {
    #[error("could not start '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read output of '{tool}': {source}")]
    Read {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("'{tool}' did not finish within {timeout:?}")]
    Timeout { tool: String, timeout: Duration },

    #[error("no export listing tool for platform '{0}'")]
    UnsupportedPlatform(String),
}

/// Failures converting host values to and from their native representation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarshalError {
    #[error("expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("type mismatch for '{param}': expected {expected}, got {got}")]
    TypeMismatch {
        param: String,
        expected: String,
        got: String,
    },

    #[error("value {value} out of range for {target}")]
    NumberOutOfRange { value: i64, target: String },

    #[error("invalid string for '{param}': {reason}")]
    InvalidString { param: String, reason: String },

    #[error("no output named '{0}'")]
    MissingOutput(String),

    #[error("unexpected output layout: {0}")]
    OutputLayout(String),
}

/// Result type for `dynrun-core` operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_call_carries_function_name() {
        let err = Error::native_call(
            "mathSum",
            MarshalError::ArityMismatch {
                expected: 2,
                got: 1,
            },
        );
        assert_eq!(
            err.to_string(),
            "Native call 'mathSum' failed: expected 2 arguments, got 1"
        );
    }

    #[test]
    fn test_symbol_not_found_display() {
        let err = Error::SymbolNotFound {
            library: PathBuf::from("./lib/MyMath.so"),
            symbol: "Pow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Symbol 'Pow' not found in library './lib/MyMath.so'"
        );
    }

    #[test]
    fn test_introspection_source_is_chained() {
        let err = Error::LibraryIntrospection {
            path: PathBuf::from("a.so"),
            source: IntrospectionError::Timeout {
                tool: "nm".to_string(),
                timeout: Duration::from_secs(1),
            },
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "'nm' did not finish within 1s");
    }
}
