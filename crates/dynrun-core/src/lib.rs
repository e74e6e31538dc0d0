//! dynrun core - dynamic native library discovery and invocation
//!
//! This library provides:
//! - Export symbol enumeration through the platform's dump tool
//! - A library handle with lookup of native entry points
//! - Argument marshalling and libffi-based invocation
//! - Projection of `struct MyStruct` into native memory
//! - The catalog of supported pricing and demo call shapes
//!
//! # Safety
//!
//! Native code runs in this process. A descriptor that does not match the
//! real signature, or an output buffer smaller than the callee writes, is
//! undefined behaviour and cannot be detected here.

/// dynrun core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod caller;
pub mod calls;
pub mod error;
pub mod exports;
pub mod library;
pub mod marshal;
pub mod output;
pub mod projector;
pub mod types;

// Re-export commonly used types
pub use caller::NativeFunction;
pub use calls::{
    CallShape, FixedRateBondInput, FixedRateBondResult, FxForwardInput, FxForwardResult, FxLeg,
    HiFiveSwapInput, HiFiveSwapResult, MathOp, PrintTypeInput, StockPricingInput,
    StockPricingResult,
};
pub use error::{Error, IntrospectionError, MarshalError, Result};
pub use exports::{ExportSource, ExportTool, Platform, DEFAULT_TOOL_TIMEOUT};
pub use library::{library_file_name, LibraryHandle};
pub use marshal::MarshalContext;
pub use output::SensitivityCurve;
pub use projector::{NativeStructInput, ProjectedStruct};
pub use types::{
    ArgValue, CallDescriptor, CallOutcome, Param, PassingMode, ReturnKind, ReturnValue,
    ScalarType, SlotOutput,
};
