//! Call descriptors - the host-side description of a native signature
//!
//! Native libraries carry no type information, so every supported entry point
//! is described explicitly:
//! - `ScalarType`: C scalar types that appear in signatures
//! - `PassingMode`: how one argument crosses the boundary
//! - `CallDescriptor`: function name + ordered parameters + return kind
//! - `ArgValue`: host values supplied for each parameter
//!
//! Adding a new entry point is a matter of building another descriptor.

use crate::projector::NativeStructInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// C scalar types used by the supported signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// C `int`
    Int,
    /// 64-bit integer (`long long` / `int64_t`)
    Long,
    /// C `long` (32-bit on Windows, 64-bit on 64-bit Linux)
    CLong,
    /// C `double`
    Double,
    /// C `size_t`
    Size,
}

impl ScalarType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ScalarType::Int => "c_int",
            ScalarType::Long => "int64",
            ScalarType::CLong => "c_long",
            ScalarType::Double => "c_double",
            ScalarType::Size => "size_t",
        }
    }
}

/// How an argument is handed to the callee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassingMode {
    /// Scalar passed by value
    Value(ScalarType),
    /// Read-only contiguous array, passed as a pointer to its first element
    Array(ScalarType),
    /// Caller-sized array the callee writes into; read back after the call
    OutArray(ScalarType),
    /// Pointer to a single caller-owned scalar; read back after the call
    OutScalar(ScalarType),
    /// NUL-terminated string (`const char*`)
    Str,
    /// Array of NUL-terminated strings (`const char**`)
    StrArray,
    /// Aggregate passed by reference (`struct MyStruct*`)
    Struct,
}

impl PassingMode {
    /// Whether the slot's contents are copied back into the call outcome
    pub fn is_output(&self) -> bool {
        matches!(self, PassingMode::OutArray(_) | PassingMode::OutScalar(_))
    }
}

impl fmt::Display for PassingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassingMode::Value(t) => write!(f, "{}", t.display_name()),
            PassingMode::Array(t) => write!(f, "const {}*", t.display_name()),
            PassingMode::OutArray(t) => write!(f, "{}[] (out)", t.display_name()),
            PassingMode::OutScalar(t) => write!(f, "{}* (out)", t.display_name()),
            PassingMode::Str => write!(f, "const char*"),
            PassingMode::StrArray => write!(f, "const char**"),
            PassingMode::Struct => write!(f, "struct*"),
        }
    }
}

/// Native return type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnKind {
    Void,
    Int,
    Long,
    CLong,
    Double,
}

/// Value returned by a native call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReturnValue {
    Void,
    Int(i32),
    Long(i64),
    Double(f64),
}

impl ReturnValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ReturnValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ReturnValue::Int(v) => Some(i64::from(*v)),
            ReturnValue::Long(v) => Some(*v),
            _ => None,
        }
    }
}

/// One named parameter of a native signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub mode: PassingMode,
}

/// Everything the marshaller knows about one native entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDescriptor {
    pub function: String,
    pub params: Vec<Param>,
    pub returns: ReturnKind,
}

impl CallDescriptor {
    /// Start a descriptor for `function` returning `void`
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            params: Vec::new(),
            returns: ReturnKind::Void,
        }
    }

    pub fn param(mut self, name: impl Into<String>, mode: PassingMode) -> Self {
        self.params.push(Param {
            name: name.into(),
            mode,
        });
        self
    }

    pub fn value(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.param(name, PassingMode::Value(ty))
    }

    pub fn array(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.param(name, PassingMode::Array(ty))
    }

    pub fn out_array(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.param(name, PassingMode::OutArray(ty))
    }

    pub fn out_scalar(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.param(name, PassingMode::OutScalar(ty))
    }

    pub fn string(self, name: impl Into<String>) -> Self {
        self.param(name, PassingMode::Str)
    }

    pub fn string_array(self, name: impl Into<String>) -> Self {
        self.param(name, PassingMode::StrArray)
    }

    pub fn structure(self, name: impl Into<String>) -> Self {
        self.param(name, PassingMode::Struct)
    }

    pub fn returns(mut self, kind: ReturnKind) -> Self {
        self.returns = kind;
        self
    }

    /// Human readable signature, e.g. `c_double Sum(c_double a, c_double b)`
    pub fn signature(&self) -> String {
        let ret = match self.returns {
            ReturnKind::Void => "void",
            ReturnKind::Int => "c_int",
            ReturnKind::Long => "int64",
            ReturnKind::CLong => "c_long",
            ReturnKind::Double => "c_double",
        };
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.mode, p.name))
            .collect();
        format!("{} {}({})", ret, self.function, params.join(", "))
    }
}

/// Host value supplied for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Int(i32),
    Long(i64),
    Double(f64),
    Size(usize),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    Str(String),
    StrArray(Vec<String>),
    Struct(NativeStructInput),
}

impl ArgValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Int(_) => "int",
            ArgValue::Long(_) => "long",
            ArgValue::Double(_) => "double",
            ArgValue::Size(_) => "size",
            ArgValue::IntArray(_) => "int[]",
            ArgValue::LongArray(_) => "long[]",
            ArgValue::DoubleArray(_) => "double[]",
            ArgValue::Str(_) => "string",
            ArgValue::StrArray(_) => "string[]",
            ArgValue::Struct(_) => "struct",
        }
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Long(v)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Double(v)
    }
}

impl From<usize> for ArgValue {
    fn from(v: usize) -> Self {
        ArgValue::Size(v)
    }
}

impl From<Vec<i32>> for ArgValue {
    fn from(v: Vec<i32>) -> Self {
        ArgValue::IntArray(v)
    }
}

impl From<Vec<i64>> for ArgValue {
    fn from(v: Vec<i64>) -> Self {
        ArgValue::LongArray(v)
    }
}

impl From<Vec<f64>> for ArgValue {
    fn from(v: Vec<f64>) -> Self {
        ArgValue::DoubleArray(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(v: Vec<String>) -> Self {
        ArgValue::StrArray(v)
    }
}

impl From<NativeStructInput> for ArgValue {
    fn from(v: NativeStructInput) -> Self {
        ArgValue::Struct(v)
    }
}

/// Post-call contents of one output slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOutput {
    pub name: String,
    pub value: ArgValue,
}

/// Structured result of one native call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallOutcome {
    pub function: String,
    pub returned: ReturnValue,
    /// Output slots in parameter order
    pub outputs: Vec<SlotOutput>,
}

impl CallOutcome {
    pub fn output(&self, name: &str) -> Option<&ArgValue> {
        self.outputs
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| &slot.value)
    }
}
