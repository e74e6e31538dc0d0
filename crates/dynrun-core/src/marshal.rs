//! Argument marshalling - host values to native argument slots
//!
//! `MarshalContext` is an arena scoped to a single native call. Every piece
//! of native-addressable memory created while lowering arguments lives here:
//! - C strings and `char**` pointer tables
//! - numeric arrays passed by reference (inputs and outputs)
//! - projected structs
//!
//! Dropping the context releases all of it, whichever way the call ends.
//! Output slots are remembered so their post-call contents can be read back.

use crate::error::MarshalError;
use crate::projector::ProjectedStruct;
use crate::types::{ArgValue, Param, PassingMode, ScalarType, SlotOutput};
use std::ffi::{c_void, CString};
use std::os::raw::{c_char, c_int, c_long};
use std::ptr;

/// The value placed in one argument slot of a native call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lowered {
    Int(c_int),
    Long(i64),
    CLong(c_long),
    Double(f64),
    Size(usize),
    Pointer(*const c_void),
}

/// Caller-owned storage handed to the callee by reference
#[derive(Debug)]
enum Buffer {
    Int(Vec<c_int>),
    Long(Vec<i64>),
    CLong(Vec<c_long>),
    Double(Vec<f64>),
    Size(Vec<usize>),
}

impl Buffer {
    fn as_mut_ptr(&mut self) -> *const c_void {
        match self {
            Buffer::Int(v) => v.as_mut_ptr() as *const c_void,
            Buffer::Long(v) => v.as_mut_ptr() as *const c_void,
            Buffer::CLong(v) => v.as_mut_ptr() as *const c_void,
            Buffer::Double(v) => v.as_mut_ptr() as *const c_void,
            Buffer::Size(v) => v.as_mut_ptr() as *const c_void,
        }
    }

    fn to_array_value(&self) -> ArgValue {
        match self {
            Buffer::Int(v) => ArgValue::IntArray(v.clone()),
            Buffer::Long(v) => ArgValue::LongArray(v.clone()),
            Buffer::CLong(v) => ArgValue::LongArray(v.iter().map(|&x| i64::from(x)).collect()),
            Buffer::Double(v) => ArgValue::DoubleArray(v.clone()),
            Buffer::Size(v) => ArgValue::Size(v.first().copied().unwrap_or_default()),
        }
    }

    fn to_scalar_value(&self) -> Option<ArgValue> {
        match self {
            Buffer::Int(v) => v.first().map(|&x| ArgValue::Int(x)),
            Buffer::Long(v) => v.first().map(|&x| ArgValue::Long(x)),
            Buffer::CLong(v) => v.first().map(|&x| ArgValue::Long(i64::from(x))),
            Buffer::Double(v) => v.first().map(|&x| ArgValue::Double(x)),
            Buffer::Size(v) => v.first().map(|&x| ArgValue::Size(x)),
        }
    }
}

#[derive(Debug)]
struct Readback {
    name: String,
    buffer: usize,
    scalar: bool,
}

/// Arena for one native call
#[derive(Debug, Default)]
pub struct MarshalContext {
    strings: Vec<CString>,
    string_tables: Vec<Vec<*const c_char>>,
    buffers: Vec<Buffer>,
    structs: Vec<ProjectedStruct>,
    readbacks: Vec<Readback>,
}

impl MarshalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower `value` into the slot described by `param`
    ///
    /// Any memory the slot points at is owned by this context.
    pub fn lower(&mut self, param: &Param, value: ArgValue) -> Result<Lowered, MarshalError> {
        let name = param.name.as_str();
        match (param.mode, value) {
            (PassingMode::Value(ScalarType::Int), ArgValue::Int(v)) => Ok(Lowered::Int(v)),
            (PassingMode::Value(ScalarType::Long), ArgValue::Long(v)) => Ok(Lowered::Long(v)),
            (PassingMode::Value(ScalarType::CLong), ArgValue::Long(v)) => {
                Ok(Lowered::CLong(to_c_long(v)?))
            }
            (PassingMode::Value(ScalarType::Double), ArgValue::Double(v)) => {
                Ok(Lowered::Double(v))
            }
            (PassingMode::Value(ScalarType::Size), ArgValue::Size(v)) => Ok(Lowered::Size(v)),

            (PassingMode::Array(ty), value) => {
                let buffer = array_buffer(name, ty, value)?;
                Ok(Lowered::Pointer(self.push_buffer(buffer)))
            }

            (PassingMode::OutArray(ty), value) => {
                let buffer = array_buffer(name, ty, value)?;
                let ptr = self.push_buffer(buffer);
                self.remember_output(name, false);
                Ok(Lowered::Pointer(ptr))
            }

            (PassingMode::OutScalar(ty), value) => {
                let buffer = scalar_buffer(name, ty, value)?;
                let ptr = self.push_buffer(buffer);
                self.remember_output(name, true);
                Ok(Lowered::Pointer(ptr))
            }

            (PassingMode::Str, ArgValue::Str(s)) => {
                let c_string = new_c_string(name, &s)?;
                let ptr = c_string.as_ptr() as *const c_void;
                self.strings.push(c_string);
                Ok(Lowered::Pointer(ptr))
            }

            (PassingMode::StrArray, ArgValue::StrArray(items)) => {
                let mut table = Vec::with_capacity(items.len() + 1);
                for item in &items {
                    let c_string = new_c_string(name, item)?;
                    table.push(c_string.as_ptr());
                    self.strings.push(c_string);
                }
                // NULL-terminated, like a C argv
                table.push(ptr::null());
                let ptr = table.as_ptr() as *const c_void;
                self.string_tables.push(table);
                Ok(Lowered::Pointer(ptr))
            }

            (PassingMode::Struct, ArgValue::Struct(input)) => {
                let projected = ProjectedStruct::new(&input)?;
                let ptr = projected.as_ptr() as *const c_void;
                self.structs.push(projected);
                Ok(Lowered::Pointer(ptr))
            }

            (mode, value) => Err(mismatch(name, &mode.to_string(), &value)),
        }
    }

    /// Current contents of every output slot, in the order they were lowered
    pub fn read_outputs(&self) -> Vec<SlotOutput> {
        self.readbacks
            .iter()
            .filter_map(|rb| {
                let buffer = &self.buffers[rb.buffer];
                let value = if rb.scalar {
                    buffer.to_scalar_value()?
                } else {
                    buffer.to_array_value()
                };
                Some(SlotOutput {
                    name: rb.name.clone(),
                    value,
                })
            })
            .collect()
    }

    fn push_buffer(&mut self, buffer: Buffer) -> *const c_void {
        self.buffers.push(buffer);
        let last = self.buffers.len() - 1;
        self.buffers[last].as_mut_ptr()
    }

    fn remember_output(&mut self, name: &str, scalar: bool) {
        self.readbacks.push(Readback {
            name: name.to_string(),
            buffer: self.buffers.len() - 1,
            scalar,
        });
    }
}

fn array_buffer(param: &str, ty: ScalarType, value: ArgValue) -> Result<Buffer, MarshalError> {
    match (ty, value) {
        (ScalarType::Int, ArgValue::IntArray(v)) => Ok(Buffer::Int(v)),
        (ScalarType::Long, ArgValue::LongArray(v)) => Ok(Buffer::Long(v)),
        (ScalarType::CLong, ArgValue::LongArray(v)) => {
            let converted = v
                .into_iter()
                .map(to_c_long)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Buffer::CLong(converted))
        }
        (ScalarType::Double, ArgValue::DoubleArray(v)) => Ok(Buffer::Double(v)),
        (ty, value) => Err(mismatch(param, &format!("{}[]", ty.display_name()), &value)),
    }
}

fn scalar_buffer(param: &str, ty: ScalarType, value: ArgValue) -> Result<Buffer, MarshalError> {
    match (ty, value) {
        (ScalarType::Int, ArgValue::Int(v)) => Ok(Buffer::Int(vec![v])),
        (ScalarType::Long, ArgValue::Long(v)) => Ok(Buffer::Long(vec![v])),
        (ScalarType::CLong, ArgValue::Long(v)) => Ok(Buffer::CLong(vec![to_c_long(v)?])),
        (ScalarType::Double, ArgValue::Double(v)) => Ok(Buffer::Double(vec![v])),
        (ScalarType::Size, ArgValue::Size(v)) => Ok(Buffer::Size(vec![v])),
        (ty, value) => Err(mismatch(param, &format!("{}*", ty.display_name()), &value)),
    }
}

#[allow(clippy::useless_conversion)]
fn to_c_long(value: i64) -> Result<c_long, MarshalError> {
    c_long::try_from(value).map_err(|_| MarshalError::NumberOutOfRange {
        value,
        target: "c_long".to_string(),
    })
}

fn new_c_string(param: &str, value: &str) -> Result<CString, MarshalError> {
    CString::new(value).map_err(|e| MarshalError::InvalidString {
        param: param.to_string(),
        reason: format!("contains NUL byte at {}", e.nul_position()),
    })
}

fn mismatch(param: &str, expected: &str, got: &ArgValue) -> MarshalError {
    MarshalError::TypeMismatch {
        param: param.to_string(),
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}
