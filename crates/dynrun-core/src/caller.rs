//! Foreign invocation through libffi
//!
//! Signatures are only known at run time (from a `CallDescriptor`), and some
//! entry points take dozens of arguments, so calls go through a libffi call
//! interface instead of casting to a concrete `extern "C" fn` type.

use crate::error::{Error, MarshalError, Result};
use crate::marshal::{Lowered, MarshalContext};
use crate::types::{ArgValue, CallDescriptor, CallOutcome, ReturnKind, ReturnValue};
use libffi::middle::{arg, Arg, Cif, CodePtr, Type};
use std::ffi::c_void;
use std::marker::PhantomData;
use std::os::raw::{c_int, c_long};

/// Integral returns are widened by libffi to `ffi_arg`, which is pointer-sized
/// on every supported target
type FfiArg = usize;

/// A resolved native entry point
///
/// The lifetime ties the entry point to the library it was resolved from.
#[derive(Debug, Clone)]
pub struct NativeFunction<'lib> {
    name: String,
    code: *const c_void,
    _library: PhantomData<&'lib ()>,
}

impl<'lib> NativeFunction<'lib> {
    /// Wrap a raw code address
    ///
    /// # Safety
    ///
    /// `code` must point to a function using the platform C calling convention
    /// that stays loaded for `'lib`.
    pub unsafe fn from_raw(name: impl Into<String>, code: *const c_void) -> Self {
        Self {
            name: name.into(),
            code,
            _library: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> *const c_void {
        self.code
    }

    /// Call the entry point with `args` laid out per `descriptor`
    ///
    /// Argument memory lives in a `MarshalContext` that is dropped before this
    /// returns, after the output slots have been copied out.
    ///
    /// # Safety
    ///
    /// `descriptor` must match the native signature, and every output buffer
    /// must be at least as large as the callee writes. Neither can be checked.
    pub unsafe fn invoke(
        &self,
        descriptor: &CallDescriptor,
        args: Vec<ArgValue>,
    ) -> Result<CallOutcome> {
        if args.len() != descriptor.params.len() {
            return Err(Error::native_call(
                &descriptor.function,
                MarshalError::ArityMismatch {
                    expected: descriptor.params.len(),
                    got: args.len(),
                },
            ));
        }

        let mut ctx = MarshalContext::new();
        let lowered = descriptor
            .params
            .iter()
            .zip(args)
            .map(|(param, value)| ctx.lower(param, value))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|cause| Error::native_call(&descriptor.function, cause))?;

        log::debug!(
            "calling {} with {} argument(s)",
            descriptor.function,
            lowered.len()
        );

        let cif = Cif::new(lowered.iter().map(ffi_type), return_type(descriptor.returns));
        let ffi_args: Vec<Arg<'_>> = lowered.iter().map(ffi_arg).collect();
        let code = CodePtr::from_ptr(self.code);

        let returned = match descriptor.returns {
            ReturnKind::Void => {
                cif.call::<()>(code, &ffi_args);
                ReturnValue::Void
            }
            ReturnKind::Int => ReturnValue::Int(cif.call::<FfiArg>(code, &ffi_args) as c_int),
            ReturnKind::Long => ReturnValue::Long(cif.call::<i64>(code, &ffi_args)),
            ReturnKind::CLong => {
                ReturnValue::Long(i64::from(cif.call::<FfiArg>(code, &ffi_args) as c_long))
            }
            ReturnKind::Double => ReturnValue::Double(cif.call::<f64>(code, &ffi_args)),
        };

        Ok(CallOutcome {
            function: descriptor.function.clone(),
            returned,
            outputs: ctx.read_outputs(),
        })
    }
}

fn ffi_type(value: &Lowered) -> Type {
    match value {
        Lowered::Int(_) => Type::c_int(),
        Lowered::Long(_) => Type::i64(),
        Lowered::CLong(_) => Type::c_long(),
        Lowered::Double(_) => Type::f64(),
        Lowered::Size(_) => Type::usize(),
        Lowered::Pointer(_) => Type::pointer(),
    }
}

fn ffi_arg(value: &Lowered) -> Arg<'_> {
    match value {
        Lowered::Int(v) => arg(v),
        Lowered::Long(v) => arg(v),
        Lowered::CLong(v) => arg(v),
        Lowered::Double(v) => arg(v),
        Lowered::Size(v) => arg(v),
        Lowered::Pointer(v) => arg(v),
    }
}

fn return_type(kind: ReturnKind) -> Type {
    match kind {
        ReturnKind::Void => Type::void(),
        ReturnKind::Int => Type::c_int(),
        ReturnKind::Long => Type::i64(),
        ReturnKind::CLong => Type::c_long(),
        ReturnKind::Double => Type::f64(),
    }
}
