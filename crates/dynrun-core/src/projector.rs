//! Struct projection - building `struct MyStruct` in native memory
//!
//! The native side expects:
//!
//! ```c
//! struct MyStruct {
//!     char*  positionNm;
//!     char** bucket;
//!     size_t bucketSize;
//!     char*  bsdt;
//!     int    tenor;
//!     double value;
//! };
//! ```
//!
//! `ProjectedStruct` owns every allocation behind the pointers (the name and
//! date strings, one C string per bucket entry, and the contiguous pointer
//! block) and releases all of them on drop.

use crate::error::MarshalError;
use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::os::raw::{c_char, c_double, c_int};
use std::ptr;

/// Host-side fields of a `MyStruct`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeStructInput {
    pub position_name: String,
    pub bucket: Vec<String>,
    pub business_date: String,
    pub tenor: i32,
    pub value: f64,
}

/// Native memory image of `struct MyStruct`
#[repr(C)]
#[derive(Debug)]
pub struct RawNativeStruct {
    pub position_nm: *const c_char,
    pub bucket: *const *const c_char,
    pub bucket_size: usize,
    pub bsdt: *const c_char,
    pub tenor: c_int,
    pub value: c_double,
}

/// A `RawNativeStruct` together with the memory it points into
#[derive(Debug)]
pub struct ProjectedStruct {
    _position_nm: CString,
    _bsdt: CString,
    _bucket_strings: Vec<CString>,
    bucket_block: Vec<*const c_char>,
    raw: Box<RawNativeStruct>,
}

impl ProjectedStruct {
    /// Lay out `input` in native memory
    ///
    /// Fails only if one of the strings contains an interior NUL byte.
    pub fn new(input: &NativeStructInput) -> Result<Self, MarshalError> {
        let position_nm = c_string("positionNm", &input.position_name)?;
        let bsdt = c_string("bsdt", &input.business_date)?;

        let bucket_strings = input
            .bucket
            .iter()
            .map(|entry| c_string("bucket", entry))
            .collect::<Result<Vec<_>, _>>()?;

        // One pointer-sized slot per entry, no terminator
        let bucket_block: Vec<*const c_char> = bucket_strings.iter().map(|s| s.as_ptr()).collect();

        let bucket = if bucket_block.is_empty() {
            ptr::null()
        } else {
            bucket_block.as_ptr()
        };

        let raw = Box::new(RawNativeStruct {
            position_nm: position_nm.as_ptr(),
            bucket,
            bucket_size: bucket_block.len(),
            bsdt: bsdt.as_ptr(),
            tenor: input.tenor,
            value: input.value,
        });

        Ok(Self {
            _position_nm: position_nm,
            _bsdt: bsdt,
            _bucket_strings: bucket_strings,
            bucket_block,
            raw,
        })
    }

    /// Address to pass as `struct MyStruct*`
    pub fn as_ptr(&self) -> *const RawNativeStruct {
        &*self.raw
    }

    pub fn raw(&self) -> &RawNativeStruct {
        &self.raw
    }

    /// The `char**` block the struct's `bucket` field points at
    pub fn bucket_pointers(&self) -> &[*const c_char] {
        &self.bucket_block
    }
}

fn c_string(param: &str, value: &str) -> Result<CString, MarshalError> {
    CString::new(value).map_err(|e| MarshalError::InvalidString {
        param: param.to_string(),
        reason: format!("contains NUL byte at {}", e.nul_position()),
    })
}
