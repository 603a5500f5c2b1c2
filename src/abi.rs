//! Purpose: C ABI surface for foreign-language shims (libcsvjson).
//! Exports: `csv_to_json`, `free_json`.
//! Role: Stable two-function boundary; symbol names match the original
//!       shared library so existing loaders keep resolving them.
//! Invariants: Input is length-delimited; embedded NULs are content.
//! Invariants: Output is null-terminated and owned by this library until
//!             `free_json`; allocation and release use the same allocator.
//! Invariants: `csv_to_json` reports failure via the JSON error envelope,
//!             never via a null return.
//! Invariants: `free_json` is called exactly once per conversion; a
//!             second call on the same pointer is a double free.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ffi::CString;
use std::ptr;

use libc::c_char;

use crate::core::codec;
use crate::core::error::{Error, ErrorKind};

/// Convert `len` bytes of CSV at `csv` into a newly allocated,
/// null-terminated JSON buffer. When `csv` is non-null it must point to
/// `len` readable bytes; a null `csv` with nonzero `len` yields a
/// `usage` error envelope rather than a crash.
#[unsafe(no_mangle)]
pub extern "C" fn csv_to_json(csv: *const u8, len: usize) -> *mut c_char {
    let input: &[u8] = if csv.is_null() {
        if len != 0 {
            let err = Error::new(ErrorKind::Usage).with_message("csv buffer is null");
            return into_raw_buffer(codec::error_envelope(&err));
        }
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(csv, len) }
    };
    into_raw_buffer(codec::to_json_envelope(input))
}

/// Release a buffer returned by `csv_to_json`. Null is a no-op; `json`
/// must not have been freed before.
#[unsafe(no_mangle)]
pub extern "C" fn free_json(json: *mut c_char) {
    if json.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(json));
    }
}

/// Hand ownership of the buffer across the boundary as a C string. Both
/// the codec and the envelope escape control bytes, so the bytes carry
/// no interior NUL and `CString::new` cannot fail in practice; the
/// fallback keeps the no-null-return contract on that path anyway.
fn into_raw_buffer(bytes: Vec<u8>) -> *mut c_char {
    match CString::new(bytes) {
        Ok(buffer) => buffer.into_raw(),
        Err(_) => {
            let err =
                Error::new(ErrorKind::Internal).with_message("output contained an interior NUL");
            CString::new(codec::error_envelope(&err))
                .map(CString::into_raw)
                .unwrap_or(ptr::null_mut())
        }
    }
}
