//! Purpose: Compact JSON serializer for parsed tables.
//! Exports: `emit`.
//! Role: Hot-path byte emitter; owns all JSON string escaping rules.
//! Invariants: Output is a compact array of objects, keys in header
//!             column order, values in row order.
//! Invariants: Control bytes are always escaped, so output never
//!             contains a raw NUL and ABI null-termination stays safe.
//! Invariants: Number fields are copied through as their exact decimal
//!             text; no float conversion anywhere.
use std::collections::TryReserveError;

use crate::core::error::{Error, ErrorKind};
use crate::core::table::Table;
use crate::core::value::{ValueKind, classify};

/// Serialize the table. `input_len` sizes the initial reservation; the
/// reservation is the one allocation large enough to be worth failing
/// gracefully instead of aborting.
pub fn emit(table: &Table<'_>, input_len: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    out.try_reserve(input_len + input_len / 4 + 256)
        .map_err(alloc_error)?;

    out.push(b'[');
    for (row_index, row) in table.rows().iter().enumerate() {
        if row_index > 0 {
            out.push(b',');
        }
        out.push(b'{');
        let mut first = true;
        for (column, key) in table.header().iter().enumerate() {
            if !table.keeps_column(column) {
                continue;
            }
            if !first {
                out.push(b',');
            }
            first = false;
            push_string(&mut out, &key.text);
            out.push(b':');
            match row.fields.get(column) {
                Some(field) => match classify(&field.text, field.quoted) {
                    ValueKind::Null => out.extend_from_slice(b"null"),
                    ValueKind::Bool | ValueKind::Number => {
                        out.extend_from_slice(&field.text)
                    }
                    ValueKind::String => push_string(&mut out, &field.text),
                },
                // Short row: missing trailing columns pad with null.
                None => out.extend_from_slice(b"null"),
            }
        }
        out.push(b'}');
    }
    out.push(b']');
    Ok(out)
}

/// JSON string escaping: `"` and `\` get backslash escapes, control
/// bytes below 0x20 use the short forms where JSON has them and `\u00XX`
/// otherwise. Non-ASCII bytes pass through untouched.
fn push_string(out: &mut Vec<u8>, text: &[u8]) {
    out.push(b'"');
    for &byte in text {
        match byte {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0c => out.extend_from_slice(b"\\f"),
            byte if byte < 0x20 => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                out.extend_from_slice(b"\\u00");
                out.push(HEX[(byte >> 4) as usize]);
                out.push(HEX[(byte & 0x0f) as usize]);
            }
            byte => out.push(byte),
        }
    }
    out.push(b'"');
}

fn alloc_error(err: TryReserveError) -> Error {
    Error::new(ErrorKind::Allocation)
        .with_message("failed to reserve output buffer")
        .with_source(err)
}
