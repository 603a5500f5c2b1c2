//! Purpose: Tie scanner, table policy, and emitter into the two codec calls.
//! Exports: `to_json`, `to_json_envelope`, `error_envelope`.
//! Invariants: `to_json_envelope` never fails; parse errors come back as
//!             the reserved `{"error":{...}}` object, and success output
//!             is always a JSON array, so the two are unambiguous.
//! Invariants: Conversion is pure: identical input bytes yield
//!             byte-identical output.
use serde::Serialize;
use tracing::debug;

use crate::core::emit;
use crate::core::error::Error;
use crate::core::scan;
use crate::core::table::Table;

/// Convert a CSV buffer to compact JSON. Empty (or all-whitespace)
/// input is an empty document and converts to `[]`.
pub fn to_json(input: &[u8]) -> Result<Vec<u8>, Error> {
    let records = scan::scan(input)?;
    if records.is_empty() {
        debug!(input_len = input.len(), "empty document");
        return Ok(b"[]".to_vec());
    }
    let table = Table::from_records(records)?;
    debug!(
        columns = table.width(),
        rows = table.row_count(),
        input_len = input.len(),
        "scanned csv document"
    );
    emit::emit(&table, input.len())
}

/// Convert, reporting failure in-band. This is the form the ABI exposes:
/// the two-entry-point boundary has no structured error channel, so
/// errors travel as a reserved JSON envelope.
pub fn to_json_envelope(input: &[u8]) -> Vec<u8> {
    match to_json(input) {
        Ok(json) => json,
        Err(err) => {
            debug!(error = %err, "conversion failed; returning error envelope");
            error_envelope(&err)
        }
    }
}

#[derive(Serialize)]
struct EnvelopeBody<'a> {
    kind: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    row: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    near: Option<&'a str>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    error: EnvelopeBody<'a>,
}

const FALLBACK_ENVELOPE: &[u8] =
    br#"{"error":{"kind":"internal","message":"error envelope serialization failed"}}"#;

/// Render an error as the reserved envelope. serde_json escapes control
/// bytes, so the envelope (like normal output) never contains a raw NUL.
pub fn error_envelope(err: &Error) -> Vec<u8> {
    let envelope = Envelope {
        error: EnvelopeBody {
            kind: err.kind().label(),
            message: err.message().unwrap_or(err.kind().label()),
            offset: err.offset(),
            row: err.row(),
            near: err.snippet(),
        },
    };
    serde_json::to_vec(&envelope).unwrap_or_else(|_| FALLBACK_ENVELOPE.to_vec())
}
