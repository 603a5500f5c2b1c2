//! Purpose: Value-typing pass mapping raw field text to a JSON primitive.
//! Exports: `ValueKind`, `classify`.
//! Invariants: Precedence is fixed: Null, Bool, Number, String; first match wins.
//! Invariants: Quoted fields are always strings, so `"7"` round-trips as text.
//! Invariants: Number texts accepted here are valid JSON numbers verbatim.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
}

/// Decide the JSON type for one field. The accepted number grammar is
/// JSON's own (optional `-`, no leading zeros beyond `0`, optional
/// fraction, optional exponent), which is what lets the emitter copy the
/// decimal text through without a float round-trip.
pub fn classify(text: &[u8], quoted: bool) -> ValueKind {
    if quoted {
        return ValueKind::String;
    }
    if text.is_empty() {
        return ValueKind::Null;
    }
    if text == b"true" || text == b"false" {
        return ValueKind::Bool;
    }
    if is_json_number(text) {
        return ValueKind::Number;
    }
    ValueKind::String
}

fn is_json_number(text: &[u8]) -> bool {
    let mut pos = 0;

    if text.first() == Some(&b'-') {
        pos += 1;
    }

    let int_start = pos;
    while pos < text.len() && text[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_len = pos - int_start;
    if int_len == 0 {
        return false;
    }
    if int_len > 1 && text[int_start] == b'0' {
        return false;
    }

    if text.get(pos) == Some(&b'.') {
        pos += 1;
        let frac_start = pos;
        while pos < text.len() && text[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == frac_start {
            return false;
        }
    }

    if matches!(text.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(text.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while pos < text.len() && text[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == text.len()
}
