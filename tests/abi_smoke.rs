//! Purpose: In-process exercise of the two C entry points.
//! Role: Verify the boundary contract a foreign shim relies on: non-null
//!       returns, null termination, envelope errors, and reentrancy.
//! Invariants: Every conversion in these tests releases its buffer
//!             exactly once through `free_json`.
use std::ffi::CStr;
use std::thread;

use csvjson::abi::{csv_to_json, free_json};
use serde_json::Value;

fn convert(input: &[u8]) -> String {
    let ptr = csv_to_json(input.as_ptr(), input.len());
    assert!(!ptr.is_null());
    let text = unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .expect("utf8")
        .to_string();
    free_json(ptr);
    text
}

#[test]
fn convert_and_free_round_trip() {
    assert_eq!(convert(b"a,b\n1,2"), r#"[{"a":1,"b":2}]"#);
}

#[test]
fn null_input_with_zero_length_is_empty_document() {
    let ptr = csv_to_json(std::ptr::null(), 0);
    assert!(!ptr.is_null());
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().expect("utf8");
    assert_eq!(text, "[]");
    free_json(ptr);
}

#[test]
fn null_input_with_length_yields_usage_envelope() {
    let ptr = csv_to_json(std::ptr::null(), 12);
    assert!(!ptr.is_null());
    let value: Value =
        serde_json::from_str(unsafe { CStr::from_ptr(ptr) }.to_str().expect("utf8"))
            .expect("valid json");
    assert_eq!(value["error"]["kind"], "usage");
    free_json(ptr);
}

#[test]
fn malformed_csv_yields_envelope_not_crash() {
    let text = convert(b"a\n\"unclosed");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["error"]["kind"], "unterminated-quote");
    assert_eq!(value["error"]["offset"], 2);
}

#[test]
fn embedded_nul_in_input_is_tolerated() {
    // Length is authoritative; the NUL byte is field content and comes
    // back escaped, so the output C string holds the full document.
    let text = convert(b"a\nx\0y");
    assert_eq!(text, r#"[{"a":"x\u0000y"}]"#);
}

#[test]
fn free_json_ignores_null() {
    free_json(std::ptr::null_mut());
}

#[test]
fn parallel_conversions_do_not_cross_contaminate() {
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            thread::spawn(move || {
                for round in 0..50 {
                    let input = format!("id,worker\n{round},{worker}");
                    let expected = format!(r#"[{{"id":{round},"worker":{worker}}}]"#);
                    assert_eq!(convert(input.as_bytes()), expected);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker");
    }
}
