//! Purpose: Contract coverage for the CSV→JSON output format.
//! Role: Pins the publicly promised shapes: header-as-keys, typing
//!       precedence, quoting, padding, and the error envelope.
//! Invariants: Assertions target stable output bytes or parsed JSON
//!             structure, never internal types.
use csvjson::core::codec::{to_json, to_json_envelope};
use csvjson::core::error::ErrorKind;
use serde_json::{Value, json};

fn convert(input: &[u8]) -> String {
    String::from_utf8(to_json(input).expect("convert")).expect("utf8")
}

fn parse(input: &[u8]) -> Value {
    serde_json::from_slice(&to_json_envelope(input)).expect("valid json")
}

#[test]
fn header_fields_become_object_keys() {
    assert_eq!(convert(b"a,b\n1,2\n3,4"), r#"[{"a":1,"b":2},{"a":3,"b":4}]"#);
}

#[test]
fn quoted_comma_is_content_not_delimiter() {
    let value = parse(b"a,b\n\"x,y\",z");
    assert_eq!(value, json!([{"a": "x,y", "b": "z"}]));
}

#[test]
fn doubled_quote_unescapes() {
    let value = parse(b"a\n\"he said \"\"hi\"\"\"");
    assert_eq!(value, json!([{"a": "he said \"hi\""}]));
}

#[test]
fn typing_precedence_is_the_documented_contract() {
    let value = parse(b"n,b,i,f,z,s\n,true,7,0.5,007,plain");
    assert_eq!(
        value,
        json!([{"n": null, "b": true, "i": 7, "f": 0.5, "z": "007", "s": "plain"}])
    );
}

#[test]
fn large_integers_round_trip_as_exact_text() {
    // Beyond 2^53; a float round-trip would corrupt the digits.
    let out = convert(b"id\n9007199254740993");
    assert_eq!(out, r#"[{"id":9007199254740993}]"#);
}

#[test]
fn quoted_fields_stay_strings() {
    let value = parse(b"a,b,c\n\"7\",\"true\",\"\"");
    assert_eq!(value, json!([{"a": "7", "b": "true", "c": ""}]));
}

#[test]
fn short_rows_pad_with_null() {
    let value = parse(b"a,b,c\n1,2");
    assert_eq!(value, json!([{"a": 1, "b": 2, "c": null}]));
}

#[test]
fn empty_input_converts_to_empty_array() {
    assert_eq!(convert(b""), "[]");
    assert_eq!(convert(b"\n  \n"), "[]");
}

#[test]
fn duplicate_header_keys_last_occurrence_wins() {
    assert_eq!(convert(b"a,b,a\n1,2,3"), r#"[{"b":2,"a":3}]"#);
}

#[test]
fn long_rows_error_with_row_index() {
    let err = to_json(b"a,b\nok,1\n1,2,3").expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::RowWidthMismatch);
    assert_eq!(err.row(), Some(2));
}

#[test]
fn trailing_comma_records_are_tolerated() {
    let value = parse(b"a,b\n1,2,\n3,4,");
    assert_eq!(value, json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]));
}

#[test]
fn unterminated_quote_envelope_carries_offset() {
    let value = parse(b"a,b\n\"oops,1");
    assert_eq!(value["error"]["kind"], "unterminated-quote");
    assert_eq!(value["error"]["offset"], 4);
}

#[test]
fn conversion_is_pure() {
    let input = b"a,b\n\"x,y\",true\n007,1e9".as_ref();
    assert_eq!(to_json(input).expect("first"), to_json(input).expect("second"));
}

#[test]
fn unquoted_documents_round_trip_through_csv_text() {
    let rows = [["1", "x", "true"], ["-2.5", "y", "false"], ["0", "plain text", "z"]];
    let mut csv = String::from("num,name,flag\n");
    for row in &rows {
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    let value = parse(csv.as_bytes());
    assert_eq!(
        value,
        json!([
            {"num": 1, "name": "x", "flag": true},
            {"num": -2.5, "name": "y", "flag": false},
            {"num": 0, "name": "plain text", "flag": "z"},
        ])
    );
}

#[test]
fn crlf_input_matches_lf_input() {
    assert_eq!(
        to_json(b"a,b\r\n1,2\r\n").expect("crlf"),
        to_json(b"a,b\n1,2\n").expect("lf")
    );
}
