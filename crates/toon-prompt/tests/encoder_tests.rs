//! Encoder contract tests for the TOON block format.

use serde_json::json;
use toon_prompt::{encode, EncodeOptions};

fn encode_default(value: &serde_json::Value) -> String {
    encode(value, &EncodeOptions::default())
}

// ============================================================================
// Scalar lines
// ============================================================================

#[test]
fn encode_flat_object() {
    let toon = encode_default(&json!({"name": "Alice", "age": 30, "active": true}));
    assert_eq!(toon, "name: Alice\n\nage: 30\n\nactive: true");
}

#[test]
fn encode_null_value_is_empty() {
    let toon = encode_default(&json!({"score": null}));
    assert_eq!(toon, "score: ");
}

#[test]
fn encode_empty_object() {
    let toon = encode_default(&json!({}));
    assert_eq!(toon, "");
}

#[test]
fn encode_root_primitive_uses_implicit_key() {
    let toon = encode_default(&json!(42));
    assert_eq!(toon, "data: 42");
}

#[test]
fn encode_preserves_key_order() {
    let toon = encode_default(&json!({"z": 1, "a": 2, "m": 3}));
    assert_eq!(toon, "z: 1\n\na: 2\n\nm: 3");
}

#[test]
fn encode_nested_object_flattens_to_child_blocks() {
    let toon = encode_default(&json!({"server": {"host": "localhost", "port": 8080}}));
    assert_eq!(toon, "host: localhost\n\nport: 8080");
}

// ============================================================================
// Number formatting
// ============================================================================

#[test]
fn encode_whole_float_as_integer() {
    let toon = encode_default(&json!({"x": 3.0}));
    assert_eq!(toon, "x: 3");
}

#[test]
fn encode_float_keeps_fraction() {
    let toon = encode_default(&json!({"x": 3.25}));
    assert_eq!(toon, "x: 3.25");
}

#[test]
fn encode_negative_zero_normalizes() {
    let toon = encode_default(&json!({"x": -0.0}));
    assert_eq!(toon, "x: 0");
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn encode_value_containing_delimiter_is_quoted() {
    // The concrete example from the format's documentation.
    let toon = encode_default(&json!({"name": "Al,ice", "age": 30}));
    assert_eq!(toon, "name: \"Al,ice\"\n\nage: 30");
}

#[test]
fn encode_value_containing_quote_is_escaped() {
    let toon = encode_default(&json!({"quote": "He said \"hi\""}));
    assert_eq!(toon, "quote: \"He said \\\"hi\\\"\"");
}

#[test]
fn encode_plain_value_is_not_quoted() {
    let toon = encode_default(&json!({"note": "a: b c"}));
    assert_eq!(toon, "note: a: b c");
}

#[test]
fn encode_custom_delimiter_drives_quoting() {
    let options = EncodeOptions {
        delimiter: ';',
        ..EncodeOptions::default()
    };
    // Comma no longer triggers quoting, semicolon does.
    let toon = encode(&json!({"a": "x,y", "b": "x;y"}), &options);
    assert_eq!(toon, "a: x,y\n\nb: \"x;y\"");
}

// ============================================================================
// Primitive arrays
// ============================================================================

#[test]
fn encode_primitive_array_one_value_per_line() {
    let toon = encode_default(&json!({"tags": ["admin", "ops", "dev"]}));
    assert_eq!(toon, "tags[3]:\nadmin\nops\ndev");
}

#[test]
fn encode_primitive_array_mixed_scalars() {
    let toon = encode_default(&json!({"mixed": [1, "two", true]}));
    assert_eq!(toon, "mixed[3]:\n1\ntwo\ntrue");
}

#[test]
fn encode_empty_array() {
    let toon = encode_default(&json!({"items": []}));
    assert_eq!(toon, "items[0]:");
}

#[test]
fn encode_root_array_uses_implicit_key() {
    let toon = encode_default(&json!([1, 2, 3]));
    assert_eq!(toon, "data[3]:\n1\n2\n3");
}

#[test]
fn encode_count_annotation_is_literal() {
    let toon = encode_default(&json!({"xs": ["a", "b", "c"]}));
    assert!(toon.contains("[3]"));
}

#[test]
fn encode_length_marker_prefixes_count() {
    let options = EncodeOptions {
        length_marker: true,
        ..EncodeOptions::default()
    };
    assert_eq!(encode(&json!([]), &options), "data[#0]:");
    assert_eq!(encode(&json!({"xs": [1, 2]}), &options), "xs[#2]:\n1\n2");
}

// ============================================================================
// Object arrays
// ============================================================================

#[test]
fn encode_uniform_object_array() {
    let toon = encode_default(&json!({
        "users": [
            {"id": 1, "name": "Ada", "active": true},
            {"id": 2, "name": "Bob", "active": false},
        ]
    }));
    assert_eq!(toon, "users[2]{id,name,active}:\n1,Ada,true\n2,Bob,false");
}

#[test]
fn encode_field_list_comes_from_first_element() {
    // The second element's extra field is dropped, its missing field is empty.
    let toon = encode_default(&json!({
        "items": [
            {"a": 1, "b": 2},
            {"a": 3, "c": 9},
        ]
    }));
    assert_eq!(toon, "items[2]{a,b}:\n1,2\n3,");
}

#[test]
fn encode_row_cell_containing_delimiter_is_quoted() {
    let toon = encode_default(&json!({
        "items": [{"name": "a,b", "id": 1}, {"name": "c", "id": 2}]
    }));
    assert_eq!(toon, "items[2]{name,id}:\n\"a,b\",1\nc,2");
}

#[test]
fn encode_null_cell_is_empty() {
    let toon = encode_default(&json!({
        "items": [{"a": null, "b": 2}]
    }));
    assert_eq!(toon, "items[1]{a,b}:\n,2");
}

#[test]
fn encode_mixed_shape_array_is_best_effort() {
    // A non-object element after an object first element renders as empty cells.
    let toon = encode_default(&json!({"items": [{"a": 1}, 5]}));
    assert!(toon.starts_with("items[2]{a}:\n1"));
}

#[test]
fn encode_custom_delimiter_in_header_and_rows() {
    let options = EncodeOptions {
        delimiter: ';',
        ..EncodeOptions::default()
    };
    let toon = encode(&json!({"items": [{"a": "x,y", "b": 1}]}), &options);
    assert_eq!(toon, "items[1]{a;b}:\nx,y;1");
}

// ============================================================================
// Multi-block documents
// ============================================================================

#[test]
fn encode_blocks_are_separated_by_blank_lines() {
    let toon = encode_default(&json!({
        "title": "report",
        "rows": [{"x": 1}, {"x": 2}],
    }));
    assert_eq!(toon, "title: report\n\nrows[2]{x}:\n1\n2");
}

#[test]
fn encode_no_trailing_newline() {
    let toon = encode_default(&json!({"a": 1, "xs": [1, 2]}));
    assert!(!toon.ends_with('\n'));
}
