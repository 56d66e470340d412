//! TOON encoder — converts a JSON-like value into Token-Optimized Object Notation.
//!
//! A TOON document is a sequence of blocks separated by blank lines:
//!
//! - **Scalar lines**: `key: value`
//! - **Primitive arrays**: `key[N]:` followed by one stringified value per line
//! - **Object arrays**: `key[N]{f1,f2}:` followed by one delimited row per element
//!
//! The field list of an object array is taken from the *first* element only;
//! every later element is projected onto it — missing fields encode as the
//! empty string, extra fields are dropped. This lossy projection is the
//! documented contract of the format, not a defect.
//!
//! Nested (non-array) object values are flattened: each child field becomes
//! its own block under the child's key.
//!
//! # Example
//! ```
//! use serde_json::json;
//! use toon_prompt::{encode, EncodeOptions};
//!
//! let value = json!({"name": "Alice", "tags": ["rust", "wasm"]});
//! let toon = encode(&value, &EncodeOptions::default());
//! assert_eq!(toon, "name: Alice\n\ntags[2]:\nrust\nwasm");
//! ```

use serde_json::Value;

/// Key used for root-level arrays and primitives, which carry no key of their own.
pub const IMPLICIT_KEY: &str = "data";

/// Options controlling TOON encoding.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Separator between fields of a data row and between names in a header
    /// field list.
    pub delimiter: char,
    /// When true, counts are written as `[#N]` instead of `[N]`. Purely
    /// cosmetic; the decoder accepts both forms.
    pub length_marker: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            length_marker: false,
        }
    }
}

/// Encode a JSON-like value into a TOON document.
///
/// Pure and infallible. Root objects emit one block per field; root arrays
/// and primitives are keyed under [`IMPLICIT_KEY`]. An empty root object
/// encodes to the empty string.
pub fn encode(value: &Value, options: &EncodeOptions) -> String {
    let mut blocks = Vec::new();
    match value {
        Value::Object(map) => collect_object_blocks(map, options, &mut blocks),
        Value::Array(arr) => blocks.push(encode_array_block(IMPLICIT_KEY, arr, options)),
        scalar => blocks.push(format!(
            "{IMPLICIT_KEY}: {}",
            format_scalar(scalar, options.delimiter)
        )),
    }
    blocks.join("\n\n")
}

/// Emit one block per object field, recursing through nested objects so that
/// their fields surface as top-level blocks of their own.
fn collect_object_blocks(
    map: &serde_json::Map<String, Value>,
    options: &EncodeOptions,
    blocks: &mut Vec<String>,
) {
    for (key, value) in map {
        match value {
            Value::Array(arr) => blocks.push(encode_array_block(key, arr, options)),
            Value::Object(child) => collect_object_blocks(child, options, blocks),
            scalar => blocks.push(format!("{key}: {}", format_scalar(scalar, options.delimiter))),
        }
    }
}

/// Encode an array as a collection block.
///
/// When the first element is an object, the block is tabular: the header
/// carries the first element's key list and each element becomes one
/// delimited row. Otherwise the block is a primitive array: one value per
/// line. Empty arrays always use the primitive header form (`key[0]:`).
fn encode_array_block(key: &str, arr: &[Value], options: &EncodeOptions) -> String {
    let count = format_count(arr.len(), options.length_marker);
    let delim = options.delimiter;

    if let Some(first) = arr.first().and_then(Value::as_object) {
        let fields: Vec<&String> = first.keys().collect();
        let field_list = fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(&delim.to_string());
        let mut out = format!("{key}[{count}]{{{field_list}}}:");
        for element in arr {
            out.push('\n');
            out.push_str(&encode_row(element, &fields, delim));
        }
        return out;
    }

    let mut out = format!("{key}[{count}]:");
    for element in arr {
        out.push('\n');
        out.push_str(&format_scalar(element, delim));
    }
    out
}

fn format_count(len: usize, length_marker: bool) -> String {
    if length_marker {
        format!("#{len}")
    } else {
        len.to_string()
    }
}

/// Project one array element onto the shared field list, emitting a single
/// delimited data row. A non-object element in an object array renders as a
/// row of empty cells (best-effort handling of mixed-shape arrays).
fn encode_row(element: &Value, fields: &[&String], delimiter: char) -> String {
    let cells: Vec<String> = fields
        .iter()
        .map(|field| {
            element
                .as_object()
                .and_then(|map| map.get(field.as_str()))
                .map(|value| format_scalar(value, delimiter))
                .unwrap_or_default()
        })
        .collect();
    cells.join(&delimiter.to_string())
}

/// Format a primitive value for a scalar line, a data-row cell, or a
/// primitive-array line. `null` becomes the empty string. Containers that end
/// up in a scalar position fall back to compact JSON.
fn format_scalar(value: &Value, delimiter: char) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => quote_if_needed(s, delimiter),
        container => container.to_string(),
    }
}

/// Print a number the way the original frontend did: integers bare, whole
/// floats without a fractional part, no trailing fractional zeros, -0 as 0.
/// Non-finite values have no TOON representation and encode as empty.
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            // Normalize -0 to 0
            let f = if f == 0.0 { 0.0 } else { f };
            if f.fract() == 0.0 && f.abs() < (i64::MAX as f64) {
                return (f as i64).to_string();
            }
            let s = format!("{f}");
            if s.contains('.') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        }
        _ => String::new(),
    }
}

/// Wrap a string in double quotes when it contains the active delimiter, a
/// newline, or a double quote. Internal quotes become `\"`. That is the only
/// escape sequence in the format — one escape level, backslashes untouched.
fn quote_if_needed(s: &str, delimiter: char) -> String {
    if s.contains(delimiter) || s.contains('\n') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}
