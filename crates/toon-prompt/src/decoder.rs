//! TOON decoder — parses a TOON document back into a JSON-like value.
//!
//! Parsing is deliberately forgiving: the format is meant to survive
//! producer/consumer version drift by ignoring what it cannot read rather
//! than failing. The only hard error is empty input. Lines that match
//! nothing are skipped, and a declared element count that disagrees with the
//! collected row count is reported through a warning, never an error.
//!
//! Type coercion mirrors the encoder's raw stringification: `true`/`false`
//! become booleans, numeric text becomes numbers, quoted text is unescaped,
//! the empty cell becomes null. A string `"30"` therefore round-trips to the
//! number 30 — expected behavior, shared with every other implementation of
//! the format.
//!
//! # Key design decisions
//!
//! - **Single open block**: a header line closes the previous block and
//!   opens a new one. While a block is open, every non-header line is a data
//!   row, even one shaped like a scalar field. Blocks close only at the next
//!   header or end of input.
//! - **Last-block count validation only**: intermediate blocks flush without
//!   a count check. Some producers emit approximate counts and rely on this
//!   leniency, so it must not be tightened to per-block validation.

use serde_json::{Map, Value};

use crate::error::{Result, ToonError};

/// Default field delimiter, matching [`crate::EncodeOptions::default`].
pub(crate) const DEFAULT_DELIMITER: char = ',';

/// Decode a TOON document using the default `,` delimiter.
///
/// # Errors
/// Returns [`ToonError::EmptyInput`] when `text` is empty or all whitespace.
pub fn decode(text: &str) -> Result<Value> {
    decode_with_delimiter(text, DEFAULT_DELIMITER)
}

/// Decode a TOON document produced with a non-default delimiter.
///
/// The result is always a JSON object: collection blocks decode to arrays
/// under their header key, scalar lines to coerced primitive fields.
///
/// # Errors
/// Returns [`ToonError::EmptyInput`] when `text` is empty or all whitespace.
/// Everything else degrades gracefully under the soft-validation policy.
pub fn decode_with_delimiter(text: &str, delimiter: char) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(ToonError::EmptyInput);
    }

    let mut root = Map::new();
    let mut open: Option<Block> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = parse_header(line, delimiter) {
            if let Some(done) = open.take() {
                flush_block(done, &mut root, false);
            }
            open = Some(Block {
                header,
                rows: Vec::new(),
            });
        } else if let Some(block) = open.as_mut() {
            block
                .rows
                .push(parse_row(line, block.header.fields.as_deref(), delimiter));
        } else if let Some((key, value)) = parse_scalar_line(line) {
            root.insert(key, value);
        }
        // Anything else outside a block is silently ignored.
    }

    if let Some(done) = open.take() {
        flush_block(done, &mut root, true);
    }

    Ok(Value::Object(root))
}

/// Metadata captured from a header line: `key[N]:`, `key[#N]:`, or
/// `key[N]{f1,f2}:`.
pub(crate) struct Header {
    key: String,
    declared: usize,
    fields: Option<Vec<String>>,
}

struct Block {
    header: Header,
    rows: Vec<Value>,
}

/// Insert a finished block into the result object. Only the final block of a
/// document gets its declared count checked; a mismatch is a warning, not an
/// error.
fn flush_block(block: Block, root: &mut Map<String, Value>, validate_count: bool) {
    let Block { header, rows } = block;
    if validate_count && header.declared != rows.len() {
        tracing::warn!(
            key = %header.key,
            declared = header.declared,
            actual = rows.len(),
            "TOON block count mismatch"
        );
    }
    root.insert(header.key, Value::Array(rows));
}

/// Parse a collection header. Returns `None` for any line that does not
/// match the pattern exactly — the line then falls through to data-row or
/// scalar handling.
///
/// The key must be a bare identifier (ASCII alphanumerics and underscores),
/// the count may carry an optional `#` prefix, the field list is optional,
/// and the line must end with `:` immediately after.
pub(crate) fn parse_header(line: &str, delimiter: char) -> Option<Header> {
    let bracket = line.find('[')?;
    let key = &line[..bracket];
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let rest = &line[bracket + 1..];
    let close = rest.find(']')?;
    let count_str = rest[..close].strip_prefix('#').unwrap_or(&rest[..close]);
    if count_str.is_empty() || !count_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let declared = count_str.parse().ok()?;

    let mut tail = &rest[close + 1..];
    let mut fields = None;
    if let Some(inner) = tail.strip_prefix('{') {
        let brace = inner.find('}')?;
        let field_list = &inner[..brace];
        fields = Some(if field_list.is_empty() {
            Vec::new()
        } else {
            field_list.split(delimiter).map(str::to_string).collect()
        });
        tail = &inner[brace + 1..];
    }
    if tail != ":" {
        return None;
    }

    Some(Header {
        key: key.to_string(),
        declared,
        fields,
    })
}

/// Parse one data line of an open block. With a field list the line is split
/// on the delimiter (quotes suppress splitting) and each cell is coerced;
/// cells beyond the field list are dropped, missing cells decode as null.
/// Without a field list the whole line is one coerced element.
fn parse_row(line: &str, fields: Option<&[String]>, delimiter: char) -> Value {
    match fields {
        Some(fields) => {
            let cells = split_delimited(line, delimiter);
            let mut map = Map::new();
            for (i, field) in fields.iter().enumerate() {
                let value = cells
                    .get(i)
                    .map(|cell| coerce_scalar(cell))
                    .unwrap_or(Value::Null);
                map.insert(field.clone(), value);
            }
            Value::Object(map)
        }
        None => coerce_scalar(line),
    }
}

/// Parse a `key: value` scalar line. The key must look like an identifier so
/// that arbitrary prose containing a colon is not misread as a field.
fn parse_scalar_line(line: &str) -> Option<(String, Value)> {
    let colon = line.find(':')?;
    let key = line[..colon].trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = coerce_scalar(line[colon + 1..].trim());
    Some((key.to_string(), value))
}

/// Shared value-coercion routine for data-row cells, primitive-array lines,
/// and scalar-line values: empty → null, `true`/`false` → bool, quoted →
/// unescaped string, numeric → number, anything else → raw string.
pub(crate) fn coerce_scalar(raw: &str) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if s == "true" {
        return Value::Bool(true);
    }
    if s == "false" {
        return Value::Bool(false);
    }
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return Value::String(unescape(&s[1..s.len() - 1]));
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>() {
        // from_f64 rejects NaN/infinity, so "nan"-like text stays a string.
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(s.to_string())
}

/// Split a data row on the delimiter, treating quoted segments as opaque.
/// `\"` inside a quoted segment does not terminate it. Quote characters stay
/// in the cells; [`coerce_scalar`] strips and unescapes them.
fn split_delimited(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => {
                current.push(ch);
                escaped = true;
            }
            '"' => {
                current.push(ch);
                in_quotes = !in_quotes;
            }
            c if c == delimiter && !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    cells.push(current);
    cells
}

/// Undo the encoder's single escape sequence (`\"` → `"`). Other backslash
/// pairs pass through untouched — the format has exactly one escape.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'"') {
            out.push('"');
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}
