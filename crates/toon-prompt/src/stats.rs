//! Format detection and token-savings estimation.
//!
//! Both functions are diagnostics. [`is_toon`] is a heuristic classifier —
//! a string can pass it and still fail to decode cleanly — and the savings
//! report uses a fixed 4-characters-per-token approximation rather than a
//! real tokenizer. Neither result should ever gate behavior.

use serde_json::Value;

use crate::decoder::{parse_header, DEFAULT_DELIMITER};
use crate::encoder::{encode, EncodeOptions};

/// Heuristic: does this string look TOON-encoded?
///
/// True when at least one line anywhere in the text matches the collection
/// header pattern (`key[N]:` / `key[#N]{f1,f2}:`).
///
/// ```
/// use toon_prompt::is_toon;
///
/// assert!(is_toon("conversation[2]{role,content}:\nuser,hi\nassistant,hello"));
/// assert!(!is_toon("just plain text"));
/// ```
pub fn is_toon(text: &str) -> bool {
    text.lines()
        .any(|line| parse_header(line.trim(), DEFAULT_DELIMITER).is_some())
}

/// Size comparison between a value's canonical JSON form and its TOON form.
///
/// Lengths are in characters; token counts use the fixed chars/4 heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSavings {
    pub json_length: usize,
    pub toon_length: usize,
    pub json_tokens: usize,
    pub toon_tokens: usize,
    /// Negative when TOON comes out larger than JSON (tiny payloads).
    pub savings_tokens: i64,
    pub savings_percent: f64,
}

/// Estimate how many tokens TOON saves over canonical JSON for `value`.
///
/// Encodes the value both ways (TOON under default options) and compares
/// estimated token counts. Informational only.
pub fn estimate_token_savings(value: &Value) -> TokenSavings {
    let json = value.to_string();
    let toon = encode(value, &EncodeOptions::default());

    let json_length = json.chars().count();
    let toon_length = toon.chars().count();
    let json_tokens = json_length.div_ceil(4);
    let toon_tokens = toon_length.div_ceil(4);
    let savings_tokens = json_tokens as i64 - toon_tokens as i64;
    let savings_percent = if json_tokens == 0 {
        0.0
    } else {
        savings_tokens as f64 / json_tokens as f64 * 100.0
    };

    TokenSavings {
        json_length,
        toon_length,
        json_tokens,
        toon_tokens,
        savings_tokens,
        savings_percent,
    }
}
