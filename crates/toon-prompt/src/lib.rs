//! # toon-prompt
//!
//! Codec and prompt builder for **TOON (Token-Optimized Object Notation)**.
//!
//! TOON is a compact, line-oriented serialization format used to shrink
//! structured data — chiefly conversation history — before embedding it in a
//! language-model prompt. A document is a sequence of blocks separated by
//! blank lines: scalar lines (`key: value`), primitive-array blocks
//! (`key[N]:` followed by one value per line), and object-array blocks
//! (`key[N]{f1,f2}:` followed by one delimited row per element).
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use toon_prompt::{encode, decode, EncodeOptions};
//!
//! let value = json!({"users": [{"id": 1, "name": "Ada"}, {"id": 2, "name": "Bob"}]});
//! let toon = encode(&value, &EncodeOptions::default());
//! assert_eq!(toon, "users[2]{id,name}:\n1,Ada\n2,Bob");
//!
//! // Roundtrip
//! let back = decode(&toon).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] — JSON-like value → TOON string
//! - [`decoder`] — TOON string → JSON-like value
//! - [`prompt`] — Conversation history → model-ready prompt string
//! - [`stats`] — Format detection and token-savings estimation
//! - [`error`] — Error types for decode/serialization failures

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod prompt;
pub mod stats;

pub use decoder::{decode, decode_with_delimiter};
pub use encoder::{encode, EncodeOptions};
pub use error::ToonError;
pub use prompt::{build_conversation_prompt, Role, Turn, MAX_PROMPT_TURNS};
pub use stats::{estimate_token_savings, is_toon, TokenSavings};
