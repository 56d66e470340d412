//! Error types for TOON decoding and prompt construction.

use thiserror::Error;

/// Errors surfaced by the TOON decoder and the prompt builder's encode path.
///
/// The encoder has no error cases: every `serde_json::Value` has a defined
/// (possibly best-effort) encoding. The decoder fails hard only on empty
/// input; all other malformed input degrades gracefully.
#[derive(Error, Debug)]
pub enum ToonError {
    /// The decoder was handed an empty (or all-whitespace) document.
    #[error("cannot decode empty TOON input")]
    EmptyInput,

    /// Conversation turns could not be serialized before TOON encoding.
    #[error("conversation serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout toon-prompt.
pub type Result<T> = std::result::Result<T, ToonError>;
