//! Conversation prompt building.
//!
//! Takes the chat page's turn history plus the message being sent and emits
//! the single prompt string handed to the completion endpoint. Histories
//! longer than three turns are compacted with the TOON codec; short ones use
//! the tagged sentinel format directly. A TOON failure is never allowed to
//! block the user from chatting: the builder logs a warning and downgrades
//! to the tagged format instead.
//!
//! ```
//! use toon_prompt::{build_conversation_prompt, Turn};
//!
//! let history = vec![Turn::user("hi"), Turn::assistant("hello")];
//! let prompt = build_conversation_prompt(&history, "how are you?", None);
//! assert!(prompt.ends_with("<|assistant|>\n"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::encoder::{encode, EncodeOptions};
use crate::error::Result;

/// Hard cap on turns included in a prompt; oldest turns are dropped first.
pub const MAX_PROMPT_TURNS: usize = 20;

/// Histories longer than this auto-select the TOON encoding.
const TOON_TURN_THRESHOLD: usize = 3;

/// Boilerplate assistant content excluded from prompts. These are UI
/// sentinels (initial greeting, reset notice), not real conversation, and
/// are matched by substring containment.
pub const ASSISTANT_BOILERPLATE: &[&str] = &[
    "Hello! I'm your AI assistant. How can I help you today?",
    "Conversation cleared. What would you like to talk about?",
];

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged utterance in a conversation history.
///
/// Turns are created and owned by the caller; the builder only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Build the prompt string for a completion request.
///
/// Filters boilerplate assistant turns out of `history`, appends
/// `new_message` as the latest user turn, keeps the most recent
/// [`MAX_PROMPT_TURNS`] turns in their original order, and renders them
/// either as a TOON document inside an instructional wrapper or as the
/// tagged sentinel format.
///
/// `use_toon` overrides the automatic strategy; when `None`, TOON is chosen
/// once the turn count exceeds three. This function never fails — if TOON
/// encoding does, the tagged format is used instead.
pub fn build_conversation_prompt(
    history: &[Turn],
    new_message: &str,
    use_toon: Option<bool>,
) -> String {
    let mut turns: Vec<Turn> = history
        .iter()
        .filter(|turn| !is_boilerplate(turn))
        .cloned()
        .collect();
    turns.push(Turn::user(new_message));
    let excess = turns.len().saturating_sub(MAX_PROMPT_TURNS);
    if excess > 0 {
        turns.drain(..excess);
    }

    let want_toon = use_toon.unwrap_or(turns.len() > TOON_TURN_THRESHOLD);
    if want_toon {
        match encode_conversation(&turns) {
            Ok(encoded) => return wrap_toon_prompt(&encoded),
            Err(error) => {
                tracing::warn!(%error, "TOON encoding failed, falling back to tagged format");
            }
        }
    }
    tagged_prompt(&turns)
}

/// An assistant turn whose content contains a known UI sentinel is not real
/// conversation and is excluded from the prompt.
fn is_boilerplate(turn: &Turn) -> bool {
    turn.role == Role::Assistant
        && ASSISTANT_BOILERPLATE
            .iter()
            .any(|marker| turn.content.contains(marker))
}

/// Serialize the turns under a `conversation` key and TOON-encode them.
fn encode_conversation(turns: &[Turn]) -> Result<String> {
    let mut root = Map::new();
    root.insert("conversation".to_string(), serde_json::to_value(turns)?);
    Ok(encode(&Value::Object(root), &EncodeOptions::default()))
}

/// Embed the encoded history in the fixed instructional wrapper that tells
/// the model how to read the notation.
fn wrap_toon_prompt(encoded: &str) -> String {
    format!(
        "You are a helpful AI assistant. The conversation so far is encoded below in \
         TOON (Token-Optimized Object Notation): the `conversation` block holds one \
         turn per line, with the fields named in its header, oldest turn first.\n\n\
         {encoded}\n\n\
         Continue the conversation as the assistant. Reply in the same language the \
         user writes in."
    )
}

/// Tagged fallback format: role sentinels around each turn, ending with an
/// open assistant marker for the model to continue from.
fn tagged_prompt(turns: &[Turn]) -> String {
    let mut out = String::from(
        "<|system|>\nYou are a helpful AI assistant. Continue the conversation and \
         reply in the user's language.\n<|end|>\n",
    );
    for turn in turns {
        let marker = match turn.role {
            Role::User => "<|user|>",
            Role::Assistant => "<|assistant|>",
        };
        out.push_str(marker);
        out.push('\n');
        out.push_str(&turn.content);
        out.push_str("\n<|end|>\n");
    }
    out.push_str("<|assistant|>\n");
    out
}
