//! `toon-prompt` CLI — encode, decode, and analyze TOON documents, and build
//! conversation prompts from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to TOON (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | toon-prompt encode
//!
//! # Encode from file to file with a length marker
//! toon-prompt encode -i data.json -o data.toon --length-marker
//!
//! # Decode TOON back to pretty-printed JSON
//! toon-prompt decode -i data.toon
//!
//! # Show token-savings statistics
//! toon-prompt stats -i data.json
//!
//! # Build a model prompt from a history file plus a new message
//! toon-prompt prompt -i history.json "What did we decide?"
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use toon_prompt::{
    build_conversation_prompt, decode_with_delimiter, encode, estimate_token_savings,
    EncodeOptions, Turn,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "toon-prompt",
    version,
    about = "TOON (Token-Optimized Object Notation) CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to TOON format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Field delimiter for data rows and header field lists
        #[arg(long, default_value_t = ',')]
        delimiter: char,
        /// Write counts as [#N] instead of [N]
        #[arg(long)]
        length_marker: bool,
    },
    /// Decode TOON back to JSON format
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Field delimiter the document was encoded with
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Show token-savings statistics for a JSON document
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Build a model prompt from a conversation history and a new message
    Prompt {
        /// The new user message
        message: String,
        /// History file: a JSON array of {"role","content"} turns
        #[arg(short, long)]
        input: Option<String>,
        /// Encoding strategy: auto, toon, or tagged
        #[arg(long, default_value = "auto")]
        mode: String,
    },
}

fn main() -> Result<()> {
    // Decoder/prompt warnings go to stderr so piped output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Encode {
            input,
            output,
            delimiter,
            length_marker,
        } => {
            let json = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse input as JSON")?;
            let options = EncodeOptions {
                delimiter,
                length_marker,
            };
            write_output(output.as_deref(), &encode(&value, &options))?;
        }
        Commands::Decode {
            input,
            output,
            delimiter,
        } => {
            let toon = read_input(input.as_deref())?;
            let value =
                decode_with_delimiter(&toon, delimiter).context("Failed to decode TOON input")?;
            let pretty = serde_json::to_string_pretty(&value)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse input as JSON")?;
            let report = estimate_token_savings(&value);
            println!(
                "JSON length:  {} chars (~{} tokens)",
                report.json_length, report.json_tokens
            );
            println!(
                "TOON length:  {} chars (~{} tokens)",
                report.toon_length, report.toon_tokens
            );
            println!(
                "Savings:      {} tokens ({:.1}%)",
                report.savings_tokens, report.savings_percent
            );
        }
        Commands::Prompt {
            message,
            input,
            mode,
        } => {
            let history: Vec<Turn> = match input {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {path}"))?;
                    serde_json::from_str(&raw)
                        .context("History must be a JSON array of {role, content} turns")?
                }
                None => Vec::new(),
            };
            let use_toon = match mode.as_str() {
                "auto" => None,
                "toon" => Some(true),
                "tagged" => Some(false),
                other => bail!("Unknown mode: '{other}'. Available modes: auto, toon, tagged"),
            };
            print!("{}", build_conversation_prompt(&history, &message, use_toon));
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            print!("{content}");
        }
    }
    Ok(())
}
