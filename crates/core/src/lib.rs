//! ugat-core: syntax analysis for the ugat teaching language.
//!
//! Takes an already-tokenized program and decides whether it is well formed,
//! reporting the first grammar violation with its line and lexeme.
//!
//! # Public API
//!
//! - [`parse_program()`] -- run the grammar engine over a token slice
//! - [`load_tokens()`] -- build a token sequence from a persisted token file
//! - [`ClassificationTable`] -- lexeme to terminal lookup used while loading
//! - [`Diagnostic`] -- the single error a rejected parse carries
//! - Token types: [`Token`], [`TokenCode`], [`TokenCategory`]

pub mod classify;
pub mod error;
pub mod loader;
pub mod parser;
pub mod token;

// ── Convenience re-exports ───────────────────────────────────────────

pub use classify::ClassificationTable;
pub use error::{Diagnostic, DiagnosticKind, LoadError};
pub use loader::{load_tokens, read_tokens, LoadedTokens, UnrecognizedToken};
pub use parser::{
    parse_program, parse_program_with, ParseOptions, ParseOutcome, Parser, TrailingTokens,
};
pub use token::{Token, TokenCategory, TokenCode};
