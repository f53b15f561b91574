use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::TokenCode;

/// What kind of grammar violation stopped the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `expect` wanted one terminal and found another.
    TerminalMismatch,
    /// No statement production starts with the current token.
    UnexpectedStatement,
    /// No expression atom starts with the current token.
    UnexpectedFactor,
    /// The right-hand side of `=` does not start an expression.
    MissingExpression,
    ExpectedRelationalOperator,
    ExpectedDataType,
    /// Parentheses or blocks nested past the configured bound.
    NestingTooDeep,
}

/// The single diagnostic produced by a rejected parse. Matches the
/// expected-error.json format used by the conformance suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// 1-based line of the offending token; `None` when unknown.
    pub line: Option<u32>,
    /// Offending lexeme; empty at end of input.
    pub lexeme: String,
    /// Terminal that was required, for mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<TokenCode>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: Option<u32>,
        lexeme: impl Into<String>,
    ) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            // Line numbers are 1-based; zero means the producer did not know.
            line: line.filter(|l| *l > 0),
            lexeme: lexeme.into(),
            expected: None,
        }
    }

    pub fn with_expected(mut self, code: TokenCode) -> Self {
        self.expected = Some(code);
        self
    }

    /// Serialize to JSON. Always includes every field (null for missing),
    /// unlike the derived `Serialize`.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":     self.kind,
            "message":  self.message,
            "line":     self.line,
            "lexeme":   self.lexeme,
            "expected": self.expected,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Syntax Error at line {}: {}", line, self.message)?,
            None => write!(f, "Syntax Error: {}", self.message)?,
        }
        if !self.lexeme.is_empty() {
            write!(f, " (found '{}')", self.lexeme)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Failure while building a token sequence from a persisted token file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid token JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A line that is neither a header nor a `lexeme | NAME [| line]` record.
    #[error("malformed token record on line {line_no}: '{content}'")]
    Malformed { line_no: usize, content: String },
}
