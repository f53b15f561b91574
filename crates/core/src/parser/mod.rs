//! Recursive-descent grammar engine.
//!
//! One [`Parser`] is created per run and owns the cursor into a borrowed
//! token slice. Every rule returns `Result<(), Diagnostic>`; the first
//! diagnostic short-circuits all callers, so nothing runs after a failure and
//! the cursor stays where the violation was found.
//!
//! Grammar (LL(1)):
//!
//! ```text
//! program        := function-list
//! function-list  := { function }
//! function       := "wala" "ugat" "(" ")" block
//! block          := "{" statement-list "}"
//! statement-list := { statement }
//! statement      := declaration | assignment | conditional | loop
//! ```
//!
//! Statement and expression rules live in `statements.rs` and
//! `expressions.rs`.

use log::{info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, DiagnosticKind};
use crate::token::{Token, TokenCode};

mod expressions;
mod statements;

/// Default bound on nested parentheses and blocks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum nesting of parenthesised expressions and `{ }` blocks.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Tokens left over after a structurally complete program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailingTokens {
    pub count: usize,
    /// Line of the first unconsumed token.
    pub line: u32,
    /// Lexeme of the first unconsumed token.
    pub lexeme: String,
}

/// Result of [`parse_program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Syntactically well-formed. `trailing` is a non-fatal advisory.
    Accepted { trailing: Option<TrailingTokens> },
    Rejected(Diagnostic),
}

impl ParseOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ParseOutcome::Accepted { .. })
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ParseOutcome::Rejected(d) => Some(d),
            ParseOutcome::Accepted { .. } => None,
        }
    }

    pub fn trailing(&self) -> Option<&TrailingTokens> {
        match self {
            ParseOutcome::Accepted { trailing } => trailing.as_ref(),
            ParseOutcome::Rejected(_) => None,
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ParseOutcome::Accepted { trailing } => serde_json::json!({
                "accepted": true,
                "trailing": trailing,
            }),
            ParseOutcome::Rejected(d) => serde_json::json!({
                "accepted": false,
                "error": d.to_json_value(),
            }),
        }
    }
}

/// Parse a whole program with default options.
pub fn parse_program(tokens: &[Token]) -> ParseOutcome {
    parse_program_with(tokens, &ParseOptions::default())
}

pub fn parse_program_with(tokens: &[Token], options: &ParseOptions) -> ParseOutcome {
    let mut p = Parser::new(tokens, options.clone());
    match p.program() {
        Ok(trailing) => ParseOutcome::Accepted { trailing },
        Err(d) => ParseOutcome::Rejected(d),
    }
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Cursor position: index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn cur(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    // -- Lookahead and consumption ------------------------------

    /// Whether the current token is `expected`. Never advances; false at end
    /// of input and for [`TokenCode::Unknown`].
    pub fn check(&self, expected: TokenCode) -> bool {
        expected != TokenCode::Unknown && self.cur().is_some_and(|t| t.code == expected)
    }

    pub(crate) fn check_any(&self, codes: &[TokenCode]) -> bool {
        codes.iter().any(|c| self.check(*c))
    }

    /// Consume the current token if it is `expected`, else fail with a
    /// terminal-mismatch diagnostic. The only place the cursor moves.
    pub fn expect(&mut self, expected: TokenCode) -> Result<(), Diagnostic> {
        if self.check(expected) {
            self.pos += 1;
            return Ok(());
        }
        let message = match self.cur() {
            Some(_) => format!("expected {}", expected),
            None => format!("expected {} but reached end of input", expected),
        };
        Err(self
            .fail(DiagnosticKind::TerminalMismatch, message)
            .with_expected(expected))
    }

    /// Consume whichever of `codes` is current. Callers have already checked
    /// that one of them is present.
    pub(crate) fn expect_one_of(&mut self, codes: &[TokenCode]) -> Result<(), Diagnostic> {
        match codes.iter().copied().find(|c| self.check(*c)) {
            Some(code) => self.expect(code),
            None => Err(self.fail(
                DiagnosticKind::TerminalMismatch,
                format!("expected one of {}", describe_all(codes)),
            )),
        }
    }

    // -- Diagnostics ---------------------------------------------

    /// Build a diagnostic located at the current token. At end of input the
    /// lexeme is empty and the last token's line is used.
    pub(crate) fn fail(&self, kind: DiagnosticKind, message: impl Into<String>) -> Diagnostic {
        match self.cur() {
            Some(t) => Diagnostic::new(kind, message, Some(t.line), t.lexeme.clone()),
            None => Diagnostic::new(kind, message, self.tokens.last().map(|t| t.line), ""),
        }
    }

    pub(crate) fn trace_rule(&self, rule: &str) {
        if log::log_enabled!(log::Level::Trace) {
            match self.cur() {
                Some(t) => trace!("{}() at {}: '{}' ({})", rule, self.pos, t.lexeme, t.code.name()),
                None => trace!("{}() at end of input", rule),
            }
        }
    }

    /// Track one level of nesting; paired with [`Parser::leave`].
    pub(crate) fn enter(&mut self) -> Result<(), Diagnostic> {
        if self.depth >= self.options.max_depth {
            return Err(self.fail(
                DiagnosticKind::NestingTooDeep,
                format!("nesting depth exceeds limit of {}", self.options.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // -- Program structure ---------------------------------------

    /// program := function-list. Tokens left after the last function are an
    /// advisory, not an error.
    pub fn program(&mut self) -> Result<Option<TrailingTokens>, Diagnostic> {
        self.trace_rule("program");
        self.function_list()?;

        match self.cur() {
            Some(first) => {
                let trailing = TrailingTokens {
                    count: self.tokens.len() - self.pos,
                    line: first.line,
                    lexeme: first.lexeme.clone(),
                };
                warn!(
                    "Extra tokens after program end: {} token(s) starting at line {} ('{}')",
                    trailing.count, trailing.line, trailing.lexeme
                );
                Ok(Some(trailing))
            }
            None => {
                info!("Syntax Analysis Complete.");
                Ok(None)
            }
        }
    }

    fn function_list(&mut self) -> Result<(), Diagnostic> {
        while self.check(TokenCode::Wala) {
            self.function()?;
        }
        Ok(())
    }

    /// function := "wala" "ugat" "(" ")" block
    fn function(&mut self) -> Result<(), Diagnostic> {
        self.trace_rule("function");
        self.expect(TokenCode::Wala)?;
        self.expect(TokenCode::Ugat)?;
        self.expect(TokenCode::LParen)?;
        self.expect(TokenCode::RParen)?;
        self.block()
    }

    /// block := "{" statement-list "}"
    pub(crate) fn block(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::LBrace)?;
        self.enter()?;
        self.statement_list()?;
        self.leave();
        self.expect(TokenCode::RBrace)
    }
}

fn describe_all(codes: &[TokenCode]) -> String {
    codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
