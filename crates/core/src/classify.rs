//! Lexeme classification table.
//!
//! Maps the exact surface text of a fixed-spelling lexeme to its category and
//! terminal code. The loader consults it before falling back to the
//! persisted token name.

use std::collections::HashMap;

use crate::token::{TokenCategory, TokenCode};

#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    entries: HashMap<String, (TokenCategory, TokenCode)>,
}

impl ClassificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every keyword, reserved word, noise word, operator and
    /// delimiter of the language, plus the boolean literals `tama`/`mali`.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for code in TokenCode::ALL.iter().copied() {
            if let Some(spelling) = code.spelling() {
                table.insert(spelling, code.category(), code);
            }
        }
        // Boolean constants are reserved words that act as literals in
        // expressions.
        table.insert("tama", TokenCategory::Literal, TokenCode::BulyanLiteral);
        table.insert("mali", TokenCategory::Literal, TokenCode::BulyanLiteral);
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, lexeme: impl Into<String>, category: TokenCategory, code: TokenCode) {
        self.entries.insert(lexeme.into(), (category, code));
    }

    pub fn classify(&self, lexeme: &str) -> Option<(TokenCategory, TokenCode)> {
        self.entries.get(lexeme).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
