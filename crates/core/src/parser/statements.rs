use super::Parser;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::token::TokenCode;

const SCALAR_TYPES: &[TokenCode] = &[
    TokenCode::Bilang,
    TokenCode::Lutang,
    TokenCode::Bulyan,
    TokenCode::Kwerdas,
];

const LOOP_KEYWORDS: &[TokenCode] = &[TokenCode::Para, TokenCode::Habang, TokenCode::Gawin];

impl<'a> Parser<'a> {
    /// True when the current token opens some statement production.
    fn at_statement_start(&self) -> bool {
        self.check_any(SCALAR_TYPES)
            || self.check(TokenCode::Identifier)
            || self.check(TokenCode::Kung)
            || self.check_any(LOOP_KEYWORDS)
    }

    /// statement-list := { statement }, ending at the first token that starts
    /// no statement.
    pub(crate) fn statement_list(&mut self) -> Result<(), Diagnostic> {
        while self.at_statement_start() {
            self.statement()?;
        }
        Ok(())
    }

    /// Dispatch on the first token.
    pub fn statement(&mut self) -> Result<(), Diagnostic> {
        self.trace_rule("statement");
        if self.check_any(SCALAR_TYPES) {
            self.declaration_statement()
        } else if self.check(TokenCode::Identifier) {
            self.assignment_statement()
        } else if self.check(TokenCode::Kung) {
            self.conditional_statement()
        } else if self.check_any(LOOP_KEYWORDS) {
            self.loop_statement()
        } else {
            Err(self.fail(DiagnosticKind::UnexpectedStatement, "unexpected token"))
        }
    }

    // -- Declarations and assignments ----------------------------

    /// declaration := type declarator { "," declarator } ";"
    fn declaration_statement(&mut self) -> Result<(), Diagnostic> {
        if !self.check_any(SCALAR_TYPES) {
            return Err(self.fail(DiagnosticKind::ExpectedDataType, "expected data type"));
        }
        self.expect_one_of(SCALAR_TYPES)?;
        self.declarator()?;
        while self.check(TokenCode::Comma) {
            self.expect(TokenCode::Comma)?;
            self.declarator()?;
        }
        self.expect(TokenCode::Semicolon)
    }

    /// declarator := identifier [ "[" numeric-literal "]" ] [ "=" expression ]
    fn declarator(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::Identifier)?;
        if self.check(TokenCode::LBracket) {
            self.expect(TokenCode::LBracket)?;
            self.expect(TokenCode::BilangLiteral)?;
            self.expect(TokenCode::RBracket)?;
        }
        if self.check(TokenCode::Assign) {
            self.expect(TokenCode::Assign)?;
            self.required_expression()?;
        }
        Ok(())
    }

    /// assignment := identifier "=" expression ";"
    pub(crate) fn assignment_statement(&mut self) -> Result<(), Diagnostic> {
        self.assignment_clause()?;
        self.expect(TokenCode::Semicolon)
    }

    /// identifier "=" expression, with no terminator. Shared with the
    /// for-loop increment clause.
    fn assignment_clause(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::Identifier)?;
        self.expect(TokenCode::Assign)?;
        self.required_expression()
    }

    // -- Control flow --------------------------------------------

    /// conditional := "kung" condition block
    ///                [ "kundiman" condition block ]
    ///                [ "kundi" block ]
    ///
    /// At most one `kundiman` clause.
    fn conditional_statement(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::Kung)?;
        self.condition()?;
        self.block()?;

        if self.check(TokenCode::Kundiman) {
            self.expect(TokenCode::Kundiman)?;
            self.condition()?;
            self.block()?;
        }

        if self.check(TokenCode::Kundi) {
            self.expect(TokenCode::Kundi)?;
            self.block()?;
        }
        Ok(())
    }

    /// condition := "(" boolean-expression ")"
    fn condition(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::LParen)?;
        self.boolean_expression()?;
        self.expect(TokenCode::RParen)
    }

    fn loop_statement(&mut self) -> Result<(), Diagnostic> {
        if self.check(TokenCode::Para) {
            self.for_loop()
        } else if self.check(TokenCode::Habang) {
            self.while_loop()
        } else if self.check(TokenCode::Gawin) {
            self.do_while_loop()
        } else {
            Err(self.fail(DiagnosticKind::UnexpectedStatement, "expected loop keyword"))
        }
    }

    /// "para" "(" assignment boolean-expression ";" identifier "=" expression ")" block
    ///
    /// The initializer brings its own `;`; the increment has none.
    fn for_loop(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::Para)?;
        self.expect(TokenCode::LParen)?;
        self.assignment_statement()?;
        self.boolean_expression()?;
        self.expect(TokenCode::Semicolon)?;
        self.assignment_clause()?;
        self.expect(TokenCode::RParen)?;
        self.block()
    }

    /// "habang" condition block
    fn while_loop(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::Habang)?;
        self.condition()?;
        self.block()
    }

    /// "gawin" block "habang" condition ";"
    fn do_while_loop(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenCode::Gawin)?;
        self.block()?;
        self.expect(TokenCode::Habang)?;
        self.condition()?;
        self.expect(TokenCode::Semicolon)
    }
}
