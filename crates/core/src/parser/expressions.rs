use super::Parser;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::token::TokenCode;

/// Tokens that may open an expression.
const EXPRESSION_START: &[TokenCode] = &[
    TokenCode::Identifier,
    TokenCode::BilangLiteral,
    TokenCode::KwerdasLiteral,
    TokenCode::BulyanLiteral,
    TokenCode::LutangLiteral,
    TokenCode::LParen,
];

/// Atomic operands.
const OPERANDS: &[TokenCode] = &[
    TokenCode::Identifier,
    TokenCode::BilangLiteral,
    TokenCode::KwerdasLiteral,
    TokenCode::BulyanLiteral,
    TokenCode::LutangLiteral,
];

const ADDITIVE: &[TokenCode] = &[TokenCode::Plus, TokenCode::Minus];
const MULTIPLICATIVE: &[TokenCode] = &[TokenCode::Multiply, TokenCode::Divide];

const RELATIONAL: &[TokenCode] = &[
    TokenCode::Equal,
    TokenCode::NotEqual,
    TokenCode::Greater,
    TokenCode::Less,
    TokenCode::GreaterEq,
    TokenCode::LessEq,
];

impl<'a> Parser<'a> {
    /// expression := term { ("+" | "-") term }
    pub fn expression(&mut self) -> Result<(), Diagnostic> {
        self.trace_rule("expression");
        self.term()?;
        while self.check_any(ADDITIVE) {
            self.expect_one_of(ADDITIVE)?;
            self.term()?;
        }
        Ok(())
    }

    /// term := factor { ("*" | "/") factor }
    fn term(&mut self) -> Result<(), Diagnostic> {
        self.factor()?;
        while self.check_any(MULTIPLICATIVE) {
            self.expect_one_of(MULTIPLICATIVE)?;
            self.factor()?;
        }
        Ok(())
    }

    /// factor := operand | "(" expression ")"
    fn factor(&mut self) -> Result<(), Diagnostic> {
        self.trace_rule("factor");
        if self.check_any(OPERANDS) {
            return self.expect_one_of(OPERANDS);
        }
        if self.check(TokenCode::LParen) {
            self.expect(TokenCode::LParen)?;
            self.enter()?;
            self.expression()?;
            self.leave();
            return self.expect(TokenCode::RParen);
        }
        Err(self.fail(DiagnosticKind::UnexpectedFactor, "unexpected factor"))
    }

    /// Right-hand side of `=`: like [`Parser::expression`], but a token that
    /// cannot start an expression gets its own diagnostic.
    pub(crate) fn required_expression(&mut self) -> Result<(), Diagnostic> {
        if !self.check_any(EXPRESSION_START) {
            return Err(self.fail(
                DiagnosticKind::MissingExpression,
                "expected expression after '='",
            ));
        }
        self.expression()
    }

    /// boolean-expression := expression relational-operator expression
    pub fn boolean_expression(&mut self) -> Result<(), Diagnostic> {
        self.trace_rule("boolean_expression");
        self.expression()?;
        self.relational_operator()?;
        self.expression()
    }

    fn relational_operator(&mut self) -> Result<(), Diagnostic> {
        if self.check_any(RELATIONAL) {
            return self.expect_one_of(RELATIONAL);
        }
        Err(self.fail(
            DiagnosticKind::ExpectedRelationalOperator,
            "expected relational operator",
        ))
    }
}
