use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::Literal,
            paren::Paren,
            unary::Unary,
        },
        Parse,
        Parser,
        Precedence,
    },
    kind,
    tokenizer::TokenKind,
};
use std::ops::Range;
use symcheck_error::Error;

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A single-token expression, such as a number or a name.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses an expression that cannot be split by an operator: a literal, a call, or a
    /// parenthesized expression.
    pub fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.current_token() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TokenKind::Name if input.peek(1).is_some_and(|next| next.is(TokenKind::OpenParen)) => {
                Call::parse(input).map(Self::Call)
            },
            TokenKind::Integer | TokenKind::Decimal | TokenKind::Symbol | TokenKind::Name => {
                Literal::parse(input).map(Self::Literal)
            },
            TokenKind::OpenParen => Paren::parse(input).map(Self::Paren),
            _ => Err(input.unexpected(token, &[
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::Symbol,
                TokenKind::Name,
                TokenKind::OpenParen,
                TokenKind::Add,
                TokenKind::Sub,
            ])),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}
