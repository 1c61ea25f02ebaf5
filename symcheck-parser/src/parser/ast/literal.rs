use crate::{
    parser::{Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;
use symcheck_error::Error;

/// The kind of a [`Literal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind {
    /// An integer, such as `16`.
    Integer,

    /// A decimal, such as `3.14` or `2e-3`.
    Decimal,

    /// A free symbol, such as `x`.
    Symbol,

    /// A name bound to something in the binding table, such as `pi` when it is bound to the
    /// constant, or `sin` when it is not called.
    Name,
}

/// A single-token expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The kind of literal.
    pub kind: LiteralKind,

    /// The literal as written.
    pub lexeme: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Integer => LiteralKind::Integer,
            TokenKind::Decimal => LiteralKind::Decimal,
            TokenKind::Symbol => LiteralKind::Symbol,
            TokenKind::Name => LiteralKind::Name,
            _ => return Err(input.unexpected(&token, &[
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::Symbol,
                TokenKind::Name,
            ])),
        };

        Ok(Self {
            kind,
            lexeme: token.lexeme.to_owned(),
            span: token.span,
        })
    }
}
