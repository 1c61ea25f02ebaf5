use crate::{
    kind,
    parser::{ast::expr::Expr, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;
use symcheck_error::Error;

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.next_token()?;
        if !open_paren.is(TokenKind::OpenParen) {
            return Err(input.unexpected(&open_paren, &[TokenKind::OpenParen]));
        }

        if let Some(close_paren) = input.current_token().filter(|token| token.is(TokenKind::CloseParen)) {
            return Err(Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                kind::EmptyParenthesis,
            ));
        }

        let expr = Expr::parse(input)?;
        let close_paren = match input.current_token() {
            Some(token) if token.is(TokenKind::CloseParen) => input.next_token()?,
            Some(token) => return Err(input.unexpected(token, &[TokenKind::CloseParen])),
            None => return Err(Error::new(
                vec![open_paren.span.clone()],
                kind::UnclosedParenthesis { opening: true },
            )),
        };

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
