use crate::{
    kind,
    parser::{ast::expr::Expr, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;
use symcheck_error::Error;

/// A function call, such as `log(x, 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function to call.
    pub name: String,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the function name.
    pub name_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.next_token()?;
        if !name.is(TokenKind::Name) {
            return Err(input.unexpected(&name, &[TokenKind::Name]));
        }

        let open_paren = input.next_token()?;
        if !open_paren.is(TokenKind::OpenParen) {
            return Err(input.unexpected(&open_paren, &[TokenKind::OpenParen]));
        }

        let mut args = Vec::new();
        if input.current_token().is_some_and(|token| token.is(TokenKind::CloseParen)) {
            input.next_token()?;
        } else {
            loop {
                args.push(Expr::parse(input)?);
                match input.current_token() {
                    Some(token) if token.is(TokenKind::Comma) => {
                        input.next_token()?;
                    },
                    Some(token) if token.is(TokenKind::CloseParen) => {
                        input.next_token()?;
                        break;
                    },
                    Some(token) => return Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                        expected: &[TokenKind::Comma, TokenKind::CloseParen],
                        found: token.kind,
                    })),
                    None => return Err(Error::new(
                        vec![open_paren.span.clone()],
                        kind::UnclosedParenthesis { opening: true },
                    )),
                }
            }
        }

        let end = input.prev_token().map_or(name.span.end, |token| token.span.end);
        Ok(Self {
            name: name.lexeme.to_owned(),
            args,
            span: name.span.start..end,
            name_span: name.span,
        })
    }
}
