pub mod ast;
pub mod op;

use crate::{kind::{self, UnexpectedEof}, tokenizer::{Token, TokenKind}};
use std::ops::Range;
use symcheck_error::{Error, ErrorKind};

/// Returns a description of the construct that a token introduces, if that construct is
/// understood but never allowed.
fn unsupported_construct(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Comma => Some("tuples"),
        TokenKind::Dot => Some("attribute accesses"),
        TokenKind::PlusMinus => Some("`±` operators"),
        TokenKind::Assign => Some("assignments"),
        _ => None,
    }
}

/// A parser over the transformed token stream, producing an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token<'source>>) -> Self {
        Self {
            tokens: tokens.into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the input if the cursor
    /// is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates the error for a token that cannot appear where it was found. Tokens introducing
    /// unsupported constructs get a dedicated error.
    pub fn unexpected(&self, token: &Token, expected: &'static [TokenKind]) -> Error {
        match unsupported_construct(token.kind) {
            Some(construct) => Error::new(vec![token.span.clone()], kind::UnsupportedSyntax { construct }),
            None => Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected,
                found: token.kind,
            }),
        }
    }

    /// Returns a span pointing at the end of the input.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the input if the cursor is at the end
    /// of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the token `offset` tokens after the current one, without moving the cursor.
    pub fn peek(&self, offset: usize) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor + offset)
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Parses a value from the given stream of tokens. All the tokens must be consumed by the
    /// parser; if not, an error pointing at the first leftover token is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        let Some(token) = self.current_token() else {
            return Ok(value);
        };

        if token.is(TokenKind::CloseParen) {
            return Err(self.error(kind::UnclosedParenthesis { opening: false }));
        }
        match unsupported_construct(token.kind) {
            Some(construct) => Err(self.error(kind::UnsupportedSyntax { construct })),
            None => Err(self.error(kind::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of comparisons (`==`, `<`, `<=`, `>` and `>=`).
    Compare,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`**`).
    Pow,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::{bindings::Bindings, tokenizer::tokenize_complete, transform};

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{Literal, LiteralKind},
        paren::Paren,
        unary::Unary,
    };
    use op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    /// Parses the input after running the transform passes with the default bindings.
    fn parse(input: &str) -> Result<Expr, Error> {
        let tokens = transform::apply(tokenize_complete(input).unwrap(), &Bindings::default());
        Parser::new(tokens).try_parse_full::<Expr>()
    }

    fn literal(kind: LiteralKind, lexeme: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal { kind, lexeme: lexeme.to_owned(), span })
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), literal(LiteralKind::Integer, "16", 0..2));
    }

    #[test]
    fn literal_decimal() {
        assert_eq!(parse("3.14").unwrap(), literal(LiteralKind::Decimal, "3.14", 0..4));
    }

    #[test]
    fn binary_precedence() {
        let expr = parse("1 + 2 * x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(literal(LiteralKind::Integer, "1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(literal(LiteralKind::Integer, "2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, span: 6..7 },
                rhs: Box::new(literal(LiteralKind::Symbol, "x", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("x**y**z").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(literal(LiteralKind::Symbol, "x", 0..1)),
            op: BinOp { kind: BinOpKind::Pow, span: 1..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(literal(LiteralKind::Symbol, "y", 3..4)),
                op: BinOp { kind: BinOpKind::Pow, span: 4..6 },
                rhs: Box::new(literal(LiteralKind::Symbol, "z", 6..7)),
                span: 3..7,
            })),
            span: 0..7,
        }));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let expr = parse("-x**2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(literal(LiteralKind::Symbol, "x", 1..2)),
                op: BinOp { kind: BinOpKind::Pow, span: 2..4 },
                rhs: Box::new(literal(LiteralKind::Integer, "2", 4..5)),
                span: 1..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn negative_exponent() {
        let expr = parse("2**-x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(literal(LiteralKind::Integer, "2", 0..1)),
            op: BinOp { kind: BinOpKind::Pow, span: 1..3 },
            rhs: Box::new(Expr::Unary(Unary {
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 3..4 },
                operand: Box::new(literal(LiteralKind::Symbol, "x", 4..5)),
                span: 3..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn call_with_arguments() {
        let expr = parse("log(x, 2)").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: "log".to_owned(),
            args: vec![
                literal(LiteralKind::Symbol, "x", 4..5),
                literal(LiteralKind::Integer, "2", 7..8),
            ],
            span: 0..9,
            name_span: 0..3,
        }));
    }

    #[test]
    fn parenthesized() {
        let expr = parse("(x)").unwrap();
        assert_eq!(expr, Expr::Paren(Paren {
            expr: Box::new(literal(LiteralKind::Symbol, "x", 1..2)),
            span: 0..3,
        }));
    }

    #[test]
    fn comparison_chain_parses() {
        let expr = parse("1 < x < 2").unwrap();
        let Expr::Binary(outer) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(outer.op.kind, BinOpKind::Less);
        assert!(matches!(*outer.lhs, Expr::Binary(ref inner) if inner.op.kind == BinOpKind::Less));
    }

    #[test]
    fn errors() {
        let message = |input: &str| parse(input).unwrap_err().kind.message();
        assert_eq!(message("x +"), "unexpected end of input");
        assert_eq!(message("()"), "missing expression inside parenthesis");
        assert_eq!(message("(x + 1"), "unclosed parenthesis");
        assert_eq!(message("x + 1)"), "unclosed parenthesis");
        assert_eq!(message("1, 2"), "tuples are not supported");
        assert_eq!(message("(1, 2)"), "tuples are not supported");
        assert_eq!(message("x.y"), "attribute accesses are not supported");
        assert_eq!(message("x ± 1"), "`±` operators are not supported");
        assert_eq!(message("x = 1"), "assignments are not supported");
        assert_eq!(message("sin x"), "expected end of input");
        assert_eq!(message("* x"), "unexpected token");
    }

    #[test]
    fn error_spans() {
        assert_eq!(parse("(x + 1").unwrap_err().spans, vec![0..1]);
        assert_eq!(parse("x + ").unwrap_err().spans, vec![3..3]);
    }
}
