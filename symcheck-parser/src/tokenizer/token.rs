use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer and the transform passes.
///
/// [`TokenKind::Integer`], [`TokenKind::Decimal`] and [`TokenKind::Symbol`] are never produced by
/// the tokenizer itself. The transform passes turn [`TokenKind::Number`] and unbound
/// [`TokenKind::Name`] tokens into them.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    /// An integer literal.
    Integer,

    /// A decimal literal.
    Decimal,

    /// A name that is not bound to anything, and so stands for a free symbol.
    Symbol,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("**")]
    Pow,

    #[token("/")]
    Div,

    #[token("^")]
    Caret,

    #[token("==")]
    Eq,

    #[token("=")]
    Assign,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEq,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEq,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(".")]
    Dot,

    #[token("±")]
    PlusMinus,
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from. Tokens inserted by the
    /// transform passes have an empty span.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl<'source> Token<'source> {
    /// Creates a token that does not appear in the source code, placed at the given position.
    pub fn synthetic(kind: TokenKind, lexeme: &'source str, at: usize) -> Self {
        Self { span: at..at, kind, lexeme }
    }

    /// Returns true if the token has the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
