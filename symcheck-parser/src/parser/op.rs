//! Structs to help parse binary and unary operators.

use crate::tokenizer::{Token, TokenKind};
use super::{Associativity, Precedence};
use std::ops::Range;

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOpKind {
    Neg,
    Plus,
}

/// A unary operator that takes one operand, appearing to the left of it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the unary operator the token stands for, if any.
    pub fn from_token(token: &Token) -> Option<Self> {
        let kind = match token.kind {
            TokenKind::Sub => UnaryOpKind::Neg,
            TokenKind::Add => UnaryOpKind::Plus,
            _ => return None,
        };
        Some(Self { kind, span: token.span.clone() })
    }

    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOpKind {
    Pow,
    Mul,
    Div,
    Add,
    Sub,
    Eq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Pow => Precedence::Pow,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Eq | Self::Less | Self::LessEq | Self::Greater | Self::GreaterEq => Precedence::Compare,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// Returns true if the operation is a comparison.
    pub fn is_comparison(&self) -> bool {
        self.precedence() == Precedence::Compare
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the binary operator the token stands for, if any.
    pub fn from_token(token: &Token) -> Option<Self> {
        let kind = match token.kind {
            TokenKind::Pow => BinOpKind::Pow,
            TokenKind::Mul => BinOpKind::Mul,
            TokenKind::Div => BinOpKind::Div,
            TokenKind::Add => BinOpKind::Add,
            TokenKind::Sub => BinOpKind::Sub,
            TokenKind::Eq => BinOpKind::Eq,
            TokenKind::Less => BinOpKind::Less,
            TokenKind::LessEq => BinOpKind::LessEq,
            TokenKind::Greater => BinOpKind::Greater,
            TokenKind::GreaterEq => BinOpKind::GreaterEq,
            _ => return None,
        };
        Some(Self { kind, span: token.span.clone() })
    }

    /// Returns the precedence of the binary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operator.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}
