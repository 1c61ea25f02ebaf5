use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    op::UnaryOp,
    Parser,
};
use std::ops::Range;
use symcheck_error::Error;

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    ///
    /// The operand of a unary operator extends over any exponentiation that follows it, so `-x**2`
    /// is the negation of `x**2`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Some(op) = input.current_token().and_then(UnaryOp::from_token) else {
            return Expr::parse_primary(input);
        };
        input.next_token()?;

        let op_precedence = op.precedence();
        let start_span = op.span.start;
        let operand = {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op_precedence)?
        };
        let end_span = operand.span().end;
        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        }))
    }
}
