//! The expression tree produced by parsing.
//!
//! Unlike a typical computer algebra representation, [`Expr`] keeps the structure the user wrote:
//! `x - y` is a [`Expr::Sub`], not the sum of `x` and `-1 * y`, and `cos(-x)` keeps its negation.
//! Every composite node is built through a constructor taking an `evaluate` flag, such as
//! [`Expr::add`]; with `evaluate = false` the constructor stores its operands exactly as given.
//!
//! # Equality
//!
//! The [`PartialEq`] implementation compares trees **structurally**. `x + y` and `y + x` are
//! different trees, and so are `1/2` (a [`Expr::Div`] of two integers) and the rational literal
//! `1/2`. Deciding whether two trees are mathematically equivalent is left to the consumer of the
//! tree.

mod build;
mod number;

pub use number::Number;

use crate::func::{Constant, Func, RelOp};
use rug::{float::Round, Float, Integer, Rational};
use std::{cmp::Ordering, collections::BTreeSet, fmt::{self, Display, Formatter}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mathematical expression, or a relation between two expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// An integer literal, such as `2` or `144`.
    Integer(Integer),

    /// An exact fraction that is not an integer, such as `1/2`.
    Rational(Rational),

    /// A decimal literal, such as `3.14` or `0.5`.
    Decimal(Float),

    /// A free symbol, such as `x` or `theta`.
    Symbol(String),

    /// A named constant, such as `pi`.
    Constant(Constant),

    /// The negation of an expression, `-x`.
    Neg(Box<Expr>),

    /// Terms added together.
    Add(Vec<Expr>),

    /// Factors multiplied together.
    Mul(Vec<Expr>),

    /// The difference of two expressions.
    Sub(Box<Expr>, Box<Expr>),

    /// The quotient of two expressions.
    Div(Box<Expr>, Box<Expr>),

    /// An expression raised to a power.
    Pow(Box<Expr>, Box<Expr>),

    /// A function applied to its arguments, such as `sin(x)` or `log(x, 10)`.
    Call(Func, Vec<Expr>),

    /// A relation between two expressions, such as `x == 1` or `x <= 2`.
    Relation(Box<Expr>, RelOp, Box<Expr>),
}

/// Significant digits written for a decimal literal. Fewer than the precision of the literal, so
/// that `0.1` is not written with a trailing rounding error.
const DECIMAL_DIGITS: usize = 145;

/// Binding strength of each node kind when displayed, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Relation,
    Sum,
    Product,
    Neg,
    Pow,
    Atom,
}

impl Expr {
    fn precedence(&self) -> Precedence {
        match self {
            Self::Relation(..) => Precedence::Relation,
            Self::Add(_) | Self::Sub(..) => Precedence::Sum,
            Self::Mul(_) | Self::Div(..) => Precedence::Product,
            Self::Neg(_) => Precedence::Neg,
            Self::Pow(..) => Precedence::Pow,
            Self::Integer(n) if *n < 0 => Precedence::Neg,
            Self::Rational(_) => Precedence::Product,
            Self::Decimal(n) if n.is_sign_negative() => Precedence::Neg,
            _ => Precedence::Atom,
        }
    }

    /// If the expression is a [`Expr::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Integer(int) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Expr::Symbol`], returns the name of the symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the value of the expression if it is a numeric literal, or the negation of one.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Neg(inner) => inner.as_number().map(Number::negated),
            _ => Number::from_expr(self),
        }
    }

    /// Returns true if the expression is a numeric literal.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Rational(_) | Self::Decimal(_))
    }

    /// Returns true if the expression is a [`Expr::Relation`].
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(..))
    }

    /// Returns the direct children of this expression.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Integer(_) | Self::Rational(_) | Self::Decimal(_)
                | Self::Symbol(_) | Self::Constant(_) => Vec::new(),
            Self::Neg(expr) => vec![expr],
            Self::Add(exprs) | Self::Mul(exprs) | Self::Call(_, exprs) => exprs.iter().collect(),
            Self::Sub(lhs, rhs) | Self::Div(lhs, rhs) | Self::Pow(lhs, rhs)
                | Self::Relation(lhs, _, rhs) => vec![lhs, rhs],
        }
    }

    /// Returns the names of all symbols appearing in the expression, in sorted order.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            if let Self::Symbol(name) = expr {
                out.insert(name.as_str());
            }
            stack.extend(expr.children());
        }
        out
    }
}

/// Writes the expression, wrapped in parentheses if `wrap` is true.
fn write_wrapped(f: &mut Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes the items separated by `sep`. The first item is wrapped if it binds looser than `prec`,
/// and every other item if it binds no tighter, so `x*(y/z)` is not written as `x*y/z`.
fn write_joined(
    f: &mut Formatter<'_>,
    items: &[Expr],
    sep: &str,
    prec: Precedence,
) -> fmt::Result {
    let mut iter = items.iter();
    if let Some(item) = iter.next() {
        write_wrapped(f, item, item.precedence() < prec)?;
        for item in iter {
            write!(f, "{}", sep)?;
            write_wrapped(f, item, item.precedence() <= prec)?;
        }
    }
    Ok(())
}

/// Writes a [`Float`] so that it always reads as a decimal, e.g. `5.0` rather than `5`. Very large
/// and very small values use an exponent, such as `1.5e30`.
fn write_decimal(f: &mut Formatter<'_>, num: &Float) -> fmt::Result {
    if !num.is_normal() {
        if num.is_zero() {
            return write!(f, "0.0");
        }
        return write!(f, "{}", num.to_f64());
    }

    let (sign, digits, exponent) = num.to_sign_string_exp_round(10, Some(DECIMAL_DIGITS), Round::Nearest);
    let Some(exponent) = exponent else {
        return write!(f, "{}", num.to_f64());
    };
    let sign = if sign { "-" } else { "" };

    // the value is 0.{digits} * 10^exponent
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        digits => digits,
    };
    if !(-5..=21).contains(&exponent) {
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        return write!(f, "{}{}.{}e{}", sign, first, rest, exponent - 1);
    }

    match exponent.cmp(&0) {
        Ordering::Less | Ordering::Equal => {
            write!(f, "{}0.{}{}", sign, "0".repeat(exponent.unsigned_abs() as usize), digits)
        },
        Ordering::Greater => {
            let exponent = exponent as usize;
            if digits.len() <= exponent {
                write!(f, "{}{}{}.0", sign, digits, "0".repeat(exponent - digits.len()))
            } else {
                write!(f, "{}{}.{}", sign, &digits[..exponent], &digits[exponent..])
            }
        },
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Rational(num) => write!(f, "{}", num),
            Self::Decimal(num) => write_decimal(f, num),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Constant(c) => write!(f, "{}", c),
            Self::Neg(expr) => {
                write!(f, "-")?;
                write_wrapped(f, expr, expr.precedence() <= prec)
            },
            Self::Add(terms) => write_joined(f, terms, " + ", Precedence::Sum),
            Self::Mul(factors) => write_joined(f, factors, "*", Precedence::Product),
            Self::Sub(lhs, rhs) => {
                write_wrapped(f, lhs, lhs.precedence() < prec)?;
                write!(f, " - ")?;
                write_wrapped(f, rhs, rhs.precedence() <= prec)
            },
            Self::Div(lhs, rhs) => {
                write_wrapped(f, lhs, lhs.precedence() < prec)?;
                write!(f, "/")?;
                write_wrapped(f, rhs, rhs.precedence() <= prec)
            },
            Self::Pow(base, exp) => {
                write_wrapped(f, base, base.precedence() <= prec)?;
                write!(f, "**")?;
                write_wrapped(f, exp, exp.precedence() < prec)
            },
            Self::Call(func, args) => {
                write!(f, "{}(", func)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
            Self::Relation(lhs, op, rhs) => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::int;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn display_operators() {
        let expr = Expr::add(vec![
            Expr::pow(sym("x"), Expr::integer(2), false),
            Expr::mul(vec![Expr::integer(3), sym("y")], false),
        ], false);
        assert_eq!(expr.to_string(), "x**2 + 3*y");
    }

    #[test]
    fn display_parenthesizes_looser_operands() {
        let sum = Expr::add(vec![sym("x"), sym("y")], false);
        let expr = Expr::pow(sum.clone(), Expr::integer(2), false);
        assert_eq!(expr.to_string(), "(x + y)**2");

        let expr = Expr::div(Expr::integer(1), Expr::mul(vec![sym("x"), sym("y")], false), false);
        assert_eq!(expr.to_string(), "1/(x*y)");

        let expr = Expr::sub(sym("a"), sum, false);
        assert_eq!(expr.to_string(), "a - (x + y)");
    }

    #[test]
    fn display_keeps_nested_structure() {
        let quotient = Expr::div(sym("y"), sym("z"), false);
        let expr = Expr::mul(vec![sym("x"), quotient.clone()], false);
        assert_eq!(expr.to_string(), "x*(y/z)");

        let expr = Expr::mul(vec![quotient, sym("x")], false);
        assert_eq!(expr.to_string(), "y/z*x");

        let expr = Expr::add(vec![sym("a"), Expr::sub(sym("b"), sym("c"), false)], false);
        assert_eq!(expr.to_string(), "a + (b - c)");

        let expr = Expr::add(vec![Expr::sub(sym("a"), sym("b"), false), sym("c")], false);
        assert_eq!(expr.to_string(), "a - b + c");

        let expr = Expr::mul(vec![sym("x"), Expr::rational(int(1), int(2)).unwrap()], false);
        assert_eq!(expr.to_string(), "x*(1/2)");
    }

    #[test]
    fn display_negation() {
        let expr = Expr::call(Func::Cos, vec![Expr::neg(sym("x"), false)], false).unwrap();
        assert_eq!(expr.to_string(), "cos(-x)");

        let expr = Expr::neg(Expr::neg(sym("x"), false), false);
        assert_eq!(expr.to_string(), "-(-x)");

        let expr = Expr::pow(sym("x"), Expr::neg(Expr::integer(1), false), false);
        assert_eq!(expr.to_string(), "x**(-1)");
    }

    #[test]
    fn display_literals() {
        assert_eq!(Expr::decimal_from_str("5.").unwrap().to_string(), "5.0");
        assert_eq!(Expr::decimal_from_str("0.25").unwrap().to_string(), "0.25");
        assert_eq!(Expr::decimal_from_str("0.1").unwrap().to_string(), "0.1");
        assert_eq!(Expr::decimal_from_str("120.5").unwrap().to_string(), "120.5");
        assert_eq!(Expr::decimal_from_str("2e3").unwrap().to_string(), "2000.0");
        assert_eq!(Expr::decimal_from_str("1.5e30").unwrap().to_string(), "1.5e30");
        assert_eq!(Expr::decimal_from_str("2e-7").unwrap().to_string(), "2.0e-7");
        assert_eq!(Expr::decimal_from_str("0.0").unwrap().to_string(), "0.0");
        assert_eq!(
            Expr::decimal_from_str("0.12345678901234567890123").unwrap().to_string(),
            "0.12345678901234567890123",
        );
        assert_eq!(Expr::rational(int(2), int(4)).unwrap().to_string(), "1/2");
        assert_eq!(Expr::Constant(Constant::Pi).to_string(), "pi");
    }

    #[test]
    fn display_relation() {
        let expr = Expr::relation(sym("x"), RelOp::Eq, Expr::integer(1), false);
        assert_eq!(expr.to_string(), "x == 1");
    }

    #[test]
    fn collects_symbols() {
        let expr = Expr::add(vec![
            sym("y"),
            Expr::call(Func::Sin, vec![sym("x")], false).unwrap(),
            sym("y"),
        ], false);
        assert_eq!(expr.symbols().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
