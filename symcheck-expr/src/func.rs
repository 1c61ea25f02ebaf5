//! The fixed vocabulary of named functions, constants and relational operators.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named function that can be applied to arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Csc,
    Sec,
    Cot,
    Acsc,
    Asec,
    Acot,
    Csch,
    Sech,
    Coth,
    Exp,

    /// The logarithm. With one argument it is the natural logarithm; the optional second argument
    /// is the base.
    Log,
    Sqrt,
    Abs,
    Factorial,

    /// An unevaluated derivative, `Derivative(expr, x, [n,] y, ...)`.
    Derivative,
}

/// How a function behaves when its argument is negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parity {
    /// `f(-x) = f(x)`
    Even,

    /// `f(-x) = -f(x)`
    Odd,
    None,
}

impl Func {
    /// Returns the name used when displaying an application of this function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Csc => "csc",
            Self::Sec => "sec",
            Self::Cot => "cot",
            Self::Acsc => "acsc",
            Self::Asec => "asec",
            Self::Acot => "acot",
            Self::Csch => "csch",
            Self::Sech => "sech",
            Self::Coth => "coth",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "Abs",
            Self::Factorial => "factorial",
            Self::Derivative => "Derivative",
        }
    }

    /// Returns the minimum and (if bounded) maximum number of arguments the function accepts.
    pub fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::Log => (1, Some(2)),
            Self::Derivative => (2, None),
            _ => (1, Some(1)),
        }
    }

    /// Returns true if the function computes its value eagerly even when evaluation is
    /// suppressed, because it is a numeric primitive rather than an operator.
    pub fn is_exempt(self) -> bool {
        matches!(self, Self::Sqrt | Self::Factorial)
    }

    pub(crate) fn parity(self) -> Parity {
        match self {
            Self::Cos | Self::Sec | Self::Cosh | Self::Sech => Parity::Even,
            Self::Sin | Self::Tan | Self::Asin | Self::Atan
                | Self::Sinh | Self::Tanh | Self::Asinh | Self::Atanh
                | Self::Csc | Self::Cot | Self::Acsc
                | Self::Csch | Self::Coth => Parity::Odd,
            _ => Parity::None,
        }
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number.
    E,

    /// The imaginary unit.
    I,
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pi => write!(f, "pi"),
            Self::E => write!(f, "E"),
            Self::I => write!(f, "I"),
        }
    }
}

/// The operator of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelOp {
    /// Returns the operator that relates the two sides in the opposite order, so that `a op b` is
    /// `b op.flip() a`.
    pub fn flip(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
        }
    }
}

impl Display for RelOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}
