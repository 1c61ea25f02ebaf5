//! The binding table, which decides what each identifier in the input refers to.
//!
//! Every identifier is either bound to something in the table (a constant, a whitelisted
//! function, or an expression constructor) or is a free symbol. The table for a parse is built
//! from three layers, each taking precedence over the next:
//!
//! 1. bindings supplied by the caller,
//! 2. bindings selected with [`Hint`]s,
//! 3. the fixed global table of whitelisted names.

use crate::symbol::is_valid_symbol;
use once_cell::sync::Lazy;
use rug::Rational;
use std::{collections::HashMap, fmt, str::FromStr};
use symcheck_expr::{ConstructionError, Constant, Expr, Func, RelOp};
use thiserror::Error;
use tracing::debug;

/// A function that can be applied to arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callable {
    /// One of the functions of the expression library, applied as-is.
    Func(Func),

    /// A logarithm whose base defaults to 10 when only one argument is given.
    Logarithm,
}

impl Callable {
    /// Applies the function to the given arguments.
    pub fn apply(self, mut args: Vec<Expr>, evaluate: bool) -> Result<Expr, ConstructionError> {
        match self {
            Self::Func(func) => Expr::call(func, args, evaluate),
            Self::Logarithm => {
                if args.len() == 1 {
                    args.push(Expr::integer(10));
                }
                Expr::call(Func::Log, args, evaluate)
            },
        }
    }
}

/// An expression constructor that can be called by name, such as `Rational(1, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructor {
    Add,
    Mul,
    Pow,
    Integer,
    Float,
    Rational,
    Eq,
}

/// An error produced when a constructor is given arguments it cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructorError {
    #[error("takes {0}, but {1} were given")]
    Arity(&'static str, usize),

    #[error("expects numeric literal arguments")]
    NotNumeric,

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl Constructor {
    /// Builds an expression from the given arguments.
    pub fn apply(self, args: Vec<Expr>, evaluate: bool) -> Result<Expr, ConstructorError> {
        let given = args.len();
        match self {
            Self::Add => Ok(Expr::add(args, evaluate)),
            Self::Mul => Ok(Expr::mul(args, evaluate)),
            Self::Pow | Self::Eq => {
                let [lhs, rhs]: [Expr; 2] = args
                    .try_into()
                    .map_err(|_| ConstructorError::Arity("2 arguments", given))?;
                Ok(match self {
                    Self::Pow => Expr::pow(lhs, rhs, evaluate),
                    _ => Expr::relation(lhs, RelOp::Eq, rhs, evaluate),
                })
            },
            Self::Integer => {
                let [arg]: [Expr; 1] = args
                    .try_into()
                    .map_err(|_| ConstructorError::Arity("1 argument", given))?;
                let value = arg.as_number().ok_or(ConstructorError::NotNumeric)?;
                let truncated = value.to_rational()?
                    .map(|r| r.trunc().into_numer_denom().0)
                    .ok_or(ConstructorError::NotNumeric)?;
                Ok(Expr::Integer(truncated))
            },
            Self::Float => {
                let [arg]: [Expr; 1] = args
                    .try_into()
                    .map_err(|_| ConstructorError::Arity("1 argument", given))?;
                let value = arg.as_number().ok_or(ConstructorError::NotNumeric)?;
                Ok(Expr::decimal(value.to_float()))
            },
            Self::Rational => {
                let mut values = args.iter().map(|arg| {
                    let value = arg.as_number().ok_or(ConstructorError::NotNumeric)?;
                    value.to_rational()?.ok_or(ConstructorError::NotNumeric)
                });
                let (numer, denom) = match (values.next(), values.next(), values.next()) {
                    (Some(numer), None, None) => (numer?, Rational::from(1)),
                    (Some(numer), Some(denom), None) => (numer?, denom?),
                    _ => return Err(ConstructorError::Arity("1 to 2 arguments", given)),
                };
                if denom == 0 {
                    return Err(ConstructionError::ZeroDenominator.into());
                }
                let ratio = numer / denom;
                let (numer, denom) = ratio.into_numer_denom();
                Ok(Expr::rational(numer, denom)?)
            },
        }
    }
}

/// What an identifier is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A fixed value, such as π.
    Constant(Expr),

    /// A function that must be applied to arguments.
    Function(Callable),

    /// An expression constructor that must be applied to arguments.
    Type(Constructor),
}

impl Binding {
    /// Returns true if the binding must be applied to arguments.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Type(_))
    }
}

/// The names bound in every parse, unless shadowed by a hint or a caller-supplied binding.
pub static GLOBAL_BINDINGS: Lazy<HashMap<&'static str, Binding>> = Lazy::new(|| {
    use Func::*;

    macro_rules! build {
        ($($name:literal => $binding:expr),* $(,)?) => {
            [
                $(
                    ($name, $binding),
                )*
            ]
                .into_iter()
                .collect::<HashMap<_, _>>()
        };
    }

    let func = |f: Func| Binding::Function(Callable::Func(f));
    let log = Binding::Function(Callable::Logarithm);

    #[allow(unused_mut)]
    let mut table = build! {
        "Integer" => Binding::Type(Constructor::Integer),
        "Float" => Binding::Type(Constructor::Float),
        "Rational" => Binding::Type(Constructor::Rational),
        "Add" => Binding::Type(Constructor::Add),
        "Mul" => Binding::Type(Constructor::Mul),
        "Pow" => Binding::Type(Constructor::Pow),
        "Eq" => Binding::Type(Constructor::Eq),
        "Derivative" => func(Derivative),
        "diff" => func(Derivative),
        "sin" => func(Sin), "cos" => func(Cos), "tan" => func(Tan),
        "Sin" => func(Sin), "Cos" => func(Cos), "Tan" => func(Tan),
        "arcsin" => func(Asin), "arccos" => func(Acos), "arctan" => func(Atan),
        "asin" => func(Asin), "acos" => func(Acos), "atan" => func(Atan),
        "ArcSin" => func(Asin), "ArcCos" => func(Acos), "ArcTan" => func(Atan),
        "sinh" => func(Sinh), "cosh" => func(Cosh), "tanh" => func(Tanh),
        "arcsinh" => func(Asinh), "arccosh" => func(Acosh), "arctanh" => func(Atanh),
        "asinh" => func(Asinh), "acosh" => func(Acosh), "atanh" => func(Atanh),
        "cosec" => func(Csc), "sec" => func(Sec), "cot" => func(Cot),
        "Csc" => func(Csc), "Sec" => func(Sec), "Cot" => func(Cot),
        "arccosec" => func(Acsc), "arcsec" => func(Asec), "arccot" => func(Acot),
        "acsc" => func(Acsc), "asec" => func(Asec), "acot" => func(Acot),
        "ArcCsc" => func(Acsc), "ArcSec" => func(Asec), "ArcCot" => func(Acot),
        "cosech" => func(Csch), "sech" => func(Sech), "coth" => func(Coth),
        "exp" => func(Exp), "log" => log.clone(), "ln" => func(Log),
        "Exp" => func(Exp), "Log" => log, "Ln" => func(Log),
        "sqrt" => func(Sqrt), "abs" => func(Abs),
        "Sqrt" => func(Sqrt), "Abs" => func(Abs),
    };

    #[cfg(feature = "factorial")]
    table.extend([("factorial", func(Factorial)), ("Factorial", func(Factorial))]);

    table
});

/// A named hint selecting one interpretation of an otherwise ambiguous identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    /// `pi` is the constant π rather than the symbol `pi`.
    ConstantPi,

    /// `e` is Euler's number rather than the symbol `e`.
    ConstantE,

    /// `i` is the imaginary unit rather than the symbol `i`.
    ImaginaryI,

    /// `j` is the imaginary unit rather than the symbol `j`.
    ImaginaryJ,

    /// `log` and `Log` are the natural logarithm rather than the base-10 logarithm.
    NaturalLogarithm,
}

/// The error returned when parsing an unknown hint key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hint `{0}`")]
pub struct UnknownHint(pub String);

impl Hint {
    /// All hints, in the order their bindings are applied.
    pub const ALL: [Hint; 5] = [
        Hint::ConstantPi,
        Hint::ConstantE,
        Hint::ImaginaryI,
        Hint::ImaginaryJ,
        Hint::NaturalLogarithm,
    ];

    /// Returns the key that selects this hint.
    pub fn key(self) -> &'static str {
        match self {
            Self::ConstantPi => "constant_pi",
            Self::ConstantE => "constant_e",
            Self::ImaginaryI => "imaginary_i",
            Self::ImaginaryJ => "imaginary_j",
            Self::NaturalLogarithm => "natural_logarithm",
        }
    }

    /// Returns the bindings this hint adds to the table.
    pub fn bindings(self) -> Vec<(&'static str, Binding)> {
        let natural_log = || Binding::Function(Callable::Func(Func::Log));
        match self {
            Self::ConstantPi => vec![("pi", Binding::Constant(Expr::Constant(Constant::Pi)))],
            Self::ConstantE => vec![("e", Binding::Constant(Expr::Constant(Constant::E)))],
            Self::ImaginaryI => vec![("i", Binding::Constant(Expr::Constant(Constant::I)))],
            Self::ImaginaryJ => vec![("j", Binding::Constant(Expr::Constant(Constant::I)))],
            Self::NaturalLogarithm => vec![("log", natural_log()), ("Log", natural_log())],
        }
    }
}

impl FromStr for Hint {
    type Err = UnknownHint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|hint| hint.key() == s)
            .ok_or_else(|| UnknownHint(s.to_owned()))
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The binding table used for a single parse.
#[derive(Debug, Clone)]
pub struct Bindings {
    table: HashMap<String, Binding>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new::<&str>(None, &[])
    }
}

impl Bindings {
    /// Builds the table from the global bindings, the bindings of the given hints, and the
    /// caller's local bindings, in increasing order of precedence.
    ///
    /// Unknown hint keys are ignored, as are local bindings whose names are not valid symbol
    /// names.
    pub fn new<S: AsRef<str>>(local: Option<&HashMap<String, Binding>>, hints: &[S]) -> Self {
        let mut table = GLOBAL_BINDINGS
            .iter()
            .map(|(name, binding)| (name.to_string(), binding.clone()))
            .collect::<HashMap<_, _>>();

        for key in hints {
            match key.as_ref().parse::<Hint>() {
                Ok(hint) => table.extend(
                    hint.bindings().into_iter().map(|(name, binding)| (name.to_owned(), binding)),
                ),
                Err(err) => debug!("ignoring hint: {}", err),
            }
        }

        for (name, binding) in local.into_iter().flatten() {
            if is_valid_symbol(name) {
                table.insert(name.clone(), binding.clone());
            } else {
                debug!(name = name.as_str(), "ignoring local binding with an invalid name");
            }
        }

        Self { table }
    }

    /// Returns what the identifier is bound to, or [`None`] if it is a free symbol.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.table.get(name)
    }

    /// Returns true if the identifier is bound to something.
    pub fn is_bound(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
}
