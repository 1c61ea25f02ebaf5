//! Constructors for [`Expr`].
//!
//! Literal and symbol constructors always build the literal. Every composite constructor takes an
//! `evaluate` flag:
//!
//! - With `evaluate = false`, the operands are stored exactly as given. The only adjustment is that
//! a sum or product of a single operand is that operand, and an empty sum or product is `0` or `1`.
//! - With `evaluate = true`, the constructor applies a small set of canonicalizations: nested sums
//! and products are flattened, numeric literals are folded, double negations cancel, even
//! functions absorb a negated argument while odd functions pull it out, `log(x, b)` becomes
//! `log(x)/log(b)`, and `>` / `>=` relations are turned around into `<` / `<=`.
//!
//! [`Func::Sqrt`] and [`Func::Factorial`] are numeric primitives: they fold perfect squares and
//! small factorials regardless of the flag.

use crate::{
    error::{ConstructionError, FACTORIAL_LIMIT},
    func::{Func, Parity, RelOp},
    primitive::{float_from_str, int},
};
use rug::{Float, Integer, Rational};
use super::{number::Number, Expr};

/// Removes a single layer of negation from the expression, if it has one.
fn strip_neg(expr: Expr) -> Result<Expr, Expr> {
    match expr {
        Expr::Neg(inner) => Ok(*inner),
        Expr::Integer(n) if n < 0 => Ok(Expr::Integer(-n)),
        Expr::Rational(n) if n < 0 => Ok(Expr::Rational(-n)),
        Expr::Decimal(n) if n.is_sign_negative() && !n.is_zero() => Ok(Expr::Decimal(-n)),
        other => Err(other),
    }
}

/// Folds the numeric literals among `items` into one number with `op`, placing it first.
fn fold_numbers(
    items: Vec<Expr>,
    identity: Number,
    op: fn(Number, Number) -> Number,
) -> (Option<Number>, Vec<Expr>) {
    let mut acc: Option<Number> = None;
    let mut rest = Vec::with_capacity(items.len());
    for item in items {
        match Number::from_expr(&item) {
            Some(num) => {
                acc = Some(match acc {
                    Some(acc) => op(acc, num),
                    None => op(identity.clone(), num),
                });
            },
            None => rest.push(item),
        }
    }
    (acc, rest)
}

impl Expr {
    /// Creates an integer literal.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Integer(int(n))
    }

    /// Creates a rational literal `numer / denom` in lowest terms. A rational with denominator one
    /// is an [`Expr::Integer`].
    pub fn rational(numer: Integer, denom: Integer) -> Result<Self, ConstructionError> {
        if denom == 0 {
            return Err(ConstructionError::ZeroDenominator);
        }
        Ok(Number::Exact(Rational::from((numer, denom))).into_expr())
    }

    /// Creates a decimal literal.
    pub fn decimal(n: Float) -> Self {
        Self::Decimal(n)
    }

    /// Creates a decimal literal from its textual form, such as `1.5` or `2e-3`.
    pub fn decimal_from_str(s: &str) -> Result<Self, ConstructionError> {
        float_from_str(s).map(Self::Decimal)
    }

    /// Creates a symbol with exactly the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates the sum of the given terms.
    pub fn add(terms: Vec<Expr>, evaluate: bool) -> Self {
        if !evaluate {
            return Self::Add(terms).downgrade();
        }

        let flattened = terms.into_iter()
            .flat_map(|term| match term {
                Self::Add(inner) => inner,
                other => vec![other],
            })
            .collect();
        let (sum, mut rest) = fold_numbers(flattened, Number::from(0), Number::sum);
        if let Some(sum) = sum.filter(|sum| !sum.is_zero()) {
            rest.insert(0, sum.into_expr());
        }
        Self::Add(rest).downgrade()
    }

    /// Creates the product of the given factors.
    pub fn mul(factors: Vec<Expr>, evaluate: bool) -> Self {
        if !evaluate {
            return Self::Mul(factors).downgrade();
        }

        let flattened = factors.into_iter()
            .flat_map(|factor| match factor {
                Self::Mul(inner) => inner,
                other => vec![other],
            })
            .collect();
        let (product, mut rest) = fold_numbers(flattened, Number::from(1), Number::product);
        match product {
            Some(product) if product.is_zero() => return product.into_expr(),
            Some(product) if !product.is_one() => rest.insert(0, product.into_expr()),
            _ => (),
        }
        Self::Mul(rest).downgrade()
    }

    /// Creates the difference `lhs - rhs`.
    pub fn sub(lhs: Expr, rhs: Expr, evaluate: bool) -> Self {
        if evaluate {
            match (Number::from_expr(&lhs), Number::from_expr(&rhs)) {
                (Some(a), Some(b)) => return a.sum(b.negated()).into_expr(),
                (_, Some(b)) if b.is_zero() => return lhs,
                _ => (),
            }
        }
        Self::Sub(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the quotient `lhs / rhs`.
    pub fn div(lhs: Expr, rhs: Expr, evaluate: bool) -> Self {
        if evaluate {
            match (Number::from_expr(&lhs), Number::from_expr(&rhs)) {
                (Some(a), Some(b)) => {
                    if let Some(quotient) = a.quotient(b) {
                        return quotient.into_expr();
                    }
                },
                (_, Some(b)) if b.is_one() => return lhs,
                _ => (),
            }
        }
        Self::Div(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the power `base ** exp`.
    pub fn pow(base: Expr, exp: Expr, evaluate: bool) -> Self {
        if evaluate {
            match (Number::from_expr(&base), Number::from_expr(&exp)) {
                (Some(a), Some(b)) => {
                    if let Some(power) = a.power(b) {
                        return power.into_expr();
                    }
                },
                (_, Some(b)) if b.is_one() => return base,
                (_, Some(b)) if b.is_zero() => return Self::integer(1),
                _ => (),
            }
        }
        Self::Pow(Box::new(base), Box::new(exp))
    }

    /// Creates the negation `-expr`.
    pub fn neg(expr: Expr, evaluate: bool) -> Self {
        if evaluate {
            if let Some(num) = Number::from_expr(&expr) {
                return num.negated().into_expr();
            }
            if let Self::Neg(inner) = expr {
                return *inner;
            }
        }
        Self::Neg(Box::new(expr))
    }

    /// Creates the relation `lhs op rhs`. Relations never evaluate to a truth value, even between
    /// two numbers.
    pub fn relation(lhs: Expr, op: RelOp, rhs: Expr, evaluate: bool) -> Self {
        if evaluate && matches!(op, RelOp::Gt | RelOp::Ge) {
            return Self::Relation(Box::new(rhs), op.flip(), Box::new(lhs));
        }
        Self::Relation(Box::new(lhs), op, Box::new(rhs))
    }

    /// Applies the function to the given arguments.
    ///
    /// Returns an error if the number of arguments does not match the function's arity, if a
    /// derivative is taken with respect to something other than a symbol, or if a factorial is
    /// applied to a literal larger than [`FACTORIAL_LIMIT`].
    pub fn call(func: Func, mut args: Vec<Expr>, evaluate: bool) -> Result<Self, ConstructionError> {
        check_arity(func, args.len())?;

        match func {
            Func::Factorial => {
                if let Some(num) = Number::from_expr(&args[0]) {
                    if num.exceeds(FACTORIAL_LIMIT) {
                        return Err(ConstructionError::FactorialTooLarge(args[0].to_string()));
                    }
                    if let Some(value) = num.factorial(FACTORIAL_LIMIT) {
                        return Ok(value.into_expr());
                    }
                }
            },
            Func::Sqrt => {
                if let Some(root) = Number::from_expr(&args[0]).and_then(|num| num.exact_sqrt()) {
                    return Ok(root.into_expr());
                }
            },
            Func::Derivative => check_derivative_variables(&args[1..])?,
            _ => (),
        }

        if !evaluate {
            return Ok(Self::Call(func, args));
        }

        match func {
            Func::Log if args.len() == 2 => {
                let base = args.pop().map(|base| Self::Call(Func::Log, vec![base]));
                let value = Self::Call(Func::Log, args);
                return Ok(match base {
                    Some(base) => Self::div(value, base, true),
                    None => value,
                });
            },
            Func::Log if matches!(Number::from_expr(&args[0]), Some(n) if n.is_one()) => {
                return Ok(Self::integer(0));
            },
            Func::Abs => {
                let arg = args.remove(0);
                if let Some(num) = Number::from_expr(&arg) {
                    return Ok(num.abs().into_expr());
                }
                let arg = strip_neg(arg).unwrap_or_else(|arg| arg);
                return Ok(Self::Call(func, vec![arg]));
            },
            _ => (),
        }

        match func.parity() {
            Parity::Even => {
                let arg = strip_neg(args.remove(0)).unwrap_or_else(|arg| arg);
                Ok(Self::Call(func, vec![arg]))
            },
            Parity::Odd => match strip_neg(args.remove(0)) {
                Ok(arg) => Ok(Self::neg(Self::Call(func, vec![arg]), true)),
                Err(arg) => Ok(Self::Call(func, vec![arg])),
            },
            Parity::None => Ok(Self::Call(func, args)),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// A sum or product of zero operands becomes the integer `0` or `1`, and a sum or product of
    /// one operand becomes that operand.
    fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::integer(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::integer(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }
}

/// Checks that a function accepts the given number of arguments.
fn check_arity(func: Func, given: usize) -> Result<(), ConstructionError> {
    let (min, max) = func.arity();
    let ok = given >= min && max.map_or(true, |max| given <= max);
    if ok {
        return Ok(());
    }

    let expected = match max {
        Some(max) if max == min => format!("{} argument{}", min, if min == 1 { "" } else { "s" }),
        Some(max) => format!("{} to {} arguments", min, max),
        None => format!("at least {} arguments", min),
    };
    Err(ConstructionError::Arity { name: func.name(), expected, given })
}

/// Checks the variables of a derivative: each must be a symbol, optionally followed by a positive
/// integer count.
fn check_derivative_variables(vars: &[Expr]) -> Result<(), ConstructionError> {
    let mut after_symbol = false;
    for var in vars {
        match var {
            Expr::Symbol(_) => after_symbol = true,
            Expr::Integer(n) if after_symbol && *n > 0 => after_symbol = false,
            other => return Err(ConstructionError::InvalidDerivativeVariable(other.to_string())),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn suppressed_constructors_keep_structure() {
        let expr = Expr::add(vec![
            Expr::integer(1),
            Expr::add(vec![Expr::integer(2), sym("x")], false),
        ], false);
        assert_eq!(expr, Expr::Add(vec![
            Expr::integer(1),
            Expr::Add(vec![Expr::integer(2), sym("x")]),
        ]));

        let expr = Expr::mul(vec![Expr::integer(0), sym("x")], false);
        assert_eq!(expr, Expr::Mul(vec![Expr::integer(0), sym("x")]));

        let expr = Expr::neg(Expr::neg(sym("x"), false), false);
        assert_eq!(expr, Expr::Neg(Box::new(Expr::Neg(Box::new(sym("x"))))));
    }

    #[test]
    fn evaluating_constructors_fold() {
        let expr = Expr::add(vec![
            Expr::integer(1),
            Expr::add(vec![Expr::integer(2), sym("x")], false),
        ], true);
        assert_eq!(expr, Expr::Add(vec![Expr::integer(3), sym("x")]));

        assert_eq!(Expr::mul(vec![Expr::integer(0), sym("x")], true), Expr::integer(0));
        assert_eq!(Expr::neg(Expr::neg(sym("x"), false), true), sym("x"));
        assert_eq!(Expr::pow(sym("x"), Expr::integer(1), true), sym("x"));
        assert_eq!(
            Expr::div(Expr::integer(1), Expr::integer(2), true),
            Expr::rational(int(1), int(2)).unwrap(),
        );
    }

    #[test]
    fn single_operand_sums_collapse() {
        assert_eq!(Expr::add(vec![sym("x")], false), sym("x"));
        assert_eq!(Expr::mul(Vec::new(), false), Expr::integer(1));
    }

    #[test]
    fn function_parity() {
        let neg_x = Expr::neg(sym("x"), false);

        let kept = Expr::call(Func::Cos, vec![neg_x.clone()], false).unwrap();
        assert_eq!(kept, Expr::Call(Func::Cos, vec![neg_x.clone()]));
        assert_ne!(kept, Expr::call(Func::Cos, vec![sym("x")], false).unwrap());

        let even = Expr::call(Func::Cos, vec![neg_x.clone()], true).unwrap();
        assert_eq!(even, Expr::Call(Func::Cos, vec![sym("x")]));

        let odd = Expr::call(Func::Sin, vec![neg_x], true).unwrap();
        assert_eq!(odd, Expr::Neg(Box::new(Expr::Call(Func::Sin, vec![sym("x")]))));
    }

    #[test]
    fn logarithm_base() {
        let args = vec![sym("x"), Expr::integer(10)];
        let kept = Expr::call(Func::Log, args.clone(), false).unwrap();
        assert_eq!(kept, Expr::Call(Func::Log, args.clone()));

        let expanded = Expr::call(Func::Log, args, true).unwrap();
        assert_eq!(expanded.to_string(), "log(x)/log(10)");
    }

    #[test]
    fn numeric_primitives_ignore_the_flag() {
        assert_eq!(Expr::call(Func::Sqrt, vec![Expr::integer(4)], false).unwrap(), Expr::integer(2));
        assert_eq!(
            Expr::call(Func::Sqrt, vec![Expr::integer(2)], false).unwrap(),
            Expr::Call(Func::Sqrt, vec![Expr::integer(2)]),
        );
        assert_eq!(
            Expr::call(Func::Factorial, vec![Expr::integer(4)], false).unwrap(),
            Expr::integer(24),
        );
    }

    #[test]
    fn factorial_limit() {
        assert_eq!(
            Expr::call(Func::Factorial, vec![Expr::integer(51)], false),
            Err(ConstructionError::FactorialTooLarge("51".to_owned())),
        );
        assert!(Expr::call(Func::Factorial, vec![Expr::integer(50)], false).is_ok());
        assert!(Expr::call(Func::Factorial, vec![sym("n")], false).is_ok());
    }

    #[test]
    fn arity() {
        let err = Expr::call(Func::Sin, vec![sym("x"), sym("y")], false).unwrap_err();
        assert_eq!(err.to_string(), "`sin` takes 1 argument, but 2 were given");

        let err = Expr::call(Func::Log, Vec::new(), false).unwrap_err();
        assert_eq!(err.to_string(), "`log` takes 1 to 2 arguments, but 0 were given");
    }

    #[test]
    fn derivative_variables() {
        let f = Expr::pow(sym("x"), Expr::integer(2), false);
        assert!(Expr::call(Func::Derivative, vec![f.clone(), sym("x")], false).is_ok());
        assert!(Expr::call(Func::Derivative, vec![f.clone(), sym("x"), Expr::integer(2)], false).is_ok());
        assert!(Expr::call(Func::Derivative, vec![f.clone(), Expr::integer(2)], false).is_err());
        assert!(Expr::call(Func::Derivative, vec![f], false).is_err());
    }

    #[test]
    fn relations_stay_relations() {
        let rel = Expr::relation(Expr::integer(1), RelOp::Lt, Expr::integer(2), true);
        assert!(rel.is_relation());

        let flipped = Expr::relation(sym("x"), RelOp::Gt, Expr::integer(1), true);
        assert_eq!(flipped.to_string(), "1 < x");

        let kept = Expr::relation(sym("x"), RelOp::Gt, Expr::integer(1), false);
        assert_eq!(kept.to_string(), "x > 1");
    }

    #[test]
    fn rational_literals() {
        assert_eq!(Expr::rational(int(4), int(2)).unwrap(), Expr::integer(2));
        assert_eq!(Expr::rational(int(1), int(0)), Err(ConstructionError::ZeroDenominator));
    }
}
