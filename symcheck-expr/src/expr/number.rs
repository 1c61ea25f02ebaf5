//! Numeric folding used by the evaluating constructors.

use crate::{error::ConstructionError, primitive::{float, int, rational_to_int}};
use rug::{ops::Pow, Float, Integer, Rational};
use super::Expr;

/// The largest exponent magnitude folded by [`Number::power`].
const MAX_EXPONENT: i32 = 64;

/// The largest bit length of a base folded by [`Number::power`].
const MAX_BASE_BITS: u32 = 64;

/// The largest binary exponent magnitude of a decimal converted by [`Number::to_rational`].
pub const MAX_EXACT_EXPONENT: i32 = 4096;

/// The value of a numeric literal, either exact or inexact.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Exact(Rational),
    Inexact(Float),
}

impl Number {
    /// Reads the numeric literal out of an expression, if it is one.
    pub(crate) fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Integer(n) => Some(Self::Exact(Rational::from(n.clone()))),
            Expr::Rational(n) => Some(Self::Exact(n.clone())),
            Expr::Decimal(n) => Some(Self::Inexact(n.clone())),
            _ => None,
        }
    }

    /// Converts the number back into the simplest literal expression.
    pub fn into_expr(self) -> Expr {
        match self {
            Self::Exact(n) => match rational_to_int(&n) {
                Some(n) => Expr::Integer(n),
                None => Expr::Rational(n),
            },
            Self::Inexact(n) => Expr::Decimal(n),
        }
    }

    /// Returns the value as a [`Float`], rounding exact values.
    pub fn to_float(&self) -> Float {
        match self {
            Self::Exact(n) => float(n),
            Self::Inexact(n) => n.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(n) => *n == 0,
            Self::Inexact(n) => n.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Self::Exact(n) => *n == 1,
            Self::Inexact(n) => *n == 1,
        }
    }

    /// Returns the value as a [`Rational`], or [`None`] if it has no exact representation.
    ///
    /// Decimals with a binary exponent beyond [`MAX_EXACT_EXPONENT`] are rejected, since their
    /// exact value would take as many bits as the exponent.
    pub fn to_rational(&self) -> Result<Option<Rational>, ConstructionError> {
        match self {
            Self::Exact(n) => Ok(Some(n.clone())),
            Self::Inexact(n) => {
                if n.get_exp().is_some_and(|exp| exp.abs() > MAX_EXACT_EXPONENT) {
                    return Err(ConstructionError::ExponentOutOfRange(Expr::Decimal(n.clone()).to_string()));
                }
                Ok(n.to_rational())
            },
        }
    }

    /// Returns true if the number is strictly greater than the given integer.
    pub fn exceeds(&self, limit: u32) -> bool {
        match self {
            Self::Exact(n) => *n > limit,
            Self::Inexact(n) => *n > limit,
        }
    }

    /// If the number is an integer, returns it.
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Exact(n) => rational_to_int(n),
            Self::Inexact(_) => None,
        }
    }

    pub(crate) fn sum(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Exact(lhs), Self::Exact(rhs)) => Self::Exact(lhs + rhs),
            (lhs, rhs) => Self::Inexact(lhs.to_float() + rhs.to_float()),
        }
    }

    pub(crate) fn product(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Exact(lhs), Self::Exact(rhs)) => Self::Exact(lhs * rhs),
            (lhs, rhs) => Self::Inexact(lhs.to_float() * rhs.to_float()),
        }
    }

    pub(crate) fn negated(self) -> Self {
        match self {
            Self::Exact(n) => Self::Exact(-n),
            Self::Inexact(n) => Self::Inexact(-n),
        }
    }

    pub(crate) fn abs(self) -> Self {
        match self {
            Self::Exact(n) => Self::Exact(n.abs()),
            Self::Inexact(n) => Self::Inexact(n.abs()),
        }
    }

    /// Divides by `rhs`, or returns [`None`] if `rhs` is zero.
    pub(crate) fn quotient(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(match (self, rhs) {
            (Self::Exact(lhs), Self::Exact(rhs)) => Self::Exact(lhs / rhs),
            (lhs, rhs) => Self::Inexact(lhs.to_float() / rhs.to_float()),
        })
    }

    /// Raises to the power `exp`, or returns [`None`] if the result would be undefined, not exact
    /// when both operands are, or too expensive to compute.
    pub(crate) fn power(self, exp: Self) -> Option<Self> {
        match (self, exp) {
            (Self::Exact(base), Self::Exact(exp)) => {
                let exp = rational_to_int(&exp)?.to_i32()?;
                if exp.abs() > MAX_EXPONENT
                    || base.numer().significant_bits() > MAX_BASE_BITS
                    || base.denom().significant_bits() > MAX_BASE_BITS
                    || (base == 0 && exp < 0)
                {
                    return None;
                }
                Some(Self::Exact(base.pow(exp)))
            },
            (base, exp) => {
                let result = base.to_float().pow(exp.to_float());
                result.is_finite().then_some(Self::Inexact(result))
            },
        }
    }

    /// Returns the exact square root if the number is a non-negative perfect square.
    pub(crate) fn exact_sqrt(&self) -> Option<Self> {
        let Self::Exact(n) = self else {
            return None;
        };
        let (numer, denom) = (n.numer(), n.denom());
        if *numer < 0 || !numer.is_perfect_square() || !denom.is_perfect_square() {
            return None;
        }
        Some(Self::Exact(Rational::from((numer.clone().sqrt(), denom.clone().sqrt()))))
    }

    /// Returns the factorial if the number is a non-negative integer no larger than `limit`.
    pub(crate) fn factorial(&self, limit: u32) -> Option<Self> {
        let n = self.as_integer()?.to_u32()?;
        if n > limit {
            return None;
        }
        Some(Self::Exact(Rational::from(Integer::from(Integer::factorial(n)))))
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::Exact(Rational::from(int(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_arithmetic() {
        let half = Number::from(1).quotient(Number::from(2)).unwrap();
        assert_eq!(half.clone().sum(half).into_expr(), Expr::integer(1));
        assert_eq!(Number::from(2).power(Number::from(10)).unwrap().into_expr(), Expr::integer(1024));
        assert_eq!(Number::from(1).quotient(Number::from(0)), None);
    }

    #[test]
    fn pow_is_capped() {
        assert_eq!(Number::from(10).power(Number::from(1000)), None);
        assert_eq!(Number::from(0).power(Number::from(-1)), None);
    }

    #[test]
    fn exact_conversion_is_capped() {
        let quarter = Number::Inexact(float(0.25));
        assert_eq!(quarter.to_rational(), Ok(Some(Rational::from((1, 4)))));

        let huge = Number::Inexact(crate::primitive::float_from_str("1e100000").unwrap());
        assert!(matches!(huge.to_rational(), Err(ConstructionError::ExponentOutOfRange(_))));

        let tiny = Number::Inexact(crate::primitive::float_from_str("1e-100000").unwrap());
        assert!(matches!(tiny.to_rational(), Err(ConstructionError::ExponentOutOfRange(_))));

        let big = Number::Inexact(crate::primitive::float_from_str("1e300").unwrap());
        assert!(matches!(big.to_rational(), Ok(Some(_))));
    }

    #[test]
    fn square_roots() {
        assert_eq!(Number::from(16).exact_sqrt().map(Number::into_expr), Some(Expr::integer(4)));
        assert_eq!(Number::from(8).exact_sqrt(), None);
        assert_eq!(Number::from(-4).exact_sqrt(), None);
    }

    #[test]
    fn factorials() {
        assert_eq!(Number::from(5).factorial(50).map(Number::into_expr), Some(Expr::integer(120)));
        assert_eq!(Number::from(51).factorial(50), None);
    }
}
