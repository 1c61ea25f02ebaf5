//! Functions to construct [`Integer`]s, [`Rational`]s and [`Float`]s from various types.

use crate::error::ConstructionError;
use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use for decimal literals.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits.
pub fn int_from_str(s: &str) -> Result<Integer, ConstructionError> {
    Integer::from_str_radix(s, 10).map_err(|_| ConstructionError::InvalidNumber(s.to_owned()))
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, such as `1.5`, `.5`, `5.` or `2e-3`.
pub fn float_from_str(s: &str) -> Result<Float, ConstructionError> {
    Float::parse(s)
        .map(|parsed| Float::with_val(PRECISION, parsed))
        .map_err(|_| ConstructionError::InvalidNumber(s.to_owned()))
}

/// Converts a [`Rational`] into an [`Integer`] if its denominator is one.
pub fn rational_to_int(r: &Rational) -> Option<Integer> {
    if *r.denom() == 1 {
        Some(r.numer().clone())
    } else {
        None
    }
}
