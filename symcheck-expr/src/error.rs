use thiserror::Error;

/// The largest argument [`Func::Factorial`](crate::Func::Factorial) accepts when it is a numeric
/// literal.
pub const FACTORIAL_LIMIT: u32 = 50;

/// Errors that can occur while constructing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A function was applied to the wrong number of arguments.
    #[error("`{name}` takes {expected}, but {given} were given")]
    Arity {
        name: &'static str,
        expected: String,
        given: usize,
    },

    /// A rational literal was given a zero denominator.
    #[error("rational number with a zero denominator")]
    ZeroDenominator,

    /// A string could not be read as a number.
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),

    /// A decimal was too large or too small to convert into an exact number.
    #[error("`{0}` is out of range for an exact number")]
    ExponentOutOfRange(String),

    /// A factorial was applied to a literal larger than [`FACTORIAL_LIMIT`].
    #[error("factorial of {0} exceeds the limit of {}", FACTORIAL_LIMIT)]
    FactorialTooLarge(String),

    /// A derivative was taken with respect to something other than a symbol, or with an invalid
    /// count.
    #[error("cannot differentiate with respect to `{0}`")]
    InvalidDerivativeVariable(String),
}
