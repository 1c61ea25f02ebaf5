use thiserror::Error;

/// The ways in which cleaning up or parsing untrusted input can fail.
///
/// The detailed cause of a parse failure is logged when it occurs; use
/// [`parse_expr_diagnostic`](crate::parse_expr_diagnostic) to obtain it as a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input contained characters outside the whitelist, and the caller asked for such input
    /// to be rejected.
    #[error("unexpected input characters provided")]
    UnsafeInput,

    /// The input could not be turned into an expression tree.
    #[error("failed to parse expression: {0}")]
    ParseFailure(String),
}

impl From<symcheck_error::Error> for Error {
    fn from(err: symcheck_error::Error) -> Self {
        Self::ParseFailure(err.kind.message())
    }
}
