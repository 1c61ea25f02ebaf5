//! The syntax tree of an expression, as written.
//!
//! Every node remembers the region of the input it was parsed from, so that errors found while
//! building the expression can point back at it.

pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;
