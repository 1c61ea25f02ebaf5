//! Safe parsing of untrusted mathematical text into unevaluated expression trees.
//!
//! Parsing happens in two steps:
//!
//! 1. [`cleanup_string`] decodes Unicode mathematical notation and restricts the input to a
//!    whitelist of characters.
//! 2. [`parse_expr`] cleans the text the same way, tokenizes it, rewrites the token stream
//!    (implicit multiplication, `^` as power, `sin^2(x)` and so on), parses it, and builds an
//!    [`Expr`](symcheck_expr::Expr) without evaluating anything.
//!
//! [`parse_expr`] always replaces disallowed characters with spaces. Callers that want such input
//! rejected instead run [`cleanup_string`] with `reject_unsafe_input` set first.
//!
//! Only the names in the binding table can be called, and every other name is a free symbol, so
//! no input can refer to anything outside the fixed vocabulary of functions and constructors.
//!
//! ```
//! use symcheck_parser::{cleanup_string, parse_expr};
//!
//! let input = "2x² + cos(-x)";
//! assert!(cleanup_string(input, true).is_ok());
//! let expr = parse_expr(input, None, &["constant_pi"]).unwrap().unwrap();
//! assert_eq!(expr.to_string(), "2*x**2 + cos(-x)");
//! ```
//!
//! # Feature flags
//!
//! - `factorial`: adds `factorial` and `Factorial` to the binding table.
//! - `serde`: implements `Serialize` and `Deserialize` for the expression tree.

pub mod bindings;
pub mod build;
pub mod error;
pub mod kind;
pub mod parser;
pub mod sanitize;
pub mod symbol;
pub mod tokenizer;
pub mod transform;

pub use bindings::{Binding, Bindings, Callable, Constructor, Hint};
pub use error::Error;
pub use sanitize::{cleanup_bytes, cleanup_lenient, cleanup_string};
pub use symbol::is_valid_symbol;

use once_cell::sync::Lazy;
use parser::{ast::expr::Expr as Ast, Parser};
use regex::Regex;
use std::{borrow::Cow, collections::HashMap};
use symcheck_expr::Expr;
use tokenizer::tokenize_complete;
use tracing::{debug, warn};

/// Matches a digit directly followed by `l` or `L`.
static LONG_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])([lL])").unwrap());

/// Separates every digit that is directly followed by `l` or `L` with a space, so that `2l` is
/// always read as the product of `2` and `l`.
///
/// [`prepare_input`] runs this after cleaning the input.
pub fn separate_long_suffixes(text: &str) -> Cow<'_, str> {
    LONG_SUFFIX.replace_all(text, "${1} ${2}")
}

/// Returns the text as the tokenizer sees it: cleaned with [`cleanup_lenient`], then with its
/// long suffixes separated. The spans of the errors returned by [`parse_expr_diagnostic`] index
/// into this string.
pub fn prepare_input(text: &str) -> String {
    separate_long_suffixes(&cleanup_lenient(text)).into_owned()
}

/// Parses text into an unevaluated expression tree, returning the detailed cause of a failure.
///
/// This behaves like [`parse_expr`], except that failures are returned as a
/// [`symcheck_error::Error`], which can render a report pointing at the offending part of the
/// input. The spans of the error index into [`prepare_input`] of the text.
pub fn parse_expr_diagnostic<S: AsRef<str>>(
    text: &str,
    local_bindings: Option<&HashMap<String, Binding>>,
    hints: &[S],
) -> Result<Option<Expr>, symcheck_error::Error> {
    if text.is_empty() {
        return Ok(None);
    }

    let bindings = Bindings::new(local_bindings, hints);
    let text = prepare_input(text);
    debug!(text = text.as_str(), "parsing expression");

    let tokens = transform::apply(tokenize_complete(&text)?, &bindings);
    let ast = Parser::new(tokens).try_parse_full::<Ast>()?;
    build::build(&ast, &bindings).map(Some)
}

/// Parses text into an unevaluated expression tree.
///
/// The text is cleaned with [`cleanup_lenient`] before it is tokenized. Identifiers are looked up
/// in `local_bindings`, then in the bindings selected by `hints` (see [`Hint`] for the keys;
/// unknown keys are ignored), then in the global table of whitelisted functions. Any other
/// identifier is a free symbol.
///
/// Returns `Ok(None)` if the text is empty. Every failure is logged and returned as
/// [`Error::ParseFailure`].
pub fn parse_expr<S: AsRef<str>>(
    text: &str,
    local_bindings: Option<&HashMap<String, Binding>>,
    hints: &[S],
) -> Result<Option<Expr>, Error> {
    parse_expr_diagnostic(text, local_bindings, hints).map_err(|err| {
        warn!(input = text, error = %err, "failed to parse expression");
        Error::from(err)
    })
}
