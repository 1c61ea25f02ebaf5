//! The kinds of errors that can occur while tokenizing, parsing and building an expression.

use ariadne::Fmt;
use crate::tokenizer::TokenKind;
use symcheck_attrs::ErrorKind;
use symcheck_error::{ErrorKind, EXPR};
use symcheck_expr::ConstructionError;

/// A character that does not start any token was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", character),
    labels = ["here"],
    help = "only letters, digits, arithmetic operators, comparisons and parentheses are understood",
)]
pub struct UnexpectedCharacter {
    /// The character that was found.
    pub character: String,
}

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// Syntax that is understood, but never allowed in an answer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{} are not supported", construct),
    labels = ["here"],
)]
pub struct UnsupportedSyntax {
    /// A plural description of the construct, such as "tuples".
    pub construct: &'static str,
}

/// Two or more comparisons were chained together, such as `1 < x < 2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot parse nested inequalities",
    labels = ["this comparison", "is chained to this comparison"],
    help = "split the chain into separate comparisons",
)]
pub struct NestedInequality;

/// A relation appeared inside another expression, such as `1 + (x < 2)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "relations can only appear at the top level of an expression",
    labels = ["this relation"],
)]
pub struct NestedRelation;

/// The name of a function was used as a value, such as `sin + 1`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a function, not a value", name),
    labels = ["this name"],
    help = format!("call it with parentheses, like {}", format!("{}(x)", name).fg(EXPR)),
)]
pub struct FunctionAsValue {
    /// The name of the function.
    pub name: String,
}

/// A name that does not refer to a function was called.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be called", name),
    labels = ["this call"],
)]
pub struct NotCallable {
    /// The name that was called.
    pub name: String,
}

/// A constructor was given arguments it cannot use.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid arguments to `{}`: {}", name, reason),
    labels = ["this call"],
)]
pub struct InvalidArguments {
    /// The name of the constructor.
    pub name: String,

    /// Why the arguments were rejected.
    pub reason: String,
}

/// The expression library refused to build a node.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = cause.to_string(),
    labels = ["here"],
)]
pub struct Construction {
    pub cause: ConstructionError,
}
