//! Unevaluated expression trees.
//!
//! This crate provides [`Expr`], the tree that `symcheck-parser` produces from user input, along
//! with the fixed vocabulary of [`Func`]tions, [`Constant`]s and [`RelOp`]s it may contain.
//!
//! Every composite node is built through a constructor that takes an `evaluate` flag. The parser
//! always passes `false`, so that the tree mirrors what the user typed:
//!
//! ```
//! use symcheck_expr::{Expr, Func};
//!
//! let neg_x = Expr::neg(Expr::symbol("x"), false);
//! let kept = Expr::call(Func::Cos, vec![neg_x.clone()], false).unwrap();
//! assert_eq!(kept.to_string(), "cos(-x)");
//!
//! let simplified = Expr::call(Func::Cos, vec![neg_x], true).unwrap();
//! assert_eq!(simplified.to_string(), "cos(x)");
//! ```
//!
//! # Feature flags
//!
//! - `serde`: implements `Serialize` and `Deserialize` for [`Expr`] and its parts.

pub mod error;
pub mod expr;
pub mod func;
pub mod primitive;

pub use error::ConstructionError;
pub use expr::{Expr, Number};
pub use func::{Constant, Func, RelOp};
