//! Lowering of the syntax tree into an [`Expr`], without evaluating anything.
//!
//! Every operator and call becomes the matching constructor of [`Expr`] with `evaluate = false`,
//! so the resulting tree keeps the structure of the input. Relations are only allowed at the root
//! of the tree, and a comparison can never be chained to another one.

use crate::{
    bindings::{Binding, Bindings, ConstructorError},
    kind,
    parser::{
        ast::{binary::Binary, call::Call, expr::Expr as Ast, literal::{Literal, LiteralKind}},
        op::{BinOpKind, UnaryOpKind},
    },
};
use std::ops::Range;
use symcheck_error::Error;
use symcheck_expr::{primitive::int_from_str, ConstructionError, Expr, RelOp};

/// Wraps an error of the expression library, pointing at the given span.
fn construction(span: Range<usize>, cause: ConstructionError) -> Error {
    Error::new(vec![span], kind::Construction { cause })
}

/// Lowers the syntax tree into an expression.
pub fn build(ast: &Ast, bindings: &Bindings) -> Result<Expr, Error> {
    Builder { bindings }.lower(ast, true)
}

/// Lowers syntax trees using the given binding table.
struct Builder<'a> {
    bindings: &'a Bindings,
}

impl Builder<'_> {
    /// Lowers an expression. `root` is true if the expression is the root of the tree, looking
    /// through parentheses.
    fn lower(&self, ast: &Ast, root: bool) -> Result<Expr, Error> {
        match ast {
            Ast::Literal(literal) => self.literal(literal),
            Ast::Paren(paren) => self.lower(&paren.expr, root),
            Ast::Call(call) => self.call(call),
            Ast::Unary(unary) => {
                let operand = self.lower(&unary.operand, false)?;
                match unary.op.kind {
                    UnaryOpKind::Plus => Ok(operand),
                    UnaryOpKind::Neg => Ok(Expr::neg(operand, false)),
                }
            },
            Ast::Binary(binary) => self.binary(binary, root),
        }
    }

    fn literal(&self, literal: &Literal) -> Result<Expr, Error> {
        match literal.kind {
            LiteralKind::Integer => int_from_str(&literal.lexeme)
                .map(Expr::Integer)
                .map_err(|cause| construction(literal.span(), cause)),
            LiteralKind::Decimal => Expr::decimal_from_str(&literal.lexeme)
                .map_err(|cause| construction(literal.span(), cause)),
            LiteralKind::Symbol => Ok(Expr::symbol(&literal.lexeme)),
            LiteralKind::Name => match self.bindings.get(&literal.lexeme) {
                Some(Binding::Constant(value)) => Ok(value.clone()),
                Some(Binding::Function(_) | Binding::Type(_)) => Err(Error::new(
                    vec![literal.span()],
                    kind::FunctionAsValue { name: literal.lexeme.clone() },
                )),
                None => Ok(Expr::symbol(&literal.lexeme)),
            },
        }
    }

    /// Lowers the operands of a chain of the same associative operator, such as `a + (b + c)`,
    /// into a single list.
    fn flatten(&self, ast: &Ast, op: BinOpKind, out: &mut Vec<Expr>) -> Result<(), Error> {
        let inner = match ast {
            Ast::Paren(paren) => paren.innermost(),
            other => other,
        };
        match inner {
            Ast::Binary(binary) if binary.op.kind == op => {
                self.flatten(&binary.lhs, op, out)?;
                self.flatten(&binary.rhs, op, out)
            },
            _ => {
                out.push(self.lower(ast, false)?);
                Ok(())
            },
        }
    }

    fn binary(&self, binary: &Binary, root: bool) -> Result<Expr, Error> {
        let operands = |op| -> Result<Vec<Expr>, Error> {
            let mut out = Vec::new();
            self.flatten(&binary.lhs, op, &mut out)?;
            self.flatten(&binary.rhs, op, &mut out)?;
            Ok(out)
        };
        let pair = || -> Result<(Expr, Expr), Error> {
            Ok((self.lower(&binary.lhs, false)?, self.lower(&binary.rhs, false)?))
        };

        match binary.op.kind {
            BinOpKind::Add => Ok(Expr::add(operands(BinOpKind::Add)?, false)),
            BinOpKind::Mul => Ok(Expr::mul(operands(BinOpKind::Mul)?, false)),
            BinOpKind::Sub => pair().map(|(lhs, rhs)| Expr::sub(lhs, rhs, false)),
            BinOpKind::Div => pair().map(|(lhs, rhs)| Expr::div(lhs, rhs, false)),
            BinOpKind::Pow => pair().map(|(lhs, rhs)| Expr::pow(lhs, rhs, false)),
            BinOpKind::Eq => self.relation(binary, RelOp::Eq, root),
            BinOpKind::Less => self.relation(binary, RelOp::Lt, root),
            BinOpKind::LessEq => self.relation(binary, RelOp::Le, root),
            BinOpKind::Greater => self.relation(binary, RelOp::Gt, root),
            BinOpKind::GreaterEq => self.relation(binary, RelOp::Ge, root),
        }
    }

    fn relation(&self, binary: &Binary, op: RelOp, root: bool) -> Result<Expr, Error> {
        for side in [&binary.lhs, &binary.rhs] {
            if let Ast::Binary(inner) = side.as_ref() {
                if inner.op.kind.is_comparison() {
                    return Err(Error::new(
                        vec![inner.op.span.clone(), binary.op.span.clone()],
                        kind::NestedInequality,
                    ));
                }
            }
        }

        if !root {
            return Err(Error::new(vec![binary.span()], kind::NestedRelation));
        }

        let lhs = self.lower(&binary.lhs, false)?;
        let rhs = self.lower(&binary.rhs, false)?;
        Ok(Expr::relation(lhs, op, rhs, false))
    }

    fn call(&self, call: &Call) -> Result<Expr, Error> {
        let args = call.args.iter()
            .map(|arg| self.lower(arg, false))
            .collect::<Result<Vec<_>, _>>()?;

        match self.bindings.get(&call.name) {
            Some(Binding::Function(callable)) => callable.apply(args, false)
                .map_err(|cause| construction(call.span(), cause)),
            Some(Binding::Type(constructor)) => constructor.apply(args, false)
                .map_err(|err| match err {
                    ConstructorError::Construction(cause) => construction(call.span(), cause),
                    other => Error::new(vec![call.span()], kind::InvalidArguments {
                        name: call.name.clone(),
                        reason: other.to_string(),
                    }),
                }),
            Some(Binding::Constant(_)) | None => Err(Error::new(
                vec![call.name_span.clone()],
                kind::NotCallable { name: call.name.clone() },
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::Parser, tokenizer::tokenize_complete, transform};
    use pretty_assertions::assert_eq;
    use symcheck_expr::Func;

    fn build_with(input: &str, bindings: &Bindings) -> Result<Expr, Error> {
        let tokens = transform::apply(tokenize_complete(input).unwrap(), bindings);
        let ast = Parser::new(tokens).try_parse_full::<Ast>()?;
        build(&ast, bindings)
    }

    fn parse(input: &str) -> Result<Expr, Error> {
        build_with(input, &Bindings::default())
    }

    fn message(input: &str) -> String {
        parse(input).unwrap_err().kind.message()
    }

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn sums_and_products_flatten() {
        assert_eq!(
            parse("a + (b + c)").unwrap(),
            Expr::Add(vec![sym("a"), sym("b"), sym("c")]),
        );
        assert_eq!(
            parse("2xy").unwrap(),
            Expr::Mul(vec![Expr::integer(2), sym("x"), sym("y")]),
        );
        assert_eq!(
            parse("a - b - c").unwrap(),
            Expr::sub(Expr::sub(sym("a"), sym("b"), false), sym("c"), false),
        );
    }

    #[test]
    fn nothing_is_evaluated() {
        assert_eq!(parse("2**10").unwrap().to_string(), "2**10");
        assert_eq!(parse("1 + 1").unwrap().to_string(), "1 + 1");
        assert_eq!(parse("x*1").unwrap().to_string(), "x*1");
        assert_eq!(parse("-1").unwrap(), Expr::Neg(Box::new(Expr::integer(1))));
        assert_eq!(parse("--x").unwrap().to_string(), "-(-x)");
        assert_eq!(parse("+x").unwrap(), sym("x"));
        assert_eq!(parse("sin(-x)").unwrap().to_string(), "sin(-x)");
    }

    #[test]
    fn exempt_functions_fold() {
        assert_eq!(parse("sqrt(16)").unwrap(), Expr::integer(4));
        assert_eq!(parse("sqrt(8)").unwrap(), Expr::Call(Func::Sqrt, vec![Expr::integer(8)]));
    }

    #[test]
    fn constructors() {
        assert_eq!(parse("Rational(1, 2)").unwrap().to_string(), "1/2");
        assert_eq!(parse("Integer(2.5)").unwrap(), Expr::integer(2));
        assert_eq!(parse("Eq(x, 1)").unwrap().to_string(), "x == 1");
        assert_eq!(parse("Pow(x, 2)").unwrap().to_string(), "x**2");
        assert_eq!(parse("Add(x)").unwrap(), sym("x"));
        assert_eq!(message("Rational(x)"), "invalid arguments to `Rational`: expects numeric literal arguments");
        assert_eq!(message("Rational(1, 0)"), "rational number with a zero denominator");
        assert_eq!(message("Integer(1e600000)"), "`1.0e600000` is out of range for an exact number");
    }

    #[test]
    fn relations() {
        assert_eq!(
            parse("x <= 1").unwrap(),
            Expr::Relation(Box::new(sym("x")), RelOp::Le, Box::new(Expr::integer(1))),
        );
        assert_eq!(
            parse("(x > 1)").unwrap(),
            Expr::Relation(Box::new(sym("x")), RelOp::Gt, Box::new(Expr::integer(1))),
        );
    }

    #[test]
    fn nested_relations() {
        assert_eq!(message("1 < x < 2"), "cannot parse nested inequalities");
        assert_eq!(message("x == y == z"), "cannot parse nested inequalities");
        assert_eq!(message("1 + (x < 2)"), "relations can only appear at the top level of an expression");
        assert_eq!(message("sin(x == 1)"), "relations can only appear at the top level of an expression");
        assert_eq!(message("(x < 1) == (y < 2)"), "relations can only appear at the top level of an expression");
    }

    #[test]
    fn chained_comparison_spans() {
        let err = parse("1 < x <= 2").unwrap_err();
        assert_eq!(err.spans, vec![2..3, 6..8]);
    }

    #[test]
    fn functions_are_not_values() {
        assert_eq!(message("sin + 1"), "`sin` is a function, not a value");
        assert_eq!(message("sin(cos)"), "`cos` is a function, not a value");
        assert_eq!(message("sin(x, y)"), "`sin` takes 1 argument, but 2 were given");
        assert_eq!(message("log()"), "`log` takes 1 to 2 arguments, but 0 were given");
    }

    #[test]
    fn constants_are_not_callable() {
        let bindings = Bindings::new(None, &["constant_pi"]);
        let tokens = vec![
            crate::tokenizer::Token { span: 0..2, kind: crate::tokenizer::TokenKind::Name, lexeme: "pi" },
            crate::tokenizer::Token { span: 2..3, kind: crate::tokenizer::TokenKind::OpenParen, lexeme: "(" },
            crate::tokenizer::Token { span: 3..4, kind: crate::tokenizer::TokenKind::Symbol, lexeme: "x" },
            crate::tokenizer::Token { span: 4..5, kind: crate::tokenizer::TokenKind::CloseParen, lexeme: ")" },
        ];
        let ast = Parser::new(tokens).try_parse_full::<Ast>().unwrap();
        let err = build(&ast, &bindings).unwrap_err();
        assert_eq!(err.kind.message(), "`pi` cannot be called");
        assert_eq!(err.spans, vec![0..2]);

        // through the transform passes, a constant followed by parentheses is a product
        assert_eq!(
            build_with("pi(x)", &bindings).unwrap(),
            Expr::Mul(vec![Expr::Constant(symcheck_expr::Constant::Pi), sym("x")]),
        );
    }
}
