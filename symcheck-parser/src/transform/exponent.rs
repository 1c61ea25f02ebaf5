use crate::{bindings::Bindings, tokenizer::{Token, TokenKind}};

/// Returns the index of the parenthesis matching the `(` at `open`, if any.
fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => (),
        }
    }
    None
}

/// Finds the exponent of `f ** e * (args)`, where the `**` is at `pow`. Returns the index of the
/// `*` that ends the exponent.
///
/// The exponent cannot contain a sum, difference or comparison outside of parentheses, except for
/// a leading sign.
fn exponent_end(tokens: &[Token], pow: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in pow + 1..tokens.len() {
        match tokens[i].kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => depth = depth.checked_sub(1)?,
            TokenKind::Mul if depth == 0 && i > pow + 1 => {
                if tokens.get(i + 1).is_some_and(|next| next.is(TokenKind::OpenParen)) {
                    return Some(i);
                }
            },
            TokenKind::Add | TokenKind::Sub if depth == 0 && i == pow + 1 => (),
            TokenKind::Add | TokenKind::Sub | TokenKind::Eq | TokenKind::Less | TokenKind::LessEq
                | TokenKind::Greater | TokenKind::GreaterEq | TokenKind::Comma if depth == 0 => return None,
            _ => (),
        }
    }
    None
}

/// Moves the exponent of a function raised to a power after its arguments, so that `sin**2(x)`
/// (written `sin^2(x)` or `sin²(x)`) is read as `sin(x)**2`.
///
/// This pass runs after [`implicit_multiplication`](super::implicit_multiplication), which has
/// already inserted a `*` between the exponent and the opening parenthesis of the arguments. That
/// `*` marks the end of the exponent, and is dropped. If the pattern is incomplete, the tokens are
/// left unchanged.
pub fn function_exponentiation<'source>(mut tokens: Vec<Token<'source>>, bindings: &Bindings) -> Vec<Token<'source>> {
    let mut i = 0;
    while i + 1 < tokens.len() {
        let is_callable = tokens[i].is(TokenKind::Name)
            && bindings.get(tokens[i].lexeme).is_some_and(|binding| binding.is_callable());
        if is_callable && tokens[i + 1].is(TokenKind::Pow) {
            let pow = i + 1;
            let moved = exponent_end(&tokens, pow).and_then(|mul| {
                let close = matching_paren(&tokens, mul + 1)?;
                Some((mul, close))
            });

            if let Some((mul, close)) = moved {
                // name, exponent (`**` included), `*`, arguments, rest
                let rest = tokens.split_off(close + 1);
                let args = tokens.split_off(mul + 1);
                tokens.truncate(mul);
                let exponent = tokens.split_off(pow);
                tokens.extend(args);
                tokens.extend(exponent);
                tokens.extend(rest);
            }
        }
        i += 1;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use crate::transform::tests::transform;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("sin^2(x)", "sin ( x ) ** 2")]
    #[case("sin**2(x)", "sin ( x ) ** 2")]
    #[case("cos^(1 + 1)(x + y)", "cos ( x + y ) ** ( 1 + 1 )")]
    #[case("tan^-1(x)", "tan ( x ) ** - 1")]
    #[case("sin^2(x) + cos^2(x)", "sin ( x ) ** 2 + cos ( x ) ** 2")]
    #[case("sin^2 + cos(x)", "sin ** 2 + cos ( x )")]
    #[case("sin^2", "sin ** 2")]
    #[case("x^2(y)", "x ** 2 * ( y )")]
    fn exponent_placement(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(transform(input), expected);
    }
}
