use crate::{bindings::Bindings, tokenizer::{Token, TokenKind}};
use std::ops::Range;

/// Names of Greek letters, which are never split. `lamda` uses the Unicode spelling, since the
/// sanitizer renames `lambda`.
const GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lamda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi",
    "psi", "omega", "digamma", "koppa", "sampi", "stigma", "heta", "san", "sho",
];

/// Returns true if the symbol name must not be split into single letters.
fn is_atomic(name: &str) -> bool {
    name.len() <= 1
        || name.contains('_')
        || GREEK_LETTERS.iter().any(|letter| letter.eq_ignore_ascii_case(name))
}

/// Splits a symbol name into single letters and maximal runs of digits, returning the byte range
/// of each piece.
fn pieces(name: &str) -> Vec<Range<usize>> {
    let bytes = name.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let end = if bytes[start].is_ascii_digit() {
            start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
        } else {
            start + 1
        };
        pieces.push(start..end);
        start = end;
    }
    pieces
}

/// Splits every multi-letter [`TokenKind::Symbol`] into its letters, so that `xyz` is read as the
/// product of `x`, `y` and `z`.
///
/// The pieces are wrapped in parentheses, so the product binds tighter than any operator around
/// it: `1/xyz` is `1/(x*y*z)`, and `xy^2` is `(x*y)**2`. Each letter that is bound to something
/// becomes a [`TokenKind::Name`], and each run of digits an [`TokenKind::Integer`].
///
/// Symbols containing an underscore and the names of Greek letters are left whole.
pub fn split_symbols<'source>(tokens: Vec<Token<'source>>, bindings: &Bindings) -> Vec<Token<'source>> {
    let mut out = Vec::with_capacity(tokens.len());

    for token in tokens {
        if !token.is(TokenKind::Symbol) || is_atomic(token.lexeme) {
            out.push(token);
            continue;
        }

        let offset = token.span.start;
        out.push(Token::synthetic(TokenKind::OpenParen, "(", offset));
        for range in pieces(token.lexeme) {
            let lexeme = &token.lexeme[range.clone()];
            let kind = if lexeme.as_bytes()[0].is_ascii_digit() {
                TokenKind::Integer
            } else if bindings.is_bound(lexeme) {
                TokenKind::Name
            } else {
                TokenKind::Symbol
            };
            out.push(Token {
                span: offset + range.start..offset + range.end,
                kind,
                lexeme,
            });
        }
        out.push(Token::synthetic(TokenKind::CloseParen, ")", token.span.end));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::tests::{lexemes, transform};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("xy", "( x * y )")]
    #[case("x2y", "( x * 2 * y )")]
    #[case("ab12c", "( a * b * 12 * c )")]
    #[case("x_1", "x_1")]
    #[case("theta", "theta")]
    #[case("Omega", "Omega")]
    #[case("lamda", "lamda")]
    #[case("x", "x")]
    fn splitting(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(transform(input), expected);
    }

    #[test]
    fn bound_letters_become_names() {
        let bindings = Bindings::new(None, &["constant_e"]);
        let tokens = vec![Token { span: 0..2, kind: TokenKind::Symbol, lexeme: "xe" }];
        let split = split_symbols(tokens, &bindings);
        assert_eq!(lexemes(&split), "( x e )");
        assert_eq!(split[1].kind, TokenKind::Symbol);
        assert_eq!(split[2].kind, TokenKind::Name);
        assert_eq!(split[2].span, 1..2);
    }
}
