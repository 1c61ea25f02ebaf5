pub mod token;

use crate::kind::UnexpectedCharacter;
use logos::{Lexer, Logos};
use symcheck_error::Error;
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns all of the tokens produced by the tokenizer, or an error pointing at the first
/// character that does not start any token.
pub fn tokenize_complete(input: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                span: lexer.span(),
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => {
                return Err(Error::new(vec![lexer.span()], UnexpectedCharacter {
                    character: lexer.slice().to_owned(),
                }));
            },
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Add, "+"),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn numbers() {
        compare_tokens(
            "3 1.5 5. .5 2e-3 1E4",
            [
                (TokenKind::Number, "3"),
                (TokenKind::Number, "1.5"),
                (TokenKind::Number, "5."),
                (TokenKind::Number, ".5"),
                (TokenKind::Number, "2e-3"),
                (TokenKind::Number, "1E4"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_is_split() {
        compare_tokens(
            "2x y2 sin(x)",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Name, "y2"),
                (TokenKind::Name, "sin"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn operators() {
        compare_tokens(
            "x**2^3 == y <= z >= w = v < u > t ± s, r.q",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Pow, "**"),
                (TokenKind::Number, "2"),
                (TokenKind::Caret, "^"),
                (TokenKind::Number, "3"),
                (TokenKind::Eq, "=="),
                (TokenKind::Name, "y"),
                (TokenKind::LessEq, "<="),
                (TokenKind::Name, "z"),
                (TokenKind::GreaterEq, ">="),
                (TokenKind::Name, "w"),
                (TokenKind::Assign, "="),
                (TokenKind::Name, "v"),
                (TokenKind::Less, "<"),
                (TokenKind::Name, "u"),
                (TokenKind::Greater, ">"),
                (TokenKind::Name, "t"),
                (TokenKind::PlusMinus, "±"),
                (TokenKind::Name, "s"),
                (TokenKind::Comma, ","),
                (TokenKind::Name, "r"),
                (TokenKind::Dot, "."),
                (TokenKind::Name, "q"),
            ],
        );
    }

    #[test]
    fn spans() {
        let tokens = tokenize_complete("ab + 10").unwrap();
        assert_eq!(tokens.iter().map(|t| t.span.clone()).collect::<Vec<_>>(), vec![0..2, 3..4, 5..7]);
    }

    #[test]
    fn unexpected_character() {
        let err = tokenize_complete("x + $").unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
        assert_eq!(err.kind.message(), "unexpected character `$`");
    }
}
