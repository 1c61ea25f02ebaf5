//! Passes that rewrite the token stream before it is parsed.
//!
//! Each pass is a pure function from one token stream to another. [`apply`] runs them in a fixed
//! order; later passes rely on the rewrites made by earlier ones (for example, implicit
//! multiplication only inserts `*` next to [`TokenKind::Symbol`] tokens, which exist only after
//! [`auto_symbol`] has run).

mod exponent;
mod implicit;
mod split;

pub use exponent::function_exponentiation;
pub use implicit::implicit_multiplication;
pub use split::split_symbols;

use crate::{bindings::Bindings, tokenizer::{Token, TokenKind}};

/// Runs every pass over the token stream, in order.
pub fn apply<'source>(tokens: Vec<Token<'source>>, bindings: &Bindings) -> Vec<Token<'source>> {
    type Pass<'source> = fn(Vec<Token<'source>>, &Bindings) -> Vec<Token<'source>>;
    let passes: [Pass<'source>; 6] = [
        auto_number as Pass<'source>,
        auto_symbol as Pass<'source>,
        convert_caret as Pass<'source>,
        split_symbols as Pass<'source>,
        implicit_multiplication as Pass<'source>,
        function_exponentiation as Pass<'source>,
    ];
    passes.into_iter().fold(tokens, |tokens, pass| pass(tokens, bindings))
}

/// Turns every [`TokenKind::Number`] into an [`TokenKind::Integer`] or a [`TokenKind::Decimal`].
pub fn auto_number<'source>(tokens: Vec<Token<'source>>, _: &Bindings) -> Vec<Token<'source>> {
    tokens.into_iter()
        .map(|mut token| {
            if token.is(TokenKind::Number) {
                token.kind = if token.lexeme.contains(['.', 'e', 'E']) {
                    TokenKind::Decimal
                } else {
                    TokenKind::Integer
                };
            }
            token
        })
        .collect()
}

/// Turns every [`TokenKind::Name`] that is not bound to anything into a [`TokenKind::Symbol`].
pub fn auto_symbol<'source>(tokens: Vec<Token<'source>>, bindings: &Bindings) -> Vec<Token<'source>> {
    tokens.into_iter()
        .map(|mut token| {
            if token.is(TokenKind::Name) && !bindings.is_bound(token.lexeme) {
                token.kind = TokenKind::Symbol;
            }
            token
        })
        .collect()
}

/// Turns every `^` into `**`.
pub fn convert_caret<'source>(tokens: Vec<Token<'source>>, _: &Bindings) -> Vec<Token<'source>> {
    tokens.into_iter()
        .map(|mut token| {
            if token.is(TokenKind::Caret) {
                token.kind = TokenKind::Pow;
                token.lexeme = "**";
            }
            token
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tokenizer::tokenize_complete;
    use pretty_assertions::assert_eq;

    /// Renders the lexemes of the tokens, separated by spaces.
    pub(crate) fn lexemes(tokens: &[Token]) -> String {
        tokens.iter().map(|token| token.lexeme).collect::<Vec<_>>().join(" ")
    }

    /// Tokenizes the input and runs every pass over it with the default bindings.
    pub(crate) fn transform(input: &str) -> String {
        let bindings = Bindings::default();
        lexemes(&apply(tokenize_complete(input).unwrap(), &bindings))
    }

    #[test]
    fn number_kinds() {
        let tokens = auto_number(tokenize_complete("1 1.5 2e3 .5 5.").unwrap(), &Bindings::default());
        assert_eq!(
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::Decimal,
                TokenKind::Decimal,
                TokenKind::Decimal,
            ],
        );
    }

    #[test]
    fn unbound_names_become_symbols() {
        let tokens = auto_symbol(tokenize_complete("sin theta pi").unwrap(), &Bindings::default());
        assert_eq!(
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
            vec![TokenKind::Name, TokenKind::Symbol, TokenKind::Symbol],
        );

        let tokens = auto_symbol(tokenize_complete("pi").unwrap(), &Bindings::new(None, &["constant_pi"]));
        assert_eq!(tokens[0].kind, TokenKind::Name);
    }

    #[test]
    fn caret() {
        assert_eq!(transform("x^2"), "x ** 2");
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(transform("2xy^2"), "2 * ( x * y ) ** 2");
        assert_eq!(transform("1/xyz"), "1 / ( x * y * z )");
        assert_eq!(transform("sin^2(x)"), "sin ( x ) ** 2");
        assert_eq!(transform("3sin(2x)"), "3 * sin ( 2 * x )");
    }
}
