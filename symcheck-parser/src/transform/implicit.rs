use crate::{bindings::{Binding, Bindings}, tokenizer::{Token, TokenKind}};

/// Returns true if the token can be the last token of an operand.
fn ends_operand(token: &Token, bindings: &Bindings) -> bool {
    match token.kind {
        TokenKind::Integer | TokenKind::Decimal | TokenKind::Symbol | TokenKind::CloseParen => true,
        TokenKind::Name => matches!(bindings.get(token.lexeme), Some(Binding::Constant(_))),
        _ => false,
    }
}

/// Returns true if the token can be the first token of an operand.
fn starts_operand(token: &Token, bindings: &Bindings) -> bool {
    match token.kind {
        TokenKind::Integer | TokenKind::Decimal | TokenKind::Symbol | TokenKind::OpenParen => true,
        TokenKind::Name => bindings.is_bound(token.lexeme),
        _ => false,
    }
}

/// Inserts `*` between adjacent operands, such as in `2x`, `x(x + 1)` or `(a)(b)`.
///
/// Function names are never the end of an operand, so `sin(x)` stays a call.
pub fn implicit_multiplication<'source>(tokens: Vec<Token<'source>>, bindings: &Bindings) -> Vec<Token<'source>> {
    let mut out: Vec<Token<'source>> = Vec::with_capacity(tokens.len());

    for token in tokens {
        if let Some(prev) = out.last() {
            if ends_operand(prev, bindings) && starts_operand(&token, bindings) {
                out.push(Token::synthetic(TokenKind::Mul, "*", token.span.start));
            }
        }
        out.push(token);
    }

    out
}
