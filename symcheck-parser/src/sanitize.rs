//! Cleanup of raw, untrusted input before it reaches the tokenizer.
//!
//! [`cleanup_string`] decodes common Unicode mathematical notation into its ASCII equivalent,
//! then restricts the input to a small whitelist of characters. Anything else is either rejected
//! or blanked out, depending on the caller's choice.

use crate::error::Error;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Placeholder substituted for every run of disallowed characters. It is not itself whitelisted,
/// so its presence after substitution means the input contained something disallowed.
const SENTINEL: &str = "?";

/// Matches runs of non-ASCII characters.
static NON_ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").unwrap());

/// Matches runs of characters outside the whitelist: space, parentheses, `* + , - . /`, digits,
/// `< = >`, letters, `^ _` and `±`.
static UNSAFE_CHARACTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x20\x28-\x29\x2A-\x2F\x30-\x39\x3C-\x3E\x41-\x5A\x5E-\x5F\x61-\x7A\x{B1}]+").unwrap()
});

/// How the previous character of a non-ASCII run affects the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Prev {
    Superscript,
    Subscript,
    Other,
}

/// Returns the digit of a superscript digit character.
fn superscript_digit(c: char) -> Option<u32> {
    match c {
        '\u{2070}' => Some(0),
        '\u{B9}' => Some(1),
        '\u{B2}' => Some(2),
        '\u{B3}' => Some(3),
        '\u{2074}'..='\u{2079}' => Some(c as u32 - 0x2070),
        _ => None,
    }
}

/// Returns true for characters that count as superscripts when deciding whether a superscript
/// digit continues an exponent.
fn is_superscript(c: char) -> bool {
    superscript_digit(c).is_some() || matches!(c, '\u{207A}'..='\u{207E}' | '\u{2071}' | '\u{207F}')
}

/// Returns the digit of a subscript digit character.
fn subscript_digit(c: char) -> Option<u32> {
    match c {
        '\u{2080}'..='\u{2089}' => Some(c as u32 - 0x2080),
        _ => None,
    }
}

fn is_subscript(c: char) -> bool {
    matches!(c, '\u{2080}'..='\u{208E}')
}

/// Returns the numerator and denominator of a vulgar fraction glyph.
fn vulgar_fraction(c: char) -> Option<(u32, u32)> {
    let fraction = match c {
        '\u{BC}' => (1, 4),
        '\u{BD}' => (1, 2),
        '\u{BE}' => (3, 4),
        '\u{2150}' => (1, 7),
        '\u{2151}' => (1, 9),
        '\u{2152}' => (1, 10),
        '\u{2153}' => (1, 3),
        '\u{2154}' => (2, 3),
        '\u{2155}' => (1, 5),
        '\u{2156}' => (2, 5),
        '\u{2157}' => (3, 5),
        '\u{2158}' => (4, 5),
        '\u{2159}' => (1, 6),
        '\u{215A}' => (5, 6),
        '\u{215B}' => (1, 8),
        '\u{215C}' => (3, 8),
        '\u{215D}' => (5, 8),
        '\u{215E}' => (7, 8),
        '\u{2189}' => (0, 3),
        _ => return None,
    };
    Some(fraction)
}

/// Replaces the mathematical characters of a run of non-ASCII characters with their ASCII
/// equivalents. Consecutive superscript (subscript) digits form a single exponent (subscript).
fn decode_unicode_run(run: &str) -> String {
    let mut out = String::with_capacity(run.len());
    let mut prev = Prev::Other;

    for c in run.chars() {
        if let Some(digit) = superscript_digit(c) {
            if prev != Prev::Superscript {
                out.push_str("**");
            }
            out.push(char::from_digit(digit, 10).unwrap_or('0'));
        } else if let Some(digit) = subscript_digit(c) {
            if prev != Prev::Subscript {
                out.push('_');
            }
            out.push(char::from_digit(digit, 10).unwrap_or('0'));
        } else if let Some((numer, denom)) = vulgar_fraction(c) {
            out.push_str(&format!("({}/{})", numer, denom));
        } else {
            match c {
                '\u{D7}' | '\u{2217}' => out.push('*'),
                '\u{F7}' | '\u{2215}' => out.push('/'),
                '\u{2264}' | '\u{2A7D}' => out.push_str("<="),
                '\u{2265}' | '\u{2A7E}' => out.push_str(">="),
                _ => out.push(c),
            }
        }

        prev = if is_superscript(c) {
            Prev::Superscript
        } else if is_subscript(c) {
            Prev::Subscript
        } else {
            Prev::Other
        };
    }

    out
}

/// Replaces every `.` that is followed by a non-digit with a space. A `.` at the very end of the
/// input is kept.
///
/// Every dot is checked against the original next character, so each dot of `..x` is removed.
fn restrict_decimal_points(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '.' && !next.is_ascii_digit() => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Rewrites every `=` that is not part of `==`, `<=` or `>=` (on either side) into `==`.
fn double_single_equals(input: &str) -> String {
    let chars = input.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(input.len());
    let is_relational = |c: Option<&char>| matches!(c, Some('=' | '<' | '>'));

    for (i, &c) in chars.iter().enumerate() {
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        if c == '=' && !is_relational(before) && !is_relational(chars.get(i + 1)) {
            out.push_str("==");
        } else {
            out.push(c);
        }
    }

    out
}

/// Decodes Unicode notation, then replaces every run of disallowed characters with [`SENTINEL`].
fn mark_unsafe(input: &str) -> String {
    let decoded = NON_ASCII.replace_all(input, |caps: &Captures| decode_unicode_run(&caps[0]));
    UNSAFE_CHARACTERS.replace_all(&decoded, SENTINEL).into_owned()
}

/// Blanks out the sentinels of the marked input, then applies the rewrites that follow the
/// whitelist.
fn finish(input: &str, marked: &str) -> String {
    let cleaned = if marked.contains(SENTINEL) {
        debug!(input, "replacing disallowed characters with spaces");
        marked.replace(SENTINEL, " ")
    } else {
        marked.to_owned()
    };

    let cleaned = restrict_decimal_points(&cleaned)
        .replace("lambda", "lamda")
        .replace("Lambda", "Lamda")
        .replace("__", " ");
    double_single_equals(&cleaned)
}

/// Cleans untrusted input into a string containing only whitelisted characters.
///
/// If `reject_unsafe_input` is true, any character outside the whitelist (after Unicode
/// decoding) causes [`Error::UnsafeInput`]. Otherwise, disallowed characters are replaced with
/// spaces.
///
/// Beyond the whitelist, the result never contains a `.` that is followed by a non-digit (except
/// at the very end), a double underscore, the keyword `lambda`, or a lone `=`.
pub fn cleanup_string(input: &str, reject_unsafe_input: bool) -> Result<String, Error> {
    let marked = mark_unsafe(input);
    if reject_unsafe_input && marked.contains(SENTINEL) {
        return Err(Error::UnsafeInput);
    }
    Ok(finish(input, &marked))
}

/// Cleans untrusted input like [`cleanup_string`], always replacing disallowed characters with
/// spaces.
pub fn cleanup_lenient(input: &str) -> String {
    finish(input, &mark_unsafe(input))
}

/// Cleans untrusted input given as bytes. The bytes are decoded as UTF-8, with invalid sequences
/// becoming replacement characters that the whitelist then treats as disallowed.
pub fn cleanup_bytes(input: &[u8], reject_unsafe_input: bool) -> Result<String, Error> {
    cleanup_string(&String::from_utf8_lossy(input), reject_unsafe_input)
}
