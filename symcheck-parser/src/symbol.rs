/// Returns true if `name` can be used as the name of a symbol.
///
/// Valid names are non-empty, consist only of ASCII letters, digits and underscores, and do not
/// start with an underscore (such names are reserved for internal use).
pub fn is_valid_symbol(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
