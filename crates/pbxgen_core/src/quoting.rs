//! Define how scalar text is written in the project-file grammar.
//!
//! Attribute names and string values share one rule: text that the IDE's parser could misread is wrapped
//! in double quotes, and inside quotes `"` and `\` are escaped with a backslash.
//!
//! ## Notes
//! - The bare alphabet is `A-Z a-z 0-9 $ _ . /`. Anything else (including whitespace, `-`, `+` and
//!   non-ASCII text) forces quoting.
//! - `//` forces quoting even though `/` alone is bare; the parser would read it as a comment.
//! - The empty string is always quoted so that `name = ;` is never produced.
//!
//! ## Examples
//! ```rust
//! use pbxgen_core::quoting;
//!
//! assert_eq!(quoting::quote("path/to/file.txt"), "path/to/file.txt");
//! assert_eq!(quoting::quote("he said \"hi\""), "\"he said \\\"hi\\\"\"");
//! assert_eq!(quoting::quote("a//b"), "\"a//b\"");
//! ```

use std::borrow::Cow;

/// Whether `c` may appear in an unquoted string.
pub fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '$' | '_' | '.' | '/')
}

/// Whether `s` must be wrapped in double quotes.
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.contains("//") || !s.chars().all(is_bare_char)
}

/// Return `s` as it must appear in the project file.
///
/// ## Returns
/// - `Cow::Borrowed(s)` when no quoting is needed.
/// - `Cow::Owned` with surrounding quotes and escaped `"`/`\` otherwise.
pub fn quote(s: &str) -> Cow<'_, str> {
    if !needs_quotes(s) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // needs_quotes tests
    // ========================================

    #[test]
    fn test_empty_needs_quotes() {
        assert!(needs_quotes(""));
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_bare_alphabet_passes_through() {
        for s in ["abc", "ABC_123", "main.c", "$SRCROOT/a.b", "/usr/lib", "path/to/file.txt"] {
            assert!(!needs_quotes(s), "{s}");
            assert_eq!(quote(s), s);
        }
        assert!(needs_quotes("$(SRCROOT)/x"));
    }

    #[test]
    fn test_double_slash_forces_quotes() {
        assert!(needs_quotes("http://example"));
        assert!(needs_quotes("a//b"));
        assert!(!needs_quotes("a/b"));
    }

    #[test]
    fn test_whitespace_and_punctuation_force_quotes() {
        assert!(needs_quotes("two words"));
        assert!(needs_quotes("a-b"));
        assert!(needs_quotes("a+b"));
        assert!(needs_quotes("tab\there"));
        assert!(needs_quotes("ünïcode"));
    }

    // ========================================
    // quote tests
    // ========================================

    #[test]
    fn test_quote_escapes_double_quotes_once() {
        assert_eq!(quote(r#"he said "hi""#), r#""he said \"hi\"""#);
    }

    #[test]
    fn test_quote_escapes_backslash() {
        assert_eq!(quote(r"C:\dir"), r#""C:\\dir""#);
    }

    #[test]
    fn test_quote_borrows_when_bare() {
        assert!(matches!(quote("Sources"), Cow::Borrowed("Sources")));
    }
}
