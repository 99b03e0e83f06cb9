//! Token stream and text writer
//!
//! The tree walk produces [`Token`]s; [`TokenWriter`] turns them into text.
//! Quoting and comment framing live here so they can be tested without
//! building a graph.

use std::borrow::Cow;

use pbxgen_core::quoting;

use super::layout::Separator;

/// One rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'g> {
    /// That many tab characters.
    Indent(usize),
    /// Grammar punctuation or identifiers, written verbatim.
    Raw(Cow<'g, str>),
    /// Attribute names and string values, quoted and escaped when needed.
    Scalar(&'g str),
    /// Object comment, framed as ` /* text */`; nothing when empty.
    Comment(&'g str),
    Separator(Separator),
}

impl<'g> Token<'g> {
    pub fn raw(text: &'static str) -> Self {
        Token::Raw(Cow::Borrowed(text))
    }
}

/// Writer that accumulates rendered tokens
pub struct TokenWriter {
    /// The output buffer
    output: String,
}

impl TokenWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self { output: String::new() }
    }

    /// Get the rendered output
    pub fn finish(self) -> String {
        self.output
    }

    /// Write `level` tab characters
    pub fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.output.push('\t');
        }
    }

    /// Write a string verbatim
    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a string through the quoting rules
    pub fn scalar(&mut self, s: &str) {
        self.output.push_str(&quoting::quote(s));
    }

    /// Write an object comment
    pub fn comment(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str(" /* ");
        self.output.push_str(text);
        self.output.push_str(" */");
    }

    pub fn separator(&mut self, separator: Separator) {
        self.output.push_str(separator.as_str());
    }

    /// Write one token
    pub fn token(&mut self, token: &Token<'_>) {
        match token {
            Token::Indent(level) => self.indent(*level),
            Token::Raw(text) => self.write(text),
            Token::Scalar(text) => self.scalar(text),
            Token::Comment(text) => self.comment(text),
            Token::Separator(separator) => self.separator(*separator),
        }
    }
}

impl Default for TokenWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a token stream to text.
pub fn render(tokens: &[Token<'_>]) -> String {
    let mut writer = TokenWriter::new();
    for token in tokens {
        writer.token(token);
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Primitive tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(TokenWriter::new().finish(), "");
    }

    #[test]
    fn test_indent_writes_tabs_only() {
        let mut writer = TokenWriter::new();
        writer.indent(3);
        assert_eq!(writer.finish(), "\t\t\t");
    }

    #[test]
    fn test_indent_zero_writes_nothing() {
        let mut writer = TokenWriter::new();
        writer.indent(0);
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_comment_framing() {
        let mut writer = TokenWriter::new();
        writer.comment("main.c in Sources");
        writer.comment("");
        assert_eq!(writer.finish(), " /* main.c in Sources */");
    }

    #[test]
    fn test_scalar_quotes_when_needed() {
        let mut writer = TokenWriter::new();
        writer.scalar("Sources");
        writer.write(" ");
        writer.scalar("two words");
        assert_eq!(writer.finish(), "Sources \"two words\"");
    }

    // ========================================
    // Token rendering
    // ========================================

    #[test]
    fn test_render_string_attribute_tokens() {
        let tokens = [
            Token::Indent(3),
            Token::Scalar("name"),
            Token::raw(" = "),
            Token::Scalar(""),
            Token::raw(";"),
            Token::Separator(Separator::Newline),
        ];
        assert_eq!(render(&tokens), "\t\t\tname = \"\";\n");
    }

    #[test]
    fn test_render_space_separator() {
        let tokens = [Token::raw("a;"), Token::Separator(Separator::Space), Token::raw("b;")];
        assert_eq!(render(&tokens), "a; b;");
    }
}
