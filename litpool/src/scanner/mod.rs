//!
//! Literal Scanner
//!
//! Walks script source and reports the tokens that become literal-pool
//! entries: identifiers, string literals and numeric literals. Everything
//! else (punctuation, operators, reserved words, comments) is skipped.
//! This is not a full lexer; it exists so the CLI can feed real source into
//! the pool.
//!
//! Key design decisions:
//! - Zero-copy: token text borrows the source buffer, and so do the
//!   literals built from it
//! - String bodies are kept raw; escape sequences are not decoded
//! - Regular expression and template literals are not recognized
//! - memchr drives the comment and string scans
//!
//! Token categories:
//! - Identifier: names that are not reserved words
//! - String: body of a '...' or "..." literal, quotes excluded
//! - Number: decimal (with fraction and exponent) or 0x hexadecimal
//!

mod error;

pub use error::ScanError;

use memchr::{memchr, memchr3, memmem};
use tracing::debug;

use crate::literal::Literal;
use crate::pool::{LiteralIndex, LiteralPool};
use crate::source::Span;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Identifier,
    String,
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn literal(&self) -> Literal<'a> {
        match self.kind {
            TokenKind::Identifier | TokenKind::String => Literal::from_text(self.text),
            TokenKind::Number(num) => Literal::from_number(num),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanResult<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<ScanError>,
}

impl<'a> ScanResult<'a> {
    /// Interns every token into `pool` and returns the index per token.
    /// Identifiers are skipped unless `identifiers` is set.
    pub fn intern_into(&self, pool: &mut LiteralPool<'a>, identifiers: bool) -> Vec<LiteralIndex> {
        self.tokens
            .iter()
            .filter(|token| identifiers || token.kind != TokenKind::Identifier)
            .map(|token| pool.intern(token.literal()))
            .collect()
    }
}

pub fn scan(source: &str) -> ScanResult<'_> {
    scan_file(source, 0)
}

pub fn scan_file(source: &str, file_id: u32) -> ScanResult<'_> {
    let mut scanner = Scanner::new(source, file_id);
    scanner.scan_all();
    debug!(
        tokens = scanner.result.tokens.len(),
        errors = scanner.result.errors.len(),
        "scanned source"
    );
    scanner.result
}

/// Words that never name a pool entry.
pub fn is_reserved(word: &str) -> bool {
    matches!(
        word,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "enum"
            | "export"
            | "extends"
            | "false"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "import"
            | "in"
            | "instanceof"
            | "new"
            | "null"
            | "return"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
    )
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    file_id: u32,
    result: ScanResult<'a>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, file_id: u32) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            file_id,
            result: ScanResult::default(),
        }
    }

    #[inline(always)]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline(always)]
    fn peek_byte2(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    #[inline(always)]
    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    fn span(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32, self.file_id)
    }

    fn push(&mut self, kind: TokenKind, text: &'a str, start: usize) {
        let span = self.span(start);
        self.result.tokens.push(Token { kind, text, span });
    }

    fn scan_all(&mut self) {
        while let Some(b) = self.peek_byte() {
            let start = self.pos;
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.peek_byte2() == Some(b'/') => {
                    self.pos = match memchr(b'\n', &self.bytes[self.pos..]) {
                        Some(offset) => self.pos + offset,
                        None => self.bytes.len(),
                    };
                }
                b'/' if self.peek_byte2() == Some(b'*') => self.scan_block_comment(start),
                b'"' | b'\'' => self.scan_string(b, start),
                b'0'..=b'9' => self.scan_number(start),
                b'.' if matches!(self.peek_byte2(), Some(b'0'..=b'9')) => self.scan_number(start),
                _ if is_ident_start(b) => self.scan_ident(start),
                _ if b >= 0x80 => self.scan_unicode(start),
                _ => self.pos += 1,
            }
        }
    }

    fn scan_block_comment(&mut self, start: usize) {
        match memmem::find(&self.bytes[self.pos + 2..], b"*/") {
            Some(offset) => self.pos += 2 + offset + 2,
            None => {
                self.pos = self.bytes.len();
                let span = self.span(start);
                self.result.errors.push(ScanError::UnterminatedComment { span });
            }
        }
    }

    fn scan_string(&mut self, quote: u8, start: usize) {
        self.pos += 1;
        loop {
            match memchr3(quote, b'\\', b'\n', &self.bytes[self.pos..]) {
                Some(offset) => {
                    self.pos += offset;
                    match self.bytes[self.pos] {
                        b'\\' => {
                            self.pos += 1;
                            // The escaped character may be multi-byte.
                            if let Some(c) = self.source[self.pos..].chars().next() {
                                self.pos += c.len_utf8();
                            }
                        }
                        b'\n' => break,
                        _ => {
                            self.pos += 1;
                            let text = self.slice(start + 1, self.pos - 1);
                            self.push(TokenKind::String, text, start);
                            return;
                        }
                    }
                }
                None => {
                    self.pos = self.bytes.len();
                    break;
                }
            }
        }
        let span = self.span(start);
        self.result.errors.push(ScanError::UnterminatedString { span });
    }

    fn scan_number(&mut self, start: usize) {
        let value = if self.peek_byte() == Some(b'0') && matches!(self.peek_byte2(), Some(b'x' | b'X')) {
            self.pos += 2;
            self.scan_hex_digits()
        } else {
            self.scan_decimal(start)
        };

        // A number running straight into a name, like `3in`, is malformed.
        let trailing = self.peek_byte().is_some_and(is_ident_start);
        if trailing {
            self.skip_ident_chars();
        }

        match value {
            Some(num) if !trailing => {
                let text = self.slice(start, self.pos);
                self.push(TokenKind::Number(num), text, start);
            }
            _ => {
                let span = self.span(start);
                self.result.errors.push(ScanError::InvalidNumber { span });
            }
        }
    }

    fn scan_hex_digits(&mut self) -> Option<f64> {
        let mut value = 0.0f64;
        let mut digits = 0;
        while let Some(digit) = self.peek_byte().and_then(|b| (b as char).to_digit(16)) {
            value = value * 16.0 + digit as f64;
            digits += 1;
            self.pos += 1;
        }
        (digits > 0).then_some(value)
    }

    fn scan_decimal(&mut self, start: usize) -> Option<f64> {
        self.skip_digits();
        if self.peek_byte() == Some(b'.') {
            self.pos += 1;
            self.skip_digits();
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                return None;
            }
            self.skip_digits();
        }
        self.source[start..self.pos].parse().ok()
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn skip_ident_chars(&mut self) {
        while let Some(c) = self.source[self.pos..].chars().next() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn scan_ident(&mut self, start: usize) {
        self.skip_ident_chars();
        let text = self.slice(start, self.pos);
        if !is_reserved(text) {
            self.push(TokenKind::Identifier, text, start);
        }
    }

    fn scan_unicode(&mut self, start: usize) {
        match self.source[self.pos..].chars().next() {
            Some(c) if c.is_alphabetic() => self.scan_ident(start),
            Some(c) => self.pos += c.len_utf8(),
            None => self.pos = self.bytes.len(),
        }
    }
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_scan_empty() {
        let result = scan("");
        assert!(result.tokens.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_scan_identifiers_skip_reserved_words() {
        let result = scan("var length = obj.prototype; return café;");
        let texts: Vec<_> = result.tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["length", "obj", "prototype", "café"]);
        assert!(result.tokens.iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_scan_numbers() {
        assert_eq!(
            kinds("42 2.75 .5 1e3 2E-2 0x1F 7."),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(2.75),
                TokenKind::Number(0.5),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.02),
                TokenKind::Number(31.0),
                TokenKind::Number(7.0),
            ]
        );
    }

    #[test]
    fn test_scan_invalid_numbers() {
        let result = scan("3in 1e+ 0x; ok");
        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.errors[0], ScanError::InvalidNumber { span: Span::new(0, 3, 0) });
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].text, "ok");
    }

    #[test]
    fn test_scan_strings_keep_raw_body() {
        let result = scan(r#"a = "hello"; b = 'it\'s'; c = "";"#);
        let strings: Vec<_> = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::String)
            .map(|t| t.text)
            .collect();
        assert_eq!(strings, vec!["hello", r"it\'s", ""]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_scan_unterminated_string() {
        let result = scan("x = 'abc\ny = 1");
        assert_eq!(result.errors, vec![ScanError::UnterminatedString { span: Span::new(4, 8, 0) }]);
        let texts: Vec<_> = result.tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["x", "y", "1"]);
    }

    #[test]
    fn test_scan_comments() {
        let result = scan("a // b 'c'\n/* d \"e\" */ f");
        let texts: Vec<_> = result.tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "f"]);

        let result = scan("a /* never closed");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], ScanError::UnterminatedComment { .. }));
    }

    #[test]
    fn test_token_spans() {
        let source = "foo('bar', 12)";
        let result = scan(source);
        let spans: Vec<_> = result.tokens.iter().map(|t| &source[t.span.range()]).collect();
        assert_eq!(spans, vec!["foo", "'bar'", "12"]);
    }

    #[test]
    fn test_intern_into_deduplicates() {
        let source = "x.length = 'length'; y = 42 + '42'; z = x;";
        let result = scan(source);
        let mut pool = LiteralPool::new();

        let indices = result.intern_into(&mut pool, true);
        assert_eq!(indices.len(), result.tokens.len());
        // x, length, y, 42, z
        assert_eq!(pool.len(), 5);

        let mut strings_only = LiteralPool::new();
        result.intern_into(&mut strings_only, false);
        // 'length', 42
        assert_eq!(strings_only.len(), 2);
    }
}
