//! The mudscript lexer.
//!
//! Tokens are produced on demand. Each call first collects trivia, then
//! scans one substantive token and attaches the collected trivia to it.
//! Tokens requested through [`Lexer::look`] are kept in a bounded buffer so
//! that [`Lexer::advance`] hands out exactly the same tokens afterwards.

use std::collections::VecDeque;

use memchr::{memchr2, memmem};
use mudscript_ast::{ErrorKind, SyntaxKind, Token};
use mudscript_core::ContractViolation;

use crate::char_codes::*;

/// Deepest lookahead `look(n)` accepts.
pub const MAX_LOOKAHEAD: usize = 8;

/// The lexer converts mudscript source text into tokens.
pub struct Lexer<'a> {
    /// The source text being tokenized.
    text: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Tokens produced by `look` and not yet consumed by `advance`.
    lookahead: VecDeque<Token>,
    /// Whether the end-of-file token has been produced.
    eof_produced: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            lookahead: VecDeque::with_capacity(MAX_LOOKAHEAD),
            eof_produced: false,
        }
    }

    /// Restart tokenization at offset 0 of a new document.
    #[tracing::instrument(level = "debug", skip_all, fields(source_len = text.len()))]
    pub fn reset(&mut self, text: &'a str) {
        self.text = text;
        self.pos = 0;
        self.lookahead.clear();
        self.eof_produced = false;
    }

    /// The document being tokenized.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Consume and return the next token.
    ///
    /// The end-of-file token is returned exactly once; every later call
    /// returns `None`.
    pub fn advance(&mut self) -> Option<Token> {
        match self.lookahead.pop_front() {
            Some(token) => Some(token),
            None => self.produce(),
        }
    }

    /// Peek at the token the `n`-th following `advance()` would return.
    ///
    /// # Panics
    ///
    /// Panics when `n` is outside `1..=MAX_LOOKAHEAD`.
    pub fn look(&mut self, n: usize) -> Option<&Token> {
        match self.try_look(n) {
            Ok(token) => token,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`Lexer::look`], but reports an out-of-range depth as an error.
    pub fn try_look(&mut self, n: usize) -> Result<Option<&Token>, ContractViolation> {
        if !(1..=MAX_LOOKAHEAD).contains(&n) {
            return Err(ContractViolation::LookaheadOutOfRange {
                depth: n,
                max: MAX_LOOKAHEAD,
            });
        }
        while self.lookahead.len() < n {
            match self.produce() {
                Some(token) => self.lookahead.push_back(token),
                None => break,
            }
        }
        Ok(self.lookahead.get(n - 1))
    }

    /// Tokenize the rest of the document, end-of-file token included.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.advance() {
            tokens.push(token);
        }
        tokens
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// Look at the byte at position pos + offset.
    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    fn token_from(&self, kind: SyntaxKind, start: usize) -> Token {
        Token::new(kind, start as u32, (self.pos - start) as u32)
    }

    /// Produce the next token straight from the text, bypassing the buffer.
    fn produce(&mut self) -> Option<Token> {
        if self.eof_produced {
            return None;
        }

        let mut trivia = Vec::new();
        while let Some(token) = self.scan_trivia() {
            trivia.push(token);
        }

        let token = if self.is_eof() {
            self.eof_produced = true;
            Token::new(SyntaxKind::EndOfFile, self.text.len() as u32, 0)
        } else {
            self.scan_token()
        };

        if let Some(error) = token.error {
            tracing::trace!(kind = %token.kind, start = token.start, %error, "lexical error");
        }
        Some(token.with_trivia(trivia))
    }

    /// Scan one piece of trivia, or return `None` if a substantive token
    /// (or the end of the text) comes next.
    fn scan_trivia(&mut self) -> Option<Token> {
        let start = self.pos;
        match self.byte_at(0)? {
            b if is_white_space(b) => {
                while self.byte_at(0).is_some_and(is_white_space) {
                    self.pos += 1;
                }
                Some(self.token_from(SyntaxKind::Whitespace, start))
            }
            b'/' if self.byte_at(1) == Some(b'/') => {
                self.skip_to_line_end();
                Some(self.token_from(SyntaxKind::SingleLineComment, start))
            }
            b'/' if self.byte_at(1) == Some(b'*') => Some(self.scan_multi_line_comment()),
            b'#' => Some(self.scan_directive()),
            _ => None,
        }
    }

    /// Move to the next line break (exclusive) or the end of the text.
    fn skip_to_line_end(&mut self) {
        self.pos = match memchr2(b'\n', b'\r', &self.bytes()[self.pos..]) {
            Some(offset) => self.pos + offset,
            None => self.text.len(),
        };
    }

    fn scan_multi_line_comment(&mut self) -> Token {
        let start = self.pos;
        let body = start + 2;
        match memmem::find(&self.bytes()[body..], b"*/") {
            Some(offset) => {
                self.pos = body + offset + 2;
                self.token_from(SyntaxKind::MultiLineComment, start)
            }
            None => {
                self.pos = self.text.len();
                self.token_from(SyntaxKind::MultiLineComment, start)
                    .with_error(ErrorKind::UnexpectedEndOfFile)
            }
        }
    }

    /// `#word ...` up to the end of the line, or a lone `#`.
    fn scan_directive(&mut self) -> Token {
        let start = self.pos;
        if !self.byte_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
            return self
                .token_from(SyntaxKind::UnknownDirective, start)
                .with_error(ErrorKind::UnknownDirective);
        }

        self.pos += 1;
        let word_start = self.pos;
        while self.byte_at(0).is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let kind = SyntaxKind::from_directive(&self.text[word_start..self.pos]);
        self.skip_to_line_end();

        match kind {
            Some(kind) => self.token_from(kind, start),
            None => self
                .token_from(SyntaxKind::UnknownDirective, start)
                .with_error(ErrorKind::UnknownDirective),
        }
    }

    /// Scan one substantive token. The caller guarantees we are not at EOF.
    fn scan_token(&mut self) -> Token {
        let start = self.pos;
        match self.bytes()[start] {
            b if is_identifier_start(b) => self.scan_identifier(),
            b if is_digit(b) => {
                while self.byte_at(0).is_some_and(is_digit) {
                    self.pos += 1;
                }
                self.token_from(SyntaxKind::NumberLiteral, start)
            }
            b if is_quote(b) => self.scan_string_literal(b),
            _ => self.scan_punctuation(),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self.byte_at(0).is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let kind = SyntaxKind::from_keyword(&self.text[start..self.pos])
            .unwrap_or(SyntaxKind::Name);
        self.token_from(kind, start)
    }

    fn scan_string_literal(&mut self, quote: u8) -> Token {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.byte_at(0) {
                None => {
                    return self
                        .token_from(SyntaxKind::StringLiteral, start)
                        .with_error(ErrorKind::UnexpectedEndOfFile);
                }
                Some(b'\\') => {
                    // A continuation byte is never a quote or a backslash,
                    // so stepping over one byte of the escaped character is enough.
                    self.pos = (self.pos + 2).min(self.text.len());
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return self.token_from(SyntaxKind::StringLiteral, start);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Operators and delimiters, longest match first. Anything else is a
    /// single unknown character.
    fn scan_punctuation(&mut self) -> Token {
        let start = self.pos;
        for width in [2, 1] {
            let Some(text) = self.text.get(start..start + width) else {
                continue;
            };
            if let Some(kind) = SyntaxKind::from_punctuation(text) {
                self.pos += width;
                return self.token_from(kind, start);
            }
        }

        let width = self.text[start..].chars().next().map_or(1, char::len_utf8);
        self.pos += width;
        self.token_from(SyntaxKind::UnknownToken, start)
            .with_error(ErrorKind::UnknownToken)
    }
}
