//! Tokens and the errors attached to them.

use mudscript_core::text::{TextPos, TextSpan};
use serde::Serialize;
use std::fmt;

use crate::syntax_kind::SyntaxKind;

/// An error recorded on a token or node.
///
/// The first three variants are produced by the lexer, the last two by the
/// parser's recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    UnknownToken,
    UnexpectedEndOfFile,
    UnknownDirective,
    MissingToken,
    SkippedToken,
}

impl ErrorKind {
    /// Whether the parser produced this error.
    #[inline]
    pub fn is_syntax(self) -> bool {
        matches!(self, ErrorKind::MissingToken | ErrorKind::SkippedToken)
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::UnknownToken => "UnknownToken",
            ErrorKind::UnexpectedEndOfFile => "UnexpectedEndOfFile",
            ErrorKind::UnknownDirective => "UnknownDirective",
            ErrorKind::MissingToken => "MissingToken",
            ErrorKind::SkippedToken => "SkippedToken",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token together with the trivia that precedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Byte offset of the first character of the token (after its trivia).
    pub start: TextPos,
    /// Length in bytes. Zero for end-of-file and missing tokens.
    pub length: TextPos,
    /// Leading trivia in source order. Trivia never carries trivia itself.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trivia: Vec<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl Token {
    pub fn new(kind: SyntaxKind, start: TextPos, length: TextPos) -> Self {
        Self {
            kind,
            start,
            length,
            trivia: Vec::new(),
            error: None,
        }
    }

    /// A zero-width placeholder for a token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind, pos: TextPos) -> Self {
        Self::new(kind, pos, 0).with_error(ErrorKind::MissingToken)
    }

    pub fn with_error(mut self, error: ErrorKind) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_trivia(mut self, trivia: Vec<Token>) -> Self {
        self.trivia = trivia;
        self
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.start, self.length)
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.error == Some(ErrorKind::MissingToken)
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.error == Some(ErrorKind::SkippedToken)
    }

    /// The source text this token covers, without trivia.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span().to_range()).unwrap_or("")
    }
}
