//! Text span and position types for source location tracking.
//!
//! Offsets are byte offsets into the UTF-8 document. Positions are zero-based
//! line/character pairs where the character counts Unicode scalar values
//! since the start of the line.

use serde::Serialize;
use std::fmt;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A zero-based line/character position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// 0-based line number.
    pub line: u32,
    /// 0-based character offset within the line.
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A start/end pair of positions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Convert a byte span of `text` into a line/character range.
///
/// Both ends are clamped into `[0, text.len()]` and floored to a character
/// boundary, so the call never fails.
pub fn range_from_position(offset: TextPos, length: TextPos, text: &str) -> Range {
    let start = offset as usize;
    let end = start.saturating_add(length as usize);
    Range {
        start: position_at(text, start),
        end: position_at(text, end),
    }
}

/// Line/character position of a byte offset in `text`.
pub fn position_at(text: &str, offset: usize) -> Position {
    let offset = floor_char_boundary(text, offset);
    let before = &text.as_bytes()[..offset];
    let line = memchr::memchr_iter(b'\n', before).count();
    let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
    let character = text[line_start..offset].chars().count();
    Position::new(line as u32, character as u32)
}

#[inline]
fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
        assert_eq!(span.to_range(), 5..15);
    }

    #[test]
    fn test_text_span_empty() {
        let span = TextSpan::empty(3);
        assert_eq!(span.start, 3);
        assert!(span.is_empty());
        assert!(!TextSpan::new(3, 1).is_empty());
    }

    #[test]
    fn test_position_at_line_starts() {
        let text = "line1\nline2\nline3";
        assert_eq!(position_at(text, 0), Position::new(0, 0));
        assert_eq!(position_at(text, 5), Position::new(0, 5));
        assert_eq!(position_at(text, 6), Position::new(1, 0));
        assert_eq!(position_at(text, 8), Position::new(1, 2));
        assert_eq!(position_at(text, 12), Position::new(2, 0));
    }

    #[test]
    fn test_range_from_position_single_line() {
        let range = range_from_position(6, 3, "class Foo {}");
        assert_eq!(range.start, Position::new(0, 6));
        assert_eq!(range.end, Position::new(0, 9));
    }

    #[test]
    fn test_range_from_position_spans_lines() {
        let text = "a\nbc\ndef";
        let range = range_from_position(1, 5, text);
        assert_eq!(range.start, Position::new(0, 1));
        assert_eq!(range.end, Position::new(2, 1));
    }

    #[test]
    fn test_range_from_position_clamps() {
        let text = "abc";
        let range = range_from_position(10, 4, text);
        assert_eq!(range.start, Position::new(0, 3));
        assert_eq!(range.end, Position::new(0, 3));

        let range = range_from_position(0, 0, "");
        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(0, 0));
    }

    #[test]
    fn test_range_counts_characters_not_bytes() {
        // '§' is two bytes in UTF-8
        let text = "§x";
        let range = range_from_position(2, 1, text);
        assert_eq!(range.start, Position::new(0, 1));
        assert_eq!(range.end, Position::new(0, 2));

        // an offset inside a multi-byte character floors to its start
        assert_eq!(position_at(text, 1), Position::new(0, 0));
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }
}
