//! Byte classification helpers used by the lexer.
//!
//! Identifiers are ASCII only. Anything outside the classes below becomes
//! an `UnknownToken`.

/// Check if a byte is a line terminator.
#[inline]
pub fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Check if a byte is whitespace (including line breaks).
#[inline]
pub fn is_white_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t') || is_line_break(b)
}

/// Check if a byte is a decimal digit.
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Check if a byte can start an identifier.
#[inline]
pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Check if a byte can continue an identifier.
#[inline]
pub fn is_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Check if a byte is a string delimiter.
#[inline]
pub fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start(b'a'));
        assert!(is_identifier_start(b'_'));
        assert!(!is_identifier_start(b'1'));
        assert!(is_identifier_part(b'1'));
        assert!(!is_identifier_part(b'-'));
    }

    #[test]
    fn test_white_space_classes() {
        for b in [b' ', b'\t', b'\r', b'\n'] {
            assert!(is_white_space(b));
        }
        assert!(!is_white_space(b'x'));
        assert!(is_line_break(b'\r'));
        assert!(!is_line_break(b'\t'));
    }
}
