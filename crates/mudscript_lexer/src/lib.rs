//! mudscript_lexer: Tokenizer for mudscript source text.
//!
//! The lexer is lossless: whitespace, comments and `#` directives are kept
//! as leading trivia of the next substantive token, so the spans of all
//! tokens and their trivia tile the document exactly. It supports:
//! - bounded lookahead through `look(n)`
//! - error tokens instead of failures (unknown characters, unterminated
//!   strings and comments, unknown directives)

mod char_codes;
mod lexer;

pub use lexer::{Lexer, MAX_LOOKAHEAD};
