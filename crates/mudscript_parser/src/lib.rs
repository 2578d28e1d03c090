//! mudscript_parser: Recursive descent parser for mudscript.
//!
//! Parses the lexer's token stream into an arena-backed `SyntaxTree`.
//! Parsing never fails; malformed input is represented in the tree through
//! missing and skipped tokens.

mod context;
mod parser;
mod precedence;

pub use context::{can_start_expression, can_start_statement, ParseContext};
pub use parser::{parse_source_document, Parser};
pub use precedence::{get_binary_operator_info, Associativity, OperatorInfo, OperatorPrecedence};
