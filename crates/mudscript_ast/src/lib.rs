//! mudscript_ast: Tokens and syntax tree definitions for mudscript.
//!
//! This crate defines the token vocabulary (`SyntaxKind`, `ErrorKind`,
//! `Token`), the closed set of node kinds, the arena-backed `SyntaxTree`
//! and a generic depth-first walk over it.

pub mod node;
pub mod syntax_kind;
pub mod token;
pub mod tree;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use token::{ErrorKind, Token};
pub use tree::{NodeArena, SyntaxTree};
pub use visitor::{walk, walk_node, Visitor};
