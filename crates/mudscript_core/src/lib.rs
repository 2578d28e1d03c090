//! mudscript_core: Core utilities shared by the mudscript front end.
//!
//! Provides text spans, line/character positions and the error type used
//! for violated API contracts.

pub mod error;
pub mod text;

// Re-export commonly used types
pub use error::ContractViolation;
pub use text::{position_at, range_from_position, Position, Range, TextPos, TextSpan};
