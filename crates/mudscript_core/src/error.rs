//! Contract violations.
//!
//! Malformed source text never produces one of these: lexical and syntactic
//! problems are recorded on tokens and recovered from. A `ContractViolation`
//! means a caller used an API outside of its documented domain.

use thiserror::Error;

/// A programming error detected at an API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A list was parsed in a context that has no registered rules.
    #[error("no parse rules registered for context {0}")]
    UnregisteredContext(&'static str),

    /// A lexical error kind was handed to the syntax-error message formatter.
    #[error("{0} is not a syntax error kind")]
    NotASyntaxError(&'static str),

    /// `look(n)` was asked for a depth outside `1..=max`.
    #[error("lookahead depth {depth} is outside 1..={max}")]
    LookaheadOutOfRange { depth: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violation_display() {
        let err = ContractViolation::UnregisteredContext("ClassMembers");
        assert_eq!(err.to_string(), "no parse rules registered for context ClassMembers");

        let err = ContractViolation::NotASyntaxError("UnknownToken");
        assert_eq!(err.to_string(), "UnknownToken is not a syntax error kind");

        let err = ContractViolation::LookaheadOutOfRange { depth: 0, max: 8 };
        assert_eq!(err.to_string(), "lookahead depth 0 is outside 1..=8");
    }
}
