//! mudscript_diagnostics: Syntax diagnostics for parsed documents.
//!
//! Walks a `SyntaxTree` and turns every token the parser flagged during
//! recovery into a `Diagnostic` with a line/character range. Lexical errors
//! are visited but not reported.

use mudscript_ast::{walk, ErrorKind, SyntaxKind, SyntaxTree, Token, Visitor};
use mudscript_core::text::{range_from_position, Range, TextSpan};
use mudscript_core::ContractViolation;
use serde::{Serialize, Serializer};
use std::fmt;

/// Diagnostic severity, numbered the way editors expect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl Serialize for DiagnosticSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// A located problem in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub range: Range,
    pub severity: DiagnosticSeverity,
    /// Byte span the range was computed from.
    #[serde(skip)]
    pub span: TextSpan,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.range.start, self.severity, self.message)
    }
}

/// Message for a syntax error recorded on a token of `kind`.
///
/// Lexical error kinds have no syntax message; passing one is a contract
/// violation.
pub fn syntax_error_message(
    error: ErrorKind,
    kind: SyntaxKind,
) -> Result<String, ContractViolation> {
    match error {
        ErrorKind::MissingToken => Ok(format!("Expected {kind}")),
        ErrorKind::SkippedToken => Ok(format!("Unexpected {kind}")),
        ErrorKind::UnknownToken | ErrorKind::UnexpectedEndOfFile | ErrorKind::UnknownDirective => {
            Err(ContractViolation::NotASyntaxError(error.name()))
        }
    }
}

struct DiagnosticCollector<'d> {
    document: &'d str,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Visitor<'t> for DiagnosticCollector<'_> {
    fn visit_token(&mut self, _slot: &'static str, token: &'t Token) {
        let Some(error) = token.error else {
            return;
        };
        // Lexical errors are not reported.
        let Ok(message) = syntax_error_message(error, token.kind) else {
            return;
        };
        tracing::trace!(%message, start = token.start, "syntax diagnostic");
        self.diagnostics.push(Diagnostic {
            message,
            range: range_from_position(token.start, token.length, self.document),
            severity: DiagnosticSeverity::Error,
            span: token.span(),
        });
    }
}

/// Collect the syntax diagnostics of `tree`, in source order.
///
/// `document` must be the text `tree` was parsed from.
#[tracing::instrument(skip_all, fields(source_len = document.len()))]
pub fn get_diagnostics(tree: &SyntaxTree, document: &str) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector {
        document,
        diagnostics: Vec::new(),
    };
    walk(tree, &mut collector);
    tracing::debug!(count = collector.diagnostics.len(), "collected diagnostics");
    collector.diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_messages() {
        assert_eq!(
            syntax_error_message(ErrorKind::MissingToken, SyntaxKind::RightBrace).as_deref(),
            Ok("Expected RightBrace")
        );
        assert_eq!(
            syntax_error_message(ErrorKind::SkippedToken, SyntaxKind::UnknownToken).as_deref(),
            Ok("Unexpected UnknownToken")
        );
    }

    #[test]
    fn test_lexical_errors_have_no_message() {
        for error in [
            ErrorKind::UnknownToken,
            ErrorKind::UnexpectedEndOfFile,
            ErrorKind::UnknownDirective,
        ] {
            assert_eq!(
                syntax_error_message(error, SyntaxKind::Name),
                Err(ContractViolation::NotASyntaxError(error.name()))
            );
        }
    }

    #[test]
    fn test_severity_serializes_as_number() {
        assert_eq!(DiagnosticSeverity::Error as u8, 1);
        assert_eq!(DiagnosticSeverity::Hint as u8, 4);
        assert!(DiagnosticSeverity::Error < DiagnosticSeverity::Warning);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            message: "Expected Name".to_string(),
            range: range_from_position(6, 0, "class {}"),
            severity: DiagnosticSeverity::Error,
            span: TextSpan::empty(6),
        };
        assert_eq!(diagnostic.to_string(), "1:7: error: Expected Name");
        assert!(diagnostic.is_error());
    }
}
