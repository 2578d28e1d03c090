//! Syntax diagnostics rendered as miette reports.

// Fields read only by the derive macros.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use mudscript_diagnostics::{Diagnostic as SyntaxError, DiagnosticSeverity};

/// A syntax error with its source context.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(mudscript::syntax))]
pub struct SyntaxDiagnostic {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{label}")]
    pub span: SourceSpan,
    pub label: String,
}

impl SyntaxDiagnostic {
    pub fn new(diagnostic: &SyntaxError, source_path: &str, source: &str) -> Self {
        let label = match diagnostic.severity {
            DiagnosticSeverity::Error => "error here",
            DiagnosticSeverity::Warning => "warning here",
            DiagnosticSeverity::Information | DiagnosticSeverity::Hint => "here",
        };

        Self {
            message: diagnostic.message.clone(),
            src: NamedSource::new(source_path, source.to_string()),
            span: (diagnostic.span.start as usize, diagnostic.span.length as usize).into(),
            label: label.to_string(),
        }
    }
}
