//! Diagnostics integration tests.
//!
//! Parses documents and checks the diagnostics reported for them.

use mudscript_ast::ErrorKind;
use mudscript_core::text::Position;
use mudscript_diagnostics::{get_diagnostics, Diagnostic, DiagnosticSeverity};
use mudscript_parser::parse_source_document;
use proptest::prelude::*;

/// Byte offset of a line/character position, the inverse of `range_from_position`.
fn offset_of(source: &str, position: Position) -> usize {
    let line_start: usize = source
        .split('\n')
        .take(position.line as usize)
        .map(|line| line.len() + 1)
        .sum();
    source[line_start..]
        .char_indices()
        .nth(position.character as usize)
        .map_or(source.len(), |(i, _)| line_start + i)
}

/// Helper: parse and diagnose a document.
fn diagnose(source: &str) -> Vec<Diagnostic> {
    let tree = parse_source_document(source);
    get_diagnostics(&tree, source)
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

// ============================================================================
// Documents from the examples
// ============================================================================

#[test]
fn test_empty_document_is_clean() {
    assert!(diagnose("").is_empty());
}

#[test]
fn test_valid_classes_are_clean() {
    assert!(diagnose("class Foo {}").is_empty());
    assert!(diagnose("class Foo: BaseFoo {}").is_empty());
    assert!(diagnose("class abstract Foo : Bar { var x = 1; verb v(a) { return a; } }").is_empty());
}

#[test]
fn test_unknown_character() {
    let diagnostics = diagnose("§");
    assert_eq!(messages(&diagnostics), ["Unexpected UnknownToken"]);
    let d = &diagnostics[0];
    assert_eq!(d.severity, DiagnosticSeverity::Error);
    assert_eq!(d.range.start, Position::new(0, 0));
    assert_eq!(d.range.end, Position::new(0, 1));
}

#[test]
fn test_unclosed_class() {
    let diagnostics = diagnose("class Foo {");
    assert_eq!(messages(&diagnostics), ["Expected RightBrace"]);
    assert_eq!(diagnostics[0].range.start, Position::new(0, 11));
    assert_eq!(diagnostics[0].range.end, Position::new(0, 11));
}

// ============================================================================
// Ordering and ranges
// ============================================================================

#[test]
fn test_diagnostics_follow_source_order() {
    let source = "class {\n  var ;\n  42\n}";
    let diagnostics = diagnose(source);
    assert_eq!(
        messages(&diagnostics),
        ["Expected Name", "Expected Name", "Unexpected NumberLiteral"]
    );
    let starts: Vec<_> = diagnostics.iter().map(|d| d.range.start).collect();
    assert_eq!(
        starts,
        [Position::new(0, 6), Position::new(1, 6), Position::new(2, 2)]
    );
    assert_eq!(diagnostics[2].range.end, Position::new(2, 4));
}

#[test]
fn test_chained_equality_is_reported() {
    let diagnostics = diagnose("class A { verb v() { a == b == c; } }");
    assert_eq!(messages(&diagnostics), ["Unexpected EqualsEquals"]);
}

#[test]
fn test_missing_comma_is_reported() {
    let diagnostics = diagnose("class A { verb v(a b) { f(1 2); } }");
    assert_eq!(messages(&diagnostics), ["Expected Comma", "Expected Comma"]);
    assert_eq!(diagnostics[0].range.start, Position::new(0, 19));
    assert_eq!(diagnostics[1].range.start, Position::new(0, 28));
}

#[test]
fn test_lexical_errors_are_not_reported() {
    // Unterminated string and comment, and an unknown directive.
    let diagnostics = diagnose("class A { var s = \"open");
    assert_eq!(messages(&diagnostics), ["Expected Semicolon", "Expected RightBrace"]);
    assert!(diagnose("#pragma once\nclass A {}").is_empty());
    assert!(diagnose("class A {} /* open").is_empty());
}

#[test]
fn test_json_shape() {
    let diagnostics = diagnose("class Foo {");
    let json = serde_json::to_value(&diagnostics[0]).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({
            "message": "Expected RightBrace",
            "range": {
                "start": { "line": 0, "character": 11 },
                "end": { "line": 0, "character": 11 }
            },
            "severity": 1
        })
    );
}

// ============================================================================
// Correspondence with tree errors
// ============================================================================

proptest! {
    #[test]
    fn one_diagnostic_per_syntax_error(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "class ", "Foo ", ": ", "{ ", "} ", "var ", "verb ", "x ", "(", ")", "; ",
                "= ", "== ", "1 ", "§", "\n", "/* c */", "#x\n",
            ]),
            0..40,
        )
    ) {
        let source = parts.concat();
        let tree = parse_source_document(&source);
        let flagged: Vec<_> = tree
            .tokens()
            .into_iter()
            .filter(|t| t.error.is_some_and(ErrorKind::is_syntax))
            .collect();
        let diagnostics = get_diagnostics(&tree, &source);
        prop_assert_eq!(diagnostics.len(), flagged.len());
        for (diagnostic, token) in diagnostics.iter().zip(&flagged) {
            prop_assert_eq!(offset_of(&source, diagnostic.range.start), token.start as usize);
            prop_assert_eq!(offset_of(&source, diagnostic.range.end), token.end() as usize);
        }
        prop_assert!(diagnostics.iter().all(Diagnostic::is_error));
        prop_assert!(diagnostics.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    }
}
