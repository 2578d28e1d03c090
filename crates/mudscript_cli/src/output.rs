//! Plain-text rendering of tokens and trees.

use std::fmt::Write;

use mudscript_ast::{Child, ErrorKind, NodeId, SyntaxTree, Token};

/// One line per token, `Kind start..end "text"`, with its trivia indented above it.
pub fn render_tokens(tokens: &[Token], source: &str, include_trivia: bool) -> String {
    let mut out = String::new();
    for token in tokens {
        if include_trivia {
            for trivia in &token.trivia {
                out.push_str("  ");
                write_token(&mut out, trivia, source);
            }
        }
        write_token(&mut out, token, source);
    }
    out
}

/// The tree as an indented outline. Tokens and child nodes are prefixed with
/// the slot that holds them.
pub fn render_tree(tree: &SyntaxTree, source: &str) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), None, 0, source, &mut out);
    out
}

fn render_node(
    tree: &SyntaxTree,
    id: NodeId,
    slot: Option<&str>,
    depth: usize,
    source: &str,
    out: &mut String,
) {
    let node = tree.node(id);
    indent(out, depth);
    if let Some(slot) = slot {
        let _ = write!(out, "{slot}: ");
    }
    let _ = write!(out, "{}", node.kind());
    match node.error {
        Some(error) => {
            let _ = writeln!(out, " [{error}]");
        }
        None => out.push('\n'),
    }

    node.data.for_each_slot(&mut |slot, child| match child {
        Child::Token(token) => {
            indent(out, depth + 1);
            let _ = write!(out, "{slot}: ");
            write_token(out, token, source);
        }
        Child::Node(child) => render_node(tree, child, Some(slot), depth + 1, source, out),
    });
}

fn write_token(out: &mut String, token: &Token, source: &str) {
    let _ = write!(out, "{} {:?} {:?}", token.kind, token.span(), token.text(source));
    match (token.error, token.kind.text()) {
        (Some(ErrorKind::MissingToken), Some(text)) => {
            let _ = write!(out, " [MissingToken, expected {text:?}]");
        }
        (Some(error), _) => {
            let _ = write!(out, " [{error}]");
        }
        (None, _) => {}
    }
    out.push('\n');
}

#[inline]
fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudscript_lexer::Lexer;
    use mudscript_parser::parse_source_document;

    #[test]
    fn test_render_tokens() {
        let source = "class Foo";
        let tokens = Lexer::new(source).tokenize();
        assert_eq!(
            render_tokens(&tokens, source, true),
            "ClassKeyword 0..5 \"class\"\n  Whitespace 5..6 \" \"\nName 6..9 \"Foo\"\nEndOfFile 9..9 \"\"\n"
        );
        assert_eq!(
            render_tokens(&tokens, source, false),
            "ClassKeyword 0..5 \"class\"\nName 6..9 \"Foo\"\nEndOfFile 9..9 \"\"\n"
        );
    }

    #[test]
    fn test_render_tree() {
        let source = "class Foo {";
        let tree = parse_source_document(source);
        let expected = "\
SourceFile
  statements: ClassDeclaration
    class_keyword: ClassKeyword 0..5 \"class\"
    name: Name 6..9 \"Foo\"
    members: ClassMembers
      open_brace: LeftBrace 10..11 \"{\"
      close_brace: RightBrace 11..11 \"\" [MissingToken, expected \"}\"]
  end_of_file: EndOfFile 11..11 \"\"
";
        assert_eq!(render_tree(&tree, source), expected);
    }
}
