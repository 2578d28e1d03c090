//! Property-based tests for the parser.
//!
//! 1. **Coverage** - every lexed token appears in the tree exactly once, in order.
//! 2. **Lossless** - tree tokens and their trivia reassemble the input.
//! 3. **Parent links** - every non-root node is held by its parent.

use mudscript_ast::{Child, ErrorKind, SyntaxKind};
use mudscript_lexer::Lexer;
use mudscript_parser::parse_source_document;
use proptest::prelude::*;

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

/// Mostly well-formed fragments, shuffled into arbitrary order.
fn source_like() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(vec![
        "class ", "abstract ", "Foo ", ": Base ", "{ ", "} ", "var x ", "= ", "1 ", "; ",
        "static ", "verb v", "(", ")", "a, ", "if ", "else ", "while ", "do ", "return ",
        "switch ", "case ", "default ", "break ", "continue ", "new ", "+ ", "* ", "== ",
        "< ", "? ", "-> ", ". ", "[", "]", "++ ", "!", "\"s\" ", "// c\n", "#define X\n",
        "§", "@",
    ]);
    prop::collection::vec(fragment, 0..60).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn every_token_is_in_the_tree(input in source_like()) {
        let tree = parse_source_document(&input);
        let lexed: Vec<_> = Lexer::new(&input)
            .tokenize()
            .into_iter()
            .map(|t| (t.kind, t.start, t.length))
            .collect();
        let parsed: Vec<_> = tree
            .tokens()
            .into_iter()
            .filter(|t| !t.is_missing())
            .map(|t| (t.kind, t.start, t.length))
            .collect();
        prop_assert_eq!(parsed, lexed);
    }

    #[test]
    fn tree_is_lossless(input in source_like()) {
        let tree = parse_source_document(&input);
        let mut rebuilt = String::with_capacity(input.len());
        for token in tree.tokens() {
            for trivia in &token.trivia {
                rebuilt.push_str(trivia.text(&input));
            }
            rebuilt.push_str(token.text(&input));
        }
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn missing_tokens_are_zero_width(input in source_like()) {
        let tree = parse_source_document(&input);
        for token in tree.tokens() {
            if token.error == Some(ErrorKind::MissingToken) {
                prop_assert_eq!(token.length, 0);
                prop_assert!(token.trivia.is_empty());
            }
        }
        let eof = tree.tokens().last().map(|t| t.kind);
        prop_assert_eq!(eof, Some(SyntaxKind::EndOfFile));
        prop_assert!(tree
            .source_file()
            .is_some_and(|file| file.end_of_file.error.is_none()));
    }

    #[test]
    fn parents_hold_their_children(input in source_like()) {
        let tree = parse_source_document(&input);
        prop_assert!(tree.node(tree.root()).parent.is_none());
        for (id, node) in tree.iter() {
            let mut children = Vec::new();
            node.data.for_each_slot(&mut |_, child| {
                if let Child::Node(child) = child {
                    children.push(child);
                }
            });
            for child in children {
                prop_assert_eq!(tree.parent(child), Some(id));
            }
        }
    }
}
