//! Generic depth-first traversal of a syntax tree.
//!
//! The walk is driven entirely by [`NodeData::for_each_slot`], so it covers
//! every node kind without a per-kind visit method.

use crate::node::{Child, Node, NodeId};
use crate::token::Token;
use crate::tree::SyntaxTree;

/// Callbacks for [`walk`]. Every method defaults to doing nothing.
pub trait Visitor<'t> {
    /// Called before the slots of `node` are visited.
    fn enter_node(&mut self, _id: NodeId, _node: &'t Node) {}

    /// Called for every token held in a slot. Trivia is not visited.
    fn visit_token(&mut self, _slot: &'static str, _token: &'t Token) {}

    /// Called after all slots of `node` have been visited.
    fn leave_node(&mut self, _id: NodeId, _node: &'t Node) {}
}

/// Walk the whole tree in pre-order, starting at the root.
pub fn walk<'t, V: Visitor<'t>>(tree: &'t SyntaxTree, visitor: &mut V) {
    walk_node(tree, tree.root(), visitor);
}

/// Walk the subtree rooted at `id`.
pub fn walk_node<'t, V: Visitor<'t>>(tree: &'t SyntaxTree, id: NodeId, visitor: &mut V) {
    let node = tree.node(id);
    visitor.enter_node(id, node);
    node.data.for_each_slot(&mut |slot, child| match child {
        Child::Token(token) => visitor.visit_token(slot, token),
        Child::Node(child) => walk_node(tree, child, visitor),
    });
    visitor.leave_node(id, node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Block, Element, NodeKind, SourceFile};
    use crate::syntax_kind::SyntaxKind;
    use crate::tree::NodeArena;

    struct Trace(Vec<String>);

    impl<'t> Visitor<'t> for Trace {
        fn enter_node(&mut self, _id: NodeId, node: &'t Node) {
            self.0.push(format!("enter {}", node.kind()));
        }

        fn visit_token(&mut self, slot: &'static str, token: &'t Token) {
            self.0.push(format!("{slot} {}", token.kind));
        }

        fn leave_node(&mut self, _id: NodeId, node: &'t Node) {
            self.0.push(format!("leave {}", node.kind()));
        }
    }

    #[test]
    fn test_walk_is_pre_order() {
        let mut arena = NodeArena::new();
        let block = arena.alloc(Block {
            open_brace: Token::new(SyntaxKind::LeftBrace, 0, 1),
            statements: Vec::new(),
            close_brace: Token::new(SyntaxKind::RightBrace, 1, 1),
        });
        let root = arena.alloc(SourceFile {
            statements: vec![Element::Node(block)],
            end_of_file: Token::new(SyntaxKind::EndOfFile, 2, 0),
        });
        let tree = arena.finish(root);

        let mut trace = Trace(Vec::new());
        walk(&tree, &mut trace);
        assert_eq!(
            trace.0,
            [
                "enter SourceFile",
                "enter Block",
                "open_brace LeftBrace",
                "close_brace RightBrace",
                "leave Block",
                "end_of_file EndOfFile",
                "leave SourceFile",
            ]
        );
        assert_eq!(tree.node(block).kind(), NodeKind::Block);
    }
}
