//! Arena storage for syntax nodes.
//!
//! Trees are built bottom-up: a node's children are allocated before the node
//! itself, and allocating the node adopts them by writing their `parent`
//! index. Once a [`SyntaxTree`] is finished it is never mutated.

use serde::Serialize;

use crate::node::{AstNode, Child, Node, NodeData, NodeId, SourceFile};
use crate::token::{ErrorKind, Token};
use crate::visitor::{walk, Visitor};

/// Growable node storage used while parsing.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a node and make it the parent of every node in its slots.
    pub fn alloc(&mut self, data: impl Into<NodeData>) -> NodeId {
        self.alloc_node(data.into(), None)
    }

    /// Allocate a node that carries an error of its own.
    pub fn alloc_with_error(&mut self, data: impl Into<NodeData>, error: ErrorKind) -> NodeId {
        self.alloc_node(data.into(), Some(error))
    }

    fn alloc_node(&mut self, data: NodeData, error: Option<ErrorKind>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut children = Vec::new();
        data.for_each_slot(&mut |_, child| {
            if let Child::Node(child) = child {
                children.push(child);
            }
        });
        self.nodes.push(Node {
            parent: None,
            error,
            data,
        });
        for child in children {
            self.set_parent(child, id);
        }
        id
    }

    #[inline]
    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        // Children always precede their parent in the arena.
        debug_assert!(child < parent);
        if let Some(node) = self.nodes.get_mut(child.index()) {
            node.parent = Some(parent);
        }
    }

    /// Freeze the arena into a tree rooted at `root`.
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}

/// A complete syntax tree for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by id.
    ///
    /// Ids are only handed out by the arena that built this tree, so an
    /// out-of-range id is a bug in the caller.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Typed access to a node; `None` when the node has another kind.
    pub fn get<T: AstNode>(&self, id: NodeId) -> Option<&T> {
        T::cast(&self.node(id).data)
    }

    /// The root `SourceFile`.
    pub fn source_file(&self) -> Option<&SourceFile> {
        self.get::<SourceFile>(self.root)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in allocation order (children before parents).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Every token held in a slot, in source order. Trivia is not included.
    pub fn tokens(&self) -> Vec<&Token> {
        struct Collect<'t>(Vec<&'t Token>);

        impl<'t> Visitor<'t> for Collect<'t> {
            fn visit_token(&mut self, _slot: &'static str, token: &'t Token) {
                self.0.push(token);
            }
        }

        let mut collect = Collect(Vec::new());
        walk(self, &mut collect);
        collect.0
    }
}
