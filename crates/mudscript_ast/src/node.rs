//! Syntax node definitions.
//!
//! Every node kind is a plain struct of named slots. A slot holds a token,
//! an optional token, a child node, an optional child node, or a list of
//! elements. The `syntax_nodes!` macro generates the structs together with
//! the closed `NodeKind`/`NodeData` enums and a slot visitor, so generic
//! traversal never needs to know the concrete kinds.

use serde::Serialize;
use std::fmt;

use crate::token::{ErrorKind, Token};

/// Index of a node inside its [`SyntaxTree`](crate::tree::SyntaxTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entry of a list slot: either a child node or an orphan token that
/// list recovery skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Element {
    Token(Token),
    Node(NodeId),
}

impl Element {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Element::Node(id) => Some(*id),
            Element::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Element::Token(token) => Some(token),
            Element::Node(_) => None,
        }
    }
}

/// A borrowed view of one slot entry, handed out by [`NodeData::for_each_slot`].
#[derive(Debug, Clone, Copy)]
pub enum Child<'t> {
    Token(&'t Token),
    Node(NodeId),
}

/// A value that can sit in a node slot.
pub trait SlotValue {
    fn visit_slot<'t>(&'t self, name: &'static str, f: &mut dyn FnMut(&'static str, Child<'t>));
}

impl SlotValue for Token {
    fn visit_slot<'t>(&'t self, name: &'static str, f: &mut dyn FnMut(&'static str, Child<'t>)) {
        f(name, Child::Token(self));
    }
}

impl SlotValue for Option<Token> {
    fn visit_slot<'t>(&'t self, name: &'static str, f: &mut dyn FnMut(&'static str, Child<'t>)) {
        if let Some(token) = self {
            f(name, Child::Token(token));
        }
    }
}

impl SlotValue for NodeId {
    fn visit_slot<'t>(&'t self, name: &'static str, f: &mut dyn FnMut(&'static str, Child<'t>)) {
        f(name, Child::Node(*self));
    }
}

impl SlotValue for Option<NodeId> {
    fn visit_slot<'t>(&'t self, name: &'static str, f: &mut dyn FnMut(&'static str, Child<'t>)) {
        if let Some(id) = self {
            f(name, Child::Node(*id));
        }
    }
}

impl SlotValue for Vec<Element> {
    fn visit_slot<'t>(&'t self, name: &'static str, f: &mut dyn FnMut(&'static str, Child<'t>)) {
        for element in self {
            match element {
                Element::Token(token) => f(name, Child::Token(token)),
                Element::Node(id) => f(name, Child::Node(*id)),
            }
        }
    }
}

/// Typed access to one node kind.
pub trait AstNode: Sized {
    const KIND: NodeKind;

    fn cast(data: &NodeData) -> Option<&Self>;
}

/// A node stored in the tree arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// The node holding this one in a slot. `None` only for the root.
    pub parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

macro_rules! syntax_nodes {
    ($(
        $(#[$meta:meta])*
        $name:ident { $($field:ident : $ty:ty),* $(,)? }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
            pub struct $name {
                $(pub $field: $ty,)*
            }

            impl From<$name> for NodeData {
                fn from(node: $name) -> Self {
                    NodeData::$name(node)
                }
            }

            impl AstNode for $name {
                const KIND: NodeKind = NodeKind::$name;

                fn cast(data: &NodeData) -> Option<&Self> {
                    match data {
                        NodeData::$name(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )*

        /// The kind of a syntax node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum NodeKind {
            $($name,)*
        }

        /// The payload of a syntax node, one variant per kind.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub enum NodeData {
            $($name($name),)*
        }

        impl NodeData {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeData::$name(_) => NodeKind::$name,)*
                }
            }

            /// Visit every populated slot entry in source order.
            pub fn for_each_slot<'t>(&'t self, f: &mut dyn FnMut(&'static str, Child<'t>)) {
                match self {
                    $(NodeData::$name(node) => {
                        $(SlotValue::visit_slot(&node.$field, stringify!($field), f);)*
                    })*
                }
            }
        }
    };
}

syntax_nodes! {
    /// Root of every tree.
    SourceFile { statements: Vec<Element>, end_of_file: Token }

    // ========================================================================
    // Declarations
    // ========================================================================

    ClassDeclaration {
        class_keyword: Token,
        abstract_keyword: Option<Token>,
        name: Token,
        base_clause: Option<NodeId>,
        members: NodeId,
    }
    /// `: BaseName`
    ClassBaseClause { colon: Token, base_name: Token }
    ClassMembers { open_brace: Token, members: Vec<Element>, close_brace: Token }
    PropertyDeclaration {
        static_keyword: Option<Token>,
        var_keyword: Token,
        name: Token,
        initializer: Option<NodeId>,
        semicolon: Token,
    }
    /// `= value`
    Initializer { equals: Token, value: NodeId }
    VerbDeclaration {
        static_keyword: Option<Token>,
        verb_keyword: Token,
        name: Token,
        parameters: NodeId,
        body: NodeId,
    }
    ParameterList { open_paren: Token, parameters: Vec<Element>, close_paren: Token }
    Parameter { name: Token, comma: Option<Token> }

    // ========================================================================
    // Statements
    // ========================================================================

    Block { open_brace: Token, statements: Vec<Element>, close_brace: Token }
    VariableStatement {
        var_keyword: Token,
        name: Token,
        initializer: Option<NodeId>,
        semicolon: Token,
    }
    ExpressionStatement { expression: NodeId, semicolon: Token }
    IfStatement {
        if_keyword: Token,
        open_paren: Token,
        condition: NodeId,
        close_paren: Token,
        then_statement: NodeId,
        else_clause: Option<NodeId>,
    }
    ElseClause { else_keyword: Token, statement: NodeId }
    WhileStatement {
        while_keyword: Token,
        open_paren: Token,
        condition: NodeId,
        close_paren: Token,
        body: NodeId,
    }
    DoStatement {
        do_keyword: Token,
        body: NodeId,
        while_keyword: Token,
        open_paren: Token,
        condition: NodeId,
        close_paren: Token,
        semicolon: Token,
    }
    ReturnStatement { return_keyword: Token, expression: Option<NodeId>, semicolon: Token }
    BreakStatement { break_keyword: Token, semicolon: Token }
    ContinueStatement { continue_keyword: Token, semicolon: Token }
    EmptyStatement { semicolon: Token }
    SwitchStatement {
        switch_keyword: Token,
        open_paren: Token,
        expression: NodeId,
        close_paren: Token,
        open_brace: Token,
        clauses: Vec<Element>,
        close_brace: Token,
    }
    CaseClause { case_keyword: Token, expression: NodeId, colon: Token, statements: Vec<Element> }
    DefaultClause { default_keyword: Token, colon: Token, statements: Vec<Element> }

    // ========================================================================
    // Expressions
    // ========================================================================

    BinaryExpression { left: NodeId, operator: Token, right: NodeId }
    AssignmentExpression { target: NodeId, operator: Token, value: NodeId }
    /// `condition ? when_true : when_false`
    ConditionalExpression {
        condition: NodeId,
        question: Token,
        when_true: NodeId,
        colon: Token,
        when_false: NodeId,
    }
    PrefixUnaryExpression { operator: Token, operand: NodeId }
    PostfixUnaryExpression { operand: NodeId, operator: Token }
    CallExpression { callee: NodeId, arguments: NodeId }
    ArgumentList { open_paren: Token, arguments: Vec<Element>, close_paren: Token }
    Argument { expression: NodeId, comma: Option<Token> }
    /// `object.member` or `object->member`
    MemberAccessExpression { object: NodeId, operator: Token, member: Token }
    IndexExpression { object: NodeId, open_bracket: Token, index: NodeId, close_bracket: Token }
    NewExpression { new_keyword: Token, class_name: Token, arguments: NodeId }
    ParenthesizedExpression { open_paren: Token, expression: NodeId, close_paren: Token }
    /// A `Name`, `this` or `super`.
    NameExpression { name: Token }
    LiteralExpression { literal: Token }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::SyntaxKind;

    #[test]
    fn test_for_each_slot_visits_in_declaration_order() {
        let data = NodeData::from(ClassDeclaration {
            class_keyword: Token::new(SyntaxKind::ClassKeyword, 0, 5),
            abstract_keyword: None,
            name: Token::new(SyntaxKind::Name, 6, 3),
            base_clause: Some(NodeId(0)),
            members: NodeId(1),
        });
        let mut seen = Vec::new();
        data.for_each_slot(&mut |name, child| {
            let label = match child {
                Child::Token(t) => format!("{name}:{}", t.kind),
                Child::Node(id) => format!("{name}:{id}"),
            };
            seen.push(label);
        });
        assert_eq!(
            seen,
            ["class_keyword:ClassKeyword", "name:Name", "base_clause:#0", "members:#1"]
        );
    }

    #[test]
    fn test_list_slot_yields_tokens_and_nodes() {
        let data = NodeData::from(SourceFile {
            statements: vec![
                Element::Token(Token::new(SyntaxKind::UnknownToken, 0, 1)),
                Element::Node(NodeId(3)),
            ],
            end_of_file: Token::new(SyntaxKind::EndOfFile, 1, 0),
        });
        let mut count = 0;
        data.for_each_slot(&mut |_, _| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_cast_matches_kind() {
        let data = NodeData::from(EmptyStatement {
            semicolon: Token::new(SyntaxKind::Semicolon, 0, 1),
        });
        assert_eq!(data.kind(), NodeKind::EmptyStatement);
        assert!(EmptyStatement::cast(&data).is_some());
        assert!(Block::cast(&data).is_none());
        assert_eq!(EmptyStatement::KIND, NodeKind::EmptyStatement);
    }
}
