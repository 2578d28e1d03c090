//! Parse contexts and the list-parsing rules registered for each of them.
//!
//! Every bracketed or sequence-shaped rule of the grammar is parsed by
//! `Parser::parse_list` with one of these contexts. A context says which
//! tokens end the list, which tokens start an element, and which production
//! parses an element. Each element production consumes at least its
//! initiating token, which is what keeps list parsing moving forward.

use mudscript_ast::{NodeId, SyntaxKind};
use mudscript_core::ContractViolation;

use crate::parser::Parser;
use crate::precedence::is_prefix_operator;

/// A list-parsing situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// Top-level declarations of a document.
    SourceElements,
    /// Members between the braces of a class.
    ClassMembers,
    /// Statements between the braces of a block.
    BlockStatements,
    /// `case`/`default` clauses of a switch.
    SwitchCases,
    /// Statements following a `case`/`default` label.
    CaseStatements,
    /// Parameters of a verb.
    ParameterList,
    /// Arguments of a call or `new`.
    ArgumentList,
}

impl ParseContext {
    pub const ALL: &'static [ParseContext] = &[
        ParseContext::SourceElements,
        ParseContext::ClassMembers,
        ParseContext::BlockStatements,
        ParseContext::SwitchCases,
        ParseContext::CaseStatements,
        ParseContext::ParameterList,
        ParseContext::ArgumentList,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParseContext::SourceElements => "SourceElements",
            ParseContext::ClassMembers => "ClassMembers",
            ParseContext::BlockStatements => "BlockStatements",
            ParseContext::SwitchCases => "SwitchCases",
            ParseContext::CaseStatements => "CaseStatements",
            ParseContext::ParameterList => "ParameterList",
            ParseContext::ArgumentList => "ArgumentList",
        }
    }
}

/// The list-parsing rules of one context.
pub(crate) struct ContextRules {
    pub context: ParseContext,
    /// Tokens that close the list. End-of-file closes every list.
    pub is_terminator: fn(SyntaxKind) -> bool,
    /// Tokens that start an element.
    pub is_initiator: fn(SyntaxKind) -> bool,
    /// Parses one element. Only called when the current token is an initiator.
    pub element: fn(&mut Parser<'_>) -> NodeId,
}

static CONTEXT_RULES: &[ContextRules] = &[
    ContextRules {
        context: ParseContext::SourceElements,
        is_terminator: |_| false,
        is_initiator: |kind| kind == SyntaxKind::ClassKeyword,
        element: |parser| parser.parse_class_declaration(),
    },
    ContextRules {
        context: ParseContext::ClassMembers,
        is_terminator: |kind| kind == SyntaxKind::RightBrace,
        is_initiator: |kind| {
            matches!(
                kind,
                SyntaxKind::VarKeyword | SyntaxKind::VerbKeyword | SyntaxKind::StaticKeyword
            )
        },
        element: |parser| parser.parse_class_member(),
    },
    ContextRules {
        context: ParseContext::BlockStatements,
        is_terminator: |kind| kind == SyntaxKind::RightBrace,
        is_initiator: can_start_statement,
        element: |parser| parser.parse_statement(),
    },
    ContextRules {
        context: ParseContext::SwitchCases,
        is_terminator: |kind| kind == SyntaxKind::RightBrace,
        is_initiator: |kind| matches!(kind, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword),
        element: |parser| parser.parse_case_or_default_clause(),
    },
    ContextRules {
        context: ParseContext::CaseStatements,
        is_terminator: |kind| {
            matches!(
                kind,
                SyntaxKind::RightBrace | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            )
        },
        is_initiator: can_start_statement,
        element: |parser| parser.parse_statement(),
    },
    ContextRules {
        context: ParseContext::ParameterList,
        // A missing `)` should not swallow the verb body.
        is_terminator: |kind| matches!(kind, SyntaxKind::RightParen | SyntaxKind::LeftBrace),
        is_initiator: |kind| kind == SyntaxKind::Name,
        element: |parser| parser.parse_parameter(),
    },
    ContextRules {
        context: ParseContext::ArgumentList,
        is_terminator: |kind| {
            matches!(
                kind,
                SyntaxKind::RightParen | SyntaxKind::Semicolon | SyntaxKind::RightBrace
            )
        },
        is_initiator: can_start_expression,
        element: |parser| parser.parse_argument(),
    },
];

/// Look up the rules registered for a context.
pub(crate) fn rules_for(context: ParseContext) -> Result<&'static ContextRules, ContractViolation> {
    CONTEXT_RULES
        .iter()
        .find(|rules| rules.context == context)
        .ok_or(ContractViolation::UnregisteredContext(context.name()))
}

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    is_prefix_operator(kind)
        || matches!(
            kind,
            SyntaxKind::Name
                | SyntaxKind::NumberLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::LeftParen
        )
}

/// Check if a token kind can start a statement.
pub fn can_start_statement(kind: SyntaxKind) -> bool {
    can_start_expression(kind)
        || matches!(
            kind,
            SyntaxKind::LeftBrace
                | SyntaxKind::VarKeyword
                | SyntaxKind::IfKeyword
                | SyntaxKind::WhileKeyword
                | SyntaxKind::DoKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::SwitchKeyword
                | SyntaxKind::Semicolon
        )
}
