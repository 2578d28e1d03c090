//! The mudscript parser implementation.
//!
//! A recursive descent parser over the lexer's token stream. It never fails:
//! a token the grammar requires but the input lacks is synthesized as a
//! zero-width `MissingToken`, and a token no production can use is kept in
//! the enclosing list as a `SkippedToken`. The result is always a complete
//! tree that covers every token of the input.

use std::mem;

use mudscript_ast::node::*;
use mudscript_ast::{ErrorKind, NodeArena, SyntaxKind, SyntaxTree, Token};
use mudscript_lexer::Lexer;

use crate::context::{can_start_expression, rules_for, ParseContext};
use crate::precedence::{
    get_binary_operator_info, is_prefix_operator, Associativity, OperatorPrecedence,
};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
///
/// Statements, binary expressions and prefix operators draw from the same
/// budget, so this bounds the combined nesting depth at any point of a
/// document. Constructs nested deeper than this are cut off with missing
/// tokens.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Parse a whole document into a syntax tree.
pub fn parse_source_document(document: &str) -> SyntaxTree {
    Parser::new().parse_source_document(document)
}

/// The parser produces a `SyntaxTree` from mudscript source text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// The token under the cursor. Not yet part of the tree.
    current: Token,
    arena: NodeArena,
    /// Number of tokens consumed so far; used to detect productions that
    /// made no progress.
    consumed: usize,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self {
            lexer: Lexer::new(""),
            current: Token::new(SyntaxKind::EndOfFile, 0, 0),
            arena: NodeArena::new(),
            consumed: 0,
            recursion_depth: 0,
        }
    }

    /// Parse `document` from scratch. All state from a previous call is discarded.
    #[tracing::instrument(skip_all, fields(source_len = document.len()))]
    pub fn parse_source_document(&mut self, document: &'a str) -> SyntaxTree {
        self.lexer.reset(document);
        self.arena = NodeArena::new();
        self.consumed = 0;
        self.recursion_depth = 0;
        self.current = self.lexer.advance().unwrap_or_else(|| self.end_of_file());

        let statements = self.parse_list(ParseContext::SourceElements);
        let end_of_file = self.consume(SyntaxKind::EndOfFile);
        let root = self.arena.alloc(SourceFile {
            statements,
            end_of_file,
        });

        let tree = mem::take(&mut self.arena).finish(root);
        tracing::debug!(nodes = tree.len(), tokens = self.consumed, "parsed document");
        tree
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_kind(&self) -> SyntaxKind {
        self.current.kind
    }

    /// Kind of the `n`-th token after the current one.
    #[inline]
    fn peek_kind(&mut self, n: usize) -> Option<SyntaxKind> {
        self.lexer.look(n).map(|token| token.kind)
    }

    fn end_of_file(&self) -> Token {
        Token::new(SyntaxKind::EndOfFile, self.lexer.text().len() as u32, 0)
    }

    /// Take the current token and move the cursor to the next one.
    fn next_token(&mut self) -> Token {
        let next = match self.lexer.advance() {
            Some(token) => token,
            None => self.end_of_file(),
        };
        self.consumed += 1;
        mem::replace(&mut self.current, next)
    }

    /// Take the current token if it has the given kind; otherwise return a
    /// zero-width missing token at the current position without advancing.
    fn consume(&mut self, kind: SyntaxKind) -> Token {
        if self.current_kind() == kind {
            self.next_token()
        } else {
            tracing::trace!(expected = %kind, found = %self.current.kind, start = self.current.start, "missing token");
            Token::missing(kind, self.current.start)
        }
    }

    fn consume_optional(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_kind() == kind {
            Some(self.next_token())
        } else {
            None
        }
    }

    fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            tracing::debug!(start = self.current.start, "recursion limit reached");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    fn leave_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // ========================================================================
    // List parsing
    // ========================================================================

    /// Parse a list of elements for `context` up to one of its terminators.
    ///
    /// # Panics
    ///
    /// Panics if `context` has no registered rules.
    fn parse_list(&mut self, context: ParseContext) -> Vec<Element> {
        let rules = match rules_for(context) {
            Ok(rules) => rules,
            Err(err) => panic!("{err}"),
        };

        let mut elements = Vec::new();
        loop {
            let kind = self.current_kind();
            if kind == SyntaxKind::EndOfFile || (rules.is_terminator)(kind) {
                break;
            }

            if (rules.is_initiator)(kind) {
                let before = self.consumed;
                let node = (rules.element)(self);
                elements.push(Element::Node(node));
                if self.consumed > before {
                    continue;
                }
                // Only reachable at the recursion limit.
            }

            let mut token = self.next_token();
            tracing::trace!(kind = %token.kind, start = token.start, ?context, "skipped token");
            token.error = Some(ErrorKind::SkippedToken);
            elements.push(Element::Token(token));
        }
        elements
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub(crate) fn parse_class_declaration(&mut self) -> NodeId {
        let class_keyword = self.consume(SyntaxKind::ClassKeyword);
        let abstract_keyword = self.consume_optional(SyntaxKind::AbstractKeyword);
        let name = self.consume(SyntaxKind::Name);
        let base_clause = self.parse_class_base_clause();
        let members = self.parse_class_members();
        self.arena.alloc(ClassDeclaration {
            class_keyword,
            abstract_keyword,
            name,
            base_clause,
            members,
        })
    }

    /// `: BaseName`, absent entirely when there is no colon.
    fn parse_class_base_clause(&mut self) -> Option<NodeId> {
        let colon = self.consume_optional(SyntaxKind::Colon)?;
        let base_name = self.consume(SyntaxKind::Name);
        Some(self.arena.alloc(ClassBaseClause { colon, base_name }))
    }

    fn parse_class_members(&mut self) -> NodeId {
        let open_brace = self.consume(SyntaxKind::LeftBrace);
        let members = self.parse_list(ParseContext::ClassMembers);
        let close_brace = self.consume(SyntaxKind::RightBrace);
        self.arena.alloc(ClassMembers {
            open_brace,
            members,
            close_brace,
        })
    }

    pub(crate) fn parse_class_member(&mut self) -> NodeId {
        let is_verb = match self.current_kind() {
            SyntaxKind::VerbKeyword => true,
            SyntaxKind::StaticKeyword => self.peek_kind(1) == Some(SyntaxKind::VerbKeyword),
            _ => false,
        };
        if is_verb {
            self.parse_verb_declaration()
        } else {
            self.parse_property_declaration()
        }
    }

    fn parse_property_declaration(&mut self) -> NodeId {
        let static_keyword = self.consume_optional(SyntaxKind::StaticKeyword);
        let var_keyword = self.consume(SyntaxKind::VarKeyword);
        let name = self.consume(SyntaxKind::Name);
        let initializer = self.parse_initializer();
        let semicolon = self.consume(SyntaxKind::Semicolon);
        self.arena.alloc(PropertyDeclaration {
            static_keyword,
            var_keyword,
            name,
            initializer,
            semicolon,
        })
    }

    fn parse_initializer(&mut self) -> Option<NodeId> {
        let equals = self.consume_optional(SyntaxKind::Equals)?;
        let value = self.parse_expression();
        Some(self.arena.alloc(Initializer { equals, value }))
    }

    fn parse_verb_declaration(&mut self) -> NodeId {
        let static_keyword = self.consume_optional(SyntaxKind::StaticKeyword);
        let verb_keyword = self.consume(SyntaxKind::VerbKeyword);
        let name = self.consume(SyntaxKind::Name);
        let parameters = self.parse_parameter_list();
        let body = self.parse_block();
        self.arena.alloc(VerbDeclaration {
            static_keyword,
            verb_keyword,
            name,
            parameters,
            body,
        })
    }

    fn parse_parameter_list(&mut self) -> NodeId {
        let open_paren = self.consume(SyntaxKind::LeftParen);
        let parameters = self.parse_list(ParseContext::ParameterList);
        let close_paren = self.consume(SyntaxKind::RightParen);
        self.arena.alloc(ParameterList {
            open_paren,
            parameters,
            close_paren,
        })
    }

    pub(crate) fn parse_parameter(&mut self) -> NodeId {
        let name = self.consume(SyntaxKind::Name);
        let comma = self.parse_list_separator(|kind| kind == SyntaxKind::Name);
        self.arena.alloc(Parameter { name, comma })
    }

    /// The comma after a list element. Optional after the last element, but
    /// missing when another element follows directly.
    fn parse_list_separator(&mut self, starts_element: fn(SyntaxKind) -> bool) -> Option<Token> {
        if starts_element(self.current_kind()) {
            return Some(self.consume(SyntaxKind::Comma));
        }
        self.consume_optional(SyntaxKind::Comma)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeId {
        if !self.enter_recursion() {
            return self.missing_statement();
        }
        let statement = match self.current_kind() {
            SyntaxKind::LeftBrace => self.parse_block(),
            SyntaxKind::VarKeyword => self.parse_variable_statement(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword => {
                let break_keyword = self.next_token();
                let semicolon = self.consume(SyntaxKind::Semicolon);
                self.arena.alloc(BreakStatement {
                    break_keyword,
                    semicolon,
                })
            }
            SyntaxKind::ContinueKeyword => {
                let continue_keyword = self.next_token();
                let semicolon = self.consume(SyntaxKind::Semicolon);
                self.arena.alloc(ContinueStatement {
                    continue_keyword,
                    semicolon,
                })
            }
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::Semicolon => {
                let semicolon = self.next_token();
                self.arena.alloc(EmptyStatement { semicolon })
            }
            kind if can_start_expression(kind) => self.parse_expression_statement(),
            _ => self.missing_statement(),
        };
        self.leave_recursion();
        statement
    }

    /// Stand-in for a statement the input does not contain.
    fn missing_statement(&mut self) -> NodeId {
        let semicolon = Token::missing(SyntaxKind::Semicolon, self.current.start);
        self.arena.alloc(EmptyStatement { semicolon })
    }

    fn parse_block(&mut self) -> NodeId {
        let open_brace = self.consume(SyntaxKind::LeftBrace);
        let statements = self.parse_list(ParseContext::BlockStatements);
        let close_brace = self.consume(SyntaxKind::RightBrace);
        self.arena.alloc(Block {
            open_brace,
            statements,
            close_brace,
        })
    }

    fn parse_variable_statement(&mut self) -> NodeId {
        let var_keyword = self.consume(SyntaxKind::VarKeyword);
        let name = self.consume(SyntaxKind::Name);
        let initializer = self.parse_initializer();
        let semicolon = self.consume(SyntaxKind::Semicolon);
        self.arena.alloc(VariableStatement {
            var_keyword,
            name,
            initializer,
            semicolon,
        })
    }

    fn parse_expression_statement(&mut self) -> NodeId {
        let expression = self.parse_expression();
        let semicolon = self.consume(SyntaxKind::Semicolon);
        self.arena.alloc(ExpressionStatement {
            expression,
            semicolon,
        })
    }

    fn parse_if_statement(&mut self) -> NodeId {
        let if_keyword = self.consume(SyntaxKind::IfKeyword);
        let open_paren = self.consume(SyntaxKind::LeftParen);
        let condition = self.parse_expression();
        let close_paren = self.consume(SyntaxKind::RightParen);
        let then_statement = self.parse_statement();
        let else_clause = match self.consume_optional(SyntaxKind::ElseKeyword) {
            Some(else_keyword) => {
                let statement = self.parse_statement();
                Some(self.arena.alloc(ElseClause {
                    else_keyword,
                    statement,
                }))
            }
            None => None,
        };
        self.arena.alloc(IfStatement {
            if_keyword,
            open_paren,
            condition,
            close_paren,
            then_statement,
            else_clause,
        })
    }

    fn parse_while_statement(&mut self) -> NodeId {
        let while_keyword = self.consume(SyntaxKind::WhileKeyword);
        let open_paren = self.consume(SyntaxKind::LeftParen);
        let condition = self.parse_expression();
        let close_paren = self.consume(SyntaxKind::RightParen);
        let body = self.parse_statement();
        self.arena.alloc(WhileStatement {
            while_keyword,
            open_paren,
            condition,
            close_paren,
            body,
        })
    }

    fn parse_do_statement(&mut self) -> NodeId {
        let do_keyword = self.consume(SyntaxKind::DoKeyword);
        let body = self.parse_statement();
        let while_keyword = self.consume(SyntaxKind::WhileKeyword);
        let open_paren = self.consume(SyntaxKind::LeftParen);
        let condition = self.parse_expression();
        let close_paren = self.consume(SyntaxKind::RightParen);
        let semicolon = self.consume(SyntaxKind::Semicolon);
        self.arena.alloc(DoStatement {
            do_keyword,
            body,
            while_keyword,
            open_paren,
            condition,
            close_paren,
            semicolon,
        })
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let return_keyword = self.consume(SyntaxKind::ReturnKeyword);
        let expression = if can_start_expression(self.current_kind()) {
            Some(self.parse_expression())
        } else {
            None
        };
        let semicolon = self.consume(SyntaxKind::Semicolon);
        self.arena.alloc(ReturnStatement {
            return_keyword,
            expression,
            semicolon,
        })
    }

    fn parse_switch_statement(&mut self) -> NodeId {
        let switch_keyword = self.consume(SyntaxKind::SwitchKeyword);
        let open_paren = self.consume(SyntaxKind::LeftParen);
        let expression = self.parse_expression();
        let close_paren = self.consume(SyntaxKind::RightParen);
        let open_brace = self.consume(SyntaxKind::LeftBrace);
        let clauses = self.parse_list(ParseContext::SwitchCases);
        let close_brace = self.consume(SyntaxKind::RightBrace);
        self.arena.alloc(SwitchStatement {
            switch_keyword,
            open_paren,
            expression,
            close_paren,
            open_brace,
            clauses,
            close_brace,
        })
    }

    pub(crate) fn parse_case_or_default_clause(&mut self) -> NodeId {
        if self.current_kind() == SyntaxKind::DefaultKeyword {
            let default_keyword = self.next_token();
            let colon = self.consume(SyntaxKind::Colon);
            let statements = self.parse_list(ParseContext::CaseStatements);
            return self.arena.alloc(DefaultClause {
                default_keyword,
                colon,
                statements,
            });
        }

        let case_keyword = self.consume(SyntaxKind::CaseKeyword);
        let expression = self.parse_expression();
        let colon = self.consume(SyntaxKind::Colon);
        let statements = self.parse_list(ParseContext::CaseStatements);
        self.arena.alloc(CaseClause {
            case_keyword,
            expression,
            colon,
            statements,
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> NodeId {
        self.parse_binary_expression(OperatorPrecedence::Lowest)
    }

    /// Precedence climbing over binary, assignment and conditional operators.
    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> NodeId {
        if !self.enter_recursion() {
            return self.missing_expression();
        }

        let mut left = self.parse_unary_expression();
        // Level of the last non-associative operator applied at this level.
        let mut non_associative: Option<OperatorPrecedence> = None;

        while let Some(info) = get_binary_operator_info(self.current_kind()) {
            if info.precedence < min_precedence {
                break;
            }
            let mut operator = self.next_token();

            if info.precedence == OperatorPrecedence::Conditional {
                left = self.parse_conditional_rest(left, operator);
                continue;
            }

            if info.associativity == Associativity::None {
                if non_associative == Some(info.precedence) {
                    tracing::trace!(kind = %operator.kind, start = operator.start, "chained non-associative operator");
                    operator.error = Some(ErrorKind::SkippedToken);
                }
                non_associative = Some(info.precedence);
            }

            let right = self.parse_binary_expression(info.right_operand_precedence());
            left = if operator.kind.is_assignment_operator() {
                self.arena.alloc(AssignmentExpression {
                    target: left,
                    operator,
                    value: right,
                })
            } else {
                self.arena.alloc(BinaryExpression {
                    left,
                    operator,
                    right,
                })
            };
        }

        self.leave_recursion();
        left
    }

    /// `? when_true : when_false`, after the `?` has been consumed.
    fn parse_conditional_rest(&mut self, condition: NodeId, question: Token) -> NodeId {
        let when_true = self.parse_binary_expression(OperatorPrecedence::Assignment);
        let colon = self.consume(SyntaxKind::Colon);
        let when_false = self.parse_binary_expression(OperatorPrecedence::Conditional);
        self.arena.alloc(ConditionalExpression {
            condition,
            question,
            when_true,
            colon,
            when_false,
        })
    }

    fn parse_unary_expression(&mut self) -> NodeId {
        if !is_prefix_operator(self.current_kind()) {
            let primary = self.parse_primary_expression();
            return self.parse_postfix_expression(primary);
        }
        if !self.enter_recursion() {
            return self.missing_expression();
        }
        let operator = self.next_token();
        let operand = self.parse_unary_expression();
        self.leave_recursion();
        self.arena.alloc(PrefixUnaryExpression { operator, operand })
    }

    fn parse_postfix_expression(&mut self, mut expression: NodeId) -> NodeId {
        loop {
            expression = match self.current_kind() {
                SyntaxKind::Dot | SyntaxKind::Arrow => {
                    let operator = self.next_token();
                    let member = self.consume(SyntaxKind::Name);
                    self.arena.alloc(MemberAccessExpression {
                        object: expression,
                        operator,
                        member,
                    })
                }
                SyntaxKind::LeftParen => {
                    let arguments = self.parse_argument_list();
                    self.arena.alloc(CallExpression {
                        callee: expression,
                        arguments,
                    })
                }
                SyntaxKind::LeftBracket => {
                    let open_bracket = self.next_token();
                    let index = self.parse_expression();
                    let close_bracket = self.consume(SyntaxKind::RightBracket);
                    self.arena.alloc(IndexExpression {
                        object: expression,
                        open_bracket,
                        index,
                        close_bracket,
                    })
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                    let operator = self.next_token();
                    self.arena.alloc(PostfixUnaryExpression {
                        operand: expression,
                        operator,
                    })
                }
                _ => return expression,
            };
        }
    }

    fn parse_primary_expression(&mut self) -> NodeId {
        match self.current_kind() {
            SyntaxKind::Name | SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => {
                let name = self.next_token();
                self.arena.alloc(NameExpression { name })
            }
            kind if kind.is_literal()
                || matches!(
                    kind,
                    SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword
                ) =>
            {
                let literal = self.next_token();
                self.arena.alloc(LiteralExpression { literal })
            }
            SyntaxKind::LeftParen => {
                let open_paren = self.next_token();
                let expression = self.parse_expression();
                let close_paren = self.consume(SyntaxKind::RightParen);
                self.arena.alloc(ParenthesizedExpression {
                    open_paren,
                    expression,
                    close_paren,
                })
            }
            SyntaxKind::NewKeyword => {
                let new_keyword = self.next_token();
                let class_name = self.consume(SyntaxKind::Name);
                let arguments = self.parse_argument_list();
                self.arena.alloc(NewExpression {
                    new_keyword,
                    class_name,
                    arguments,
                })
            }
            _ => self.missing_expression(),
        }
    }

    /// Stand-in for an operand the input does not contain.
    fn missing_expression(&mut self) -> NodeId {
        let name = Token::missing(SyntaxKind::Name, self.current.start);
        self.arena.alloc_with_error(NameExpression { name }, ErrorKind::MissingToken)
    }

    fn parse_argument_list(&mut self) -> NodeId {
        let open_paren = self.consume(SyntaxKind::LeftParen);
        let arguments = self.parse_list(ParseContext::ArgumentList);
        let close_paren = self.consume(SyntaxKind::RightParen);
        self.arena.alloc(ArgumentList {
            open_paren,
            arguments,
            close_paren,
        })
    }

    pub(crate) fn parse_argument(&mut self) -> NodeId {
        let expression = self.parse_expression();
        let comma = self.parse_list_separator(can_start_expression);
        self.arena.alloc(Argument { expression, comma })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_reusable() {
        let mut parser = Parser::new();
        let first = parser.parse_source_document("class A {}");
        let second = parser.parse_source_document("class A {}");
        assert_eq!(first, second);

        let empty = parser.parse_source_document("");
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn test_consume_does_not_advance_on_mismatch() {
        let mut parser = Parser::new();
        parser.lexer.reset("x");
        parser.current = parser.lexer.advance().unwrap_or_else(|| parser.end_of_file());

        let missing = parser.consume(SyntaxKind::Semicolon);
        assert!(missing.is_missing());
        assert_eq!(missing.start, 0);
        assert_eq!(parser.current.kind, SyntaxKind::Name);

        assert!(parser.consume_optional(SyntaxKind::Semicolon).is_none());
        assert_eq!(parser.consume(SyntaxKind::Name).length, 1);
        assert_eq!(parser.current.kind, SyntaxKind::EndOfFile);
    }

    #[test]
    fn test_recursion_limit_terminates() {
        let source = format!("class A {{ verb v() {{ x = {}1; }} }}", "(".repeat(400));
        let tree = parse_source_document(&source);
        assert!(tree.len() > 1);
    }

    #[test]
    fn test_recursion_budget_is_shared_by_statements_and_expressions() {
        let nested_calls = |depth: usize| {
            format!(
                "class A {{ verb v() {{ {}x{}; }} }}",
                "f(".repeat(depth),
                ")".repeat(depth)
            )
        };

        let source = nested_calls(150);
        let tree = parse_source_document(&source);
        assert!(tree.tokens().iter().all(|t| t.error.is_none()));

        let source = nested_calls(250);
        let tree = parse_source_document(&source);
        assert!(tree.tokens().iter().any(|t| t.is_missing()));
        // Every `)` of the calls plus the one of `v()` is still in the tree.
        let close_parens = tree
            .tokens()
            .into_iter()
            .filter(|t| t.kind == SyntaxKind::RightParen && !t.is_missing())
            .count();
        assert_eq!(close_parens, 251);
    }

    #[test]
    fn test_deep_blocks_terminate() {
        let source = format!("class A {{ verb v() {} }}", "{".repeat(300));
        let tree = parse_source_document(&source);
        assert!(tree.len() > 1);
    }
}
