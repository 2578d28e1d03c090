//! Operator precedence and associativity for binary operators.

use mudscript_ast::SyntaxKind;

/// Operator precedence levels. Higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Below every operator; the entry level of a full expression.
    Lowest = 0,
    Assignment = 1,
    Conditional = 2,
    LogicalOr = 3,
    LogicalAnd = 4,
    BitwiseOr = 5,
    BitwiseXor = 6,
    BitwiseAnd = 7,
    Equality = 8,
    Relational = 9,
    Shift = 10,
    Additive = 11,
    Multiplicative = 12,
    /// Operands of binary operators: prefix, postfix and primary expressions.
    Unary = 13,
}

impl OperatorPrecedence {
    /// The level directly above this one.
    pub fn next(self) -> Self {
        match self {
            OperatorPrecedence::Lowest => OperatorPrecedence::Assignment,
            OperatorPrecedence::Assignment => OperatorPrecedence::Conditional,
            OperatorPrecedence::Conditional => OperatorPrecedence::LogicalOr,
            OperatorPrecedence::LogicalOr => OperatorPrecedence::LogicalAnd,
            OperatorPrecedence::LogicalAnd => OperatorPrecedence::BitwiseOr,
            OperatorPrecedence::BitwiseOr => OperatorPrecedence::BitwiseXor,
            OperatorPrecedence::BitwiseXor => OperatorPrecedence::BitwiseAnd,
            OperatorPrecedence::BitwiseAnd => OperatorPrecedence::Equality,
            OperatorPrecedence::Equality => OperatorPrecedence::Relational,
            OperatorPrecedence::Relational => OperatorPrecedence::Shift,
            OperatorPrecedence::Shift => OperatorPrecedence::Additive,
            OperatorPrecedence::Additive => OperatorPrecedence::Multiplicative,
            OperatorPrecedence::Multiplicative | OperatorPrecedence::Unary => {
                OperatorPrecedence::Unary
            }
        }
    }
}

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    /// Chaining two operators of this level is a syntax error.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub precedence: OperatorPrecedence,
    pub associativity: Associativity,
}

impl OperatorInfo {
    /// Minimum precedence for the right operand.
    pub fn right_operand_precedence(self) -> OperatorPrecedence {
        match self.associativity {
            Associativity::Right => self.precedence,
            Associativity::Left | Associativity::None => self.precedence.next(),
        }
    }
}

/// Get the precedence and associativity of a binary operator token.
pub fn get_binary_operator_info(kind: SyntaxKind) -> Option<OperatorInfo> {
    use Associativity::*;
    use OperatorPrecedence::*;

    let (precedence, associativity) = match kind {
        kind if kind.is_assignment_operator() => (Assignment, Right),
        SyntaxKind::Question => (Conditional, Right),
        SyntaxKind::BarBar => (LogicalOr, Left),
        SyntaxKind::AmpersandAmpersand => (LogicalAnd, Left),
        SyntaxKind::Bar => (BitwiseOr, Left),
        SyntaxKind::Caret => (BitwiseXor, Left),
        SyntaxKind::Ampersand => (BitwiseAnd, Left),
        SyntaxKind::EqualsEquals | SyntaxKind::ExclamationEquals => (Equality, None),
        SyntaxKind::LessThan
        | SyntaxKind::GreaterThan
        | SyntaxKind::LessThanEquals
        | SyntaxKind::GreaterThanEquals => (Relational, None),
        SyntaxKind::LessThanLessThan | SyntaxKind::GreaterThanGreaterThan => (Shift, Left),
        SyntaxKind::Plus | SyntaxKind::Minus => (Additive, Left),
        SyntaxKind::Asterisk | SyntaxKind::Slash | SyntaxKind::Percent => (Multiplicative, Left),
        _ => return Option::None,
    };
    Some(OperatorInfo {
        precedence,
        associativity,
    })
}

/// Whether a token kind is a prefix unary operator.
pub fn is_prefix_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Exclamation
            | SyntaxKind::Minus
            | SyntaxKind::Plus
            | SyntaxKind::Tilde
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus
    )
}
