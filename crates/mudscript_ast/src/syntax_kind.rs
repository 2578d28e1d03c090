//! SyntaxKind enum - every token and trivia kind of the mudscript language.
//!
//! The variants are grouped in contiguous ranges so the classification
//! helpers can compare discriminants instead of matching every variant.

use serde::Serialize;

/// The kind of a token or trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Structural
    // ========================================================================
    EndOfFile,
    UnknownToken,

    // ========================================================================
    // Trivia
    // ========================================================================
    Whitespace,
    SingleLineComment,
    MultiLineComment,

    // Directives (`#include`, ...) are trivia as well
    IncludeDirective,
    DefineDirective,
    IfdefDirective,
    IfndefDirective,
    EndifDirective,
    UnknownDirective,

    // ========================================================================
    // Names and literals
    // ========================================================================
    Name,
    NumberLiteral,
    StringLiteral,

    // ========================================================================
    // Punctuation
    // ========================================================================
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Colon,

    // Operators
    Dot,
    Arrow,
    Question,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Exclamation,
    Tilde,
    Ampersand,
    Bar,
    Caret,
    AmpersandAmpersand,
    BarBar,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    EqualsEquals,
    ExclamationEquals,
    LessThanLessThan,
    GreaterThanGreaterThan,

    // Assignment operators
    Equals,
    PlusEquals,
    MinusEquals,
    AsteriskEquals,
    SlashEquals,
    PercentEquals,

    // ========================================================================
    // Keywords
    // ========================================================================
    AbstractKeyword,
    BreakKeyword,
    CaseKeyword,
    ClassKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DoKeyword,
    ElseKeyword,
    FalseKeyword,
    IfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    StaticKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    TrueKeyword,
    VarKeyword,
    VerbKeyword,
    WhileKeyword,
}

impl SyntaxKind {
    /// Whether this kind represents trivia (whitespace, comments, directives).
    #[inline]
    pub fn is_trivia(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::Whitespace as u16 && v <= SyntaxKind::UnknownDirective as u16
    }

    /// Whether this kind represents a `#` directive.
    #[inline]
    pub fn is_directive(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::IncludeDirective as u16 && v <= SyntaxKind::UnknownDirective as u16
    }

    /// Whether this kind represents a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, SyntaxKind::NumberLiteral | SyntaxKind::StringLiteral)
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::Equals as u16 && v <= SyntaxKind::PercentEquals as u16
    }

    /// The fixed source text of this kind, if it has one.
    pub fn text(self) -> Option<&'static str> {
        self.punctuation_text()
            .or_else(|| self.keyword_text())
            .or_else(|| self.directive_text())
    }

    /// Get the text of a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::AbstractKeyword => Some("abstract"),
            SyntaxKind::BreakKeyword => Some("break"),
            SyntaxKind::CaseKeyword => Some("case"),
            SyntaxKind::ClassKeyword => Some("class"),
            SyntaxKind::ContinueKeyword => Some("continue"),
            SyntaxKind::DefaultKeyword => Some("default"),
            SyntaxKind::DoKeyword => Some("do"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::NewKeyword => Some("new"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::ReturnKeyword => Some("return"),
            SyntaxKind::StaticKeyword => Some("static"),
            SyntaxKind::SuperKeyword => Some("super"),
            SyntaxKind::SwitchKeyword => Some("switch"),
            SyntaxKind::ThisKeyword => Some("this"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::VerbKeyword => Some("verb"),
            SyntaxKind::WhileKeyword => Some("while"),
            _ => None,
        }
    }

    /// Look up a keyword by its exact text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "abstract" => Some(SyntaxKind::AbstractKeyword),
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "new" => Some(SyntaxKind::NewKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "static" => Some(SyntaxKind::StaticKeyword),
            "super" => Some(SyntaxKind::SuperKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "this" => Some(SyntaxKind::ThisKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "verb" => Some(SyntaxKind::VerbKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            _ => None,
        }
    }

    /// Get the text of a punctuation token.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::LeftBrace => Some("{"),
            SyntaxKind::RightBrace => Some("}"),
            SyntaxKind::LeftParen => Some("("),
            SyntaxKind::RightParen => Some(")"),
            SyntaxKind::LeftBracket => Some("["),
            SyntaxKind::RightBracket => Some("]"),
            SyntaxKind::Semicolon => Some(";"),
            SyntaxKind::Comma => Some(","),
            SyntaxKind::Colon => Some(":"),
            SyntaxKind::Dot => Some("."),
            SyntaxKind::Arrow => Some("->"),
            SyntaxKind::Question => Some("?"),
            SyntaxKind::Plus => Some("+"),
            SyntaxKind::Minus => Some("-"),
            SyntaxKind::Asterisk => Some("*"),
            SyntaxKind::Slash => Some("/"),
            SyntaxKind::Percent => Some("%"),
            SyntaxKind::PlusPlus => Some("++"),
            SyntaxKind::MinusMinus => Some("--"),
            SyntaxKind::Exclamation => Some("!"),
            SyntaxKind::Tilde => Some("~"),
            SyntaxKind::Ampersand => Some("&"),
            SyntaxKind::Bar => Some("|"),
            SyntaxKind::Caret => Some("^"),
            SyntaxKind::AmpersandAmpersand => Some("&&"),
            SyntaxKind::BarBar => Some("||"),
            SyntaxKind::LessThan => Some("<"),
            SyntaxKind::GreaterThan => Some(">"),
            SyntaxKind::LessThanEquals => Some("<="),
            SyntaxKind::GreaterThanEquals => Some(">="),
            SyntaxKind::EqualsEquals => Some("=="),
            SyntaxKind::ExclamationEquals => Some("!="),
            SyntaxKind::LessThanLessThan => Some("<<"),
            SyntaxKind::GreaterThanGreaterThan => Some(">>"),
            SyntaxKind::Equals => Some("="),
            SyntaxKind::PlusEquals => Some("+="),
            SyntaxKind::MinusEquals => Some("-="),
            SyntaxKind::AsteriskEquals => Some("*="),
            SyntaxKind::SlashEquals => Some("/="),
            SyntaxKind::PercentEquals => Some("%="),
            _ => None,
        }
    }

    /// Look up a punctuation token by its exact text.
    pub fn from_punctuation(text: &str) -> Option<SyntaxKind> {
        match text {
            "{" => Some(SyntaxKind::LeftBrace),
            "}" => Some(SyntaxKind::RightBrace),
            "(" => Some(SyntaxKind::LeftParen),
            ")" => Some(SyntaxKind::RightParen),
            "[" => Some(SyntaxKind::LeftBracket),
            "]" => Some(SyntaxKind::RightBracket),
            ";" => Some(SyntaxKind::Semicolon),
            "," => Some(SyntaxKind::Comma),
            ":" => Some(SyntaxKind::Colon),
            "." => Some(SyntaxKind::Dot),
            "->" => Some(SyntaxKind::Arrow),
            "?" => Some(SyntaxKind::Question),
            "+" => Some(SyntaxKind::Plus),
            "-" => Some(SyntaxKind::Minus),
            "*" => Some(SyntaxKind::Asterisk),
            "/" => Some(SyntaxKind::Slash),
            "%" => Some(SyntaxKind::Percent),
            "++" => Some(SyntaxKind::PlusPlus),
            "--" => Some(SyntaxKind::MinusMinus),
            "!" => Some(SyntaxKind::Exclamation),
            "~" => Some(SyntaxKind::Tilde),
            "&" => Some(SyntaxKind::Ampersand),
            "|" => Some(SyntaxKind::Bar),
            "^" => Some(SyntaxKind::Caret),
            "&&" => Some(SyntaxKind::AmpersandAmpersand),
            "||" => Some(SyntaxKind::BarBar),
            "<" => Some(SyntaxKind::LessThan),
            ">" => Some(SyntaxKind::GreaterThan),
            "<=" => Some(SyntaxKind::LessThanEquals),
            ">=" => Some(SyntaxKind::GreaterThanEquals),
            "==" => Some(SyntaxKind::EqualsEquals),
            "!=" => Some(SyntaxKind::ExclamationEquals),
            "<<" => Some(SyntaxKind::LessThanLessThan),
            ">>" => Some(SyntaxKind::GreaterThanGreaterThan),
            "=" => Some(SyntaxKind::Equals),
            "+=" => Some(SyntaxKind::PlusEquals),
            "-=" => Some(SyntaxKind::MinusEquals),
            "*=" => Some(SyntaxKind::AsteriskEquals),
            "/=" => Some(SyntaxKind::SlashEquals),
            "%=" => Some(SyntaxKind::PercentEquals),
            _ => None,
        }
    }

    /// Get the directive word (without `#`) of a known directive.
    pub fn directive_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::IncludeDirective => Some("include"),
            SyntaxKind::DefineDirective => Some("define"),
            SyntaxKind::IfdefDirective => Some("ifdef"),
            SyntaxKind::IfndefDirective => Some("ifndef"),
            SyntaxKind::EndifDirective => Some("endif"),
            _ => None,
        }
    }

    /// Look up a directive by the word following `#`.
    pub fn from_directive(word: &str) -> Option<SyntaxKind> {
        match word {
            "include" => Some(SyntaxKind::IncludeDirective),
            "define" => Some(SyntaxKind::DefineDirective),
            "ifdef" => Some(SyntaxKind::IfdefDirective),
            "ifndef" => Some(SyntaxKind::IfndefDirective),
            "endif" => Some(SyntaxKind::EndifDirective),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
