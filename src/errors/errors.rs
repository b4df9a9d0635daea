use std::fmt::Display;

use thiserror::Error;

use crate::{
    ast::ast::{ExprType, StmtType},
    lexer::tokens::{Keyword, Radix},
    Position, TokenSpan,
};

/// A fatal error raised while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    internal_error: LexErrorImpl,
    position: Position,
}

impl LexError {
    pub fn new(error_impl: LexErrorImpl, position: Position) -> Self {
        LexError {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.line
    }

    pub fn get_column(&self) -> u32 {
        self.position.column
    }

    pub fn get_kind(&self) -> &LexErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            LexErrorImpl::UnterminatedString => "UnterminatedString",
            LexErrorImpl::UnterminatedRawString => "UnterminatedRawString",
            LexErrorImpl::UnterminatedChar => "UnterminatedChar",
            LexErrorImpl::UnterminatedBlockComment => "UnterminatedBlockComment",
            LexErrorImpl::EmptyChar => "EmptyChar",
            LexErrorImpl::InvalidHexEscape { .. } => "InvalidHexEscape",
            LexErrorImpl::InvalidUnicodeEscape { .. } => "InvalidUnicodeEscape",
            LexErrorImpl::InvalidExtendedUnicodeEscape { .. } => "InvalidExtendedUnicodeEscape",
            LexErrorImpl::InvalidRadixLiteral { .. } => "InvalidRadixLiteral",
            LexErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            LexErrorImpl::InvalidFloat { .. } => "InvalidFloat",
            LexErrorImpl::InvalidExponent { .. } => "InvalidExponent",
            LexErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for LexError {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorImpl {
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated raw string literal")]
    UnterminatedRawString,
    #[error("Unterminated char literal")]
    UnterminatedChar,
    #[error("Unterminated block comment")]
    UnterminatedBlockComment,
    #[error("Empty char literal")]
    EmptyChar,
    #[error("Invalid hex escape sequence `{fragment}`")]
    InvalidHexEscape { fragment: String },
    #[error("Invalid unicode escape sequence `{fragment}`")]
    InvalidUnicodeEscape { fragment: String },
    #[error("Invalid extended unicode escape sequence `{fragment}`")]
    InvalidExtendedUnicodeEscape { fragment: String },
    #[error("Invalid {radix} literal `{fragment}`")]
    InvalidRadixLiteral { radix: Radix, fragment: String },
    #[error("Invalid number literal `{fragment}`")]
    InvalidNumber { fragment: String },
    #[error("Invalid float literal `{fragment}`")]
    InvalidFloat { fragment: String },
    #[error("Invalid exponent literal `{fragment}`")]
    InvalidExponent { fragment: String },
    #[error("Unexpected token `{character}` ({code:#x})")]
    UnexpectedCharacter { character: char, code: u32 },
}

/// A recoverable error raised while parsing a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    internal_error: ParseErrorImpl,
    pub span: TokenSpan,
}

impl ParseError {
    pub fn new(error_impl: ParseErrorImpl, span: TokenSpan) -> Self {
        ParseError {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_kind(&self) -> &ParseErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ParseErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ParseErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ParseErrorImpl::UnexpectedKeyword { .. } => "UnexpectedKeyword",
            ParseErrorImpl::KeywordAsIdentifier { .. } => "KeywordAsIdentifier",
            ParseErrorImpl::MissingSemicolon { .. } => "MissingSemicolon",
            ParseErrorImpl::NotAllowedInBlock { .. } => "NotAllowedInBlock",
            ParseErrorImpl::CannotStandAlone { .. } => "CannotStandAlone",
            ParseErrorImpl::MissingFnName => "MissingFnName",
            ParseErrorImpl::ActionTailExpression => "ActionTailExpression",
            ParseErrorImpl::ActionBodyNotBlock => "ActionBodyNotBlock",
            ParseErrorImpl::WildcardOutsideImport => "WildcardOutsideImport",
            ParseErrorImpl::GroupOutsideImport => "GroupOutsideImport",
            ParseErrorImpl::TrailingComma => "TrailingComma",
            ParseErrorImpl::EmptyGroup => "EmptyGroup",
            ParseErrorImpl::AliasNotAllowed => "AliasNotAllowed",
            ParseErrorImpl::ExpectedAs { .. } => "ExpectedAs",
            ParseErrorImpl::ExpectedEof { .. } => "ExpectedEof",
            ParseErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at tokens {}", self.internal_error, self.span)
    }
}

impl std::error::Error for ParseError {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorImpl {
    #[error("Expected {expected} but got `{found}`")]
    UnexpectedToken { expected: String, found: String },
    #[error("Expected an expression {context}, got `{found}`")]
    ExpectedExpression { context: &'static str, found: String },
    #[error("Unexpected keyword `{keyword}` in {context}")]
    UnexpectedKeyword {
        keyword: Keyword,
        context: &'static str,
    },
    #[error("Keyword `{keyword}` cannot be used as {context}")]
    KeywordAsIdentifier {
        keyword: Keyword,
        context: &'static str,
    },
    #[error("Expected a semi-colon at the end of statement, got `{found}`")]
    MissingSemicolon { found: String },
    #[error("{stmt} is not allowed in a block")]
    NotAllowedInBlock { stmt: StmtType },
    #[error("{expr} cannot be used as a statement")]
    CannotStandAlone { expr: ExprType },
    #[error("Expected an identifier for function declaration")]
    MissingFnName,
    #[error("Actions cannot have a tailing expression")]
    ActionTailExpression,
    #[error("Action body must be a block")]
    ActionBodyNotBlock,
    #[error("Unexpected wildcard qualifier in this context")]
    WildcardOutsideImport,
    #[error("Unexpected multiple import qualifier in this context")]
    GroupOutsideImport,
    #[error("Trailing comma inside path qualifier")]
    TrailingComma,
    #[error("Unexpected empty subpath qualifier")]
    EmptyGroup,
    #[error("`as` clause cannot be used in this context")]
    AliasNotAllowed,
    #[error("Expected `as` keyword, got `{found}`")]
    ExpectedAs { found: String },
    #[error("Expected end of file, got `{found}`")]
    ExpectedEof { found: String },
    #[error("Nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Every error collected while parsing a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    pub fn errors(&self) -> &[ParseError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parser errors encountered during parsing ({}):", self.0.len())?;
        for error in &self.0 {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Failure from either front-end stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseErrors),
}
