#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A line/column pair in the source text. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Half-open range `[start, end)` over token indices.
///
/// AST nodes are located by the tokens they cover rather than by byte
/// offsets; use [`TokenSpan::to_span`] to get back to the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "token span {start}..{end} is inverted");
        TokenSpan { start, end }
    }

    /// Span covering the single token at `index`.
    pub fn single(index: usize) -> Self {
        TokenSpan {
            start: index,
            end: index + 1,
        }
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn to(&self, other: TokenSpan) -> Self {
        TokenSpan::new(self.start, other.end.max(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Maps the token range back onto a byte range of the source.
    ///
    /// Indices past the end of `tokens` are clamped to the last token, which
    /// is always `Eof` for streams produced by the lexer.
    pub fn to_span(&self, tokens: &[Token]) -> Span {
        let Some(last) = tokens.len().checked_sub(1) else {
            return Span::new(0, 0);
        };

        let first = &tokens[self.start.min(last)];
        if self.is_empty() {
            return Span::new(first.span.start, first.span.start);
        }

        let final_token = &tokens[(self.end - 1).min(last)];
        Span::new(first.span.start, final_token.span.end.max(first.span.start))
    }
}

impl Display for TokenSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Tokenizes and parses `source` in one go.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse(tokens)?)
}
