//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Statements are dispatched through the keyword table in `lookups`;
//! expressions are parsed by precedence climbing in `expr`.
//!
//! Parse errors do not stop the parser. Each failed statement is recorded,
//! the cursor is moved to the next statement boundary, and parsing resumes.
//! All recorded errors are returned together once the input is exhausted.

use tracing::{debug, trace};

use crate::{
    ast::{ast::Program, expressions::Identifier},
    errors::errors::{ParseError, ParseErrorImpl, ParseErrors},
    lexer::tokens::{Keyword, Token, TokenKind},
    Span, TokenSpan, MK_TOKEN,
};

use super::{lookups::is_stmt_keyword, stmt::parse_stmt};

/// Maximum nesting of expressions, blocks and paths.
pub const MAX_DEPTH: usize = 64;

/// Saved parser state for speculative parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    errors_len: usize,
}

/// The main parser structure that maintains parsing state.
///
/// It holds the token stream, the cursor into it and every error recorded
/// so far. The stream always ends with an `EOF` token and the cursor never
/// moves past it.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Errors recorded by statement-level recovery
    errors: Vec<ParseError>,
    /// Current nesting of guarded parse functions
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// Appends an `EOF` token when the stream lacks one, and renumbers token
    /// indices so they match stream positions.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span::new(end, end)
            ));
        }
        for (index, token) in tokens.iter_mut().enumerate() {
            token.index = index;
        }

        Parser {
            tokens,
            pos: 0,
            errors: vec![],
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    pub fn is_at(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    pub fn is_at_keyword(&self, keyword: Keyword) -> bool {
        self.current_token().is_keyword(keyword)
    }

    /// Advances past the current token if it is of `kind`.
    pub fn consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.is_at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// `expected` describes the token for the error message.
    pub fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.is_at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(ParseErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token().to_string(),
            }))
        }
    }

    /// Expects the `;` closing a statement.
    pub fn expect_semicolon(&mut self) -> Result<Token, ParseError> {
        self.consume(TokenKind::Semicolon).ok_or_else(|| {
            self.error_here(ParseErrorImpl::MissingSemicolon {
                found: self.current_token().to_string(),
            })
        })
    }

    /// Expects a non-keyword identifier. `context` names what the identifier
    /// is for, e.g. "a variable name".
    pub fn expect_identifier(
        &mut self,
        context: &'static str,
    ) -> Result<Identifier, ParseError> {
        let token = self.expect(TokenKind::Identifier, context)?;
        if let Some(keyword) = token.keyword() {
            return Err(ParseError::new(
                ParseErrorImpl::KeywordAsIdentifier { keyword, context },
                TokenSpan::single(token.index),
            ));
        }
        Ok(Identifier::from_token(&token))
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        !self.is_at(TokenKind::EOF)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Span from token `start` up to the cursor.
    pub fn span_from(&self, start: usize) -> TokenSpan {
        TokenSpan::new(start, self.pos.max(start))
    }

    /// Builds an error located at the current token.
    pub fn error_here(&self, error: ParseErrorImpl) -> ParseError {
        ParseError::new(error, TokenSpan::single(self.current_token().index))
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors_len: self.errors.len(),
        }
    }

    /// Restores the cursor and drops errors recorded since `checkpoint`.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        trace!(
            from = self.pos,
            to = checkpoint.pos,
            dropped_errors = self.errors.len() - checkpoint.errors_len.min(self.errors.len()),
            "rewinding parser"
        );
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors_len);
    }

    pub fn record(&mut self, error: ParseError) {
        trace!(%error, "recorded parse error");
        self.errors.push(error);
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` at the current token once [`MAX_DEPTH`]
    /// levels are open.
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            debug!(depth = self.depth, "nesting limit reached");
            return Err(self.error_here(ParseErrorImpl::NestingTooDeep { limit: MAX_DEPTH }));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Moves the cursor to the next statement boundary after an error.
    ///
    /// Skips at least one token unless sitting on `}`, then stops just past
    /// a `;`, on a `}`, on a statement keyword, or at EOF.
    pub fn recover(&mut self) {
        let start = self.pos;
        if self.is_at(TokenKind::CloseCurly) {
            return;
        }
        self.advance();

        while self.has_tokens() {
            if self.tokens[self.pos - 1].kind == TokenKind::Semicolon
                || self.is_at(TokenKind::CloseCurly)
                || self.current_token().keyword().is_some_and(is_stmt_keyword)
            {
                break;
            }
            self.advance();
        }

        trace!(skipped = %TokenSpan::new(start, self.pos), "recovered from parse error");
    }
}

/// Parses a stream of tokens into a Program.
///
/// This is the main entry point for parsing. Every statement-level error is
/// recorded and parsing continues; if any error was recorded the whole list
/// is returned in the order it was found.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseErrors> {
    let mut parser = Parser::new(tokens);
    let mut body = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser, false) {
            Ok(Some(stmt)) => body.push(stmt),
            Ok(None) => break,
            Err(error) => {
                parser.record(error);
                parser.recover();
            }
        }
    }

    if parser.has_tokens() {
        let error = parser.error_here(ParseErrorImpl::ExpectedEof {
            found: parser.current_token().to_string(),
        });
        parser.record(error);
    }

    debug!(
        statements = body.len(),
        errors = parser.errors.len(),
        "parsed program"
    );

    if !parser.errors.is_empty() {
        return Err(ParseErrors(parser.errors));
    }
    Ok(Program::new(body))
}
