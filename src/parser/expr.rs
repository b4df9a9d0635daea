use crate::{
    ast::{
        ast::{BlockItem, Expr},
        expressions::{
            BinaryExpr, BlockExpr, CallExpr, FnExpr, FnKind, Identifier, ImmediateCallExpr,
            LiteralExpr, LiteralKind, PathQualifierExpr, PathTarget, TupleExpr, UnaryExpr,
        },
        operators::{Associativity, Fixity, Operation, Operator},
    },
    errors::errors::{ParseError, ParseErrorImpl},
    lexer::tokens::{Keyword, TokenKind},
    TokenSpan,
};

use super::{
    lookups::binding_power,
    parser::Parser,
    stmt::{allowed_in_block, parse_expression_stmt, parse_stmt},
};

/// Where a path qualifier is being parsed. Wildcards, brace groups and
/// aliases are only legal in imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restriction {
    Import,
    Expression,
}

/// Parses the next expression, or returns `Ok(None)` if no expression
/// starts at the cursor.
pub fn parse_expr(parser: &mut Parser) -> Result<Option<Expr>, ParseError> {
    let Some(lhs) = parse_unary_expr(parser)? else {
        return Ok(None);
    };
    parse_binary_expr(parser, lhs, 0).map(Some)
}

/// Like [`parse_expr`], but a missing expression is an error. `context`
/// completes "Expected an expression ...".
pub fn parse_expected_expr(parser: &mut Parser, context: &'static str) -> Result<Expr, ParseError> {
    match parse_expr(parser)? {
        Some(expr) => Ok(expr),
        None => Err(expected_expression(parser, context)),
    }
}

fn expected_expression(parser: &Parser, context: &'static str) -> ParseError {
    parser.error_here(ParseErrorImpl::ExpectedExpression {
        context,
        found: parser.current_token().to_string(),
    })
}

/// Precedence climbing over binary operators binding at least as tightly as
/// `min_precedence`.
fn parse_binary_expr(parser: &mut Parser, lhs: Expr, min_precedence: u8) -> Result<Expr, ParseError> {
    parser.nested(|parser| parse_binary_operations(parser, lhs, min_precedence))
}

fn parse_binary_operations(
    parser: &mut Parser,
    mut lhs: Expr,
    min_precedence: u8,
) -> Result<Expr, ParseError> {
    while let Some((precedence, _)) = binding_power(parser.current_token()) {
        if precedence < min_precedence {
            break;
        }

        let operator = Operator::new(&parser.advance(), Fixity::Infix);
        let Some(mut rhs) = parse_unary_expr(parser)? else {
            return Err(expected_expression(parser, "on the right-hand side of binary expression"));
        };

        while let Some((next_precedence, associativity)) = binding_power(parser.current_token()) {
            if next_precedence > precedence {
                rhs = parse_binary_expr(parser, rhs, precedence + 1)?;
            } else if next_precedence == precedence && associativity == Associativity::Right {
                rhs = parse_binary_expr(parser, rhs, precedence)?;
            } else {
                break;
            }
        }

        let span = lhs.span().to(rhs.span());
        lhs = Expr::Binary(BinaryExpr {
            left: Box::new(lhs),
            operator,
            right: Box::new(rhs),
            span,
        });
    }

    Ok(lhs)
}

/// `(+|-|!) Unary | Postfix`
fn parse_unary_expr(parser: &mut Parser) -> Result<Option<Expr>, ParseError> {
    parser.nested(parse_prefix_expr)
}

fn parse_prefix_expr(parser: &mut Parser) -> Result<Option<Expr>, ParseError> {
    if Operation::from_prefix(parser.current_token()).is_none() {
        return parse_postfix_expr(parser);
    }

    let token = parser.advance();
    let operator = Operator::new(&token, Fixity::Prefix);
    let Some(operand) = parse_unary_expr(parser)? else {
        return Err(expected_expression(parser, "after unary operator"));
    };

    Ok(Some(Expr::Unary(UnaryExpr {
        span: TokenSpan::new(token.index, operand.span().end),
        operator,
        operand: Box::new(operand),
    })))
}

/// A primary followed by any number of immediate calls: `f()(x)(y)`.
fn parse_postfix_expr(parser: &mut Parser) -> Result<Option<Expr>, ParseError> {
    let Some(mut expr) = parse_primary_expr(parser)? else {
        return Ok(None);
    };

    while parser.is_at(TokenKind::OpenParen) {
        let arguments = parse_arguments(parser)?;
        let span = parser.span_from(expr.span().start);
        expr = Expr::ImmediateCall(ImmediateCallExpr {
            callee: Box::new(expr),
            arguments,
            span,
        });
    }

    Ok(Some(expr))
}

fn parse_primary_expr(parser: &mut Parser) -> Result<Option<Expr>, ParseError> {
    let token = parser.current_token().clone();

    if let Some(kind) = LiteralKind::from_token(&token) {
        parser.advance();
        return Ok(Some(Expr::Literal(LiteralExpr {
            kind,
            value: token.value,
            span: TokenSpan::single(token.index),
        })));
    }

    match token.kind {
        TokenKind::Identifier => {
            if let Some(keyword) = token.keyword() {
                return parse_keyword_expr(parser, keyword).map(Some);
            }

            parser.advance();
            let identifier = Identifier::from_token(&token);
            if parser.consume(TokenKind::ColonColon).is_some() {
                let path = parse_path_qualifier(parser, identifier, Restriction::Expression)?;
                return Ok(Some(Expr::PathQualifier(path)));
            }
            if parser.is_at(TokenKind::OpenParen) {
                let arguments = parse_arguments(parser)?;
                return Ok(Some(Expr::FnCall(CallExpr {
                    callee: identifier,
                    arguments,
                    span: parser.span_from(token.index),
                })));
            }
            Ok(Some(Expr::Identifier(identifier)))
        }
        TokenKind::OpenParen => parse_paren_expr(parser).map(Some),
        TokenKind::OpenCurly => parse_block_expr(parser).map(|block| Some(Expr::Block(block))),
        _ => Ok(None),
    }
}

fn parse_keyword_expr(parser: &mut Parser, keyword: Keyword) -> Result<Expr, ParseError> {
    match FnKind::from_keyword(keyword) {
        Some(_) => parse_fn_expr(parser).map(Expr::Fn),
        None => Err(parser.error_here(ParseErrorImpl::UnexpectedKeyword {
            keyword,
            context: "expression",
        })),
    }
}

/// `()` empty tuple, `(e)` grouping, `(e,)` and `(e, ...)` tuples.
fn parse_paren_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let start = parser.advance().index;

    let Some(first) = parse_expr(parser)? else {
        if parser.consume(TokenKind::CloseParen).is_some() {
            return Ok(Expr::Tuple(TupleExpr {
                elements: vec![],
                span: parser.span_from(start),
            }));
        }
        return Err(expected_expression(parser, "inside parentheses"));
    };

    if parser.consume(TokenKind::Comma).is_none() {
        parser.expect(TokenKind::CloseParen, "`)`")?;
        return Ok(first);
    }

    let mut elements = vec![first];
    while let Some(element) = parse_expr(parser)? {
        elements.push(element);
        if parser.consume(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen, "`)`")?;

    Ok(Expr::Tuple(TupleExpr {
        elements,
        span: parser.span_from(start),
    }))
}

/// `( Expr (, Expr)* )`, cursor on the `(`.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, ParseError> {
    parser.expect(TokenKind::OpenParen, "`(`")?;

    let mut arguments = vec![];
    while !parser.is_at(TokenKind::CloseParen) {
        let Some(argument) = parse_expr(parser)? else {
            break;
        };
        arguments.push(argument);
        if parser.consume(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen, "`)`")?;
    Ok(arguments)
}

/// `{ Statement* TailExpression? }`
///
/// Statement errors inside the block are recorded and skipped so the rest of
/// the block still parses.
pub fn parse_block_expr(parser: &mut Parser) -> Result<BlockExpr, ParseError> {
    parser.nested(parse_block_items)
}

fn parse_block_items(parser: &mut Parser) -> Result<BlockExpr, ParseError> {
    let start = parser.expect(TokenKind::OpenCurly, "`{`")?.index;
    let mut body = vec![];
    let mut tail = None;

    while !parser.is_at(TokenKind::CloseCurly) && parser.has_tokens() {
        let item = if parser.current_token().keyword().is_some() {
            parse_stmt(parser, true)
        } else {
            let start = parser.position();
            match parse_expr(parser) {
                Ok(Some(expression)) if !parser.is_at(TokenKind::Semicolon) => {
                    tail = Some(expression);
                    break;
                }
                Ok(Some(expression)) => parse_expression_stmt(parser, expression, start).map(Some),
                Ok(None) => Ok(None),
                Err(error) => Err(error),
            }
        };

        match item {
            Ok(Some(stmt)) => {
                if !allowed_in_block(&stmt) {
                    parser.record(ParseError::new(
                        ParseErrorImpl::NotAllowedInBlock { stmt: stmt.kind() },
                        stmt.span(),
                    ));
                    continue;
                }
                body.push(BlockItem::Stmt(stmt));
            }
            Ok(None) => break,
            Err(error) => {
                parser.record(error);
                parser.recover();
            }
        }
    }

    if tail.is_none() {
        tail = parse_expr(parser)?;
    }
    let has_tail_expr = tail.is_some();
    body.extend(tail.map(BlockItem::Expr));

    parser.expect(TokenKind::CloseCurly, "`}`")?;
    Ok(BlockExpr {
        body,
        has_tail_expr,
        span: parser.span_from(start),
    })
}

/// Keyword, optional name and parameter list of a function, up to and
/// including the `->`.
pub struct FnSignature {
    pub kind: FnKind,
    pub identifier: Option<Identifier>,
    pub parameters: Vec<Identifier>,
    /// Index of the `action`/`compute` token.
    pub start: usize,
}

pub fn parse_fn_signature(parser: &mut Parser) -> Result<FnSignature, ParseError> {
    let keyword = parser.advance();
    let kind = match keyword.keyword().and_then(FnKind::from_keyword) {
        Some(kind) => kind,
        None => unreachable!("`{}` does not start a function", keyword),
    };

    let identifier = if parser.is_at(TokenKind::Identifier) {
        Some(parser.expect_identifier("a function name")?)
    } else {
        None
    };

    parser.expect(TokenKind::OpenParen, "`(`")?;
    let mut parameters = vec![];
    while !parser.is_at(TokenKind::CloseParen) {
        parameters.push(parser.expect_identifier("a parameter name")?);
        if parser.consume(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen, "`)`")?;
    parser.expect(TokenKind::Arrow, "`->`")?;

    Ok(FnSignature {
        kind,
        identifier,
        parameters,
        start: keyword.index,
    })
}

/// A function in expression position. It may be anonymous; a `compute`
/// body is any expression, an `action` body must be a block without a
/// tail expression.
fn parse_fn_expr(parser: &mut Parser) -> Result<FnExpr, ParseError> {
    let signature = parse_fn_signature(parser)?;

    let body = match signature.kind {
        FnKind::Action => {
            if !parser.is_at(TokenKind::OpenCurly) {
                return Err(parser.error_here(ParseErrorImpl::ActionBodyNotBlock));
            }
            let block = parse_block_expr(parser)?;
            if block.has_tail_expr {
                return Err(ParseError::new(
                    ParseErrorImpl::ActionTailExpression,
                    block.span,
                ));
            }
            Expr::Block(block)
        }
        FnKind::Compute => parse_expected_expr(parser, "for function body")?,
    };

    Ok(FnExpr {
        identifier: signature.identifier,
        parameters: signature.parameters,
        span: TokenSpan::new(signature.start, body.span().end),
        body: Box::new(body),
        kind: signature.kind,
    })
}

/// Parses what follows `segment ::`.
///
/// In imports a segment continues with a name, `*` or a `{...}` group, and a
/// single-name target may take an `as` alias. In expressions only names are
/// allowed and `as` is left to the cast operator.
pub fn parse_path_qualifier(
    parser: &mut Parser,
    segment: Identifier,
    restriction: Restriction,
) -> Result<PathQualifierExpr, ParseError> {
    parser.nested(|parser| parse_path_target(parser, segment, restriction))
}

fn parse_path_target(
    parser: &mut Parser,
    segment: Identifier,
    restriction: Restriction,
) -> Result<PathQualifierExpr, ParseError> {
    let start = segment.span.start;

    let (target, can_alias) = match parser.current_token_kind() {
        TokenKind::Identifier => {
            let item = parser.expect_identifier("a path segment")?;
            if parser.consume(TokenKind::ColonColon).is_some() {
                let nested = parse_path_qualifier(parser, item, restriction)?;
                (PathTarget::Nested(Box::new(nested)), false)
            } else {
                (PathTarget::Item(item), true)
            }
        }
        TokenKind::Star => {
            if restriction != Restriction::Import {
                return Err(parser.error_here(ParseErrorImpl::WildcardOutsideImport));
            }
            let star = parser.advance();
            (PathTarget::Wildcard(TokenSpan::single(star.index)), false)
        }
        TokenKind::OpenCurly => {
            if restriction != Restriction::Import {
                return Err(parser.error_here(ParseErrorImpl::GroupOutsideImport));
            }
            (PathTarget::Group(parse_path_group(parser, restriction)?), false)
        }
        _ => {
            let expected = match restriction {
                Restriction::Import => "an identifier, `*` or `{` after `::`",
                Restriction::Expression => "an identifier after `::`",
            };
            return Err(parser.error_here(ParseErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: parser.current_token().to_string(),
            }));
        }
    };

    let alias = match restriction {
        Restriction::Import => parse_path_alias(parser, can_alias)?,
        Restriction::Expression => None,
    };

    Ok(PathQualifierExpr {
        segment,
        target,
        alias,
        span: parser.span_from(start),
    })
}

/// `{ a, b::c, d as e }`, cursor on the `{`.
fn parse_path_group(
    parser: &mut Parser,
    restriction: Restriction,
) -> Result<Vec<PathQualifierExpr>, ParseError> {
    let open = parser.advance().index;
    let mut entries = vec![];

    while !parser.is_at(TokenKind::CloseCurly) {
        let entry = parser.expect_identifier("a path segment")?;
        let qualifier = if parser.consume(TokenKind::ColonColon).is_some() {
            parse_path_qualifier(parser, entry, restriction)?
        } else {
            let start = entry.span.start;
            let alias = parse_path_alias(parser, true)?;
            PathQualifierExpr {
                segment: entry,
                target: PathTarget::Leaf,
                alias,
                span: parser.span_from(start),
            }
        };
        entries.push(qualifier);

        if parser.consume(TokenKind::Comma).is_none() {
            break;
        }
        if let Some(close) = parser.consume(TokenKind::CloseCurly) {
            return Err(ParseError::new(
                ParseErrorImpl::TrailingComma,
                TokenSpan::single(close.index),
            ));
        }
    }

    parser.expect(TokenKind::CloseCurly, "`}`")?;
    if entries.is_empty() {
        return Err(ParseError::new(
            ParseErrorImpl::EmptyGroup,
            parser.span_from(open),
        ));
    }
    Ok(entries)
}

/// Optional `as Alias` after a path target.
fn parse_path_alias(parser: &mut Parser, can_alias: bool) -> Result<Option<Identifier>, ParseError> {
    if !parser.is_at(TokenKind::Identifier) {
        return Ok(None);
    }
    if !parser.is_at_keyword(Keyword::As) {
        return Err(parser.error_here(ParseErrorImpl::ExpectedAs {
            found: parser.current_token().to_string(),
        }));
    }
    if !can_alias {
        return Err(parser.error_here(ParseErrorImpl::AliasNotAllowed));
    }

    parser.advance();
    parser.expect_identifier("an import alias").map(Some)
}
