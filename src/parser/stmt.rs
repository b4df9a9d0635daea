use tracing::trace;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{FnKind, Identifier, LiteralExpr, LiteralKind},
        statements::{
            ExpressionStmt, ExternImportStmt, FnDeclStmt, ImportStmt, ReturnStmt,
            StaticImportStmt, VarDeclStmt,
        },
    },
    errors::errors::{ParseError, ParseErrorImpl},
    lexer::tokens::{Keyword, TokenKind},
    TokenSpan,
};

use super::{
    expr::{
        parse_block_expr, parse_expected_expr, parse_expr, parse_fn_signature,
        parse_path_qualifier, FnSignature, Restriction,
    },
    lookups::stmt_handler,
    parser::Parser,
};

/// Parses the next statement.
///
/// Returns `Ok(None)` when no statement starts here. Inside a block this also
/// covers a function that turns out to be the block's tail expression.
pub fn parse_stmt(parser: &mut Parser, inside_block: bool) -> Result<Option<Stmt>, ParseError> {
    if let Some(keyword) = parser.current_token().keyword() {
        return match stmt_handler(keyword) {
            Some(handler) => handler(parser, inside_block),
            None => Err(parser.error_here(ParseErrorImpl::UnexpectedKeyword {
                keyword,
                context: "statement",
            })),
        };
    }

    let start = parser.position();
    let Some(expression) = parse_expr(parser)? else {
        return Ok(None);
    };
    parse_expression_stmt(parser, expression, start).map(Some)
}

/// Finishes `expression ;` for an expression starting at token `start`.
pub fn parse_expression_stmt(
    parser: &mut Parser,
    expression: Expr,
    start: usize,
) -> Result<Stmt, ParseError> {
    if !parser.is_at(TokenKind::Semicolon) {
        return Err(parser.error_here(ParseErrorImpl::MissingSemicolon {
            found: parser.current_token().to_string(),
        }));
    }

    if !expression.can_stand_alone() {
        return Err(ParseError::new(
            ParseErrorImpl::CannotStandAlone {
                expr: expression.kind(),
            },
            expression.span(),
        ));
    }

    parser.expect_semicolon()?;
    Ok(Stmt::Expression(ExpressionStmt {
        expression,
        span: parser.span_from(start),
    }))
}

pub fn parse_var_decl_stmt(
    parser: &mut Parser,
    _inside_block: bool,
) -> Result<Option<Stmt>, ParseError> {
    let start = parser.advance().index;
    let mutable = parser.is_at_keyword(Keyword::Var);
    if mutable {
        parser.advance();
    }

    let identifier = parser.expect_identifier("a variable name")?;
    parser.expect(TokenKind::Assignment, "`=`")?;
    let value = parse_expected_expr(parser, "for variable declaration")?;
    parser.expect_semicolon()?;

    Ok(Some(Stmt::VarDecl(VarDeclStmt {
        mutable,
        identifier,
        value,
        span: parser.span_from(start),
    })))
}

/// `action`/`compute` in statement position.
///
/// Inside a block a declaration whose header fails to parse may still be a
/// tail function expression, so the attempt is undone and `Ok(None)`
/// returned. Errors from the body are final.
pub fn parse_fn_decl_stmt(
    parser: &mut Parser,
    inside_block: bool,
) -> Result<Option<Stmt>, ParseError> {
    let checkpoint = parser.checkpoint();
    let (signature, identifier) = match parse_fn_decl_header(parser) {
        Ok(header) => header,
        Err(error) if inside_block => {
            trace!(%error, "function declaration failed inside block, retrying as tail expression");
            parser.rewind(checkpoint);
            return Ok(None);
        }
        Err(error) => return Err(error),
    };

    let body = parse_block_expr(parser)?;
    if signature.kind == FnKind::Action && body.has_tail_expr {
        return Err(ParseError::new(
            ParseErrorImpl::ActionTailExpression,
            body.span,
        ));
    }

    Ok(Some(Stmt::FnDecl(FnDeclStmt {
        identifier,
        parameters: signature.parameters,
        span: TokenSpan::new(signature.start, body.span.end),
        body,
        kind: signature.kind,
    })))
}

/// Signature and name of a declaration, leaving the cursor on the `{` of
/// its body.
fn parse_fn_decl_header(parser: &mut Parser) -> Result<(FnSignature, Identifier), ParseError> {
    let mut signature = parse_fn_signature(parser)?;
    let Some(identifier) = signature.identifier.take() else {
        return Err(ParseError::new(
            ParseErrorImpl::MissingFnName,
            TokenSpan::single(signature.start + 1),
        ));
    };

    if !parser.is_at(TokenKind::OpenCurly) {
        return Err(match signature.kind {
            FnKind::Action => parser.error_here(ParseErrorImpl::ActionBodyNotBlock),
            FnKind::Compute => parser.error_here(ParseErrorImpl::UnexpectedToken {
                expected: "a block as function body".to_string(),
                found: parser.current_token().to_string(),
            }),
        });
    }

    Ok((signature, identifier))
}

pub fn parse_return_stmt(
    parser: &mut Parser,
    _inside_block: bool,
) -> Result<Option<Stmt>, ParseError> {
    let start = parser.advance().index;
    let value = parse_expected_expr(parser, "for return statement")?;
    parser.expect_semicolon()?;

    Ok(Some(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    })))
}

pub fn parse_import_stmt(
    parser: &mut Parser,
    _inside_block: bool,
) -> Result<Option<Stmt>, ParseError> {
    let start = parser.advance().index;

    match parser.current_token().keyword() {
        Some(Keyword::Extern) => {
            parser.advance();
            return parse_extern_import(parser, start).map(|stmt| Some(Stmt::Import(stmt)));
        }
        Some(keyword) => {
            return Err(parser.error_here(ParseErrorImpl::UnexpectedKeyword {
                keyword,
                context: "import statement",
            }));
        }
        None => {}
    }

    let segment = parser.expect_identifier("an identifier after `import`")?;
    parser.expect(TokenKind::ColonColon, "`::`")?;
    let path = parse_path_qualifier(parser, segment, Restriction::Import)?;
    parser.expect_semicolon()?;

    Ok(Some(Stmt::Import(ImportStmt::Static(StaticImportStmt {
        path,
        span: parser.span_from(start),
    }))))
}

fn parse_extern_import(parser: &mut Parser, start: usize) -> Result<ImportStmt, ParseError> {
    let resource = parser.expect(
        TokenKind::StrLiteral,
        "a string literal for extern resource",
    )?;

    if !parser.is_at_keyword(Keyword::As) {
        return Err(parser.error_here(ParseErrorImpl::ExpectedAs {
            found: parser.current_token().to_string(),
        }));
    }
    parser.advance();

    let alias = parser.expect_identifier("an extern resource alias")?;
    parser.expect_semicolon()?;

    Ok(ImportStmt::Extern(ExternImportStmt {
        resource: LiteralExpr {
            kind: LiteralKind::Str,
            value: resource.value,
            span: TokenSpan::single(resource.index),
        },
        alias,
        span: parser.span_from(start),
    }))
}

/// Whether `stmt` may appear inside a block.
pub fn allowed_in_block(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::VarDecl(_) | Stmt::FnDecl(_) | Stmt::Return(_) => true,
        Stmt::Expression(stmt) => stmt.expression.can_stand_alone(),
        Stmt::Import(_) => false,
    }
}
