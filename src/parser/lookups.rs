use crate::{
    ast::{ast::Stmt, operators::{Associativity, Operation}},
    errors::errors::ParseError,
    lexer::tokens::{Keyword, Token},
};

use super::{parser::Parser, stmt::*};

/// Parses the statement introduced by a keyword. The flag tells whether the
/// statement sits inside a block.
pub type StmtHandler = fn(&mut Parser, bool) -> Result<Option<Stmt>, ParseError>;

/// Statement table: which keywords open a statement, and how it is parsed.
pub fn stmt_handler(keyword: Keyword) -> Option<StmtHandler> {
    match keyword {
        Keyword::Let => Some(parse_var_decl_stmt),
        Keyword::Action | Keyword::Compute => Some(parse_fn_decl_stmt),
        Keyword::Return => Some(parse_return_stmt),
        Keyword::Import => Some(parse_import_stmt),
        Keyword::Var | Keyword::As | Keyword::Extern => None,
    }
}

pub fn is_stmt_keyword(keyword: Keyword) -> bool {
    stmt_handler(keyword).is_some()
}

/// Binding power of `token` in infix position, if it is a binary operator.
pub fn binding_power(token: &Token) -> Option<(u8, Associativity)> {
    let operation = Operation::from_binary(token)?;
    Some((operation.precedence()?, operation.associativity()))
}
