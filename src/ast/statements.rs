use crate::TokenSpan;

use super::{
    ast::Expr,
    expressions::{BlockExpr, FnKind, Identifier, LiteralExpr, PathQualifierExpr},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: TokenSpan,
}

/// `let [var] name = value;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclStmt {
    pub mutable: bool,
    pub identifier: Identifier,
    pub value: Expr,
    pub span: TokenSpan,
}

/// `action name(params) -> { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDeclStmt {
    pub identifier: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: BlockExpr,
    pub kind: FnKind,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStmt {
    Extern(ExternImportStmt),
    Static(StaticImportStmt),
}

impl ImportStmt {
    pub fn span(&self) -> TokenSpan {
        match self {
            ImportStmt::Extern(stmt) => stmt.span,
            ImportStmt::Static(stmt) => stmt.span,
        }
    }
}

/// `import extern "resource" as Alias;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternImportStmt {
    pub resource: LiteralExpr,
    pub alias: Identifier,
    pub span: TokenSpan,
}

/// `import a::b::{c, d as e};`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticImportStmt {
    pub path: PathQualifierExpr,
    pub span: TokenSpan,
}
