use std::fmt::Display;

use crate::TokenSpan;

use super::{
    expressions::{
        BinaryExpr, BlockExpr, CallExpr, FnExpr, Identifier, ImmediateCallExpr, LiteralExpr,
        PathQualifierExpr, TupleExpr, UnaryExpr,
    },
    operators::{Operation, PREC_CALL, PREC_PREFIX},
    statements::{ExpressionStmt, FnDeclStmt, ImportStmt, ReturnStmt, VarDeclStmt},
};

/// Statement Types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtType {
    ExpressionStmt,
    VarDeclStmt,
    FnDeclStmt,
    ReturnStmt,
    ImportStmt,
}

impl Display for StmtType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StmtType::ExpressionStmt => "expression statement",
            StmtType::VarDeclStmt => "variable declaration",
            StmtType::FnDeclStmt => "function declaration",
            StmtType::ReturnStmt => "return statement",
            StmtType::ImportStmt => "import statement",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    Return(ReturnStmt),
    Import(ImportStmt),
}

impl Stmt {
    pub fn kind(&self) -> StmtType {
        match self {
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::FnDecl(_) => StmtType::FnDeclStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::Import(_) => StmtType::ImportStmt,
        }
    }

    pub fn span(&self) -> TokenSpan {
        match self {
            Stmt::Expression(stmt) => stmt.span,
            Stmt::VarDecl(stmt) => stmt.span,
            Stmt::FnDecl(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
            Stmt::Import(stmt) => stmt.span(),
        }
    }
}

/// Expression Types
///
/// Plain tags for the expression variants, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprType {
    Literal,
    Identifier,
    Binary,
    Unary,
    Block,
    Fn,
    FnCall,
    ImmediateCall,
    Tuple,
    PathQualifier,
}

impl Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExprType::Literal => "literal",
            ExprType::Identifier => "identifier",
            ExprType::Binary => "binary expression",
            ExprType::Unary => "unary expression",
            ExprType::Block => "block",
            ExprType::Fn => "function expression",
            ExprType::FnCall => "function call",
            ExprType::ImmediateCall => "immediate call",
            ExprType::Tuple => "tuple",
            ExprType::PathQualifier => "path qualifier",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(Identifier),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Block(BlockExpr),
    Fn(FnExpr),
    FnCall(CallExpr),
    ImmediateCall(ImmediateCallExpr),
    Tuple(TupleExpr),
    PathQualifier(PathQualifierExpr),
}

impl Expr {
    pub fn kind(&self) -> ExprType {
        match self {
            Expr::Literal(_) => ExprType::Literal,
            Expr::Identifier(_) => ExprType::Identifier,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Block(_) => ExprType::Block,
            Expr::Fn(_) => ExprType::Fn,
            Expr::FnCall(_) => ExprType::FnCall,
            Expr::ImmediateCall(_) => ExprType::ImmediateCall,
            Expr::Tuple(_) => ExprType::Tuple,
            Expr::PathQualifier(_) => ExprType::PathQualifier,
        }
    }

    pub fn span(&self) -> TokenSpan {
        match self {
            Expr::Literal(expr) => expr.span,
            Expr::Identifier(expr) => expr.span,
            Expr::Binary(expr) => expr.span,
            Expr::Unary(expr) => expr.span,
            Expr::Block(expr) => expr.span,
            Expr::Fn(expr) => expr.span,
            Expr::FnCall(expr) => expr.span,
            Expr::ImmediateCall(expr) => expr.span,
            Expr::Tuple(expr) => expr.span,
            Expr::PathQualifier(expr) => expr.span,
        }
    }

    /// How tightly the expression binds when printed back as source.
    ///
    /// Function expressions extend as far right as possible and so bind
    /// loosest of all.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(expr) => expr.operator.precedence().unwrap_or(0),
            Expr::Unary(_) => PREC_PREFIX,
            Expr::Fn(_) => 0,
            _ => PREC_CALL,
        }
    }

    /// Whether the expression may appear on its own as a statement.
    pub fn can_stand_alone(&self) -> bool {
        match self {
            Expr::FnCall(_) | Expr::ImmediateCall(_) | Expr::Block(_) => true,
            Expr::Binary(expr) => expr.operator.operation == Operation::Assign,
            _ => false,
        }
    }
}

/// A statement or, in tail position, an expression inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockItem {
    Stmt(Stmt),
    Expr(Expr),
}

impl BlockItem {
    pub fn span(&self) -> TokenSpan {
        match self {
            BlockItem::Stmt(stmt) => stmt.span(),
            BlockItem::Expr(expr) => expr.span(),
        }
    }
}

/// Program
///
/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: TokenSpan,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        let span = match (body.first(), body.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => TokenSpan::default(),
        };
        Program { body, span }
    }
}
