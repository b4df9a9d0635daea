use super::{
    ast::{BlockItem, Expr, Program, Stmt},
    expressions::{
        BinaryExpr, BlockExpr, CallExpr, FnExpr, Identifier, ImmediateCallExpr, LiteralExpr,
        PathQualifierExpr, TupleExpr, UnaryExpr,
    },
    operators::Operator,
    statements::{
        ExpressionStmt, ExternImportStmt, FnDeclStmt, ImportStmt, ReturnStmt, StaticImportStmt,
        VarDeclStmt,
    },
};

/// Read-only traversal over the tree, one method per concrete node type.
///
/// Nodes do not recurse on their own: each `visit_*` decides which children
/// to visit by calling `accept` on them.
pub trait Visitor<R> {
    fn visit_program(&mut self, node: &Program) -> R;
    fn visit_variable_declaration(&mut self, node: &VarDeclStmt) -> R;
    fn visit_fn_declaration(&mut self, node: &FnDeclStmt) -> R;
    fn visit_return_stmt(&mut self, node: &ReturnStmt) -> R;
    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) -> R;
    fn visit_extern_import(&mut self, node: &ExternImportStmt) -> R;
    fn visit_static_import(&mut self, node: &StaticImportStmt) -> R;
    fn visit_block(&mut self, node: &BlockExpr) -> R;
    fn visit_binary(&mut self, node: &BinaryExpr) -> R;
    fn visit_unary(&mut self, node: &UnaryExpr) -> R;
    fn visit_fn_call(&mut self, node: &CallExpr) -> R;
    fn visit_immediate_fn_call(&mut self, node: &ImmediateCallExpr) -> R;
    fn visit_fn(&mut self, node: &FnExpr) -> R;
    fn visit_literal(&mut self, node: &LiteralExpr) -> R;
    fn visit_tuple(&mut self, node: &TupleExpr) -> R;
    fn visit_identifier(&mut self, node: &Identifier) -> R;
    fn visit_operator(&mut self, node: &Operator) -> R;
    fn visit_path_qualifier(&mut self, node: &PathQualifierExpr) -> R;
}

macro_rules! impl_accept {
    ($($node:ty => $method:ident),* $(,)?) => {
        $(
            impl $node {
                pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
                    visitor.$method(self)
                }
            }
        )*
    };
}

impl_accept! {
    Program => visit_program,
    VarDeclStmt => visit_variable_declaration,
    FnDeclStmt => visit_fn_declaration,
    ReturnStmt => visit_return_stmt,
    ExpressionStmt => visit_expression_stmt,
    ExternImportStmt => visit_extern_import,
    StaticImportStmt => visit_static_import,
    BlockExpr => visit_block,
    BinaryExpr => visit_binary,
    UnaryExpr => visit_unary,
    CallExpr => visit_fn_call,
    ImmediateCallExpr => visit_immediate_fn_call,
    FnExpr => visit_fn,
    LiteralExpr => visit_literal,
    TupleExpr => visit_tuple,
    Identifier => visit_identifier,
    Operator => visit_operator,
    PathQualifierExpr => visit_path_qualifier,
}

impl Stmt {
    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Stmt::Expression(stmt) => stmt.accept(visitor),
            Stmt::VarDecl(stmt) => stmt.accept(visitor),
            Stmt::FnDecl(stmt) => stmt.accept(visitor),
            Stmt::Return(stmt) => stmt.accept(visitor),
            Stmt::Import(stmt) => stmt.accept(visitor),
        }
    }
}

impl ImportStmt {
    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            ImportStmt::Extern(stmt) => stmt.accept(visitor),
            ImportStmt::Static(stmt) => stmt.accept(visitor),
        }
    }
}

impl Expr {
    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Expr::Literal(expr) => expr.accept(visitor),
            Expr::Identifier(expr) => expr.accept(visitor),
            Expr::Binary(expr) => expr.accept(visitor),
            Expr::Unary(expr) => expr.accept(visitor),
            Expr::Block(expr) => expr.accept(visitor),
            Expr::Fn(expr) => expr.accept(visitor),
            Expr::FnCall(expr) => expr.accept(visitor),
            Expr::ImmediateCall(expr) => expr.accept(visitor),
            Expr::Tuple(expr) => expr.accept(visitor),
            Expr::PathQualifier(expr) => expr.accept(visitor),
        }
    }
}

impl BlockItem {
    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            BlockItem::Stmt(stmt) => stmt.accept(visitor),
            BlockItem::Expr(expr) => expr.accept(visitor),
        }
    }
}
