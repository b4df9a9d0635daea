/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Statement and expression enums, the program root
/// - expressions: Definitions for the expression node types
/// - statements: Definitions for the statement node types
/// - operators: Operator resolution, precedence and associativity
/// - visitor: The visitor trait and `accept` dispatch
pub mod ast;
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod visitor;

#[cfg(test)]
mod tests;
