//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a Program. It uses recursive descent for statements and precedence
//! climbing for binary expressions, and handles:
//!
//! - Statement parsing (variable and function declarations, returns, imports)
//! - Expression parsing (unary and binary operators, calls, tuples, blocks,
//!   function expressions, path qualifiers)
//! - Error recovery, so every error in a program is reported at once

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
