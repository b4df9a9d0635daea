//! Lexical analysis for the front end.
//!
//! Converts source text into a stream of tokens for parsing:
//!
//! - Anchored regex patterns select the next lexeme in priority order
//! - String, char and numeric literals are validated by hand-written scanners
//! - Keywords are left as identifiers and resolved by the parser
//! - Whitespace and comments produce no tokens

pub mod lexer;
pub mod tokens;
