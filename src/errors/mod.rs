//! Error types for the front end.
//!
//! Two disjoint kinds of error exist:
//!
//! - Lexical errors, which abort tokenization immediately and carry a
//!   line/column position
//! - Parse errors, which are recorded per statement with the offending token
//!   span and reported together once the whole program has been scanned

pub mod errors;
