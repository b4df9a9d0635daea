//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! The lexer assigns the stream index when the token is pushed, so tokens
//! built here start at index 0.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
/// * `$radix` - Optional radix, for numeric literals
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntLiteral, "42".to_string(), span, Radix::Decimal);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            index: 0,
            radix: None,
        }
    };
    ($kind:expr, $value:expr, $span:expr, $radix:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            index: 0,
            radix: Some($radix),
        }
    };
}
