use std::fmt::Display;

use crate::{
    lexer::tokens::{Keyword, Token, TokenKind},
    TokenSpan,
};

/// Binding level of prefix operators.
pub const PREC_PREFIX: u8 = 50;
/// Binding level of calls and atoms.
pub const PREC_CALL: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Cast,         // a as b
    Add,          // a + b
    Subtract,     // a - b
    Multiply,     // a * b
    Divide,       // a / b
    Modulus,      // a % b
    Less,         // a < b
    LessEqual,    // a <= b
    Greater,      // a > b
    GreaterEqual, // a >= b
    BitAnd,       // a & b
    BitXor,       // a ^ b
    BitOr,        // a | b
    ShiftLeft,    // a << b
    ShiftRight,   // a >> b
    LogicalAnd,   // a && b
    LogicalOr,    // a || b
    Equal,        // a == b
    NotEqual,     // a != b
    Assign,       // a = b
    Not,          // !a
    Negate,       // -a
    Plus,         // +a
}

/// Grouping of chained binary operators. Prefix operations have `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Where an operator token sits relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Infix,
}

impl Operation {
    /// Resolves a token in infix position.
    pub fn from_binary(token: &Token) -> Option<Operation> {
        match token.kind {
            TokenKind::Plus => Some(Operation::Add),
            TokenKind::Dash => Some(Operation::Subtract),
            TokenKind::Star => Some(Operation::Multiply),
            TokenKind::Slash => Some(Operation::Divide),
            TokenKind::Percent => Some(Operation::Modulus),
            TokenKind::Less => Some(Operation::Less),
            TokenKind::LessEquals => Some(Operation::LessEqual),
            TokenKind::Greater => Some(Operation::Greater),
            TokenKind::GreaterEquals => Some(Operation::GreaterEqual),
            TokenKind::Ampersand => Some(Operation::BitAnd),
            TokenKind::Caret => Some(Operation::BitXor),
            TokenKind::Pipe => Some(Operation::BitOr),
            TokenKind::ShiftLeft => Some(Operation::ShiftLeft),
            TokenKind::ShiftRight => Some(Operation::ShiftRight),
            TokenKind::And => Some(Operation::LogicalAnd),
            TokenKind::Or => Some(Operation::LogicalOr),
            TokenKind::Equals => Some(Operation::Equal),
            TokenKind::NotEquals => Some(Operation::NotEqual),
            TokenKind::Assignment => Some(Operation::Assign),
            TokenKind::Identifier if token.is_keyword(Keyword::As) => Some(Operation::Cast),
            _ => None,
        }
    }

    /// Resolves a token in prefix position.
    pub fn from_prefix(token: &Token) -> Option<Operation> {
        match token.kind {
            TokenKind::Dash => Some(Operation::Negate),
            TokenKind::Plus => Some(Operation::Plus),
            TokenKind::Not => Some(Operation::Not),
            _ => None,
        }
    }

    /// The source text of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Cast => Keyword::As.as_str(),
            Operation::Add | Operation::Plus => "+",
            Operation::Subtract | Operation::Negate => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Modulus => "%",
            Operation::Less => "<",
            Operation::LessEqual => "<=",
            Operation::Greater => ">",
            Operation::GreaterEqual => ">=",
            Operation::BitAnd => "&",
            Operation::BitXor => "^",
            Operation::BitOr => "|",
            Operation::ShiftLeft => "<<",
            Operation::ShiftRight => ">>",
            Operation::LogicalAnd => "&&",
            Operation::LogicalOr => "||",
            Operation::Equal => "==",
            Operation::NotEqual => "!=",
            Operation::Assign => "=",
            Operation::Not => "!",
        }
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, Operation::Not | Operation::Negate | Operation::Plus)
    }

    /// Binary binding level; prefix operations have none.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Operation::Cast => Some(14),
            Operation::Multiply | Operation::Divide | Operation::Modulus => Some(13),
            Operation::Add | Operation::Subtract => Some(12),
            Operation::ShiftLeft | Operation::ShiftRight => Some(11),
            Operation::BitAnd => Some(10),
            Operation::BitXor => Some(9),
            Operation::BitOr => Some(8),
            Operation::Less
            | Operation::LessEqual
            | Operation::Greater
            | Operation::GreaterEqual
            | Operation::Equal
            | Operation::NotEqual => Some(7),
            Operation::LogicalAnd => Some(6),
            Operation::LogicalOr => Some(5),
            Operation::Assign => Some(2),
            Operation::Not | Operation::Negate | Operation::Plus => None,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            Operation::Cast => Associativity::Right,
            Operation::Not | Operation::Negate | Operation::Plus => Associativity::None,
            _ => Associativity::Left,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An operator occurrence in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub operation: Operation,
    pub span: TokenSpan,
}

impl Operator {
    /// Builds the operator for `token`.
    ///
    /// The parser only calls this on tokens already accepted by
    /// [`Operation::from_binary`] or [`Operation::from_prefix`].
    pub fn new(token: &Token, fixity: Fixity) -> Self {
        let operation = match fixity {
            Fixity::Prefix => Operation::from_prefix(token),
            Fixity::Infix => Operation::from_binary(token),
        };

        match operation {
            Some(operation) => Operator {
                operation,
                span: TokenSpan::single(token.index),
            },
            None => unreachable!("`{}` is not a {:?} operator", token, fixity),
        }
    }

    pub fn precedence(&self) -> Option<u8> {
        self.operation.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.operation.associativity()
    }
}
