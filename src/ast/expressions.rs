use crate::{
    lexer::tokens::{Keyword, Radix, Token, TokenKind},
    TokenSpan,
};

use super::{
    ast::{BlockItem, Expr},
    operators::Operator,
};

// LITERALS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int(Radix),
    Float,
    Str,
    RawStr,
    Char,
}

impl LiteralKind {
    pub fn from_token(token: &Token) -> Option<LiteralKind> {
        match token.kind {
            TokenKind::IntLiteral => Some(LiteralKind::Int(token.radix.unwrap_or(Radix::Decimal))),
            TokenKind::FloatLiteral => Some(LiteralKind::Float),
            TokenKind::StrLiteral => Some(LiteralKind::Str),
            TokenKind::RawStrLiteral => Some(LiteralKind::RawStr),
            TokenKind::CharLiteral => Some(LiteralKind::Char),
            _ => None,
        }
    }
}

/// Literal Expression
/// Numbers keep their source text; strings and chars keep the body between
/// the quotes, escapes uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExpr {
    pub kind: LiteralKind,
    pub value: String,
    pub span: TokenSpan,
}

/// Identifier
/// A name in the tree. `keyword` is set when the name spells a reserved word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub keyword: Option<Keyword>,
    pub span: TokenSpan,
}

impl Identifier {
    pub fn from_token(token: &Token) -> Self {
        Identifier {
            name: token.value.clone(),
            keyword: token.keyword(),
            span: TokenSpan::single(token.index),
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword.is_some()
    }
}

// OPERATIONS

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpr {
    pub operator: Operator,
    pub operand: Box<Expr>,
    pub span: TokenSpan,
}

// BLOCKS & FUNCTIONS

/// Block Expression
/// `{ statements... tail? }`. When `has_tail_expr` is set the last item is
/// an expression and is the value of the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockExpr {
    pub body: Vec<BlockItem>,
    pub has_tail_expr: bool,
    pub span: TokenSpan,
}

impl BlockExpr {
    pub fn tail_expr(&self) -> Option<&Expr> {
        if !self.has_tail_expr {
            return None;
        }
        match self.body.last() {
            Some(BlockItem::Expr(expr)) => Some(expr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnKind {
    /// Side-effecting, block body without a value.
    Action,
    /// Value-producing.
    Compute,
}

impl FnKind {
    pub fn from_keyword(keyword: Keyword) -> Option<FnKind> {
        match keyword {
            Keyword::Action => Some(FnKind::Action),
            Keyword::Compute => Some(FnKind::Compute),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            FnKind::Action => Keyword::Action,
            FnKind::Compute => Keyword::Compute,
        }
    }
}

/// Function Expression
/// `action (a, b) -> body` or `compute name(a) -> body` in expression position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnExpr {
    pub identifier: Option<Identifier>,
    pub parameters: Vec<Identifier>,
    pub body: Box<Expr>,
    pub kind: FnKind,
    pub span: TokenSpan,
}

// CALLS & TUPLES

/// Call of a named function: `name(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: Identifier,
    pub arguments: Vec<Expr>,
    pub span: TokenSpan,
}

/// Call of any other expression's value: `(f)(x)`, `f()(y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmediateCallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleExpr {
    pub elements: Vec<Expr>,
    pub span: TokenSpan,
}

// PATHS

/// What follows `segment ::` in a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTarget {
    /// A brace-list entry with nothing after it: the `b` in `a::{b}`.
    Leaf,
    /// `a::b`
    Item(Identifier),
    /// `a::b::...`
    Nested(Box<PathQualifierExpr>),
    /// `a::*`
    Wildcard(TokenSpan),
    /// `a::{...}`
    Group(Vec<PathQualifierExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQualifierExpr {
    pub segment: Identifier,
    pub target: PathTarget,
    pub alias: Option<Identifier>,
    pub span: TokenSpan,
}

impl PathQualifierExpr {
    /// Every name along the path up to the first wildcard, group or leaf.
    pub fn segments(&self) -> Vec<&Identifier> {
        let mut segments = vec![&self.segment];
        let mut current = self;
        loop {
            match &current.target {
                PathTarget::Nested(next) => {
                    segments.push(&next.segment);
                    current = next;
                }
                PathTarget::Item(item) => {
                    segments.push(item);
                    break;
                }
                _ => break,
            }
        }
        segments
    }
}
