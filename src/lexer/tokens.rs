use std::fmt::Display;

use crate::Span;

/// Reserved words. The lexer never produces these directly: identifiers are
/// resolved against this table when the parser consumes them.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Let,
    Var,
    As,
    Action,
    Compute,
    Return,
    Import,
    Extern,
}

impl Keyword {
    pub fn lookup(name: &str) -> Option<Keyword> {
        match name {
            "let" => Some(Keyword::Let),
            "var" => Some(Keyword::Var),
            "as" => Some(Keyword::As),
            "action" => Some(Keyword::Action),
            "compute" => Some(Keyword::Compute),
            "return" => Some(Keyword::Return),
            "import" => Some(Keyword::Import),
            "extern" => Some(Keyword::Extern),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Let => "let",
            Keyword::Var => "var",
            Keyword::As => "as",
            Keyword::Action => "action",
            Keyword::Compute => "compute",
            Keyword::Return => "return",
            Keyword::Import => "import",
            Keyword::Extern => "extern",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base of an integer literal.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Radix {
    Decimal,
    Hex,
    Octal,
    Binary,
}

impl Radix {
    pub fn prefix(&self) -> &'static str {
        match self {
            Radix::Decimal => "",
            Radix::Hex => "0x",
            Radix::Octal => "0o",
            Radix::Binary => "0b",
        }
    }

    pub fn is_digit(&self, c: char) -> bool {
        match self {
            Radix::Decimal => c.is_ascii_digit(),
            Radix::Hex => c.is_ascii_hexdigit(),
            Radix::Octal => matches!(c, '0'..='7'),
            Radix::Binary => matches!(c, '0' | '1'),
        }
    }
}

impl Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Radix::Decimal => "decimal",
            Radix::Hex => "hex",
            Radix::Octal => "octal",
            Radix::Binary => "binary",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    StrLiteral,
    RawStrLiteral,
    CharLiteral,
    IntLiteral,
    FloatLiteral,
    Identifier,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    Semicolon,
    Comma,
    Dot,
    Colon,
    ColonColon, // ::
    Arrow,      // ->

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    ShiftLeft,
    Greater,
    GreaterEquals,
    ShiftRight,

    Ampersand,
    And, // &&
    Pipe,
    Or, // ||
    Caret,
    Tilde,
    Question,
    At,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Operators and punctuation, two-character entries first so a linear scan
/// yields the longest match.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("<<", TokenKind::ShiftLeft),
    (">>", TokenKind::ShiftRight),
    ("<=", TokenKind::LessEquals),
    (">=", TokenKind::GreaterEquals),
    ("==", TokenKind::Equals),
    ("!=", TokenKind::NotEquals),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("->", TokenKind::Arrow),
    ("::", TokenKind::ColonColon),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("{", TokenKind::OpenCurly),
    ("}", TokenKind::CloseCurly),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
    ("=", TokenKind::Assignment),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Dash),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("!", TokenKind::Not),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("?", TokenKind::Question),
    ("@", TokenKind::At),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    /// Position of the token in the token stream.
    pub index: usize,
    /// Set for numeric literals only.
    pub radix: Option<Radix>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "EOF"),
            TokenKind::StrLiteral => write!(f, "\"{}\"", self.value),
            TokenKind::RawStrLiteral => write!(f, "r\"{}\"", self.value),
            TokenKind::CharLiteral => write!(f, "'{}'", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl Token {
    /// The keyword this token spells, if it is an identifier naming one.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind == TokenKind::Identifier {
            Keyword::lookup(&self.value)
        } else {
            None
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}
