use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{LexError, LexErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::tokens::{Radix, Token, TokenKind, OPERATORS};

pub type RegexHandler = fn(&mut Lexer<'_>, &Regex) -> Result<(), LexError>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).expect("lexer pattern must compile"),
            handler,
        }
    }
}

lazy_static! {
    /// Scanning rules in priority order. Every pattern is anchored at the
    /// cursor; the first one that matches owns the next lexeme.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"\A\s+", skip_handler),
        RegexPattern::new(r"\A//[^\n]*", skip_handler),
        RegexPattern::new(r"\A/\*", block_comment_handler),
        RegexPattern::new(r#"\A""#, string_handler),
        RegexPattern::new(r#"\Ar""#, raw_string_handler),
        RegexPattern::new(r"\A'", char_handler),
        RegexPattern::new(r"\A(?:[0-9]|\.[0-9])", number_handler),
        RegexPattern::new(r"\A[A-Za-z_][A-Za-z0-9_]*", symbol_handler),
        RegexPattern::new(
            r"\A(?:<<|>>|<=|>=|==|!=|&&|\|\||->|::|[(){}\[\];,.:=+\-*/%!<>&|^~?@])",
            operator_handler,
        ),
    ];
}

pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            tokens: vec![],
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Moves the cursor forward by `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, mut token: Token) {
        token.index = self.tokens.len();
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map_or(0, |m| m.end())
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() && c != '_'
}

fn skip_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<(), LexError> {
    let len = lexer.matched_len(regex);
    lexer.advance_n(len);
    Ok(())
}

fn block_comment_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<(), LexError> {
    let position = lexer.position();
    match lexer.remainder()[2..].find("*/") {
        Some(offset) => {
            lexer.advance_n(offset + 4);
            Ok(())
        }
        None => Err(LexError::new(
            LexErrorImpl::UnterminatedBlockComment,
            position,
        )),
    }
}

/// Length of a string body up to (not including) the closing quote.
fn string_body_len(rest: &str, escapes: bool) -> Option<usize> {
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some(i),
            '\n' | '\r' => return None,
            '\\' if escapes => match chars.next() {
                None | Some((_, '\n')) | Some((_, '\r')) => return None,
                Some(_) => {}
            },
            _ => {}
        }
    }
    None
}

fn quoted_literal(
    lexer: &mut Lexer<'_>,
    regex: &Regex,
    kind: TokenKind,
    unterminated: LexErrorImpl,
) -> Result<(), LexError> {
    let start = lexer.pos;
    let position = lexer.position();
    let opening = lexer.matched_len(regex);
    let rest = &lexer.remainder()[opening..];

    let len = string_body_len(rest, kind == TokenKind::StrLiteral)
        .ok_or_else(|| LexError::new(unterminated, position))?;
    let value = rest[..len].to_string();

    lexer.advance_n(opening + len + 1);
    lexer.push(MK_TOKEN!(kind, value, Span::new(start, lexer.pos)));
    Ok(())
}

fn string_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<(), LexError> {
    quoted_literal(
        lexer,
        regex,
        TokenKind::StrLiteral,
        LexErrorImpl::UnterminatedString,
    )
}

fn raw_string_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<(), LexError> {
    quoted_literal(
        lexer,
        regex,
        TokenKind::RawStrLiteral,
        LexErrorImpl::UnterminatedRawString,
    )
}

fn hex_digits(s: &str) -> usize {
    s.chars().take_while(char::is_ascii_hexdigit).count()
}

/// Byte length of a char literal body, validating escape sequences.
fn char_body_len(rest: &str) -> Result<usize, LexErrorImpl> {
    let mut chars = rest.chars();
    match chars.next() {
        None | Some('\n') | Some('\r') => Err(LexErrorImpl::UnterminatedChar),
        Some('\'') => Err(LexErrorImpl::EmptyChar),
        Some('\\') => match chars.next() {
            None | Some('\n') | Some('\r') => Err(LexErrorImpl::UnterminatedChar),
            Some('x') => {
                let digits = hex_digits(&rest[2..]);
                if digits == 2 {
                    Ok(4)
                } else {
                    Err(LexErrorImpl::InvalidHexEscape {
                        fragment: rest[..2 + digits].to_string(),
                    })
                }
            }
            Some('u') if rest[2..].starts_with('{') => {
                let digits = hex_digits(&rest[3..]);
                let closed = rest[3 + digits..].starts_with('}');
                if (1..=6).contains(&digits) && closed {
                    Ok(4 + digits)
                } else {
                    let end = 3 + digits + usize::from(closed);
                    Err(LexErrorImpl::InvalidExtendedUnicodeEscape {
                        fragment: rest[..end].to_string(),
                    })
                }
            }
            Some('u') => {
                let digits = hex_digits(&rest[2..]);
                if digits == 4 {
                    Ok(6)
                } else {
                    Err(LexErrorImpl::InvalidUnicodeEscape {
                        fragment: rest[..2 + digits].to_string(),
                    })
                }
            }
            Some(c) => Ok(1 + c.len_utf8()),
        },
        Some(c) => Ok(c.len_utf8()),
    }
}

fn char_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<(), LexError> {
    let start = lexer.pos;
    let position = lexer.position();
    let rest = &lexer.remainder()[1..];

    let len = char_body_len(rest).map_err(|e| LexError::new(e, position))?;
    if !rest[len..].starts_with('\'') {
        return Err(LexError::new(LexErrorImpl::UnterminatedChar, position));
    }
    let value = rest[..len].to_string();

    lexer.advance_n(len + 2);
    lexer.push(MK_TOKEN!(
        TokenKind::CharLiteral,
        value,
        Span::new(start, lexer.pos)
    ));
    Ok(())
}

fn number_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<(), LexError> {
    let radix = [Radix::Hex, Radix::Octal, Radix::Binary]
        .into_iter()
        .find(|radix| lexer.remainder().starts_with(radix.prefix()));

    match radix {
        Some(radix) => radix_literal(lexer, radix),
        None => decimal_literal(lexer),
    }
}

fn radix_literal(lexer: &mut Lexer<'_>, radix: Radix) -> Result<(), LexError> {
    let start = lexer.pos;
    let position = lexer.position();
    let rest = lexer.remainder();
    let invalid = |fragment: String| {
        LexError::new(
            LexErrorImpl::InvalidRadixLiteral { radix, fragment },
            position,
        )
    };

    let prefix = radix.prefix().len();
    let mut end = prefix;
    for c in rest[prefix..].chars() {
        if radix.is_digit(c) || (c == '_' && !rest[..end].ends_with('_')) {
            end += 1;
        } else if c.is_whitespace() || is_punctuation(c) {
            break;
        } else {
            return Err(invalid(format!("{}{}", &rest[..end], c)));
        }
    }

    let literal = &rest[..end];
    if !literal[prefix..].chars().last().is_some_and(|c| radix.is_digit(c)) {
        return Err(invalid(literal.to_string()));
    }

    lexer.advance_n(end);
    lexer.push(MK_TOKEN!(
        TokenKind::IntLiteral,
        literal.to_string(),
        Span::new(start, lexer.pos),
        radix
    ));
    Ok(())
}

fn decimal_literal(lexer: &mut Lexer<'_>) -> Result<(), LexError> {
    let start = lexer.pos;
    let position = lexer.position();
    let rest = lexer.remainder();
    let bytes = rest.as_bytes();
    let error = |error_impl: LexErrorImpl| LexError::new(error_impl, position);

    let mut end = 0;
    let mut is_float = false;
    let mut has_exponent = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'_' => {
                if end > 0 && bytes[end - 1] == b'_' {
                    return Err(error(LexErrorImpl::InvalidNumber {
                        fragment: rest[..=end].to_string(),
                    }));
                }
                end += 1;
            }
            b'.' => {
                if is_float {
                    return Err(error(LexErrorImpl::InvalidFloat {
                        fragment: rest[..=end].to_string(),
                    }));
                }
                is_float = true;
                end += 1;
            }
            b'e' | b'E' => {
                if has_exponent {
                    return Err(error(LexErrorImpl::InvalidFloat {
                        fragment: rest[..=end].to_string(),
                    }));
                }

                let digit_at = match bytes.get(end + 1) {
                    Some(b'+') | Some(b'-') => end + 2,
                    _ => end + 1,
                };
                if !bytes.get(digit_at).is_some_and(u8::is_ascii_digit) {
                    let mut fragment = rest[..=end].to_string();
                    fragment.extend(rest[end + 1..].chars().next());
                    return Err(error(LexErrorImpl::InvalidExponent { fragment }));
                }

                end = digit_at;
                is_float = true;
                has_exponent = true;
            }
            _ => break,
        }
    }

    let literal = &rest[..end];
    if literal.ends_with('_') {
        return Err(error(LexErrorImpl::InvalidNumber {
            fragment: literal.to_string(),
        }));
    }

    let kind = if is_float {
        TokenKind::FloatLiteral
    } else {
        TokenKind::IntLiteral
    };

    lexer.advance_n(end);
    lexer.push(MK_TOKEN!(
        kind,
        literal.to_string(),
        Span::new(start, lexer.pos),
        Radix::Decimal
    ));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer<'_>, regex: &Regex) -> Result<(), LexError> {
    let start = lexer.pos;
    let len = lexer.matched_len(regex);
    let value = lexer.remainder()[..len].to_string();

    lexer.advance_n(len);
    lexer.push(MK_TOKEN!(
        TokenKind::Identifier,
        value,
        Span::new(start, lexer.pos)
    ));
    Ok(())
}

fn operator_handler(lexer: &mut Lexer<'_>, _regex: &Regex) -> Result<(), LexError> {
    let start = lexer.pos;
    let rest = lexer.remainder();

    let Some(&(text, kind)) = OPERATORS.iter().find(|(text, _)| rest.starts_with(text)) else {
        return Err(unexpected_character(lexer));
    };

    lexer.advance_n(text.len());
    lexer.push(MK_TOKEN!(
        kind,
        text.to_string(),
        Span::new(start, lexer.pos)
    ));
    Ok(())
}

fn unexpected_character(lexer: &Lexer<'_>) -> LexError {
    let character = lexer.at().unwrap_or('\0');
    LexError::new(
        LexErrorImpl::UnexpectedCharacter {
            character,
            code: character as u32,
        },
        lexer.position(),
    )
}

/// Converts `source` into a token stream terminated by a single `EOF` token.
///
/// Lexical errors are fatal: the first one aborts tokenization and no
/// partial output is returned.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lex = Lexer::new(source);

    'scan: while !lex.at_eof() {
        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                continue 'scan;
            }
        }

        let error = unexpected_character(&lex);
        trace!(%error, "no lexer pattern matched");
        return Err(error);
    }

    let end = source.len();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span::new(end, end)
    ));

    debug!(tokens = lex.tokens.len(), bytes = end, "tokenized source");
    Ok(lex.tokens)
}
