//! Reader: turns source text into expressions
//!
//! ```text
//! Source Code → [logos Token stream] → [Reader] → Expr
//! ```
//!
//! Grouping uses `[` and `]` only. Tokens are whitespace separated,
//! strings are double quoted, and `/* ... */` comments are dropped before
//! any structure is built. Anything else between delimiters is an atom,
//! classified afterwards as an integer, a float, or a symbol.

use std::ops::Range;

use logos::{Lexer, Logos};
use thiserror::Error;

use crate::expr::Expr;
use crate::stack::ensure_sufficient_stack;

// ═══════════════════════════════════════════════════════════════════════
// ERROR TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Error that occurred while reading source text.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parse error: {message}{}", render_span(.span))]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Byte range of the offending input, when known
    pub span: Option<Range<usize>>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    /// Add location information to the error.
    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }
}

fn render_span(span: &Option<Range<usize>>) -> String {
    span.as_ref()
        .map(|span| format!(" at {}..{}", span.start, span.end))
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════
// TOKENS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
enum Token<'src> {
    #[token("[")]
    Open,

    #[token("]")]
    Close,

    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    Str(&'src str),

    #[regex(r#"[^ \t\r\n\f\[\]"]"#, atom_rest)]
    Atom(&'src str),
}

/// Extend an atom up to the next delimiter or comment opener.
fn atom_rest<'src>(lex: &mut Lexer<'src, Token<'src>>) -> &'src str {
    let rest = lex.remainder();
    let end = rest
        .char_indices()
        .find(|&(i, c)| is_delimiter(c) || rest[i..].starts_with("/*"))
        .map_or(rest.len(), |(i, _)| i);
    lex.bump(end);
    lex.slice()
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c' | '[' | ']' | '"')
}

fn tokenize(source: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) if lexer.slice().starts_with('"') => {
                return Err(ParseError::new("unterminated string literal").with_span(span));
            }
            Err(()) => {
                let message = format!("unexpected input `{}`", lexer.slice());
                return Err(ParseError::new(message).with_span(span));
            }
        }
    }
    Ok(tokens)
}

// ═══════════════════════════════════════════════════════════════════════
// READER
// ═══════════════════════════════════════════════════════════════════════

/// Parse exactly one top-level form.
///
/// # Example
///
/// ```
/// use lispy::{parse, Expr};
///
/// let expr = parse("[+ 1 2]").unwrap();
/// assert_eq!(expr.head_symbol(), Some("+"));
/// assert_eq!(expr.as_list().unwrap()[1], Expr::Int(1));
/// ```
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut forms = parse_program(source)?;
    match forms.len() {
        0 => Err(ParseError::new("empty input")),
        1 => Ok(forms.remove(0)),
        n => Err(ParseError::new(format!(
            "expected a single form, found {}",
            n
        ))),
    }
}

/// Parse every top-level form in `source`.
pub fn parse_program(source: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens = tokenize(source)?;
    let mut reader = Reader {
        tokens: &tokens,
        pos: 0,
    };
    let mut forms = Vec::new();
    while !reader.at_end() {
        forms.push(reader.read_form()?);
    }
    Ok(forms)
}

struct Reader<'t, 'src> {
    tokens: &'t [(Token<'src>, Range<usize>)],
    pos: usize,
}

impl<'t, 'src> Reader<'t, 'src> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn read_form(&mut self) -> Result<Expr, ParseError> {
        let Some((token, span)) = self.tokens.get(self.pos).cloned() else {
            return Err(ParseError::new("unexpected end of input"));
        };
        self.pos += 1;

        match token {
            Token::Open => ensure_sufficient_stack(|| self.read_list(span)),
            Token::Close => Err(ParseError::new("unexpected `]`").with_span(span)),
            Token::Str(raw) => unescape(&raw[1..raw.len() - 1])
                .map(|s| Expr::string(&s))
                .map_err(|e| e.with_span(span)),
            Token::Atom(text) => atom(text).map_err(|e| e.with_span(span)),
        }
    }

    fn read_list(&mut self, open: Range<usize>) -> Result<Expr, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.tokens.get(self.pos) {
                None => return Err(ParseError::new("unterminated list").with_span(open)),
                Some((Token::Close, _)) => {
                    self.pos += 1;
                    return Ok(Expr::List(items));
                }
                Some(_) => items.push(self.read_form()?),
            }
        }
    }
}

fn unescape(body: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                return Err(ParseError::new(format!("unknown escape `\\{}`", other)));
            }
            None => return Err(ParseError::new("dangling `\\` in string literal")),
        }
    }
    Ok(out)
}

fn atom(text: &str) -> Result<Expr, ParseError> {
    if is_integer_literal(text) {
        return text
            .parse::<i64>()
            .map(Expr::Int)
            .map_err(|_| ParseError::new(format!("integer literal `{}` out of range", text)));
    }
    if is_float_literal(text) {
        return text
            .parse::<f64>()
            .map(Expr::Float)
            .map_err(|_| ParseError::new(format!("invalid float literal `{}`", text)));
    }
    Ok(Expr::symbol(text))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

fn is_integer_literal(text: &str) -> bool {
    all_digits(strip_sign(text))
}

// [+-]? (digits '.' digits? | '.' digits | digits) ([eE] [+-]? digits)?
// with at least a '.' or an exponent present.
fn is_float_literal(text: &str) -> bool {
    let body = strip_sign(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (mantissa, None),
    };

    let int_ok = int_part.is_empty() || all_digits(int_part);
    let frac_ok = frac_part.map_or(true, |f| f.is_empty() || all_digits(f));
    let has_digits = !int_part.is_empty() || frac_part.is_some_and(|f| !f.is_empty());
    let exp_ok = exponent.map_or(true, |e| all_digits(strip_sign(e)));

    int_ok
        && frac_ok
        && has_digits
        && exp_ok
        && (frac_part.is_some() || exponent.is_some())
}
