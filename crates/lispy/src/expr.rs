//! Parsed expression model
//!
//! Source text is read into a closed recursive sum type. Sequences are
//! non-empty in well-formed programs; the reader still accepts `[]` so the
//! evaluator can report it as an unimplemented form rather than a syntax
//! error.

use std::fmt;
use std::rc::Rc;

/// A parsed, not-yet-evaluated form.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal
    Int(i64),

    /// Floating-point literal
    Float(f64),

    /// String literal, already unquoted and unescaped
    Str(Rc<str>),

    /// Identifier
    Symbol(Rc<str>),

    /// Ordered list of expressions; the head is the operator or keyword
    List(Vec<Expr>),
}

impl Expr {
    /// Create a symbol expression
    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(Rc::from(name))
    }

    /// Create a string literal expression
    pub fn string(s: &str) -> Self {
        Expr::Str(Rc::from(s))
    }

    /// Create a list expression
    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(items)
    }

    /// Return the symbol name if this is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Return the items if this is a list.
    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check whether this is the symbol `name`.
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// The head symbol of a list, if there is one.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list()?.first()?.as_symbol()
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Int(n)
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Float(n)
    }
}

/// Write a string literal with the escapes the reader understands.
pub(crate) fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

/// Write a float so that it reads back as a float (`1.0`, not `1`).
pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    write!(f, "{:?}", n)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Float(n) => write_float(f, *n),
            Expr::Str(s) => write_string_literal(f, s),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_list() {
        let expr = Expr::list(vec![
            Expr::symbol("+"),
            Expr::Int(1),
            Expr::list(vec![Expr::symbol("*"), Expr::Float(2.0), Expr::string("a\"b")]),
        ]);
        assert_eq!(expr.to_string(), r#"[+ 1 [* 2.0 "a\"b"]]"#);
    }

    #[test]
    fn test_head_symbol() {
        let expr = Expr::list(vec![Expr::symbol("begin"), Expr::Int(1)]);
        assert_eq!(expr.head_symbol(), Some("begin"));
        assert_eq!(Expr::Int(1).head_symbol(), None);
        assert_eq!(Expr::list(vec![]).head_symbol(), None);
    }
}
