//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::rc::Rc;

use super::*;
use crate::expr::Expr;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: &str) -> Self {
        Value::String(Rc::from(s))
    }

    /// Create a symbol value
    pub fn symbol(s: &str) -> Self {
        Value::Symbol(Rc::from(s))
    }

    /// Create a sequence value
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Rc::new(items))
    }

    /// Create a closure value
    pub fn closure(closure: Closure) -> Self {
        Value::Closure(Rc::new(closure))
    }

    /// Turn an unevaluated expression into data, as `quote` does.
    pub fn from_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Int(n) => Value::Int(*n),
            Expr::Float(n) => Value::Float(*n),
            Expr::Str(s) => Value::String(s.clone()),
            Expr::Symbol(s) => Value::Symbol(s.clone()),
            Expr::List(items) => Value::sequence(items.iter().map(Value::from_expr).collect()),
        }
    }

    /// Turn a data value back into an expression.
    ///
    /// Returns `None` for values with no source form (builtins and
    /// environments).
    pub fn to_expr(&self) -> Option<Expr> {
        match self {
            Value::Null => Some(Expr::symbol("null")),
            Value::Bool(true) => Some(Expr::symbol("true")),
            Value::Bool(false) => Some(Expr::symbol("false")),
            Value::Int(n) => Some(Expr::Int(*n)),
            Value::Float(n) => Some(Expr::Float(*n)),
            Value::String(s) => Some(Expr::Str(s.clone())),
            Value::Symbol(s) => Some(Expr::Symbol(s.clone())),
            Value::Sequence(items) => items
                .iter()
                .map(Value::to_expr)
                .collect::<Option<Vec<_>>>()
                .map(Expr::List),
            Value::Closure(c) => Some(c.to_expr()),
            Value::Builtin(_) | Value::Env(_) => None,
        }
    }

    /// Render for `print`: strings without quotes, everything else as
    /// its textual form.
    pub fn to_print_string(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            other => other.to_string(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness: only `null` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// Check if value is numeric (integer or float)
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Check if value is callable (closure or builtin)
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Builtin(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as f64 (converts from integer)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract sequence items
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Extract environment handle
    pub fn as_env(&self) -> Option<&Environment> {
        match self {
            Value::Env(env) => Some(env),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Structural equality. Numbers compare within their own subtype;
/// closures and environments compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Env(a), Value::Env(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Environment> for Value {
    fn from(env: Environment) -> Self {
        Value::Env(env)
    }
}

impl From<BuiltinFn> for Value {
    fn from(b: BuiltinFn) -> Self {
        Value::Builtin(b)
    }
}
