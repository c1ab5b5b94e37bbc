//! Display and Debug implementations for Value
//!
//! `Display` renders the bracketed textual form: data values print the way
//! the reader would accept them back, so a quoted structure survives a
//! render/re-parse round trip.

use std::fmt;

use super::*;
use crate::expr::{write_float, write_string_literal};

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Float(n) => write!(f, "Float({:?})", n),
            Value::String(s) => write!(f, "String({:?})", s.as_ref()),
            Value::Symbol(s) => write!(f, "Symbol({})", s),
            Value::Sequence(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Closure(c) => write!(f, "{:?}", c),
            Value::Builtin(b) => write!(f, "{:?}", b),
            Value::Env(env) => write!(f, "{:?}", env),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write_float(f, *n),
            Value::String(s) => write_string_literal(f, s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Closure(c) => write!(f, "{}", c.to_expr()),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            Value::Env(env) => {
                write!(f, "<environment")?;
                for name in env.names() {
                    write!(f, " {}", name)?;
                }
                write!(f, ">")
            }
        }
    }
}
