//! Callable value types: closures and builtins

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::expr::Expr;

/// Type alias for builtin function pointers
pub type BuiltinFnPtr = fn(&[Value]) -> Result<Value, EvalError>;

/// A user-defined function.
///
/// Immutable once created. The body runs in a fresh activation
/// environment whose parent is `env`, the environment the `lambda` form
/// was evaluated in, never the caller's.
#[derive(Clone)]
pub struct Closure {
    /// Parameter names, bound positionally
    pub params: Vec<Rc<str>>,

    /// The function body
    pub body: Rc<Expr>,

    /// Defining environment
    pub env: Environment,
}

impl Closure {
    /// Create a new closure value
    pub fn new(params: Vec<Rc<str>>, body: Expr, env: Environment) -> Self {
        Self {
            params,
            body: Rc::new(body),
            env,
        }
    }

    /// Rebuild the `[lambda [params] body]` form this closure came from.
    pub fn to_expr(&self) -> Expr {
        Expr::list(vec![
            Expr::symbol("lambda"),
            Expr::List(self.params.iter().map(|p| Expr::Symbol(p.clone())).collect()),
            (*self.body).clone(),
        ])
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment may contain this closure; don't walk it.
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// Accepted argument counts for a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments
    Exact(usize),

    /// Between `min` and `max` arguments, inclusive
    Range(usize, usize),

    /// Any number of arguments
    Variadic,
}

impl Arity {
    /// Check whether `n` arguments are accepted.
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exact(k) => n == k,
            Arity::Range(min, max) => (min..=max).contains(&n),
            Arity::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(k) => write!(f, "{}", k),
            Arity::Range(min, max) => write!(f, "{} to {}", min, max),
            Arity::Variadic => write!(f, "any number of"),
        }
    }
}

/// A built-in native function.
///
/// These are Rust functions exposed to the interpreter through the root
/// environment.
#[derive(Clone, Copy)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: &'static str,

    /// Accepted argument counts
    pub arity: Arity,

    /// The native implementation
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Create a new builtin.
    pub const fn new(name: &'static str, arity: Arity, func: BuiltinFnPtr) -> Self {
        Self { name, arity, func }
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}
