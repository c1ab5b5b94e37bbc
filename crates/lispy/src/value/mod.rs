//! Value representation for runtime values

mod callable;
mod display;
mod impls;

pub use callable::{Arity, BuiltinFn, BuiltinFnPtr, Closure};

use std::rc::Rc;

use crate::environment::Environment;

/// Runtime value produced by evaluating an expression.
///
/// Values are organized into three tiers:
/// - Tier 1: Inline scalars (no allocation)
/// - Tier 2: Shared data (strings, symbols, and quoted sequences)
/// - Tier 3: Callables and environments (closures, builtins, scopes)
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// The absence of a value
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Shared Data
    // ═══════════════════════════════════════════════════════════════════
    /// Character string
    String(Rc<str>),

    /// Quoted symbol
    Symbol(Rc<str>),

    /// Quoted sequence of data values
    Sequence(Rc<Vec<Value>>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Callables and Environments
    // ═══════════════════════════════════════════════════════════════════
    /// User-defined function with its captured environment
    Closure(Rc<Closure>),

    /// Native function from the prelude
    Builtin(BuiltinFn),

    /// A scope used as a block, class, instance, or module
    Env(Environment),
}
