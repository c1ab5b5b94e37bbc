//! Runtime environment: scopes, objects, and modules
//!
//! One parent-linked scope type serves every role in the language. A
//! `begin` block, a function activation, a class, an instance of a class,
//! and a module are all just environments; they differ only in who creates
//! them and which environment becomes their parent.

mod prelude;

pub use prelude::VERSION_INFO;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::EvalError;
use crate::value::{BuiltinFn, Value};

/// A shared handle to a scope.
///
/// Cloning the handle shares the scope; it never copies bindings. Scopes
/// live as long as something references them: a child scope, a closure,
/// a class or instance binding, or a live call.
///
/// Handles are reference counted and nothing collects cycles. A closure
/// stored in the scope it captured keeps that scope alive for good: a
/// nested `def` inside a function body, or a method in a class body, ties
/// the activation or class to its own closure. Each call of a function
/// with a nested `def` therefore leaks its activation, which matters for
/// embedders running such functions in long loops.
///
/// # Example
///
/// ```
/// use lispy::{Environment, Value};
///
/// let global = Environment::new();
/// global.define("x", Value::Int(1));
///
/// let block = global.child();
/// block.define("x", Value::Int(10)); // Shadows outer x
/// block.define("y", Value::Int(2));
///
/// assert_eq!(block.lookup("x").unwrap(), Value::Int(10));
/// assert_eq!(global.lookup("x").unwrap(), Value::Int(1));
/// assert!(global.lookup("y").is_err()); // y never escapes the block
/// ```
#[derive(Clone)]
pub struct Environment {
    scope: Rc<Scope>,
}

struct Scope {
    /// Local bindings, in definition order
    bindings: RefCell<IndexMap<String, Value>>,

    /// Enclosing scope; `None` only for a root environment
    parent: Option<Environment>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a new empty root environment.
    pub fn new() -> Self {
        Self::from_parts(IndexMap::new(), None)
    }

    /// Create an empty environment whose parent is `self`.
    pub fn child(&self) -> Self {
        Self::from_parts(IndexMap::new(), Some(self.clone()))
    }

    /// Create a child environment pre-populated with `bindings`.
    pub fn child_with(&self, bindings: IndexMap<String, Value>) -> Self {
        Self::from_parts(bindings, Some(self.clone()))
    }

    fn from_parts(bindings: IndexMap<String, Value>, parent: Option<Environment>) -> Self {
        Self {
            scope: Rc::new(Scope {
                bindings: RefCell::new(bindings),
                parent,
            }),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structure
    // ═══════════════════════════════════════════════════════════════════

    /// The enclosing environment, if any.
    pub fn parent(&self) -> Option<&Environment> {
        self.scope.parent.as_ref()
    }

    /// Check if this is a root environment (no parent).
    pub fn is_root(&self) -> bool {
        self.scope.parent.is_none()
    }

    /// Number of ancestors between this environment and its root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Check if two handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Define or overwrite a binding in this scope and return the value.
    ///
    /// Always writes locally, shadowing any outer binding of the same name.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Value {
        self.scope
            .bindings
            .borrow_mut()
            .insert(name.into(), value.clone());
        value
    }

    /// Register a built-in function under its own name.
    pub fn define_builtin(&self, builtin: BuiltinFn) {
        self.define(builtin.name, Value::Builtin(builtin));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Resolution and Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Find the nearest environment, starting here, that binds `name`.
    ///
    /// # Errors
    ///
    /// `UnboundName` if no environment up to the root binds it.
    pub fn resolve(&self, name: &str) -> Result<Environment, EvalError> {
        let mut current = self;
        loop {
            if current.contains_local(name) {
                return Ok(current.clone());
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => {
                    return Err(EvalError::UnboundName {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Look up the current value bound to `name`.
    ///
    /// # Errors
    ///
    /// `UnboundName` if the name is not visible from here.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.get(name).ok_or_else(|| EvalError::UnboundName {
            name: name.to_string(),
        })
    }

    /// Look up `name`, returning `None` when it is unbound.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = self;
        loop {
            if let Some(value) = current.scope.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            current = current.parent()?;
        }
    }

    /// Check if a binding is visible from this environment.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if a binding exists in this scope only.
    pub fn contains_local(&self, name: &str) -> bool {
        self.scope.bindings.borrow().contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Assignment (Mutation)
    // ═══════════════════════════════════════════════════════════════════

    /// Overwrite an existing binding in whichever scope owns it.
    ///
    /// Never creates a binding.
    ///
    /// # Errors
    ///
    /// `UnboundName` if the binding doesn't exist.
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, EvalError> {
        let owner = self.resolve(name)?;
        owner
            .scope
            .bindings
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Names bound in this scope, in definition order.
    pub fn names(&self) -> Vec<String> {
        self.scope.bindings.borrow().keys().cloned().collect()
    }

    /// Number of bindings in this scope.
    pub fn len(&self) -> usize {
        self.scope.bindings.borrow().len()
    }

    /// Check if this scope has no bindings.
    pub fn is_empty(&self) -> bool {
        self.scope.bindings.borrow().is_empty()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bindings can refer back to this scope, so only names are shown.
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_returns_value() {
        let env = Environment::new();
        assert_eq!(env.define("x", Value::Int(3)), Value::Int(3));
    }

    #[test]
    fn test_define_overwrites_locally() {
        let env = Environment::new();
        env.define("x", Value::Int(1));
        env.define("x", Value::Int(2));
        assert_eq!(env.len(), 1);
        assert_eq!(env.lookup("x").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_resolve_finds_owner() {
        let root = Environment::new();
        root.define("x", Value::Int(1));
        let inner = root.child().child();
        assert!(inner.resolve("x").unwrap().ptr_eq(&root));
    }

    #[test]
    fn test_depth() {
        let root = Environment::new();
        assert_eq!(root.depth(), 0);
        assert_eq!(root.child().child().depth(), 2);
    }

    #[test]
    fn test_closure_bound_in_its_own_scope_keeps_it_alive() {
        use crate::expr::Expr;
        use crate::value::Closure;

        let global = Environment::new();
        let activation = global.child();
        let inner = Closure::new(Vec::new(), Expr::Int(1), activation.clone());
        activation.define("g", Value::closure(inner));

        let weak = Rc::downgrade(&activation.scope);
        drop(activation);
        assert!(weak.upgrade().is_some());

        // Without the self-reference the scope is released
        let plain = global.child();
        plain.define("n", Value::Int(1));
        let weak = Rc::downgrade(&plain.scope);
        drop(plain);
        assert!(weak.upgrade().is_none());
    }
}
