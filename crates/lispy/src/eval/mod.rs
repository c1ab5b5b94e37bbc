//! Expression evaluation
//!
//! Evaluation is a recursive walk over [`Expr`]. Atoms are handled
//! directly; a sequence is first offered to the desugaring pass, and what
//! remains is classified into a closed [`Form`] and dispatched.

pub mod binding;
pub mod block;
pub mod call;
pub mod class;
pub mod control;
pub mod form;
pub mod function;
pub mod module;

use std::rc::Rc;

use crate::context::EvalContext;
use crate::desugar;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::expr::Expr;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

pub use block::{eval_body, eval_sequence};
pub use call::call_value;
pub use form::{Form, SetTarget};

/// Trait for evaluating syntax to values.
///
/// This is the core abstraction for the tree-walking interpreter. The
/// environment is a shared handle; forms that introduce scopes create
/// children of it rather than mutating a frame stack.
pub trait Evaluate {
    /// Evaluate this node in the given environment.
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        // Check for interruption before each expression
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        match self {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Str(s) => Ok(Value::String(Rc::clone(s))),
            Expr::Symbol(name) => env.lookup(name),
            Expr::List(items) => ensure_sufficient_stack(|| eval_list(self, items, env, ctx)),
        }
    }
}

fn eval_list(
    expr: &Expr,
    items: &[Expr],
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if let Some(expanded) = desugar::expand(expr)? {
        tracing::trace!(from = %expr, to = %expanded, "desugared");
        return expanded.eval(env, ctx);
    }
    Form::classify(items)?.eval(env, ctx)
}

impl Evaluate for Form<'_> {
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        match *self {
            Form::Begin(body) => block::eval_begin(body, env, ctx),
            Form::Var { name, value } => binding::eval_var(name, value, env, ctx),
            Form::Set { ref target, value } => binding::eval_set(target, value, env, ctx),
            Form::If { cond, then, alt } => control::eval_if(cond, then, alt, env, ctx),
            Form::While { cond, body } => control::eval_while(cond, body, env, ctx),
            Form::Lambda { params, body } => function::eval_lambda(params, body, env),
            Form::Class { name, parent, body } => class::eval_class(name, parent, body, env, ctx),
            Form::Super { class } => class::eval_super(class, env, ctx),
            Form::New { class, args } => class::eval_new(class, args, env, ctx),
            Form::Prop { object, name } => class::eval_prop(object, name, env, ctx),
            Form::Module { name, body } => module::eval_module(name, body, env, ctx),
            Form::Import { name } => module::eval_import(name, ctx),
            Form::Quote(datum) => Ok(Value::from_expr(datum)),
            Form::Apply { callee, args } => call::eval_apply(callee, args, env, ctx),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr(expr: &Expr, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    expr.eval(env, ctx)
}

/// Evaluate an expression that must produce an environment.
///
/// `what` names the role of the operand in the error message.
pub(crate) fn eval_env(
    expr: &Expr,
    what: &str,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Environment, EvalError> {
    match expr.eval(env, ctx)? {
        Value::Env(target) => Ok(target),
        other => Err(EvalError::expected(what, &other)),
    }
}
