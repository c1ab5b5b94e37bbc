//! Block evaluation

use crate::{Environment, EvalContext, EvalError, Expr, Value};

use super::Evaluate;

/// Evaluate `[begin ...]` in a fresh child scope.
///
/// Bindings made inside the block disappear when it ends; `set` on an
/// outer name still reaches the outer scope.
pub fn eval_begin(
    body: &[Expr],
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    eval_sequence(body, &env.child(), ctx)
}

/// Evaluate expressions in order in `env`, returning the last value.
///
/// An empty sequence evaluates to `Null`.
pub fn eval_sequence(
    exprs: &[Expr],
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    for expr in exprs {
        result = expr.eval(env, ctx)?;
    }
    Ok(result)
}

/// Evaluate the body of a function, class, or module.
///
/// A `[begin ...]` body runs directly in `env`, which is already the
/// fresh scope for the body; any other body is a single expression.
pub fn eval_body(body: &Expr, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    match body.as_list() {
        Some([head, rest @ ..]) if head.is_symbol("begin") => eval_sequence(rest, env, ctx),
        _ => body.eval(env, ctx),
    }
}
