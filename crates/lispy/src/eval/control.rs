//! Conditionals and loops

use crate::{Environment, EvalContext, EvalError, Expr, Value};

use super::Evaluate;

/// Evaluate `[if cond then alt]`.
///
/// Only `null` and `false` are falsy. A missing alternate yields `Null`.
pub fn eval_if(
    cond: &Expr,
    then: &Expr,
    alt: Option<&Expr>,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if cond.eval(env, ctx)?.is_truthy() {
        then.eval(env, ctx)
    } else {
        alt.map_or(Ok(Value::Null), |alt| alt.eval(env, ctx))
    }
}

/// Evaluate `[while cond body]`.
///
/// Returns the value of the last body evaluation, or `Null` if the body
/// never ran.
pub fn eval_while(
    cond: &Expr,
    body: &Expr,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    while cond.eval(env, ctx)?.is_truthy() {
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }
        result = body.eval(env, ctx)?;
    }
    Ok(result)
}
