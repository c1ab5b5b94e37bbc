//! Variable declaration and assignment

use crate::{Environment, EvalContext, EvalError, Expr, Value};

use super::{eval_env, Evaluate, SetTarget};

/// Evaluate `[var name value]`: define `name` in the current scope.
pub fn eval_var(
    name: &str,
    value: &Expr,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let value = value.eval(env, ctx)?;
    Ok(env.define(name, value))
}

/// Evaluate `[set target value]`.
///
/// A variable target is assigned in the scope that already binds it and
/// is never created. A `[prop object name]` target is defined directly
/// on the object environment, creating the property if needed.
pub fn eval_set(
    target: &SetTarget<'_>,
    value: &Expr,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    match *target {
        SetTarget::Name(name) => {
            let value = value.eval(env, ctx)?;
            env.assign(name, value)
        }
        SetTarget::Prop { object, name } => {
            let object = eval_env(object, "an object", env, ctx)?;
            let value = value.eval(env, ctx)?;
            Ok(object.define(name, value))
        }
    }
}
