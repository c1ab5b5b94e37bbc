//! Classes, instances, and property access
//!
//! A class is an environment holding its methods and fields. An instance
//! is a child environment of its class, so property lookup walks
//! instance → class → superclass with ordinary name resolution.

use crate::{Environment, EvalContext, EvalError, Expr, Value};

use super::{call_value, eval_body, eval_env, Evaluate};

/// Name of the method `new` invokes on a fresh instance.
pub const CONSTRUCTOR: &str = "constructor";

/// Evaluate `[class name parent body]`.
///
/// The class environment is a child of the parent class, or of the
/// defining environment when `parent` evaluates to `null`. The body runs
/// in the class environment and the class is bound to `name` in `env`.
pub fn eval_class(
    name: &str,
    parent: &Expr,
    body: &Expr,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let (parent_env, inherits) = match parent.eval(env, ctx)? {
        Value::Env(parent_env) => (parent_env, true),
        Value::Null => (env.clone(), false),
        other => return Err(EvalError::expected("a parent class or null", &other)),
    };

    let class_env = parent_env.child();
    eval_body(body, &class_env, ctx)?;
    tracing::debug!(class = name, inherits, members = class_env.len(), "declared class");

    Ok(env.define(name, Value::Env(class_env)))
}

/// Evaluate `[super class]`: the parent environment of a class.
///
/// Returns `Null` for a root environment.
pub fn eval_super(class: &Expr, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    let class_env = eval_env(class, "a class", env, ctx)?;
    Ok(class_env.parent().cloned().map_or(Value::Null, Value::Env))
}

/// Evaluate `[new class args ...]`.
///
/// Creates an instance environment under the class, evaluates the
/// arguments in the caller's environment, and calls the class's
/// `constructor` with the instance followed by the arguments.
pub fn eval_new(
    class: &Expr,
    args: &[Expr],
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let class_env = eval_env(class, "a class", env, ctx)?;
    let instance = class_env.child();

    let mut call_args = Vec::with_capacity(args.len() + 1);
    call_args.push(Value::Env(instance.clone()));
    for arg in args {
        call_args.push(arg.eval(env, ctx)?);
    }

    let constructor = class_env.lookup(CONSTRUCTOR)?;
    call_value(&constructor, call_args, ctx)?;
    Ok(Value::Env(instance))
}

/// Evaluate `[prop object name]`.
pub fn eval_prop(
    object: &Expr,
    name: &str,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    eval_env(object, "an object", env, ctx)?.lookup(name)
}
