//! Function call evaluation

use indexmap::IndexMap;

use crate::error::type_name;
use crate::{BuiltinFn, Closure, Environment, EvalContext, EvalError, Expr, Value};

use super::{eval_body, Evaluate};

/// Name used for closures in error messages.
const LAMBDA_NAME: &str = "<lambda>";

/// Evaluate `[callee args ...]`.
///
/// The callee and then each argument are evaluated left to right in the
/// caller's environment.
pub fn eval_apply(
    callee: &Expr,
    args: &[Expr],
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    // Evaluate the function expression
    let func = callee.eval(env, ctx)?;

    // Evaluate arguments
    let args = args
        .iter()
        .map(|arg| arg.eval(env, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    call_value(&func, args, ctx)
}

/// Call a Value as a function.
///
/// # Errors
///
/// Returns `TypeError` if the value is not callable.
/// Returns `Arity` if the argument count doesn't match.
pub fn call_value(func: &Value, args: Vec<Value>, ctx: &EvalContext) -> Result<Value, EvalError> {
    match func {
        Value::Builtin(f) => call_builtin(f, &args),
        Value::Closure(c) => call_closure(c, args, ctx),
        other => Err(EvalError::TypeError {
            message: format!("expected a function, found `{}`", type_name(other)),
        }),
    }
}

/// Call a built-in function.
pub fn call_builtin(func: &BuiltinFn, args: &[Value]) -> Result<Value, EvalError> {
    if !func.arity.accepts(args.len()) {
        return Err(EvalError::Arity {
            name: func.name.to_string(),
            expected: func.arity.to_string(),
            got: args.len(),
        });
    }
    (func.func)(args)
}

/// Call a closure.
///
/// The activation environment is a child of the closure's captured
/// environment, never of the caller's.
pub fn call_closure(
    closure: &Closure,
    args: Vec<Value>,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    // Check arity
    if args.len() != closure.params.len() {
        return Err(EvalError::Arity {
            name: LAMBDA_NAME.to_string(),
            expected: closure.params.len().to_string(),
            got: args.len(),
        });
    }

    // Track call depth (stack overflow protection)
    let _guard = ctx.enter_call()?;
    tracing::trace!(
        params = ?closure.params,
        depth = ctx.call_depth(),
        "calling closure"
    );

    // Bind parameters to arguments
    let bindings: IndexMap<String, Value> = closure
        .params
        .iter()
        .map(|param| param.to_string())
        .zip(args)
        .collect();
    let activation = closure.env.child_with(bindings);

    eval_body(&closure.body, &activation, ctx)
}
