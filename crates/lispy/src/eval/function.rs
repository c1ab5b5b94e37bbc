//! Function definition evaluation

use std::rc::Rc;

use crate::{Closure, Environment, EvalError, Expr, Value};

/// Evaluate `[lambda [params] body]` into a closure over `env`.
///
/// # Errors
///
/// Returns `MalformedForm` if a parameter is not a symbol.
pub fn eval_lambda(params: &[Expr], body: &Expr, env: &Environment) -> Result<Value, EvalError> {
    let params = extract_params(params)?;
    Ok(Value::closure(Closure::new(params, body.clone(), env.clone())))
}

/// Extract parameter names from a parameter list.
fn extract_params(params: &[Expr]) -> Result<Vec<Rc<str>>, EvalError> {
    params
        .iter()
        .map(|param| match param {
            Expr::Symbol(name) => Ok(Rc::clone(name)),
            other => Err(EvalError::malformed(
                "lambda",
                format!("parameter `{}` is not a name", other),
            )),
        })
        .collect()
}
