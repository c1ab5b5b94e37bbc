//! Modules and imports

use crate::reader::parse_program;
use crate::{Environment, EvalContext, EvalError, Expr, Value};

use super::eval_body;

/// Evaluate `[module name body]`.
///
/// The body runs in a child of `env`; the resulting environment is bound
/// to `name` in `env`.
pub fn eval_module(
    name: &str,
    body: &Expr,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let module_env = env.child();
    eval_body(body, &module_env, ctx)?;
    Ok(env.define(name, Value::Env(module_env)))
}

/// Evaluate `[import name]`.
///
/// The resolver supplies the module source, which is wrapped in a
/// `begin` and evaluated as a module in the root environment, whatever
/// scope the import appears in.
pub fn eval_import(name: &str, ctx: &EvalContext) -> Result<Value, EvalError> {
    // Imports count as calls so a module importing itself terminates.
    let _guard = ctx.enter_call()?;

    let source = ctx.resolver().resolve(name)?;
    let forms = parse_program(&source)?;
    tracing::debug!(module = name, forms = forms.len(), "importing module");

    let mut items = Vec::with_capacity(forms.len() + 1);
    items.push(Expr::symbol("begin"));
    items.extend(forms);

    eval_module(name, &Expr::List(items), ctx.global(), ctx)
}
