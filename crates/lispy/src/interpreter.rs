//! Interpreter facade: source text in, values out

use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::Config;
use crate::context::EvalContext;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::eval::{eval_sequence, Evaluate};
use crate::expr::Expr;
use crate::projection::{project, Output};
use crate::reader::parse_program;
use crate::resolver::{FileResolver, ModuleResolver};
use crate::value::Value;

/// A tree-walking interpreter over one root environment.
///
/// Definitions made by one [`evaluate`](Interpreter::evaluate) call are
/// visible to the next, so a REPL or batch runner can feed forms in
/// pieces.
///
/// # Example
///
/// ```
/// use lispy::{Interpreter, Value};
///
/// let interp = Interpreter::new();
/// interp.evaluate("[def square [x] [* x x]]").unwrap();
/// assert_eq!(interp.evaluate("[square 7]").unwrap(), Value::Int(49));
/// ```
pub struct Interpreter {
    ctx: EvalContext,
    config: Config,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an interpreter from `config`.
    ///
    /// When `modules_dir` is set, imports read `<dir>/<name>.lpy`.
    pub fn with_config(config: Config) -> Self {
        let mut ctx = EvalContext::new(Environment::with_prelude(), &config);
        if let Some(dir) = &config.modules_dir {
            ctx.set_resolver(Rc::new(FileResolver::new(dir)));
        }
        Self { ctx, config }
    }

    /// Use `resolver` for imports instead of the configured one.
    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.ctx.set_resolver(Rc::new(resolver));
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The root environment.
    pub fn global(&self) -> &Environment {
        self.ctx.global()
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// A handle that aborts the running evaluation with `Interrupted`
    /// when set.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.ctx.interrupt_handle()
    }

    /// Parse and evaluate every top-level form in `source`, returning the
    /// value of the last one (`Null` for empty input).
    ///
    /// Forms are evaluated directly in the root environment. The first
    /// error aborts the remaining forms; mutations made before it are
    /// kept.
    #[tracing::instrument(level = "debug", skip(self, source), fields(len = source.len()))]
    pub fn evaluate(&self, source: &str) -> Result<Value, EvalError> {
        let result = parse_program(source)
            .map_err(EvalError::from)
            .and_then(|forms| eval_sequence(&forms, self.ctx.global(), &self.ctx));
        self.finish(result)
    }

    /// Evaluate `source` and project the result per the configured
    /// output mode.
    pub fn evaluate_projected(&self, source: &str) -> Result<Output, EvalError> {
        self.evaluate(source)
            .map(|value| project(value, self.config.output))
    }

    /// Evaluate a pre-parsed form in the root environment.
    pub fn eval_expr(&self, expr: &Expr) -> Result<Value, EvalError> {
        self.finish(expr.eval(self.ctx.global(), &self.ctx))
    }

    fn finish(&self, result: Result<Value, EvalError>) -> Result<Value, EvalError> {
        if let Err(err) = &result {
            tracing::debug!(%err, "top-level form failed");
            if matches!(err, EvalError::Interrupted) {
                self.ctx.reset_interrupt();
            }
        }
        result
    }
}
