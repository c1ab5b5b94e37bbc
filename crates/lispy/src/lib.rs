//! # Lispy
//!
//! A tree-walking interpreter for a small bracket-delimited, homoiconic
//! language with variables, closures, prototype-style classes, and
//! modules.
//!
//! ## Architecture
//!
//! - **Reader**: source text to [`Expr`] via a `logos` token stream
//! - **Desugaring**: `def`, `for`, `switch`, `++`, `--`, `+=`, `-=` are
//!   rewritten into primitive forms just before evaluation
//! - **Evaluator**: dispatch over the closed [`Form`] set
//! - **Environment**: one scope type shared by blocks, call activations,
//!   classes, instances, and modules
//! - **Projection**: results returned natively or rendered back to text
//!
//! ```
//! use lispy::{Interpreter, Value};
//!
//! let interp = Interpreter::new();
//! let result = interp
//!     .evaluate(
//!         "[def fact [n] [if [= n 0] 1 [* n [fact [- n 1]]]]]
//!          [fact 5]",
//!     )
//!     .unwrap();
//! assert_eq!(result, Value::Int(120));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod desugar;
pub mod environment;
pub mod error;
pub mod eval;
pub mod expr;
pub mod interpreter;
pub mod projection;
pub mod reader;
pub mod resolver;
mod stack;
pub mod value;

// Re-export main types
pub use config::{Config, OutputMode};
pub use context::{CallGuard, EvalContext};
pub use environment::{Environment, VERSION_INFO};
pub use error::{type_name, EvalError, Result};
pub use eval::{call_value, eval_expr, Evaluate, Form, SetTarget};
pub use expr::Expr;
pub use interpreter::Interpreter;
pub use projection::{project, render, Output};
pub use reader::{parse, parse_program, ParseError};
pub use resolver::{FileResolver, MemoryResolver, ModuleResolver, NoModules};
pub use value::{Arity, BuiltinFn, BuiltinFnPtr, Closure, Value};

/// Lispy version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
        assert!(VERSION_INFO.ends_with(VERSION));
    }
}
