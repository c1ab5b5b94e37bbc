//! Error types for lispy evaluation

use thiserror::Error;

use crate::reader::ParseError;
use crate::value::Value;

/// Errors raised while evaluating a form.
///
/// Every failure surfaces here as a typed value; nothing inside the
/// evaluator recovers from an error, so the first one aborts the
/// current top-level `evaluate` call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A name was not bound in the environment or any of its ancestors.
    #[error("unbound name: {name}")]
    UnboundName {
        /// The missing name
        name: String,
    },

    /// A closure or builtin was invoked with the wrong number of arguments.
    #[error("arity mismatch: `{name}` expects {expected} argument(s), got {got}")]
    Arity {
        /// Function name (or `<lambda>`)
        name: String,
        /// Human-readable description of the accepted argument count
        expected: String,
        /// Number of arguments supplied
        got: usize,
    },

    /// The head of a sequence is not something the evaluator understands.
    #[error("unimplemented form: {form}")]
    UnimplementedForm {
        /// Rendering of the offending expression
        form: String,
    },

    /// A `switch` fell through to a missing `else` clause, or a clause
    /// was not a `[condition block]` pair.
    #[error("malformed switch: {reason}")]
    MalformedSwitch {
        /// What was wrong with the switch
        reason: String,
    },

    /// The module resolver could not produce source for a module.
    #[error("module not found: {name} ({reason})")]
    ModuleNotFound {
        /// Requested module name
        name: String,
        /// Why resolution failed
        reason: String,
    },

    /// A primitive form was used with the wrong shape.
    #[error("malformed `{form}`: {reason}")]
    MalformedForm {
        /// Form keyword
        form: &'static str,
        /// What was wrong
        reason: String,
    },

    /// A value of the wrong type was supplied.
    #[error("type error: {message}")]
    TypeError {
        /// Description of the mismatch
        message: String,
    },

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed 64 bits.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A builtin failed for a reason other than arity or type.
    #[error("error in builtin `{name}`: {message}")]
    BuiltinError {
        /// Builtin name
        name: String,
        /// Error message
        message: String,
    },

    /// Call depth exceeded the configured limit.
    #[error("stack overflow: call depth {depth} exceeds maximum {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// Evaluation was interrupted through the interrupt handle.
    #[error("evaluation interrupted")]
    Interrupted,

    /// Source text could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl EvalError {
    /// Build a `TypeError` for an operand that is not of the expected type.
    pub fn expected(what: &str, got: &Value) -> Self {
        EvalError::TypeError {
            message: format!("expected {}, found `{}`", what, type_name(got)),
        }
    }

    pub(crate) fn malformed(form: &'static str, reason: impl Into<String>) -> Self {
        EvalError::MalformedForm {
            form,
            reason: reason.into(),
        }
    }
}

/// Result type alias for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

/// Get the type name of a value for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Sequence(_) => "sequence",
        Value::Closure(_) => "closure",
        Value::Builtin(_) => "builtin",
        Value::Env(_) => "environment",
    }
}
