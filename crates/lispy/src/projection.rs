//! Result projection
//!
//! One evaluator, two ways of handing its result back: the runtime value
//! itself, or the value rendered into bracketed expression syntax.

use std::fmt;

use crate::config::OutputMode;
use crate::value::Value;

/// A projected evaluation result.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The runtime value
    Native(Value),

    /// The textual rendering of the value
    Text(String),
}

impl Output {
    /// The native value, if this is a native projection.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Output::Native(value) => Some(value),
            Output::Text(_) => None,
        }
    }

    /// The rendered text, if this is a textual projection.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Native(_) => None,
            Output::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Native(value) => write!(f, "{}", value),
            Output::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Project `value` according to `mode`.
pub fn project(value: Value, mode: OutputMode) -> Output {
    match mode {
        OutputMode::Native => Output::Native(value),
        OutputMode::Textual => Output::Text(render(&value)),
    }
}

/// Render a value into bracketed expression syntax.
///
/// Sequences render as `[elem elem ...]`, strings with their quotes, and
/// closures as the `lambda` form that created them. Rendering a quoted
/// structure and reading it back yields an equal expression.
pub fn render(value: &Value) -> String {
    value.to_string()
}
