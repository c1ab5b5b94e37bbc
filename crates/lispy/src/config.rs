//! Interpreter configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How a top-level result is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Return the runtime value as-is
    #[default]
    Native,

    /// Render the value back into bracketed expression syntax
    Textual,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(OutputMode::Native),
            "textual" | "text" => Ok(OutputMode::Textual),
            other => Err(format!(
                "unknown output mode `{}` (expected `native` or `textual`)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Native => write!(f, "native"),
            OutputMode::Textual => write!(f, "textual"),
        }
    }
}

/// Interpreter settings.
///
/// # Example
///
/// ```
/// use lispy::{Config, OutputMode};
///
/// let config = Config::default()
///     .with_output(OutputMode::Textual)
///     .with_max_call_depth(500);
/// assert_eq!(config.output, OutputMode::Textual);
/// assert!(config.modules_dir.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Result projection applied by `evaluate_projected`
    pub output: OutputMode,

    /// Maximum nesting of closure calls before `StackOverflow`
    pub max_call_depth: usize,

    /// Directory searched for `<name>.lpy` on `import`
    pub modules_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputMode::Native,
            max_call_depth: 10_000,
            modules_dir: None,
        }
    }
}

impl Config {
    /// Set the output mode.
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Set a custom call depth limit.
    pub fn with_max_call_depth(mut self, max_depth: usize) -> Self {
        self.max_call_depth = max_depth;
        self
    }

    /// Resolve imports from files in `dir`.
    pub fn with_modules_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.modules_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_from_str() {
        assert_eq!("native".parse::<OutputMode>(), Ok(OutputMode::Native));
        assert_eq!("Textual".parse::<OutputMode>(), Ok(OutputMode::Textual));
        assert_eq!("text".parse::<OutputMode>(), Ok(OutputMode::Textual));
        assert!("json".parse::<OutputMode>().is_err());
    }
}
