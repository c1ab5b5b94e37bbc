//! Module resolution for `import`
//!
//! A resolver maps a module name to raw source text. The evaluator wraps
//! that text in an implicit `begin` and evaluates it as a module in the
//! root environment.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::EvalError;

/// File extension of module source files.
pub const MODULE_EXTENSION: &str = "lpy";

/// Source provider for `import`.
pub trait ModuleResolver {
    /// Return the source text of module `name`.
    ///
    /// # Errors
    ///
    /// `ModuleNotFound` when the module cannot be provided.
    fn resolve(&self, name: &str) -> Result<String, EvalError>;
}

fn not_found(name: &str, reason: impl Into<String>) -> EvalError {
    EvalError::ModuleNotFound {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Resolver that knows no modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModules;

impl ModuleResolver for NoModules {
    fn resolve(&self, name: &str) -> Result<String, EvalError> {
        Err(not_found(name, "no module directory configured"))
    }
}

/// Resolver reading `<dir>/<name>.lpy` from a fixed directory.
#[derive(Debug, Clone)]
pub struct FileResolver {
    dir: PathBuf,
}

impl FileResolver {
    /// Create a resolver over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a module name maps to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, MODULE_EXTENSION))
    }
}

impl ModuleResolver for FileResolver {
    fn resolve(&self, name: &str) -> Result<String, EvalError> {
        // Names are bare identifiers; never let one walk out of the directory.
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(not_found(name, "invalid module name"));
        }
        let path = self.path_for(name);
        fs::read_to_string(&path).map_err(|e| not_found(name, format!("{}: {}", path.display(), e)))
    }
}

/// Resolver over an in-memory table of module sources.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    modules: HashMap<String, String>,
}

impl MemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, returning the resolver for chaining.
    pub fn with_module(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    /// Add or replace a module.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.modules.insert(name.into(), source.into());
    }
}

impl ModuleResolver for MemoryResolver {
    fn resolve(&self, name: &str) -> Result<String, EvalError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(name, "no such module"))
    }
}
