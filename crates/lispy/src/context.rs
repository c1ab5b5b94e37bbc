//! Evaluation context: state shared by every form in one interpreter

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::resolver::{ModuleResolver, NoModules};

/// Configuration and state for evaluation.
///
/// This is passed through all evaluation calls. It owns the root
/// environment (imports always evaluate there), the module resolver, and
/// the recursion and interruption controls.
pub struct EvalContext {
    /// Root environment holding builtins and top-level definitions
    global: Environment,

    /// Source provider for `import`
    resolver: Rc<dyn ModuleResolver>,

    /// Maximum call depth (stack overflow protection)
    max_call_depth: usize,

    /// Current call depth
    call_depth: Cell<usize>,

    /// Interrupt flag - set to true to abort evaluation
    interrupt: Arc<AtomicBool>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(Environment::with_prelude(), &Config::default())
    }
}

impl EvalContext {
    /// Create a context over `global`, with limits taken from `config`.
    ///
    /// Imports fail until a resolver is installed with
    /// [`EvalContext::set_resolver`].
    pub fn new(global: Environment, config: &Config) -> Self {
        Self {
            global,
            resolver: Rc::new(NoModules),
            max_call_depth: config.max_call_depth,
            call_depth: Cell::new(0),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The root environment.
    pub fn global(&self) -> &Environment {
        &self.global
    }

    /// The module resolver used by `import`.
    pub fn resolver(&self) -> &dyn ModuleResolver {
        self.resolver.as_ref()
    }

    /// Replace the module resolver.
    pub fn set_resolver(&mut self, resolver: Rc<dyn ModuleResolver>) {
        self.resolver = resolver;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Depth Tracking (Stack Overflow Protection)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a function call. Returns error if max depth exceeded.
    ///
    /// The returned guard leaves the call when dropped, so depth is
    /// restored on both normal return and error propagation.
    pub fn enter_call(&self) -> Result<CallGuard<'_>, EvalError> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth,
                max: self.max_call_depth,
            });
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard { ctx: self })
    }

    /// Get current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }

    /// Get the configured maximum call depth.
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Interruption
    // ═══════════════════════════════════════════════════════════════════

    /// Check if evaluation has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }

    /// A handle that can set the interrupt flag from elsewhere
    /// (for example a Ctrl-C handler).
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }
}

/// RAII guard that leaves a function call when dropped.
pub struct CallGuard<'a> {
    ctx: &'a EvalContext,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        let depth = self.ctx.call_depth.get();
        self.ctx.call_depth.set(depth.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_guard_restores_depth() {
        let ctx = EvalContext::default();
        {
            let _outer = ctx.enter_call().unwrap();
            let _inner = ctx.enter_call().unwrap();
            assert_eq!(ctx.call_depth(), 2);
        }
        assert_eq!(ctx.call_depth(), 0);
    }

    #[test]
    fn test_enter_call_limit() {
        let ctx = EvalContext::new(Environment::new(), &Config::default().with_max_call_depth(1));
        let _guard = ctx.enter_call().unwrap();
        assert!(matches!(
            ctx.enter_call(),
            Err(EvalError::StackOverflow { depth: 1, max: 1 })
        ));
    }

    #[test]
    fn test_interrupt_flag() {
        let ctx = EvalContext::default();
        assert!(!ctx.is_interrupted());
        ctx.interrupt_handle().store(true, Ordering::Relaxed);
        assert!(ctx.is_interrupted());
        ctx.reset_interrupt();
        assert!(!ctx.is_interrupted());
    }
}
