//! Evaluation context configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Environment variable consulted by [`EvalContext::from_env`] to override
/// the maximum call depth.
pub const MAX_CALL_DEPTH_ENV: &str = "TERN_MAX_CALL_DEPTH";

const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;
const DEFAULT_MAX_LOOP_ITERATIONS: usize = 10_000;

/// Tunables and shared state for evaluation.
///
/// The loop iteration cap is a safety valve against runaway loops, not a
/// language-level limit; the call depth cap is the one bounded resource
/// the evaluator genuinely guards.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Maximum user-function call depth before a stack-overflow exception.
    pub max_call_depth: usize,

    /// Iteration cap applied to every while/for loop.
    pub max_loop_iterations: usize,

    /// Cooperative cancellation flag; a host may set it from another
    /// thread, after which evaluation degrades to no-ops.
    pub interrupt: Arc<AtomicBool>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl EvalContext {
    /// Create a context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
            ..Default::default()
        }
    }

    /// Create a context honoring the `TERN_MAX_CALL_DEPTH` environment
    /// variable; malformed or absent values fall back to the default.
    pub fn from_env() -> Self {
        let max_depth = std::env::var(MAX_CALL_DEPTH_ENV)
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CALL_DEPTH);
        Self::with_max_call_depth(max_depth)
    }

    /// Check whether evaluation has been cancelled.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request cancellation of evaluation.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the cancellation flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}
