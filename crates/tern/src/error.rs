//! Evaluator-level exception types.
//!
//! Two failure taxonomies coexist and must not be conflated. Recoverable
//! semantic failures travel as ordinary [`Value::Error`](crate::Value)
//! results through the operator layer. The types here cover the stronger
//! path: structural faults that abort the current function invocation and
//! stay observable on the evaluator until explicitly cleared.

use thiserror::Error;

use crate::Value;

/// A structural fault raised during evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Exception {
    /// The call stack reached the configured depth limit.
    #[error("Stack overflow: call depth {depth} reached the limit of {max}")]
    StackOverflow {
        /// Depth at which the overflow was detected.
        depth: usize,
        /// The configured maximum call depth.
        max: usize,
    },

    /// A call supplied the wrong number of arguments.
    #[error("Argument count mismatch: `{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// The function being called.
        name: String,
        /// Declared parameter count.
        expected: usize,
        /// Arguments actually supplied.
        got: usize,
    },

    /// A function was invoked with an unset or invalid scope.
    #[error("Invalid function scope for `{name}`")]
    InvalidScope {
        /// The function whose scope was invalid.
        name: String,
    },

    /// A host- or script-raised exception with a free-form message.
    #[error("{message}")]
    Raised {
        /// The exception message.
        message: String,
    },
}

/// The evaluator's exception slot: the raised fault, an optional payload
/// value, and where it happened.
#[derive(Debug, Clone)]
pub struct ExceptionState {
    /// What went wrong.
    pub exception: Exception,

    /// Payload value attached at the throw site (often null).
    pub value: Value,

    /// Source location or function name for diagnostics.
    pub location: String,
}
