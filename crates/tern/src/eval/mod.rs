//! Per-node evaluation routines.
//!
//! The dispatch core lives on [`Evaluator`](crate::Evaluator); the modules
//! here hold the handlers for each node family.

pub mod binary;
pub mod branch;
pub mod call;
pub mod control;
pub mod field;
pub mod loops;
pub mod unary;

pub use control::{EvalResult, Flow};

use crate::Value;

/// Surface an operator result at the evaluator boundary.
///
/// Error values produced by the operator layer are swallowed into null
/// here, with a logged diagnostic — programs keep running past
/// recoverable faults instead of crashing on them.
pub(crate) fn surface(value: Value) -> Value {
    if let Value::Error(e) = &value {
        tracing::warn!(code = e.code, message = %e.message, "operator error degraded to null");
        return Value::Null;
    }
    value
}
