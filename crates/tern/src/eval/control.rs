//! Control flow signals for break/continue/return.

use crate::Value;

/// Non-local jump raised by `break`, `continue`, or `return`.
///
/// A jump doesn't produce a normal `Ok(value)`; it propagates as the `Err`
/// arm of [`EvalResult`] until the enclosing loop or function-call handler
/// catches it. This is ordinary language control flow, not a fault — the
/// evaluator's exception slot is reserved for structural runtime faults.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Terminate the innermost loop.
    Break,

    /// Skip to the next condition check of the innermost loop.
    Continue,

    /// Unwind to the enclosing function call with the given value.
    Return(Value),
}

/// Result of evaluating one node: a value, or a control-flow jump still
/// looking for its handler.
pub type EvalResult = Result<Value, Flow>;
