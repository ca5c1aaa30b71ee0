//! # Tern
//!
//! Runtime core for the Tern scripting language: a reference-counted,
//! tagged-union value system, the operator semantics over it (including a
//! three-valued logic extension around the `undecidable` truth state),
//! and a tree-walking evaluator for an externally-parsed AST.
//!
//! ## Architecture
//!
//! - **[`value`]**: the [`Value`] tagged union — thirteen kinds from null
//!   up to sets and priority queues, shared via non-atomic reference
//!   counting (the runtime is single-threaded by design)
//! - **[`ops`]**: pure operator functions with dynamic coercion, plus the
//!   Łukasiewicz/Kleene three-valued operators
//! - **[`evaluator`]**: the [`Evaluator`] visitor — control flow, call
//!   frames with depth limiting, opt-in profiling, and the exception slot
//! - **[`environment`]**: the lexical [`Environment`] of variable and
//!   function bindings
//!
//! A host drives the core by parsing source into an [`ast::Node`] tree,
//! constructing an [`Evaluator`] and an [`Environment`], registering any
//! native functions, and calling [`Evaluator::run`].
//!
//! ```
//! use tern::{ast::Node, Environment, Evaluator, Value};
//!
//! let program = Node::Binary {
//!     op: tern::BinaryOp::Add,
//!     left: Box::new(Node::StringLit("Count: ".to_string())),
//!     right: Box::new(Node::NumberLit(42.0)),
//! };
//!
//! let mut ev = Evaluator::new();
//! let mut env = Environment::new();
//! assert_eq!(ev.run(&program, &mut env), Value::string("Count: 42"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod builtins;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod ops;
pub mod value;

// Re-export main types
pub use ast::{BinaryOp, Node, UnaryOp};
pub use builtins::NativeFn;
pub use context::EvalContext;
pub use environment::{Binding, Environment, ScopeGuard};
pub use error::{Exception, ExceptionState};
pub use eval::{EvalResult, Flow};
pub use evaluator::{
    CallFrame, Evaluator, ExecutionMode, ExecutionStats, FunctionProfile, Optimizations,
};
pub use value::{
    ClassValue, ErrorValue, FunctionValue, HashableValue, InstanceValue, PriorityItem,
    PriorityQueueValue, Value, ValueKind,
};

/// Tern runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
