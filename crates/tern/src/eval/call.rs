//! Function call evaluation.
//!
//! Call resolution order: the registered native table, then the legacy
//! builtins, then user-defined functions from scope. An unresolved name
//! after all three lookups is a recoverable fault producing null.

use std::rc::Rc;

use crate::ast::Node;
use crate::builtins;
use crate::error::Exception;
use crate::evaluator::CallFrame;
use crate::value::FunctionValue;
use crate::{Environment, Evaluator, Value};

use super::control::{EvalResult, Flow};

pub(crate) fn eval_call(
    ev: &mut Evaluator,
    name: &str,
    args: &[Node],
    env: &mut Environment,
) -> EvalResult {
    // Arguments evaluate left to right before any resolution.
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(ev.visit(arg, env)?);
    }

    if let Some(native) = ev.native(name) {
        return Ok(native(&values));
    }

    if let Some(result) = builtins::legacy_builtin(name, &values) {
        return Ok(result);
    }

    match env.get_function(name) {
        Some(function) => call_function(ev, &function, values, env),
        None => {
            tracing::warn!(function = name, "call to undefined function");
            Ok(Value::Null)
        }
    }
}

/// Invoke a user-defined function.
///
/// Arity and call depth are verified before any part of the body runs; a
/// violation raises the corresponding exception and the invocation
/// produces null, leaving the exception state active for the caller to
/// observe.
pub(crate) fn call_function(
    ev: &mut Evaluator,
    function: &Rc<FunctionValue>,
    args: Vec<Value>,
    env: &mut Environment,
) -> EvalResult {
    if args.len() != function.params.len() {
        ev.throw_exception(
            Value::Null,
            Exception::ArityMismatch {
                name: function.name.clone(),
                expected: function.params.len(),
                got: args.len(),
            },
            &function.name,
        );
        return Ok(Value::Null);
    }

    let depth = ev.call_depth();
    if depth >= ev.context().max_call_depth {
        ev.throw_exception(
            Value::Null,
            Exception::StackOverflow {
                depth,
                max: ev.context().max_call_depth,
            },
            &function.name,
        );
        return Ok(Value::Null);
    }

    let body = ev.body_for(function);

    ev.push_call_frame(CallFrame::new(&function.name, args.clone(), depth));
    env.push_frame();

    for (param, arg) in function.params.iter().zip(args.into_iter()) {
        env.define(param.clone(), arg);
    }

    let result = ev.visit(&body, env);

    env.pop_frame();
    ev.pop_call_frame();

    match result {
        Ok(value) => Ok(value),
        Err(Flow::Return(value)) => Ok(value),
        Err(Flow::Break) | Err(Flow::Continue) => {
            // A stray break/continue escaping the body has no loop to
            // land in; the invocation just ends.
            tracing::warn!(
                function = %function.name,
                "loop control escaped the function body"
            );
            Ok(Value::Null)
        }
    }
}
