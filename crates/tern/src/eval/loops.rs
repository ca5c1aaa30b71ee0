//! While and for loop evaluation.

use crate::ast::Node;
use crate::{Environment, Evaluator, Value};

use super::control::{EvalResult, Flow};

/// Evaluate a while loop.
///
/// Condition and body run in the exact same scope instance: body
/// mutations to loop variables are visible to the next condition check.
/// Iterations are bounded by the context's safety cap — a valve against
/// runaway loops, not a language-level limit.
pub(crate) fn eval_while(
    ev: &mut Evaluator,
    cond: &Node,
    body: &Node,
    env: &mut Environment,
) -> EvalResult {
    let cap = ev.context().max_loop_iterations;
    let mut iterations = 0usize;

    while iterations < cap {
        iterations += 1;

        if ev.has_exception() || ev.context().is_interrupted() {
            return Ok(Value::Null);
        }

        let condition = ev.visit(cond, env)?;
        if !condition.is_truthy() {
            return Ok(Value::Null);
        }

        match ev.visit(body, env) {
            Ok(_) => {}
            Err(Flow::Break) => return Ok(Value::Null),
            Err(Flow::Continue) => continue,
            Err(ret @ Flow::Return(_)) => return Err(ret),
        }
    }

    tracing::warn!(cap, "while loop terminated by the iteration safety cap");
    Ok(Value::Null)
}

/// Evaluate a `for var in iterable` loop.
///
/// Arrays iterate their elements; objects iterate their keys as strings.
/// Anything else is a logged error, not a crash. The loop variable is
/// rebound on every iteration in the loop's own scope.
pub(crate) fn eval_for(
    ev: &mut Evaluator,
    var: &str,
    iterable: &Node,
    body: &Node,
    env: &mut Environment,
) -> EvalResult {
    let target = ev.visit(iterable, env)?;

    let items: Vec<Value> = match &target {
        Value::Array(elements) => elements.borrow().iter().map(Value::add_ref).collect(),
        Value::Object(pairs) => pairs
            .borrow()
            .keys()
            .map(|key| Value::string(key.clone()))
            .collect(),
        other => {
            tracing::warn!(kind = other.type_name(), "for loop target is not iterable");
            return Ok(Value::Null);
        }
    };

    let cap = ev.context().max_loop_iterations;
    for item in items.into_iter().take(cap) {
        if ev.has_exception() || ev.context().is_interrupted() {
            return Ok(Value::Null);
        }

        env.assign_or_define(var, item);

        match ev.visit(body, env) {
            Ok(_) => {}
            Err(Flow::Break) => break,
            Err(Flow::Continue) => continue,
            Err(ret @ Flow::Return(_)) => return Err(ret),
        }
    }

    Ok(Value::Null)
}
