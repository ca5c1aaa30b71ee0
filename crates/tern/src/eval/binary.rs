//! Binary operation evaluation.

use crate::ast::{BinaryOp, Node};
use crate::ops;
use crate::{Environment, Evaluator, Value};

use super::control::EvalResult;
use super::surface;

/// Evaluate a binary operator node.
///
/// `and`/`or` short-circuit: the right operand is only evaluated when the
/// left doesn't decide the outcome. Every other operator evaluates both
/// operands and dispatches to the operator layer; error results are
/// degraded to null at this boundary.
pub(crate) fn eval_binary(
    ev: &mut Evaluator,
    op: BinaryOp,
    left: &Node,
    right: &Node,
    env: &mut Environment,
) -> EvalResult {
    match op {
        BinaryOp::And => return eval_and(ev, left, right, env),
        BinaryOp::Or => return eval_or(ev, left, right, env),
        _ => {}
    }

    let a = ev.visit(left, env)?;
    let b = ev.visit(right, env)?;

    let result = match op {
        BinaryOp::Add => ops::arith::add(&a, &b),
        BinaryOp::Subtract => ops::arith::subtract(&a, &b),
        BinaryOp::Multiply => ops::arith::multiply(&a, &b),
        BinaryOp::Divide => ops::arith::divide(&a, &b),
        BinaryOp::Modulo => ops::arith::modulo(&a, &b),

        BinaryOp::Equals => ops::compare::equals(&a, &b),
        BinaryOp::NotEquals => ops::compare::not_equals(&a, &b),
        BinaryOp::LessThan => ops::compare::less_than(&a, &b),
        BinaryOp::GreaterThan => ops::compare::greater_than(&a, &b),
        BinaryOp::LessEqual => ops::compare::less_equal(&a, &b),
        BinaryOp::GreaterEqual => ops::compare::greater_equal(&a, &b),

        // Handled above with short-circuit evaluation.
        BinaryOp::And | BinaryOp::Or => unreachable!(),
    };

    Ok(surface(result))
}

/// Short-circuit AND. Undecidable absorbs; a falsy left operand is
/// returned as-is without evaluating the right.
fn eval_and(
    ev: &mut Evaluator,
    left: &Node,
    right: &Node,
    env: &mut Environment,
) -> EvalResult {
    let a = ev.visit(left, env)?;
    if matches!(a, Value::Undecidable) {
        return Ok(Value::Undecidable);
    }
    if !a.is_truthy() {
        return Ok(a);
    }
    // Right operand decides; if it is undecidable, that's the result,
    // which is exactly the absorption rule.
    ev.visit(right, env)
}

/// Short-circuit OR. Undecidable absorbs; a truthy left operand is
/// returned as-is without evaluating the right.
fn eval_or(
    ev: &mut Evaluator,
    left: &Node,
    right: &Node,
    env: &mut Environment,
) -> EvalResult {
    let a = ev.visit(left, env)?;
    if matches!(a, Value::Undecidable) {
        return Ok(Value::Undecidable);
    }
    if a.is_truthy() {
        return Ok(a);
    }
    ev.visit(right, env)
}
