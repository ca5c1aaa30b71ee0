//! Unary operation evaluation.

use crate::ast::{Node, UnaryOp};
use crate::ops;
use crate::{Environment, Evaluator};

use super::control::EvalResult;
use super::surface;

pub(crate) fn eval_unary(
    ev: &mut Evaluator,
    op: UnaryOp,
    operand: &Node,
    env: &mut Environment,
) -> EvalResult {
    let value = ev.visit(operand, env)?;
    let result = match op {
        UnaryOp::Not => ops::logic::logical_not(&value),
        UnaryOp::Negate => ops::arith::negate(&value),
    };
    Ok(surface(result))
}
