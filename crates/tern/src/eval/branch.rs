//! If-statement evaluation.

use crate::ast::Node;
use crate::{Environment, Evaluator, Value};

use super::control::EvalResult;

/// Branch on the condition's truthiness; no branch taken is a no-op null.
pub(crate) fn eval_if(
    ev: &mut Evaluator,
    cond: &Node,
    then_branch: &Node,
    else_branch: Option<&Node>,
    env: &mut Environment,
) -> EvalResult {
    let condition = ev.visit(cond, env)?;
    if condition.is_truthy() {
        ev.visit(then_branch, env)
    } else if let Some(else_branch) = else_branch {
        ev.visit(else_branch, env)
    } else {
        Ok(Value::Null)
    }
}
