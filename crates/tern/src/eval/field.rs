//! Property access evaluation: `base.name`.

use crate::ast::Node;
use crate::{Environment, Evaluator, Value};

use super::control::EvalResult;

/// Evaluate a property access.
///
/// Objects look the name up as a key; arrays parse it as a non-negative
/// index; instances check their properties (falling back to class
/// methods); classes resolve methods through their parent chain. Every
/// miss degrades to null with a logged diagnostic.
pub(crate) fn eval_property(
    ev: &mut Evaluator,
    base: &Node,
    name: &str,
    env: &mut Environment,
) -> EvalResult {
    let base_value = ev.visit(base, env)?;

    let found = match &base_value {
        Value::Object(_) => {
            let value = base_value.object_get(name);
            if value.is_none() {
                tracing::warn!(key = name, "object has no such key");
            }
            value
        }

        Value::Array(_) => match name.parse::<usize>() {
            Ok(index) => {
                let value = base_value.array_get(index);
                if value.is_none() {
                    tracing::warn!(index, "array index out of range");
                }
                value
            }
            Err(_) => {
                tracing::warn!(property = name, "array property is not a valid index");
                None
            }
        },

        Value::Instance(instance) => {
            let value = instance.get_property(name);
            if value.is_none() {
                tracing::warn!(
                    class = %instance.class_name(),
                    property = name,
                    "instance has no such property or method"
                );
            }
            value
        }

        Value::Class(class) => {
            let value = class.get_method(name);
            if value.is_none() {
                tracing::warn!(class = %class.name, method = name, "class has no such method");
            }
            value
        }

        other => {
            tracing::warn!(
                kind = other.type_name(),
                property = name,
                "property access on a non-container value"
            );
            None
        }
    };

    Ok(found.unwrap_or(Value::Null))
}
