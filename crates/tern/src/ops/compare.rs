//! Comparison operators: structural equality and coercing order.

use std::cmp::Ordering;

use crate::Value;

/// Ordering between two values, or `None` when they are incomparable.
///
/// Same-kind pairs compare directly (numbers by value, strings by byte
/// order, booleans with false < true, null equal to null). Cross-kind
/// pairs fall back to numeric coercion of both sides. NaN compares as
/// neither less nor greater — both strict comparisons come out false,
/// which the derived `<=`/`>=` then negate into true.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if a.kind() == b.kind() {
        return match (a, b) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Undecidable, Value::Undecidable) => Some(Ordering::Equal),
            (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
            (Value::Number(x), Value::Number(y)) => {
                Some(x.partial_cmp(y).unwrap_or(Ordering::Equal))
            }
            (Value::String(x), Value::String(y)) => Some(x.as_bytes().cmp(y.as_bytes())),
            _ => None,
        };
    }

    match (a.coerce_number(), b.coerce_number()) {
        (Some(x), Some(y)) => Some(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
        _ => None,
    }
}

/// Structural equality; always succeeds.
pub fn equals(a: &Value, b: &Value) -> Value {
    Value::boolean(a == b)
}

/// Structural inequality; always succeeds.
pub fn not_equals(a: &Value, b: &Value) -> Value {
    Value::boolean(a != b)
}

/// Strict less-than.
pub fn less_than(a: &Value, b: &Value) -> Value {
    match compare(a, b) {
        Some(ordering) => Value::boolean(ordering == Ordering::Less),
        None => Value::error("Cannot compare values of incompatible types", -1),
    }
}

/// Strict greater-than.
pub fn greater_than(a: &Value, b: &Value) -> Value {
    match compare(a, b) {
        Some(ordering) => Value::boolean(ordering == Ordering::Greater),
        None => Value::error("Cannot compare values of incompatible types", -1),
    }
}

/// `a <= b`, defined as `!(a > b)`. The derivation is part of the
/// contract: it makes `NaN <= x` true even though `NaN < x` is false.
pub fn less_equal(a: &Value, b: &Value) -> Value {
    match greater_than(a, b) {
        Value::Boolean(greater) => Value::boolean(!greater),
        error => error,
    }
}

/// `a >= b`, defined as `!(a < b)`.
pub fn greater_equal(a: &Value, b: &Value) -> Value {
    match less_than(a, b) {
        Value::Boolean(less) => Value::boolean(!less),
        error => error,
    }
}
