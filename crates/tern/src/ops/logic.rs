//! Truthiness-based logical operators.
//!
//! Undecidable absorbs: `undecidable and x`, `undecidable or x`, and
//! `not undecidable` are all undecidable. This is deliberately different
//! from the three-valued operators in [`ternary`](super::ternary), which
//! combine uncertainty instead of propagating it blindly.

use crate::Value;

/// Logical AND. Returns the left operand when it is falsy, otherwise the
/// right operand — a new reference to the chosen operand, never a fresh
/// boolean.
pub fn logical_and(a: &Value, b: &Value) -> Value {
    if matches!(a, Value::Undecidable) || matches!(b, Value::Undecidable) {
        return Value::Undecidable;
    }
    if !a.is_truthy() {
        a.add_ref()
    } else {
        b.add_ref()
    }
}

/// Logical OR. Returns the left operand when it is truthy, otherwise the
/// right operand.
pub fn logical_or(a: &Value, b: &Value) -> Value {
    if matches!(a, Value::Undecidable) || matches!(b, Value::Undecidable) {
        return Value::Undecidable;
    }
    if a.is_truthy() {
        a.add_ref()
    } else {
        b.add_ref()
    }
}

/// Logical NOT over truthiness.
pub fn logical_not(a: &Value) -> Value {
    if matches!(a, Value::Undecidable) {
        return Value::Undecidable;
    }
    Value::boolean(!a.is_truthy())
}
