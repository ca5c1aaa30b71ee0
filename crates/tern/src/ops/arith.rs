//! Arithmetic operators with dynamic coercion.

use crate::Value;

/// Addition. If either operand is a string the result is concatenation of
/// both operands' string forms — string coercion has priority over
/// numeric addition. Otherwise both operands coerce to numbers.
pub fn add(a: &Value, b: &Value) -> Value {
    if matches!(a, Value::String(_)) || matches!(b, Value::String(_)) {
        return Value::string(format!("{}{}", a, b));
    }

    let (x, y) = match (a.coerce_number(), b.coerce_number()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Value::error("Cannot convert operands to numbers for addition", -1),
    };

    if x.is_nan() || y.is_nan() {
        return Value::number(f64::NAN);
    }

    let sum = x + y;
    if sum.is_infinite() && x.is_finite() && y.is_finite() {
        return Value::error("Numeric overflow in addition", -1);
    }
    Value::number(sum)
}

/// Subtraction. Numeric coercion only; no string special case.
pub fn subtract(a: &Value, b: &Value) -> Value {
    match (a.coerce_number(), b.coerce_number()) {
        (Some(x), Some(y)) => Value::number(x - y),
        _ => Value::error("Cannot convert operands to numbers for subtraction", -1),
    }
}

/// Multiplication with overflow detection.
pub fn multiply(a: &Value, b: &Value) -> Value {
    let (x, y) = match (a.coerce_number(), b.coerce_number()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Value::error("Cannot convert operands to numbers for multiplication", -1),
    };

    if x.is_nan() || y.is_nan() {
        return Value::number(f64::NAN);
    }
    if x == 0.0 || y == 0.0 {
        return Value::number(0.0);
    }

    let product = x * y;
    if product.is_infinite() && x.is_finite() && y.is_finite() {
        return Value::error("Numeric overflow in multiplication", -1);
    }
    Value::number(product)
}

/// Division, IEEE-754 semantics: `x/0` is an infinity matching the sign
/// of `x`, and `0/0` is NaN. Division by zero is not an error.
pub fn divide(a: &Value, b: &Value) -> Value {
    let (x, y) = match (a.coerce_number(), b.coerce_number()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Value::error("Cannot convert operands to numbers for division", -1),
    };

    if y == 0.0 {
        return Value::number(if x > 0.0 {
            f64::INFINITY
        } else if x < 0.0 {
            f64::NEG_INFINITY
        } else {
            f64::NAN
        });
    }
    Value::number(x / y)
}

/// Modulo via floating-point remainder; the sign follows the dividend.
/// Unlike division, modulo by zero is an error.
pub fn modulo(a: &Value, b: &Value) -> Value {
    let (x, y) = match (a.coerce_number(), b.coerce_number()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Value::error("Cannot convert operands to numbers for modulo", -1),
    };

    if y == 0.0 {
        return Value::error("Modulo by zero", -1);
    }
    Value::number(x % y)
}

/// Unary numeric negation.
pub fn negate(a: &Value) -> Value {
    match a.coerce_number() {
        Some(x) => Value::number(-x),
        None => Value::error("Cannot convert operand to number for negation", -1),
    }
}
