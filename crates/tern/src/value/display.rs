//! Display and Debug implementations for Value.

use std::fmt;

use super::Value;

/// Containers nested deeper than this render as `...`. Keeps printing of
/// self-referential arrays/objects terminating.
const MAX_RENDER_DEPTH: usize = 8;

/// Render a number: shortest round-trippable decimal, integral values
/// without a fractional part, and the fixed spellings `NaN`, `Infinity`,
/// and `-Infinity`.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        // Rust's float Display already picks the shortest round-trippable
        // form and drops the fractional part of integral values.
        format!("{}", n)
    }
}

fn render(value: &Value, depth: usize, quote_strings: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if depth > MAX_RENDER_DEPTH {
        return write!(f, "...");
    }

    match value {
        Value::Null => write!(f, "null"),
        Value::Boolean(b) => write!(f, "{}", b),
        Value::Undecidable => write!(f, "undecidable"),
        Value::Number(n) => write!(f, "{}", format_number(*n)),

        Value::String(s) => {
            if quote_strings {
                write!(f, "{:?}", s.as_str())
            } else {
                write!(f, "{}", s.as_str())
            }
        }

        Value::Array(items) => {
            write!(f, "[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                render(item, depth + 1, true, f)?;
            }
            write!(f, "]")
        }

        Value::Object(pairs) => {
            write!(f, "{{")?;
            for (i, (key, val)) in pairs.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: ", key)?;
                render(val, depth + 1, true, f)?;
            }
            write!(f, "}}")
        }

        Value::Error(e) => write!(f, "{}", e.message),

        Value::Function(function) => write!(f, "<function {}>", function.name),
        Value::Class(class) => write!(f, "<class {}>", class.name),
        Value::Instance(instance) => write!(f, "<instance of {}>", instance.class_name()),

        Value::Set(members) => write!(f, "<set size={}>", members.borrow().len()),
        Value::PriorityQueue(queue) => {
            write!(f, "<priority_queue size={}>", queue.borrow().len())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, 0, false, f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, 0, true, f)
    }
}
