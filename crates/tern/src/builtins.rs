//! Native function table types and the legacy builtins.

use crate::Value;

/// A host-registered native function.
///
/// The callee borrows the evaluated arguments for the duration of the
/// call and must not retain handles beyond it without taking its own
/// reference; it returns one owned value (error values use the error kind
/// with message and code).
pub type NativeFn = fn(&[Value]) -> Value;

/// The small set of builtins that predate the native table, checked after
/// it and before user-defined functions.
pub(crate) fn legacy_builtin(name: &str, args: &[Value]) -> Option<Value> {
    match name {
        "print" | "println" => {
            let line = args
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}", line);
            Some(Value::Null)
        }
        _ => None,
    }
}
