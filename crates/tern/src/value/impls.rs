//! Value trait implementations: constructors, reference operations,
//! predicates, extractors, equality, and deep copy.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value.
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    /// Create an undecidable value.
    pub fn undecidable() -> Self {
        Value::Undecidable
    }

    /// Create a number value.
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a string value (copies the input).
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::new(s.into()))
    }

    /// Create an array value from the given elements.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Create an empty array with room for `capacity` elements.
    pub fn array_with_capacity(capacity: usize) -> Self {
        Value::Array(Rc::new(RefCell::new(Vec::with_capacity(capacity))))
    }

    /// Create an empty object.
    pub fn object() -> Self {
        Value::Object(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Create an object from key/value pairs in insertion order.
    pub fn object_from(pairs: Vec<(String, Value)>) -> Self {
        Value::Object(Rc::new(RefCell::new(pairs.into_iter().collect())))
    }

    /// Create an error value.
    pub fn error(message: impl Into<String>, code: i32) -> Self {
        Value::Error(Rc::new(ErrorValue::new(message, code)))
    }

    /// Create a function value.
    pub fn function(function: FunctionValue) -> Self {
        Value::Function(Rc::new(function))
    }

    /// Create an empty class, optionally naming its parent. The parent
    /// handle is attached later via [`ClassValue::set_parent`].
    pub fn class(name: impl Into<String>, parent_name: Option<String>) -> Self {
        Value::Class(Rc::new(ClassValue::new(name, parent_name)))
    }

    /// Create an instance of `class`. Returns `None` if the handle is not
    /// a class value.
    pub fn instance(class: &Value) -> Option<Self> {
        match class {
            Value::Class(_) => Some(Value::Instance(Rc::new(InstanceValue::new(class.clone())))),
            _ => None,
        }
    }

    /// Create an empty set.
    pub fn set() -> Self {
        Value::Set(Rc::new(RefCell::new(IndexSet::new())))
    }

    /// Create an empty priority queue.
    pub fn priority_queue() -> Self {
        Value::PriorityQueue(Rc::new(RefCell::new(PriorityQueueValue::new())))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Reference Operations
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Take an additional reference to this value.
    ///
    /// Heap payloads bump their reference count and share storage; inline
    /// primitives copy. Either way the returned handle observes the same
    /// datum as `self`.
    pub fn add_ref(&self) -> Value {
        self.clone()
    }

    /// Release this handle. The payload is freed, children released
    /// recursively, exactly when the last handle is released.
    pub fn release(self) {
        drop(self);
    }

    /// Current reference count: `Rc::strong_count` for heap payloads,
    /// 1 for inline primitives.
    pub fn ref_count(&self) -> usize {
        match self {
            Value::Null | Value::Boolean(_) | Value::Undecidable | Value::Number(_) => 1,
            Value::String(rc) => Rc::strong_count(rc),
            Value::Array(rc) => Rc::strong_count(rc),
            Value::Object(rc) => Rc::strong_count(rc),
            Value::Function(rc) => Rc::strong_count(rc),
            Value::Error(rc) => Rc::strong_count(rc),
            Value::Class(rc) => Rc::strong_count(rc),
            Value::Instance(rc) => Rc::strong_count(rc),
            Value::Set(rc) => Rc::strong_count(rc),
            Value::PriorityQueue(rc) => Rc::strong_count(rc),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Predicates and Coercions
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Truthiness, used by conditionals and the short-circuit operators.
    ///
    /// Null, false, undecidable, zero/NaN, the empty string, empty arrays
    /// and objects, and errors are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Undecidable => false,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.borrow().is_empty(),
            Value::Object(o) => !o.borrow().is_empty(),
            Value::Error(_) => false,
            _ => true,
        }
    }

    /// Whether a `for` loop can iterate this value.
    pub fn is_iterable(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_) | Value::String(_))
    }

    /// Whether this value can be invoked.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Whether this value is an instance of the named class, walking the
    /// parent chain.
    pub fn instance_of(&self, class_name: &str) -> bool {
        let Value::Instance(instance) = self else {
            return false;
        };
        let mut current = Some(instance.class.clone());
        while let Some(Value::Class(class)) = current {
            if class.name == class_name {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// Numeric coercion shared by the operator layer: numbers pass
    /// through, booleans map to 0/1, null to 0, strings strict-parse as a
    /// float (the whole string must be consumed). Everything else fails.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Element or entry count: bytes for strings, elements for arrays,
    /// entries for objects, members for sets and priority queues.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            Value::Array(a) => Some(a.borrow().len()),
            Value::Object(o) => Some(o.borrow().len()),
            Value::Set(s) => Some(s.borrow().len()),
            Value::PriorityQueue(q) => Some(q.borrow().len()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Extractors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    /// Structural, strict-typed equality.
    ///
    /// Values of different kinds are never equal, even when numerically
    /// coercible (`"42" != 42`). NaN is never equal to anything, itself
    /// included. Functions, classes, and instances compare by reference
    /// identity; priority queues do too (heap layout is not canonical).
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undecidable, Value::Undecidable) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,

            (Value::Array(a), Value::Array(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }

            // Same key set and equal values per key, order-independent.
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(key, value)| b.get(key) == Some(value))
            }

            (Value::Error(a), Value::Error(b)) => a == b,

            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),

            // Same size and mutual membership.
            (Value::Set(a), Value::Set(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().all(|key| b.contains(key))
            }

            (Value::PriorityQueue(a), Value::PriorityQueue(b)) => Rc::ptr_eq(a, b),

            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Deep Copy
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Produce an observably independent copy of this value.
    ///
    /// Containers (string, array, object, set, priority queue) are copied
    /// recursively; primitives by value. Functions, classes, and instances
    /// copy the handle only — they keep reference semantics so method and
    /// property sharing survives copying.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Undecidable => Value::Undecidable,
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::string(s.as_str()),

            Value::Array(a) => Value::array(a.borrow().iter().map(Value::deep_copy).collect()),

            Value::Object(o) => Value::object_from(
                o.borrow()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.deep_copy()))
                    .collect(),
            ),

            Value::Error(e) => Value::error(e.message.clone(), e.code),

            Value::Set(s) => {
                let copied: IndexSet<HashableValue> = s
                    .borrow()
                    .iter()
                    .map(|key| HashableValue(key.0.deep_copy()))
                    .collect();
                Value::Set(Rc::new(RefCell::new(copied)))
            }

            Value::PriorityQueue(q) => {
                let mut copied = PriorityQueueValue::new();
                for item in q.borrow().items() {
                    copied.push(item.value.deep_copy(), item.priority);
                }
                Value::PriorityQueue(Rc::new(RefCell::new(copied)))
            }

            // Reference semantics, deliberately shallow.
            Value::Function(_) | Value::Class(_) | Value::Instance(_) => self.clone(),
        }
    }
}
