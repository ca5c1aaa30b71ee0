//! Collection operations on Value: arrays, objects (including dot-path
//! access), sets, and priority queues.
//!
//! Each operation targets one kind and reports a kind mismatch through its
//! return value (`false` or `None`) rather than panicking; the evaluator
//! and stdlib degrade those into diagnostics.

use super::{HashableValue, Value};

// ═══════════════════════════════════════════════════════════════════
// Array Operations
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Append an element. Returns false if this is not an array.
    pub fn array_push(&self, item: Value) -> bool {
        match self {
            Value::Array(items) => {
                items.borrow_mut().push(item);
                true
            }
            _ => false,
        }
    }

    /// Remove and return the last element; `None` when empty or not an
    /// array.
    pub fn array_pop(&self) -> Option<Value> {
        match self {
            Value::Array(items) => items.borrow_mut().pop(),
            _ => None,
        }
    }

    /// Bounds-checked element access; the returned handle shares storage
    /// with the stored element.
    pub fn array_get(&self, index: usize) -> Option<Value> {
        match self {
            Value::Array(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    /// Overwrite the element at `index`. Returns false when out of bounds
    /// or not an array.
    pub fn array_set(&self, index: usize, item: Value) -> bool {
        match self {
            Value::Array(items) => {
                let mut items = items.borrow_mut();
                match items.get_mut(index) {
                    Some(slot) => {
                        *slot = item;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Object Operations
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Insert or overwrite a key. An overwritten key keeps its first
    /// insertion position. Returns false if this is not an object.
    pub fn object_set(&self, key: &str, value: Value) -> bool {
        match self {
            Value::Object(pairs) => {
                pairs.borrow_mut().insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    /// Look up a key; the returned handle shares storage with the stored
    /// value.
    pub fn object_get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(pairs) => pairs.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Whether the key is present.
    pub fn object_has(&self, key: &str) -> bool {
        match self {
            Value::Object(pairs) => pairs.borrow().contains_key(key),
            _ => false,
        }
    }

    /// Remove a key, preserving the order of the remaining entries.
    /// Returns whether the key was present.
    pub fn object_delete(&self, key: &str) -> bool {
        match self {
            Value::Object(pairs) => pairs.borrow_mut().shift_remove(key).is_some(),
            _ => false,
        }
    }

    /// Snapshot of the keys as an array of strings.
    pub fn object_keys(&self) -> Option<Value> {
        match self {
            Value::Object(pairs) => Some(Value::array(
                pairs.borrow().keys().map(|k| Value::string(k.clone())).collect(),
            )),
            _ => None,
        }
    }

    /// Snapshot of the values as an array.
    pub fn object_values(&self) -> Option<Value> {
        match self {
            Value::Object(pairs) => {
                Some(Value::array(pairs.borrow().values().cloned().collect()))
            }
            _ => None,
        }
    }

    /// Snapshot of the entries as an array of `[key, value]` arrays.
    pub fn object_entries(&self) -> Option<Value> {
        match self {
            Value::Object(pairs) => Some(Value::array(
                pairs
                    .borrow()
                    .iter()
                    .map(|(key, value)| {
                        Value::array(vec![Value::string(key.clone()), value.clone()])
                    })
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Walk a dot-separated path (`"a.b.c"`) of nested objects. `None` on
    /// any missing key or non-object intermediate.
    pub fn object_get_path(&self, path: &str) -> Option<Value> {
        let mut current = self.clone();
        for part in path.split('.') {
            current = current.object_get(part)?;
        }
        Some(current)
    }

    /// Set a value at a dot-separated path, creating intermediate objects
    /// as needed. An intermediate that exists but is not an object is
    /// overwritten with a fresh object. Returns false if the root is not
    /// an object.
    pub fn object_set_path(&self, path: &str, value: Value) -> bool {
        if !matches!(self, Value::Object(_)) {
            return false;
        }
        let mut parts: Vec<&str> = path.split('.').collect();
        let last = match parts.pop() {
            Some(last) => last,
            None => return false,
        };

        let mut current = self.clone();
        for part in parts {
            let next = match current.object_get(part) {
                Some(existing @ Value::Object(_)) => existing,
                _ => {
                    let fresh = Value::object();
                    current.object_set(part, fresh.clone());
                    fresh
                }
            };
            current = next;
        }
        current.object_set(last, value)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Set Operations
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Add a member. Returns true if it was newly inserted, false if it
    /// was already present or this is not a set.
    pub fn set_add(&self, item: &Value) -> bool {
        match self {
            Value::Set(members) => members.borrow_mut().insert(HashableValue(item.clone())),
            _ => false,
        }
    }

    /// Whether the member is present.
    pub fn set_contains(&self, item: &Value) -> bool {
        match self {
            Value::Set(members) => members.borrow().contains(&HashableValue(item.clone())),
            _ => false,
        }
    }

    /// Remove a member. Returns whether it was present.
    pub fn set_remove(&self, item: &Value) -> bool {
        match self {
            Value::Set(members) => members
                .borrow_mut()
                .shift_remove(&HashableValue(item.clone())),
            _ => false,
        }
    }

    /// Snapshot of the members as an array. Member order is an
    /// implementation detail of the backing hash representation; treat it
    /// as unspecified.
    pub fn set_to_array(&self) -> Option<Value> {
        match self {
            Value::Set(members) => Some(Value::array(
                members.borrow().iter().map(|key| key.0.clone()).collect(),
            )),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Priority Queue Operations
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Insert an item with the given priority (higher pops first).
    /// Returns false if this is not a priority queue.
    pub fn queue_push(&self, item: Value, priority: f64) -> bool {
        match self {
            Value::PriorityQueue(queue) => {
                queue.borrow_mut().push(item, priority);
                true
            }
            _ => false,
        }
    }

    /// Remove and return the maximum-priority item; ties break
    /// arbitrarily. `None` when empty or not a priority queue.
    pub fn queue_pop(&self) -> Option<Value> {
        match self {
            Value::PriorityQueue(queue) => queue.borrow_mut().pop(),
            _ => None,
        }
    }

    /// The maximum-priority item without removing it.
    pub fn queue_peek(&self) -> Option<Value> {
        match self {
            Value::PriorityQueue(queue) => queue.borrow().peek(),
            _ => None,
        }
    }

    /// Snapshot of the items in internal heap order (not sorted order).
    pub fn queue_to_array(&self) -> Option<Value> {
        match self {
            Value::PriorityQueue(queue) => Some(Value::array(
                queue
                    .borrow()
                    .items()
                    .iter()
                    .map(|item| item.value.clone())
                    .collect(),
            )),
            _ => None,
        }
    }
}
