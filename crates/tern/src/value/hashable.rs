//! Hashable wrapper for Value so sets can hold arbitrary values.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Value;

/// A wrapper for [`Value`] that implements `Hash` and `Eq`, used as the
/// set element type.
///
/// Key equality follows structural value equality with one deviation:
/// numbers compare by canonical bit pattern, so a set deduplicates NaN
/// (and treats `0.0` and `-0.0` as one member) even though `equals` says
/// NaN is never equal to itself. This matches the hash-table semantics of
/// the set kind and keeps the Hash/Eq contract intact.
#[derive(Debug, Clone)]
pub struct HashableValue(pub Value);

/// Canonical bit pattern for a number key: all NaNs collapse to one
/// pattern, negative zero collapses to zero.
fn number_key_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0u64
    } else {
        n.to_bits()
    }
}

/// Order-independent accumulator over sub-hashes, for kinds whose
/// equality ignores entry order.
fn unordered_hash<I: Iterator<Item = u64>>(hashes: I) -> u64 {
    hashes.fold(0u64, |acc, h| acc.wrapping_add(h))
}

fn hash_one<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(&self.0).hash(state);

        match &self.0 {
            Value::Null | Value::Undecidable => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(n) => number_key_bits(*n).hash(state),
            Value::String(s) => s.hash(state),

            Value::Array(items) => {
                let items = items.borrow();
                items.len().hash(state);
                for item in items.iter() {
                    HashableValue(item.clone()).hash(state);
                }
            }

            // Object equality is order-independent, so the hash must be too.
            Value::Object(pairs) => {
                let pairs = pairs.borrow();
                pairs.len().hash(state);
                unordered_hash(pairs.iter().map(|(key, value)| {
                    hash_one(&(key, HashableValue(value.clone())))
                }))
                .hash(state);
            }

            Value::Error(e) => {
                e.message.hash(state);
                e.code.hash(state);
            }

            // Identity-equal kinds hash by allocation address.
            Value::Function(rc) => (Rc::as_ptr(rc) as usize).hash(state),
            Value::Class(rc) => (Rc::as_ptr(rc) as usize).hash(state),
            Value::Instance(rc) => (Rc::as_ptr(rc) as usize).hash(state),
            Value::PriorityQueue(rc) => (Rc::as_ptr(rc) as usize).hash(state),

            Value::Set(members) => {
                let members = members.borrow();
                members.len().hash(state);
                unordered_hash(members.iter().map(hash_one)).hash(state);
            }
        }
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            // Bitwise for numbers so NaN is a well-behaved key.
            (Value::Number(a), Value::Number(b)) => number_key_bits(*a) == number_key_bits(*b),
            (a, b) => a == b,
        }
    }
}

impl Eq for HashableValue {}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    #[test]
    fn test_nan_is_a_single_key() {
        let mut set = IndexSet::new();
        assert!(set.insert(HashableValue(Value::number(f64::NAN))));
        assert!(!set.insert(HashableValue(Value::number(f64::NAN))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_negative_zero_collapses() {
        let mut set = IndexSet::new();
        set.insert(HashableValue(Value::number(0.0)));
        assert!(set.contains(&HashableValue(Value::number(-0.0))));
    }

    #[test]
    fn test_equal_objects_hash_equal_regardless_of_order() {
        let a = Value::object_from(vec![
            ("x".to_string(), Value::number(1.0)),
            ("y".to_string(), Value::number(2.0)),
        ]);
        let b = Value::object_from(vec![
            ("y".to_string(), Value::number(2.0)),
            ("x".to_string(), Value::number(1.0)),
        ]);
        assert_eq!(a, b);
        assert_eq!(
            hash_one(&HashableValue(a)),
            hash_one(&HashableValue(b))
        );
    }

    #[test]
    fn test_kind_mismatch_never_equal() {
        assert_ne!(
            HashableValue(Value::string("1")),
            HashableValue(Value::number(1.0))
        );
    }
}
