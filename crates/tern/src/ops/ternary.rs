//! Three-valued logic operators.
//!
//! These operators work over the trivalent domain {true, undecidable,
//! false}, represented internally as {1, 0, -1}. They are a separate
//! family from the truthiness operators in [`logic`](super::logic):
//! Łukasiewicz and Kleene connectives *combine* uncertainty, whereas the
//! ordinary operators treat undecidable as absorbing.

use crate::Value;

/// Internal trivalent representation used only by these operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Trivalent {
    /// Definitely false (-1).
    False = -1,
    /// Undecidable (0).
    Unknown = 0,
    /// Definitely true (1).
    True = 1,
}

impl Trivalent {
    /// Map a value into the trivalent domain: booleans to true/false,
    /// undecidable to unknown, numbers to false only when zero, and every
    /// other kind (null included) to unknown.
    pub fn from_value(value: &Value) -> Trivalent {
        match value {
            Value::Boolean(true) => Trivalent::True,
            Value::Boolean(false) => Trivalent::False,
            Value::Undecidable => Trivalent::Unknown,
            Value::Number(n) => {
                if *n == 0.0 {
                    Trivalent::False
                } else {
                    Trivalent::True
                }
            }
            _ => Trivalent::Unknown,
        }
    }

    /// Map back into a value: true/false to booleans, unknown to
    /// undecidable.
    pub fn into_value(self) -> Value {
        match self {
            Trivalent::True => Value::boolean(true),
            Trivalent::False => Value::boolean(false),
            Trivalent::Unknown => Value::Undecidable,
        }
    }

    fn from_level(level: i8) -> Trivalent {
        match level.signum() {
            1 => Trivalent::True,
            -1 => Trivalent::False,
            _ => Trivalent::Unknown,
        }
    }

    fn level(self) -> i8 {
        self as i8
    }
}

/// Łukasiewicz three-valued AND (⊗): `min(a, b)`.
pub fn undecidable_and(a: &Value, b: &Value) -> Value {
    let a = Trivalent::from_value(a).level();
    let b = Trivalent::from_value(b).level();
    Trivalent::from_level(a.min(b)).into_value()
}

/// Łukasiewicz three-valued OR (⊕): `max(a, b)`.
pub fn undecidable_or(a: &Value, b: &Value) -> Value {
    let a = Trivalent::from_value(a).level();
    let b = Trivalent::from_value(b).level();
    Trivalent::from_level(a.max(b)).into_value()
}

/// Kleene strong AND: false dominates, true requires both, everything
/// else is undecidable.
pub fn kleene_and(a: &Value, b: &Value) -> Value {
    let a = Trivalent::from_value(a);
    let b = Trivalent::from_value(b);
    if a == Trivalent::False || b == Trivalent::False {
        return Value::boolean(false);
    }
    if a == Trivalent::True && b == Trivalent::True {
        return Value::boolean(true);
    }
    Value::Undecidable
}

/// Kleene strong OR: true dominates, false requires both.
pub fn kleene_or(a: &Value, b: &Value) -> Value {
    let a = Trivalent::from_value(a);
    let b = Trivalent::from_value(b);
    if a == Trivalent::True || b == Trivalent::True {
        return Value::boolean(true);
    }
    if a == Trivalent::False && b == Trivalent::False {
        return Value::boolean(false);
    }
    Value::Undecidable
}

/// Three-valued implication: `max(1 - a, b)` clamped to `[-1, 1]`.
pub fn undecidable_implies(a: &Value, b: &Value) -> Value {
    let a = Trivalent::from_value(a).level() as i32;
    let b = Trivalent::from_value(b).level() as i32;
    let result = (1 - a).max(b).clamp(-1, 1);
    Trivalent::from_level(result as i8).into_value()
}

/// Probabilistic AND. When either operand is undecidable the combined
/// probability `pa * pb` decides: below 0.1 false, above 0.9 true,
/// otherwise still undecidable. Decided operands use plain boolean AND,
/// with non-boolean decided values counting as true.
pub fn probabilistic_and(a: &Value, b: &Value, probability_a: f64, probability_b: f64) -> Value {
    if matches!(a, Value::Undecidable) || matches!(b, Value::Undecidable) {
        let combined = probability_a * probability_b;
        if combined < 0.1 {
            return Value::boolean(false);
        }
        if combined > 0.9 {
            return Value::boolean(true);
        }
        return Value::Undecidable;
    }

    let a = a.as_bool().unwrap_or(true);
    let b = b.as_bool().unwrap_or(true);
    Value::boolean(a && b)
}

/// Consensus over a slice of votes. Boolean votes tally as true/false;
/// undecidable and every other kind tally as undecidable. More than 30%
/// undecidable votes makes the outcome undecidable regardless of
/// threshold; otherwise whichever side's ratio meets `threshold` wins,
/// and no clear winner is undecidable. An empty vote set is an error.
pub fn consensus(votes: &[Value], threshold: f64) -> Value {
    if votes.is_empty() {
        return Value::error("No votes provided for consensus", -1);
    }

    let mut true_votes = 0usize;
    let mut false_votes = 0usize;
    let mut undecidable_votes = 0usize;

    for vote in votes {
        match vote {
            Value::Boolean(true) => true_votes += 1,
            Value::Boolean(false) => false_votes += 1,
            _ => undecidable_votes += 1,
        }
    }

    let total = votes.len() as f64;
    let true_ratio = true_votes as f64 / total;
    let false_ratio = false_votes as f64 / total;
    let undecidable_ratio = undecidable_votes as f64 / total;

    if undecidable_ratio > 0.3 {
        return Value::Undecidable;
    }
    if true_ratio >= threshold {
        return Value::boolean(true);
    }
    if false_ratio >= threshold {
        return Value::boolean(false);
    }
    Value::Undecidable
}

/// Temporal "eventually". A decided boolean passes through unchanged. An
/// undecidable condition stays undecidable unless the time horizon is
/// long (over 100), in which case it resolves to true; a spent horizon
/// (zero or negative) stays undecidable.
pub fn eventually(condition: &Value, time_horizon: i64) -> Value {
    match condition {
        Value::Boolean(_) => condition.add_ref(),
        Value::Undecidable => {
            if time_horizon <= 0 {
                Value::Undecidable
            } else if time_horizon > 100 {
                Value::boolean(true)
            } else {
                Value::Undecidable
            }
        }
        _ => Value::Undecidable,
    }
}

/// Fuzzy membership: degrees at or above 0.8 are in, at or below 0.2 are
/// out, and the fuzzy boundary in between is undecidable.
pub fn fuzzy_membership(membership_degree: f64) -> Value {
    if membership_degree >= 0.8 {
        Value::boolean(true)
    } else if membership_degree <= 0.2 {
        Value::boolean(false)
    } else {
        Value::Undecidable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> Value {
        Value::boolean(true)
    }
    fn f() -> Value {
        Value::boolean(false)
    }
    fn u() -> Value {
        Value::undecidable()
    }

    #[test]
    fn test_lukasiewicz_and_truth_table() {
        assert_eq!(undecidable_and(&t(), &t()), t());
        assert_eq!(undecidable_and(&t(), &u()), u());
        assert_eq!(undecidable_and(&t(), &f()), f());
        assert_eq!(undecidable_and(&u(), &u()), u());
        assert_eq!(undecidable_and(&u(), &f()), f());
        assert_eq!(undecidable_and(&f(), &f()), f());
    }

    #[test]
    fn test_lukasiewicz_or_truth_table() {
        assert_eq!(undecidable_or(&t(), &f()), t());
        assert_eq!(undecidable_or(&u(), &t()), t());
        assert_eq!(undecidable_or(&u(), &u()), u());
        assert_eq!(undecidable_or(&u(), &f()), u());
        assert_eq!(undecidable_or(&f(), &f()), f());
    }

    #[test]
    fn test_kleene_and_false_dominates() {
        assert_eq!(kleene_and(&u(), &f()), f());
        assert_eq!(kleene_and(&f(), &u()), f());
        assert_eq!(kleene_and(&t(), &t()), t());
        assert_eq!(kleene_and(&t(), &u()), u());
    }

    #[test]
    fn test_kleene_or_true_dominates() {
        assert_eq!(kleene_or(&u(), &t()), t());
        assert_eq!(kleene_or(&f(), &f()), f());
        assert_eq!(kleene_or(&f(), &u()), u());
    }

    #[test]
    fn test_implication_follows_max_formula() {
        // max(1 - a, b): a false antecedent always implies.
        assert_eq!(undecidable_implies(&f(), &f()), t());
        assert_eq!(undecidable_implies(&f(), &u()), t());
        assert_eq!(undecidable_implies(&t(), &t()), t());
        assert_eq!(undecidable_implies(&t(), &u()), u());
        // The formula leaves T → F undecidable and resolves U → F to
        // true; both fall straight out of max(1 - a, b).
        assert_eq!(undecidable_implies(&t(), &f()), u());
        assert_eq!(undecidable_implies(&u(), &f()), t());
        assert_eq!(undecidable_implies(&u(), &u()), t());
    }

    #[test]
    fn test_probabilistic_and() {
        assert_eq!(probabilistic_and(&t(), &t(), 0.5, 0.5), t());
        assert_eq!(probabilistic_and(&t(), &f(), 0.5, 0.5), f());
        assert_eq!(probabilistic_and(&u(), &t(), 0.2, 0.2), f());
        assert_eq!(probabilistic_and(&u(), &t(), 0.99, 0.99), t());
        assert_eq!(probabilistic_and(&u(), &t(), 0.7, 0.7), u());
    }

    #[test]
    fn test_consensus() {
        let votes = vec![t(), t(), t(), f()];
        assert_eq!(consensus(&votes, 0.6), t());

        let votes = vec![f(), f(), f(), t()];
        assert_eq!(consensus(&votes, 0.7), f());

        // 2 of 5 undecidable exceeds the 0.3 cutoff.
        let votes = vec![t(), t(), t(), u(), u()];
        assert_eq!(consensus(&votes, 0.5), u());

        // No side reaches the threshold.
        let votes = vec![t(), t(), f(), f()];
        assert_eq!(consensus(&votes, 0.6), u());

        assert!(consensus(&[], 0.5).is_error());
    }

    #[test]
    fn test_eventually() {
        assert_eq!(eventually(&t(), 0), t());
        assert_eq!(eventually(&f(), 1000), f());
        assert_eq!(eventually(&u(), 0), u());
        assert_eq!(eventually(&u(), 50), u());
        assert_eq!(eventually(&u(), 101), t());
    }

    #[test]
    fn test_fuzzy_membership() {
        assert_eq!(fuzzy_membership(0.9), t());
        assert_eq!(fuzzy_membership(0.8), t());
        assert_eq!(fuzzy_membership(0.5), u());
        assert_eq!(fuzzy_membership(0.2), f());
        assert_eq!(fuzzy_membership(0.05), f());
    }
}
