use std::rc::Rc;

use pretty_assertions::assert_eq;
use tern::ast::Node;
use tern::{FunctionValue, Value, ValueKind};

// ═══════════════════════════════════════════════════════════════════════
// Construction and Type Names
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_kind_and_type_name() {
    assert_eq!(Value::null().kind(), ValueKind::Null);
    assert_eq!(Value::null().type_name(), "null");
    assert_eq!(Value::boolean(true).type_name(), "boolean");
    assert_eq!(Value::undecidable().type_name(), "undecidable");
    assert_eq!(Value::number(1.0).type_name(), "number");
    assert_eq!(Value::string("s").type_name(), "string");
    assert_eq!(Value::array(vec![]).type_name(), "array");
    assert_eq!(Value::object().type_name(), "object");
    assert_eq!(Value::error("boom", 3).type_name(), "error");
    assert_eq!(Value::class("C", None).type_name(), "class");
    assert_eq!(Value::set().type_name(), "set");
    assert_eq!(Value::priority_queue().type_name(), "priority_queue");
}

#[test]
fn test_instance_requires_class() {
    let class = Value::class("Point", None);
    assert!(Value::instance(&class).is_some());
    assert!(Value::instance(&Value::number(1.0)).is_none());
}

// ═══════════════════════════════════════════════════════════════════════
// Reference Counting
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_fresh_value_has_one_reference() {
    let value = Value::array(vec![Value::number(1.0)]);
    assert_eq!(value.ref_count(), 1);
}

#[test]
fn test_add_ref_and_release_balance() {
    let value = Value::string("shared");
    let first = value.add_ref();
    let second = value.add_ref();
    assert_eq!(value.ref_count(), 3);

    first.release();
    assert_eq!(value.ref_count(), 2);
    second.release();
    assert_eq!(value.ref_count(), 1);
}

#[test]
fn test_container_release_drops_children() {
    let child = Value::string("child");
    let array = Value::array(vec![child.add_ref()]);
    assert_eq!(child.ref_count(), 2);

    array.release();
    assert_eq!(child.ref_count(), 1);
}

#[test]
fn test_add_ref_shares_storage() {
    let array = Value::array(vec![]);
    let alias = array.add_ref();
    alias.array_push(Value::number(7.0));
    assert_eq!(array.length(), Some(1));
}

// ═══════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_equality_is_strict_across_kinds() {
    assert_ne!(Value::string("42"), Value::number(42.0));
    assert_ne!(Value::boolean(false), Value::number(0.0));
    assert_ne!(Value::null(), Value::boolean(false));
    assert_ne!(Value::null(), Value::undecidable());
}

#[test]
fn test_nan_is_never_equal() {
    assert_ne!(Value::number(f64::NAN), Value::number(f64::NAN));
}

#[test]
fn test_unit_kinds_equal_themselves() {
    assert_eq!(Value::null(), Value::null());
    assert_eq!(Value::undecidable(), Value::undecidable());
}

#[test]
fn test_array_equality_is_pairwise() {
    let a = Value::array(vec![Value::number(1.0), Value::string("x")]);
    let b = Value::array(vec![Value::number(1.0), Value::string("x")]);
    let c = Value::array(vec![Value::string("x"), Value::number(1.0)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_object_equality_ignores_insertion_order() {
    let a = Value::object();
    a.object_set("x", Value::number(1.0));
    a.object_set("y", Value::number(2.0));

    let b = Value::object();
    b.object_set("y", Value::number(2.0));
    b.object_set("x", Value::number(1.0));

    assert_eq!(a, b);

    b.object_set("y", Value::number(3.0));
    assert_ne!(a, b);
}

#[test]
fn test_error_equality_is_message_and_code() {
    assert_eq!(Value::error("boom", 1), Value::error("boom", 1));
    assert_ne!(Value::error("boom", 1), Value::error("boom", 2));
    assert_ne!(Value::error("boom", 1), Value::error("bang", 1));
}

#[test]
fn test_function_equality_is_identity() {
    let body = Rc::new(Node::Noop);
    let f = Value::function(FunctionValue::new("f", vec![], Rc::clone(&body)));
    let same = f.add_ref();
    let other = Value::function(FunctionValue::new("f", vec![], body));

    assert_eq!(f, same);
    assert_ne!(f, other);
}

#[test]
fn test_instance_equality_is_identity() {
    let class = Value::class("C", None);
    let a = Value::instance(&class).unwrap();
    let b = Value::instance(&class).unwrap();
    assert_eq!(a, a.add_ref());
    assert_ne!(a, b);
}

// ═══════════════════════════════════════════════════════════════════════
// Stringification
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_to_string_table() {
    assert_eq!(Value::null().to_string(), "null");
    assert_eq!(Value::boolean(true).to_string(), "true");
    assert_eq!(Value::boolean(false).to_string(), "false");
    assert_eq!(Value::undecidable().to_string(), "undecidable");
    assert_eq!(Value::number(42.0).to_string(), "42");
    assert_eq!(Value::number(3.5).to_string(), "3.5");
    assert_eq!(Value::number(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::number(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Value::number(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Value::string("plain").to_string(), "plain");
    assert_eq!(Value::error("went wrong", -1).to_string(), "went wrong");
}

#[test]
fn test_function_renders_as_opaque_token() {
    let f = Value::function(FunctionValue::new("square", vec![], Rc::new(Node::Noop)));
    assert_eq!(f.to_string(), "<function square>");
}

// ═══════════════════════════════════════════════════════════════════════
// Copy
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_copy_round_trips_to_string() {
    let values = vec![
        Value::null(),
        Value::boolean(true),
        Value::number(42.0),
        Value::string("text"),
        Value::array(vec![Value::number(1.0), Value::string("two")]),
        {
            let object = Value::object();
            object.object_set("k", Value::number(9.0));
            object
        },
    ];

    for value in values {
        assert_eq!(value.deep_copy().to_string(), value.to_string());
    }
}

#[test]
fn test_deep_copy_is_independent() {
    let original = Value::array(vec![Value::number(1.0)]);
    let copy = original.deep_copy();

    original.array_push(Value::number(2.0));
    assert_eq!(original.length(), Some(2));
    assert_eq!(copy.length(), Some(1));
}

#[test]
fn test_deep_copy_recurses_into_nested_containers() {
    let inner = Value::object();
    inner.object_set("n", Value::number(1.0));
    let outer = Value::array(vec![inner.add_ref()]);

    let copy = outer.deep_copy();
    inner.object_set("n", Value::number(99.0));

    let copied_inner = copy.array_get(0).unwrap();
    assert_eq!(copied_inner.object_get("n"), Some(Value::number(1.0)));
}

#[test]
fn test_instance_copy_is_shallow() {
    let class = Value::class("C", None);
    let instance = Value::instance(&class).unwrap();
    let copy = instance.deep_copy();

    // Reference semantics: the copy shares the property map.
    if let (Value::Instance(a), Value::Instance(b)) = (&instance, &copy) {
        a.set_property("p", Value::number(5.0));
        assert_eq!(b.get_property("p"), Some(Value::number(5.0)));
    } else {
        panic!("expected instances");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Truthiness and Introspection
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_truthiness_table() {
    assert!(!Value::null().is_truthy());
    assert!(!Value::boolean(false).is_truthy());
    assert!(Value::boolean(true).is_truthy());
    assert!(!Value::undecidable().is_truthy());
    assert!(!Value::number(0.0).is_truthy());
    assert!(!Value::number(f64::NAN).is_truthy());
    assert!(Value::number(-1.0).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(Value::string("x").is_truthy());
    assert!(!Value::array(vec![]).is_truthy());
    assert!(Value::array(vec![Value::null()]).is_truthy());
    assert!(!Value::object().is_truthy());
    assert!(!Value::error("e", -1).is_truthy());
    assert!(Value::set().is_truthy());
}

#[test]
fn test_length_across_kinds() {
    assert_eq!(Value::string("abc").length(), Some(3));
    assert_eq!(Value::array(vec![Value::null()]).length(), Some(1));

    let object = Value::object();
    object.object_set("a", Value::null());
    assert_eq!(object.length(), Some(1));

    let set = Value::set();
    set.set_add(&Value::number(1.0));
    set.set_add(&Value::number(1.0));
    assert_eq!(set.length(), Some(1));

    let queue = Value::priority_queue();
    queue.queue_push(Value::null(), 1.0);
    assert_eq!(queue.length(), Some(1));

    assert_eq!(Value::number(5.0).length(), None);
}

#[test]
fn test_instance_of_walks_parent_chain() {
    let base = Value::class("Base", None);
    let derived = Value::class("Derived", Some("Base".to_string()));
    if let Value::Class(d) = &derived {
        d.set_parent(base.add_ref());
    }

    let instance = Value::instance(&derived).unwrap();
    assert!(instance.instance_of("Derived"));
    assert!(instance.instance_of("Base"));
    assert!(!instance.instance_of("Unrelated"));
    assert!(!base.instance_of("Base"));
}

// ═══════════════════════════════════════════════════════════════════════
// Sets and Priority Queues
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_set_add_reports_novelty() {
    let set = Value::set();
    assert!(set.set_add(&Value::string("a")));
    assert!(!set.set_add(&Value::string("a")));
    assert!(set.set_add(&Value::string("b")));
    assert_eq!(set.length(), Some(2));
}

#[test]
fn test_set_to_array_has_all_members() {
    let set = Value::set();
    set.set_add(&Value::number(1.0));
    set.set_add(&Value::number(2.0));

    // Order is unspecified; check membership only.
    let array = set.set_to_array().unwrap();
    assert_eq!(array.length(), Some(2));
    let first = array.array_get(0).unwrap();
    let second = array.array_get(1).unwrap();
    assert_ne!(first, second);
    assert!(set.set_contains(&first));
    assert!(set.set_contains(&second));
}

#[test]
fn test_priority_queue_pops_by_priority() {
    let queue = Value::priority_queue();
    queue.queue_push(Value::string("low"), 1.0);
    queue.queue_push(Value::string("high"), 10.0);
    queue.queue_push(Value::string("mid"), 5.0);

    assert_eq!(queue.queue_peek(), Some(Value::string("high")));
    assert_eq!(queue.queue_pop(), Some(Value::string("high")));
    assert_eq!(queue.queue_pop(), Some(Value::string("mid")));
    assert_eq!(queue.queue_pop(), Some(Value::string("low")));
    assert_eq!(queue.queue_pop(), None);
}

#[test]
fn test_priority_queue_to_array_is_heap_order() {
    let queue = Value::priority_queue();
    queue.queue_push(Value::number(1.0), 1.0);
    queue.queue_push(Value::number(3.0), 3.0);
    queue.queue_push(Value::number(2.0), 2.0);

    // Heap order, not sorted order: only the root position is fixed.
    let array = queue.queue_to_array().unwrap();
    assert_eq!(array.length(), Some(3));
    assert_eq!(array.array_get(0), Some(Value::number(3.0)));
}
