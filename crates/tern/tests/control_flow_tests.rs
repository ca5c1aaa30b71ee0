use std::rc::Rc;

use pretty_assertions::assert_eq;
use tern::ast::{BinaryOp, Node};
use tern::{Environment, Evaluator, Value};

fn num(n: f64) -> Node {
    Node::NumberLit(n)
}

fn var(name: &str) -> Node {
    Node::Var(name.to_string())
}

fn set(name: &str, value: Node) -> Node {
    Node::VarDef {
        name: name.to_string(),
        value: Box::new(value),
    }
}

fn bin(op: BinaryOp, left: Node, right: Node) -> Node {
    Node::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn compound(statements: Vec<Node>) -> Node {
    Node::Compound(statements)
}

fn if_then(cond: Node, then_branch: Node) -> Node {
    Node::If {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
}

fn while_loop(cond: Node, body: Node) -> Node {
    Node::While {
        cond: Box::new(cond),
        body: Box::new(body),
    }
}

fn for_loop(var_name: &str, iterable: Node, body: Node) -> Node {
    Node::For {
        var: var_name.to_string(),
        iterable: Box::new(iterable),
        body: Box::new(body),
    }
}

fn run(program: &Node) -> (Value, Environment) {
    let mut ev = Evaluator::new();
    let mut env = Environment::new();
    let result = ev.run(program, &mut env);
    (result, env)
}

// ═══════════════════════════════════════════════════════════════════════
// While Loops
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_while_condition_and_body_share_one_scope() {
    // set i 0; while i < 3 { set i (i + 1) }
    let program = compound(vec![
        set("i", num(0.0)),
        while_loop(
            bin(BinaryOp::LessThan, var("i"), num(3.0)),
            set("i", bin(BinaryOp::Add, var("i"), num(1.0))),
        ),
    ]);

    let (_, env) = run(&program);
    assert_eq!(env.get("i"), Some(&Value::number(3.0)));
}

#[test]
fn test_while_break_terminates_immediately() {
    let program = compound(vec![
        set("i", num(0.0)),
        while_loop(
            bin(BinaryOp::LessThan, var("i"), num(10.0)),
            compound(vec![
                set("i", bin(BinaryOp::Add, var("i"), num(1.0))),
                if_then(bin(BinaryOp::Equals, var("i"), num(5.0)), Node::Break),
            ]),
        ),
    ]);

    let (_, env) = run(&program);
    assert_eq!(env.get("i"), Some(&Value::number(5.0)));
}

#[test]
fn test_while_continue_skips_to_the_next_check() {
    // Count iterations where i != 3.
    let program = compound(vec![
        set("i", num(0.0)),
        set("n", num(0.0)),
        while_loop(
            bin(BinaryOp::LessThan, var("i"), num(5.0)),
            compound(vec![
                set("i", bin(BinaryOp::Add, var("i"), num(1.0))),
                if_then(bin(BinaryOp::Equals, var("i"), num(3.0)), Node::Continue),
                set("n", bin(BinaryOp::Add, var("n"), num(1.0))),
            ]),
        ),
    ]);

    let (_, env) = run(&program);
    assert_eq!(env.get("i"), Some(&Value::number(5.0)));
    assert_eq!(env.get("n"), Some(&Value::number(4.0)));
}

#[test]
fn test_runaway_while_is_stopped_by_the_safety_cap() {
    // while true {} — the iteration cap terminates it instead of hanging.
    let program = while_loop(Node::BoolLit(true), Node::Noop);
    let (result, _) = run(&program);
    assert_eq!(result, Value::null());
}

#[test]
fn test_return_propagates_out_of_a_loop() {
    let body = while_loop(
        Node::BoolLit(true),
        Node::Return(Some(Box::new(num(7.0)))),
    );
    let program = compound(vec![
        Node::FnDef {
            name: "find".to_string(),
            params: vec![],
            body: Rc::new(body),
        },
        Node::Call {
            name: "find".to_string(),
            args: vec![],
        },
    ]);

    let (result, _) = run(&program);
    assert_eq!(result, Value::number(7.0));
}

// ═══════════════════════════════════════════════════════════════════════
// For Loops
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_for_iterates_array_elements() {
    let program = compound(vec![
        set("sum", num(0.0)),
        for_loop(
            "x",
            Node::ArrayLit(vec![num(1.0), num(2.0), num(3.0)]),
            set("sum", bin(BinaryOp::Add, var("sum"), var("x"))),
        ),
    ]);

    let (_, env) = run(&program);
    assert_eq!(env.get("sum"), Some(&Value::number(6.0)));
}

#[test]
fn test_for_iterates_object_keys_as_strings() {
    let program = compound(vec![
        set("joined", Node::StringLit(String::new())),
        for_loop(
            "key",
            Node::ObjectLit(vec![
                ("a".to_string(), num(1.0)),
                ("b".to_string(), num(2.0)),
            ]),
            set("joined", bin(BinaryOp::Add, var("joined"), var("key"))),
        ),
    ]);

    let (_, env) = run(&program);
    assert_eq!(env.get("joined"), Some(&Value::string("ab")));
}

#[test]
fn test_for_over_non_iterable_degrades_to_null() {
    let program = for_loop("x", num(5.0), Node::Noop);
    let (result, _) = run(&program);
    assert_eq!(result, Value::null());
}

#[test]
fn test_for_break_and_continue() {
    let program = compound(vec![
        set("sum", num(0.0)),
        for_loop(
            "x",
            Node::ArrayLit(vec![num(1.0), num(2.0), num(3.0), num(4.0)]),
            compound(vec![
                if_then(bin(BinaryOp::Equals, var("x"), num(2.0)), Node::Continue),
                if_then(bin(BinaryOp::Equals, var("x"), num(4.0)), Node::Break),
                set("sum", bin(BinaryOp::Add, var("sum"), var("x"))),
            ]),
        ),
    ]);

    // 1 counted, 2 skipped, 3 counted, 4 breaks before counting.
    let (_, env) = run(&program);
    assert_eq!(env.get("sum"), Some(&Value::number(4.0)));
}

// ═══════════════════════════════════════════════════════════════════════
// Nesting
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_break_only_exits_the_innermost_loop() {
    let program = compound(vec![
        set("outer_count", num(0.0)),
        for_loop(
            "i",
            Node::ArrayLit(vec![num(1.0), num(2.0), num(3.0)]),
            compound(vec![
                set(
                    "outer_count",
                    bin(BinaryOp::Add, var("outer_count"), num(1.0)),
                ),
                while_loop(Node::BoolLit(true), Node::Break),
            ]),
        ),
    ]);

    let (_, env) = run(&program);
    assert_eq!(env.get("outer_count"), Some(&Value::number(3.0)));
}

#[test]
fn test_return_unwinds_through_nested_loops() {
    let inner = for_loop(
        "j",
        Node::ArrayLit(vec![num(10.0), num(20.0)]),
        Node::Return(Some(Box::new(var("j")))),
    );
    let body = for_loop("i", Node::ArrayLit(vec![num(1.0), num(2.0)]), inner);

    let program = compound(vec![
        Node::FnDef {
            name: "first".to_string(),
            params: vec![],
            body: Rc::new(body),
        },
        Node::Call {
            name: "first".to_string(),
            args: vec![],
        },
    ]);

    let (result, _) = run(&program);
    assert_eq!(result, Value::number(10.0));
}
