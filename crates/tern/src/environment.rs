//! Runtime environment managing variable and function bindings.

mod frame;

pub use frame::ScopeGuard;

use std::rc::Rc;

use crate::value::{FunctionValue, Value};

/// A single variable binding.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The binding's name.
    pub name: String,

    /// The bound value.
    pub value: Value,
}

/// Start indices of one scope frame into the flat binding stores.
#[derive(Debug, Clone, Copy)]
struct FrameMark {
    bindings: usize,
    functions: usize,
}

/// The runtime environment: variable and function bindings with lexical
/// lookup.
///
/// Uses a flat design with frame boundaries — entering a scope records the
/// current store lengths, leaving it truncates back to them. Lookup walks
/// the stores backwards, so inner bindings shadow outer ones.
///
/// # Example
///
/// ```
/// use tern::{Environment, Value};
///
/// let mut env = Environment::new();
/// env.define("x", Value::number(1.0));
///
/// env.push_frame();
/// env.define("x", Value::number(10.0)); // Shadows outer x
/// assert_eq!(env.get("x"), Some(&Value::number(10.0)));
///
/// env.pop_frame();
/// assert_eq!(env.get("x"), Some(&Value::number(1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// All variable bindings in a flat array (most recent at the end).
    bindings: Vec<Binding>,

    /// All function definitions, likewise flat.
    functions: Vec<(String, Rc<FunctionValue>)>,

    /// Frame boundaries; the first entry is the global scope.
    frames: Vec<FrameMark>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a new empty environment with a global scope.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            functions: Vec::new(),
            frames: vec![FrameMark {
                bindings: 0,
                functions: 0,
            }],
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management (Scope Entry/Exit)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a new scope. Bindings defined after this call disappear when
    /// the matching [`pop_frame`](Self::pop_frame) runs.
    pub fn push_frame(&mut self) {
        self.frames.push(FrameMark {
            bindings: self.bindings.len(),
            functions: self.functions.len(),
        });
    }

    /// Exit the current scope. Never pops the global frame.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            if let Some(mark) = self.frames.pop() {
                self.bindings.truncate(mark.bindings);
                self.functions.truncate(mark.functions);
            }
        }
    }

    /// Current scope depth (number of frames).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether we're at global scope.
    pub fn is_global_scope(&self) -> bool {
        self.frames.len() == 1
    }

    // ═══════════════════════════════════════════════════════════════════
    // Variable Bindings
    // ═══════════════════════════════════════════════════════════════════

    /// Define a new binding in the current scope, shadowing any existing
    /// binding with the same name.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.push(Binding {
            name: name.into(),
            value,
        });
    }

    /// Update the existing binding for `name` anywhere in the chain, or
    /// define it in the current scope when absent.
    ///
    /// This is the semantics of a `set` statement, and it is what makes a
    /// while loop's body mutations visible to its condition: both run in
    /// the same scope instance and write the same binding.
    pub fn assign_or_define(&mut self, name: &str, value: Value) {
        match self.bindings.iter_mut().rev().find(|b| b.name == name) {
            Some(binding) => binding.value = value,
            None => self.define(name, value),
        }
    }

    /// Look up a binding by name, most recent first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    /// Whether a binding exists anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|b| b.name == name)
    }

    /// Whether a binding exists in the innermost scope only.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        let start = self.frames.last().map(|m| m.bindings).unwrap_or(0);
        self.bindings[start..].iter().any(|b| b.name == name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Function Definitions
    // ═══════════════════════════════════════════════════════════════════

    /// Register a function definition in the current scope.
    pub fn define_function(&mut self, function: Rc<FunctionValue>) {
        self.functions.push((function.name.clone(), function));
    }

    /// Look up a function definition by name, most recent first.
    pub fn get_function(&self, name: &str) -> Option<Rc<FunctionValue>> {
        self.functions
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, f)| Rc::clone(f))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Iterate over all variable bindings (for debugging).
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Binding names in the innermost scope.
    pub fn names_in_current_scope(&self) -> Vec<&str> {
        let start = self.frames.last().map(|m| m.bindings).unwrap_or(0);
        self.bindings[start..]
            .iter()
            .map(|b| b.name.as_str())
            .collect()
    }

    /// Total number of variable bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Reset to the initial state.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.functions.clear();
        self.frames = vec![FrameMark {
            bindings: 0,
            functions: 0,
        }];
    }
}
