//! Compound value payloads: functions, errors, classes, instances, and
//! the priority-queue heap.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::Node;

use super::Value;

/// A user-defined function: its name, parameter list, and body.
///
/// The body is shared (`Rc`) so the profiler can hold a cached handle to it
/// without copying the tree.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    /// Function name, used for scope lookup and diagnostics.
    pub name: String,

    /// Parameter names in declaration order. Calls must supply exactly
    /// this many arguments.
    pub params: Vec<String>,

    /// The function body.
    pub body: Rc<Node>,
}

impl FunctionValue {
    /// Create a function value.
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Rc<Node>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A recoverable semantic failure carried as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    /// Human-readable description of the failure.
    pub message: String,

    /// Numeric error code; operator-layer errors use `-1`.
    pub code: i32,
}

impl ErrorValue {
    /// Create an error payload.
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// A class definition: named method table, optional parent class, and an
/// optional constructor.
#[derive(Debug)]
pub struct ClassValue {
    /// Class name.
    pub name: String,

    /// Name of the parent class, if declared. The parent handle itself is
    /// attached separately via [`ClassValue::set_parent`] once resolved.
    pub parent_name: Option<String>,

    parent: RefCell<Option<Value>>,
    methods: RefCell<IndexMap<String, Value>>,
    constructor: RefCell<Option<Value>>,
}

impl ClassValue {
    /// Create an empty class.
    pub fn new(name: impl Into<String>, parent_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent_name,
            parent: RefCell::new(None),
            methods: RefCell::new(IndexMap::new()),
            constructor: RefCell::new(None),
        }
    }

    /// Attach the resolved parent class. Panics if the handle is not a
    /// class value; hierarchies are acyclic by construction (a parent never
    /// references a subclass), so the link can be a plain strong handle.
    pub fn set_parent(&self, parent: Value) {
        assert!(
            matches!(parent, Value::Class(_)),
            "class parent must be a class value"
        );
        *self.parent.borrow_mut() = Some(parent);
    }

    /// The resolved parent class, if attached.
    pub fn parent(&self) -> Option<Value> {
        self.parent.borrow().clone()
    }

    /// Add or overwrite a method.
    pub fn add_method(&self, name: impl Into<String>, method: Value) {
        self.methods.borrow_mut().insert(name.into(), method);
    }

    /// Look up a method, walking the parent chain on miss.
    pub fn get_method(&self, name: &str) -> Option<Value> {
        if let Some(method) = self.methods.borrow().get(name) {
            return Some(method.clone());
        }
        match self.parent.borrow().as_ref() {
            Some(Value::Class(parent)) => parent.get_method(name),
            _ => None,
        }
    }

    /// Names of the methods defined directly on this class.
    pub fn method_names(&self) -> Vec<String> {
        self.methods.borrow().keys().cloned().collect()
    }

    /// Set the constructor.
    pub fn set_constructor(&self, constructor: Value) {
        *self.constructor.borrow_mut() = Some(constructor);
    }

    /// The constructor, if one was set.
    pub fn constructor(&self) -> Option<Value> {
        self.constructor.borrow().clone()
    }
}

/// An instance of a class: a handle to its definition plus a property map.
#[derive(Debug)]
pub struct InstanceValue {
    /// The defining class (always a `Value::Class`).
    pub class: Value,

    properties: RefCell<IndexMap<String, Value>>,
}

impl InstanceValue {
    /// Create an instance of `class`.
    pub fn new(class: Value) -> Self {
        Self {
            class,
            properties: RefCell::new(IndexMap::new()),
        }
    }

    /// Name of the defining class.
    pub fn class_name(&self) -> String {
        match &self.class {
            Value::Class(c) => c.name.clone(),
            _ => String::new(),
        }
    }

    /// Set or overwrite a property.
    pub fn set_property(&self, name: impl Into<String>, value: Value) {
        self.properties.borrow_mut().insert(name.into(), value);
    }

    /// Look up a property; falls back to the class method table (and its
    /// ancestors) on miss.
    pub fn get_property(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.properties.borrow().get(name) {
            return Some(value.clone());
        }
        match &self.class {
            Value::Class(c) => c.get_method(name),
            _ => None,
        }
    }

    /// Names of the properties set directly on this instance.
    pub fn property_names(&self) -> Vec<String> {
        self.properties.borrow().keys().cloned().collect()
    }
}

/// One entry of a priority queue.
#[derive(Debug, Clone)]
pub struct PriorityItem {
    /// The queued value.
    pub value: Value,

    /// Priority; higher pops first.
    pub priority: f64,
}

/// A binary max-heap over (value, priority) pairs.
///
/// Backed by a flat array with the usual sift-up/sift-down maintenance.
/// Equal priorities pop in arbitrary order.
#[derive(Debug, Default)]
pub struct PriorityQueueValue {
    items: Vec<PriorityItem>,
}

impl PriorityQueueValue {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert an item. O(log n).
    pub fn push(&mut self, value: Value, priority: f64) {
        self.items.push(PriorityItem { value, priority });
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the maximum-priority item. O(log n).
    pub fn pop(&mut self) -> Option<Value> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let top = self.items.pop().map(|item| item.value);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// The maximum-priority item without removing it.
    pub fn peek(&self) -> Option<Value> {
        self.items.first().map(|item| item.value.clone())
    }

    /// The items in internal heap order (not sorted order).
    pub fn items(&self) -> &[PriorityItem] {
        &self.items
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index].priority <= self.items[parent].priority {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut largest = index;
            if left < len && self.items[left].priority > self.items[largest].priority {
                largest = left;
            }
            if right < len && self.items[right].priority > self.items[largest].priority {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.items.swap(index, largest);
            index = largest;
        }
    }
}
