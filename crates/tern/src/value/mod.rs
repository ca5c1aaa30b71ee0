//! Value representation for Tern runtime values.
//!
//! A [`Value`] is the universal runtime datum: a tagged union of thirteen
//! kinds, reference-counted so that arrays, objects, and instances can be
//! shared without copying. The runtime is single-threaded by design, so
//! handles are plain `Rc` (no atomics) and containers use `RefCell` for
//! in-place mutation.

mod collections;
mod compound;
mod display;
mod hashable;
mod impls;

pub use compound::{
    ClassValue, ErrorValue, FunctionValue, InstanceValue, PriorityItem, PriorityQueueValue,
};
pub use hashable::HashableValue;

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

/// Runtime value for the Tern interpreter.
///
/// Kinds fall into two tiers:
/// - Inline primitives (no allocation): null, boolean, undecidable, number
/// - Heap-allocated, reference-counted payloads: everything else
///
/// Cloning a `Value` clones the *handle* (an added reference), never the
/// payload; use [`Value::deep_copy`] for an independent copy.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value.
    Null,

    /// `true` or `false`.
    Boolean(bool),

    /// The third truth state, distinct from both booleans and null.
    Undecidable,

    /// IEEE-754 double; the only numeric type.
    Number(f64),

    /// Immutable UTF-8 string.
    String(Rc<String>),

    /// Ordered, growable sequence of values.
    Array(Rc<RefCell<Vec<Value>>>),

    /// Ordered string-keyed map; keys are unique and keep their first
    /// insertion position across overwrites.
    Object(Rc<RefCell<IndexMap<String, Value>>>),

    /// User-defined function (name, parameters, body).
    Function(Rc<FunctionValue>),

    /// Recoverable semantic failure: message plus numeric code.
    Error(Rc<ErrorValue>),

    /// Class definition: methods, optional parent, optional constructor.
    Class(Rc<ClassValue>),

    /// Instance of a class with its own property map.
    Instance(Rc<InstanceValue>),

    /// Hash-backed collection of unique values. Iteration order is an
    /// implementation detail; callers must treat it as unspecified.
    Set(Rc<RefCell<IndexSet<HashableValue>>>),

    /// Binary max-heap of (value, priority) pairs. Ties in priority are
    /// broken arbitrarily.
    PriorityQueue(Rc<RefCell<PriorityQueueValue>>),
}

/// Discriminant of a [`Value`], without any payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Null.
    Null,
    /// Boolean.
    Boolean,
    /// Undecidable.
    Undecidable,
    /// Number.
    Number,
    /// String.
    String,
    /// Array.
    Array,
    /// Object.
    Object,
    /// Function.
    Function,
    /// Error.
    Error,
    /// Class.
    Class,
    /// Instance.
    Instance,
    /// Set.
    Set,
    /// Priority queue.
    PriorityQueue,
}

impl ValueKind {
    /// Canonical lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Undecidable => "undecidable",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Function => "function",
            ValueKind::Error => "error",
            ValueKind::Class => "class",
            ValueKind::Instance => "instance",
            ValueKind::Set => "set",
            ValueKind::PriorityQueue => "priority_queue",
        }
    }
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Undecidable => ValueKind::Undecidable,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Function(_) => ValueKind::Function,
            Value::Error(_) => ValueKind::Error,
            Value::Class(_) => ValueKind::Class,
            Value::Instance(_) => ValueKind::Instance,
            Value::Set(_) => ValueKind::Set,
            Value::PriorityQueue(_) => ValueKind::PriorityQueue,
        }
    }

    /// Canonical lowercase name of this value's kind.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}
