//! Tree-walking evaluator for Tern programs.
//!
//! The [`Evaluator`] owns everything that outlives a single node visit:
//! the call stack, the per-function profiling table, the exception slot,
//! execution counters, and the tunables in [`EvalContext`]. Dispatch is a
//! single `match` over the node kind; the per-family handlers live in
//! [`eval`](crate::eval).

use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::ast::Node;
use crate::builtins::NativeFn;
use crate::context::EvalContext;
use crate::environment::Environment;
use crate::error::{Exception, ExceptionState};
use crate::eval::{self, EvalResult, Flow};
use crate::value::{FunctionValue, Value};

/// How the evaluator is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Standard interpretation.
    Interpreted,
    /// Profiling is on; call counts and timings are being collected.
    Cached,
    /// At least one hot function has a cached body installed.
    Optimized,
}

/// One in-flight user-function invocation.
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Name of the function being executed.
    pub function_name: String,

    /// Snapshot of the evaluated arguments.
    pub arguments: Vec<Value>,

    /// Call depth at entry (0 for a top-level call).
    pub depth: usize,

    started: Instant,
}

impl CallFrame {
    /// Create a frame for a call entered at `depth`.
    pub fn new(function_name: &str, arguments: Vec<Value>, depth: usize) -> Self {
        Self {
            function_name: function_name.to_string(),
            arguments,
            depth,
            started: Instant::now(),
        }
    }
}

/// Profiling record for one function, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FunctionProfile {
    /// Completed invocations.
    pub execution_count: u64,

    /// Cumulative wall-clock time across invocations.
    pub total_execution_time: Duration,

    /// Whether the invocation count has reached the hot threshold.
    pub is_hot: bool,

    /// Cached body installed by [`Evaluator::optimize_hot_function`].
    /// Always semantically identical to the function's own body.
    pub cached_body: Option<Rc<Node>>,
}

impl FunctionProfile {
    /// Average wall-clock time per invocation.
    pub fn average_time(&self) -> Duration {
        if self.execution_count == 0 {
            Duration::ZERO
        } else {
            self.total_execution_time / self.execution_count as u32
        }
    }
}

/// Running totals collected during evaluation.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    /// Nodes visited.
    pub instructions_executed: u64,

    /// Values allocated for literals and container builds.
    pub allocations: u64,

    /// Hot-body cache hits.
    pub cache_hits: u64,

    /// Hot-body cache misses.
    pub cache_misses: u64,

    /// Cumulative wall-clock time spent inside user functions.
    pub total_execution_time: Duration,
}

/// Independently-toggleable optimization passes. All default off; none of
/// them is required for correctness, and the constant-folding toggle in
/// particular enables no transformation today.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimizations {
    /// Tail-call optimization.
    pub tail_call: bool,

    /// Constant folding.
    pub constant_folding: bool,

    /// Dead-code elimination.
    pub dead_code_elimination: bool,

    /// Inlining of small functions.
    pub inline_small_functions: bool,
}

const DEFAULT_HOT_FUNCTION_THRESHOLD: usize = 100;

/// The tree-walking evaluator.
pub struct Evaluator {
    mode: ExecutionMode,
    ctx: EvalContext,
    natives: HashMap<String, NativeFn>,

    call_stack: Vec<CallFrame>,

    profiles: HashMap<String, FunctionProfile>,
    profiling_enabled: bool,
    hot_function_threshold: usize,
    optimizations: Optimizations,

    exception: Option<ExceptionState>,
    stats: ExecutionStats,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator with default context settings.
    pub fn new() -> Self {
        Self::with_context(EvalContext::default())
    }

    /// Create an evaluator with the given context.
    pub fn with_context(ctx: EvalContext) -> Self {
        Self {
            mode: ExecutionMode::Interpreted,
            ctx,
            natives: HashMap::new(),
            call_stack: Vec::new(),
            profiles: HashMap::new(),
            profiling_enabled: false,
            hot_function_threshold: DEFAULT_HOT_FUNCTION_THRESHOLD,
            optimizations: Optimizations::default(),
            exception: None,
            stats: ExecutionStats::default(),
        }
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Current execution mode.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    // ═══════════════════════════════════════════════════════════════════
    // Dispatch
    // ═══════════════════════════════════════════════════════════════════

    /// Visit one node and produce its value.
    ///
    /// While an exception is active (or cancellation was requested),
    /// visiting is a no-op yielding null — evaluation does not proceed
    /// past a raised exception until it is explicitly cleared.
    pub fn visit(&mut self, node: &Node, env: &mut Environment) -> EvalResult {
        if self.exception.is_some() || self.ctx.is_interrupted() {
            return Ok(Value::Null);
        }
        self.stats.instructions_executed += 1;

        match node {
            Node::Compound(statements) => {
                let mut last = Value::Null;
                for statement in statements {
                    last = self.visit(statement, env)?;
                }
                Ok(last)
            }

            Node::Noop => Ok(Value::Null),

            Node::StringLit(s) => {
                self.stats.allocations += 1;
                Ok(Value::string(s.clone()))
            }
            Node::NumberLit(n) => Ok(Value::number(*n)),
            Node::BoolLit(b) => Ok(Value::boolean(*b)),
            Node::NullLit => Ok(Value::Null),
            Node::UndecidableLit => Ok(Value::Undecidable),

            Node::ArrayLit(elements) => {
                self.stats.allocations += 1;
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.visit(element, env)?);
                }
                Ok(Value::array(items))
            }

            Node::ObjectLit(pairs) => {
                self.stats.allocations += 1;
                let object = Value::object();
                for (key, value_node) in pairs {
                    let value = self.visit(value_node, env)?;
                    object.object_set(key, value);
                }
                Ok(object)
            }

            Node::VarDef { name, value } => {
                let value = self.visit(value, env)?;
                env.assign_or_define(name, value.add_ref());
                Ok(value)
            }

            Node::FnDef { name, params, body } => {
                let function = Rc::new(FunctionValue::new(
                    name.clone(),
                    params.clone(),
                    Rc::clone(body),
                ));
                env.define_function(Rc::clone(&function));
                Ok(Value::Function(function))
            }

            Node::Var(name) => match env.get(name) {
                // The stored value itself, not a copy: callers share the
                // binding's datum.
                Some(value) => Ok(value.add_ref()),
                None => {
                    tracing::warn!(variable = %name, "undefined variable");
                    Ok(Value::Null)
                }
            },

            Node::Call { name, args } => eval::call::eval_call(self, name, args, env),

            Node::Binary { op, left, right } => {
                eval::binary::eval_binary(self, *op, left, right, env)
            }

            Node::Unary { op, operand } => eval::unary::eval_unary(self, *op, operand, env),

            Node::Property { base, name } => eval::field::eval_property(self, base, name, env),

            Node::If {
                cond,
                then_branch,
                else_branch,
            } => eval::branch::eval_if(self, cond, then_branch, else_branch.as_deref(), env),

            Node::While { cond, body } => eval::loops::eval_while(self, cond, body, env),

            Node::For {
                var,
                iterable,
                body,
            } => eval::loops::eval_for(self, var, iterable, body, env),

            Node::Break => Err(Flow::Break),
            Node::Continue => Err(Flow::Continue),

            Node::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.visit(expr, env)?,
                    None => Value::Null,
                };
                Err(Flow::Return(value))
            }

            Node::LogicalStatement(_) | Node::MathematicalStatement(_) => Ok(Value::Null),
        }
    }

    /// Evaluate a whole program, absorbing any top-level control flow.
    pub fn run(&mut self, program: &Node, env: &mut Environment) -> Value {
        match self.visit(program, env) {
            Ok(value) => value,
            Err(Flow::Return(value)) => value,
            Err(_) => Value::Null,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Native Functions
    // ═══════════════════════════════════════════════════════════════════

    /// Register a host stdlib function under the given name.
    pub fn register_native(&mut self, name: impl Into<String>, function: NativeFn) {
        self.natives.insert(name.into(), function);
    }

    pub(crate) fn native(&self, name: &str) -> Option<NativeFn> {
        self.natives.get(name).copied()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Stack
    // ═══════════════════════════════════════════════════════════════════

    /// Current user-function call depth.
    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }

    pub(crate) fn push_call_frame(&mut self, frame: CallFrame) {
        self.call_stack.push(frame);
    }

    pub(crate) fn pop_call_frame(&mut self) {
        if let Some(frame) = self.call_stack.pop() {
            let elapsed = frame.started.elapsed();
            self.stats.total_execution_time += elapsed;

            if self.profiling_enabled {
                let threshold = self.hot_function_threshold as u64;
                let profile = self.profiles.entry(frame.function_name).or_default();
                profile.execution_count += 1;
                profile.total_execution_time += elapsed;
                profile.is_hot = profile.execution_count >= threshold;
            }
        }
    }

    /// The body to execute for `function`: the profiler's cached body
    /// when one is installed, the function's own otherwise.
    pub(crate) fn body_for(&mut self, function: &Rc<FunctionValue>) -> Rc<Node> {
        if self.profiling_enabled {
            if let Some(cached) = self
                .profiles
                .get(&function.name)
                .and_then(|profile| profile.cached_body.clone())
            {
                self.stats.cache_hits += 1;
                return cached;
            }
            self.stats.cache_misses += 1;
        }
        Rc::clone(&function.body)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Profiling and Optimization
    // ═══════════════════════════════════════════════════════════════════

    /// Turn profiling on or off.
    pub fn enable_profiling(&mut self, enabled: bool) {
        self.profiling_enabled = enabled;
        if enabled && self.mode == ExecutionMode::Interpreted {
            self.mode = ExecutionMode::Cached;
        }
    }

    /// Number of invocations after which a function counts as hot.
    pub fn set_hot_function_threshold(&mut self, threshold: usize) {
        self.hot_function_threshold = threshold;
    }

    /// The profiling record for a function, if any calls were profiled.
    pub fn profile(&self, name: &str) -> Option<&FunctionProfile> {
        self.profiles.get(name)
    }

    /// Install a cached body for a hot function. Returns false when the
    /// function is unknown, unprofiled, or not hot yet. The cache stores
    /// the body unchanged, so execution results are identical with or
    /// without it.
    pub fn optimize_hot_function(&mut self, name: &str, env: &Environment) -> bool {
        let Some(function) = env.get_function(name) else {
            return false;
        };
        let Some(profile) = self.profiles.get_mut(name) else {
            return false;
        };
        if !profile.is_hot {
            return false;
        }
        profile.cached_body = Some(Rc::clone(&function.body));
        self.mode = ExecutionMode::Optimized;
        true
    }

    /// Toggle the optimization passes. All are off by default and none is
    /// required for correctness.
    pub fn enable_optimizations(&mut self, optimizations: Optimizations) {
        self.optimizations = optimizations;
    }

    /// The current optimization toggles.
    pub fn optimizations(&self) -> Optimizations {
        self.optimizations
    }

    // ═══════════════════════════════════════════════════════════════════
    // Exception Protocol
    // ═══════════════════════════════════════════════════════════════════

    /// Raise an exception. Subsequent visits are no-ops until it is
    /// cleared.
    pub fn throw_exception(&mut self, value: Value, exception: Exception, location: &str) {
        tracing::debug!(%exception, location, "exception raised");
        self.exception = Some(ExceptionState {
            exception,
            value,
            location: location.to_string(),
        });
    }

    /// Whether an exception is currently active.
    pub fn has_exception(&self) -> bool {
        self.exception.is_some()
    }

    /// The active exception, if any.
    pub fn exception(&self) -> Option<&ExceptionState> {
        self.exception.as_ref()
    }

    /// Clear and return the active exception.
    pub fn clear_exception(&mut self) -> Option<ExceptionState> {
        self.exception.take()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Execution Stats
    // ═══════════════════════════════════════════════════════════════════

    /// Running totals collected so far.
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Human-readable one-line stats report.
    pub fn stats_report(&self) -> String {
        format!(
            "instructions={} allocations={} cache_hits={} cache_misses={} total_time={:?} profiles={}",
            self.stats.instructions_executed,
            self.stats.allocations,
            self.stats.cache_hits,
            self.stats.cache_misses,
            self.stats.total_execution_time,
            self.profiles.len(),
        )
    }
}
