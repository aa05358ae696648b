//! External function dispatch
//!
//! Functions the evaluator does not implement itself are looked up by
//! qualified name and arity through a [`FunctionRegistry`]. A registry holds
//! an ordered list of [`FunctionResolver`]s and memoizes successful lookups in
//! an LRU cache.
//!
//! An [`ExternalCall`] is the per-node state for one call site: it resolves
//! its function at most once and remembers if the function has failed for
//! good, so a broken call path is not retried on every row.

use crate::error::{FilterError, Result};
use crate::options::FilterOptions;
use bigdecimal::BigDecimal;
use lodestar_core::{DateTime, Term};
use lru::LruCache;
use once_cell::unsync::OnceCell;
use parking_lot::Mutex;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;

/// Native result of an external function
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Uri(String),
    String(String),
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    DateTime(DateTime),
}

impl NativeValue {
    /// Wrap into a term: URIs become IRIs, everything else a typed literal
    pub fn into_term(self) -> Term {
        match self {
            NativeValue::Uri(u) => Term::iri(u),
            NativeValue::String(s) => Term::string(&s),
            NativeValue::Boolean(b) => Term::from(b),
            NativeValue::Int(n) => Term::from(n),
            NativeValue::Long(n) => Term::from(n),
            NativeValue::Float(f) => Term::from(f),
            NativeValue::Double(d) => Term::from(d),
            NativeValue::Decimal(d) => Term::from(d),
            NativeValue::DateTime(dt) => Term::from(dt),
        }
    }
}

/// Failure raised by an external function
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvocationError {
    /// The function exists by name but cannot accept these arguments.
    /// Retrying will never succeed.
    #[error("no applicable method: {0}")]
    NoSuchMethod(String),

    /// The function ran and failed
    #[error("{0}")]
    Failed(String),
}

impl InvocationError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, InvocationError::NoSuchMethod(_))
    }
}

/// Result of invoking an external function
pub type InvocationResult = std::result::Result<NativeValue, InvocationError>;

/// An invocable external function
pub trait ExternalFunction: Send + Sync {
    fn invoke(&self, args: &[Term]) -> InvocationResult;
}

impl<F> ExternalFunction for F
where
    F: Fn(&[Term]) -> InvocationResult + Send + Sync,
{
    fn invoke(&self, args: &[Term]) -> InvocationResult {
        self(args)
    }
}

/// Maps a qualified function name and arity to an implementation
pub trait FunctionResolver: Send + Sync {
    fn resolve(&self, name: &str, arity: usize) -> Option<Arc<dyn ExternalFunction>>;
}

/// Resolver over a fixed table of registered functions
#[derive(Default)]
pub struct StaticResolver {
    functions: HashMap<(String, usize), Arc<dyn ExternalFunction>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        function: Arc<dyn ExternalFunction>,
    ) {
        self.functions.insert((name.into(), arity), function);
    }

    /// Register a closure
    pub fn register_fn<F>(&mut self, name: impl Into<String>, arity: usize, function: F)
    where
        F: Fn(&[Term]) -> InvocationResult + Send + Sync + 'static,
    {
        self.register(name, arity, Arc::new(function));
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FunctionResolver for StaticResolver {
    fn resolve(&self, name: &str, arity: usize) -> Option<Arc<dyn ExternalFunction>> {
        self.functions.get(&(name.to_string(), arity)).cloned()
    }
}

/// Ordered resolver chain with a shared lookup cache.
///
/// Safe to share between trees; the cache is behind a mutex.
pub struct FunctionRegistry {
    resolvers: Vec<Arc<dyn FunctionResolver>>,
    cache: Mutex<LruCache<(String, usize), Arc<dyn ExternalFunction>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::with_options(&FilterOptions::default())
    }

    pub fn with_options(options: &FilterOptions) -> Self {
        let capacity =
            NonZeroUsize::new(options.function_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            resolvers: Vec::new(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Append a resolver; earlier resolvers win
    pub fn add_resolver(&mut self, resolver: impl FunctionResolver + 'static) {
        self.resolvers.push(Arc::new(resolver));
    }

    /// Resolve `name/arity`, consulting the cache first
    pub fn lookup(&self, name: &str, arity: usize) -> Result<Arc<dyn ExternalFunction>> {
        let key = (name.to_string(), arity);
        if let Some(found) = self.cache.lock().get(&key) {
            return Ok(Arc::clone(found));
        }
        let found = self
            .resolvers
            .iter()
            .find_map(|r| r.resolve(name, arity))
            .ok_or_else(|| FilterError::UnresolvedFunction {
                name: name.to_string(),
                arity,
            })?;
        self.cache.lock().put(key, Arc::clone(&found));
        Ok(found)
    }

    /// Number of cached lookups
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("resolvers", &self.resolvers.len())
            .field("cached", &self.cached())
            .finish()
    }
}

/// Call-site state for one external function node
#[derive(Clone)]
pub struct ExternalCall {
    name: Arc<str>,
    registry: Arc<FunctionRegistry>,
    resolved: OnceCell<Option<Arc<dyn ExternalFunction>>>,
    failed: Cell<bool>,
}

impl ExternalCall {
    pub fn new(name: impl Into<Arc<str>>, registry: Arc<FunctionRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
            resolved: OnceCell::new(),
            failed: Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once an invocation failed in a way that cannot recover
    pub fn is_failed(&self) -> bool {
        self.failed.get()
    }

    pub(crate) fn mark_failed(&self) {
        self.failed.set(true);
    }

    /// Resolve this call site once; `None` if no resolver knows the function
    pub(crate) fn function(&self, arity: usize) -> Option<&Arc<dyn ExternalFunction>> {
        self.resolved
            .get_or_init(|| match self.registry.lookup(&self.name, arity) {
                Ok(f) => Some(f),
                Err(e) => {
                    tracing::debug!(function = %self.name, arity, error = %e, "external function not resolved");
                    None
                }
            })
            .as_ref()
    }
}

impl fmt::Debug for ExternalCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalCall")
            .field("name", &self.name)
            .field("failed", &self.failed.get())
            .finish()
    }
}
