//! # lodestar-filter
//!
//! Row-at-a-time evaluation of RDF filter and value expressions.
//!
//! An [`Expression`] tree is built once, bound to the engine's row cursor
//! through the [`Context`] trait, and evaluated for each row the engine
//! positions:
//!
//! - [`Filter::test`] evaluates to an effective boolean value
//! - [`Expression::eval`] computes a term for projection
//!
//! Boolean operators follow three-valued logic over `Result<bool>`, so an
//! error in one branch of an `||` is discarded when another branch is true.
//!
//! Functions the evaluator does not know are dispatched through a
//! [`FunctionRegistry`] of pluggable [`FunctionResolver`]s.
//!
//! Trees hold per-node mutable state (bound context, regex cache) without
//! locking and are not `Sync`. Clone a tree per worker.

pub mod context;
pub mod error;
pub mod expression;
pub mod external;
pub mod filter;
pub mod ir;
pub mod options;

pub use context::{Context, MemoryContext, NodeId, UNBOUND};
pub use error::{FilterError, Result};
pub use expression::logical::{and_law, or_law};
pub use expression::rdf::lang_matches;
pub use expression::PatternCache;
pub use external::{
    ExternalCall, ExternalFunction, FunctionRegistry, FunctionResolver, InvocationError,
    InvocationResult, NativeValue, StaticResolver,
};
pub use filter::Filter;
pub use ir::{Expression, Function, Var};
pub use options::FilterOptions;

pub use lodestar_core::Term;
