//! Expression evaluation
//!
//! - [`eval`]: `Expression::eval`, `eval_to_bool`, `try_eval`
//! - [`dispatch`]: routes each [`Function`](crate::ir::Function) to its implementation
//! - [`logical`]: three-valued AND / OR, NOT, inverse, IN
//! - [`compare`]: relational operators, equality and sameTerm
//! - [`arithmetic`]: numeric operators
//! - [`rdf`]: term accessors, kind tests and langMatches
//! - [`string`]: regex with its pattern cache
//! - [`cast`]: datatype casts and external function calls

pub mod arithmetic;
pub mod cast;
pub mod compare;
mod dispatch;
mod eval;
pub(crate) mod helpers;
pub mod logical;
pub mod rdf;
pub mod string;

pub use string::PatternCache;
