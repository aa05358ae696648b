//! # lodestar-core
//!
//! The RDF term model the filter engine evaluates over:
//!
//! - [`Term`]: IRIs, blank nodes, simple and typed literals
//! - [`Value`]: the eagerly parsed native value of a typed literal
//! - [`datatypes`]: the per-datatype parse and truth table
//! - [`compare`]: ordering and RDF term equality
//! - [`arithmetic`]: numeric operators with type promotion
//! - [`coerce`]: casting a term to another datatype

pub mod arithmetic;
pub mod coerce;
pub mod compare;
pub mod datatypes;
pub mod error;
pub mod temporal;
pub mod term;
pub mod value;

pub use arithmetic::ArithmeticOp;
pub use coerce::{CoercionError, CoercionResult};
pub use datatypes::{type_info, NativeKind, TypeInfo};
pub use error::{ArithmeticError, Result, TermError};
pub use temporal::DateTime;
pub use term::{Term, TypedLiteral};
pub use value::Value;
