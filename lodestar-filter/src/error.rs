//! Error types for filter evaluation

use lodestar_core::{CoercionError, TermError};
use thiserror::Error;

/// Filter evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Operand kind or datatype is invalid for the operation
    #[error("Type Error: {0}")]
    TypeError(String),

    /// A scalar value was requested from an IRI or blank node
    #[error("Not a literal: {0}")]
    NotLiteral(String),

    /// The current row has no value for a column
    #[error("Unbound column: {0}")]
    UnboundColumn(String),

    /// A variable could not be resolved against the context
    #[error("Resolving unbound variable: {0}")]
    UnboundVariable(String),

    /// No resolver knows the external function
    #[error("Unresolved function: {name}/{arity}")]
    UnresolvedFunction { name: String, arity: usize },

    /// An external function was found but failed while running
    #[error("Error invoking {name}: {message}")]
    InvocationFailure { name: String, message: String },

    /// Malformed expression tree (arity, regex syntax, flags)
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Failure reported by the row context collaborator
    #[error("Context error: {0}")]
    Context(String),
}

impl FilterError {
    pub fn type_error(msg: impl Into<String>) -> Self {
        FilterError::TypeError(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        FilterError::InvalidFilter(msg.into())
    }

    /// True for errors that mean "operand of the wrong kind"
    pub fn is_type_error(&self) -> bool {
        matches!(self, FilterError::TypeError(_) | FilterError::NotLiteral(_))
    }

    /// True for either flavour of missing binding
    pub fn is_unbound(&self) -> bool {
        matches!(
            self,
            FilterError::UnboundColumn(_) | FilterError::UnboundVariable(_)
        )
    }
}

impl From<TermError> for FilterError {
    fn from(err: TermError) -> Self {
        match err {
            TermError::TypeError(msg) => FilterError::TypeError(msg),
            TermError::NotLiteral(msg) => FilterError::NotLiteral(msg),
            TermError::Arithmetic(e) => FilterError::TypeError(e.to_string()),
        }
    }
}

impl From<CoercionError> for FilterError {
    fn from(err: CoercionError) -> Self {
        FilterError::TypeError(err.message)
    }
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
