//! Error types for lodestar-core

use thiserror::Error;

/// Result type alias using [`TermError`]
pub type Result<T> = std::result::Result<T, TermError>;

/// Errors raised by operations on the term model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TermError {
    /// Operand kind or datatype is invalid for the requested operation
    #[error("Type Error: {0}")]
    TypeError(String),

    /// A scalar value was requested from a non-literal term
    #[error("Not a literal: {0}")]
    NotLiteral(String),

    /// Numeric operation failed
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl TermError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        TermError::TypeError(msg.into())
    }

    /// Create a not-a-literal error
    pub fn not_literal(msg: impl Into<String>) -> Self {
        TermError::NotLiteral(msg.into())
    }
}

/// Errors from arithmetic on numeric literals
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Division by zero
    #[error("division by zero")]
    DivideByZero,

    /// Integer overflow
    #[error("integer overflow")]
    Overflow,

    /// Operand is not numeric
    #[error("{operator} requires numeric operands, got {left_type} and {right_type}")]
    TypeMismatch {
        operator: &'static str,
        left_type: &'static str,
        right_type: &'static str,
    },
}
