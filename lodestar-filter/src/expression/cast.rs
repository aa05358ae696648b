//! Casts and external function calls
//!
//! A cast parses the operand's lexical form with the target datatype's parser.
//! Parse and range failures surface as type errors.
//!
//! External calls are resolved through the node's registry. A function no
//! resolver knows evaluates to `false`; a function that fails while running
//! raises `InvocationFailure`, and a permanent failure short-circuits every
//! later evaluation of the same node to `false`.

use crate::error::{FilterError, Result};
use crate::external::ExternalCall;
use crate::ir::Expression;
use lodestar_core::{coerce, Term};

use super::helpers::eval_single;

/// Evaluate a cast to `datatype`
pub fn eval_cast(datatype: &str, args: &[Expression]) -> Result<Term> {
    let term = eval_single(args, datatype)?;
    Ok(coerce::cast(&term, datatype)?)
}

/// Evaluate an external function call
pub fn eval_external(call: &ExternalCall, args: &[Expression]) -> Result<Term> {
    if call.is_failed() {
        return Ok(Term::from(false));
    }
    let Some(function) = call.function(args.len()) else {
        return Ok(Term::from(false));
    };

    let values = args
        .iter()
        .map(Expression::eval)
        .collect::<Result<Vec<_>>>()?;

    match function.invoke(&values) {
        Ok(value) => Ok(value.into_term()),
        Err(e) => {
            if e.is_permanent() {
                call.mark_failed();
                tracing::warn!(function = call.name(), error = %e, "external function failed permanently");
            } else {
                tracing::warn!(function = call.name(), error = %e, "external function failed");
            }
            Err(FilterError::InvocationFailure {
                name: call.name().to_string(),
                message: e.to_string(),
            })
        }
    }
}
