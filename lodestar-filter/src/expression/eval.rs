//! Core expression evaluation
//!
//! - `eval()` - evaluate to a term (BIND / projection)
//! - `eval_to_bool()` - evaluate to an effective boolean value (FILTER)
//! - `try_eval()` - `eval()` with every error mapped to `None`

use crate::error::Result;
use crate::ir::Expression;
use lodestar_core::Term;

impl Expression {
    /// Evaluate against the current row of the bound context.
    pub fn eval(&self) -> Result<Term> {
        match self {
            Expression::Var(var) => var.resolve(),
            Expression::Const(term) => Ok(term.clone()),
            Expression::Call { func, args } => func.eval(args),
        }
    }

    /// Evaluate to an effective boolean value.
    ///
    /// Boolean-valued functions are computed directly; anything else is
    /// evaluated to a term and converted. Terms with no boolean value
    /// (IRIs, blank nodes, dateTimes, unknown datatypes) are a type error.
    pub fn eval_to_bool(&self) -> Result<bool> {
        match self {
            Expression::Var(var) => Ok(var.resolve()?.effective_boolean()?),
            Expression::Const(term) => Ok(term.effective_boolean()?),
            Expression::Call { func, args } => func.eval_to_bool(args),
        }
    }

    /// Evaluate for projection: a failed evaluation leaves the value unbound.
    pub fn try_eval(&self) -> Option<Term> {
        match self.eval() {
            Ok(term) => Some(term),
            Err(e) => {
                tracing::trace!(error = %e, "projection left unbound");
                None
            }
        }
    }
}
