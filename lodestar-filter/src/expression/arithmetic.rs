//! Arithmetic operator implementations

use crate::error::Result;
use crate::ir::Expression;
use lodestar_core::{arithmetic, ArithmeticOp, Term};

use super::helpers::{eval_pair, eval_single};

/// Evaluate a binary arithmetic operator
pub fn eval_binary(op: ArithmeticOp, args: &[Expression]) -> Result<Term> {
    let (l, r) = eval_pair(args, op.symbol())?;
    Ok(op.apply(&l, &r)?)
}

/// Evaluate unary minus
pub fn eval_negate(args: &[Expression]) -> Result<Term> {
    let term = eval_single(args, "unary -")?;
    Ok(arithmetic::negate(&term)?)
}
