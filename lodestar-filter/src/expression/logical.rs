//! Logical operator implementations
//!
//! AND and OR follow the three-valued rules for errors: an operand error is
//! discarded when the rest of the chain decides the result on its own
//! (`false` for AND, `true` for OR), and re-raised otherwise. Chains are
//! evaluated left to right; [`and_law`] and [`or_law`] state one step of that
//! recursion on plain `Result<bool>` values.

use crate::error::Result;
use crate::ir::Expression;
use lodestar_core::compare::term_equals;

use super::helpers::{check_arity, check_min_arity};

/// One step of a conjunction: `head AND rest`.
///
/// `rest` is only evaluated when `head` is true or an error.
pub fn and_law(head: Result<bool>, rest: impl FnOnce() -> Result<bool>) -> Result<bool> {
    match head {
        Ok(false) => Ok(false),
        Ok(true) => rest(),
        Err(e) => match rest() {
            Ok(false) => Ok(false),
            _ => Err(e),
        },
    }
}

/// One step of a disjunction: `head OR rest`.
///
/// `rest` is only evaluated when `head` is false or an error.
pub fn or_law(head: Result<bool>, rest: impl FnOnce() -> Result<bool>) -> Result<bool> {
    match head {
        Ok(true) => Ok(true),
        Ok(false) => rest(),
        Err(e) => match rest() {
            Ok(true) => Ok(true),
            _ => Err(e),
        },
    }
}

/// Evaluate logical AND over all arguments
pub fn eval_and(args: &[Expression]) -> Result<bool> {
    match args.split_first() {
        None => Ok(true),
        Some((head, rest)) => and_law(head.eval_to_bool(), || eval_and(rest)),
    }
}

/// Evaluate logical OR over all arguments
pub fn eval_or(args: &[Expression]) -> Result<bool> {
    match args.split_first() {
        None => Ok(false),
        Some((head, rest)) => or_law(head.eval_to_bool(), || eval_or(rest)),
    }
}

/// Evaluate logical NOT; errors propagate
pub fn eval_not(args: &[Expression]) -> Result<bool> {
    check_arity(args, 1, "!")?;
    args[0].eval_to_bool().map(|b| !b)
}

/// Negation where a failing operand counts as false, so the result is true
pub fn eval_inverse(args: &[Expression]) -> Result<bool> {
    check_arity(args, 1, "inverse")?;
    Ok(!args[0].eval_to_bool().unwrap_or(false))
}

/// Evaluate IN: true if the first argument equals any of the others.
///
/// An error evaluating the test value propagates. Member errors are
/// remembered; a later match still wins, otherwise the first one is raised.
pub fn eval_in(args: &[Expression]) -> Result<bool> {
    check_min_arity(args, 1, "IN")?;
    let test = args[0].eval()?;
    let mut first_err = None;
    for member in &args[1..] {
        match member.eval().and_then(|m| Ok(term_equals(&test, &m)?)) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(false),
    }
}

/// Evaluate NOT IN as the negation of IN
pub fn eval_not_in(args: &[Expression]) -> Result<bool> {
    check_min_arity(args, 1, "NOT IN")?;
    eval_in(args).map(|found| !found)
}
