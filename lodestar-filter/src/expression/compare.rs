//! Comparison operator implementations
//!
//! Relational operators delegate to `lodestar_core::compare`, where `>`,
//! `<=` and `>=` are derived from `<`.

use crate::error::Result;
use crate::ir::Expression;
use lodestar_core::compare::{
    greater_than, greater_than_or_equal, less_than, less_than_or_equal, term_equals,
};

use super::helpers::eval_pair;

/// Evaluate `=` (RDF term equality)
pub fn eval_eq(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, "=")?;
    Ok(term_equals(&l, &r)?)
}

/// Evaluate `!=`; an undecidable equality stays an error
pub fn eval_ne(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, "!=")?;
    Ok(!term_equals(&l, &r)?)
}

pub fn eval_lt(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, "<")?;
    Ok(less_than(&l, &r)?)
}

pub fn eval_le(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, "<=")?;
    Ok(less_than_or_equal(&l, &r)?)
}

pub fn eval_gt(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, ">")?;
    Ok(greater_than(&l, &r)?)
}

pub fn eval_ge(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, ">=")?;
    Ok(greater_than_or_equal(&l, &r)?)
}

/// Evaluate sameTerm: identical representation, no value coercion
pub fn eval_same_term(args: &[Expression]) -> Result<bool> {
    let (l, r) = eval_pair(args, "sameTerm")?;
    Ok(l.same_term(&r))
}
