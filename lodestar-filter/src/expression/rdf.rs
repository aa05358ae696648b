//! RDF term accessors and kind tests
//!
//! Implements str, lang, datatype, bound, isIRI, isBlank, isLiteral and
//! langMatches.

use crate::error::{FilterError, Result};
use crate::ir::Expression;
use lodestar_core::Term;

use super::helpers::{check_arity, eval_pair, eval_single};

/// Evaluate str(): simple literal of the term's lexical form
pub fn eval_str(args: &[Expression]) -> Result<Term> {
    match eval_single(args, "str")? {
        Term::BlankNode(id) => Err(FilterError::type_error(format!(
            "str() of blank node _:{}",
            id
        ))),
        term => Ok(Term::simple(term.lexical_form())),
    }
}

/// Evaluate lang(): the language tag, empty if there is none
pub fn eval_lang(args: &[Expression]) -> Result<Term> {
    let term = eval_single(args, "lang")?;
    if !term.is_literal() {
        return Err(FilterError::type_error(format!(
            "lang() of {}",
            term.kind_name()
        )));
    }
    Ok(Term::simple(term.language_tag()))
}

/// Evaluate datatype(): the literal's datatype IRI
pub fn eval_datatype(args: &[Expression]) -> Result<Term> {
    let term = eval_single(args, "datatype")?;
    match term.datatype() {
        Some(dt) => Ok(Term::iri(dt)),
        None => Err(FilterError::type_error(format!(
            "datatype() of {}",
            term.kind_name()
        ))),
    }
}

/// Evaluate bound(): whether the variable has a value in the current row
pub fn eval_bound(args: &[Expression]) -> Result<bool> {
    check_arity(args, 1, "bound")?;
    match &args[0] {
        Expression::Var(var) => Ok(var.is_bound()),
        _ => Err(FilterError::invalid("bound() requires a variable argument")),
    }
}

pub fn eval_is_iri(args: &[Expression]) -> Result<bool> {
    Ok(eval_single(args, "isIRI")?.is_iri())
}

pub fn eval_is_blank(args: &[Expression]) -> Result<bool> {
    Ok(eval_single(args, "isBlank")?.is_blank())
}

pub fn eval_is_literal(args: &[Expression]) -> Result<bool> {
    Ok(eval_single(args, "isLiteral")?.is_literal())
}

/// Evaluate langMatches(literal, range) against the literal's language tag.
///
/// The range must be a simple literal.
pub fn eval_lang_matches(args: &[Expression]) -> Result<bool> {
    let (tagged, range) = eval_pair(args, "langMatches")?;
    if !tagged.is_literal() {
        return Err(FilterError::type_error(format!(
            "langMatches() of {}",
            tagged.kind_name()
        )));
    }
    if !range.is_simple_literal() {
        return Err(FilterError::type_error(
            "langMatches() range must be a simple literal",
        ));
    }
    Ok(lang_matches(tagged.language_tag(), range.lexical_form()))
}

/// Language-range matching.
///
/// `*` matches any non-empty tag. Any other range must name the whole tag,
/// ignoring case: `en` does not match `en-GB`.
pub fn lang_matches(tag: &str, range: &str) -> bool {
    match range {
        "*" => !tag.is_empty(),
        _ => !tag.is_empty() && tag.eq_ignore_ascii_case(range),
    }
}
