//! Literal casting
//!
//! Converts a term into a literal of a target datatype using the same
//! per-datatype table as literal construction (see [`crate::datatypes`]).
//!
//! ## Rules
//!
//! - Blank nodes never cast.
//! - IRIs cast through their IRI string, so only string-like targets accept them
//!   in practice.
//! - Numeric → integer truncates toward zero. NaN and infinities are rejected,
//!   as are results outside the target's bounds.
//! - Boolean → numeric yields 1 or 0; numeric → boolean is the value's truth.
//! - → string keeps the source's lexical form unchanged.
//! - Everything else parses the source's lexical form with the target parser.
//!   Language tags are discarded.
//! - `rdf:XMLLiteral` accepts only string sources and produces an opaque literal.

use crate::datatypes::{type_info, NativeKind, TypeInfo};
use crate::term::{Term, TypedLiteral};
use crate::value::{float_to_decimal, Value};
use bigdecimal::BigDecimal;
use lodestar_vocab::{rdf, xsd};
use num_traits::ToPrimitive;
use std::sync::Arc;
use thiserror::Error;

/// Error returned when coercion fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CoercionError {
    /// Human-readable error message
    pub message: String,
}

impl CoercionError {
    /// Create a new coercion error
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }

    /// Create an incompatible type error
    pub fn incompatible(value_desc: &str, target_type: &str, hint: Option<&str>) -> Self {
        let msg = match hint {
            Some(h) => format!("Cannot coerce {} to {}. {}", value_desc, target_type, h),
            None => format!("Cannot coerce {} to {}", value_desc, target_type),
        };
        Self::new(msg)
    }

    /// Create a parse error
    pub fn parse_failed(value: &str, target_type: &str, detail: Option<&str>) -> Self {
        let msg = match detail {
            Some(d) => format!("Cannot parse '{}' as {}: {}", value, target_type, d),
            None => format!("Cannot parse '{}' as {}", value, target_type),
        };
        Self::new(msg)
    }

    /// Create a range error
    pub fn out_of_range(
        value: impl std::fmt::Display,
        target_type: &str,
        min: i64,
        max: i64,
    ) -> Self {
        Self::new(format!(
            "Value {} is out of range for {}: expected {} to {}",
            value, target_type, min, max
        ))
    }
}

/// Result type for coercion operations
pub type CoercionResult<T> = Result<T, CoercionError>;

/// True if `datatype_iri` names a target [`cast`] handles without an
/// external function.
pub fn is_builtin_cast(datatype_iri: &str) -> bool {
    type_info(datatype_iri).is_some() || xsd::expand(datatype_iri) == rdf::XML_LITERAL
}

/// Cast a term to the target datatype (full IRI or `xsd:` form).
pub fn cast(term: &Term, datatype_iri: &str) -> CoercionResult<Term> {
    let target = xsd::expand(datatype_iri);
    if target == rdf::XML_LITERAL {
        return cast_to_xml_literal(term);
    }
    let info = type_info(&target)
        .ok_or_else(|| CoercionError::new(format!("No built-in cast to {}", target)))?;

    match term {
        Term::BlankNode(id) => Err(CoercionError::incompatible(
            &format!("blank node _:{}", id),
            info.local_name(),
            None,
        )),
        Term::Iri(iri) => from_lexical(iri, info),
        Term::SimpleLiteral { text, .. } => from_lexical(text, info),
        Term::TypedLiteral(lit) => cast_typed(lit, info),
    }
}

fn cast_typed(lit: &TypedLiteral, info: &'static TypeInfo) -> CoercionResult<Term> {
    let source = lit.value();
    match (info.kind, source) {
        (NativeKind::String, _) => from_lexical(lit.lexical_form(), info),
        (NativeKind::Integer, v) if v.is_numeric() => {
            let n = truncate_to_i64(v, info)?;
            Ok(build(Value::Long(info.check_bounds(n)?), info))
        }
        (NativeKind::Integer, Value::Boolean(b)) => {
            Ok(build(Value::Long(info.check_bounds(*b as i64)?), info))
        }
        (NativeKind::Double, v) if v.is_numeric() => Ok(build(
            Value::Double(v.as_f64().unwrap_or(f64::NAN)),
            info,
        )),
        (NativeKind::Float, v) if v.is_numeric() => Ok(build(
            Value::Float(v.as_f64().unwrap_or(f64::NAN) as f32),
            info,
        )),
        (NativeKind::Decimal, Value::Long(n)) => Ok(build(Value::from(BigDecimal::from(*n)), info)),
        (NativeKind::Decimal, v @ Value::Decimal(_)) => Ok(build(v.clone(), info)),
        (NativeKind::Decimal, v) if v.is_numeric() => {
            let dec = float_to_decimal(v).ok_or_else(|| {
                CoercionError::incompatible(&format!("number {}", lit.lexical_form()), "decimal", None)
            })?;
            Ok(build(Value::from(dec), info))
        }
        (NativeKind::Double, Value::Boolean(b)) => Ok(build(Value::Double(*b as i64 as f64), info)),
        (NativeKind::Float, Value::Boolean(b)) => Ok(build(Value::Float(*b as i64 as f32), info)),
        (NativeKind::Decimal, Value::Boolean(b)) => {
            Ok(build(Value::from(BigDecimal::from(*b as i64)), info))
        }
        (NativeKind::Boolean, v) if v.is_numeric() => {
            Ok(build(Value::Boolean(v.numeric_truth().unwrap_or(false)), info))
        }
        (NativeKind::DateTime, v) if v.is_numeric() => Err(CoercionError::incompatible(
            &format!("number {}", lit.lexical_form()),
            "dateTime",
            None,
        )),
        _ => from_lexical(lit.lexical_form(), info),
    }
}

/// Truncate a numeric value toward zero
fn truncate_to_i64(value: &Value, info: &TypeInfo) -> CoercionResult<i64> {
    let out_of_range = || {
        CoercionError::incompatible(
            &format!("number {}", value.canonical_lexical()),
            info.local_name(),
            Some("Value is not finite or exceeds the integer range."),
        )
    };
    match value {
        Value::Long(n) => Ok(*n),
        Value::Decimal(d) => d.with_scale(0).to_i64().ok_or_else(out_of_range),
        other => {
            let d = other.as_f64().ok_or_else(out_of_range)?.trunc();
            if !d.is_finite() || d < i64::MIN as f64 || d >= i64::MAX as f64 {
                return Err(out_of_range());
            }
            Ok(d as i64)
        }
    }
}

/// Parse a lexical form with the target parser and build the literal.
///
/// String targets keep the lexical form verbatim; every other target takes
/// the canonical spelling of the parsed value.
fn from_lexical(lexical: &str, info: &'static TypeInfo) -> CoercionResult<Term> {
    let value = info.parse(lexical)?;
    if info.kind == NativeKind::String {
        return Ok(Term::TypedLiteral(TypedLiteral::from_parts(
            Arc::from(lexical),
            Arc::from(info.datatype),
            value,
        )));
    }
    Ok(build(value, info))
}

fn build(value: Value, info: &'static TypeInfo) -> Term {
    Term::TypedLiteral(TypedLiteral::from_value(value, info.datatype))
}

fn cast_to_xml_literal(term: &Term) -> CoercionResult<Term> {
    match term {
        Term::SimpleLiteral { text, .. } => Ok(Term::TypedLiteral(TypedLiteral::from_parts(
            text.clone(),
            Arc::from(rdf::XML_LITERAL),
            Value::String(text.clone()),
        ))),
        Term::TypedLiteral(lit) if lit.datatype() == xsd::STRING || lit.datatype() == rdf::XML_LITERAL => {
            let lexical: Arc<str> = Arc::from(lit.lexical_form());
            Ok(Term::TypedLiteral(TypedLiteral::from_parts(
                lexical.clone(),
                Arc::from(rdf::XML_LITERAL),
                Value::String(lexical),
            )))
        }
        other => Err(CoercionError::incompatible(
            &other.to_string(),
            "XMLLiteral",
            None,
        )),
    }
}
