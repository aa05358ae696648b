//! Registered literal datatypes
//!
//! Every datatype the engine understands has exactly one [`TypeInfo`] record.
//! Lookups accept the full IRI or the `xsd:` abbreviation and both resolve to
//! the same record, whose `datatype` field is always the full IRI.

use crate::coerce::{CoercionError, CoercionResult};
use crate::temporal::DateTime;
use crate::value::Value;
use bigdecimal::BigDecimal;
use lodestar_vocab::xsd;
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Native representation a datatype parses into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    String,
    Boolean,
    Integer,
    Float,
    Double,
    Decimal,
    DateTime,
}

impl NativeKind {
    /// True for the integer, float, double and decimal kinds
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            NativeKind::Integer | NativeKind::Float | NativeKind::Double | NativeKind::Decimal
        )
    }
}

/// Per-datatype parsing and truth rules
#[derive(Debug)]
pub struct TypeInfo {
    /// Full datatype IRI
    pub datatype: &'static str,
    /// Native kind values of this datatype parse into
    pub kind: NativeKind,
}

static REGISTERED: [TypeInfo; 19] = [
    TypeInfo { datatype: xsd::STRING, kind: NativeKind::String },
    TypeInfo { datatype: xsd::BOOLEAN, kind: NativeKind::Boolean },
    TypeInfo { datatype: xsd::DECIMAL, kind: NativeKind::Decimal },
    TypeInfo { datatype: xsd::FLOAT, kind: NativeKind::Float },
    TypeInfo { datatype: xsd::DOUBLE, kind: NativeKind::Double },
    TypeInfo { datatype: xsd::DATE_TIME, kind: NativeKind::DateTime },
    TypeInfo { datatype: xsd::INTEGER, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::LONG, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::INT, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::SHORT, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::BYTE, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::UNSIGNED_LONG, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::UNSIGNED_INT, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::UNSIGNED_SHORT, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::UNSIGNED_BYTE, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::NON_NEGATIVE_INTEGER, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::POSITIVE_INTEGER, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::NON_POSITIVE_INTEGER, kind: NativeKind::Integer },
    TypeInfo { datatype: xsd::NEGATIVE_INTEGER, kind: NativeKind::Integer },
];

static TYPE_INFO: Lazy<HashMap<String, &'static TypeInfo>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(REGISTERED.len() * 2);
    for info in REGISTERED.iter() {
        map.insert(info.datatype.to_string(), info);
        if let Some(local) = xsd::datatype_local_name(info.datatype) {
            map.insert(format!("{}{}", xsd::PREFIX, local), info);
        }
    }
    map
});

/// Look up the record for a datatype IRI (full or `xsd:` form).
pub fn type_info(datatype_iri: &str) -> Option<&'static TypeInfo> {
    TYPE_INFO.get(datatype_iri).copied()
}

impl TypeInfo {
    /// Short name for messages, e.g. `int`
    pub fn local_name(&self) -> &'static str {
        xsd::datatype_local_name(self.datatype).unwrap_or(self.datatype)
    }

    /// Parse a lexical form into this datatype's native value.
    ///
    /// Leading and trailing whitespace is collapsed before parsing for every
    /// kind except string.
    pub fn parse(&self, lexical: &str) -> CoercionResult<Value> {
        let s = lexical.trim();
        match self.kind {
            NativeKind::String => Ok(Value::String(Arc::from(lexical))),
            NativeKind::Boolean => parse_boolean(s).map(Value::Boolean),
            NativeKind::Integer => parse_integer(s, self.datatype).map(Value::Long),
            NativeKind::Float => parse_float(s, "xsd:float").map(|d| Value::Float(d as f32)),
            NativeKind::Double => parse_float(s, "xsd:double").map(Value::Double),
            NativeKind::Decimal => BigDecimal::from_str(s)
                .map(Value::from)
                .map_err(|e| CoercionError::parse_failed(s, "xsd:decimal", Some(&e.to_string()))),
            NativeKind::DateTime => DateTime::parse(s)
                .map(Value::from)
                .map_err(|e| CoercionError::parse_failed(s, "xsd:dateTime", Some(&e))),
        }
    }

    /// Effective boolean value of a value of this datatype.
    ///
    /// `None` when the datatype has no boolean interpretation (dateTime).
    pub fn effective_boolean(&self, value: &Value) -> Option<bool> {
        match (self.kind, value) {
            (NativeKind::Boolean, Value::Boolean(b)) => Some(*b),
            (NativeKind::String, Value::String(s)) => Some(!s.is_empty()),
            (kind, v) if kind.is_numeric() => v.numeric_truth(),
            _ => None,
        }
    }

    /// Check an integer against this datatype's bounds.
    pub fn check_bounds(&self, value: i64) -> CoercionResult<i64> {
        if let Some((min, max)) = xsd::integer_bounds(self.datatype) {
            if value < min || value > max {
                return Err(CoercionError::out_of_range(value, self.local_name(), min, max));
            }
        }
        Ok(value)
    }
}

// =============================================================================
// Lexical parsers
// =============================================================================

/// xsd:boolean accepts `true`, `false`, `1` and `0`.
fn parse_boolean(s: &str) -> CoercionResult<bool> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ if s.eq_ignore_ascii_case("true") => Ok(true),
        _ if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(CoercionError::parse_failed(s, "xsd:boolean", None)),
    }
}

/// Parse an integer lexical form, validating range constraints
fn parse_integer(s: &str, datatype_iri: &str) -> CoercionResult<i64> {
    let local = xsd::datatype_local_name(datatype_iri).unwrap_or(datatype_iri);
    if let Ok(i) = s.parse::<i64>() {
        if let Some((min, max)) = xsd::integer_bounds(datatype_iri) {
            if i < min || i > max {
                return Err(CoercionError::out_of_range(i, local, min, max));
            }
        }
        return Ok(i);
    }

    // Syntactically valid but wider than i64
    if BigInt::from_str(s).is_ok() {
        return Err(CoercionError::new(format!(
            "Value {} is out of range for {}",
            s, local
        )));
    }

    Err(CoercionError::parse_failed(s, local, None))
}

/// Parse a float/double lexical form, including `INF`, `-INF` and `NaN`
fn parse_float(s: &str, target: &str) -> CoercionResult<f64> {
    let parsed = match s {
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        // Rust accepts "inf"/"infinity"/"nan" spellings XSD does not
        _ if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
            return Err(CoercionError::parse_failed(s, target, None));
        }
        _ => s.parse::<f64>(),
    };
    parsed.map_err(|_| CoercionError::parse_failed(s, target, None))
}
