//! Parsed literal values
//!
//! A [`Value`] is the native form of a typed literal's lexical string. The
//! integer family (byte through integer) collapses into [`Value::Long`]; the
//! declared datatype on the owning literal keeps the original precision.

use crate::temporal::DateTime;
use bigdecimal::BigDecimal;
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

/// Native value of a literal
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// String value (xsd:string, simple literals, unregistered datatypes)
    String(Arc<str>),
    /// xsd:boolean
    Boolean(bool),
    /// Integer family, held as i64
    Long(i64),
    /// xsd:float
    Float(f32),
    /// xsd:double
    Double(f64),
    /// xsd:decimal
    Decimal(Box<BigDecimal>),
    /// xsd:dateTime
    DateTime(Box<DateTime>),
}

impl Value {
    /// True for the four numeric precisions
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Long(_) | Value::Float(_) | Value::Double(_) | Value::Decimal(_)
        )
    }

    /// Get a human-readable type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Decimal(_) => "Decimal",
            Value::DateTime(_) => "DateTime",
        }
    }

    /// Numeric value widened to f64, if numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Long(n) => Some(*n as f64),
            Value::Float(f) => Some(*f as f64),
            Value::Double(d) => Some(*d),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Canonical lexical form used when a literal is built from a native value
    pub fn canonical_lexical(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(f) => format_double(*f as f64, f.to_string()),
            Value::Double(d) => format_double(*d, d.to_string()),
            Value::Decimal(d) => d.to_string(),
            Value::DateTime(dt) => dt.to_string(),
        }
    }

    /// Numeric "is zero or NaN" test behind the effective boolean value
    pub(crate) fn numeric_truth(&self) -> Option<bool> {
        match self {
            Value::Long(n) => Some(*n != 0),
            Value::Float(f) => Some(*f != 0.0 && !f.is_nan()),
            Value::Double(d) => Some(*d != 0.0 && !d.is_nan()),
            Value::Decimal(d) => Some(!d.is_zero()),
            _ => None,
        }
    }
}

/// XSD spelling for floating point values: `INF`, `-INF`, `NaN`, and a
/// trailing `.0` on integral values.
fn format_double(d: f64, display: String) -> String {
    if d.is_nan() {
        "NaN".to_string()
    } else if d.is_infinite() {
        (if d > 0.0 { "INF" } else { "-INF" }).to_string()
    } else if display.contains(['.', 'e', 'E']) {
        display
    } else {
        format!("{}.0", display)
    }
}

// =============================================================================
// Numeric comparison with promotion
// =============================================================================

/// Compare two numeric values, promoting across precisions.
///
/// - integer vs integer compares as i64
/// - decimal vs decimal compares exactly; decimal vs integer promotes the
///   integer to decimal; decimal vs float promotes the float through its
///   shortest decimal spelling, so `0.1` equals `0.1e0`
/// - any other mix compares as f64. An integer against a float is not
///   truncated to an integer first: `7 < 7.5`.
///
/// Returns `None` if either side is non-numeric or a NaN is involved.
pub fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Long(a), Value::Long(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.as_ref().cmp(b.as_ref())),
        (Value::Decimal(a), Value::Long(b)) => Some(a.as_ref().cmp(&BigDecimal::from(*b))),
        (Value::Long(a), Value::Decimal(b)) => Some(BigDecimal::from(*a).cmp(b.as_ref())),
        (Value::Decimal(a), other) => decimal_float_cmp(a, other),
        (other, Value::Decimal(b)) => decimal_float_cmp(b, other).map(Ordering::reverse),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
    }
}

fn decimal_float_cmp(decimal: &BigDecimal, float: &Value) -> Option<Ordering> {
    let f = float.as_f64()?;
    if f.is_nan() {
        return None;
    }
    if f.is_infinite() {
        return Some(if f > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    Some(decimal.cmp(&float_to_decimal(float)?))
}

/// Decimal from the shortest spelling that round-trips a finite float.
///
/// `0.1f64` becomes `0.1`, not its exact binary expansion. A float keeps its
/// own single-precision spelling.
pub fn float_to_decimal(value: &Value) -> Option<BigDecimal> {
    let text = match value {
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Double(d) if d.is_finite() => d.to_string(),
        _ => return None,
    };
    BigDecimal::from_str(&text).ok()
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Long(n as i64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Value::Decimal(Box::new(d))
    }
}

impl From<DateTime> for Value {
    fn from(dt: DateTime) -> Self {
        Value::DateTime(Box::new(dt))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}
