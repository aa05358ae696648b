//! Arithmetic on numeric literals
//!
//! Promotion rules:
//! - integer ⊕ integer → integer (checked), except division which yields decimal
//! - float involved, no double → float
//! - double involved → double
//! - decimal ⊕ integer/decimal → decimal; decimal ⊕ float/double → double
//!
//! Integer results keep the wider declared datatype of the two operands
//! (byte < short < int < long < integer) and fall back to `xsd:integer` when
//! the result leaves that type's range.

use crate::error::{ArithmeticError, Result, TermError};
use crate::term::Term;
use crate::value::Value;
use bigdecimal::BigDecimal;
use lodestar_vocab::xsd;
use num_traits::Zero;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }

    /// Apply this operator to two numeric literals.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if either operand is not a numeric literal
    /// - `DivideByZero` for integer or decimal division by zero
    /// - `Overflow` when an integer result does not fit in i64
    pub fn apply(self, left: &Term, right: &Term) -> Result<Term> {
        let (l, r) = match (numeric_value(left), numeric_value(right)) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                return Err(ArithmeticError::TypeMismatch {
                    operator: self.symbol(),
                    left_type: left.kind_name(),
                    right_type: right.kind_name(),
                }
                .into())
            }
        };
        let (ldt, rdt) = (
            left.datatype().unwrap_or(xsd::DECIMAL),
            right.datatype().unwrap_or(xsd::DECIMAL),
        );

        match (&l, &r) {
            (Value::Long(a), Value::Long(b)) => self.apply_integers(*a, *b, ldt, rdt),
            (Value::Double(_), _) | (_, Value::Double(_)) => self.apply_doubles(&l, &r),
            (Value::Decimal(_), Value::Float(_)) | (Value::Float(_), Value::Decimal(_)) => {
                self.apply_doubles(&l, &r)
            }
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                let (a, b) = (l.as_f64().unwrap_or(f64::NAN), r.as_f64().unwrap_or(f64::NAN));
                Ok(Term::from(self.apply_float(a, b) as f32))
            }
            _ => match (to_decimal(&l), to_decimal(&r)) {
                (Some(a), Some(b)) => self.apply_decimals(a, b),
                _ => Err(TermError::type_error(format!(
                    "Cannot apply {} to {} and {}",
                    self.symbol(),
                    l.type_name(),
                    r.type_name()
                ))),
            },
        }
    }

    fn apply_integers(self, a: i64, b: i64, ldt: &str, rdt: &str) -> Result<Term> {
        let result = match self {
            ArithmeticOp::Add => a.checked_add(b).ok_or(ArithmeticError::Overflow)?,
            ArithmeticOp::Sub => a.checked_sub(b).ok_or(ArithmeticError::Overflow)?,
            ArithmeticOp::Mul => a.checked_mul(b).ok_or(ArithmeticError::Overflow)?,
            ArithmeticOp::Div => {
                return self.apply_decimals(BigDecimal::from(a), BigDecimal::from(b));
            }
        };
        let datatype = xsd::wider_integer_type(ldt, rdt).unwrap_or(xsd::INTEGER);
        let datatype = match xsd::integer_bounds(datatype) {
            Some((min, max)) if result < min || result > max => xsd::INTEGER,
            _ => datatype,
        };
        Ok(Term::from_value(Value::Long(result), datatype))
    }

    fn apply_float(self, a: f64, b: f64) -> f64 {
        match self {
            ArithmeticOp::Add => a + b,
            ArithmeticOp::Sub => a - b,
            ArithmeticOp::Mul => a * b,
            ArithmeticOp::Div => a / b,
        }
    }

    fn apply_doubles(self, l: &Value, r: &Value) -> Result<Term> {
        let (a, b) = match (l.as_f64(), r.as_f64()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(TermError::type_error("decimal value is not representable as a double")),
        };
        Ok(Term::from(self.apply_float(a, b)))
    }

    fn apply_decimals(self, a: BigDecimal, b: BigDecimal) -> Result<Term> {
        let result = match self {
            ArithmeticOp::Add => a + b,
            ArithmeticOp::Sub => a - b,
            ArithmeticOp::Mul => a * b,
            ArithmeticOp::Div => {
                if b.is_zero() {
                    return Err(ArithmeticError::DivideByZero.into());
                }
                a / b
            }
        };
        Ok(Term::from(result))
    }
}

/// Unary minus, keeping the operand's datatype
pub fn negate(term: &Term) -> Result<Term> {
    let datatype = term.datatype().unwrap_or(xsd::DECIMAL);
    match numeric_value(term) {
        Some(Value::Long(n)) => {
            let negated = n.checked_neg().ok_or(ArithmeticError::Overflow)?;
            let datatype = match xsd::integer_bounds(datatype) {
                Some((min, max)) if negated < min || negated > max => xsd::INTEGER,
                _ => datatype,
            };
            Ok(Term::from_value(Value::Long(negated), datatype))
        }
        Some(Value::Float(f)) => Ok(Term::from_value(Value::Float(-f), datatype)),
        Some(Value::Double(d)) => Ok(Term::from_value(Value::Double(-d), datatype)),
        Some(Value::Decimal(d)) => Ok(Term::from_value(Value::from(-*d), datatype)),
        _ => Err(TermError::type_error(format!(
            "Cannot negate a {}",
            term.kind_name()
        ))),
    }
}

fn numeric_value(term: &Term) -> Option<Value> {
    match term {
        Term::TypedLiteral(lit) if lit.value().is_numeric() => Some(lit.value().clone()),
        _ => None,
    }
}

fn to_decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Long(n) => Some(BigDecimal::from(*n)),
        Value::Decimal(d) => Some(d.as_ref().clone()),
        _ => None,
    }
}
