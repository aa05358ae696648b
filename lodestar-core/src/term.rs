//! RDF terms
//!
//! [`Term`] is the materialized value every expression evaluates to: an IRI,
//! a blank node, a simple (optionally language-tagged) literal, or a typed
//! literal whose native value is parsed eagerly at construction.
//!
//! `PartialEq` on `Term` is sameTerm: identical kind, lexical form, datatype
//! and language tag. RDF term equality with numeric promotion lives in
//! [`crate::compare::term_equals`].

use crate::coerce::{CoercionError, CoercionResult};
use crate::datatypes::type_info;
use crate::error::{Result, TermError};
use crate::temporal::DateTime;
use crate::value::Value;
use bigdecimal::BigDecimal;
use lodestar_vocab::xsd;
use std::fmt;
use std::sync::Arc;

/// An RDF term
#[derive(Clone, Debug)]
pub enum Term {
    /// IRI reference
    Iri(Arc<str>),
    /// Blank node, identified by its label
    BlankNode(Arc<str>),
    /// Untyped literal; `lang` is empty when there is no language tag
    SimpleLiteral { text: Arc<str>, lang: Arc<str> },
    /// Literal with a datatype IRI
    TypedLiteral(TypedLiteral),
}

/// A literal with a datatype and its parsed native value
#[derive(Clone, Debug)]
pub struct TypedLiteral {
    lexical: Arc<str>,
    datatype: Arc<str>,
    value: Value,
}

impl TypedLiteral {
    /// Parse `lexical` as `datatype` (full or `xsd:` IRI).
    ///
    /// Registered datatypes must parse. Unregistered datatypes are accepted
    /// and carry their lexical form as an opaque string value.
    pub fn new(lexical: &str, datatype: &str) -> CoercionResult<Self> {
        let datatype = xsd::expand(datatype);
        let value = match type_info(&datatype) {
            Some(info) => info.parse(lexical)?,
            None => Value::from(lexical),
        };
        Ok(Self {
            lexical: Arc::from(lexical),
            datatype: Arc::from(datatype.as_ref()),
            value,
        })
    }

    /// Build from a native value, deriving the canonical lexical form.
    pub fn from_value(value: Value, datatype: &str) -> Self {
        Self {
            lexical: Arc::from(value.canonical_lexical()),
            datatype: Arc::from(xsd::expand(datatype).as_ref()),
            value,
        }
    }

    pub(crate) fn from_parts(lexical: Arc<str>, datatype: Arc<str>, value: Value) -> Self {
        Self {
            lexical,
            datatype,
            value,
        }
    }

    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    /// Full datatype IRI
    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// True if the datatype is in the type-info table
    pub fn is_registered(&self) -> bool {
        type_info(&self.datatype).is_some()
    }
}

impl Term {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn iri(iri: impl Into<Arc<str>>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(id: impl Into<Arc<str>>) -> Self {
        Term::BlankNode(id.into())
    }

    /// Simple literal without a language tag
    pub fn simple(text: impl Into<Arc<str>>) -> Self {
        Term::SimpleLiteral {
            text: text.into(),
            lang: Arc::from(""),
        }
    }

    /// Language-tagged simple literal
    pub fn lang(text: impl Into<Arc<str>>, lang: impl Into<Arc<str>>) -> Self {
        Term::SimpleLiteral {
            text: text.into(),
            lang: lang.into(),
        }
    }

    /// `xsd:string` typed literal
    pub fn string(text: &str) -> Self {
        Term::TypedLiteral(TypedLiteral::from_parts(
            Arc::from(text),
            Arc::from(xsd::STRING),
            Value::from(text),
        ))
    }

    /// Typed literal parsed from its lexical form
    pub fn typed(lexical: &str, datatype: &str) -> CoercionResult<Self> {
        TypedLiteral::new(lexical, datatype).map(Term::TypedLiteral)
    }

    /// Typed literal from a native value
    pub fn from_value(value: Value, datatype: &str) -> Self {
        Term::TypedLiteral(TypedLiteral::from_value(value, datatype))
    }

    // =========================================================================
    // Kind tests
    // =========================================================================

    #[inline]
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::SimpleLiteral { .. } | Term::TypedLiteral(_))
    }

    #[inline]
    pub fn is_simple_literal(&self) -> bool {
        matches!(self, Term::SimpleLiteral { .. })
    }

    /// True for typed literals with a numeric native value
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Term::TypedLiteral(lit) if lit.value.is_numeric())
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Native value of a literal; simple literals yield their text.
    pub fn value(&self) -> Result<Value> {
        match self {
            Term::SimpleLiteral { text, .. } => Ok(Value::String(text.clone())),
            Term::TypedLiteral(lit) => Ok(lit.value.clone()),
            other => Err(TermError::not_literal(other.to_string())),
        }
    }

    /// Lexical form of a literal, the IRI string, or the blank node label
    pub fn lexical_form(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_ref(),
            Term::BlankNode(id) => id.as_ref(),
            Term::SimpleLiteral { text, .. } => text.as_ref(),
            Term::TypedLiteral(lit) => lit.lexical.as_ref(),
        }
    }

    /// Language tag; empty for everything but tagged simple literals
    pub fn language_tag(&self) -> &str {
        match self {
            Term::SimpleLiteral { lang, .. } => lang.as_ref(),
            _ => "",
        }
    }

    /// Datatype IRI of a literal. Simple literals report `xsd:string`.
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Term::SimpleLiteral { .. } => Some(xsd::STRING),
            Term::TypedLiteral(lit) => Some(lit.datatype.as_ref()),
            _ => None,
        }
    }

    /// Short description of the term kind for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Term::Iri(_) => "IRI",
            Term::BlankNode(_) => "blank node",
            Term::SimpleLiteral { .. } => "simple literal",
            Term::TypedLiteral(_) => "typed literal",
        }
    }

    /// Effective boolean value.
    ///
    /// Booleans are their value, numerics are non-zero and not NaN, strings
    /// and simple literals are non-empty. Other datatypes have no boolean value.
    pub fn effective_boolean(&self) -> Result<bool> {
        match self {
            Term::SimpleLiteral { text, .. } => Ok(!text.is_empty()),
            Term::TypedLiteral(lit) => type_info(&lit.datatype)
                .and_then(|info| info.effective_boolean(&lit.value))
                .ok_or_else(|| {
                    TermError::type_error(format!("no boolean value for {}", lit.datatype))
                }),
            other => Err(TermError::type_error(format!(
                "no boolean value for {}",
                other.kind_name()
            ))),
        }
    }

    /// sameTerm: identical kind and representation, never value-coerced.
    pub fn same_term(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a == b,
            (Term::BlankNode(a), Term::BlankNode(b)) => a == b,
            (
                Term::SimpleLiteral { text: t1, lang: l1 },
                Term::SimpleLiteral { text: t2, lang: l2 },
            ) => t1 == t2 && l1.eq_ignore_ascii_case(l2),
            (Term::TypedLiteral(a), Term::TypedLiteral(b)) => {
                a.datatype == b.datatype && a.lexical == b.lexical
            }
            _ => false,
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.same_term(other)
    }
}

impl Eq for Term {}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::SimpleLiteral { text, lang } if lang.is_empty() => write!(f, "\"{}\"", text),
            Term::SimpleLiteral { text, lang } => write!(f, "\"{}\"@{}", text, lang),
            Term::TypedLiteral(lit) => write!(f, "\"{}\"^^<{}>", lit.lexical, lit.datatype),
        }
    }
}

// =============================================================================
// Conversions from native values
// =============================================================================

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::from_value(Value::Long(n), xsd::LONG)
    }
}

impl From<i32> for Term {
    fn from(n: i32) -> Self {
        Term::from_value(Value::from(n), xsd::INT)
    }
}

impl From<f32> for Term {
    fn from(f: f32) -> Self {
        Term::from_value(Value::Float(f), xsd::FLOAT)
    }
}

impl From<f64> for Term {
    fn from(d: f64) -> Self {
        Term::from_value(Value::Double(d), xsd::DOUBLE)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::from_value(Value::Boolean(b), xsd::BOOLEAN)
    }
}

impl From<BigDecimal> for Term {
    fn from(d: BigDecimal) -> Self {
        Term::from_value(Value::from(d), xsd::DECIMAL)
    }
}

impl From<DateTime> for Term {
    fn from(dt: DateTime) -> Self {
        Term::from_value(Value::from(dt), xsd::DATE_TIME)
    }
}

impl TryFrom<(&str, &str)> for Term {
    type Error = CoercionError;

    /// `(lexical, datatype)` pair
    fn try_from((lexical, datatype): (&str, &str)) -> CoercionResult<Self> {
        Term::typed(lexical, datatype)
    }
}
