//! Term comparison and RDF term equality
//!
//! Ordering is only defined between comparable literals:
//! 1. IRIs and blank nodes cannot be ordered
//! 2. a simple literal orders only against another simple literal
//! 3. a numeric literal orders only against another numeric literal
//! 4. two non-numeric literals must share a datatype
//!
//! Anything else is a type error. Comparable pairs dispatch on the native
//! value: strings lexicographically, dateTimes chronologically, booleans with
//! false < true, and numerics with promotion (see [`numeric_cmp`]).
//!
//! Only [`less_than`] is implemented directly. The other three relations are
//! derived from it, so `a < b` and `b > a` can never disagree.

use crate::error::{Result, TermError};
use crate::term::Term;
use crate::value::{numeric_cmp, Value};
use lodestar_vocab::xsd;
use std::cmp::Ordering;

/// `left < right`
pub fn less_than(left: &Term, right: &Term) -> Result<bool> {
    Ok(compare(left, right)? == Some(Ordering::Less))
}

/// `left > right`, defined as `right < left`
pub fn greater_than(left: &Term, right: &Term) -> Result<bool> {
    less_than(right, left)
}

/// `left <= right`, defined as `!(left > right)`
pub fn less_than_or_equal(left: &Term, right: &Term) -> Result<bool> {
    greater_than(left, right).map(|gt| !gt)
}

/// `left >= right`, defined as `!(left < right)`
pub fn greater_than_or_equal(left: &Term, right: &Term) -> Result<bool> {
    less_than(left, right).map(|lt| !lt)
}

/// Order two terms.
///
/// `Ok(None)` means the pair is comparable but unordered (a NaN is involved).
pub fn compare(left: &Term, right: &Term) -> Result<Option<Ordering>> {
    check_comparable(left, right)?;
    let (l, r) = (left.value()?, right.value()?);
    if l.is_numeric() {
        return Ok(numeric_cmp(&l, &r));
    }
    match (&l, &r) {
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Some(a.cmp(b))),
        (Value::DateTime(a), Value::DateTime(b)) => Ok(Some(a.cmp(b))),
        _ => Err(TermError::type_error(format!(
            "Cannot compare a {} to a {}",
            l.type_name(),
            r.type_name()
        ))),
    }
}

/// Compatibility rules applied before any ordering comparison
fn check_comparable(left: &Term, right: &Term) -> Result<()> {
    if !left.is_literal() || !right.is_literal() {
        return Err(TermError::type_error(format!(
            "Cannot order a {} against a {}",
            left.kind_name(),
            right.kind_name()
        )));
    }
    if left.is_simple_literal() != right.is_simple_literal() {
        return Err(TermError::type_error(
            "simple literals can only be compared to simple literals",
        ));
    }
    match (left.is_numeric(), right.is_numeric()) {
        (true, true) => Ok(()),
        (true, false) | (false, true) => Err(TermError::type_error(format!(
            "Cannot compare {} to {}",
            left, right
        ))),
        (false, false) if left.datatype() != right.datatype() => {
            Err(TermError::type_error(format!(
                "Cannot compare literals of differing types: {} and {}",
                left.datatype().unwrap_or_default(),
                right.datatype().unwrap_or_default()
            )))
        }
        (false, false) => Ok(()),
    }
}

/// RDF term equality.
///
/// - IRIs and blank nodes compare by identity; against a literal they are unequal
/// - numeric literals compare by value across precisions
/// - simple literals are equal only to simple literals with the same text and tag
/// - boolean, dateTime and string literals of the same datatype compare by value
/// - any other pair is equal only if datatype and value both match; a
///   mismatch is a type error, since the terms cannot be shown to differ
pub fn term_equals(left: &Term, right: &Term) -> Result<bool> {
    match (left, right) {
        (Term::Iri(a), Term::Iri(b)) => return Ok(a == b),
        (Term::BlankNode(a), Term::BlankNode(b)) => return Ok(a == b),
        (l, r) if !l.is_literal() || !r.is_literal() => return Ok(false),
        _ => {}
    }

    if left.is_numeric() && right.is_numeric() {
        let (l, r) = (left.value()?, right.value()?);
        return Ok(numeric_cmp(&l, &r) == Some(Ordering::Equal));
    }

    if left.is_simple_literal() || right.is_simple_literal() {
        return Ok(left.same_term(right));
    }

    let (l, r) = (left.value()?, right.value()?);
    let same_type = left.datatype() == right.datatype();
    if same_type
        && matches!(
            left.datatype(),
            Some(xsd::BOOLEAN | xsd::DATE_TIME | xsd::STRING)
        )
    {
        return Ok(l == r);
    }
    if same_type && l == r {
        return Ok(true);
    }
    Err(TermError::type_error("terms are not equal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> Term {
        Term::typed(s, xsd::INTEGER).unwrap()
    }

    fn float(s: &str) -> Term {
        Term::typed(s, xsd::FLOAT).unwrap()
    }

    fn dt(s: &str) -> Term {
        Term::typed(s, xsd::DATE_TIME).unwrap()
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn test_numeric_ordering() {
        assert!(less_than(&int("7"), &int("8")).unwrap());
        assert!(less_than(&int("7"), &float("8.0")).unwrap());
        assert!(!less_than(&int("7"), &float("7.0")).unwrap());
        assert!(less_than_or_equal(&int("7"), &float("7.0")).unwrap());
        assert!(greater_than(&Term::from(2.5f64), &int("2")).unwrap());
    }

    #[test]
    fn test_string_ordering() {
        assert!(less_than(&Term::simple("abc"), &Term::simple("abd")).unwrap());
        assert!(less_than(&Term::string("a"), &Term::string("b")).unwrap());
    }

    #[test]
    fn test_boolean_ordering() {
        assert!(less_than(&Term::from(false), &Term::from(true)).unwrap());
        assert!(!less_than(&Term::from(true), &Term::from(true)).unwrap());
    }

    #[test]
    fn test_datetime_ordering() {
        let a = dt("2008-01-01T00:00:00Z");
        let b = dt("2008-01-01T00:00:01Z");
        assert!(less_than(&a, &b).unwrap());
        assert!(greater_than_or_equal(&b, &a).unwrap());
    }

    #[test]
    fn test_ordering_type_errors() {
        // non-literals
        assert!(less_than(&Term::iri("a:b"), &int("1")).is_err());
        assert!(less_than(&Term::blank("b"), &Term::blank("c")).is_err());
        // simple vs typed string
        assert!(less_than(&Term::simple("a"), &Term::string("b")).is_err());
        // numeric vs string
        assert!(less_than(&int("1"), &Term::string("2")).is_err());
        assert!(less_than(&Term::string("2"), &float("1")).is_err());
        // differing non-numeric datatypes
        assert!(less_than(&Term::from(true), &dt("2008-01-01T00:00:00Z")).is_err());
    }

    #[test]
    fn test_derived_relations() {
        let pairs = [
            (int("1"), int("2")),
            (int("2"), int("2")),
            (float("3.5"), int("2")),
            (Term::simple("a"), Term::simple("b")),
            (Term::from(true), Term::from(false)),
        ];
        for (a, b) in &pairs {
            assert_eq!(less_than(a, b).unwrap(), greater_than(b, a).unwrap());
            assert_eq!(
                less_than_or_equal(a, b).unwrap(),
                !greater_than(a, b).unwrap()
            );
            assert_eq!(
                greater_than_or_equal(a, b).unwrap(),
                !less_than(a, b).unwrap()
            );
        }
    }

    #[test]
    fn test_nan_is_unordered() {
        let nan = Term::from(f64::NAN);
        assert!(!less_than(&nan, &int("1")).unwrap());
        assert!(!greater_than(&nan, &int("1")).unwrap());
        assert_eq!(compare(&nan, &int("1")).unwrap(), None);
    }

    // =========================================================================
    // Term equality
    // =========================================================================

    #[test]
    fn test_numeric_equality_across_types() {
        let seven = int("7");
        let seven_d = Term::typed("7.0", xsd::DOUBLE).unwrap();
        assert!(term_equals(&seven, &seven_d).unwrap());
        assert!(!seven.same_term(&seven_d));
        assert!(term_equals(&seven, &float("7")).unwrap());
        assert!(!term_equals(&seven, &int("8")).unwrap());
    }

    #[test]
    fn test_simple_literal_equality() {
        assert!(term_equals(&Term::simple("a"), &Term::simple("a")).unwrap());
        assert!(!term_equals(&Term::simple("a"), &Term::lang("a", "en")).unwrap());
        assert!(term_equals(&Term::lang("a", "en"), &Term::lang("a", "en")).unwrap());
        assert!(!term_equals(&Term::lang("a", "en"), &Term::lang("a", "fr")).unwrap());
        // one side simple, other typed: unequal, not an error
        assert!(!term_equals(&Term::simple("a"), &Term::string("a")).unwrap());
        assert!(!term_equals(&int("7"), &Term::simple("7")).unwrap());
    }

    #[test]
    fn test_direct_type_equality() {
        assert!(term_equals(&Term::string("x"), &Term::string("x")).unwrap());
        assert!(!term_equals(&Term::string("x"), &Term::string("y")).unwrap());
        assert!(!term_equals(&Term::from(true), &Term::from(false)).unwrap());
        assert!(term_equals(
            &dt("2024-01-01T05:00:00Z"),
            &dt("2024-01-01T00:00:00-05:00")
        )
        .unwrap());
    }

    #[test]
    fn test_incompatible_literals_are_type_errors() {
        let err = term_equals(&int("7"), &Term::string("7")).unwrap_err();
        assert!(err.to_string().contains("terms are not equal"));
        assert!(term_equals(&Term::from(true), &Term::string("true")).is_err());

        let custom_a = Term::typed("a", "http://example.org/dt").unwrap();
        let custom_b = Term::typed("b", "http://example.org/dt").unwrap();
        assert!(term_equals(&custom_a, &custom_a.clone()).unwrap());
        assert!(term_equals(&custom_a, &custom_b).is_err());
    }

    #[test]
    fn test_non_literal_equality() {
        assert!(term_equals(&Term::iri("a:b"), &Term::iri("a:b")).unwrap());
        assert!(!term_equals(&Term::iri("a:b"), &Term::iri("a:c")).unwrap());
        assert!(!term_equals(&Term::iri("a:b"), &Term::blank("a:b")).unwrap());
        assert!(!term_equals(&Term::string("a:b"), &Term::iri("a:b")).unwrap());
        assert!(!term_equals(&Term::blank("b1"), &Term::simple("b1")).unwrap());
        assert!(term_equals(&Term::blank("b1"), &Term::blank("b1")).unwrap());
        assert!(!term_equals(&Term::blank("b1"), &Term::blank("b2")).unwrap());
    }
}
