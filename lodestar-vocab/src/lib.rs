//! RDF Vocabulary Constants for lodestar
//!
//! This crate provides a centralized location for the IRIs the filter engine
//! needs to recognize: XML Schema datatypes and the RDF terms that appear as
//! literal datatypes.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:XMLLiteral IRI
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// Abbreviated prefix accepted in place of [`NAMESPACE`]
    pub const PREFIX: &str = "xsd:";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:unsignedLong IRI
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";

    /// xsd:unsignedInt IRI
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";

    /// xsd:unsignedShort IRI
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";

    /// xsd:unsignedByte IRI
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";

    /// xsd:nonNegativeInteger IRI
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

    /// xsd:positiveInteger IRI
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";

    /// xsd:nonPositiveInteger IRI
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";

    /// xsd:negativeInteger IRI
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    // ========================================================================
    // Abbreviation Handling
    // ========================================================================

    /// Expand an `xsd:`-prefixed datatype name to its full IRI.
    ///
    /// Full IRIs and anything outside the XSD vocabulary pass through
    /// unchanged (borrowed). Only the abbreviated form allocates.
    ///
    /// ```
    /// use lodestar_vocab::xsd;
    ///
    /// assert_eq!(xsd::expand("xsd:int"), xsd::INT);
    /// assert_eq!(xsd::expand(xsd::INT), xsd::INT);
    /// assert_eq!(xsd::expand("foo:bar"), "foo:bar");
    /// ```
    pub fn expand(datatype_iri: &str) -> std::borrow::Cow<'_, str> {
        match datatype_iri.strip_prefix(PREFIX) {
            Some(local) => std::borrow::Cow::Owned(format!("{}{}", NAMESPACE, local)),
            None => std::borrow::Cow::Borrowed(datatype_iri),
        }
    }

    /// True if the IRI names something in the XSD namespace, in either form.
    #[inline]
    pub fn is_xsd(iri: &str) -> bool {
        iri.starts_with(NAMESPACE) || iri.starts_with(PREFIX)
    }

    // ========================================================================
    // Datatype Families
    // ========================================================================

    /// Check if a datatype IRI is an integer-family type
    #[inline]
    pub fn is_integer_family(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | LONG
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_LONG
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | UNSIGNED_BYTE
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
        )
    }

    /// Width rank of an integer-family datatype: byte < short < int < long < integer.
    ///
    /// The unsigned and sign-constrained types rank with `xsd:integer`.
    /// Returns `None` outside the integer family.
    #[inline]
    pub fn integer_rank(datatype_iri: &str) -> Option<u8> {
        match datatype_iri {
            BYTE => Some(0),
            SHORT => Some(1),
            INT => Some(2),
            LONG => Some(3),
            dt if is_integer_family(dt) => Some(4),
            _ => None,
        }
    }

    /// The wider of two integer-family datatypes, or `None` if either is not
    /// an integer type. Unequal types of equal rank widen to `xsd:integer`.
    pub fn wider_integer_type<'a>(left: &'a str, right: &'a str) -> Option<&'a str> {
        let l = integer_rank(left)?;
        let r = integer_rank(right)?;
        Some(match l.cmp(&r) {
            std::cmp::Ordering::Greater => left,
            std::cmp::Ordering::Less => right,
            std::cmp::Ordering::Equal if left == right => left,
            std::cmp::Ordering::Equal => INTEGER,
        })
    }

    // ========================================================================
    // Integer Range Validation
    // ========================================================================

    /// Get the valid range bounds for an integer subtype as (min, max) inclusive.
    ///
    /// Integer values are held as i64, so the unbounded types are clamped to
    /// the i64 range. Returns `None` for non-integer types.
    #[inline]
    pub fn integer_bounds(datatype_iri: &str) -> Option<(i64, i64)> {
        match datatype_iri {
            BYTE => Some((i8::MIN as i64, i8::MAX as i64)),
            SHORT => Some((i16::MIN as i64, i16::MAX as i64)),
            INT => Some((i32::MIN as i64, i32::MAX as i64)),
            LONG | INTEGER => Some((i64::MIN, i64::MAX)),
            UNSIGNED_BYTE => Some((0, u8::MAX as i64)),
            UNSIGNED_SHORT => Some((0, u16::MAX as i64)),
            UNSIGNED_INT => Some((0, u32::MAX as i64)),
            UNSIGNED_LONG | NON_NEGATIVE_INTEGER => Some((0, i64::MAX)),
            POSITIVE_INTEGER => Some((1, i64::MAX)),
            NEGATIVE_INTEGER => Some((i64::MIN, -1)),
            NON_POSITIVE_INTEGER => Some((i64::MIN, 0)),
            _ => None,
        }
    }

    /// Get the local name portion of a datatype IRI (e.g., "integer" from xsd:integer)
    #[inline]
    pub fn datatype_local_name(datatype_iri: &str) -> Option<&str> {
        datatype_iri
            .strip_prefix(NAMESPACE)
            .or_else(|| datatype_iri.strip_prefix(PREFIX))
    }
}
