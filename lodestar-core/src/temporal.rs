//! XSD dateTime values
//!
//! A [`DateTime`] keeps the original lexical form for output and a normalized
//! UTC instant for comparison, so `"2024-01-01T05:00:00Z"` equals
//! `"2024-01-01T00:00:00-05:00"`. Values without a timezone are treated as UTC.

use chrono::{DateTime as ChronoDateTime, FixedOffset, NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// XSD dateTime with timezone preservation
#[derive(Clone, Debug)]
pub struct DateTime {
    /// Normalized UTC instant for comparison
    instant: ChronoDateTime<Utc>,
    /// Original timezone offset (None = no timezone in input, treated as UTC)
    tz_offset: Option<FixedOffset>,
    /// Original string for round-trip output
    original: String,
}

impl DateTime {
    /// Parse an XSD dateTime string
    ///
    /// Accepts:
    /// - RFC3339/ISO8601 with timezone: `2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+05:00`
    /// - Without timezone (treated as UTC): `2024-01-15T10:30:00`
    /// - With fractional seconds: `2024-01-15T10:30:00.123Z`
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Ok(dt) = ChronoDateTime::parse_from_rfc3339(s) {
            return Ok(Self {
                instant: dt.with_timezone(&Utc),
                tz_offset: Some(*dt.offset()),
                original: s.to_string(),
            });
        }

        // Offsets without a colon, e.g. "2024-01-15T10:30:00+0500"
        for fmt in &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z"] {
            if let Ok(dt) = ChronoDateTime::parse_from_str(s, fmt) {
                return Ok(Self {
                    instant: dt.with_timezone(&Utc),
                    tz_offset: Some(*dt.offset()),
                    original: s.to_string(),
                });
            }
        }

        for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self {
                    instant: ndt.and_utc(),
                    tz_offset: None,
                    original: s.to_string(),
                });
            }
        }

        Err(format!("Cannot parse dateTime: {}", s))
    }

    /// Get the normalized UTC instant
    pub fn instant(&self) -> ChronoDateTime<Utc> {
        self.instant
    }

    /// Get the original timezone offset (if any)
    pub fn tz_offset(&self) -> Option<FixedOffset> {
        self.tz_offset
    }

    /// Get the original string representation
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for DateTime {}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
