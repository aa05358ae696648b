//! Shared helpers for function evaluation

use crate::error::{FilterError, Result};
use crate::ir::Expression;
use lodestar_core::Term;
use regex::{Regex, RegexBuilder};

/// Check that a function received exactly `expected` arguments
pub fn check_arity(args: &[Expression], expected: usize, fn_name: &str) -> Result<()> {
    if args.len() != expected {
        Err(FilterError::InvalidFilter(format!(
            "{} requires exactly {} argument{}",
            fn_name,
            expected,
            if expected == 1 { "" } else { "s" }
        )))
    } else {
        Ok(())
    }
}

/// Check that a function received at least `min` arguments
pub fn check_min_arity(args: &[Expression], min: usize, fn_name: &str) -> Result<()> {
    if args.len() < min {
        Err(FilterError::InvalidFilter(format!(
            "{} requires at least {} argument{}",
            fn_name,
            min,
            if min == 1 { "" } else { "s" }
        )))
    } else {
        Ok(())
    }
}

/// Evaluate exactly two arguments, left first
pub fn eval_pair(args: &[Expression], fn_name: &str) -> Result<(Term, Term)> {
    check_arity(args, 2, fn_name)?;
    let left = args[0].eval()?;
    let right = args[1].eval()?;
    Ok((left, right))
}

/// Evaluate the single argument of a unary function
pub fn eval_single(args: &[Expression], fn_name: &str) -> Result<Term> {
    check_arity(args, 1, fn_name)?;
    args[0].eval()
}

/// Build a regex with optional flags
///
/// Supported flags: i (case-insensitive), m (multiline), s (dot-all), x (ignore whitespace).
/// Unknown flags are an error.
pub fn build_regex_with_flags(pattern: &str, flags: &str, size_limit: usize) -> Result<Regex> {
    let mut builder = RegexBuilder::new(pattern);
    builder.size_limit(size_limit);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            c => {
                return Err(FilterError::InvalidFilter(format!(
                    "Unknown regex flag: '{}'",
                    c
                )));
            }
        }
    }
    builder
        .build()
        .map_err(|e| FilterError::InvalidFilter(format!("Invalid regex: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_REGEX_SIZE_LIMIT;

    #[test]
    fn test_arity() {
        let args = vec![Expression::constant(1i64)];
        assert!(check_arity(&args, 1, "f").is_ok());
        let err = check_arity(&args, 2, "f").unwrap_err();
        assert_eq!(err.to_string(), "Invalid filter: f requires exactly 2 arguments");
        assert!(check_min_arity(&args, 1, "f").is_ok());
        assert!(check_min_arity(&args, 2, "f").is_err());
    }

    #[test]
    fn test_regex_flags() {
        let re = build_regex_with_flags("^abc$", "i", DEFAULT_REGEX_SIZE_LIMIT).unwrap();
        assert!(re.is_match("ABC"));
        let re = build_regex_with_flags("a.c", "s", DEFAULT_REGEX_SIZE_LIMIT).unwrap();
        assert!(re.is_match("a\nc"));
        let re = build_regex_with_flags("a b c", "x", DEFAULT_REGEX_SIZE_LIMIT).unwrap();
        assert!(re.is_match("abc"));
        assert!(build_regex_with_flags("a", "q", DEFAULT_REGEX_SIZE_LIMIT).is_err());
        assert!(build_regex_with_flags("(", "", DEFAULT_REGEX_SIZE_LIMIT).is_err());
    }

    #[test]
    fn test_regex_size_limit() {
        assert!(build_regex_with_flags("\\w{1000}", "", 64).is_err());
    }
}
