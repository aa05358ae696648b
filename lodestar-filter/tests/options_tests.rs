//! Evaluation options: JSON loading and their effect on evaluation

use lodestar_filter::options::{DEFAULT_FUNCTION_CACHE_CAPACITY, DEFAULT_REGEX_SIZE_LIMIT};
use lodestar_filter::{
    Expression, Filter, FilterError, FilterOptions, FunctionRegistry, NativeValue,
    StaticResolver, Term,
};
use std::sync::Arc;

#[test]
fn test_json_round_trip() {
    let opts = FilterOptions::new()
        .with_regex_size_limit(4096)
        .with_function_cache_capacity(3);
    let json = serde_json::to_string(&opts).unwrap();
    let back: FilterOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, opts);
}

#[test]
fn test_missing_fields_take_defaults() {
    let opts: FilterOptions = serde_json::from_str(r#"{"regex_size_limit": 2048}"#).unwrap();
    assert_eq!(opts.regex_size_limit, 2048);
    assert_eq!(opts.function_cache_capacity, DEFAULT_FUNCTION_CACHE_CAPACITY);

    let empty: FilterOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, FilterOptions::default());
    assert_eq!(empty.regex_size_limit, DEFAULT_REGEX_SIZE_LIMIT);
}

#[test]
fn test_rejects_wrong_types() {
    let bad = serde_json::from_str::<FilterOptions>(r#"{"regex_size_limit": "big"}"#);
    assert!(bad.is_err());
}

#[test]
fn test_function_cache_capacity_bounds_registry() {
    let opts = FilterOptions::new().with_function_cache_capacity(2);
    let mut resolver = StaticResolver::new();
    for name in ["urn:a", "urn:b", "urn:c"] {
        resolver.register_fn(name, 0, |_| Ok(NativeValue::Boolean(true)));
    }
    let mut registry = FunctionRegistry::with_options(&opts);
    registry.add_resolver(resolver);

    for name in ["urn:a", "urn:b", "urn:c"] {
        assert!(registry.lookup(name, 0).is_ok());
    }
    assert_eq!(registry.cached(), 2);
}

#[test]
fn test_zero_capacity_still_resolves() {
    let opts = FilterOptions::new().with_function_cache_capacity(0);
    let mut resolver = StaticResolver::new();
    resolver.register_fn("urn:a", 0, |_| Ok(NativeValue::Long(1)));
    let mut registry = FunctionRegistry::with_options(&opts);
    registry.add_resolver(resolver);
    let registry = Arc::new(registry);

    let call = Expression::function_call("urn:a", vec![], &registry).unwrap();
    assert_eq!(call.eval().unwrap(), Term::from(1i64));
}

#[test]
fn test_regex_size_limit_applies_to_nested_regex() {
    // a{1000}{1000} expands far beyond a 1 KiB program limit
    let regex = Expression::regex(
        Expression::constant(Term::simple("aaa")),
        Expression::constant(Term::simple("a{1000}{1000}")),
        None,
    );
    let expr = Expression::and(vec![Expression::constant(true), regex]);
    let opts = FilterOptions::new().with_regex_size_limit(1024);
    let filter = Filter::with_options(expr, &opts);

    let err = filter.expression().eval_to_bool().unwrap_err();
    assert!(matches!(err, FilterError::InvalidFilter(_)));

    let roomy = Expression::regex(
        Expression::constant(Term::simple("aaa")),
        Expression::constant(Term::simple("^a+$")),
        None,
    );
    let filter = Filter::with_options(roomy, &opts);
    assert!(filter.expression().eval_to_bool().unwrap());
}
