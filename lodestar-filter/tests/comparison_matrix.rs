//! Equality and ordering over bound variables
//!
//! Each table walks a two-column row cursor and checks `=`, `sameTerm` and
//! `!=` (or the four relational operators) on every row.

use lodestar_filter::{Context, Expression, FilterError, MemoryContext, Term};
use lodestar_vocab::xsd;
use std::rc::Rc;

fn typed(lex: &str, dt: &str) -> Term {
    Term::typed(lex, dt).unwrap()
}

fn bind(expr: &mut Expression, ctx: &Rc<dyn Context>) {
    expr.set_context(ctx);
}

fn assert_type_error(result: Result<bool, FilterError>, it: usize) {
    let err = result.expect_err(&format!("row {}: expected a type error", it));
    assert!(err.to_string().starts_with("Type Error"), "row {}: {}", it, err);
}

fn assert_unbound(result: Result<bool, FilterError>, it: usize) {
    let err = result.expect_err(&format!("row {}: expected unbound", it));
    assert!(err.to_string().starts_with("Unbound column"), "row {}: {}", it, err);
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn test_equality_matrix() {
    let seven = typed("7", xsd::INT);
    let seven_f = typed("7.0", xsd::FLOAT);
    let simple = Term::simple("foo");
    let string = typed("foo", xsd::STRING);
    let en = Term::lang("foo", "en");
    let fr = Term::lang("foo", "fr");
    let int_iri = Term::iri(xsd::INT);
    let float_iri = Term::iri(xsd::FLOAT);

    let rows = vec![
        (seven.clone(), Some(seven.clone())),
        (seven.clone(), Some(seven_f.clone())),
        //
        (simple.clone(), Some(simple.clone())),
        (simple.clone(), Some(string.clone())),
        (simple.clone(), Some(en.clone())),
        (simple.clone(), Some(fr.clone())),
        //
        (seven.clone(), Some(string.clone())),
        (seven_f.clone(), Some(string.clone())),
        (string.clone(), Some(seven.clone())),
        (string.clone(), Some(seven_f.clone())),
        //
        (string.clone(), Some(string.clone())),
        (string.clone(), Some(en.clone())),
        (en.clone(), Some(en.clone())),
        (en.clone(), Some(fr.clone())),
        //
        (string.clone(), Some(int_iri.clone())),
        (string.clone(), Some(Term::blank("101"))),
        //
        (int_iri.clone(), Some(int_iri.clone())),
        (int_iri.clone(), Some(float_iri)),
        (int_iri, Some(Term::blank("100"))),
        //
        (string, None),
        //
        (Term::blank("101"), Some(Term::blank("101"))),
        (Term::blank("101"), Some(Term::blank("102"))),
    ];
    // t: equal, e: equivalent, f: unequal, l: undecidable, x: unbound
    let results = "te tfff llll tftf ff tff x tf";

    // first column unbound in the "x" row, matching the table above
    let table = rows
        .into_iter()
        .map(|(l, r)| match r {
            Some(r) => vec![Some(l), Some(r)],
            None => vec![None, Some(l)],
        })
        .collect();
    let mem = Rc::new(MemoryContext::new(&["x", "y"], table));
    let ctx: Rc<dyn Context> = mem.clone();

    let mut eq = Expression::eq(Expression::var("x"), Expression::var("y"));
    let mut same = Expression::same_term(Expression::var("x"), Expression::var("y"));
    let mut ne = Expression::ne(Expression::var("x"), Expression::var("y"));
    bind(&mut eq, &ctx);
    bind(&mut same, &ctx);
    bind(&mut ne, &ctx);

    for (it, expected) in results.chars().filter(|c| *c != ' ').enumerate() {
        assert!(mem.next(), "row {}", it);
        match expected {
            't' => {
                assert!(eq.eval_to_bool().unwrap(), "row {}", it);
                assert!(same.eval_to_bool().unwrap(), "row {}", it);
                assert!(!ne.eval_to_bool().unwrap(), "row {}", it);
            }
            'f' => {
                assert!(!eq.eval_to_bool().unwrap(), "row {}", it);
                assert!(!same.eval_to_bool().unwrap(), "row {}", it);
                assert!(ne.eval_to_bool().unwrap(), "row {}", it);
            }
            'e' => {
                assert!(eq.eval_to_bool().unwrap(), "row {}", it);
                assert!(!same.eval_to_bool().unwrap(), "row {}", it);
                assert!(!ne.eval_to_bool().unwrap(), "row {}", it);
            }
            'l' => {
                assert!(!same.eval_to_bool().unwrap(), "row {}", it);
                assert_type_error(eq.eval_to_bool(), it);
                assert_type_error(ne.eval_to_bool(), it);
            }
            'x' => {
                assert_unbound(eq.eval_to_bool(), it);
                assert_unbound(same.eval_to_bool(), it);
                assert_unbound(ne.eval_to_bool(), it);
            }
            other => unreachable!("bad marker {}", other),
        }
    }
    assert!(!mem.next());
}

#[test]
fn test_equality_of_constants() {
    let t = Expression::constant(true);
    let f = Expression::constant(false);
    let eq = |l: &Expression, r: &Expression| Expression::eq(l.clone(), r.clone()).eval_to_bool();

    assert!(eq(&t, &t).unwrap());
    assert!(eq(&f, &f).unwrap());
    assert!(!eq(&t, &f).unwrap());
    assert_type_error(eq(&Expression::constant(7i32), &f), 0);

    let a = Expression::constant(Term::iri("http://mulgara.org/path/to/data.rdf"));
    let b = Expression::constant(Term::iri("http://mulgara.org/path/to/../to/data.rdf"));
    assert!(!eq(&a, &b).unwrap());
    assert!(eq(&a, &a.clone()).unwrap());
}

#[test]
fn test_term_equality_diverges_from_same_term() {
    let seven = Expression::constant(typed("7", xsd::INTEGER));
    let seven_d = Expression::constant(typed("7.0", xsd::DOUBLE));
    assert!(Expression::eq(seven.clone(), seven_d.clone()).eval_to_bool().unwrap());
    assert!(!Expression::same_term(seven, seven_d).eval_to_bool().unwrap());
}

#[test]
fn test_decimal_equals_inexact_double() {
    let pairs = [("0.1", "0.1"), ("1.1", "1.1"), ("-2.675", "-2.675"), ("0.3", "0.3e0")];
    let rows = pairs
        .iter()
        .map(|(d, f)| vec![Some(typed(d, xsd::DECIMAL)), Some(typed(f, xsd::DOUBLE))])
        .collect();
    let mem = Rc::new(MemoryContext::new(&["d", "f"], rows));
    let ctx: Rc<dyn Context> = mem.clone();

    let d = || Expression::var("d");
    let f = || Expression::var("f");
    let mut exprs = [
        Expression::eq(d(), f()),
        Expression::lt(d(), f()),
        Expression::gt(d(), f()),
        Expression::eq(f(), d()),
    ];
    for expr in exprs.iter_mut() {
        bind(expr, &ctx);
    }

    let mut it = 0;
    while mem.next() {
        let [eq, lt, gt, flipped] = &exprs;
        assert!(eq.eval_to_bool().unwrap(), "row {}: decimal = double", it);
        assert!(!lt.eval_to_bool().unwrap(), "row {}: decimal < double", it);
        assert!(!gt.eval_to_bool().unwrap(), "row {}: decimal > double", it);
        assert!(flipped.eval_to_bool().unwrap(), "row {}: double = decimal", it);
        it += 1;
    }
    assert_eq!(it, pairs.len());

    // 0.1 + 0.2 as a double is not 0.3
    let sum = Expression::add(
        Expression::constant(typed("0.1", xsd::DOUBLE)),
        Expression::constant(typed("0.2", xsd::DOUBLE)),
    );
    let three_tenths = Expression::constant(typed("0.3", xsd::DECIMAL));
    assert!(Expression::lt(three_tenths, sum).eval_to_bool().unwrap());
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_inequality_matrix() {
    let seven = typed("7", xsd::INT);
    let seven_f = typed("7.0", xsd::FLOAT);
    let eight = typed("8", xsd::INT);
    let eight_f = typed("8.0", xsd::FLOAT);
    let simple = Term::simple("foo");
    let simple_large = Term::simple("goo");
    let string = typed("foo", xsd::STRING);
    let string_large = typed("goo", xsd::STRING);

    let pairs = vec![
        (Some(seven.clone()), seven.clone()),
        (Some(seven.clone()), seven_f.clone()),
        (Some(seven.clone()), eight),
        (Some(seven.clone()), eight_f),
        (Some(simple.clone()), simple.clone()),
        (Some(simple.clone()), simple_large),
        (Some(simple), string.clone()),
        (Some(seven.clone()), string.clone()),
        (Some(seven_f.clone()), string.clone()),
        (Some(string.clone()), seven),
        (Some(string.clone()), seven_f),
        (Some(string.clone()), string.clone()),
        (Some(string.clone()), string_large),
        (None, string),
    ];
    // e: equal, l: less, x: type error, n: unbound
    let results = "eell elx xxxx el n";

    let table = pairs.into_iter().map(|(l, r)| vec![l, Some(r)]).collect();
    let mem = Rc::new(MemoryContext::new(&["x", "y"], table));
    let ctx: Rc<dyn Context> = mem.clone();

    let x = || Expression::var("x");
    let y = || Expression::var("y");
    let mut ops = [
        Expression::lt(x(), y()),
        Expression::le(x(), y()),
        Expression::gt(x(), y()),
        Expression::ge(x(), y()),
    ];
    for op in ops.iter_mut() {
        bind(op, &ctx);
    }

    for (it, expected) in results.chars().filter(|c| *c != ' ').enumerate() {
        assert!(mem.next(), "row {}", it);
        let got: Vec<_> = ops.iter().map(Expression::eval_to_bool).collect();
        match expected {
            'e' => assert_eq!(got, vec![Ok(false), Ok(true), Ok(false), Ok(true)], "row {}", it),
            'l' => assert_eq!(got, vec![Ok(true), Ok(true), Ok(false), Ok(false)], "row {}", it),
            'x' => {
                for r in got {
                    assert_type_error(r, it);
                }
            }
            'n' => {
                for r in got {
                    assert_unbound(r, it);
                }
            }
            other => unreachable!("bad marker {}", other),
        }
    }
    assert!(!mem.next());
}

#[test]
fn test_comparators_are_consistent() {
    let terms = vec![
        typed("7", xsd::INTEGER),
        typed("7.0", xsd::FLOAT),
        typed("-3", xsd::BYTE),
        typed("2.5", xsd::DECIMAL),
        typed("1e10", xsd::DOUBLE),
        Term::simple("apple"),
        Term::simple("banana"),
        typed("true", xsd::BOOLEAN),
        typed("false", xsd::BOOLEAN),
        typed("2024-01-01T00:00:00Z", xsd::DATE_TIME),
        typed("2023-06-30T12:00:00-07:00", xsd::DATE_TIME),
    ];
    let mut checked = 0;
    for a in &terms {
        for b in &terms {
            let (ea, eb) = (Expression::constant(a.clone()), Expression::constant(b.clone()));
            let lt = Expression::lt(ea.clone(), eb.clone()).eval_to_bool();
            let gt_rev = Expression::gt(eb.clone(), ea.clone()).eval_to_bool();
            let le = Expression::le(ea.clone(), eb.clone()).eval_to_bool();
            let gt = Expression::gt(ea.clone(), eb.clone()).eval_to_bool();
            let ge = Expression::ge(ea.clone(), eb.clone()).eval_to_bool();
            if let Ok(lt) = lt {
                checked += 1;
                assert_eq!(Ok(lt), gt_rev, "{} < {}", a, b);
                assert_eq!(le, gt.map(|g| !g), "{} <= {}", a, b);
                assert_eq!(ge, Ok(!lt), "{} >= {}", a, b);
            } else {
                assert!(gt_rev.is_err() && le.is_err() && ge.is_err(), "{} vs {}", a, b);
            }
        }
    }
    // 5 numerics, 2 strings, 2 booleans, 2 dateTimes
    assert_eq!(checked, 25 + 4 + 4 + 4);
}
