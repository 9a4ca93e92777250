// edn-parser - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared helpers and proptest strategies for edn-parser integration tests.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Macros
//!
//! - [`assert_reads!`] - Assert that text parses to an expected term
//! - [`assert_read_err!`] - Assert that text fails to parse

#[allow(unused_imports)]
pub use edn_parser::{Keyword, ParseError, Symbol, Term, read, read_all, unparse};
use proptest::prelude::*;

/// Parse `text`, returning the error message on failure.
#[must_use]
pub fn read_str(text: &str) -> Result<Term, String> {
    read(text).map_err(|e| e.to_string())
}

/// Strategy for identifiers that the lexer reads back as symbols.
#[allow(dead_code)]
pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9*!?-]{0,6}".prop_filter("reserved word", |s| {
        !matches!(s.as_str(), "nil" | "true" | "false")
    })
}

/// Strategy for symbols, with or without a prefix.
#[allow(dead_code)]
pub fn arb_symbol() -> impl Strategy<Value = Symbol> {
    (proptest::option::of("[a-z][a-z0-9.]{0,5}"), arb_name()).prop_map(|(prefix, name)| {
        match prefix {
            Some(prefix) => Symbol::with_prefix(&prefix, &name),
            None => Symbol::new(&name),
        }
    })
}

/// Strategy for keywords, with or without a prefix.
#[allow(dead_code)]
pub fn arb_keyword() -> impl Strategy<Value = Keyword> {
    arb_symbol().prop_map(Keyword::from)
}

/// Strategy for tags: symbols whose first character is alphabetic.
#[allow(dead_code)]
pub fn arb_tag() -> impl Strategy<Value = Symbol> {
    "[a-z][a-z0-9]{0,5}".prop_map(|s| Symbol::new(&s))
}

/// Strategy for atomic terms.
///
/// `##NaN` is left out: every NaN reads back as the canonical NaN, which
/// need not share the bits of the generated one.
#[allow(dead_code)]
pub fn arb_scalar() -> impl Strategy<Value = Term> {
    prop_oneof![
        Just(Term::nil()),
        any::<bool>().prop_map(Term::bool),
        any::<i64>().prop_map(Term::int),
        any::<i128>().prop_map(Term::bigint),
        any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(Term::float),
        any::<char>().prop_map(Term::char),
        any::<String>().prop_map(Term::string),
        arb_symbol().prop_map(Term::symbol),
        arb_keyword().prop_map(Term::keyword),
    ]
}

/// Strategy for arbitrary nested terms.
#[allow(dead_code)]
pub fn arb_term() -> impl Strategy<Value = Term> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Term::list),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Term::vector),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Term::set),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Term::map),
            (arb_tag(), inner).prop_map(|(tag, value)| Term::tagged(tag, value)),
        ]
    })
}

/// Assert that parsing `text` produces the expected term.
///
/// # Example
///
/// ```ignore
/// assert_reads!("[1 2]", Term::vector(vec![Term::int(1), Term::int(2)]));
/// ```
#[macro_export]
macro_rules! assert_reads {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::read_str($input);
        assert!(
            result.is_ok(),
            "Failed to read '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Reading '{}' did not match expected",
            $input
        );
    };
}

/// Assert that parsing `text` fails with a syntax error.
#[macro_export]
macro_rules! assert_read_err {
    ($input:expr) => {
        let result = $crate::common::read_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}
