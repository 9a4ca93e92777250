// edn-parser - Property-based tests for terms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for the term model and the text round trip.
//!
//! Printing a term and reading the text back must give an equal term, and
//! equal terms must hash equally.

mod common;

use common::*;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn compute_hash(term: &Term) -> u64 {
    let mut hasher = DefaultHasher::new();
    term.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// unparse followed by read gives back the same term
    #[test]
    fn unparse_read_roundtrip(term in arb_term()) {
        let text = unparse(&term);
        let back = read(&text);
        prop_assert!(back.is_ok(), "failed to read {:?}: {:?}", text, back);
        prop_assert_eq!(back.unwrap(), term);
    }

    /// Printing is stable: a second round trip produces identical text
    #[test]
    fn unparse_is_stable(term in arb_term()) {
        let text = unparse(&term);
        let again = unparse(&read(&text).unwrap());
        prop_assert_eq!(text, again);
    }

    /// Clones are equal and hash equally
    #[test]
    fn clone_hash_eq_consistency(term in arb_term()) {
        let copy = term.clone();
        prop_assert_eq!(&term, &copy);
        prop_assert_eq!(compute_hash(&term), compute_hash(&copy));
    }

    /// Sets built from permuted or duplicated elements are equal
    #[test]
    fn set_construction_deduplicates(items in prop::collection::vec(arb_scalar(), 0..10)) {
        let mut shuffled = items.clone();
        shuffled.reverse();
        shuffled.extend(items.iter().cloned());

        let a = Term::set(items);
        let b = Term::set(shuffled);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(compute_hash(&a), compute_hash(&b));
    }

    /// Ordering agrees with equality
    #[test]
    fn ordering_agrees_with_equality(a in arb_term(), b in arb_term()) {
        prop_assert_eq!(a.cmp(&b) == std::cmp::Ordering::Equal, a == b);
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    /// Integer literals read as Int or, past i64, as BigInt
    #[test]
    fn integer_literals(n in any::<i128>()) {
        let term = read(&n.to_string()).unwrap();
        match i64::try_from(n) {
            Ok(small) => prop_assert_eq!(term, Term::int(small)),
            Err(_) => prop_assert_eq!(term, Term::bigint(n)),
        }
    }

    /// Arbitrary text never panics the reader
    #[test]
    fn reader_never_panics(text in "\\PC{0,40}") {
        let _ = read(&text);
        let _ = read_all(&text);
    }
}
