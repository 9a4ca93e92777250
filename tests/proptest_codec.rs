// edn-codec - Property-based tests for loads/dumps
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for the loads/dumps round trip.

mod common;

use common::*;
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::nil()),
        any::<bool>().prop_map(Value::bool),
        any::<i64>().prop_map(Value::int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::float),
        "[ -~]{0,12}".prop_map(Value::string),
        "[a-z][a-z0-9-]{0,6}"
            .prop_filter("reserved word", |s| {
                !matches!(s.as_str(), "nil" | "true" | "false")
            })
            .prop_map(|s| kw(&s)),
        any::<u128>().prop_map(|n| Value::uuid(uuid::Uuid::from_u128(n))),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::list),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::vector),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::set),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Value::map),
            inner.prop_map(|v| Value::tagged(Symbol::with_prefix("app", "thing"), v)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// dumps then loads gives back an equal value
    #[test]
    fn dumps_then_loads(value in arb_value()) {
        let text = dumps(&value).unwrap();
        prop_assert_eq!(loads(&text).unwrap(), value, "via {}", text);
    }

    /// text -> value -> text -> value
    #[test]
    fn loads_dumps_loads(value in arb_value()) {
        let text = dumps(&value).unwrap();
        let first = loads(&text).unwrap();
        let again = loads(&dumps(&first).unwrap()).unwrap();
        prop_assert_eq!(first, again);
    }

    /// Arbitrary input either loads or fails with an error, never panics
    #[test]
    fn loads_never_panics(text in "\\PC{0,40}") {
        let _ = loads(&text);
    }
}
