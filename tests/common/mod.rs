// edn-codec - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared helpers for edn-codec integration tests.
//!
//! # Macros
//!
//! - [`assert_loads!`] - Assert that text loads to an expected value
//! - [`assert_dumps!`] - Assert that a value dumps to expected text
//! - [`assert_round_trips!`] - Assert that text survives load and dump

#[allow(unused_imports)]
pub use edn_codec::{
    Error, Keyword, ReadOptions, Symbol, Value, ValueKind, WriteOptions, Writer, dumps,
    dumps_with, loads, loads_with,
};

/// Shorthand for a list of integer values.
#[allow(dead_code)]
pub fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::int).collect()
}

/// Shorthand for an unprefixed keyword value.
#[allow(dead_code)]
pub fn kw(name: &str) -> Value {
    Value::keyword(Keyword::new(name))
}

/// Assert that loading `text` produces the expected value.
#[macro_export]
macro_rules! assert_loads {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::loads($input);
        assert!(
            result.is_ok(),
            "Failed to load '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Loading '{}' did not match expected",
            $input
        );
    };
}

/// Assert that dumping `value` produces the expected text.
#[macro_export]
macro_rules! assert_dumps {
    ($value:expr, $expected:expr) => {
        let value = $value;
        let result = $crate::common::dumps(&value);
        assert!(
            result.is_ok(),
            "Failed to dump {:?}: {:?}",
            value,
            result.err()
        );
        assert_eq!(result.unwrap(), $expected);
    };
}

/// Assert that loading `text`, dumping and loading again gives an equal
/// value.
#[macro_export]
macro_rules! assert_round_trips {
    ($input:expr) => {
        let first = $crate::common::loads($input).unwrap();
        let text = $crate::common::dumps(&first).unwrap();
        let second = $crate::common::loads(&text).unwrap();
        assert_eq!(first, second, "'{}' changed after printing as '{}'", $input, text);
    };
}
