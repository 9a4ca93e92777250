// edn-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared helpers and proptest strategies for edn-core integration tests.
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
//! - [`assert_decodes!`] - Assert that text decodes to an expected value
//! - [`assert_encodes!`] - Assert that a value encodes to expected text
//! - [`assert_decode_err!`] - Assert that decoding text fails

#[allow(unused_imports)]
pub use edn_core::{
    Decoder, Encoder, Error, Keyword, ReadOptions, Symbol, Term, Value, WriteOptions, Writer,
};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use edn_parser::{read, unparse};
use proptest::prelude::*;
use uuid::Uuid;

/// Parse and decode `text` with `options`.
#[allow(dead_code)]
pub fn decode_with(text: &str, options: &ReadOptions) -> Result<Value, Error> {
    let term = read(text)?;
    Decoder::new(options).decode(&term)
}

/// Parse and decode `text` with default options.
#[allow(dead_code)]
pub fn decode_str(text: &str) -> Result<Value, Error> {
    decode_with(text, &ReadOptions::default())
}

/// Encode and print `value` with `options`.
#[allow(dead_code)]
pub fn encode_with(value: &Value, options: &WriteOptions) -> Result<String, Error> {
    Encoder::new(options).encode(value).map(|term| unparse(&term))
}

/// Encode and print `value` with default options.
#[allow(dead_code)]
pub fn encode_str(value: &Value) -> Result<String, Error> {
    encode_with(value, &WriteOptions::default())
}

/// Shorthand for a vector of integers.
#[allow(dead_code)]
pub fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::int).collect()
}

/// Strategy for symbol names that read back as symbols.
#[allow(dead_code)]
pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9*!?-]{0,6}".prop_filter("reserved word", |s| {
        !matches!(s.as_str(), "nil" | "true" | "false")
    })
}

/// Strategy for tags with no built-in reader.
#[allow(dead_code)]
pub fn arb_tag() -> impl Strategy<Value = Symbol> {
    "[a-z][a-z0-9]{0,5}"
        .prop_filter("built-in tag", |s| !matches!(s.as_str(), "inst" | "uuid"))
        .prop_map(|s| Symbol::new(&s))
}

/// Strategy for timestamps with an arbitrary whole-minute offset.
#[allow(dead_code)]
pub fn arb_inst() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000, -720i32..=840).prop_map(
        |(secs, nanos, offset_minutes)| {
            let utc = Utc
                .timestamp_opt(secs, nanos)
                .single()
                .unwrap_or_default();
            let offset = FixedOffset::east_opt(offset_minutes * 60)
                .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
            utc.with_timezone(&offset)
        },
    )
}

/// Strategy for atomic values that survive a trip through text.
#[allow(dead_code)]
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::nil()),
        any::<bool>().prop_map(Value::bool),
        any::<i64>().prop_map(Value::int),
        any::<i128>().prop_map(Value::bigint),
        (-1.0e9f64..1.0e9).prop_map(Value::float),
        any::<char>().prop_map(Value::char),
        any::<String>().prop_map(Value::string),
        arb_name().prop_map(|n| Value::symbol(Symbol::new(&n))),
        arb_name().prop_map(|n| Value::keyword(Keyword::new(&n))),
        arb_inst().prop_map(Value::inst),
        any::<u128>().prop_map(|n| Value::uuid(Uuid::from_u128(n))),
    ]
}

/// Strategy for nested values.
#[allow(dead_code)]
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::list),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::vector),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::set),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Value::map),
            (arb_tag(), inner).prop_map(|(tag, value)| Value::tagged(tag, value)),
        ]
    })
}

/// Assert that decoding `text` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_decodes!("[1 2]", Value::vector(ints(&[1, 2])));
/// ```
#[macro_export]
macro_rules! assert_decodes {
    ($input:expr, $expected:expr) => {
        assert_decodes!($input, $expected, &$crate::common::ReadOptions::default())
    };
    ($input:expr, $expected:expr, $options:expr) => {
        let result = $crate::common::decode_with($input, $options);
        assert!(
            result.is_ok(),
            "Failed to decode '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Decoding '{}' did not match expected",
            $input
        );
    };
}

/// Assert that encoding `value` prints the expected text.
#[macro_export]
macro_rules! assert_encodes {
    ($value:expr, $expected:expr) => {
        assert_encodes!($value, $expected, &$crate::common::WriteOptions::default())
    };
    ($value:expr, $expected:expr, $options:expr) => {
        let value = $value;
        let result = $crate::common::encode_with(&value, $options);
        assert!(
            result.is_ok(),
            "Failed to encode {:?}: {:?}",
            value,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Encoding {:?} did not match expected",
            value
        );
    };
}

/// Assert that decoding `text` fails.
#[macro_export]
macro_rules! assert_decode_err {
    ($input:expr) => {
        assert_decode_err!($input, &$crate::common::ReadOptions::default())
    };
    ($input:expr, $options:expr) => {
        let result = $crate::common::decode_with($input, $options);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}
