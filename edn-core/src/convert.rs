// edn-core - Type conversion traits
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type conversion between Rust types and [`Value`]s.
//!
//! This module provides the [`IntoValue`] and [`FromValue`] traits.
//!
//! # Built-in Conversions
//!
//! | Rust Type | Value |
//! |-----------|-------|
//! | `()` | `Nil` |
//! | `bool` | `Bool` |
//! | `i32`, `i64`, `u32`, `usize` | `Int` |
//! | `BigInt` | `BigInt` (or `Int` when reading) |
//! | `f32`, `f64` | `Float` |
//! | `char` | `Char` |
//! | `String`, `&str` | `String` |
//! | `Vec<T>` | `Vector` (reads `List` too) |
//! | `Option<T>` | `T` or `Nil` |
//! | `HashMap`, `BTreeMap` | `Map` |
//! | `HashSet`, `BTreeSet` | `Set` |
//! | `DateTime<FixedOffset>`, `DateTime<Utc>` | `Inst` |
//! | `Uuid` | `Uuid` |
//! | `Symbol`, `Keyword` | `Symbol`, `Keyword` |
//!
//! # Custom Conversions
//!
//! ```rust
//! use edn_core::{Error, FromValue, IntoValue, Result, Value};
//!
//! struct Point { x: i64, y: i64 }
//!
//! impl IntoValue for Point {
//!     fn into_value(self) -> Value {
//!         Value::vector(vec![Value::int(self.x), Value::int(self.y)])
//!     }
//! }
//!
//! impl FromValue for Point {
//!     fn from_value(value: &Value) -> Result<Self> {
//!         match value {
//!             Value::Vector(v) if v.len() == 2 => Ok(Point {
//!                 x: i64::from_value(&v[0])?,
//!                 y: i64::from_value(&v[1])?,
//!             }),
//!             other => Err(Error::conversion("vector of 2 ints", other.type_name())),
//!         }
//!     }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use edn_parser::{BigInt, Keyword, Symbol, ToPrimitive};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::value::Value;

/// Convert a Rust type into a [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Convert a [`Value`] into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

// ============================================================================
// IntoValue implementations
// ============================================================================

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Nil
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::int(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::int(i64::from(self))
    }
}

impl IntoValue for u32 {
    fn into_value(self) -> Value {
        Value::int(i64::from(self))
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        match i64::try_from(self) {
            Ok(n) => Value::int(n),
            Err(_) => Value::bigint(self),
        }
    }
}

impl IntoValue for BigInt {
    fn into_value(self) -> Value {
        Value::BigInt(self)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::float(self)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::float(f64::from(self))
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::char(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for Arc<str> {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for Symbol {
    fn into_value(self) -> Value {
        Value::Symbol(self)
    }
}

impl IntoValue for Keyword {
    fn into_value(self) -> Value {
        Value::Keyword(self)
    }
}

impl IntoValue for DateTime<FixedOffset> {
    fn into_value(self) -> Value {
        Value::Inst(self)
    }
}

impl IntoValue for DateTime<Utc> {
    fn into_value(self) -> Value {
        Value::Inst(self.fixed_offset())
    }
}

impl IntoValue for Uuid {
    fn into_value(self) -> Value {
        Value::Uuid(self)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::vector(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Nil,
        }
    }
}

impl<K: IntoValue, V: IntoValue> IntoValue for HashMap<K, V> {
    fn into_value(self) -> Value {
        Value::map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }
}

impl<K: IntoValue, V: IntoValue> IntoValue for BTreeMap<K, V> {
    fn into_value(self) -> Value {
        Value::map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }
}

impl<T: IntoValue> IntoValue for HashSet<T> {
    fn into_value(self) -> Value {
        Value::set(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for BTreeSet<T> {
    fn into_value(self) -> Value {
        Value::set(self.into_iter().map(IntoValue::into_value).collect())
    }
}

// ============================================================================
// FromValue implementations
// ============================================================================

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(()),
            other => Err(Error::conversion("nil", other.type_name())),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::conversion("boolean", other.type_name())),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(n) => Ok(*n),
            Value::BigInt(n) => n
                .to_i64()
                .ok_or_else(|| Error::conversion("i64", format!("bigint {} out of range", n))),
            other => Err(Error::conversion("integer", other.type_name())),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        let n = i64::from_value(value)?;
        i32::try_from(n).map_err(|_| Error::conversion("i32", format!("integer {} out of range", n)))
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> Result<Self> {
        let n = i64::from_value(value)?;
        u32::try_from(n).map_err(|_| Error::conversion("u32", format!("integer {} out of range", n)))
    }
}

impl FromValue for usize {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::BigInt(n) => n
                .to_usize()
                .ok_or_else(|| Error::conversion("usize", format!("bigint {} out of range", n))),
            other => {
                let n = i64::from_value(other)?;
                usize::try_from(n)
                    .map_err(|_| Error::conversion("usize", format!("integer {} out of range", n)))
            }
        }
    }
}

impl FromValue for BigInt {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::BigInt(n) => Ok(n.clone()),
            Value::Int(n) => Ok(BigInt::from(*n)),
            other => Err(Error::conversion("integer", other.type_name())),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Float(n) => Ok(*n),
            Value::Int(n) => Ok(*n as f64),
            Value::BigInt(n) => n
                .to_f64()
                .ok_or_else(|| Error::conversion("f64", format!("bigint {} out of range", n))),
            other => Err(Error::conversion("number", other.type_name())),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        let n = f64::from_value(value)?;
        let result = n as f32;
        if result.is_infinite() && n.is_finite() {
            Err(Error::conversion("f32", format!("float {} out of range", n)))
        } else {
            Ok(result)
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Char(c) => Ok(*c),
            other => Err(Error::conversion("character", other.type_name())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            other => Err(Error::conversion("string", other.type_name())),
        }
    }
}

impl FromValue for Symbol {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Symbol(sym) => Ok(sym.clone()),
            other => Err(Error::conversion("symbol", other.type_name())),
        }
    }
}

impl FromValue for Keyword {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Keyword(kw) => Ok(kw.clone()),
            other => Err(Error::conversion("keyword", other.type_name())),
        }
    }
}

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Inst(at) => Ok(*at),
            other => Err(Error::conversion("inst", other.type_name())),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Result<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|at| at.with_timezone(&Utc))
    }
}

impl FromValue for Uuid {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Uuid(id) => Ok(*id),
            other => Err(Error::conversion("uuid", other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Vector(v) | Value::List(v) => v.iter().map(T::from_value).collect(),
            other => Err(Error::conversion("vector or list", other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<K: FromValue + Eq + Hash, V: FromValue> FromValue for HashMap<K, V> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Map(m) => m
                .iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(Error::conversion("map", other.type_name())),
        }
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Map(m) => m
                .iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(Error::conversion("map", other.type_name())),
        }
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Set(s) => s.iter().map(T::from_value).collect(),
            other => Err(Error::conversion("set", other.type_name())),
        }
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Set(s) => s.iter().map(T::from_value).collect(),
            other => Err(Error::conversion("set", other.type_name())),
        }
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Convert a Rust value into a [`Value`].
#[must_use]
pub fn to_value<T: IntoValue>(value: T) -> Value {
    value.into_value()
}

/// Convert a [`Value`] into a Rust type.
pub fn from_value<T: FromValue>(value: &Value) -> Result<T> {
    T::from_value(value)
}
