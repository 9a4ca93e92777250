// edn-core - Encoder from native values to terms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Encoding of native [`Value`]s into [`Term`]s.
//!
//! Each value is matched against an ordered list of rules and the first
//! match wins:
//!
//! 1. symbols and keywords pass through unchanged
//! 2. caller-supplied [`Writer`]s, in registration order
//! 3. the built-in writers (`Inst` as `#inst`, `Uuid` as `#uuid`)
//! 4. the structural rules for scalars and collections
//! 5. the [`DefaultWriter`]
//!
//! A writer turns the value into a tagged term whose inner value is encoded
//! recursively. The default writer returns a replacement value which goes
//! through the same rules again, so handlers can coerce in several steps.
//! A handler that returns its input unchanged, or that is still not done
//! after [`MAX_DEFAULT_APPLICATIONS`] steps, fails with
//! [`Error::Unencodable`] instead of looping.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Timelike};
use edn_parser::{Symbol, Term};
use tracing::{debug, trace};

use crate::depth::Depth;
use crate::error::{Error, Result};
use crate::options::WriteOptions;
use crate::value::{Value, ValueKind};

/// Decides whether a writer applies to a value.
pub type MatchFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Produces the value placed inside a writer's tag.
pub type TransformFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Replaces a value that no writer or rule could encode.
pub type DefaultWriter = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// How many times the default writer may be applied in a row to one value.
pub const MAX_DEFAULT_APPLICATIONS: usize = 16;

// ============================================================================
// Writers
// ============================================================================

/// A tag writer: values accepted by the matcher are written as
/// `#tag <encoded transform(value)>`.
#[derive(Clone)]
pub struct Writer {
    matcher: MatchFn,
    tag: Symbol,
    transform: TransformFn,
}

impl Writer {
    /// A writer for every value accepted by `matcher`.
    pub fn new<M, T>(matcher: M, tag: Symbol, transform: T) -> Self
    where
        M: Fn(&Value) -> bool + Send + Sync + 'static,
        T: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Writer {
            matcher: Arc::new(matcher),
            tag,
            transform: Arc::new(transform),
        }
    }

    /// A writer for every value of one kind.
    pub fn for_kind<T>(kind: ValueKind, tag: Symbol, transform: T) -> Self
    where
        T: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Writer::new(move |value| value.kind() == kind, tag, transform)
    }

    /// A writer for [`Value::Custom`] objects of type `C`.
    pub fn for_type<C, T>(tag: Symbol, transform: T) -> Self
    where
        C: Any,
        T: Fn(&C) -> Result<Value> + Send + Sync + 'static,
    {
        Writer::new(
            |value| matches!(value, Value::Custom(custom) if custom.is::<C>()),
            tag,
            move |value| match value.downcast_ref::<C>() {
                Some(object) => transform(object),
                None => Err(Error::conversion(
                    std::any::type_name::<C>(),
                    value.type_name(),
                )),
            },
        )
    }

    pub fn tag(&self) -> &Symbol {
        &self.tag
    }

    pub fn matches(&self, value: &Value) -> bool {
        (self.matcher)(value)
    }
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer").field("tag", &self.tag).finish()
    }
}

/// The built-in writers, in order.
pub fn builtin_writers() -> Vec<Writer> {
    vec![
        Writer::for_kind(ValueKind::Inst, Symbol::new("inst"), |value| match value {
            Value::Inst(at) => Ok(Value::string(format_inst(at))),
            other => Err(Error::conversion("inst", other.type_name())),
        }),
        Writer::for_kind(ValueKind::Uuid, Symbol::new("uuid"), |value| match value {
            Value::Uuid(id) => Ok(Value::string(id.hyphenated().to_string())),
            other => Err(Error::conversion("uuid", other.type_name())),
        }),
    ]
}

/// Format an instant in ISO 8601 extended form.
///
/// Fractional seconds are written only when non-zero: as microseconds, or
/// as nanoseconds when the instant carries sub-microsecond precision.
pub fn format_inst(at: &DateTime<FixedOffset>) -> String {
    let nanos = at.nanosecond() % 1_000_000_000;
    let pattern = if nanos == 0 {
        "%Y-%m-%dT%H:%M:%S%:z"
    } else if nanos % 1_000 == 0 {
        "%Y-%m-%dT%H:%M:%S%.6f%:z"
    } else {
        "%Y-%m-%dT%H:%M:%S%.9f%:z"
    };
    at.format(pattern).to_string()
}

/// The built-in default writer: reject the value.
pub fn reject_default() -> DefaultWriter {
    Arc::new(|value| Err(Error::unencodable(value)))
}

// ============================================================================
// Encoder
// ============================================================================

/// Encodes values using the writers of one set of [`WriteOptions`].
pub struct Encoder {
    writers: Vec<Writer>,
    default_writer: DefaultWriter,
    depth: Depth,
}

impl Encoder {
    pub fn new(options: &WriteOptions) -> Self {
        let mut writers = options.writers.clone();
        writers.extend(builtin_writers());
        Encoder {
            writers,
            default_writer: options
                .default_writer
                .clone()
                .unwrap_or_else(reject_default),
            depth: Depth::new(options.max_depth),
        }
    }

    /// Encode a value into a term.
    pub fn encode(&self, value: &Value) -> Result<Term> {
        self.encode_value(value, 0)
    }

    /// `defaults` counts the default-writer applications that produced
    /// `value`; nested values start again from zero.
    fn encode_value(&self, value: &Value, defaults: usize) -> Result<Term> {
        match value {
            Value::Symbol(sym) => return Ok(Term::Symbol(sym.clone())),
            Value::Keyword(kw) => return Ok(Term::Keyword(kw.clone())),
            _ => {}
        }

        if let Some(writer) = self.writers.iter().find(|w| w.matches(value)) {
            trace!(tag = %writer.tag, kind = %value.kind(), "writer matched");
            let _guard = self.depth.enter()?;
            let inner = (writer.transform)(value)?;
            return Ok(Term::tagged(writer.tag.clone(), self.encode_value(&inner, 0)?));
        }

        if let Some(term) = self.encode_structural(value)? {
            return Ok(term);
        }

        if defaults >= MAX_DEFAULT_APPLICATIONS {
            return Err(Error::unencodable(value));
        }

        debug!(kind = %value.kind(), defaults, "no rule matched, calling default writer");
        let replacement = (self.default_writer)(value)?;
        if replacement == *value {
            return Err(Error::unencodable(value));
        }
        self.encode_value(&replacement, defaults + 1)
    }

    fn encode_structural(&self, value: &Value) -> Result<Option<Term>> {
        let _guard = match value {
            Value::List(_)
            | Value::Vector(_)
            | Value::Set(_)
            | Value::Map(_)
            | Value::Tagged { .. } => Some(self.depth.enter()?),
            _ => None,
        };

        let term = match value {
            Value::Nil => Term::Nil,
            Value::Bool(b) => Term::Bool(*b),
            Value::Int(n) => Term::Int(*n),
            Value::BigInt(n) => Term::BigInt(n.clone()),
            Value::Float(n) => Term::Float(*n),
            Value::Char(c) => Term::Char(*c),
            Value::String(s) => Term::String(Arc::clone(s)),
            Value::List(items) => Term::List(self.encode_all(items.iter())?),
            Value::Vector(items) => Term::Vector(self.encode_all(items.iter())?),
            Value::Set(items) => Term::Set(self.encode_all(items.iter())?.into_iter().collect()),
            Value::Map(map) => Term::Map(
                map.iter()
                    .map(|(k, v)| Ok((self.encode_value(k, 0)?, self.encode_value(v, 0)?)))
                    .collect::<Result<_>>()?,
            ),
            Value::Tagged { tag, value } => {
                Term::tagged(tag.clone(), self.encode_value(value, 0)?)
            }
            Value::Symbol(_)
            | Value::Keyword(_)
            | Value::Inst(_)
            | Value::Uuid(_)
            | Value::Custom(_) => return Ok(None),
        };
        Ok(Some(term))
    }

    fn encode_all<'v>(
        &self,
        values: impl Iterator<Item = &'v Value>,
    ) -> Result<edn_parser::Vector<Term>> {
        values.map(|value| self.encode_value(value, 0)).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use edn_parser::{Keyword, unparse};
    use uuid::Uuid;

    fn encode_str(value: &Value) -> Result<String> {
        encode_with(value, &WriteOptions::default())
    }

    fn encode_with(value: &Value, options: &WriteOptions) -> Result<String> {
        Encoder::new(options).encode(value).map(|term| unparse(&term))
    }

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[test]
    fn test_scalars() {
        assert_eq!(encode_str(&Value::Nil).unwrap(), "nil");
        assert_eq!(encode_str(&Value::int(5)).unwrap(), "5");
        assert_eq!(encode_str(&Value::string("a\"b")).unwrap(), "\"a\\\"b\"");
        assert_eq!(
            encode_str(&Value::keyword(Keyword::with_prefix("a", "b"))).unwrap(),
            ":a/b"
        );
    }

    #[test]
    fn test_collections() {
        let value = Value::map(vec![(
            Value::keyword(Keyword::new("xs")),
            Value::list(vec![Value::vector(vec![Value::int(1)]), Value::set(vec![])]),
        )]);
        assert_eq!(encode_str(&value).unwrap(), "{:xs ([1] #{})}");
    }

    #[test]
    fn test_inst_writer() {
        let at = DateTime::parse_from_rfc3339("2012-05-12T14:30:00Z").unwrap();
        assert_eq!(
            encode_str(&Value::inst(at)).unwrap(),
            "#inst \"2012-05-12T14:30:00+00:00\""
        );

        let micros = DateTime::parse_from_rfc3339("2012-05-12T14:30:00.25-05:00").unwrap();
        assert_eq!(format_inst(&micros), "2012-05-12T14:30:00.250000-05:00");

        let nanos = DateTime::parse_from_rfc3339("2012-05-12T14:30:00.000000001Z").unwrap();
        assert_eq!(format_inst(&nanos), "2012-05-12T14:30:00.000000001+00:00");
    }

    #[test]
    fn test_uuid_writer() {
        let id = Uuid::parse_str("F81D4FAE-7DEC-11D0-A765-00A0C91E6BF6").unwrap();
        assert_eq!(
            encode_str(&Value::uuid(id)).unwrap(),
            "#uuid \"f81d4fae-7dec-11d0-a765-00a0c91e6bf6\""
        );
    }

    #[test]
    fn test_tagged_value_round_trips_as_tag() {
        let value = Value::tagged(
            Symbol::new("foo"),
            Value::list(vec![Value::int(2), Value::int(3)]),
        );
        assert_eq!(encode_str(&value).unwrap(), "#foo (2 3)");
    }

    #[test]
    fn test_custom_without_writer_is_unencodable() {
        let err = encode_str(&Value::custom(Point { x: 1, y: 2 })).unwrap_err();
        assert!(matches!(
            err,
            Error::Unencodable {
                kind: ValueKind::Custom,
                ..
            }
        ));
    }

    #[test]
    fn test_type_writer() {
        let options = WriteOptions::new().writer(Writer::for_type::<Point, _>(
            Symbol::with_prefix("geo", "point"),
            |p| Ok(Value::vector(vec![Value::int(p.x), Value::int(p.y)])),
        ));
        let value = Value::vector(vec![Value::custom(Point { x: 1, y: 2 })]);
        assert_eq!(encode_with(&value, &options).unwrap(), "[#geo/point [1 2]]");
    }

    #[test]
    fn test_caller_writer_precedes_structural_rules() {
        let options = WriteOptions::new().writer(Writer::for_kind(
            ValueKind::Vector,
            Symbol::new("vec"),
            |value| match value {
                Value::Vector(items) => Ok(Value::List(items.clone())),
                other => Ok(other.clone()),
            },
        ));
        assert_eq!(
            encode_with(&Value::vector(vec![Value::int(1)]), &options).unwrap(),
            "#vec (1)"
        );
    }

    #[test]
    fn test_caller_writer_precedes_builtin_writers() {
        let options = WriteOptions::new().writer(Writer::for_kind(
            ValueKind::Uuid,
            Symbol::new("id"),
            |_| Ok(Value::int(0)),
        ));
        assert_eq!(
            encode_with(&Value::uuid(Uuid::nil()), &options).unwrap(),
            "#id 0"
        );
    }

    #[test]
    fn test_symbols_bypass_writers() {
        let options = WriteOptions::new().writer(Writer::new(
            |_| true,
            Symbol::new("all"),
            |value| Ok(value.clone()),
        ));
        assert_eq!(
            encode_with(&Value::symbol(Symbol::new("s")), &options).unwrap(),
            "s"
        );
    }

    #[test]
    fn test_first_matching_writer_wins() {
        let options = WriteOptions::new()
            .writer(Writer::for_kind(ValueKind::Int, Symbol::new("first"), |v| {
                Ok(Value::string(v.to_string()))
            }))
            .writer(Writer::for_kind(ValueKind::Int, Symbol::new("second"), |_| {
                Ok(Value::Nil)
            }));
        assert_eq!(encode_with(&Value::int(1), &options).unwrap(), "#first \"1\"");
    }

    #[test]
    fn test_self_matching_writer_hits_depth_limit() {
        let options = WriteOptions::new()
            .writer(Writer::for_kind(ValueKind::Int, Symbol::new("again"), |v| {
                Ok(v.clone())
            }))
            .max_depth(8);
        assert!(matches!(
            encode_with(&Value::int(1), &options),
            Err(Error::DepthExceeded(8))
        ));
    }

    #[test]
    fn test_default_writer_result_is_encoded() {
        let options = WriteOptions::new().default_writer(|value| match value {
            Value::Custom(custom) => Ok(Value::string(custom.type_name())),
            other => Err(Error::unencodable(other)),
        });
        let text = encode_with(&Value::custom(Point { x: 0, y: 0 }), &options).unwrap();
        assert!(text.contains("Point"));
    }

    #[test]
    fn test_default_writer_cannot_loop() {
        let options = WriteOptions::new().default_writer(|value| Ok(value.clone()));
        let err = encode_with(&Value::custom(Point { x: 0, y: 0 }), &options).unwrap_err();
        assert!(matches!(err, Error::Unencodable { .. }));
    }

    #[test]
    fn test_default_writer_can_chain() {
        struct Celsius(f64);

        let options = WriteOptions::new().default_writer(|value| {
            if let Some(point) = value.downcast_ref::<Point>() {
                Ok(Value::custom(Celsius(point.x as f64)))
            } else if let Some(c) = value.downcast_ref::<Celsius>() {
                Ok(Value::string(format!("{}C", c.0)))
            } else {
                Err(Error::unencodable(value))
            }
        });
        assert_eq!(
            encode_with(&Value::custom(Point { x: 21, y: 0 }), &options).unwrap(),
            "\"21C\""
        );
    }

    #[test]
    fn test_default_writer_without_progress_fails() {
        struct Ping;
        struct Pong;

        let options = WriteOptions::new().default_writer(|value| {
            if value.downcast_ref::<Ping>().is_some() {
                Ok(Value::custom(Pong))
            } else {
                Ok(Value::custom(Ping))
            }
        });
        assert!(matches!(
            encode_with(&Value::custom(Ping), &options),
            Err(Error::Unencodable {
                kind: ValueKind::Custom,
                ..
            })
        ));
    }

    #[test]
    fn test_default_writer_applies_to_nested_values() {
        struct Marker;

        let options = WriteOptions::new().default_writer(|value| {
            if value.downcast_ref::<Point>().is_some() {
                Ok(Value::vector(vec![
                    Value::keyword(Keyword::new("point")),
                    Value::custom(Marker),
                ]))
            } else if value.downcast_ref::<Marker>().is_some() {
                Ok(Value::string("marker"))
            } else {
                Err(Error::unencodable(value))
            }
        });
        assert_eq!(
            encode_with(&Value::custom(Point { x: 0, y: 0 }), &options).unwrap(),
            "[:point \"marker\"]"
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::int(0);
        for _ in 0..10 {
            value = Value::vector(vec![value]);
        }
        let options = WriteOptions::new().max_depth(5);
        assert!(matches!(
            encode_with(&value, &options),
            Err(Error::DepthExceeded(5))
        ));
        assert!(encode_with(&value, &WriteOptions::new().max_depth(10)).is_ok());
        assert!(encode_with(&value, &WriteOptions::default()).is_ok());
    }
}
