// edn-core - Decoder from terms to native values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Decoding of [`Term`]s into native [`Value`]s.
//!
//! Decoding is a bottom-up fold over the term tree. Children are decoded
//! before their parent, then the parent's entry in the [`Decoders`] table
//! builds the native value from the decoded children. Tagged elements are
//! dispatched through the [`Readers`] table by tag, falling back to a
//! [`DefaultReader`] when no reader is registered.
//!
//! # Decoder table
//!
//! | Kind | Arguments | Built-in result |
//! |------|-----------|-----------------|
//! | `Nil` | none | `Value::Nil` |
//! | `Char`, `String`, `Symbol`, `Keyword` | the scalar | unchanged |
//! | `List`, `Vector`, `Set` | decoded elements | same-shaped collection |
//! | `Entry` | decoded key and value | two-element `Value::List` |
//! | `Map` | decoded entries | `Value::Map` |
//!
//! Booleans and numbers decode directly and are not looked up. `Tagged` is
//! reserved for reader dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use edn_parser::{Symbol, Term, TermKind};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::depth::Depth;
use crate::error::{Error, Result};
use crate::options::ReadOptions;
use crate::value::Value;

/// Builds a native value from the decoded children of a term.
pub type DecodeFn = Arc<dyn Fn(Vec<Value>) -> Result<Value> + Send + Sync>;

/// Converts the decoded value of a tagged element.
pub type ReaderFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Handles tagged elements whose tag has no reader.
pub type DefaultReader = Arc<dyn Fn(Symbol, Value) -> Result<Value> + Send + Sync>;

// ============================================================================
// Decoder table
// ============================================================================

/// Maps term kinds to the functions that build their native values.
#[derive(Clone)]
pub struct Decoders {
    table: HashMap<TermKind, DecodeFn>,
}

impl Decoders {
    /// A table with no entries.
    pub fn empty() -> Self {
        Decoders {
            table: HashMap::new(),
        }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Decoders::empty()
            .with(TermKind::Nil, |_| Ok(Value::Nil))
            .with(TermKind::Char, single)
            .with(TermKind::String, single)
            .with(TermKind::Symbol, single)
            .with(TermKind::Keyword, single)
            .with(TermKind::List, |items| Ok(Value::List(items.into_iter().collect())))
            .with(TermKind::Vector, |items| {
                Ok(Value::Vector(items.into_iter().collect()))
            })
            .with(TermKind::Set, |items| Ok(Value::Set(items.into_iter().collect())))
            .with(TermKind::Entry, |pair| Ok(Value::List(pair.into_iter().collect())))
            .with(TermKind::Map, build_map)
    }

    /// Set the entry for `kind`, returning the previous one.
    ///
    /// The `Tagged` entry is reserved for reader dispatch and cannot be set.
    pub fn insert<F>(&mut self, kind: TermKind, f: F) -> Option<DecodeFn>
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        if kind == TermKind::Tagged {
            warn!("ignoring decoder for tagged values; register a reader instead");
            return None;
        }
        self.table.insert(kind, Arc::new(f))
    }

    /// Builder form of [`Decoders::insert`].
    #[must_use]
    pub fn with<F>(mut self, kind: TermKind, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(kind, f);
        self
    }

    pub fn get(&self, kind: TermKind) -> Option<&DecodeFn> {
        self.table.get(&kind)
    }

    pub fn contains(&self, kind: TermKind) -> bool {
        self.table.contains_key(&kind)
    }
}

impl Default for Decoders {
    fn default() -> Self {
        Decoders::builtin()
    }
}

impl fmt::Debug for Decoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.table.keys().collect();
        kinds.sort();
        f.debug_struct("Decoders").field("kinds", &kinds).finish()
    }
}

fn single(mut args: Vec<Value>) -> Result<Value> {
    match (args.pop(), args.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(Error::msg("scalar decoder expects exactly one argument")),
    }
}

fn build_map(entries: Vec<Value>) -> Result<Value> {
    let mut map = edn_parser::OrdMap::new();
    for entry in entries {
        match entry {
            Value::List(pair) if pair.len() == 2 => {
                let mut pair = pair.into_iter();
                if let (Some(key), Some(value)) = (pair.next(), pair.next()) {
                    map.insert(key, value);
                }
            }
            other => return Err(Error::conversion("map entry", other.type_name())),
        }
    }
    Ok(Value::Map(map))
}

// ============================================================================
// Reader table
// ============================================================================

/// Maps tags to the readers that interpret their values.
#[derive(Clone, Default)]
pub struct Readers {
    table: HashMap<Symbol, ReaderFn>,
}

impl Readers {
    /// A table with no readers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in readers: `#inst` and `#uuid`.
    pub fn builtin() -> Self {
        Readers::new()
            .with(Symbol::new("inst"), read_inst)
            .with(Symbol::new("uuid"), read_uuid)
    }

    /// Register `f` for `tag`, returning the reader it replaces.
    pub fn insert<F>(&mut self, tag: Symbol, f: F) -> Option<ReaderFn>
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.table.insert(tag, Arc::new(f))
    }

    /// Builder form of [`Readers::insert`].
    #[must_use]
    pub fn with<F>(mut self, tag: Symbol, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(tag, f);
        self
    }

    pub fn get(&self, tag: &Symbol) -> Option<&ReaderFn> {
        self.table.get(tag)
    }

    pub fn contains(&self, tag: &Symbol) -> bool {
        self.table.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// A new table holding these readers with `overrides` on top.
    #[must_use]
    pub fn merged(&self, overrides: &Readers) -> Readers {
        let mut table = self.table.clone();
        table.extend(
            overrides
                .table
                .iter()
                .map(|(tag, f)| (tag.clone(), Arc::clone(f))),
        );
        Readers { table }
    }
}

impl fmt::Debug for Readers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.table.keys().collect();
        tags.sort();
        f.debug_struct("Readers").field("tags", &tags).finish()
    }
}

/// The built-in default reader: keep the element as a [`Value::Tagged`].
pub fn tagged_default() -> DefaultReader {
    Arc::new(|tag, value| Ok(Value::tagged(tag, value)))
}

/// Parse an `#inst` timestamp.
///
/// Accepts RFC 3339 text, offsets written without a colon or without
/// minutes (`+0100`, `+01`), and reduced precision down to a bare year.
/// A timestamp without an offset, or a date without a time, is taken as
/// UTC.
pub fn read_inst(value: Value) -> Result<Value> {
    let tag = Symbol::new("inst");
    let text = match &value {
        Value::String(s) => s,
        other => {
            return Err(Error::reader(
                &tag,
                format!("expected string, got {}", other.type_name()),
            ));
        }
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(Value::Inst(at));
    }

    // `%#z` also takes `Z`, `+01` and `+0100`
    let offset = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%#z")
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%#z"));
    if let Ok(at) = offset {
        return Ok(Value::Inst(at));
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::default()))
        })
        .ok()
        .or_else(|| reduced_date(text).map(|date| date.and_time(NaiveTime::default())))
        .ok_or_else(|| Error::reader(&tag, format!("invalid timestamp {:?}", text)))?;

    Ok(Value::Inst(naive.and_utc().fixed_offset()))
}

/// `YYYY` or `YYYY-MM`, starting at the first day of the period.
fn reduced_date(text: &str) -> Option<NaiveDate> {
    let (year, month) = match text.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (text, None),
    };
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) {
        return None;
    }
    let month = match month {
        Some(m) if digits(m, 2) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Parse a `#uuid` identifier.
pub fn read_uuid(value: Value) -> Result<Value> {
    let tag = Symbol::new("uuid");
    match &value {
        Value::String(s) => Uuid::parse_str(s)
            .map(Value::Uuid)
            .map_err(|e| Error::reader(&tag, format!("invalid uuid {:?}: {}", s, e))),
        other => Err(Error::reader(
            &tag,
            format!("expected string, got {}", other.type_name()),
        )),
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Decodes terms using the tables of one set of [`ReadOptions`].
///
/// The tables are built once per decoder: caller readers are merged over
/// the built-ins into a private table, so nothing shared is mutated.
pub struct Decoder {
    decoders: Decoders,
    readers: Readers,
    default_reader: DefaultReader,
    depth: Depth,
}

impl Decoder {
    pub fn new(options: &ReadOptions) -> Self {
        Decoder {
            decoders: options.decoders.clone(),
            readers: Readers::builtin().merged(&options.readers),
            default_reader: options
                .default_reader
                .clone()
                .unwrap_or_else(tagged_default),
            depth: Depth::new(options.max_depth),
        }
    }

    /// Decode a term into a native value.
    ///
    /// Each collection or tagged element counts one level toward the depth
    /// limit, the same way the parser counts nesting.
    pub fn decode(&self, term: &Term) -> Result<Value> {
        match term {
            Term::Bool(b) => Ok(Value::Bool(*b)),
            Term::Int(n) => Ok(Value::Int(*n)),
            Term::BigInt(n) => Ok(Value::BigInt(n.clone())),
            Term::Float(n) => Ok(Value::Float(*n)),

            Term::Nil => self.apply(TermKind::Nil, Vec::new()),
            Term::Char(c) => self.apply(TermKind::Char, vec![Value::Char(*c)]),
            Term::String(s) => self.apply(TermKind::String, vec![Value::String(Arc::clone(s))]),
            Term::Symbol(sym) => self.apply(TermKind::Symbol, vec![Value::Symbol(sym.clone())]),
            Term::Keyword(kw) => self.apply(TermKind::Keyword, vec![Value::Keyword(kw.clone())]),

            Term::List(items) => {
                let _guard = self.depth.enter()?;
                let items = self.decode_all(items.iter())?;
                self.apply(TermKind::List, items)
            }
            Term::Vector(items) => {
                let _guard = self.depth.enter()?;
                let items = self.decode_all(items.iter())?;
                self.apply(TermKind::Vector, items)
            }
            Term::Set(items) => {
                let _guard = self.depth.enter()?;
                let items = self.decode_all(items.iter())?;
                self.apply(TermKind::Set, items)
            }
            Term::Map(pairs) => {
                let _guard = self.depth.enter()?;
                let entries = pairs
                    .iter()
                    .map(|(k, v)| {
                        let key = self.decode(k)?;
                        let value = self.decode(v)?;
                        self.apply(TermKind::Entry, vec![key, value])
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.apply(TermKind::Map, entries)
            }

            Term::Tagged(tag, inner) => {
                let _guard = self.depth.enter()?;
                let value = self.decode(inner)?;
                self.read_tagged(tag, value)
            }
        }
    }

    fn decode_all<'t>(&self, terms: impl Iterator<Item = &'t Term>) -> Result<Vec<Value>> {
        terms.map(|term| self.decode(term)).collect()
    }

    fn apply(&self, kind: TermKind, args: Vec<Value>) -> Result<Value> {
        let f = self
            .decoders
            .get(kind)
            .ok_or(Error::MissingDecoder(kind))?;
        f(args)
    }

    fn read_tagged(&self, tag: &Symbol, value: Value) -> Result<Value> {
        match self.readers.get(tag) {
            Some(reader) => {
                trace!(%tag, "reader matched tag");
                reader(value)
            }
            None => {
                debug!(%tag, "no reader for tag, using default reader");
                (self.default_reader)(tag.clone(), value)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
