// edn-core - Native value types
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Native values produced by decoding and consumed by encoding.
//!
//! [`Value`] is what applications work with. It mirrors the EDN term model
//! but adds the results of the built-in tag readers (`Inst`, `Uuid`), a
//! carrier for unrecognised tags (`Tagged`), and `Custom` for opaque
//! application objects. Maps and sets are keyed by value ordering, so a
//! map read from text with repeated keys keeps the last value.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use edn_parser::{BigInt, Keyword, OrdMap, OrdSet, Symbol, Vector};
use uuid::Uuid;

/// A native value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Char(char),
    String(Arc<str>),
    Symbol(Symbol),
    Keyword(Keyword),
    /// Immutable sequence, written as `( ... )`
    List(Vector<Value>),
    /// Array-like sequence, written as `[ ... ]`
    Vector(Vector<Value>),
    Set(OrdSet<Value>),
    Map(OrdMap<Value, Value>),
    /// Instant in time, read from and written as `#inst`
    Inst(DateTime<FixedOffset>),
    /// Read from and written as `#uuid`
    Uuid(Uuid),
    /// A tagged element no reader recognised
    Tagged { tag: Symbol, value: Box<Value> },
    /// Opaque application object
    Custom(Custom),
}

/// The kind of a [`Value`], used for writer matching and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Nil,
    Bool,
    Int,
    BigInt,
    Float,
    Char,
    String,
    Symbol,
    Keyword,
    List,
    Vector,
    Set,
    Map,
    Inst,
    Uuid,
    Tagged,
    Custom,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::BigInt => "bigint",
            ValueKind::Float => "float",
            ValueKind::Char => "character",
            ValueKind::String => "string",
            ValueKind::Symbol => "symbol",
            ValueKind::Keyword => "keyword",
            ValueKind::List => "list",
            ValueKind::Vector => "vector",
            ValueKind::Set => "set",
            ValueKind::Map => "map",
            ValueKind::Inst => "inst",
            ValueKind::Uuid => "uuid",
            ValueKind::Tagged => "tagged value",
            ValueKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Custom values
// ============================================================================

/// A type-erased application object.
///
/// Custom values compare by identity: clones of one `Custom` are equal,
/// two separately wrapped objects are not, whatever their contents.
#[derive(Clone)]
pub struct Custom {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Custom {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Custom {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// The Rust type name of the wrapped object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the wrapped object is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the wrapped object as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{}>", self.type_name)
    }
}

impl PartialEq for Custom {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Custom {}

impl PartialOrd for Custom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Custom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_name
            .cmp(other.type_name)
            .then_with(|| self.addr().cmp(&other.addr()))
    }
}

impl Hash for Custom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl Value {
    pub fn nil() -> Self {
        Value::Nil
    }

    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(n.into())
    }

    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    pub fn char(c: char) -> Self {
        Value::Char(c)
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn symbol(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }

    pub fn keyword(kw: Keyword) -> Self {
        Value::Keyword(kw)
    }

    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(elements.into_iter().collect())
    }

    pub fn vector(elements: Vec<Value>) -> Self {
        Value::Vector(elements.into_iter().collect())
    }

    /// Create a set. Duplicates collapse.
    pub fn set(elements: Vec<Value>) -> Self {
        Value::Set(elements.into_iter().collect())
    }

    /// Create a map. A later pair replaces an earlier one with an equal key.
    pub fn map(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(pairs.into_iter().collect())
    }

    pub fn inst(at: DateTime<FixedOffset>) -> Self {
        Value::Inst(at)
    }

    pub fn uuid(id: Uuid) -> Self {
        Value::Uuid(id)
    }

    pub fn tagged(tag: Symbol, value: Value) -> Self {
        Value::Tagged {
            tag,
            value: Box::new(value),
        }
    }

    /// Wrap an application object.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Value::Custom(Custom::new(value))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Float(_) => ValueKind::Float,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Keyword(_) => ValueKind::Keyword,
            Value::List(_) => ValueKind::List,
            Value::Vector(_) => ValueKind::Vector,
            Value::Set(_) => ValueKind::Set,
            Value::Map(_) => ValueKind::Map,
            Value::Inst(_) => ValueKind::Inst,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Tagged { .. } => ValueKind::Tagged,
            Value::Custom(_) => ValueKind::Custom,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Look up `key` in a map value.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Borrow the object inside a `Custom` value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(custom) => custom.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<Keyword> for Value {
    fn from(kw: Keyword) -> Self {
        Value::Keyword(kw)
    }
}

// ============================================================================
// Equality, ordering and hashing
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Inst(a), Value::Inst(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Tagged { tag: ta, value: va }, Value::Tagged { tag: tb, value: vb }) => {
                ta == tb && va == vb
            }
            (Value::Custom(a), Value::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        let (ka, kb) = (self.kind(), other.kind());
        if ka != kb {
            return ka.cmp(&kb);
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::BigInt(a), Value::BigInt(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Symbol(a), Value::Symbol(b)) => a.cmp(b),
            (Value::Keyword(a), Value::Keyword(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            (Value::Vector(a), Value::Vector(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.iter().cmp(b.iter()),
            (Value::Map(a), Value::Map(b)) => a.iter().cmp(b.iter()),
            (Value::Inst(a), Value::Inst(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Tagged { tag: ta, value: va }, Value::Tagged { tag: tb, value: vb }) => {
                ta.cmp(tb).then_with(|| va.cmp(vb))
            }
            (Value::Custom(a), Value::Custom(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::BigInt(n) => n.hash(state),
            Value::Float(n) => n.to_bits().hash(state),
            Value::Char(c) => c.hash(state),
            Value::String(s) => s.hash(state),
            Value::Symbol(sym) => sym.hash(state),
            Value::Keyword(kw) => kw.hash(state),
            Value::List(items) | Value::Vector(items) => items.hash(state),
            Value::Set(set) => {
                for item in set.iter() {
                    item.hash(state);
                }
            }
            Value::Map(map) => {
                for (k, v) in map.iter() {
                    k.hash(state);
                    v.hash(state);
                }
            }
            // DateTime equality ignores the offset, so hashing must too
            Value::Inst(at) => at.naive_utc().hash(state),
            Value::Uuid(id) => id.hash(state),
            Value::Tagged { tag, value } => {
                tag.hash(state);
                value.hash(state);
            }
            Value::Custom(custom) => custom.hash(state),
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}N", n),
            Value::Float(n) if n.is_nan() => write!(f, "##NaN"),
            Value::Float(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "##Inf" } else { "##-Inf" })
            }
            Value::Float(n) if n.fract() == 0.0 => write!(f, "{}.0", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "\\{}", c),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::Keyword(kw) => write!(f, "{}", kw),
            Value::List(items) => write_seq(f, "(", items.iter(), ")"),
            Value::Vector(items) => write_seq(f, "[", items.iter(), "]"),
            Value::Set(items) => write_seq(f, "#{", items.iter(), "}"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Inst(at) => write!(f, "#inst \"{}\"", at.to_rfc3339()),
            Value::Uuid(id) => write!(f, "#uuid \"{}\"", id),
            Value::Tagged { tag, value } => write!(f, "#{} {}", tag, value),
            Value::Custom(custom) => write!(f, "{:?}", custom),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

// ============================================================================
// Tests
// ============================================================================
