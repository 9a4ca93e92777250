// edn-parser - Term types for EDN documents
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The EDN abstract syntax tree.
//!
//! A [`Term`] is what the parser produces and what the printer consumes. Terms
//! are immutable and cheap to clone: collections use persistent structures
//! from `im`, strings are shared `Arc<str>`.
//!
//! Equality is structural and discriminates by variant: a list and a vector
//! with the same elements are different terms, as are a symbol and a keyword
//! with the same prefix and name.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use im::{OrdSet, Vector};
use num_bigint::BigInt;

use crate::keyword::Keyword;
use crate::symbol::Symbol;

/// A parsed EDN form.
#[derive(Clone)]
pub enum Term {
    /// `nil`
    Nil,
    /// `true` / `false`
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Arbitrary precision integer (`42N`, or any literal too wide for `i64`)
    BigInt(BigInt),
    /// 64-bit floating point number, including `##Inf`, `##-Inf` and `##NaN`
    Float(f64),
    /// Unicode character (`\a`, `\newline`, `λ`)
    Char(char),
    /// Immutable string
    String(Arc<str>),
    /// Symbol (optionally prefixed identifier)
    Symbol(Symbol),
    /// Keyword (optionally prefixed, self-denoting)
    Keyword(Keyword),
    /// `( ... )`
    List(Vector<Term>),
    /// `[ ... ]`
    Vector(Vector<Term>),
    /// `#{ ... }`, deduplicated on construction
    Set(OrdSet<Term>),
    /// `{ ... }`, pairs kept in source order
    Map(Vector<(Term, Term)>),
    /// `#tag value` form
    Tagged(Symbol, Box<Term>),
}

/// The structural kind of a term.
///
/// This is the key of the decoder table. [`TermKind::Entry`] does not
/// correspond to a `Term` variant: it names a single key/value pair of a map
/// (a two-element tuple literal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKind {
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
    Entry,
    Tagged,
}

impl TermKind {
    /// Every kind, in declaration order.
    pub const ALL: [TermKind; 15] = [
        TermKind::Nil,
        TermKind::Bool,
        TermKind::Int,
        TermKind::BigInt,
        TermKind::Float,
        TermKind::Char,
        TermKind::String,
        TermKind::Symbol,
        TermKind::Keyword,
        TermKind::List,
        TermKind::Vector,
        TermKind::Set,
        TermKind::Map,
        TermKind::Entry,
        TermKind::Tagged,
    ];

    /// Human-readable name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TermKind::Nil => "nil",
            TermKind::Bool => "boolean",
            TermKind::Int => "integer",
            TermKind::BigInt => "bigint",
            TermKind::Float => "float",
            TermKind::Char => "character",
            TermKind::String => "string",
            TermKind::Symbol => "symbol",
            TermKind::Keyword => "keyword",
            TermKind::List => "list",
            TermKind::Vector => "vector",
            TermKind::Set => "set",
            TermKind::Map => "map",
            TermKind::Entry => "map entry",
            TermKind::Tagged => "tagged value",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl Term {
    /// Create a nil term
    pub fn nil() -> Self {
        Term::Nil
    }

    /// Create a boolean term
    pub fn bool(b: bool) -> Self {
        Term::Bool(b)
    }

    /// Create an integer term
    pub fn int(n: i64) -> Self {
        Term::Int(n)
    }

    /// Create a big integer term
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Term::BigInt(n.into())
    }

    /// Create a float term
    pub fn float(n: f64) -> Self {
        Term::Float(n)
    }

    /// Create a character term
    pub fn char(c: char) -> Self {
        Term::Char(c)
    }

    /// Create a string term
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Term::String(s.into())
    }

    /// Create a symbol term
    pub fn symbol(sym: Symbol) -> Self {
        Term::Symbol(sym)
    }

    /// Create a keyword term
    pub fn keyword(kw: Keyword) -> Self {
        Term::Keyword(kw)
    }

    /// Create a list from elements
    pub fn list(elements: Vec<Term>) -> Self {
        Term::List(elements.into_iter().collect())
    }

    /// Create a vector from elements
    pub fn vector(elements: Vec<Term>) -> Self {
        Term::Vector(elements.into_iter().collect())
    }

    /// Create a set from elements. Duplicates collapse.
    pub fn set(elements: Vec<Term>) -> Self {
        Term::Set(elements.into_iter().collect())
    }

    /// Create a map from key-value pairs. Duplicate keys are kept as given.
    pub fn map(pairs: Vec<(Term, Term)>) -> Self {
        Term::Map(pairs.into_iter().collect())
    }

    /// Create a tagged term `#tag value`
    pub fn tagged(tag: Symbol, value: Term) -> Self {
        Term::Tagged(tag, Box::new(value))
    }

    /// Get the structural kind of this term.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Nil => TermKind::Nil,
            Term::Bool(_) => TermKind::Bool,
            Term::Int(_) => TermKind::Int,
            Term::BigInt(_) => TermKind::BigInt,
            Term::Float(_) => TermKind::Float,
            Term::Char(_) => TermKind::Char,
            Term::String(_) => TermKind::String,
            Term::Symbol(_) => TermKind::Symbol,
            Term::Keyword(_) => TermKind::Keyword,
            Term::List(_) => TermKind::List,
            Term::Vector(_) => TermKind::Vector,
            Term::Set(_) => TermKind::Set,
            Term::Map(_) => TermKind::Map,
            Term::Tagged(_, _) => TermKind::Tagged,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Check if this term is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Nil)
    }

    /// Look up `key` in a map term.
    ///
    /// Returns the value of the first pair whose key is equal to `key`, or
    /// `None` when there is no such pair or this term is not a map.
    pub fn get(&self, key: &Term) -> Option<&Term> {
        match self {
            Term::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<Symbol> for Term {
    fn from(sym: Symbol) -> Self {
        Term::Symbol(sym)
    }
}

impl From<Keyword> for Term {
    fn from(kw: Keyword) -> Self {
        Term::Keyword(kw)
    }
}

// ============================================================================
// Equality, ordering and hashing
// ============================================================================

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Nil, Term::Nil) => true,
            (Term::Bool(a), Term::Bool(b)) => a == b,
            (Term::Int(a), Term::Int(b)) => a == b,
            (Term::BigInt(a), Term::BigInt(b)) => a == b,
            (Term::Float(a), Term::Float(b)) => a.to_bits() == b.to_bits(),
            (Term::Char(a), Term::Char(b)) => a == b,
            (Term::String(a), Term::String(b)) => a == b,
            (Term::Symbol(a), Term::Symbol(b)) => a == b,
            (Term::Keyword(a), Term::Keyword(b)) => a == b,
            (Term::List(a), Term::List(b)) => a == b,
            (Term::Vector(a), Term::Vector(b)) => a == b,
            (Term::Set(a), Term::Set(b)) => a == b,
            // Pair sequences, not key sets: {1 2 3 4} != {3 4 1 2}
            (Term::Map(a), Term::Map(b)) => a == b,
            (Term::Tagged(ta, va), Term::Tagged(tb, vb)) => ta == tb && va == vb,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        let (ka, kb) = (self.kind(), other.kind());
        if ka != kb {
            return ka.cmp(&kb);
        }

        match (self, other) {
            (Term::Bool(a), Term::Bool(b)) => a.cmp(b),
            (Term::Int(a), Term::Int(b)) => a.cmp(b),
            (Term::BigInt(a), Term::BigInt(b)) => a.cmp(b),
            (Term::Float(a), Term::Float(b)) => a.total_cmp(b),
            (Term::Char(a), Term::Char(b)) => a.cmp(b),
            (Term::String(a), Term::String(b)) => a.cmp(b),
            (Term::Symbol(a), Term::Symbol(b)) => a.cmp(b),
            (Term::Keyword(a), Term::Keyword(b)) => a.cmp(b),
            (Term::List(a), Term::List(b)) => a.cmp(b),
            (Term::Vector(a), Term::Vector(b)) => a.cmp(b),
            (Term::Set(a), Term::Set(b)) => a.iter().cmp(b.iter()),
            (Term::Map(a), Term::Map(b)) => a.cmp(b),
            (Term::Tagged(ta, va), Term::Tagged(tb, vb)) => ta.cmp(tb).then_with(|| va.cmp(vb)),
            _ => Ordering::Equal,
        }
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Term::Nil => {}
            Term::Bool(b) => b.hash(state),
            Term::Int(n) => n.hash(state),
            Term::BigInt(n) => n.hash(state),
            Term::Float(n) => n.to_bits().hash(state),
            Term::Char(c) => c.hash(state),
            Term::String(s) => s.hash(state),
            Term::Symbol(sym) => sym.hash(state),
            Term::Keyword(kw) => kw.hash(state),
            Term::List(items) | Term::Vector(items) => items.hash(state),
            Term::Set(set) => {
                for item in set.iter() {
                    item.hash(state);
                }
            }
            Term::Map(pairs) => pairs.hash(state),
            Term::Tagged(tag, value) => {
                tag.hash(state);
                value.hash(state);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
