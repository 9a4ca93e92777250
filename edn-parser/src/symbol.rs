// edn-parser - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are identifiers that may carry an optional prefix (`prefix/name`).
//!
//! Symbols are interned: two symbols with the same prefix and name share the
//! same storage, so comparison and hashing are pointer operations. See
//! [`crate::intern`] for the memory implications.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::intern::{Interner, Name, split_prefixed};

static SYMBOL_INTERNER: Interner = Interner::new();

/// A symbol with an optional prefix.
///
/// Symbols name things (`foo`, `my.app/user`) and are also the tags of
/// tagged literals (`#inst`, `#myapp/point`).
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<Name>,
}

impl Symbol {
    /// Create a new symbol with no prefix.
    pub fn new(name: &str) -> Self {
        Symbol {
            inner: SYMBOL_INTERNER.intern(None, name),
        }
    }

    /// Create a new symbol with a prefix.
    pub fn with_prefix(prefix: &str, name: &str) -> Self {
        Symbol {
            inner: SYMBOL_INTERNER.intern(Some(prefix), name),
        }
    }

    /// Parse a symbol from a string like "foo" or "my.ns/foo".
    pub fn parse(s: &str) -> Self {
        match split_prefixed(s) {
            (Some(prefix), name) => Symbol::with_prefix(prefix, name),
            (None, name) => Symbol::new(name),
        }
    }

    /// Get the prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.inner.prefix.as_deref()
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Check if this symbol has a prefix.
    #[must_use]
    pub fn has_prefix(&self) -> bool {
        self.inner.prefix.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.prefix {
            Some(prefix) => write!(f, "{}/{}", prefix, self.inner.name),
            None => write!(f, "{}", self.inner.name),
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // `None` sorts before `Some`, so unprefixed symbols come first.
        (&self.inner.prefix, &self.inner.name).cmp(&(&other.inner.prefix, &other.inner.name))
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
