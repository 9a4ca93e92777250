// edn-parser - Keyword type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are identifiers that denote themselves (`:name`, `:prefix/name`).
//!
//! A keyword has exactly the shape of a [`Symbol`] but is a distinct type:
//! the two are interned separately and never compare equal, even when their
//! prefix and name match.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::intern::{Interner, Name, split_prefixed};
use crate::symbol::Symbol;

static KEYWORD_INTERNER: Interner = Interner::new();

/// A keyword with an optional prefix.
///
/// Keywords always start with a colon `:` when printed.
#[derive(Clone)]
pub struct Keyword {
    inner: Arc<Name>,
}

impl Keyword {
    /// Create a new keyword with no prefix.
    pub fn new(name: &str) -> Self {
        Keyword {
            inner: KEYWORD_INTERNER.intern(None, name),
        }
    }

    /// Create a new keyword with a prefix.
    pub fn with_prefix(prefix: &str, name: &str) -> Self {
        Keyword {
            inner: KEYWORD_INTERNER.intern(Some(prefix), name),
        }
    }

    /// Parse a keyword from a string like ":foo" or ":ns/foo".
    /// The leading colon is optional.
    pub fn parse(s: &str) -> Self {
        let s = s.strip_prefix(':').unwrap_or(s);
        match split_prefixed(s) {
            (Some(prefix), name) => Keyword::with_prefix(prefix, name),
            (None, name) => Keyword::new(name),
        }
    }

    /// Get the prefix, if any.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.inner.prefix.as_deref()
    }

    /// Get the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Check if this keyword has a prefix.
    #[inline]
    #[must_use]
    pub fn has_prefix(&self) -> bool {
        self.inner.prefix.is_some()
    }
}

impl From<&Symbol> for Keyword {
    fn from(sym: &Symbol) -> Self {
        match sym.prefix() {
            Some(prefix) => Keyword::with_prefix(prefix, sym.name()),
            None => Keyword::new(sym.name()),
        }
    }
}

impl From<Symbol> for Keyword {
    fn from(sym: Symbol) -> Self {
        Keyword::from(&sym)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.prefix {
            Some(prefix) => write!(f, ":{}/{}", prefix, self.inner.name),
            None => write!(f, ":{}", self.inner.name),
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Keyword {}

impl PartialOrd for Keyword {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyword {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.inner.prefix, &self.inner.name).cmp(&(&other.inner.prefix, &other.inner.name))
    }
}

impl Hash for Keyword {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
