// edn-parser - Shared name interner for symbols and keywords
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Interning of `(prefix, name)` pairs.
//!
//! Symbols and keywords each own one [`Interner`]. Two identifiers with the
//! same prefix and name resolve to the same `Arc<Name>`, so equality and
//! hashing reduce to pointer operations.
//!
//! # Memory Behaviour
//!
//! Interned names are never deallocated. Decoding untrusted documents with
//! an unbounded set of distinct symbols grows the interner monotonically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// An interned `(prefix, name)` pair.
#[derive(Debug)]
pub(crate) struct Name {
    pub(crate) prefix: Option<Arc<str>>,
    pub(crate) name: Arc<str>,
}

/// Key type for the interner: (prefix, name)
type InternerKey = (Option<Arc<str>>, Arc<str>);

#[derive(Default)]
struct Tables {
    names: HashMap<InternerKey, Arc<Name>>,
    strings: HashMap<String, Arc<str>>,
}

impl Tables {
    fn intern_string(&mut self, s: &str) -> Arc<str> {
        if let Some(interned) = self.strings.get(s) {
            Arc::clone(interned)
        } else {
            let interned: Arc<str> = Arc::from(s);
            self.strings.insert(s.to_string(), Arc::clone(&interned));
            interned
        }
    }
}

/// A thread-safe interner. Meant to live in a `static`.
pub(crate) struct Interner {
    tables: Mutex<Option<Tables>>,
}

impl Interner {
    pub(crate) const fn new() -> Self {
        Interner {
            tables: Mutex::new(None),
        }
    }

    pub(crate) fn intern(&self, prefix: Option<&str>, name: &str) -> Arc<Name> {
        // Every insert is a complete entry, so a poisoned lock is still usable.
        let mut guard = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        let tables = guard.get_or_insert_with(Tables::default);

        let prefix = prefix.map(|p| tables.intern_string(p));
        let name = tables.intern_string(name);
        let key = (prefix.clone(), name.clone());

        Arc::clone(
            tables
                .names
                .entry(key)
                .or_insert_with(|| Arc::new(Name { prefix, name })),
        )
    }
}

/// Split `"prefix/name"` on the first slash. A lone `/` (or a leading slash)
/// is treated as a bare name.
pub(crate) fn split_prefixed(s: &str) -> (Option<&str>, &str) {
    match s.find('/') {
        Some(0) | None => (None, s),
        Some(pos) => (Some(&s[..pos]), &s[pos + 1..]),
    }
}
