// edn-core - Recursion depth tracking
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::cell::Cell;

use crate::error::{Error, Result};

/// Default maximum nesting depth for decoding and encoding.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Per-traversal depth counter.
#[derive(Debug)]
pub(crate) struct Depth {
    current: Cell<usize>,
    max: usize,
}

impl Depth {
    pub(crate) fn new(max: usize) -> Self {
        Depth {
            current: Cell::new(0),
            max,
        }
    }

    /// Enter one level; the level is left when the guard drops.
    pub(crate) fn enter(&self) -> Result<DepthGuard<'_>> {
        let next = self.current.get() + 1;
        if next > self.max {
            return Err(Error::DepthExceeded(self.max));
        }
        self.current.set(next);
        Ok(DepthGuard(&self.current))
    }
}

/// RAII guard for one level of [`Depth`].
pub(crate) struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_level() {
        let depth = Depth::new(2);
        {
            let _a = depth.enter().unwrap();
            let _b = depth.enter().unwrap();
            assert!(matches!(depth.enter(), Err(Error::DepthExceeded(2))));
        }
        assert_eq!(depth.current.get(), 0);
        assert!(depth.enter().is_ok());
    }
}
