// edn-core - Per-call read and write options
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Options for one decode or encode call.
//!
//! Options are plain immutable values built with chained methods. Caller
//! entries are layered over the built-in tables when a [`Decoder`] or
//! [`Encoder`] is created, so options can be shared between threads and
//! reused across calls.
//!
//! [`Decoder`]: crate::decoder::Decoder
//! [`Encoder`]: crate::encoder::Encoder

use std::fmt;
use std::sync::Arc;

use edn_parser::{Symbol, TermKind};

use crate::decoder::{DefaultReader, Decoders, Readers};
use crate::depth::DEFAULT_MAX_DEPTH;
use crate::encoder::{DefaultWriter, Writer};
use crate::error::Result;
use crate::value::Value;

/// Options for reading EDN.
#[derive(Clone)]
pub struct ReadOptions {
    pub(crate) readers: Readers,
    pub(crate) default_reader: Option<DefaultReader>,
    pub(crate) decoders: Decoders,
    pub(crate) max_depth: usize,
}

impl ReadOptions {
    pub fn new() -> Self {
        ReadOptions {
            readers: Readers::new(),
            default_reader: None,
            decoders: Decoders::builtin(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Register a reader for `tag`, shadowing any built-in reader.
    #[must_use]
    pub fn reader<F>(mut self, tag: Symbol, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.readers.insert(tag, f);
        self
    }

    /// Register every reader in `readers`.
    #[must_use]
    pub fn readers(mut self, readers: &Readers) -> Self {
        self.readers = self.readers.merged(readers);
        self
    }

    /// Handle tags that have no reader.
    #[must_use]
    pub fn default_reader<F>(mut self, f: F) -> Self
    where
        F: Fn(Symbol, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.default_reader = Some(Arc::new(f));
        self
    }

    /// Override the decoder entry for one term kind.
    #[must_use]
    pub fn decoder<F>(mut self, kind: TermKind, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        self.decoders.insert(kind, f);
        self
    }

    /// Replace the whole decoder table.
    #[must_use]
    pub fn decoders(mut self, decoders: Decoders) -> Self {
        self.decoders = decoders;
        self
    }

    /// Limit how deeply nested the input may be.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured nesting limit.
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("readers", &self.readers)
            .field("default_reader", &self.default_reader.is_some())
            .field("decoders", &self.decoders)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Options for writing EDN.
#[derive(Clone)]
pub struct WriteOptions {
    pub(crate) writers: Vec<Writer>,
    pub(crate) default_writer: Option<DefaultWriter>,
    pub(crate) max_depth: usize,
}

impl WriteOptions {
    pub fn new() -> Self {
        WriteOptions {
            writers: Vec::new(),
            default_writer: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Append a writer. Writers are tried in the order they were added,
    /// before the built-in writers.
    #[must_use]
    pub fn writer(mut self, writer: Writer) -> Self {
        self.writers.push(writer);
        self
    }

    /// Handle values that no writer or structural rule can encode.
    #[must_use]
    pub fn default_writer<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.default_writer = Some(Arc::new(f));
        self
    }

    /// Limit how deeply nested the output may be.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured nesting limit.
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("writers", &self.writers)
            .field("default_writer", &self.default_writer.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
