// edn-core - Decoder and encoder for EDN
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # edn-core
//!
//! Conversion between EDN [`Term`]s and native [`Value`]s.
//!
//! The [`Decoder`] folds a term tree into values, dispatching tagged
//! elements through tag readers. The [`Encoder`] matches values against
//! ordered writers and structural rules to build terms. Neither sees text:
//! parsing and printing live in `edn-parser`.

mod depth;

pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod value;

pub use convert::{FromValue, IntoValue, from_value, to_value};
pub use decoder::{
    DecodeFn, Decoder, Decoders, DefaultReader, ReaderFn, Readers, read_inst, read_uuid,
    tagged_default,
};
pub use depth::DEFAULT_MAX_DEPTH;
pub use edn_parser::{
    BigInt, EdnGrammar, Grammar, Keyword, OrdMap, OrdSet, ParseError, Symbol, Term, TermKind,
    Vector,
};
pub use encoder::{
    DefaultWriter, Encoder, MAX_DEFAULT_APPLICATIONS, MatchFn, TransformFn, Writer,
    builtin_writers, format_inst, reject_default,
};
pub use error::{Error, Result};
pub use options::{ReadOptions, WriteOptions};
pub use value::{Custom, Value, ValueKind};
