// edn-codec - EDN codec with pluggable tag readers and writers
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # edn-codec
//!
//! Reads and writes extensible data notation (EDN).
//!
//! Text is parsed into [`Term`]s by a [`Grammar`], then decoded into native
//! [`Value`]s. Tagged elements such as `#inst` and `#uuid` go through tag
//! readers; callers can register their own readers and writers per call.
//!
//! ## Quick Start
//!
//! ```rust
//! use edn_codec::{dumps, loads};
//!
//! let value = loads("{:a [1 2], :b #{\"x\"}}").unwrap();
//! assert_eq!(dumps(&value).unwrap(), "{:a [1 2], :b #{\"x\"}}");
//! ```
//!
//! ## Custom Tags
//!
//! ```rust
//! use edn_codec::{ReadOptions, Symbol, Value, loads, loads_with};
//!
//! // Unknown tags are kept as tagged values
//! let tagged = loads("#point [1 2]").unwrap();
//! assert!(matches!(tagged, Value::Tagged { .. }));
//!
//! // A reader turns them into something else
//! let options = ReadOptions::new().reader(Symbol::new("point"), |value| match value {
//!     Value::Vector(items) => Ok(Value::Vector(items.into_iter().rev().collect())),
//!     other => Ok(other),
//! });
//! let reversed = loads_with("#point [1 2]", &options).unwrap();
//! assert_eq!(reversed.to_string(), "[2 1]");
//! ```

use tracing::debug;

pub use edn_core::{
    BigInt, Custom, DEFAULT_MAX_DEPTH, DecodeFn, Decoder, Decoders, DefaultReader,
    DefaultWriter, EdnGrammar, Encoder, Error, FromValue, Grammar, IntoValue, Keyword,
    MAX_DEFAULT_APPLICATIONS, MatchFn, OrdMap, OrdSet, ParseError, ReadOptions, ReaderFn,
    Readers, Result, Symbol, Term, TermKind, TransformFn, Value, ValueKind, Vector,
    WriteOptions, Writer, builtin_writers, format_inst, from_value, read_inst, read_uuid,
    reject_default, tagged_default, to_value,
};
pub use edn_parser::{read, read_all, unparse};

/// Parse and decode one EDN form with the default options.
///
/// Malformed text fails with [`Error::Syntax`].
pub fn loads(text: &str) -> Result<Value> {
    loads_with(text, &ReadOptions::default())
}

/// Parse and decode one EDN form.
///
/// The parser's nesting limit follows the options' depth limit, so input
/// nested too deeply fails with [`Error::Syntax`] before decoding starts.
pub fn loads_with(text: &str, options: &ReadOptions) -> Result<Value> {
    let grammar = EdnGrammar::new().with_max_nesting(options.depth_limit());
    loads_with_grammar(&grammar, text, options)
}

/// Parse `text` with `grammar`, then decode it.
pub fn loads_with_grammar<G: Grammar>(
    grammar: &G,
    text: &str,
    options: &ReadOptions,
) -> Result<Value> {
    debug!(len = text.len(), "loading EDN text");
    let term = grammar.parse(text)?;
    from_term(&term, options)
}

/// Decode a term that has already been parsed.
pub fn from_term(term: &Term, options: &ReadOptions) -> Result<Value> {
    Decoder::new(options).decode(term)
}

/// Encode and print a value with the default options.
///
/// Values no rule can encode fail with [`Error::Unencodable`].
pub fn dumps(value: &Value) -> Result<String> {
    dumps_with(value, &WriteOptions::default())
}

/// Encode and print a value.
pub fn dumps_with(value: &Value, options: &WriteOptions) -> Result<String> {
    dumps_with_grammar(&EdnGrammar::new(), value, options)
}

/// Encode a value, then print it with `grammar`.
pub fn dumps_with_grammar<G: Grammar>(
    grammar: &G,
    value: &Value,
    options: &WriteOptions,
) -> Result<String> {
    debug!(kind = %value.kind(), "dumping value");
    let term = to_term(value, options)?;
    Ok(grammar.unparse(&term))
}

/// Encode a value into a term without printing it.
pub fn to_term(value: &Value, options: &WriteOptions) -> Result<Term> {
    Encoder::new(options).encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parenthesised;

    impl Grammar for Parenthesised {
        fn parse(&self, text: &str) -> std::result::Result<Term, ParseError> {
            let inner = text
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .unwrap_or(text);
            read(inner)
        }

        fn unparse(&self, term: &Term) -> String {
            format!("<{}>", unparse(term))
        }
    }

    #[test]
    fn test_loads_and_dumps() {
        let value = loads("[1 :two \"three\"]").unwrap();
        assert_eq!(dumps(&value).unwrap(), "[1 :two \"three\"]");
    }

    #[test]
    fn test_custom_grammar() {
        let grammar = Parenthesised;
        let value = loads_with_grammar(&grammar, "<(1 2)>", &ReadOptions::default()).unwrap();
        assert_eq!(value, Value::list(vec![Value::int(1), Value::int(2)]));
        let text = dumps_with_grammar(&grammar, &value, &WriteOptions::default()).unwrap();
        assert_eq!(text, "<(1 2)>");
    }

    #[test]
    fn test_term_level_functions() {
        let term = read("#{:a}").unwrap();
        let value = from_term(&term, &ReadOptions::default()).unwrap();
        assert_eq!(to_term(&value, &WriteOptions::default()).unwrap(), term);
    }

    #[test]
    fn test_depth_limit_applies_to_parsing() {
        let options = ReadOptions::new().max_depth(3);
        assert!(matches!(
            loads_with("[[[[1]]]]", &options),
            Err(Error::Syntax(_))
        ));
        assert!(loads_with("[[[1]]]", &options).is_ok());
        assert!(loads_with("#a #b [1]", &options).is_ok());
    }

    fn nested(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_default_depth_round_trip() {
        let text = nested(DEFAULT_MAX_DEPTH);
        let value = loads(&text).unwrap();
        assert_eq!(dumps(&value).unwrap(), text);
    }

    #[test]
    fn test_beyond_default_depth_fails_cleanly() {
        assert!(matches!(
            loads(&nested(DEFAULT_MAX_DEPTH + 1)),
            Err(Error::Syntax(_))
        ));

        let mut value = Value::vector(Vec::new());
        for _ in 0..DEFAULT_MAX_DEPTH {
            value = Value::vector(vec![value]);
        }
        assert!(matches!(
            dumps(&value),
            Err(Error::DepthExceeded(DEFAULT_MAX_DEPTH))
        ));
    }
}
