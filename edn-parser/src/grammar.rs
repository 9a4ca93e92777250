// edn-parser - Grammar interface
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The narrow boundary between text and terms.
//!
//! Decoding and encoding work purely on [`Term`]s; anything that can turn
//! text into terms and back can stand in for the built-in EDN grammar.

use crate::parser::{DEFAULT_MAX_NESTING, ParseError, Parser};
use crate::printer;
use crate::term::Term;

/// Converts between text and [`Term`]s.
pub trait Grammar {
    /// Parse exactly one form from `text`.
    fn parse(&self, text: &str) -> Result<Term, ParseError>;

    /// Render a term as text that [`Grammar::parse`] accepts.
    fn unparse(&self, term: &Term) -> String;
}

/// The built-in EDN grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdnGrammar {
    max_nesting: usize,
}

impl EdnGrammar {
    pub fn new() -> Self {
        EdnGrammar {
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    /// Limit how deeply collections and tags may nest.
    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

impl Default for EdnGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for EdnGrammar {
    fn parse(&self, text: &str) -> Result<Term, ParseError> {
        Parser::new(text)?
            .with_max_depth(self.max_nesting)
            .parse_one()
    }

    fn unparse(&self, term: &Term) -> String {
        printer::unparse(term)
    }
}

impl<G: Grammar + ?Sized> Grammar for &G {
    fn parse(&self, text: &str) -> Result<Term, ParseError> {
        (**self).parse(text)
    }

    fn unparse(&self, term: &Term) -> String {
        (**self).unparse(term)
    }
}
