// edn-parser - Lexer, parser and printer for EDN
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # edn-parser
//!
//! The term model for extensible data notation (EDN), together with the
//! lexer, parser and printer that convert between EDN text and [`Term`]s.

mod intern;

pub mod grammar;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod term;

pub use grammar::{EdnGrammar, Grammar};
pub use im::{OrdMap, OrdSet, Vector};
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError, Token};
pub use num_bigint::BigInt;
pub use num_traits::ToPrimitive;
pub use parser::{DEFAULT_MAX_NESTING, ParseError, Parser, read, read_all};
pub use printer::unparse;
pub use symbol::Symbol;
pub use term::{Term, TermKind};
