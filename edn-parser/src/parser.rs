// edn-parser - Parser for EDN
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for EDN text.
//!
//! Converts tokens into [`Term`] nodes.

use thiserror::Error;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::symbol::Symbol;
use crate::term::Term;

/// Default limit on collection and tag nesting.
pub const DEFAULT_MAX_NESTING: usize = 128;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into [`Term`] nodes.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source text.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        let (line, column) = lexer.token_start();
        Ok(Parser {
            lexer,
            current,
            line,
            column,
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING,
        })
    }

    /// Set the maximum nesting depth accepted before failing.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<Term>, ParseError> {
        self.skip_discards()?;
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let term = self.parse_form()?;
        Ok(Some(term))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<Term>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse exactly one form; anything else is an error.
    pub fn parse_one(&mut self) -> Result<Term, ParseError> {
        let term = self
            .parse()?
            .ok_or_else(|| self.error("Unexpected end of input".to_string()))?;
        self.skip_discards()?;
        if !matches!(self.current, Token::Eof) {
            return Err(self.error(format!(
                "Expected end of input, found {}",
                self.current
            )));
        }
        Ok(term)
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        self.current = self.lexer.next_token()?;
        (self.line, self.column) = self.lexer.token_start();
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!("Expected {}, found {}", expected, self.current)))
        }
    }

    /// Consume any run of `#_ form` pairs at the current position.
    fn skip_discards(&mut self) -> Result<(), ParseError> {
        while matches!(self.current, Token::Discard) {
            self.advance()?; // consume #_
            self.enter()?;
            let result = self.discard_form();
            self.leave();
            result?;
        }
        Ok(())
    }

    fn discard_form(&mut self) -> Result<(), ParseError> {
        self.skip_discards()?;
        if is_closing(&self.current) {
            return Err(self.error("Missing form after #_".to_string()));
        }
        self.parse_form().map(drop)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!(
                "Nesting exceeds maximum depth of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_form(&mut self) -> Result<Term, ParseError> {
        match &self.current {
            // Literals
            Token::Nil => {
                self.advance()?;
                Ok(Term::nil())
            }
            Token::True => {
                self.advance()?;
                Ok(Term::bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Term::bool(false))
            }
            Token::Int(n) => {
                let n = *n;
                self.advance()?;
                Ok(Term::int(n))
            }
            Token::BigInt(n) => {
                let n = n.clone();
                self.advance()?;
                Ok(Term::bigint(n))
            }
            Token::Float(n) => {
                let n = *n;
                self.advance()?;
                Ok(Term::float(n))
            }
            Token::Char(c) => {
                let c = *c;
                self.advance()?;
                Ok(Term::char(c))
            }
            Token::String(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Term::string(s))
            }
            Token::Symbol(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Term::symbol(Symbol::parse(&s)))
            }
            Token::Keyword(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Term::keyword(Keyword::parse(&s)))
            }

            // Collections
            Token::LParen | Token::LBracket | Token::LBrace | Token::Set | Token::Tag(_) => {
                self.enter()?;
                let result = self.parse_nested();
                self.leave();
                result
            }

            Token::Discard => {
                self.skip_discards()?;
                if is_closing(&self.current) {
                    return Err(self.error(format!("Unexpected {}", self.current)));
                }
                self.parse_form()
            }

            // Unexpected tokens
            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("Unexpected end of input".to_string())),
        }
    }

    fn parse_nested(&mut self) -> Result<Term, ParseError> {
        match &self.current {
            Token::LParen => self.parse_list(),
            Token::LBracket => self.parse_vector(),
            Token::LBrace => self.parse_map(),
            Token::Set => self.parse_set(),
            Token::Tag(tag) => {
                let tag = Symbol::parse(tag);
                self.parse_tagged(tag)
            }
            other => Err(self.error(format!("Unexpected {}", other))),
        }
    }

    /// Parse forms up to (and including) the closing delimiter.
    fn parse_until(&mut self, close: &Token) -> Result<Vec<Term>, ParseError> {
        let mut elements = Vec::new();
        loop {
            self.skip_discards()?;
            if &self.current == close || matches!(self.current, Token::Eof) {
                break;
            }
            elements.push(self.parse_form()?);
        }
        self.expect(close)?;
        Ok(elements)
    }

    fn parse_list(&mut self) -> Result<Term, ParseError> {
        self.advance()?; // consume (
        let elements = self.parse_until(&Token::RParen)?;
        Ok(Term::list(elements))
    }

    fn parse_vector(&mut self) -> Result<Term, ParseError> {
        self.advance()?; // consume [
        let elements = self.parse_until(&Token::RBracket)?;
        Ok(Term::vector(elements))
    }

    fn parse_map(&mut self) -> Result<Term, ParseError> {
        self.advance()?; // consume {
        let forms = self.parse_until(&Token::RBrace)?;
        if forms.len() % 2 != 0 {
            return Err(self.error("Map literal must contain an even number of forms".to_string()));
        }

        let mut pairs = Vec::with_capacity(forms.len() / 2);
        let mut iter = forms.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            pairs.push((key, value));
        }
        Ok(Term::map(pairs))
    }

    fn parse_set(&mut self) -> Result<Term, ParseError> {
        self.advance()?; // consume #{
        let elements = self.parse_until(&Token::RBrace)?;
        Ok(Term::set(elements))
    }

    fn parse_tagged(&mut self, tag: Symbol) -> Result<Term, ParseError> {
        self.advance()?; // consume the tag
        self.skip_discards()?;
        if is_closing(&self.current) {
            return Err(self.error(format!("Missing value for tag #{}", tag)));
        }
        let value = self.parse_form()?;
        Ok(Term::tagged(tag, value))
    }
}

fn is_closing(token: &Token) -> bool {
    matches!(
        token,
        Token::RParen | Token::RBracket | Token::RBrace | Token::Eof
    )
}

/// Parse exactly one EDN form.
///
/// Empty input (or input holding only whitespace, comments and discarded
/// forms) and trailing forms are both syntax errors.
pub fn read(source: &str) -> Result<Term, ParseError> {
    Parser::new(source)?.parse_one()
}

/// Parse every top-level EDN form in `source`.
pub fn read_all(source: &str) -> Result<Vec<Term>, ParseError> {
    Parser::new(source)?.parse_all()
}

// ============================================================================
// Tests
// ============================================================================
