// edn-parser - Lexer for EDN
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for EDN text.
//!
//! Converts a source string into a stream of tokens. Commas count as
//! whitespace and `;` starts a comment running to the end of the line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use num_bigint::BigInt;
use thiserror::Error;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Dispatch
    Set,         // #{
    Discard,     // #_
    Tag(String), // #tag

    // Literals
    Nil,
    True,
    False,
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Char(char),
    String(String),
    Symbol(String),
    Keyword(String),

    // Special
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Set => write!(f, "#{{"),
            Token::Discard => write!(f, "#_"),
            Token::Tag(tag) => write!(f, "#{}", tag),
            Token::Nil => write!(f, "nil"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Int(n) => write!(f, "{}", n),
            Token::BigInt(n) => write!(f, "{}N", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::Char(c) => write!(f, "\\{}", c),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Keyword(s) => write!(f, ":{}", s),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {line}:{column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// The lexer converts source text into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    token_start: (usize, usize),
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            token_start: (1, 1),
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();
        self.token_start = (self.line, self.column);

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            // Delimiters
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            ']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            '{' => {
                self.advance();
                Ok(Token::LBrace)
            }
            '}' => {
                self.advance();
                Ok(Token::RBrace)
            }

            // Dispatch (#)
            '#' => self.read_dispatch(),

            // String
            '"' => self.read_string(),

            // Character
            '\\' => self.read_char(),

            // Keyword
            ':' => self.read_keyword(),

            // Number or symbol starting with - or +
            '-' | '+' => self.read_number_or_symbol(),

            // Number
            '0'..='9' => self.read_number(),

            // Symbol
            _ if is_symbol_start(c) => self.read_symbol(),

            _ => Err(self.error(format!("Unexpected character: '{}'", c))),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Line and column where the most recently returned token starts.
    pub fn token_start(&self) -> (usize, usize) {
        self.token_start
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Read identifier characters (symbol constituents plus `/`).
    fn read_identifier(&mut self, name: &mut String) {
        while let Some(c) = self.peek() {
            if is_symbol_char(c) || c == '/' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_dispatch(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume #

        match self.peek() {
            Some('{') => {
                self.advance();
                Ok(Token::Set)
            }
            Some('_') => {
                self.advance();
                Ok(Token::Discard)
            }
            Some('#') => {
                // ##Inf, ##-Inf, ##NaN
                self.advance();
                self.read_special_float()
            }
            Some(c) if c.is_alphabetic() => {
                let mut tag = String::new();
                self.read_identifier(&mut tag);
                Ok(Token::Tag(tag))
            }
            Some(c) => Err(self.error(format!("Unknown dispatch macro: #{}", c))),
            None => Err(self.error("Unexpected end of input after #".to_string())),
        }
    }

    fn read_special_float(&mut self) -> Result<Token, LexerError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_symbol_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match name.as_str() {
            "Inf" => Ok(Token::Float(f64::INFINITY)),
            "-Inf" => Ok(Token::Float(f64::NEG_INFINITY)),
            "NaN" => Ok(Token::Float(f64::NAN)),
            _ => Err(self.error(format!("Unknown special value: ##{}", name))),
        }
    }

    fn read_string(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume opening "
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    Some('u') => {
                        let code = self.read_unicode_escape()?;
                        s.push(code);
                    }
                    Some(c) => return Err(self.error(format!("Unknown escape sequence: \\{}", c))),
                    None => return Err(self.error("Unterminated string escape".to_string())),
                },
                Some(c) => s.push(c),
                None => return Err(self.error("Unterminated string".to_string())),
            }
        }

        Ok(Token::String(s))
    }

    fn read_unicode_escape(&mut self) -> Result<char, LexerError> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.advance() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(self.error(format!("Invalid hex digit in unicode escape: {}", c)));
                }
                None => return Err(self.error("Unterminated unicode escape".to_string())),
            }
        }
        self.code_point(&hex)
    }

    fn code_point(&self, hex: &str) -> Result<char, LexerError> {
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| self.error(format!("Invalid unicode escape: \\u{}", hex)))?;
        char::from_u32(code)
            .ok_or_else(|| self.error(format!("Invalid unicode code point: {}", code)))
    }

    fn read_char(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume backslash

        let first = self
            .advance()
            .ok_or_else(|| self.error("Expected character after \\".to_string()))?;

        if !first.is_ascii_alphabetic() {
            return Ok(Token::Char(first));
        }

        let mut name = String::new();
        name.push(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match name.as_str() {
            "newline" => Ok(Token::Char('\n')),
            "space" => Ok(Token::Char(' ')),
            "tab" => Ok(Token::Char('\t')),
            "return" => Ok(Token::Char('\r')),
            "backspace" => Ok(Token::Char('\x08')),
            "formfeed" => Ok(Token::Char('\x0C')),
            _ if name.len() == 1 => Ok(Token::Char(first)),
            _ if name.starts_with('u') && name.len() == 5 => {
                self.code_point(&name[1..]).map(Token::Char)
            }
            _ => Err(self.error(format!("Unknown character name: \\{}", name))),
        }
    }

    fn read_keyword(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume :

        if self.peek() == Some(':') {
            return Err(self.error("Auto-resolved keywords (::) are not valid EDN".to_string()));
        }

        let mut name = String::new();
        self.read_identifier(&mut name);

        if name.is_empty() {
            return Err(self.error("Expected keyword name after :".to_string()));
        }

        Ok(Token::Keyword(name))
    }

    fn read_symbol(&mut self) -> Result<Token, LexerError> {
        let mut name = String::new();
        self.read_identifier(&mut name);

        match name.as_str() {
            "nil" => Ok(Token::Nil),
            "true" => Ok(Token::True),
            "false" => Ok(Token::False),
            _ => Ok(Token::Symbol(name)),
        }
    }

    fn read_number_or_symbol(&mut self) -> Result<Token, LexerError> {
        let mut s = String::new();
        if let Some(sign) = self.advance() {
            s.push(sign);
        }

        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.collect_number_chars(&mut s);
                self.parse_number(&s)
            }
            _ => {
                // `+`, `-`, `->`, `-foo`
                self.read_identifier(&mut s);
                Ok(Token::Symbol(s))
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, LexerError> {
        let mut s = String::new();
        self.collect_number_chars(&mut s);
        self.parse_number(&s)
    }

    fn collect_number_chars(&mut self, s: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn parse_number(&self, s: &str) -> Result<Token, LexerError> {
        if let Some(digits) = s.strip_suffix('N') {
            let big: BigInt = digits
                .parse()
                .map_err(|_| self.error(format!("Invalid big integer: {}", s)))?;
            return Ok(Token::BigInt(big));
        }

        if s.ends_with('M') {
            return Err(self.error(format!("Exact decimal literals are not supported: {}", s)));
        }

        if s.contains('.') || s.contains('e') || s.contains('E') {
            let n: f64 = s
                .parse()
                .map_err(|_| self.error(format!("Invalid float: {}", s)))?;
            return Ok(Token::Float(n));
        }

        // Promote to BigInt when the literal does not fit in i64
        match s.parse::<i64>() {
            Ok(n) => Ok(Token::Int(n)),
            Err(_) => s
                .parse::<BigInt>()
                .map(Token::BigInt)
                .map_err(|_| self.error(format!("Invalid integer: {}", s))),
        }
    }
}

/// Check if a character can start a symbol.
fn is_symbol_start(c: char) -> bool {
    c.is_alphabetic()
        || matches!(
            c,
            '!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | '<' | '=' | '>' | '?' | '_'
        )
}

/// Check if a character can appear in a symbol.
fn is_symbol_char(c: char) -> bool {
    is_symbol_start(c) || c.is_ascii_digit() || c == '#' || c == ':'
}

// ============================================================================
// Tests
// ============================================================================
