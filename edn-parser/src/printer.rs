// edn-parser - Printer for EDN terms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Structural printer: turns a [`Term`] back into EDN text.
//!
//! The output re-parses to an equal term. Original whitespace, commas and
//! comments are not preserved.

use std::fmt;

use crate::term::Term;

/// Print a term as EDN text.
#[must_use]
pub fn unparse(term: &Term) -> String {
    term.to_string()
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Nil => write!(f, "nil"),
            Term::Bool(b) => write!(f, "{}", b),
            Term::Int(n) => write!(f, "{}", n),
            Term::BigInt(n) => write!(f, "{}N", n),
            Term::Float(n) => {
                if n.is_nan() {
                    write!(f, "##NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "##Inf")
                    } else {
                        write!(f, "##-Inf")
                    }
                } else if n.fract() == 0.0 {
                    write!(f, "{}.0", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Term::Char(c) => write!(f, "\\{}", format_char(*c)),
            Term::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Term::Symbol(sym) => write!(f, "{}", sym),
            Term::Keyword(kw) => write!(f, "{}", kw),
            Term::List(items) => write_seq(f, "(", items.iter(), ")"),
            Term::Vector(items) => write_seq(f, "[", items.iter(), "]"),
            Term::Set(items) => write_seq(f, "#{", items.iter(), "}"),
            Term::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                write!(f, "}}")
            }
            Term::Tagged(tag, value) => write!(f, "#{} {}", tag, value),
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Term>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

fn format_char(c: char) -> String {
    match c {
        '\n' => "newline".to_string(),
        ' ' => "space".to_string(),
        '\t' => "tab".to_string(),
        '\r' => "return".to_string(),
        '\x08' => "backspace".to_string(),
        '\x0C' => "formfeed".to_string(),
        c if c.is_control() => format!("u{:04X}", c as u32),
        _ => c.to_string(),
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

// ============================================================================
// Tests
// ============================================================================
