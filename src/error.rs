// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use pest::{Position, error::{Error, ErrorVariant}};

use crate::grammar::Rule;

/// Maximum number of characters of the offending line quoted in a message.
const SNIPPET_LEN: usize = 20;

/// Compute the 0-based line and column of the byte `index` in `source`.
pub fn locate(source: &str, index: usize) -> (usize, usize) {
    let before = &source.as_bytes()[..index.min(source.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, index - line_start)
}

/// The input could not be parsed as Gerber.
///
/// Parsing stops at the first such error; no partial result is kept.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxError {
    /// Byte offset of the command that failed to parse.
    pub index: usize,
    pub line: usize,
    pub column: usize,
    /// Start of the offending line, from `index` on.
    pub snippet: String,
    /// What the innermost parser was looking for.
    pub expected: &'static str,
}

pub type ParseResult<T> = Result<T, SyntaxError>;

impl SyntaxError {
    pub fn new(source: &str, index: usize, expected: &'static str) -> Self {
        let (line, column) = locate(source, index);
        let snippet = source.get(index..).unwrap_or("")
            .chars()
            .take_while(|&ch| ch != '\n' && ch != '\r')
            .take(SNIPPET_LEN)
            .collect();
        SyntaxError { index, line, column, snippet, expected }
    }

    /// Convert into a pest error, which renders the offending line with a
    /// caret under the error position.
    pub fn to_pest(&self, source: &str) -> Option<Error<Rule>> {
        let pos = Position::new(source, self.index)?;
        Some(Error::new_from_pos(
            ErrorVariant::CustomError { message: format!("expected {}", self.expected) },
            pos))
    }

    /// Render the error for display to a user, naming the file it came from.
    pub fn render(&self, path: &str, source: &str) -> String {
        match self.to_pest(source) {
            Some(err) => err.with_path(path).to_string(),
            None => format!("{}: {}", path, self),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Syntax error at index {} (line: {} column: {}): '{}'",
               self.index, self.line, self.column, self.snippet)
    }
}

impl std::error::Error for SyntaxError {}
