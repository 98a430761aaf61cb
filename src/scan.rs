// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Low-level scanners shared by the command parsers.
//!
//! Every scanner takes the remaining text of the command being parsed and the
//! number of bytes consumed from that command so far.  On success both are
//! advanced past the match; on failure neither is touched.

use crate::grammar::{match_prefix, Rule};

/// The input did not match what a scanner or command parser expected.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mismatch {
    pub expected: &'static str,
}

pub type ScanResult<T> = Result<T, Mismatch>;

pub(crate) fn mismatch<T>(expected: &'static str) -> ScanResult<T> {
    Err(Mismatch { expected })
}

fn advance<'a>(source: &mut &'a str, offset: &mut usize, len: usize) -> &'a str {
    let (matched, rest) = source.split_at(len);
    *source = rest;
    *offset += len;
    matched
}

/// Consume `expected`, or fail.
pub fn consume_char(source: &mut &str, offset: &mut usize, expected: char) -> ScanResult<char> {
    if try_consume_char(source, offset, expected) {
        Ok(expected)
    } else {
        mismatch("literal character")
    }
}

/// Consume `expected` if it is the next character.
pub fn try_consume_char(source: &mut &str, offset: &mut usize, expected: char) -> bool {
    if source.starts_with(expected) {
        advance(source, offset, expected.len_utf8());
        true
    } else {
        false
    }
}

/// Consume the literal key sequence `expected`, or fail without consuming
/// anything.
pub fn consume_str(source: &mut &str, offset: &mut usize, expected: &str) -> ScanResult<()> {
    if source.starts_with(expected) {
        advance(source, offset, expected.len());
        Ok(())
    } else {
        mismatch("literal sequence")
    }
}

/// Consume the longest prefix whose characters all satisfy `pred`.
pub fn consume_while<'a>(source: &mut &'a str, offset: &mut usize,
                         pred: impl Fn(char) -> bool) -> &'a str {
    let len = source.find(|ch: char| !pred(ch)).unwrap_or(source.len());
    advance(source, offset, len)
}

/// Consume one or more ASCII digits.
pub fn consume_integer<'a>(source: &mut &'a str, offset: &mut usize) -> ScanResult<&'a str> {
    let mut rest = *source;
    let mut len = 0;
    let digits = consume_while(&mut rest, &mut len, |ch| ch.is_ascii_digit());
    if digits.is_empty() {
        return mismatch("integer");
    }
    *source = rest;
    *offset += len;
    Ok(digits)
}

/// Consume a decimal number with optional sign and optional fraction.
pub fn consume_float(source: &mut &str, offset: &mut usize) -> ScanResult<f64> {
    let mut rest = *source;
    let mut len = 0;
    let text = consume_rule(&mut rest, &mut len, Rule::float)?;
    let value = text.parse::<f64>().or_else(|_| mismatch("float"))?;
    *source = rest;
    *offset += len;
    Ok(value)
}

/// Consume whatever a continuous match of the grammar rule covers.
pub fn consume_rule<'a>(source: &mut &'a str, offset: &mut usize,
                        rule: Rule) -> ScanResult<&'a str> {
    let len = match match_prefix(rule, *source) {
        Some(pair) => pair.as_str().len(),
        None => return mismatch(rule_name(rule)),
    };
    Ok(advance(source, offset, len))
}

pub fn skip_whitespace(source: &mut &str, offset: &mut usize) {
    consume_while(source, offset, |ch| ch.is_ascii_whitespace());
}

fn rule_name(rule: Rule) -> &'static str {
    match rule {
        Rule::float => "float",
        Rule::macro_name => "macro name",
        Rule::aperture_id => "aperture number",
        _ => "token",
    }
}
