// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! The compiled command patterns.
//!
//! The grammar is generated once at build time and is immutable, so a single
//! `GerberGrammar` can be shared by any number of parsers.

use pest::{Parser, iterators::Pair};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "gerber.pest"]
pub struct GerberGrammar;

/// Match `rule` continuously at the start of `input`.
///
/// Returns the top-level pair of the match, whose span starts at offset 0.
pub fn match_prefix(rule: Rule, input: &str) -> Option<Pair<'_, Rule>> {
    GerberGrammar::parse(rule, input).ok()?.next()
}
