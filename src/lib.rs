// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A parser for [Gerber RS-274X] files, the layer format used to manufacture
//! printed circuit boards.
//!
//! The parser turns Gerber source into a flat, typed syntax tree.  It checks
//! syntax only: coordinates are kept as the digit strings found in the file,
//! and nothing is scaled, converted or rendered.
//!
//! [Gerber RS-274X]: https://www.ucamco.com/en/gerber
//!
//! ## Basic usage
//!
//! Use `gerber_ast::parse::parse` to get a `File`, then work with the nodes
//! from `gerber_ast::ast`, either by matching on them directly or through a
//! `gerber_ast::visit::Visitor`.
//!
//! The following code (the same as the "gerber-parse" demo binary) takes a
//! file as an argument, parses it and outputs the display form, which is the
//! same Gerber, but in a consistent format with one command per line.
//!
//! ```rust,no_run
//! use std::{env, fs};
//! use gerber_ast::parse::parse;
//!
//! fn main() {
//!     let filename = env::args().nth(1).unwrap();
//!     let input = fs::read_to_string(&filename).unwrap();
//!
//!     match parse(&input) {
//!         Err(e) => eprintln!("Parse error: {}", e.render(&filename, &input)),
//!         Ok(file) => print!("{}", file),
//!     }
//! }
//! ```
//!
//! ## Unsupported features
//!
//! Aperture macros are recognized only with an empty body, and apertures
//! referring to a macro template are rejected.  Attribute commands (`%TF`,
//! `%TA`, ...) and step-and-repeat are not parsed either.

pub mod ast;
pub mod error;
pub mod grammar;
pub mod parse;
pub mod scan;
pub mod visit;
