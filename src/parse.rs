// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::mem;
use std::str::FromStr;
use itertools::Itertools;
use log::{debug, trace};
use pest::iterators::Pair;

use crate::ast::*;
use crate::error::{ParseResult, SyntaxError};
use crate::grammar::{match_prefix, Rule};
use crate::scan::{self, mismatch, Mismatch, ScanResult};

/// Parse Gerber source into a `File`, using a fresh `Parser`.
pub fn parse(source: &str) -> ParseResult<File> {
    Parser::new().parse(source)
}

/// A reusable Gerber parser.
///
/// Each call to `parse` starts from scratch; the parser only keeps its output
/// buffer around between calls.
#[derive(Debug, Default)]
pub struct Parser {
    nodes: Vec<Node>,
    cursor: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole document.
    ///
    /// Fails at the first command that does not match any known syntax; the
    /// error is located at the start of that command.
    pub fn parse(&mut self, source: &str) -> ParseResult<File> {
        // usually there is one command per line
        let line_count = source.bytes().filter(|&b| b == b'\n').count();
        self.nodes.clear();
        self.nodes.reserve(line_count);
        self.cursor = 0;
        debug!("parsing {} bytes of Gerber source", source.len());

        while self.cursor + 1 < source.len() {
            let rest = source.get(self.cursor..).unwrap_or("");
            match self.parse_global(rest) {
                Ok(consumed) => self.cursor += consumed,
                Err(Mismatch { expected }) => {
                    self.nodes.clear();
                    return Err(SyntaxError::new(source, self.cursor, expected));
                }
            }
        }

        debug!("parsed {} nodes", self.nodes.len());
        Ok(File::new(mem::take(&mut self.nodes)))
    }

    fn emit(&mut self, node: Node) {
        trace!("parsed {} at {}: {:?}", node.name(), self.cursor, node);
        self.nodes.push(node);
    }

    fn parse_global(&mut self, source: &str) -> ScanResult<usize> {
        match source.chars().next() {
            Some(' ') | Some('\t') | Some('\n') | Some('\r') => Ok(1),
            Some('G') | Some('g') => self.parse_g_code(source),
            Some('D') | Some('d') => self.parse_d_code(source),
            Some('M') => self.parse_m_code(source),
            Some('X') => self.parse_coordinate(source, 'X', Node::CoordinateX),
            Some('Y') => self.parse_coordinate(source, 'Y', Node::CoordinateY),
            Some('I') => self.parse_coordinate(source, 'I', Node::CoordinateI),
            Some('J') => self.parse_coordinate(source, 'J', Node::CoordinateJ),
            Some('%') => self.parse_extended_command(source),
            _ => mismatch("command"),
        }
    }

    fn parse_g_code(&mut self, source: &str) -> ScanResult<usize> {
        if let Some(pair) = match_prefix(Rule::g_code, source) {
            let len = pair.as_str().len();
            let (value,) = pair.into_inner().collect_tuple().expect("code value");
            let node = match value.as_str() {
                "1" => Some(Node::G01),
                "2" => Some(Node::G02),
                "3" => Some(Node::G03),
                "4" => Some(Node::G04(G04::default())),
                "36" => Some(Node::G36),
                "37" => Some(Node::G37),
                "54" => Some(Node::G54),
                "55" => Some(Node::G55),
                "70" => Some(Node::G70),
                "71" => Some(Node::G71),
                "74" => Some(Node::G74),
                "75" => Some(Node::G75),
                "90" => Some(Node::G90),
                "91" => Some(Node::G91),
                _ => None,
            };
            if let Some(node) = node {
                self.emit(node);
                return Ok(len);
            }
        }

        // not a known code, but could still be a comment
        let pair = match_prefix(Rule::g04, source).ok_or(Mismatch { expected: "G code" })?;
        let len = pair.as_str().len();
        let (comment,) = pair.into_inner().collect_tuple().expect("comment");
        self.emit(Node::G04(G04 { comment: comment.as_str().into() }));
        Ok(len)
    }

    fn parse_d_code(&mut self, source: &str) -> ScanResult<usize> {
        let pair = match_prefix(Rule::d_code, source).ok_or(Mismatch { expected: "D code" })?;
        let len = pair.as_str().len();
        let (value,) = pair.into_inner().collect_tuple().expect("code value");
        self.emit(match value.as_str() {
            "1" => Node::D01,
            "2" => Node::D02,
            "3" => Node::D03,
            id => Node::Dnn(Dnn { aperture_id: id.into() }),
        });
        Ok(len)
    }

    fn parse_m_code(&mut self, source: &str) -> ScanResult<usize> {
        let pair = match_prefix(Rule::m_code, source).ok_or(Mismatch { expected: "M code" })?;
        let len = pair.as_str().len();
        let (value,) = pair.into_inner().collect_tuple().expect("code value");
        match value.as_str() {
            "2" => self.emit(Node::M02),
            _ => return mismatch("M02"),
        }
        Ok(len)
    }

    fn parse_coordinate(&mut self, source: &str, letter: char,
                        make: fn(Coordinate) -> Node) -> ScanResult<usize> {
        // the letter plus at least two more characters
        if source.len() < 3 {
            return mismatch("coordinate value");
        }
        let mut rest = source;
        let mut offset = 0;
        scan::consume_char(&mut rest, &mut offset, letter)?;
        let value = scan::consume_integer(&mut rest, &mut offset)?;
        self.emit(make(Coordinate { value: value.into() }));
        Ok(offset)
    }

    fn parse_extended_command(&mut self, source: &str) -> ScanResult<usize> {
        // the shortest extended commands look like %XY*%
        if source.len() < 5 {
            return mismatch("extended command");
        }
        match source.as_bytes()[1] {
            b'A' => self.parse_aperture(source),
            b'F' => self.parse_fs(source),
            b'M' => self.parse_mo(source),
            b'L' => self.parse_load_command(source),
            _ => mismatch("extended command"),
        }
    }

    fn parse_aperture(&mut self, source: &str) -> ScanResult<usize> {
        match source.as_bytes()[2] {
            b'D' => self.parse_aperture_definition(source),
            b'M' => self.parse_aperture_macro(source),
            _ => mismatch("AD or AM"),
        }
    }

    fn parse_fs(&mut self, source: &str) -> ScanResult<usize> {
        if source.len() < 13 {
            return mismatch("format specification");
        }
        let pair = match_prefix(Rule::fs, source).ok_or(Mismatch { expected: "format specification" })?;
        let len = pair.as_str().len();
        let (zeros, notation, x_int, x_dec, y_int, y_dec) =
            pair.into_inner().collect_tuple().expect("format fields");
        let fs = Fs {
            zeros: Zeros::from_str(zeros.as_str()).or_else(|_| mismatch("L or T"))?,
            coordinate_mode: CoordinateNotation::from_str(notation.as_str())
                .or_else(|_| mismatch("A or I"))?,
            x_integral: digit(x_int)?,
            x_decimal: digit(x_dec)?,
            y_integral: digit(y_int)?,
            y_decimal: digit(y_dec)?,
        };
        self.emit(Node::Fs(fs));
        Ok(len)
    }

    fn parse_mo(&mut self, source: &str) -> ScanResult<usize> {
        if source.len() < 6 {
            return mismatch("unit mode");
        }
        let pair = match_prefix(Rule::mo, source).ok_or(Mismatch { expected: "unit mode" })?;
        let len = pair.as_str().len();
        let (unit,) = pair.into_inner().collect_tuple().expect("unit");
        let unit_mode = UnitMode::from_str(unit.as_str()).or_else(|_| mismatch("IN or MM"))?;
        self.emit(Node::Mo(Mo { unit_mode }));
        Ok(len)
    }

    fn parse_load_command(&mut self, source: &str) -> ScanResult<usize> {
        // the shortest load command is %LPD*%
        if source.len() < 6 {
            return mismatch("load command");
        }
        if source.as_bytes()[2] != b'P' {
            return mismatch("LP");
        }
        let mut rest = source;
        let mut offset = 0;
        scan::consume_str(&mut rest, &mut offset, "%LP")?;
        let symbol = rest.get(..1).ok_or(Mismatch { expected: "D or C" })?;
        let polarity = Polarity::from_str(symbol).or_else(|_| mismatch("D or C"))?;
        scan::consume_str(&mut rest, &mut offset, symbol)?;
        scan::consume_str(&mut rest, &mut offset, "*%")?;
        self.emit(Node::Lp(Lp { polarity }));
        Ok(offset)
    }

    fn parse_aperture_definition(&mut self, source: &str) -> ScanResult<usize> {
        let pair = match_prefix(Rule::ad_header, source)
            .ok_or(Mismatch { expected: "aperture definition" })?;
        let offset = pair.as_str().len();
        let (aperture_id, template) = pair.into_inner().collect_tuple().expect("header fields");
        let aperture_id = aperture_id.as_str().to_string();

        let rest = &source[offset..];
        if rest.is_empty() {
            return mismatch("aperture parameters");
        }
        let consumed = match template.as_str() {
            "C" => self.parse_circle_tail(rest, aperture_id)?,
            "R" => self.parse_rect_like_tail(rest, aperture_id, Node::Adr)?,
            "O" => self.parse_rect_like_tail(rest, aperture_id, Node::Ado)?,
            "P" => self.parse_polygon_tail(rest, aperture_id)?,
            t if t.len() == 1 => return mismatch("standard aperture template"),
            // TODO: apertures defined through a macro need macro primitives first
            _ => return mismatch("standard aperture template (macro apertures are unsupported)"),
        };
        Ok(offset + consumed)
    }

    fn parse_circle_tail(&mut self, source: &str, aperture_id: String) -> ScanResult<usize> {
        let mut rest = source;
        let mut offset = 0;
        let diameter = scan::consume_float(&mut rest, &mut offset)?;
        let hole_diameter = modifier(&mut rest, &mut offset)?;
        scan::consume_str(&mut rest, &mut offset, "*%")?;

        self.emit(Node::Adc(Adc { aperture_id, diameter, hole_diameter }));
        Ok(offset)
    }

    /// Rectangles and obrounds share their syntax; `make` selects the node.
    fn parse_rect_like_tail(&mut self, source: &str, aperture_id: String,
                            make: fn(RectLike) -> Node) -> ScanResult<usize> {
        let mut rest = source;
        let mut offset = 0;
        let width = scan::consume_float(&mut rest, &mut offset)?;
        scan::consume_char(&mut rest, &mut offset, 'X')?;
        let height = scan::consume_float(&mut rest, &mut offset)?;
        let hole_diameter = modifier(&mut rest, &mut offset)?;
        scan::consume_str(&mut rest, &mut offset, "*%")?;

        self.emit(make(RectLike { aperture_id, width, height, hole_diameter }));
        Ok(offset)
    }

    fn parse_polygon_tail(&mut self, source: &str, aperture_id: String) -> ScanResult<usize> {
        let mut rest = source;
        let mut offset = 0;
        let outer_diameter = scan::consume_float(&mut rest, &mut offset)?;
        scan::consume_char(&mut rest, &mut offset, 'X')?;
        let vertices_count = scan::consume_float(&mut rest, &mut offset)?;
        // a single optional modifier is always the rotation
        let rotation = modifier(&mut rest, &mut offset)?;
        let hole_diameter = modifier(&mut rest, &mut offset)?;
        scan::consume_str(&mut rest, &mut offset, "*%")?;

        self.emit(Node::Adp(Adp { aperture_id, outer_diameter, vertices_count,
                                  rotation, hole_diameter }));
        Ok(offset)
    }

    fn parse_aperture_macro(&mut self, source: &str) -> ScanResult<usize> {
        let mut rest = source;
        let mut offset = 0;
        let open = parse_macro_open(&mut rest, &mut offset)?;

        let mut primitives = Vec::new();
        scan::skip_whitespace(&mut rest, &mut offset);
        while let Some(primitive) = parse_macro_primitive(&mut rest, &mut offset)? {
            primitives.push(primitive);
            scan::skip_whitespace(&mut rest, &mut offset);
        }

        scan::consume_char(&mut rest, &mut offset, '%')?;
        self.emit(Node::Am(Am { open, primitives, close: AmClose }));
        Ok(offset)
    }
}

fn digit(pair: Pair<'_, Rule>) -> ScanResult<u8> {
    pair.as_str().parse::<u8>().or_else(|_| mismatch("digit"))
}

/// Parse an optional `X<float>` aperture modifier.
fn modifier(source: &mut &str, offset: &mut usize) -> ScanResult<Option<f64>> {
    if scan::try_consume_char(source, offset, 'X') {
        scan::consume_float(source, offset).map(Some)
    } else {
        Ok(None)
    }
}

fn parse_macro_open(source: &mut &str, offset: &mut usize) -> ScanResult<AmOpen> {
    scan::consume_str(source, offset, "%AM")?;
    let name = scan::consume_rule(source, offset, Rule::macro_name)?;
    scan::consume_char(source, offset, '*')?;
    Ok(AmOpen { name: name.into() })
}

/// Macro primitive bodies are not recognized: this never consumes input, so a
/// macro must be closed right after its header.
// TODO: parse primitives (circle, vector line, center line, outline, polygon,
// thermal), variable definitions and arithmetic expressions in their fields.
fn parse_macro_primitive(_source: &mut &str, _offset: &mut usize) -> ScanResult<Option<Node>> {
    Ok(None)
}
