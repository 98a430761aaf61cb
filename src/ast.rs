// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! The abstract syntax tree of a Gerber file.
//!
//! A [`File`] is a flat sequence of [`Node`]s in source order.  Numeric
//! coordinate text is kept as written; interpreting it according to the
//! `FS` and `MO` commands is left to the consumer.
//!
//! The `Display` impls write canonical Gerber text, so a displayed `File`
//! parses back into an equal `File`.

use std::fmt::{self, Formatter};
use std::slice;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct File {
    nodes: Vec<Node>,
}

impl File {
    pub fn new(nodes: Vec<Node>) -> Self {
        File { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<Node> {
        self.nodes.iter()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a File {
    type Item = &'a Node;
    type IntoIter = slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// One parsed command.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    // G codes
    G01,
    G02,
    G03,
    G04(G04),
    G36,
    G37,
    G54,
    G55,
    G70,
    G71,
    G74,
    G75,
    G90,
    G91,

    // D codes
    D01,
    D02,
    D03,
    Dnn(Dnn),

    // coordinate operands
    CoordinateX(Coordinate),
    CoordinateY(Coordinate),
    CoordinateI(Coordinate),
    CoordinateJ(Coordinate),

    M02,

    // apertures
    Adc(Adc),
    Adr(RectLike),
    Ado(RectLike),
    Adp(Adp),
    Am(Am),
    AmOpen(AmOpen),
    AmClose(AmClose),

    // properties
    Fs(Fs),
    Mo(Mo),

    // load commands
    Lp(Lp),
}

/// The kind of a node, named the way it is conventionally written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, IntoStaticStr, EnumString, EnumIter)]
pub enum NodeKind {
    G01, G02, G03, G04, G36, G37, G54,
    G55, G70, G71, G74, G75, G90, G91,
    D01, D02, D03, Dnn,
    #[strum(to_string = "X")] CoordinateX,
    #[strum(to_string = "Y")] CoordinateY,
    #[strum(to_string = "I")] CoordinateI,
    #[strum(to_string = "J")] CoordinateJ,
    M02,
    #[strum(to_string = "ADC")] Adc,
    #[strum(to_string = "ADR")] Adr,
    #[strum(to_string = "ADO")] Ado,
    #[strum(to_string = "ADP")] Adp,
    #[strum(to_string = "AM")] Am,
    #[strum(to_string = "AMopen")] AmOpen,
    #[strum(to_string = "AMclose")] AmClose,
    #[strum(to_string = "FS")] Fs,
    #[strum(to_string = "MO")] Mo,
    #[strum(to_string = "LP")] Lp,
}

impl NodeKind {
    /// Whether commands of this kind are written as `%...%` extended commands.
    pub fn is_extended(self) -> bool {
        match self {
            NodeKind::Adc | NodeKind::Adr | NodeKind::Ado | NodeKind::Adp |
            NodeKind::Am | NodeKind::AmOpen | NodeKind::AmClose |
            NodeKind::Fs | NodeKind::Mo | NodeKind::Lp => true,
            _ => false
        }
    }

    /// Whether commands of this kind are plain function codes or operands.
    pub fn is_command(self) -> bool {
        !self.is_extended()
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::G01 => NodeKind::G01,
            Node::G02 => NodeKind::G02,
            Node::G03 => NodeKind::G03,
            Node::G04(_) => NodeKind::G04,
            Node::G36 => NodeKind::G36,
            Node::G37 => NodeKind::G37,
            Node::G54 => NodeKind::G54,
            Node::G55 => NodeKind::G55,
            Node::G70 => NodeKind::G70,
            Node::G71 => NodeKind::G71,
            Node::G74 => NodeKind::G74,
            Node::G75 => NodeKind::G75,
            Node::G90 => NodeKind::G90,
            Node::G91 => NodeKind::G91,
            Node::D01 => NodeKind::D01,
            Node::D02 => NodeKind::D02,
            Node::D03 => NodeKind::D03,
            Node::Dnn(_) => NodeKind::Dnn,
            Node::CoordinateX(_) => NodeKind::CoordinateX,
            Node::CoordinateY(_) => NodeKind::CoordinateY,
            Node::CoordinateI(_) => NodeKind::CoordinateI,
            Node::CoordinateJ(_) => NodeKind::CoordinateJ,
            Node::M02 => NodeKind::M02,
            Node::Adc(_) => NodeKind::Adc,
            Node::Adr(_) => NodeKind::Adr,
            Node::Ado(_) => NodeKind::Ado,
            Node::Adp(_) => NodeKind::Adp,
            Node::Am(_) => NodeKind::Am,
            Node::AmOpen(_) => NodeKind::AmOpen,
            Node::AmClose(_) => NodeKind::AmClose,
            Node::Fs(_) => NodeKind::Fs,
            Node::Mo(_) => NodeKind::Mo,
            Node::Lp(_) => NodeKind::Lp,
        }
    }

    /// The conventional name of the node, e.g. `"G04"` or `"ADC"`.
    pub fn name(&self) -> &'static str {
        self.kind().into()
    }

    pub fn is_extended(&self) -> bool {
        self.kind().is_extended()
    }

    pub fn is_command(&self) -> bool {
        self.kind().is_command()
    }
}

/// A comment; the text is everything between the code and the `*`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct G04 {
    pub comment: String,
}

/// Selection of a defined aperture.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dnn {
    pub aperture_id: String,
}

/// A coordinate or offset operand, as the raw unsigned digit string.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Coordinate {
    pub value: String,
}

/// Circle aperture.
#[derive(Clone, PartialEq, Debug)]
pub struct Adc {
    pub aperture_id: String,
    pub diameter: f64,
    pub hole_diameter: Option<f64>,
}

/// Rectangle or obround aperture; both templates take the same parameters.
#[derive(Clone, PartialEq, Debug)]
pub struct RectLike {
    pub aperture_id: String,
    pub width: f64,
    pub height: f64,
    pub hole_diameter: Option<f64>,
}

/// Regular polygon aperture.
#[derive(Clone, PartialEq, Debug)]
pub struct Adp {
    pub aperture_id: String,
    pub outer_diameter: f64,
    pub vertices_count: f64,
    pub rotation: Option<f64>,
    pub hole_diameter: Option<f64>,
}

/// Aperture macro definition.
#[derive(Clone, PartialEq, Debug)]
pub struct Am {
    pub open: AmOpen,
    pub primitives: Vec<Node>,
    pub close: AmClose,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AmOpen {
    pub name: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AmClose;

/// Coordinate format specification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Fs {
    pub zeros: Zeros,
    pub coordinate_mode: CoordinateNotation,
    pub x_integral: u8,
    pub x_decimal: u8,
    pub y_integral: u8,
    pub y_decimal: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mo {
    pub unit_mode: UnitMode,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lp {
    pub polarity: Polarity,
}

/// Which zeros are omitted from coordinate data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString)]
pub enum Zeros {
    #[strum(to_string = "L")] SkipLeading,
    #[strum(to_string = "T")] SkipTrailing,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString)]
pub enum CoordinateNotation {
    #[strum(to_string = "A")] Absolute,
    #[strum(to_string = "I")] Incremental,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString)]
pub enum UnitMode {
    #[strum(to_string = "IN")] Inches,
    #[strum(to_string = "MM")] Millimeters,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString)]
pub enum Polarity {
    #[strum(to_string = "D")] Dark,
    #[strum(to_string = "C")] Clear,
}

fn write_modifier(f: &mut Formatter, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "X{}", v),
        None => Ok(()),
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node)?;
            // operands share the line of the code that uses them
            if !matches!(node, Node::CoordinateX(_) | Node::CoordinateY(_) |
                               Node::CoordinateI(_) | Node::CoordinateJ(_)) {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::G04(g04) => write!(f, "G04{}*", g04.comment),
            Node::Dnn(dnn) => write!(f, "D{}*", dnn.aperture_id),
            Node::CoordinateX(c) => write!(f, "X{}", c.value),
            Node::CoordinateY(c) => write!(f, "Y{}", c.value),
            Node::CoordinateI(c) => write!(f, "I{}", c.value),
            Node::CoordinateJ(c) => write!(f, "J{}", c.value),
            Node::Adc(adc) => {
                write!(f, "%ADD{}C,{}", adc.aperture_id, adc.diameter)?;
                write_modifier(f, adc.hole_diameter)?;
                write!(f, "*%")
            }
            Node::Adr(rect) => write_rect_like(f, 'R', rect),
            Node::Ado(rect) => write_rect_like(f, 'O', rect),
            Node::Adp(adp) => {
                write!(f, "%ADD{}P,{}X{}", adp.aperture_id, adp.outer_diameter, adp.vertices_count)?;
                // a hole can only be written after a rotation
                let rotation = match (adp.rotation, adp.hole_diameter) {
                    (None, Some(_)) => Some(0.),
                    (rotation, _) => rotation,
                };
                write_modifier(f, rotation)?;
                write_modifier(f, adp.hole_diameter)?;
                write!(f, "*%")
            }
            Node::Am(am) => {
                write!(f, "{}", am.open)?;
                for primitive in &am.primitives {
                    write!(f, "{}", primitive)?;
                }
                write!(f, "{}", am.close)
            }
            Node::AmOpen(open) => write!(f, "{}", open),
            Node::AmClose(close) => write!(f, "{}", close),
            Node::Fs(fs) => write!(f, "{}", fs),
            Node::Mo(mo) => write!(f, "%MO{}*%", mo.unit_mode),
            Node::Lp(lp) => write!(f, "%LP{}*%", lp.polarity),
            // remaining nodes are plain codes
            _ => write!(f, "{}*", self.name()),
        }
    }
}

fn write_rect_like(f: &mut Formatter, template: char, rect: &RectLike) -> fmt::Result {
    write!(f, "%ADD{}{},{}X{}", rect.aperture_id, template, rect.width, rect.height)?;
    write_modifier(f, rect.hole_diameter)?;
    write!(f, "*%")
}

impl fmt::Display for AmOpen {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "%AM{}*", self.name)
    }
}

impl fmt::Display for AmClose {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "%")
    }
}

impl fmt::Display for Fs {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "%FS{}{}X{}{}Y{}{}*%", self.zeros, self.coordinate_mode,
               self.x_integral, self.x_decimal, self.y_integral, self.y_decimal)
    }
}
