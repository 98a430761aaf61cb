// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::str::FromStr;
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

use gerber_ast::ast::*;
use gerber_ast::parse::{self, Parser};

fn parse_ok(src: &str) -> Vec<Node> {
    match parse::parse(src) {
        Ok(file) => file.into_nodes(),
        Err(e) => panic!("{:?} failed to parse: {}", src, e),
    }
}

fn names(nodes: &[Node]) -> Vec<&'static str> {
    nodes.iter().map(Node::name).collect()
}

fn coord(value: &str) -> Coordinate {
    Coordinate { value: value.into() }
}

const BASIC: &str = r#"
        %FSLAX24Y24*%
        %MOIN*%
        %ADD10C,0.5*%
        D10*
        X100000Y100000D02*
        X200000Y200000D01*
        M02*
    "#;

#[test]
fn test_g_codes() {
    for code in &[1, 2, 3, 4, 36, 37, 54, 55, 70, 71, 74, 75, 90, 91] {
        let src = format!("G{0}*G0{0}*G00{0}*G000{0}*", code);
        let nodes = parse_ok(&src);
        assert_eq!(nodes.len(), 4);
        for node in &nodes {
            assert_eq!(node.name(), format!("G{:0>2}", code));
        }
    }

    assert_eq!(parse_ok("g1*g01*"), vec![Node::G01, Node::G01]);
    assert_eq!(parse_ok("G04*"), vec![Node::G04(G04::default())]);
}

#[test]
fn test_comments() {
    let comment = |text: &str| Node::G04(G04 { comment: text.into() });
    assert_eq!(parse_ok("G04 Hello, world!*"), vec![comment(" Hello, world!")]);
    assert_eq!(parse_ok("G4 #@!*G01*"), vec![comment(" #@!"), Node::G01]);
    // not a known code, so the rest after G4 is read as a comment
    assert_eq!(parse_ok("G040*"), vec![comment("0")]);
}

#[test]
fn test_d_codes() {
    for (code, kind) in &[(1, NodeKind::D01), (2, NodeKind::D02), (3, NodeKind::D03)] {
        let src = format!("D{0}*D0{0}*D00{0}*D000{0}*", code);
        let nodes = parse_ok(&src);
        assert_eq!(nodes.len(), 4);
        assert!(nodes.iter().all(|node| node.kind() == *kind));
    }

    assert_eq!(parse_ok("D1*D2*D3*"), vec![Node::D01, Node::D02, Node::D03]);

    let dnn = |id: &str| Node::Dnn(Dnn { aperture_id: id.into() });
    assert_eq!(parse_ok("D4*D32*D99*D999*d10*"),
               vec![dnn("4"), dnn("32"), dnn("99"), dnn("999"), dnn("10")]);
    assert_eq!(names(&parse_ok("D4*")), vec!["Dnn"]);
}

#[test]
fn test_m_codes() {
    assert_eq!(parse_ok("M2*M02*M002*M0002*"), vec![Node::M02; 4]);
    assert_eq!(Node::M02.name(), "M02");
}

#[test]
fn test_coordinates() {
    assert_eq!(parse_ok("X01000000"), vec![Node::CoordinateX(coord("01000000"))]);
    assert_eq!(parse_ok("Y01000002"), vec![Node::CoordinateY(coord("01000002"))]);
    assert_eq!(parse_ok("I01003200"), vec![Node::CoordinateI(coord("01003200"))]);
    assert_eq!(parse_ok("J32000000"), vec![Node::CoordinateJ(coord("32000000"))]);

    let nodes = parse_ok("X01000000Y01000002");
    assert_eq!(nodes, vec![Node::CoordinateX(coord("01000000")),
                           Node::CoordinateY(coord("01000002"))]);
    assert_eq!(names(&nodes), vec!["X", "Y"]);

    assert_eq!(names(&parse_ok("X1Y2I3J4D01*")), vec!["X", "Y", "I", "J", "D01"]);

    // a trailing coordinate needs two characters after its letter
    assert_eq!(parse_ok("X12"), vec![Node::CoordinateX(coord("12"))]);
    let err = parse::parse("D10*X5").unwrap_err();
    assert_eq!((err.index, err.snippet.as_str()), (4, "X5"));
}

#[test]
fn test_format_spec() {
    assert_eq!(parse_ok("%FSLAX26Y26*%"), vec![Node::Fs(Fs {
        zeros: Zeros::SkipLeading,
        coordinate_mode: CoordinateNotation::Absolute,
        x_integral: 2,
        x_decimal: 6,
        y_integral: 2,
        y_decimal: 6,
    })]);
    assert_eq!(parse_ok("%FSTIX34Y15*%"), vec![Node::Fs(Fs {
        zeros: Zeros::SkipTrailing,
        coordinate_mode: CoordinateNotation::Incremental,
        x_integral: 3,
        x_decimal: 4,
        y_integral: 1,
        y_decimal: 5,
    })]);
}

#[test]
fn test_unit_mode() {
    assert_eq!(parse_ok("%MOIN*%"), vec![Node::Mo(Mo { unit_mode: UnitMode::Inches })]);
    assert_eq!(parse_ok("%MOMM*%"), vec![Node::Mo(Mo { unit_mode: UnitMode::Millimeters })]);
}

#[test]
fn test_load_polarity() {
    assert_eq!(parse_ok("%LPD*%%LPC*%"), vec![Node::Lp(Lp { polarity: Polarity::Dark }),
                                             Node::Lp(Lp { polarity: Polarity::Clear })]);
}

#[test]
fn test_apertures() {
    assert_eq!(parse_ok("%ADD10C,0.5*%"), vec![Node::Adc(Adc {
        aperture_id: "10".into(), diameter: 0.5, hole_diameter: None,
    })]);
    assert_eq!(parse_ok("%ADD10C,0.5X0.1*%"), vec![Node::Adc(Adc {
        aperture_id: "10".into(), diameter: 0.5, hole_diameter: Some(0.1),
    })]);

    let rect = |hole| RectLike {
        aperture_id: "10".into(), width: 0.5, height: 0.25, hole_diameter: hole,
    };
    assert_eq!(parse_ok("%ADD10R,0.5X0.25*%"), vec![Node::Adr(rect(None))]);
    assert_eq!(parse_ok("%ADD10R,0.5X0.25X0.1*%"), vec![Node::Adr(rect(Some(0.1)))]);
    assert_eq!(parse_ok("%ADD10O,0.5X0.25*%"), vec![Node::Ado(rect(None))]);
    assert_eq!(parse_ok("%ADD10O,0.5X0.25X0.1*%"), vec![Node::Ado(rect(Some(0.1)))]);
    assert_eq!(names(&parse_ok("%ADD10O,0.5X0.25*%")), vec!["ADO"]);

    let polygon = |rotation, hole| Node::Adp(Adp {
        aperture_id: "10".into(), outer_diameter: 0.5, vertices_count: 5.0,
        rotation, hole_diameter: hole,
    });
    assert_eq!(parse_ok("%ADD10P,0.5X5*%"), vec![polygon(None, None)]);
    assert_eq!(parse_ok("%ADD10P,0.5X5X0X0.1*%"), vec![polygon(Some(0.0), Some(0.1))]);
    // a lone modifier is the rotation, never the hole
    assert_eq!(parse_ok("%ADD10P,0.5X5X0.1*%"), vec![polygon(Some(0.1), None)]);

    assert_eq!(parse_ok("%ADD123C,-.5*%"), vec![Node::Adc(Adc {
        aperture_id: "123".into(), diameter: -0.5, hole_diameter: None,
    })]);
}

#[test]
fn test_aperture_macros() {
    let am = |name: &str| Node::Am(Am {
        open: AmOpen { name: name.into() },
        primitives: vec![],
        close: AmClose,
    });
    assert_eq!(parse_ok("%AMDONUT*%"), vec![am("DONUT")]);
    assert_eq!(parse_ok("%AMThermal_1*\n%\nD10*"),
               vec![am("Thermal_1"), Node::Dnn(Dnn { aperture_id: "10".into() })]);
}

#[test]
fn test_basic_document() {
    let nodes = parse_ok(BASIC);
    assert_eq!(names(&nodes), vec!["FS", "MO", "ADC", "Dnn", "X", "Y", "D02", "X", "Y",
                                   "D01", "M02"]);
    assert_eq!(nodes[4], Node::CoordinateX(coord("100000")));
    assert_eq!(nodes[8], Node::CoordinateY(coord("200000")));
}

#[test]
fn test_display() {
    let file = parse::parse(BASIC).unwrap();
    assert_eq!(file.to_string(), "%FSLAX24Y24*%\n%MOIN*%\n%ADD10C,0.5*%\nD10*\n\
                                  X100000Y100000D02*\nX200000Y200000D01*\nM02*\n");

    let src = "G04 hi*G75*G36*%LPC*%%ADD11P,1.5X6X0.1*%%ADD12O,1X2X0.5*%\
               %AMX*%X0001I12J34D01*G37*%MOMM*%%FSTIX34Y34*%";
    let file = parse::parse(src).unwrap();
    let reparsed = parse::parse(&file.to_string()).unwrap();
    assert_eq!(file, reparsed);
}

#[test]
fn test_categories() {
    let nodes = parse_ok(BASIC);
    let extended: Vec<_> = nodes.iter().filter(|n| n.is_extended()).map(Node::name).collect();
    assert_eq!(extended, vec!["FS", "MO", "ADC"]);
    assert!(nodes[3].is_command());

    assert_eq!(NodeKind::iter().count(), 33);
    for kind in NodeKind::iter() {
        assert_eq!(NodeKind::from_str(&kind.to_string()), Ok(kind));
        assert_ne!(kind.is_extended(), kind.is_command());
    }
    assert!(NodeKind::AmClose.is_extended());
    assert!(!NodeKind::CoordinateJ.is_extended());
}

#[test]
fn test_repeatable() {
    let first = Parser::new().parse(BASIC).unwrap();
    let second = Parser::new().parse(BASIC).unwrap();
    assert_eq!(first, second);

    // a failed parse leaves nothing behind in a reused parser
    let mut parser = Parser::new();
    assert!(parser.parse("G01*G02*lol").is_err());
    assert_eq!(parser.parse("G03*").unwrap().into_nodes(), vec![Node::G03]);
    assert_eq!(parser.parse(BASIC).unwrap(), first);
}

#[test]
fn test_edges() {
    assert!(parse::parse("").unwrap().is_empty());
    assert!(parse::parse(" \r\n\t\n").unwrap().is_empty());
    // the last character alone is never read
    assert_eq!(parse_ok("G01*X"), vec![Node::G01]);
}

#[test]
fn test_error_location() {
    let err = parse::parse("G01*\n  lol\nG02*").unwrap_err();
    assert_eq!((err.index, err.line, err.column), (7, 1, 2));
    assert_eq!(err.snippet, "lol");
    assert_eq!(err.to_string(), "Syntax error at index 7 (line: 1 column: 2): 'lol'");

    // errors point at the start of the failing command
    let err = parse::parse("%MOIN*%\n%ADD10C,0.5X*%").unwrap_err();
    assert_eq!((err.index, err.line, err.column), (8, 1, 0));
    assert_eq!(err.snippet, "%ADD10C,0.5X*%");

    let err = parse::parse("%ADD10C,0.5X0.25X0.1X0.2*%").unwrap_err();
    assert_eq!(err.snippet, "%ADD10C,0.5X0.25X0.1");

    let err = parse::parse("lol").unwrap_err();
    assert_eq!(err.index, 0);
    assert_eq!(err.expected, "command");
}

#[test]
fn test_invalid() {
    for snippet in &[
        "lol",                     // unknown command letter
        "G0*",                     // no significant digits
        "G12*",                    // unknown G code
        "G01",                     // missing terminator
        "D*",                      // missing value
        "M03*",                    // unknown M code
        "X*",                      // missing coordinate digits
        "X-100D01*",               // signed coordinates
        "X5",                      // one digit left after the letter
        "D10*X5",                  // same, after another command
        "%XX*%",                   // unknown extended command
        "%FS*%",                   // too short
        "%FSQAX26Y26*%",           // unknown zero suppression
        "%FSLBX26Y26*%",           // unknown notation
        "%FSLAX2Y26*%",            // missing digit
        "%MOCM*%",                 // unknown unit
        "%MOIN%",                  // missing asterisk
        "%LPX*%",                  // unknown polarity
        "%LPD*",                   // too short
        "%LMN*%",                  // unsupported load command
        "%ADD10C,*%",              // missing diameter
        "%ADD10C,0.5",             // missing terminator
        "%ADD10R,0.5*%",           // missing height
        "%ADD10Q,0.5*%",           // unknown standard template
        "%ADD10RECT,0.5X1*%",      // macro apertures are unsupported
        "%ADD10C,0.5X0.1X0.2*%",   // too many modifiers
        "%ADDC,0.5*%",             // missing aperture number
        "%AM*%",                   // missing macro name
        "%AMDONUT*1,1,0.5,0,0*%",  // macro primitives are unsupported
        "%AMDONUT*",               // missing close
    ] {
        assert!(parse::parse(snippet).is_err(), "{:?} should not parse", snippet);
    }
}
