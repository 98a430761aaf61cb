// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Per-kind callbacks over parsed nodes.
//!
//! Implement the `on_*` methods you are interested in; all of them default to
//! doing nothing.  Nodes carrying data pass it to their callback, plain codes
//! call theirs without arguments.

use crate::ast::*;

pub trait Visitor {
    fn visit_file(&mut self, file: &File) {
        for node in file {
            self.visit_node(node);
        }
    }

    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::G01 => self.on_g01(),
            Node::G02 => self.on_g02(),
            Node::G03 => self.on_g03(),
            Node::G04(g04) => self.on_g04(g04),
            Node::G36 => self.on_g36(),
            Node::G37 => self.on_g37(),
            Node::G54 => self.on_g54(),
            Node::G55 => self.on_g55(),
            Node::G70 => self.on_g70(),
            Node::G71 => self.on_g71(),
            Node::G74 => self.on_g74(),
            Node::G75 => self.on_g75(),
            Node::G90 => self.on_g90(),
            Node::G91 => self.on_g91(),
            Node::D01 => self.on_d01(),
            Node::D02 => self.on_d02(),
            Node::D03 => self.on_d03(),
            Node::Dnn(dnn) => self.on_dnn(dnn),
            Node::CoordinateX(c) => self.on_x(c),
            Node::CoordinateY(c) => self.on_y(c),
            Node::CoordinateI(c) => self.on_i(c),
            Node::CoordinateJ(c) => self.on_j(c),
            Node::M02 => self.on_m02(),
            Node::Adc(adc) => self.on_adc(adc),
            Node::Adr(rect) => self.on_adr(rect),
            Node::Ado(rect) => self.on_ado(rect),
            Node::Adp(adp) => self.on_adp(adp),
            Node::Am(am) => self.on_am(am),
            Node::AmOpen(open) => self.on_am_open(open),
            Node::AmClose(close) => self.on_am_close(close),
            Node::Fs(fs) => self.on_fs(fs),
            Node::Mo(mo) => self.on_mo(mo),
            Node::Lp(lp) => self.on_lp(lp),
        }
    }

    fn on_g01(&mut self) {}
    fn on_g02(&mut self) {}
    fn on_g03(&mut self) {}
    fn on_g04(&mut self, _node: &G04) {}
    fn on_g36(&mut self) {}
    fn on_g37(&mut self) {}
    fn on_g54(&mut self) {}
    fn on_g55(&mut self) {}
    fn on_g70(&mut self) {}
    fn on_g71(&mut self) {}
    fn on_g74(&mut self) {}
    fn on_g75(&mut self) {}
    fn on_g90(&mut self) {}
    fn on_g91(&mut self) {}

    fn on_d01(&mut self) {}
    fn on_d02(&mut self) {}
    fn on_d03(&mut self) {}
    fn on_dnn(&mut self, _node: &Dnn) {}

    fn on_x(&mut self, _node: &Coordinate) {}
    fn on_y(&mut self, _node: &Coordinate) {}
    fn on_i(&mut self, _node: &Coordinate) {}
    fn on_j(&mut self, _node: &Coordinate) {}

    fn on_m02(&mut self) {}

    fn on_adc(&mut self, _node: &Adc) {}
    fn on_adr(&mut self, _node: &RectLike) {}
    fn on_ado(&mut self, _node: &RectLike) {}
    fn on_adp(&mut self, _node: &Adp) {}

    /// By default, visits the macro's framing and primitives in order.
    fn on_am(&mut self, node: &Am) {
        walk_am(self, node);
    }
    fn on_am_open(&mut self, _node: &AmOpen) {}
    fn on_am_close(&mut self, _node: &AmClose) {}

    fn on_fs(&mut self, _node: &Fs) {}
    fn on_mo(&mut self, _node: &Mo) {}
    fn on_lp(&mut self, _node: &Lp) {}
}

/// Visit the parts of an aperture macro: open, each primitive, close.
pub fn walk_am<V: Visitor + ?Sized>(visitor: &mut V, am: &Am) {
    visitor.on_am_open(&am.open);
    for primitive in &am.primitives {
        visitor.visit_node(primitive);
    }
    visitor.on_am_close(&am.close);
}
