//! The minimal interface consumed by element application.
//!
//! [`PathSink`] is the only trait
//! [`Element::apply_to`](crate::element::Element::apply_to) depends on: any
//! type providing the five drawing operations and a bounds query can consume
//! elements, without this crate depending on a specific path-builder
//! implementation.
//!
//! This layer is a pass-through. No sub-path state machine is enforced here
//! ("must move before line"); validity of the resulting path is the sink's
//! responsibility.

use crate::math::{Box2D, Point};

/// A consumer of path drawing operations.
pub trait PathSink {
    /// Starts a new sub-path at a given position.
    fn move_to(&mut self, to: Point);

    /// Adds a line segment to the current sub-path.
    fn line_to(&mut self, to: Point);

    /// Adds a quadratic bézier curve to the current sub-path.
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point);

    /// Adds a cubic bézier curve to the current sub-path.
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Closes the current sub-path.
    fn close(&mut self);

    /// The bounding box of everything received so far.
    fn bounds(&self) -> Box2D;
}

impl<'l, S: PathSink> PathSink for &'l mut S {
    fn move_to(&mut self, to: Point) {
        (**self).move_to(to)
    }

    fn line_to(&mut self, to: Point) {
        (**self).line_to(to)
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        (**self).quadratic_bezier_to(ctrl, to)
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        (**self).cubic_bezier_to(ctrl1, ctrl2, to)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn bounds(&self) -> Box2D {
        (**self).bounds()
    }
}

#[cfg(test)]
use crate::element::{Element, PathElement};
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
#[derive(Default, PartialEq, Debug)]
struct Recorder {
    calls: Vec<String>,
}

#[cfg(test)]
impl PathSink for Recorder {
    fn move_to(&mut self, to: Point) {
        self.calls.push(format!("move_to({:?})", to));
    }
    fn line_to(&mut self, to: Point) {
        self.calls.push(format!("line_to({:?})", to));
    }
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.calls.push(format!("quad_to({:?}, {:?})", ctrl, to));
    }
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.calls
            .push(format!("cubic_to({:?}, {:?}, {:?})", ctrl1, ctrl2, to));
    }
    fn close(&mut self) {
        self.calls.push("close()".to_string());
    }
    fn bounds(&self) -> Box2D {
        Box2D::zero()
    }
}

#[test]
fn apply_dispatch_is_total() {
    let elements = [
        PathElement::move_to(point(0.0, 0.0)),
        PathElement::line_to(point(10.0, 0.0)),
        PathElement::quadratic(point(10.0, 10.0), point(0.0, 10.0)),
        PathElement::cubic(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0)),
        PathElement::close(),
    ];

    let mut recorder = Recorder::default();
    for element in &elements {
        element.apply_to(&mut recorder);
    }

    assert_eq!(recorder.calls.len(), elements.len());
    assert!(recorder.calls[0].starts_with("move_to"));
    assert!(recorder.calls[1].starts_with("line_to"));
    assert!(recorder.calls[2].starts_with("quad_to"));
    assert!(recorder.calls[3].starts_with("cubic_to"));
    assert_eq!(recorder.calls[4], "close()");
}

#[test]
fn apply_is_idempotent() {
    let element = PathElement::quadratic(point(1.0, 2.0), point(3.0, 4.0));

    let mut a = Recorder::default();
    let mut b = Recorder::default();
    element.apply_to(&mut a);
    element.apply_to(&mut b);

    assert_eq!(a, b);
}
