//! A simple verb/point path storage.
//!
//! [`Path`] is the in-repo producer and consumer of segment streams: it
//! implements [`PathSink`] on the way in, and hands out a
//! [`PathCursor`] (a [`SegmentSource`]) or owned elements on the way out.
//!
//! # Representation
//!
//! Paths contain two buffers: a buffer of segment kinds and a buffer of
//! points. The order of storage for points is determined by the sequence of
//! kinds.
//!
//! ```ascii
//!  ___________________________
//! |      |      |         |
//! | Move | Line |Quadratic| ...
//! |______|______|_________|__
//!  ___________________________________
//! |        |        |        |       |
//! | to x,y | to x,y |ctrl x,y| to x,y| ...
//! |________|________|________|_______|
//! ```

use crate::element::{Element, PathElement};
use crate::iterator::{ElementStream, SegmentSource};
use crate::kind::SegmentKind;
use crate::math::{Box2D, Point};
use crate::sink::PathSink;
use crate::MAX_COORDINATES;

use std::fmt;

/// A growable sequence of path segments.
#[derive(Clone, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Path {
    kinds: Vec<SegmentKind>,
    points: Vec<Point>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// Whether the path contains no segments.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Number of segments in the path.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// A raw segment cursor over this path.
    pub fn cursor(&self) -> PathCursor {
        PathCursor {
            kinds: &self.kinds,
            points: &self.points,
            kind_index: 0,
            point_index: 0,
        }
    }

    /// A zero-copy element stream over this path.
    pub fn stream(&self) -> ElementStream<PathCursor> {
        ElementStream::new(self.cursor())
    }

    /// Iterates over the path as owned elements.
    pub fn iter(&self) -> Iter {
        Iter {
            kinds: self.kinds.iter(),
            points: &self.points,
        }
    }
}

impl PathSink for Path {
    fn move_to(&mut self, to: Point) {
        self.kinds.push(SegmentKind::Move);
        self.points.push(to);
    }

    fn line_to(&mut self, to: Point) {
        self.kinds.push(SegmentKind::Line);
        self.points.push(to);
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.kinds.push(SegmentKind::Quadratic);
        self.points.push(ctrl);
        self.points.push(to);
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.kinds.push(SegmentKind::Cubic);
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
    }

    fn close(&mut self) {
        self.kinds.push(SegmentKind::Close);
    }

    /// The bounding box of all endpoints and control points.
    ///
    /// Control points are included, so the box is conservative for curves,
    /// in the manner of a fast bounding box. Zero for an empty path.
    fn bounds(&self) -> Box2D {
        let mut points = self.points.iter();
        let first = match points.next() {
            Some(p) => *p,
            None => return Box2D::zero(),
        };

        let mut min = first;
        let mut max = first;
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }

        Box2D { min, max }
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathElement;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fn write_point(formatter: &mut fmt::Formatter, point: Point) -> fmt::Result {
            write!(formatter, " ")?;
            fmt::Debug::fmt(&point.x, formatter)?;
            write!(formatter, " ")?;
            fmt::Debug::fmt(&point.y, formatter)
        }

        write!(formatter, "\"")?;
        for element in self {
            match element.kind() {
                SegmentKind::Move => write!(formatter, " M")?,
                SegmentKind::Line => write!(formatter, " L")?,
                SegmentKind::Quadratic => write!(formatter, " Q")?,
                SegmentKind::Cubic => write!(formatter, " C")?,
                SegmentKind::Close => write!(formatter, " Z")?,
            }
            for p in element.iter_points() {
                write_point(formatter, p)?;
            }
        }
        write!(formatter, "\"")
    }
}

/// A segment cursor over a borrowed path.
pub struct PathCursor<'l> {
    kinds: &'l [SegmentKind],
    points: &'l [Point],
    kind_index: usize,
    point_index: usize,
}

impl<'l> SegmentSource for PathCursor<'l> {
    fn is_done(&self) -> bool {
        self.kind_index >= self.kinds.len()
    }

    fn current_segment(&self, coords: &mut [f64; MAX_COORDINATES]) -> u32 {
        let kind = self.kinds[self.kind_index];
        let points = &self.points[self.point_index..self.point_index + kind.point_count()];
        for (i, p) in points.iter().enumerate() {
            coords[i * 2] = p.x;
            coords[i * 2 + 1] = p.y;
        }

        kind.to_raw()
    }

    fn advance(&mut self) {
        self.point_index += self.kinds[self.kind_index].point_count();
        self.kind_index += 1;
    }
}

/// Iterator over a path's segments as owned elements.
pub struct Iter<'l> {
    kinds: std::slice::Iter<'l, SegmentKind>,
    points: &'l [Point],
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let kind = *self.kinds.next()?;
        let (points, rest) = self.points.split_at(kind.point_count());
        self.points = rest;

        Some(match kind {
            SegmentKind::Move => PathElement::move_to(points[0]),
            SegmentKind::Line => PathElement::line_to(points[0]),
            SegmentKind::Quadratic => PathElement::quadratic(points[0], points[1]),
            SegmentKind::Cubic => PathElement::cubic(points[0], points[1], points[2]),
            SegmentKind::Close => PathElement::close(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.kinds.size_hint()
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn square_ish() -> Path {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.quadratic_bezier_to(point(10.0, 10.0), point(0.0, 10.0));
    path.close();

    path
}

#[test]
fn sink_round_trip() {
    let path = square_ish();

    let mut replayed = Path::new();
    for element in &path {
        element.apply_to(&mut replayed);
    }

    let a: Vec<PathElement> = path.iter().collect();
    let b: Vec<PathElement> = replayed.iter().collect();
    assert_eq!(a, b);
}

#[test]
fn cursor_matches_iter() {
    let path = square_ish();

    let mut stream = path.stream();
    for element in &path {
        let fly = stream.next().unwrap().unwrap();
        assert_eq!(*fly, element);
    }
    assert!(stream.next().is_none());
}

#[test]
fn bounds_cover_all_points() {
    let path = square_ish();
    assert_eq!(
        path.bounds(),
        Box2D {
            min: point(0.0, 0.0),
            max: point(10.0, 10.0),
        }
    );

    assert_eq!(Path::new().bounds(), Box2D::zero());
}

#[test]
fn len_and_empty() {
    assert!(Path::new().is_empty());

    let path = square_ish();
    assert!(!path.is_empty());
    assert_eq!(path.len(), 4);
}

#[test]
fn debug_svg_letters() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0));
    path.line_to(point(2.0, 1.0));
    path.close();

    assert_eq!(format!("{:?}", path), "\" M 1.0 1.0 L 2.0 1.0 Z\"");
}
