//! The element contract and the owned element.
//!
//! [`Element`] is the single interface both representations implement. The
//! required surface is tiny (a kind and a backing coordinate slice); all of
//! the point accessors, functional updates and sink dispatch are provided on
//! top of it, so owned and flyweight elements cannot drift apart.
//!
//! [`PathElement`] is the owned implementation: it holds its own coordinate
//! array and is immutable. Every "replace" operation copies the backing
//! array and returns a new owned element, even when the receiver is a
//! flyweight whose buffer is shared with a decoding cursor.

use crate::kind::{Axis, PointRole, SegmentKind};
use crate::math::{point, Point, Transform};
use crate::sink::PathSink;
use crate::{ElementError, MAX_COORDINATES};

use arrayvec::ArrayVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The operations every segment representation supports.
///
/// The backing coordinate slice returned by [`points`](Element::points) may
/// be longer than the kind's array size (flyweight buffers are sized for the
/// largest kind); the logical size is always governed by the kind, never by
/// the physical length. Equality and hashing between implementations use the
/// trimmed slice, so an owned element and a flyweight snapshot with the same
/// kind and coordinates compare equal.
pub trait Element {
    /// The kind of segment this element represents.
    fn kind(&self) -> SegmentKind;

    /// The backing coordinate array.
    ///
    /// May be larger than `kind().array_size()`; callers must not assume a
    /// trimmed length.
    fn points(&self) -> &[f64];

    /// The raw segment-type code of this element's kind.
    #[inline]
    fn raw_kind(&self) -> u32 {
        self.kind().to_raw()
    }

    /// Number of coordinate pairs in this element.
    #[inline]
    fn point_count(&self) -> usize {
        self.kind().point_count()
    }

    /// A fresh copy of the coordinates, sized exactly to the kind's array
    /// size. Empty for close elements.
    fn trimmed_points(&self) -> ArrayVec<f64, MAX_COORDINATES> {
        self.points()[..self.kind().array_size()]
            .iter()
            .copied()
            .collect()
    }

    /// The coordinate pair at `index` in this element's point list.
    fn point(&self, index: usize) -> Result<Point, ElementError> {
        let kind = self.kind();
        let count = kind.point_count();
        if index >= count {
            return Err(ElementError::PointOutOfRange { kind, index, count });
        }
        let coords = self.points();
        Ok(point(coords[index * 2], coords[index * 2 + 1]))
    }

    /// The destination point, or `None` for close elements.
    fn destination(&self) -> Option<Point> {
        let offset = self.kind().destination_offset()?;
        let coords = self.points();
        Some(point(coords[offset], coords[offset + 1]))
    }

    /// Returns a new owned element with one scalar coordinate replaced.
    ///
    /// The receiver is never mutated; the backing array is always copied.
    /// Fails on close elements (no coordinates exist to replace) and when
    /// the role belongs to a different segment kind.
    fn with_coordinate(
        &self,
        role: PointRole,
        value: f64,
        axis: Axis,
    ) -> Result<PathElement, ElementError> {
        let kind = self.kind();
        if kind == SegmentKind::Close {
            return Err(ElementError::CloseHasNoCoordinates);
        }
        if role.kind() != kind {
            return Err(ElementError::RoleMismatch { role, kind });
        }

        let mut coords = self.trimmed_points();
        coords[role.point_index() * 2 + axis.offset()] = value;

        Ok(PathElement {
            kind,
            coords: coords.as_slice().into(),
        })
    }

    /// Returns a new owned element with the destination pair replaced.
    ///
    /// Same copy and failure rules as [`with_coordinate`](Element::with_coordinate).
    fn with_destination(&self, x: f64, y: f64) -> Result<PathElement, ElementError> {
        let kind = self.kind();
        let offset = kind
            .destination_offset()
            .ok_or(ElementError::CloseHasNoCoordinates)?;

        let mut coords = self.trimmed_points();
        coords[offset] = x;
        coords[offset + 1] = y;

        Ok(PathElement {
            kind,
            coords: coords.as_slice().into(),
        })
    }

    /// Returns an owned element with an independent coordinate array.
    ///
    /// This is the only safe way to retain a flyweight element past the next
    /// advance of its cursor.
    fn to_element(&self) -> PathElement {
        PathElement {
            kind: self.kind(),
            coords: self.trimmed_points().as_slice().into(),
        }
    }

    /// Applies this element to a sink.
    ///
    /// Total dispatch: every kind maps to exactly one sink call.
    fn apply_to<S: PathSink>(&self, sink: &mut S) {
        let c = self.points();
        match self.kind() {
            SegmentKind::Move => sink.move_to(point(c[0], c[1])),
            SegmentKind::Line => sink.line_to(point(c[0], c[1])),
            SegmentKind::Quadratic => {
                sink.quadratic_bezier_to(point(c[0], c[1]), point(c[2], c[3]))
            }
            SegmentKind::Cubic => {
                sink.cubic_bezier_to(point(c[0], c[1]), point(c[2], c[3]), point(c[4], c[5]))
            }
            SegmentKind::Close => sink.close(),
        }
    }

    /// Iterates over this element's own points.
    ///
    /// Each call returns a fresh iterator starting at point 0.
    fn iter_points(&self) -> Points {
        Points {
            coords: &self.points()[..self.kind().array_size()],
        }
    }
}

/// An immutable path element owning its coordinate storage.
///
/// Safe to store indefinitely and to share across threads. All
/// mutating-looking operations return new instances.
#[derive(Clone)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PathElement {
    kind: SegmentKind,
    coords: Box<[f64]>,
}

impl PathElement {
    /// Creates an element of the given kind from a caller-supplied
    /// coordinate array.
    ///
    /// The array may be longer than the kind requires (extra slots are
    /// ignored); a shorter array is rejected up front rather than allowing a
    /// later out-of-range read. Close elements are stored with a zero-length
    /// array whatever the input.
    pub fn new(kind: SegmentKind, coords: &[f64]) -> Result<PathElement, ElementError> {
        let need = kind.array_size();
        if coords.len() < need {
            return Err(ElementError::UndersizedBuffer {
                kind,
                need,
                got: coords.len(),
            });
        }

        Ok(PathElement {
            kind,
            coords: coords[..need].into(),
        })
    }

    /// A move element.
    pub fn move_to(to: Point) -> PathElement {
        PathElement {
            kind: SegmentKind::Move,
            coords: Box::new([to.x, to.y]),
        }
    }

    /// A line element.
    pub fn line_to(to: Point) -> PathElement {
        PathElement {
            kind: SegmentKind::Line,
            coords: Box::new([to.x, to.y]),
        }
    }

    /// A quadratic bézier element.
    pub fn quadratic(ctrl: Point, to: Point) -> PathElement {
        PathElement {
            kind: SegmentKind::Quadratic,
            coords: Box::new([ctrl.x, ctrl.y, to.x, to.y]),
        }
    }

    /// A cubic bézier element.
    pub fn cubic(ctrl1: Point, ctrl2: Point, to: Point) -> PathElement {
        PathElement {
            kind: SegmentKind::Cubic,
            coords: Box::new([ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y]),
        }
    }

    /// A close element.
    pub fn close() -> PathElement {
        PathElement {
            kind: SegmentKind::Close,
            coords: Box::new([]),
        }
    }

    /// Returns this element with all of its points transformed.
    pub fn transformed(&self, transform: &Transform) -> PathElement {
        let mut coords = self.trimmed_points();
        for pair in coords.chunks_exact_mut(2) {
            let p = transform.transform_point(point(pair[0], pair[1]));
            pair[0] = p.x;
            pair[1] = p.y;
        }

        PathElement {
            kind: self.kind,
            coords: coords.as_slice().into(),
        }
    }
}

impl Element for PathElement {
    #[inline]
    fn kind(&self) -> SegmentKind {
        self.kind
    }

    #[inline]
    fn points(&self) -> &[f64] {
        &self.coords
    }
}

pub(crate) fn elements_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Element + ?Sized,
    B: Element + ?Sized,
{
    a.kind() == b.kind()
        && a.points()[..a.kind().array_size()] == b.points()[..b.kind().array_size()]
}

pub(crate) fn hash_element<E, H>(element: &E, state: &mut H)
where
    E: Element + ?Sized,
    H: Hasher,
{
    element.kind().to_raw().hash(state);
    for coord in &element.points()[..element.kind().array_size()] {
        // Equality compares scalars, where 0.0 == -0.0; fold the two zeros
        // together so equal elements hash identically.
        let coord = if *coord == 0.0 { 0.0 } else { *coord };
        coord.to_bits().hash(state);
    }
}

pub(crate) fn fmt_element<E>(element: &E, f: &mut fmt::Formatter) -> fmt::Result
where
    E: Element + ?Sized,
{
    write!(f, "{:?}", element.kind())?;
    let mut first = true;
    for p in element.iter_points() {
        if !first {
            write!(f, ",")?;
        }
        first = false;
        write!(f, " ({:.3} {:.3})", p.x, p.y)?;
    }

    Ok(())
}

impl PartialEq for PathElement {
    fn eq(&self, other: &Self) -> bool {
        elements_eq(self, other)
    }
}

impl Hash for PathElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_element(self, state);
    }
}

impl fmt::Debug for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_element(self, f)
    }
}

impl<'l> IntoIterator for &'l PathElement {
    type Item = Point;
    type IntoIter = Points<'l>;

    fn into_iter(self) -> Points<'l> {
        self.iter_points()
    }
}

/// Iterator over the points of a single element.
#[derive(Clone)]
pub struct Points<'l> {
    coords: &'l [f64],
}

impl<'l> Iterator for Points<'l> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.coords.len() < 2 {
            return None;
        }
        let p = point(self.coords[0], self.coords[1]);
        self.coords = &self.coords[2..];

        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.coords.len() / 2;
        (n, Some(n))
    }
}

#[test]
fn point_accessors() {
    let e = PathElement::cubic(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0));

    assert_eq!(e.kind(), SegmentKind::Cubic);
    assert_eq!(e.raw_kind(), 3);
    assert_eq!(e.point_count(), 3);
    assert_eq!(e.point(0), Ok(point(1.0, 1.0)));
    assert_eq!(e.point(1), Ok(point(2.0, 2.0)));
    assert_eq!(e.point(2), Ok(point(3.0, 3.0)));
    assert_eq!(
        e.point(3),
        Err(ElementError::PointOutOfRange {
            kind: SegmentKind::Cubic,
            index: 3,
            count: 3,
        })
    );
    assert_eq!(e.destination(), Some(point(3.0, 3.0)));

    let points: Vec<Point> = e.iter_points().collect();
    assert_eq!(points, [point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0)]);
    // Restartable from point 0 on every call.
    assert_eq!(e.iter_points().next(), Some(point(1.0, 1.0)));
}

#[test]
fn close_has_no_coordinates() {
    let e = PathElement::close();

    assert_eq!(e.point_count(), 0);
    assert!(e.points().is_empty());
    assert!(e.trimmed_points().is_empty());
    assert_eq!(e.destination(), None);
    assert_eq!(
        e.point(0),
        Err(ElementError::PointOutOfRange {
            kind: SegmentKind::Close,
            index: 0,
            count: 0,
        })
    );
    assert_eq!(
        e.with_destination(1.0, 2.0),
        Err(ElementError::CloseHasNoCoordinates)
    );
    assert_eq!(
        e.with_coordinate(PointRole::LineTo, 1.0, Axis::Horizontal),
        Err(ElementError::CloseHasNoCoordinates)
    );
}

#[test]
fn undersized_buffer_rejected() {
    assert_eq!(
        PathElement::new(SegmentKind::Cubic, &[1.0, 2.0, 3.0]),
        Err(ElementError::UndersizedBuffer {
            kind: SegmentKind::Cubic,
            need: 6,
            got: 3,
        })
    );

    // Oversized buffers are fine, the logical size comes from the kind.
    let e = PathElement::new(SegmentKind::Line, &[3.0, 4.0, 99.0, 99.0]).unwrap();
    assert_eq!(e.trimmed_points().as_slice(), &[3.0, 4.0]);

    // Close ignores whatever coordinates were supplied.
    let z = PathElement::new(SegmentKind::Close, &[1.0, 2.0]).unwrap();
    assert!(z.points().is_empty());
}

#[test]
fn with_destination_leaves_receiver_unchanged() {
    let e = PathElement::line_to(point(3.0, 4.0));
    let replaced = e.with_destination(7.0, 4.0).unwrap();

    assert_eq!(replaced, PathElement::line_to(point(7.0, 4.0)));
    assert_eq!(e, PathElement::line_to(point(3.0, 4.0)));
}

#[test]
fn with_coordinate_targets_one_scalar() {
    let e = PathElement::cubic(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0));
    let replaced = e
        .with_coordinate(PointRole::CubicCtrl2, 9.0, Axis::Vertical)
        .unwrap();

    assert_eq!(
        replaced.trimmed_points().as_slice(),
        &[1.0, 1.0, 2.0, 9.0, 3.0, 3.0]
    );
    assert_eq!(
        e.trimmed_points().as_slice(),
        &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]
    );

    let replaced = e
        .with_coordinate(PointRole::CubicCtrl1, -1.0, Axis::Horizontal)
        .unwrap();
    assert_eq!(
        replaced.trimmed_points().as_slice(),
        &[-1.0, 1.0, 2.0, 2.0, 3.0, 3.0]
    );
}

#[test]
fn with_coordinate_rejects_foreign_role() {
    let e = PathElement::quadratic(point(1.0, 1.0), point(2.0, 2.0));

    assert_eq!(
        e.with_coordinate(PointRole::CubicTo, 5.0, Axis::Horizontal),
        Err(ElementError::RoleMismatch {
            role: PointRole::CubicTo,
            kind: SegmentKind::Quadratic,
        })
    );
}

#[test]
fn copy_round_trip() {
    let e = PathElement::quadratic(point(10.0, 10.0), point(0.0, 10.0));
    let copy = e.to_element();

    assert_eq!(copy, e);
    assert!(!std::ptr::eq(copy.points().as_ptr(), e.points().as_ptr()));
}

#[test]
fn transformed_element() {
    let e = PathElement::line_to(point(1.0, 2.0));
    let t = Transform::translation(10.0, 20.0);

    assert_eq!(e.transformed(&t), PathElement::line_to(point(11.0, 22.0)));
}

#[test]
fn debug_format() {
    let e = PathElement::quadratic(point(1.0, 2.0), point(3.0, 4.5));
    assert_eq!(
        format!("{:?}", e),
        "Quadratic (1.000 2.000), (3.000 4.500)"
    );
    assert_eq!(format!("{:?}", PathElement::close()), "Close");
}
