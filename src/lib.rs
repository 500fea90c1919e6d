#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures to represent, copy and iterate over 2D path segments.
//!
//! A path is consumed one *element* at a time: a drawing instruction (move,
//! line, quadratic curve, cubic curve, close) together with its coordinate
//! payload. This crate provides two representations of an element behind a
//! single [`Element`] contract:
//!
//! - [`PathElement`] owns its coordinate storage. It is immutable, cheap to
//!   move, safe to keep around indefinitely and to share across threads.
//! - [`FlyweightElement`] is a reusable buffer overwritten on every advance
//!   of a decoding cursor. It never allocates, but its contents are only
//!   valid until the next advance; code that must retain an element calls
//!   [`Element::to_element`] to obtain an owned copy first.
//!
//! Decoding is driven by a [`SegmentSource`](iterator::SegmentSource) (an
//! external cursor reporting raw segments one at a time) wrapped in an
//! [`ElementStream`](iterator::ElementStream). Elements are consumed by
//! feeding them to a [`PathSink`](sink::PathSink), the minimal capability
//! interface implemented by [`Path`] and by any other path builder.
//!
//! # Examples
//!
//! ```
//! use path_elements::{Element, Path, PathSink};
//! use path_elements::math::point;
//!
//! // Build a path through the sink interface.
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0));
//! path.line_to(point(10.0, 0.0));
//! path.quadratic_bezier_to(point(10.0, 10.0), point(0.0, 10.0));
//! path.close();
//!
//! // Stream it back out as elements, without allocating per segment.
//! let mut stream = path.stream();
//! while let Some(element) = stream.next() {
//!     let element = element.unwrap();
//!     println!("{:?} -> {:?}", element.kind(), element.destination());
//! }
//! ```

pub mod element;
pub mod flyweight;
pub mod iterator;
pub mod kind;
pub mod path;
pub mod sink;

#[doc(inline)]
pub use crate::element::{Element, PathElement};
#[doc(inline)]
pub use crate::flyweight::FlyweightElement;
#[doc(inline)]
pub use crate::iterator::{ElementSequence, ElementStream, SegmentSource};
#[doc(inline)]
pub use crate::kind::{Axis, PointRole, SegmentKind};
#[doc(inline)]
pub use crate::path::Path;
#[doc(inline)]
pub use crate::sink::PathSink;

use thiserror::Error;

/// Number of coordinate slots in the largest segment kind (cubic).
pub const MAX_COORDINATES: usize = 6;

/// The errors surfaced by element operations.
///
/// None of these are recovered locally: they are programmer-contract
/// violations or irrecoverable input corruption, reported to the caller
/// before any partially-built element escapes.
#[non_exhaustive]
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ElementError {
    /// A close element carries no coordinates to read or replace.
    #[error("close elements have no coordinates")]
    CloseHasNoCoordinates,
    /// Point index past the end of the kind's point list.
    #[error("point index {index} out of range for {kind:?} (point count {count})")]
    PointOutOfRange {
        kind: SegmentKind,
        index: usize,
        count: usize,
    },
    /// A point role applied to an element of a different kind.
    #[error("point role {role:?} does not belong to segment kind {kind:?}")]
    RoleMismatch { role: PointRole, kind: SegmentKind },
    /// Raw segment-type code outside the closed set of five kinds.
    #[error("unknown raw segment type code {0}")]
    UnknownSegmentCode(u32),
    /// Caller-supplied coordinate array smaller than the kind requires.
    #[error("coordinate buffer of length {got} is too small for {kind:?} (need {need})")]
    UndersizedBuffer {
        kind: SegmentKind,
        need: usize,
        got: usize,
    },
}

pub mod math {
    //! f64 aliases of the euclid types used everywhere in this crate.

    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for `euclid::default::Box2D<f64>`.
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for `euclid::default::Transform2D<f64>`.
    pub type Transform = euclid::default::Transform2D<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}
