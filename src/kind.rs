//! The closed taxonomy of segment kinds and the roles of their points.
//!
//! [`SegmentKind`] is pure metadata: every kind has a fixed number of points,
//! a fixed coordinate-array size (two scalars per point) and, except for
//! close, a fixed offset of its destination point within that array.
//! [`PointRole`] names one coordinate pair within a segment ("first control
//! point of a cubic", "destination of a line") and maps back to its owning
//! kind and point index.

use crate::ElementError;

/// One of the five path drawing instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum SegmentKind {
    Move,
    Line,
    Quadratic,
    Cubic,
    Close,
}

/// The semantic identity of one coordinate pair within a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum PointRole {
    MoveTo,
    LineTo,
    QuadraticCtrl,
    QuadraticTo,
    CubicCtrl1,
    CubicCtrl2,
    CubicTo,
}

/// Which scalar of a coordinate pair an operation targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl SegmentKind {
    /// Number of coordinate pairs carried by this kind of segment.
    #[inline]
    pub fn point_count(self) -> usize {
        match self {
            SegmentKind::Move | SegmentKind::Line => 1,
            SegmentKind::Quadratic => 2,
            SegmentKind::Cubic => 3,
            SegmentKind::Close => 0,
        }
    }

    /// Number of scalar coordinates carried by this kind of segment.
    ///
    /// Always `2 * point_count()`.
    #[inline]
    pub fn array_size(self) -> usize {
        self.point_count() * 2
    }

    /// Offset of the destination point's x coordinate within the
    /// coordinate array, or `None` for close segments.
    ///
    /// Always `array_size() - 2` for kinds that have a destination.
    #[inline]
    pub fn destination_offset(self) -> Option<usize> {
        match self {
            SegmentKind::Close => None,
            _ => Some(self.array_size() - 2),
        }
    }

    /// The ordered roles of this kind's points.
    pub fn point_roles(self) -> &'static [PointRole] {
        match self {
            SegmentKind::Move => &[PointRole::MoveTo],
            SegmentKind::Line => &[PointRole::LineTo],
            SegmentKind::Quadratic => &[PointRole::QuadraticCtrl, PointRole::QuadraticTo],
            SegmentKind::Cubic => &[
                PointRole::CubicCtrl1,
                PointRole::CubicCtrl2,
                PointRole::CubicTo,
            ],
            SegmentKind::Close => &[],
        }
    }

    /// Whether this kind carries control points.
    #[inline]
    pub fn is_curve(self) -> bool {
        match self {
            SegmentKind::Quadratic | SegmentKind::Cubic => true,
            _ => false,
        }
    }

    /// Whether this kind starts a sub-path.
    #[inline]
    pub fn is_subpath_start(self) -> bool {
        self == SegmentKind::Move
    }

    /// Whether this kind ends a sub-path.
    #[inline]
    pub fn is_subpath_end(self) -> bool {
        self == SegmentKind::Close
    }

    /// Maps a raw segment-type code from an external decoder to a kind.
    ///
    /// The code table is fixed (`0=Move, 1=Line, 2=Quadratic, 3=Cubic,
    /// 4=Close`, in encounter-priority order). The set is closed: any other
    /// code is a decode error, not an extension point.
    pub fn from_raw(code: u32) -> Result<SegmentKind, ElementError> {
        match code {
            0 => Ok(SegmentKind::Move),
            1 => Ok(SegmentKind::Line),
            2 => Ok(SegmentKind::Quadratic),
            3 => Ok(SegmentKind::Cubic),
            4 => Ok(SegmentKind::Close),
            _ => Err(ElementError::UnknownSegmentCode(code)),
        }
    }

    /// The raw segment-type code for this kind.
    #[inline]
    pub fn to_raw(self) -> u32 {
        match self {
            SegmentKind::Move => 0,
            SegmentKind::Line => 1,
            SegmentKind::Quadratic => 2,
            SegmentKind::Cubic => 3,
            SegmentKind::Close => 4,
        }
    }
}

impl PointRole {
    /// The kind of segment this role belongs to.
    #[inline]
    pub fn kind(self) -> SegmentKind {
        match self {
            PointRole::MoveTo => SegmentKind::Move,
            PointRole::LineTo => SegmentKind::Line,
            PointRole::QuadraticCtrl | PointRole::QuadraticTo => SegmentKind::Quadratic,
            PointRole::CubicCtrl1 | PointRole::CubicCtrl2 | PointRole::CubicTo => {
                SegmentKind::Cubic
            }
        }
    }

    /// The index of this role in its kind's point list.
    #[inline]
    pub fn point_index(self) -> usize {
        match self {
            PointRole::MoveTo | PointRole::LineTo => 0,
            PointRole::QuadraticCtrl => 0,
            PointRole::QuadraticTo => 1,
            PointRole::CubicCtrl1 => 0,
            PointRole::CubicCtrl2 => 1,
            PointRole::CubicTo => 2,
        }
    }

    /// Whether this role is the last point of its kind.
    #[inline]
    pub fn is_destination(self) -> bool {
        self.point_index() == self.kind().point_count() - 1
    }
}

impl Axis {
    /// Offset of this axis' scalar within a coordinate pair.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }
}

#[cfg(test)]
const ALL_KINDS: [SegmentKind; 5] = [
    SegmentKind::Move,
    SegmentKind::Line,
    SegmentKind::Quadratic,
    SegmentKind::Cubic,
    SegmentKind::Close,
];

#[test]
fn metadata_table() {
    for kind in ALL_KINDS {
        assert_eq!(kind.array_size(), kind.point_count() * 2);
        match kind.destination_offset() {
            Some(offset) => assert_eq!(offset, kind.array_size() - 2),
            None => assert_eq!(kind, SegmentKind::Close),
        }
        assert_eq!(kind.point_roles().len(), kind.point_count());
    }

    assert_eq!(SegmentKind::Cubic.array_size(), crate::MAX_COORDINATES);
}

#[test]
fn raw_codes_round_trip() {
    for kind in ALL_KINDS {
        assert_eq!(SegmentKind::from_raw(kind.to_raw()), Ok(kind));
    }

    assert_eq!(
        SegmentKind::from_raw(5),
        Err(ElementError::UnknownSegmentCode(5))
    );
    assert_eq!(
        SegmentKind::from_raw(u32::MAX),
        Err(ElementError::UnknownSegmentCode(u32::MAX))
    );
}

#[test]
fn roles_inverse_mapping() {
    for kind in ALL_KINDS {
        for (index, role) in kind.point_roles().iter().enumerate() {
            assert_eq!(role.kind(), kind);
            assert_eq!(role.point_index(), index);
            assert_eq!(role.is_destination(), index == kind.point_count() - 1);
        }
    }
}

#[test]
fn curve_and_subpath_predicates() {
    assert!(SegmentKind::Quadratic.is_curve());
    assert!(SegmentKind::Cubic.is_curve());
    assert!(!SegmentKind::Move.is_curve());
    assert!(!SegmentKind::Line.is_curve());
    assert!(!SegmentKind::Close.is_curve());

    assert!(SegmentKind::Move.is_subpath_start());
    assert!(SegmentKind::Close.is_subpath_end());
    assert!(!SegmentKind::Line.is_subpath_start());
    assert!(!SegmentKind::Line.is_subpath_end());
}
