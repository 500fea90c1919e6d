//! The reusable flyweight element.
//!
//! A [`FlyweightElement`] is a view whose buffer is overwritten on every
//! advance of a decoding cursor. It is created once per decoding session and
//! never allocates; the price is that its contents are only valid until the
//! next [`update`](FlyweightElement::update). Code that must retain an
//! element calls [`Element::to_element`] first.
//!
//! Equality and hashing use the same trimmed-coordinate contract as owned
//! elements, so a flyweight snapshot and an owned element built from the
//! same kind and coordinates compare equal. Equality is structural, not
//! identity based.

use crate::element::{elements_eq, fmt_element, hash_element, Element, PathElement};
use crate::iterator::SegmentSource;
use crate::kind::SegmentKind;
use crate::{ElementError, MAX_COORDINATES};

use std::fmt;
use std::hash::{Hash, Hasher};

/// A mutable element buffer sized for the largest segment kind.
///
/// Not safe for concurrent use: the buffer is mutated in place. Until the
/// first successful `update` the element's kind is undefined and point or
/// destination queries panic.
#[derive(Clone, Default)]
pub struct FlyweightElement {
    kind: Option<SegmentKind>,
    coords: [f64; MAX_COORDINATES],
}

impl FlyweightElement {
    /// Creates an uninitialized flyweight.
    pub fn new() -> FlyweightElement {
        FlyweightElement::default()
    }

    /// Creates a flyweight holding the given segment.
    ///
    /// The coordinate array may be longer than the kind requires; a shorter
    /// one is rejected at construction time.
    pub fn with_segment(
        kind: SegmentKind,
        coords: &[f64],
    ) -> Result<FlyweightElement, ElementError> {
        let need = kind.array_size();
        if coords.len() < need {
            return Err(ElementError::UndersizedBuffer {
                kind,
                need,
                got: coords.len(),
            });
        }

        let mut buffer = [0.0; MAX_COORDINATES];
        buffer[..need].copy_from_slice(&coords[..need]);

        Ok(FlyweightElement {
            kind: Some(kind),
            coords: buffer,
        })
    }

    /// Whether this flyweight holds a segment yet.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.kind.is_some()
    }

    /// Pulls the next segment from `source` into this buffer.
    ///
    /// Returns `Ok(false)` and leaves the current contents unchanged when
    /// the source has no more segments. An unrecognized raw segment-type
    /// code is a fatal decode error, also leaving the contents unchanged:
    /// the segment is decoded into a scratch buffer and only committed once
    /// its code has been validated.
    pub fn update<S: SegmentSource>(&mut self, source: &mut S) -> Result<bool, ElementError> {
        if source.is_done() {
            return Ok(false);
        }

        let mut coords = [0.0; MAX_COORDINATES];
        let raw = source.current_segment(&mut coords);
        let kind = SegmentKind::from_raw(raw)?;

        self.kind = Some(kind);
        self.coords = coords;
        source.advance();

        Ok(true)
    }
}

impl Element for FlyweightElement {
    fn kind(&self) -> SegmentKind {
        match self.kind {
            Some(kind) => kind,
            None => panic!("flyweight element queried before update()"),
        }
    }

    #[inline]
    fn points(&self) -> &[f64] {
        &self.coords
    }
}

impl PartialEq for FlyweightElement {
    fn eq(&self, other: &Self) -> bool {
        match (self.kind, other.kind) {
            (Some(_), Some(_)) => elements_eq(self, other),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq<PathElement> for FlyweightElement {
    fn eq(&self, other: &PathElement) -> bool {
        self.kind.is_some() && elements_eq(self, other)
    }
}

impl PartialEq<FlyweightElement> for PathElement {
    fn eq(&self, other: &FlyweightElement) -> bool {
        other == self
    }
}

impl Hash for FlyweightElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.kind.is_some() {
            hash_element(self, state);
        }
    }
}

impl fmt::Debug for FlyweightElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Some(_) => fmt_element(self, f),
            None => write!(f, "<uninitialized>"),
        }
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn with_segment_checks_size() {
    assert_eq!(
        FlyweightElement::with_segment(SegmentKind::Quadratic, &[1.0, 2.0]),
        Err(ElementError::UndersizedBuffer {
            kind: SegmentKind::Quadratic,
            need: 4,
            got: 2,
        })
    );

    let fly = FlyweightElement::with_segment(SegmentKind::Line, &[3.0, 4.0]).unwrap();
    assert_eq!(fly.destination(), Some(point(3.0, 4.0)));
    // The physical buffer is always 6 slots, the logical size comes from
    // the kind.
    assert_eq!(fly.points().len(), MAX_COORDINATES);
    assert_eq!(fly.trimmed_points().as_slice(), &[3.0, 4.0]);
}

#[test]
fn structural_equality_with_owned() {
    let fly =
        FlyweightElement::with_segment(SegmentKind::Cubic, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0])
            .unwrap();
    let owned = PathElement::cubic(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0));

    assert_eq!(fly, owned);
    assert_eq!(owned, fly);
    assert_eq!(fly.to_element(), owned);

    let other = PathElement::cubic(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 4.0));
    assert!(fly != other);
}

#[test]
fn hash_consistent_with_owned() {
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let fly = FlyweightElement::with_segment(SegmentKind::Quadratic, &[1.0, 2.0, 3.0, 4.0])
        .unwrap();
    let owned = PathElement::quadratic(point(1.0, 2.0), point(3.0, 4.0));

    assert_eq!(hash_of(&fly), hash_of(&owned.to_element()));
    assert_eq!(hash_of(&owned), hash_of(&fly));

    // 0.0 and -0.0 compare equal, so they must hash identically too.
    let zero = PathElement::line_to(point(0.0, 1.0));
    let negative_zero = PathElement::line_to(point(-0.0, 1.0));
    assert_eq!(zero, negative_zero);
    assert_eq!(hash_of(&zero), hash_of(&negative_zero));

    let fly = FlyweightElement::with_segment(SegmentKind::Line, &[-0.0, 1.0]).unwrap();
    assert_eq!(fly, zero);
    assert_eq!(hash_of(&fly), hash_of(&zero));
}

#[test]
#[should_panic(expected = "before update()")]
fn uninitialized_query_panics() {
    let fly = FlyweightElement::new();
    let _ = fly.destination();
}
