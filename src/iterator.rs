//! Tools to pull elements out of a segment source.
//!
//! A [`SegmentSource`] is an external decoder: a stateful cursor that
//! reports raw segments one at a time and advances on request. An
//! [`ElementStream`] wraps one and exposes it as a lazy, single-pass
//! sequence of flyweight elements. Each step overwrites and returns the
//! *same* flyweight instance, so no allocation happens per segment; the
//! caller is responsible for calling [`Element::to_element`] before
//! retaining one past the next step.
//!
//! [`ElementSequence`] is the re-iterable variant: it defers source
//! construction to a factory closure invoked once per fresh pass, so
//! independent passes over the same shape share no cursor state.
//!
//! # Examples
//!
//! ```
//! use path_elements::{Element, Path, PathElement, PathSink};
//! use path_elements::math::point;
//!
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0));
//! path.line_to(point(10.0, 0.0));
//! path.close();
//!
//! let mut stream = path.stream();
//! let mut retained = Vec::new();
//! while let Some(element) = stream.next() {
//!     // The flyweight is only valid until the next step; copy to retain.
//!     retained.push(element.unwrap().to_element());
//! }
//! assert_eq!(retained[1], PathElement::line_to(point(10.0, 0.0)));
//! ```

use crate::element::{Element, PathElement};
use crate::flyweight::FlyweightElement;
use crate::sink::PathSink;
use crate::{ElementError, MAX_COORDINATES};

/// An external decoder reporting raw segments one at a time.
///
/// The contract mirrors the usual path-iteration convention: while
/// [`is_done`](SegmentSource::is_done) is false, the current segment can be
/// read any number of times with
/// [`current_segment`](SegmentSource::current_segment), and
/// [`advance`](SegmentSource::advance) moves to the next one.
pub trait SegmentSource {
    /// Whether the source has run out of segments.
    fn is_done(&self) -> bool;

    /// Writes the current segment's coordinates into `coords` and returns
    /// its raw segment-type code.
    ///
    /// Only the slots required by the segment's kind are written.
    fn current_segment(&self, coords: &mut [f64; MAX_COORDINATES]) -> u32;

    /// Moves to the next segment.
    fn advance(&mut self);
}

impl<'l, S: SegmentSource> SegmentSource for &'l mut S {
    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn current_segment(&self, coords: &mut [f64; MAX_COORDINATES]) -> u32 {
        (**self).current_segment(coords)
    }

    fn advance(&mut self) {
        (**self).advance()
    }
}

/// A lazy, single-pass sequence of flyweight elements over a segment source.
///
/// Zero-copy aliasing: every successful [`next`](ElementStream::next) call
/// returns a borrow of the same internal [`FlyweightElement`], freshly
/// overwritten. There is no rewinding; use [`ElementSequence`] when multiple
/// passes are needed.
pub struct ElementStream<S> {
    source: S,
    fly: FlyweightElement,
}

impl<S: SegmentSource> ElementStream<S> {
    /// Wraps a segment source.
    pub fn new(source: S) -> ElementStream<S> {
        ElementStream {
            source,
            fly: FlyweightElement::new(),
        }
    }

    /// Decodes the next segment into the internal flyweight and returns a
    /// borrow of it.
    ///
    /// Returns `None` when the source is done, and a decode error on an
    /// unrecognized raw segment-type code.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<&FlyweightElement, ElementError>> {
        match self.fly.update(&mut self.source) {
            Ok(true) => Some(Ok(&self.fly)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }

    /// Applies every remaining element to `sink`, in order.
    pub fn feed<Sink: PathSink>(&mut self, sink: &mut Sink) -> Result<(), ElementError> {
        while let Some(element) = self.next() {
            element?.apply_to(sink);
        }

        Ok(())
    }

    /// Materializes every remaining element into an owned copy.
    ///
    /// This is the hand-off point for callers that want to fan segments out
    /// to other threads: owned elements are immutable and freely shareable.
    pub fn collect_elements(&mut self) -> Result<Vec<PathElement>, ElementError> {
        let mut elements = Vec::new();
        while let Some(element) = self.next() {
            elements.push(element?.to_element());
        }

        Ok(elements)
    }

    /// Converts this stream into a `std::iter::Iterator` of owned elements,
    /// copying each step.
    pub fn owned(self) -> OwnedElements<S> {
        OwnedElements { stream: self }
    }
}

/// An iterator adapter yielding an owned copy of each element.
pub struct OwnedElements<S> {
    stream: ElementStream<S>,
}

impl<S: SegmentSource> Iterator for OwnedElements<S> {
    type Item = Result<PathElement, ElementError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream
            .next()
            .map(|element| element.map(|e| e.to_element()))
    }
}

/// A re-iterable sequence of elements.
///
/// Holds a factory instead of a source: each call to
/// [`stream`](ElementSequence::stream) or [`owned`](ElementSequence::owned)
/// invokes the factory for a fresh source, so every pass starts from the
/// beginning and shares no state with the others.
pub struct ElementSequence<F> {
    make_source: F,
}

impl<F, S> ElementSequence<F>
where
    F: Fn() -> S,
    S: SegmentSource,
{
    /// Creates a sequence from a source factory.
    pub fn new(make_source: F) -> ElementSequence<F> {
        ElementSequence { make_source }
    }

    /// Starts a fresh zero-copy pass.
    pub fn stream(&self) -> ElementStream<S> {
        ElementStream::new((self.make_source)())
    }

    /// Starts a fresh pass of owned elements.
    pub fn owned(&self) -> OwnedElements<S> {
        self.stream().owned()
    }
}

/// A canned source backed by slices of raw codes and coordinates, mostly
/// useful in tests and as a reference implementation of [`SegmentSource`].
pub struct SliceSource<'l> {
    segments: &'l [(u32, [f64; MAX_COORDINATES])],
    index: usize,
}

impl<'l> SliceSource<'l> {
    pub fn new(segments: &'l [(u32, [f64; MAX_COORDINATES])]) -> SliceSource<'l> {
        SliceSource { segments, index: 0 }
    }
}

impl<'l> SegmentSource for SliceSource<'l> {
    fn is_done(&self) -> bool {
        self.index >= self.segments.len()
    }

    fn current_segment(&self, coords: &mut [f64; MAX_COORDINATES]) -> u32 {
        let (code, segment_coords) = self.segments[self.index];
        *coords = segment_coords;

        code
    }

    fn advance(&mut self) {
        self.index += 1;
    }
}

#[cfg(test)]
use crate::kind::SegmentKind;
#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::Path;

#[cfg(test)]
const SQUARE_ISH: [(u32, [f64; MAX_COORDINATES]); 4] = [
    (0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    (1, [10.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    (2, [10.0, 10.0, 0.0, 10.0, 0.0, 0.0]),
    (4, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
];

#[test]
fn stream_yields_segments_in_order() {
    let mut stream = ElementStream::new(SliceSource::new(&SQUARE_ISH));

    let e = stream.next().unwrap().unwrap();
    assert_eq!(e.kind(), SegmentKind::Move);
    assert_eq!(e.destination(), Some(point(0.0, 0.0)));

    let e = stream.next().unwrap().unwrap();
    assert_eq!(e.kind(), SegmentKind::Line);
    assert_eq!(e.destination(), Some(point(10.0, 0.0)));

    let e = stream.next().unwrap().unwrap();
    assert_eq!(e.kind(), SegmentKind::Quadratic);
    assert_eq!(e.point(0), Ok(point(10.0, 10.0)));
    assert_eq!(e.destination(), Some(point(0.0, 10.0)));

    let e = stream.next().unwrap().unwrap();
    assert_eq!(e.kind(), SegmentKind::Close);

    assert!(stream.next().is_none());
    // Terminal condition is stable.
    assert!(stream.next().is_none());
}

#[test]
fn copy_survives_the_next_update() {
    let segments = [
        (1, [1.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        (1, [2.0, 2.0, 0.0, 0.0, 0.0, 0.0]),
    ];
    let mut source = SliceSource::new(&segments);

    let mut fly = FlyweightElement::new();
    assert_eq!(fly.update(&mut source), Ok(true));
    let copy = fly.to_element();

    assert_eq!(fly.update(&mut source), Ok(true));
    // The flyweight's shared buffer moved on, the copy did not.
    assert_eq!(fly.destination(), Some(point(2.0, 2.0)));
    assert_eq!(copy.destination(), Some(point(1.0, 1.0)));

    assert_eq!(fly.update(&mut source), Ok(false));
    // A failed update leaves the flyweight untouched.
    assert_eq!(fly.destination(), Some(point(2.0, 2.0)));
}

#[test]
fn unknown_code_is_a_decode_error() {
    let segments = [(7, [0.0; MAX_COORDINATES])];
    let mut stream = ElementStream::new(SliceSource::new(&segments));

    assert_eq!(
        stream.next(),
        Some(Err(ElementError::UnknownSegmentCode(7)))
    );
}

#[test]
fn failed_update_leaves_the_flyweight_untouched() {
    let segments = [
        (1, [1.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        (9, [5.0, 5.0, 0.0, 0.0, 0.0, 0.0]),
    ];
    let mut source = SliceSource::new(&segments);

    let mut fly = FlyweightElement::new();
    assert_eq!(fly.update(&mut source), Ok(true));
    assert_eq!(
        fly.update(&mut source),
        Err(ElementError::UnknownSegmentCode(9))
    );

    // No torn state: the previous segment is still fully there.
    assert_eq!(fly.kind(), SegmentKind::Line);
    assert_eq!(fly.destination(), Some(point(1.0, 1.0)));
}

#[test]
fn feed_replays_into_a_sink() {
    let mut path = Path::new();
    ElementStream::new(SliceSource::new(&SQUARE_ISH))
        .feed(&mut path)
        .unwrap();

    let elements: Vec<PathElement> = path.iter().collect();
    assert_eq!(elements.len(), 4);
    assert_eq!(elements[0], PathElement::move_to(point(0.0, 0.0)));
    assert_eq!(elements[1], PathElement::line_to(point(10.0, 0.0)));
    assert_eq!(
        elements[2],
        PathElement::quadratic(point(10.0, 10.0), point(0.0, 10.0))
    );
    assert_eq!(elements[3], PathElement::close());
}

#[test]
fn collect_elements_materializes_the_stream() {
    let elements = ElementStream::new(SliceSource::new(&SQUARE_ISH))
        .collect_elements()
        .unwrap();

    assert_eq!(elements.len(), 4);
    assert_eq!(elements[1], PathElement::line_to(point(10.0, 0.0)));
}

#[test]
fn sequence_passes_are_independent() {
    let sequence = ElementSequence::new(|| SliceSource::new(&SQUARE_ISH));

    let mut first = sequence.stream();
    let mut second = sequence.stream();

    // Interleaved passes do not steal segments from each other.
    assert_eq!(first.next().unwrap().unwrap().kind(), SegmentKind::Move);
    assert_eq!(second.next().unwrap().unwrap().kind(), SegmentKind::Move);
    assert_eq!(first.next().unwrap().unwrap().kind(), SegmentKind::Line);
    assert_eq!(
        second.next().unwrap().unwrap().kind(),
        SegmentKind::Line
    );

    let owned: Vec<PathElement> = sequence.owned().map(|e| e.unwrap()).collect();
    assert_eq!(owned.len(), 4);
}
