use alloc::vec::Vec;

use crate::Edge;

/// Layout query over the mounted window.
///
/// `span_of(edge, count)` returns the distance from the outer edge of the first to the outer
/// edge of the last of the `count` items adjacent to `edge`, as laid out right now. It therefore
/// includes the gaps between those items but not the gap that follows the block.
///
/// Implementations must never panic: with nothing mounted, or layout not ready, return `0.0`.
/// `count` larger than the number of mounted items measures all of them.
pub trait SpanMeasurer {
    fn span_of(&self, edge: Edge, count: usize) -> f64;

    /// Space between two adjacent items.
    fn gap(&self) -> f64 {
        0.0
    }
}

impl<T: SpanMeasurer + ?Sized> SpanMeasurer for &T {
    fn span_of(&self, edge: Edge, count: usize) -> f64 {
        (**self).span_of(edge, count)
    }

    fn gap(&self) -> f64 {
        (**self).gap()
    }
}

// NaN and negative spans collapse to zero.
fn sanitize(span: f64) -> f64 {
    if span > 0.0 { span } else { 0.0 }
}

/// Pure geometry for strips whose items all share one size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedSpan {
    pub item_size: f64,
    pub gap: f64,
    pub len: usize,
}

impl FixedSpan {
    pub fn new(item_size: f64, gap: f64, len: usize) -> Self {
        Self {
            item_size,
            gap,
            len,
        }
    }

    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Total length of the laid out strip.
    pub fn total(&self) -> f64 {
        self.span_of(Edge::Leading, self.len)
    }
}

impl SpanMeasurer for FixedSpan {
    fn span_of(&self, _edge: Edge, count: usize) -> f64 {
        let n = count.min(self.len);
        if n == 0 {
            return 0.0;
        }
        let item = sanitize(self.item_size);
        let gap = sanitize(self.gap);
        sanitize(n as f64 * item + (n - 1) as f64 * gap)
    }

    fn gap(&self) -> f64 {
        sanitize(self.gap)
    }
}

/// Extent of one rendered item along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub start: f64,
    pub end: f64,
}

impl Extent {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn size(&self) -> f64 {
        sanitize(self.end - self.start)
    }
}

/// A snapshot of the live layout: one [`Extent`] per mounted item, in window order.
///
/// Adapters fill this from whatever their toolkit reports (bounding rects, cell rects, ...).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRects {
    extents: Vec<Extent>,
}

impl ItemRects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_extents(extents: impl IntoIterator<Item = Extent>) -> Self {
        Self {
            extents: extents.into_iter().collect(),
        }
    }

    /// Lays out `sizes` back to back starting at `origin`, separated by `gap`.
    pub fn from_sizes(origin: f64, sizes: &[f64], gap: f64) -> Self {
        let mut extents = Vec::with_capacity(sizes.len());
        let mut at = origin;
        for &size in sizes {
            let end = at + sanitize(size);
            extents.push(Extent::new(at, end));
            at = end + sanitize(gap);
        }
        Self { extents }
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    pub fn clear(&mut self) {
        self.extents.clear();
    }

    pub fn push(&mut self, extent: Extent) {
        self.extents.push(extent);
    }
}

impl SpanMeasurer for ItemRects {
    fn span_of(&self, edge: Edge, count: usize) -> f64 {
        let n = self.extents.len();
        if n == 0 || count == 0 {
            return 0.0;
        }
        let count = count.min(n);
        let (first, last) = match edge {
            Edge::Leading => (0, count - 1),
            Edge::Trailing => (n - count, n - 1),
        };
        sanitize(self.extents[last].end - self.extents[first].start)
    }

    fn gap(&self) -> f64 {
        match self.extents.as_slice() {
            [a, b, ..] => sanitize(b.start - a.end),
            _ => 0.0,
        }
    }
}

/// Rounds `x` to the nearest device pixel for a given device-pixel ratio.
#[cfg(feature = "std")]
pub fn snap_to_device_pixels(x: f64, device_pixel_ratio: f64) -> f64 {
    let dpr = if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    (x * dpr).round() / dpr
}
