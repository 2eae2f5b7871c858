use filmstrip::{Edge, FixedSpan, ScrollMetrics, SpanMeasurer};

/// The host's scroll container, as seen by [`crate::Controller`].
///
/// Measurement comes from the [`SpanMeasurer`] supertrait and must reflect the layout that is
/// about to be painted. For a DOM container, `scroll_offset` is `scrollLeft`,
/// `max_scroll_offset` is `scrollWidth - clientWidth`, and smooth scrolling maps to
/// `scroll-behavior`.
pub trait ScrollSurface: SpanMeasurer {
    fn scroll_offset(&self) -> f64;

    fn max_scroll_offset(&self) -> f64;

    fn set_scroll_offset(&mut self, offset: f64);

    /// Enables or suspends animated scrolling, so programmatic corrections land instantly.
    fn set_smooth_scrolling(&mut self, enabled: bool);

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.scroll_offset(),
            max_offset: self.max_scroll_offset(),
        }
    }
}

/// An in-memory scroll container with uniformly sized items.
///
/// Useful for tests, simulations and hosts whose items have a fixed, known size.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedSurface {
    spans: FixedSpan,
    viewport: f64,
    offset: f64,
    smooth: bool,
    corrections: usize,
}

impl SimulatedSurface {
    pub fn new(item_size: f64, gap: f64, viewport: f64) -> Self {
        Self {
            spans: FixedSpan::new(item_size, gap, 0),
            viewport,
            offset: 0.0,
            smooth: true,
            corrections: 0,
        }
    }

    /// Lays out `len` items, as a render of the current window would.
    pub fn set_len(&mut self, len: usize) {
        self.spans = self.spans.with_len(len);
        self.offset = self.offset.min(self.max_scroll_offset());
    }

    pub fn len(&self) -> usize {
        self.spans.len
    }

    pub fn is_empty(&self) -> bool {
        self.spans.len == 0
    }

    pub fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Simulates a user scroll to `offset` (clamped).
    pub fn scroll_to(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Start of the item at `index` along the scroll axis.
    pub fn item_start(&self, index: usize) -> f64 {
        index as f64 * (self.spans.item_size + self.spans.gap)
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// Number of programmatic offset writes so far.
    pub fn corrections(&self) -> usize {
        self.corrections
    }
}

impl SpanMeasurer for SimulatedSurface {
    fn span_of(&self, edge: Edge, count: usize) -> f64 {
        self.spans.span_of(edge, count)
    }

    fn gap(&self) -> f64 {
        self.spans.gap()
    }
}

impl ScrollSurface for SimulatedSurface {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.spans.total() - self.viewport).max(0.0)
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.corrections += 1;
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn set_smooth_scrolling(&mut self, enabled: bool) {
        self.smooth = enabled;
    }
}
