use alloc::vec::Vec;

use crate::debounce::Debounce;
use crate::span::SpanMeasurer;
use crate::window::Window;
use crate::{
    Compensation, Edge, FetchOutcome, FetchPurpose, FetchRequest, FetchTicket, ImageRecord, Item,
    LoadState, OptionsError, ScrollAdjustment, ScrollMetrics, SourceError, StripOptions,
};

/// A headless, bidirectional infinite-scroll engine.
///
/// This type is intentionally UI-agnostic and performs no I/O:
/// - It does not hold any UI objects or network handles.
/// - Your adapter drives it with scroll events, timestamps and layout measurements.
/// - Fetches are handed out as [`FetchRequest`]s and their results fed back via
///   [`InfiniteStrip::complete`], in whatever order they resolve.
///
/// Per edge, at most one fetch is outstanding at a time; a fetch for one edge never blocks the
/// other. Each successful fetch merges one batch at its edge and, once the window is over
/// capacity, evicts one batch from the opposite edge. Mutations that shift on-screen content
/// leave a pending [`ScrollAdjustment`] that the adapter resolves with
/// [`InfiniteStrip::compensate`] after the new window is laid out and before it is painted.
///
/// For a ready-made commit-phase driver, see the `filmstrip-adapter` crate.
#[derive(Clone, Debug)]
pub struct InfiniteStrip {
    options: StripOptions,
    window: Window,
    load_state: LoadState,
    mounted: bool,

    next_trailing_page: u32,
    next_leading_page: u32,

    initial: Option<FetchTicket>,
    in_flight: [Option<FetchTicket>; 2],
    next_ticket: u64,

    adjustments: Vec<ScrollAdjustment>,
    compensating: bool,

    last_scroll_offset: f64,
    last_direction: Option<Edge>,
    scroll_debounce: Debounce,
}

impl InfiniteStrip {
    pub fn new(options: StripOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        fdebug!(
            batch_size = options.batch_size,
            max_batches = options.max_batches,
            initial_page = options.initial_page,
            "InfiniteStrip::new"
        );
        Ok(Self {
            window: Window::new(options.batch_size, options.max_items()),
            load_state: LoadState::Idle,
            mounted: false,
            next_trailing_page: trailing_start(options.initial_page),
            next_leading_page: leading_start(options.initial_page),
            initial: None,
            in_flight: [None, None],
            next_ticket: 0,
            adjustments: Vec::new(),
            compensating: false,
            last_scroll_offset: 0.0,
            last_direction: None,
            scroll_debounce: Debounce::new(options.debounce_ms),
            options,
        })
    }

    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// `true` while the initial page is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.load_state, LoadState::Ready)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.window.iter()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The next page that will be requested for `edge`.
    pub fn cursor(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Leading => self.next_leading_page,
            Edge::Trailing => self.next_trailing_page,
        }
    }

    pub fn is_fetching(&self, edge: Edge) -> bool {
        self.in_flight[edge.slot()].is_some()
    }

    pub fn last_scroll_offset(&self) -> f64 {
        self.last_scroll_offset
    }

    /// Direction derived by the most recent scroll evaluation.
    pub fn scroll_direction(&self) -> Option<Edge> {
        self.last_direction
    }

    /// `true` between [`Self::compensate`] and [`Self::finish_compensation`].
    pub fn is_compensating(&self) -> bool {
        self.compensating
    }

    pub fn pending_adjustment(&self) -> Option<ScrollAdjustment> {
        self.adjustments.first().copied()
    }

    pub fn has_pending_adjustment(&self) -> bool {
        !self.adjustments.is_empty()
    }

    /// When the pending scroll evaluation becomes due, if any.
    pub fn scroll_deadline_ms(&self) -> Option<u64> {
        self.scroll_debounce.deadline_ms()
    }

    /// Starts the initial load.
    ///
    /// Returns `None` if the strip is already loading or loaded. Calling this again after the
    /// initial load failed issues a fresh request; nothing retries on its own.
    pub fn mount(&mut self) -> Option<FetchRequest> {
        if self.mounted && !matches!(self.load_state, LoadState::Failed(_)) {
            ftrace!("mount ignored: already mounted");
            return None;
        }
        self.mounted = true;
        self.load_state = LoadState::Loading;

        let ticket = self.issue_ticket();
        self.initial = Some(ticket);
        let request = FetchRequest {
            ticket,
            purpose: FetchPurpose::Initial,
            page: self.options.initial_page,
            count: self.options.batch_size,
        };
        fdebug!(page = request.page, ticket = ticket.0, "initial fetch issued");
        Some(request)
    }

    /// Tears the strip down.
    ///
    /// In-flight fetches are abandoned: their completions come back as [`FetchOutcome::Stale`].
    /// The pending scroll evaluation is cancelled. A later `mount` starts from scratch.
    pub fn unmount(&mut self) {
        fdebug!(len = self.window.len(), "unmount");
        self.mounted = false;
        self.load_state = LoadState::Idle;
        self.window.clear();
        self.initial = None;
        self.in_flight = [None, None];
        self.adjustments.clear();
        self.compensating = false;
        self.scroll_debounce.cancel();
        self.last_scroll_offset = 0.0;
        self.last_direction = None;
        self.next_trailing_page = trailing_start(self.options.initial_page);
        self.next_leading_page = leading_start(self.options.initial_page);
    }

    /// Requests the next page for `edge`.
    ///
    /// Returns `None` (and does nothing) when a fetch for `edge` is already outstanding, or when
    /// the strip has not finished its initial load.
    pub fn request_more(&mut self, edge: Edge) -> Option<FetchRequest> {
        if !self.mounted || !self.is_ready() {
            ftrace!(?edge, "request_more ignored: not ready");
            return None;
        }
        if self.in_flight[edge.slot()].is_some() {
            ftrace!(?edge, "request_more dropped: already in flight");
            return None;
        }

        let ticket = self.issue_ticket();
        self.in_flight[edge.slot()] = Some(ticket);
        let request = FetchRequest {
            ticket,
            purpose: FetchPurpose::Extend(edge),
            page: self.cursor(edge),
            count: self.options.batch_size,
        };
        fdebug!(?edge, page = request.page, ticket = ticket.0, "fetch issued");
        Some(request)
    }

    /// Feeds a resolved fetch back into the strip.
    ///
    /// Completions may arrive in any order. Whatever the result, the lock for the request's
    /// edge is released. On failure nothing else changes: the cursor stays put and the window is
    /// untouched, so scrolling to the same edge again re-issues the same page.
    pub fn complete(
        &mut self,
        request: FetchRequest,
        result: Result<Vec<ImageRecord>, SourceError>,
    ) -> FetchOutcome {
        match request.purpose {
            FetchPurpose::Initial => self.complete_initial(request, result),
            FetchPurpose::Extend(edge) => self.complete_extend(edge, request, result),
        }
    }

    fn complete_initial(
        &mut self,
        request: FetchRequest,
        result: Result<Vec<ImageRecord>, SourceError>,
    ) -> FetchOutcome {
        if !self.mounted || self.initial != Some(request.ticket) {
            fdebug!(ticket = request.ticket.0, "stale initial completion dropped");
            return FetchOutcome::Stale;
        }
        self.initial = None;

        match result {
            Ok(records) => {
                let count = self.window.reset(request.page, records);
                self.load_state = LoadState::Ready;
                self.last_scroll_offset = 0.0;
                fdebug!(page = request.page, count, "initial page loaded");
                FetchOutcome::Loaded { count }
            }
            Err(error) => {
                fwarn!(page = request.page, %error, "initial fetch failed");
                self.load_state = LoadState::Failed(error.clone());
                FetchOutcome::Failed {
                    purpose: FetchPurpose::Initial,
                    error,
                }
            }
        }
    }

    fn complete_extend(
        &mut self,
        edge: Edge,
        request: FetchRequest,
        result: Result<Vec<ImageRecord>, SourceError>,
    ) -> FetchOutcome {
        if !self.mounted || self.in_flight[edge.slot()] != Some(request.ticket) {
            fdebug!(?edge, ticket = request.ticket.0, "stale completion dropped");
            return FetchOutcome::Stale;
        }
        self.in_flight[edge.slot()] = None;

        let records = match result {
            Ok(records) => records,
            Err(error) => {
                fwarn!(?edge, page = request.page, %error, "fetch failed");
                return FetchOutcome::Failed {
                    purpose: request.purpose,
                    error,
                };
            }
        };

        self.advance_cursor(edge);
        let merge = self.window.merge(edge, request.page, records);
        let pruned = merge.removed > 0;

        // Prepending shifts everything after it; pruning the leading batch shifts everything
        // left. Trailing growth alone moves nothing on screen.
        if edge == Edge::Leading || pruned {
            self.adjustments.push(ScrollAdjustment {
                edge,
                pruned,
                added: merge.added,
                removed: merge.removed,
            });
        }

        fdebug!(
            ?edge,
            page = request.page,
            added = merge.added,
            removed = merge.removed,
            len = self.window.len(),
            "fetch applied"
        );
        FetchOutcome::Extended {
            edge,
            added: merge.added,
            removed: merge.removed,
        }
    }

    fn advance_cursor(&mut self, edge: Edge) {
        match edge {
            Edge::Trailing => {
                self.next_trailing_page = self.next_trailing_page.saturating_add(1);
            }
            Edge::Leading => {
                self.next_leading_page = self.next_leading_page.saturating_sub(1).max(1);
            }
        }
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        ticket
    }

    /// Records a raw scroll event from the UI.
    ///
    /// Returns `false` when the event is ignored: during a compensation pass (the offset change
    /// is our own), or before the strip is ready.
    pub fn notify_scroll_event(&mut self, now_ms: u64) -> bool {
        if !self.mounted || !self.is_ready() || self.compensating {
            return false;
        }
        self.scroll_debounce.schedule(now_ms);
        true
    }

    /// Runs the debounced scroll evaluation once its quiet period has elapsed.
    ///
    /// `metrics` and `measurer` should reflect the layout at `now_ms`.
    pub fn poll_scroll(
        &mut self,
        now_ms: u64,
        metrics: ScrollMetrics,
        measurer: &impl SpanMeasurer,
    ) -> Option<FetchRequest> {
        if !self.scroll_debounce.poll(now_ms) {
            return None;
        }
        self.evaluate_scroll(metrics, measurer)
    }

    /// Detects the scroll direction and triggers a prefetch when close to that edge.
    ///
    /// An offset greater than the previous one scrolls towards the trailing edge; anything else
    /// counts as leading. The threshold is the measured span of `prefetch_items` items at the
    /// relevant edge; a zero span (nothing laid out yet) still triggers at the very edge.
    pub fn evaluate_scroll(
        &mut self,
        metrics: ScrollMetrics,
        measurer: &impl SpanMeasurer,
    ) -> Option<FetchRequest> {
        if !self.mounted || !self.is_ready() {
            return None;
        }

        let offset = metrics.offset;
        let direction = if offset > self.last_scroll_offset {
            Edge::Trailing
        } else {
            Edge::Leading
        };
        self.last_scroll_offset = offset;
        self.last_direction = Some(direction);

        let threshold = measurer.span_of(direction, self.options.prefetch_items);
        let remaining = match direction {
            Edge::Trailing => (metrics.max_offset - offset).max(0.0),
            Edge::Leading => offset.max(0.0),
        };
        ftrace!(?direction, offset, remaining, threshold, "evaluate_scroll");

        if remaining <= threshold {
            self.request_more(direction)
        } else {
            None
        }
    }

    /// Resolves pending scroll adjustments against the freshly laid out window.
    ///
    /// Call this synchronously after the new window has been laid out and before it is painted,
    /// with smooth scrolling suspended. `current_offset` is the container's offset right now;
    /// write the returned [`Compensation::to`] back to the container.
    ///
    /// All adjustments since the last pass are folded into one correction, measured once:
    /// - Prepended items still mounted move existing content forward by their block plus one gap.
    /// - Pruned leading items move content back by one block plus one gap, estimated on the items
    ///   that now follow the prepended block (or sit at the leading edge when there is none).
    /// - A prepended batch pruned again before the pass cancels out.
    ///
    /// Scroll events are ignored until [`Self::finish_compensation`].
    pub fn compensate(
        &mut self,
        current_offset: f64,
        measurer: &impl SpanMeasurer,
    ) -> Option<Compensation> {
        if self.adjustments.is_empty() {
            return None;
        }
        if !self.mounted {
            self.adjustments.clear();
            return None;
        }

        // Reduce the pending intents to the leading items that are new since the last pass
        // (`fresh`, still mounted) and the older leading items that were pruned (`lost`).
        // Pruning takes the newest leading items first, so it consumes `fresh` before `lost`.
        let mut fresh = 0usize;
        let mut lost = 0usize;
        let applied = self.adjustments.len();
        for adjustment in self.adjustments.drain(..) {
            match adjustment.edge {
                Edge::Leading => fresh += adjustment.added,
                Edge::Trailing => {
                    let taken = fresh.min(adjustment.removed);
                    fresh -= taken;
                    lost += adjustment.removed - taken;
                }
            }
        }

        // The fresh block is measured exactly. The lost block is gone from the layout, so it is
        // estimated by the same number of items that now follow the fresh block.
        let len = self.window.len();
        let fresh_shift = block_shift(measurer, fresh, len);
        let lost_shift = if lost == 0 {
            0.0
        } else {
            (measurer.span_of(Edge::Leading, fresh + lost) + measurer.gap() - fresh_shift).max(0.0)
        };
        let to = (current_offset + fresh_shift - lost_shift).max(0.0);

        self.compensating = true;
        self.last_scroll_offset = to;
        ftrace!(from = current_offset, to, applied, fresh, lost, "compensate");
        Some(Compensation {
            from: current_offset,
            to,
            applied,
        })
    }

    /// Re-enables scroll handling after a compensation pass.
    ///
    /// Adapters typically call this one frame after [`Self::compensate`] so layout can settle.
    pub fn finish_compensation(&mut self) {
        self.compensating = false;
    }

    /// Records the offset the container actually settled on after a correction.
    ///
    /// Containers may clamp the offset written from [`Compensation::to`]; the next direction
    /// check compares against the value recorded here.
    pub fn record_scroll_offset(&mut self, offset: f64) {
        self.last_scroll_offset = offset;
    }
}

fn trailing_start(initial_page: u32) -> u32 {
    initial_page.saturating_add(1)
}

fn leading_start(initial_page: u32) -> u32 {
    initial_page.saturating_sub(1).max(1)
}

// Distance the rest of the strip moves when a block of `count` leading items appears or vanishes.
fn block_shift(measurer: &impl SpanMeasurer, count: usize, window_len: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let span = measurer.span_of(Edge::Leading, count);
    if window_len > count {
        span + measurer.gap()
    } else {
        span
    }
}
