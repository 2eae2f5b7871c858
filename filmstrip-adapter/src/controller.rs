use alloc::vec::Vec;

use filmstrip::{
    Compensation, Edge, Extent, FetchOutcome, FetchRequest, ImageRecord, InfiniteStrip,
    OptionsError, RenderKey, SourceError, StripOptions,
};

use crate::{Activation, ScrollSurface, VisibilityLoader};

/// A framework-neutral controller that wraps an [`InfiniteStrip`] and a [`VisibilityLoader`]
/// and runs the commit-phase workflow around them.
///
/// This type does not hold any UI objects or network handles. Adapters drive it by calling:
/// - `mount` once, and running the returned request against their image source
/// - `on_scroll` for every native scroll event
/// - `tick(now_ms, surface)` each frame/timer tick (debounced evaluation, scroll re-enable)
/// - `on_fetch_complete` when a request resolves, then re-render the window
/// - `after_commit(surface)` after every render, before paint
/// - `unmount` on teardown
#[derive(Clone, Debug)]
pub struct Controller {
    strip: InfiniteStrip,
    loader: VisibilityLoader,
    resume_scroll: bool,
}

impl Controller {
    pub fn new(options: StripOptions) -> Result<Self, OptionsError> {
        Ok(Self::from_strip(InfiniteStrip::new(options)?))
    }

    pub fn from_strip(strip: InfiniteStrip) -> Self {
        let loader = VisibilityLoader::new(strip.options().lazy_margin);
        Self {
            strip,
            loader,
            resume_scroll: false,
        }
    }

    pub fn strip(&self) -> &InfiniteStrip {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut InfiniteStrip {
        &mut self.strip
    }

    pub fn into_strip(self) -> InfiniteStrip {
        self.strip
    }

    pub fn visibility(&self) -> &VisibilityLoader {
        &self.loader
    }

    pub fn visibility_mut(&mut self) -> &mut VisibilityLoader {
        &mut self.loader
    }

    pub fn is_loading(&self) -> bool {
        self.strip.is_loading()
    }

    /// When the adapter should call `tick` next for a pending scroll evaluation, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.strip.scroll_deadline_ms()
    }

    pub fn mount(&mut self) -> Option<FetchRequest> {
        self.strip.mount()
    }

    /// Tears down the strip and the visibility observation.
    ///
    /// Requests still in flight may complete later; `on_fetch_complete` reports them as stale.
    pub fn unmount(&mut self) {
        self.strip.unmount();
        self.loader.disconnect();
        self.resume_scroll = false;
    }

    /// Call this for every native scroll event.
    ///
    /// Returns `false` when the event was ignored (during a correction, or before load).
    pub fn on_scroll(&mut self, now_ms: u64) -> bool {
        self.strip.notify_scroll_event(now_ms)
    }

    /// Advances the controller.
    ///
    /// - Re-enables scroll handling one tick after a compensation pass.
    /// - Runs the debounced scroll evaluation when due and returns the prefetch it triggers.
    pub fn tick(&mut self, now_ms: u64, surface: &impl ScrollSurface) -> Option<FetchRequest> {
        if self.resume_scroll {
            self.resume_scroll = false;
            self.strip.finish_compensation();
        }
        self.strip.poll_scroll(now_ms, surface.metrics(), surface)
    }

    /// Requests the next page for `edge` directly, bypassing scroll evaluation.
    pub fn request_more(&mut self, edge: Edge) -> Option<FetchRequest> {
        self.strip.request_more(edge)
    }

    pub fn on_fetch_complete(
        &mut self,
        request: FetchRequest,
        result: Result<Vec<ImageRecord>, SourceError>,
    ) -> FetchOutcome {
        let outcome = self.strip.complete(request, result);
        #[cfg(feature = "tracing")]
        if let FetchOutcome::Failed { purpose, error } = &outcome {
            awarn!(?purpose, %error, page = request.page, "image source request failed");
        }
        outcome
    }

    /// The commit-phase hook: call synchronously after the window has been rendered and laid
    /// out, before the browser/toolkit paints.
    ///
    /// Re-scans lazy placeholders, then applies any pending scroll compensation with smooth
    /// scrolling suspended. Scroll events stay ignored until the next `tick`.
    pub fn after_commit(&mut self, surface: &mut impl ScrollSurface) -> Option<Compensation> {
        if self.strip.is_mounted() {
            self.loader.rescan(self.strip.items());
        }
        if !self.strip.has_pending_adjustment() {
            return None;
        }

        surface.set_smooth_scrolling(false);
        let compensation = self.strip.compensate(surface.scroll_offset(), &*surface);
        if let Some(c) = compensation {
            surface.set_scroll_offset(c.to);
            let settled = surface.scroll_offset();
            self.strip.record_scroll_offset(settled);
            self.resume_scroll = true;
            atrace!(from = c.from, to = c.to, settled, "scroll compensated");
        }
        surface.set_smooth_scrolling(true);
        compensation
    }

    /// Forwards a host-observed visibility change to the lazy loader.
    pub fn on_intersection(&mut self, key: RenderKey, is_intersecting: bool) -> Option<Activation> {
        self.loader.on_intersection(key, is_intersecting)
    }

    /// Activates placeholders within the expanded viewport, for hosts without an observer.
    ///
    /// `extents` are the laid out items in window order.
    pub fn activate_visible(
        &mut self,
        surface: &impl ScrollSurface,
        viewport_len: f64,
        extents: &[Extent],
    ) -> Vec<Activation> {
        self.loader.activate_visible(
            surface.scroll_offset(),
            viewport_len,
            self.strip.items(),
            extents,
        )
    }
}
