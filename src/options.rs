use crate::OptionsError;

/// Configuration for [`crate::InfiniteStrip`].
///
/// All fields have defaults matching a typical horizontal image carousel. With
/// `feature = "serde"`, partial documents deserialize over those defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StripOptions {
    /// Items requested per fetch; also the unit of growth and eviction.
    pub batch_size: usize,
    /// Number of batches kept mounted at once.
    pub max_batches: usize,
    /// Page loaded on mount. Defaults high enough to leave room for leading scrolling.
    pub initial_page: u32,
    /// Quiet period before a burst of scroll events is evaluated.
    pub debounce_ms: u64,
    /// Prefetch threshold, expressed as a number of items measured at the relevant edge.
    pub prefetch_items: usize,
    /// Viewport expansion (in pixels, along the scroll axis) used by lazy image loading.
    pub lazy_margin: f64,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_batches: 6,
            initial_page: 50,
            debounce_ms: 80,
            prefetch_items: 2,
            lazy_margin: 200.0,
        }
    }
}

impl StripOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound on the number of mounted items once a mutation settles.
    pub fn max_items(&self) -> usize {
        self.batch_size.saturating_mul(self.max_batches)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.batch_size == 0 {
            return Err(OptionsError::ZeroBatchSize);
        }
        if self.max_batches == 0 {
            return Err(OptionsError::ZeroMaxBatches);
        }
        if self.initial_page == 0 {
            return Err(OptionsError::ZeroInitialPage);
        }
        if self.prefetch_items == 0 {
            return Err(OptionsError::ZeroPrefetchItems);
        }
        Ok(())
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_max_batches(mut self, max_batches: usize) -> Self {
        self.max_batches = max_batches;
        self
    }

    pub fn with_initial_page(mut self, initial_page: u32) -> Self {
        self.initial_page = initial_page;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_prefetch_items(mut self, prefetch_items: usize) -> Self {
        self.prefetch_items = prefetch_items;
        self
    }

    pub fn with_lazy_margin(mut self, lazy_margin: f64) -> Self {
        self.lazy_margin = lazy_margin;
        self
    }
}
