use alloc::format;
use alloc::string::String;

use crate::SourceError;

/// One end of the strip.
///
/// `Trailing` grows forward (increasing page numbers), `Leading` grows backward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Leading,
    Trailing,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Self::Leading => Self::Trailing,
            Self::Trailing => Self::Leading,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Leading => 0,
            Self::Trailing => 1,
        }
    }
}

/// A record as returned by the image source, in page order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRecord {
    pub id: String,
    pub url: String,
}

impl ImageRecord {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Rendering identity of a mounted item.
///
/// `id` alone is not unique: upstream sources may cycle, and the leading cursor clamps at page 1
/// so that page can be merged more than once. `batch` is a per-strip serial assigned on every
/// merge, which makes `(batch, slot)` unique for the strip's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderKey {
    pub page: u32,
    pub batch: u64,
    pub slot: u32,
}

/// An image mounted in the window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub url: String,
    pub source_page: u32,
    pub key: RenderKey,
}

impl Item {
    /// String form of the rendering key, for frameworks that key children by string.
    pub fn dom_key(&self) -> String {
        format!(
            "{}-p{}-b{}-{}",
            self.id, self.key.page, self.key.batch, self.key.slot
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchTicket(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchPurpose {
    /// The mount-time load of `initial_page`.
    Initial,
    /// A prefetch that grows the given edge.
    Extend(Edge),
}

/// A page request the host must run against its image source.
///
/// Hand it back unchanged to [`crate::InfiniteStrip::complete`] together with the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub purpose: FetchPurpose,
    pub page: u32,
    pub count: usize,
}

/// Pending scroll correction produced by a window mutation.
///
/// Consumed exactly once by [`crate::InfiniteStrip::compensate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAdjustment {
    /// The edge that grew.
    pub edge: Edge,
    pub pruned: bool,
    /// Number of items merged at `edge`.
    pub added: usize,
    /// Number of items evicted from the opposite edge.
    pub removed: usize,
}

/// Scroll container geometry sampled by the host when a debounced scroll settles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub offset: f64,
    /// `scroll_width - client_width` for a horizontal strip.
    pub max_offset: f64,
}

/// A scroll offset correction computed by the compensation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compensation {
    pub from: f64,
    pub to: f64,
    /// Number of pending [`ScrollAdjustment`]s folded into this correction.
    pub applied: usize,
}

impl Compensation {
    /// Signed change applied to the scroll offset.
    pub fn delta(&self) -> f64 {
        self.to - self.from
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    /// Not mounted yet (or torn down).
    #[default]
    Idle,
    /// The initial page is outstanding.
    Loading,
    Ready,
    /// The initial page failed; `mount` may be called again to retry.
    Failed(SourceError),
}

/// Result of feeding a completed fetch back into the strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The initial page populated the window.
    Loaded { count: usize },
    /// An edge fetch was merged (and possibly pruned the opposite edge).
    Extended {
        edge: Edge,
        added: usize,
        removed: usize,
    },
    /// The fetch failed; nothing but the lock changed.
    Failed {
        purpose: FetchPurpose,
        error: SourceError,
    },
    /// The completion no longer matches an outstanding request (unmounted, or unknown ticket).
    Stale,
}
