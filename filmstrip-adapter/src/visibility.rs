use alloc::string::String;
use alloc::vec::Vec;

use filmstrip::{Extent, Item, RenderKey};

use crate::key::{KeyMap, KeySet};

/// A placeholder whose real source should now be assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    pub key: RenderKey,
    pub src: String,
}

/// Lazy image loading for the mounted window.
///
/// Every mounted item starts as a placeholder carrying a pending source. The host reports
/// visibility changes (from an intersection observer, or via [`Self::intersecting`] when it has
/// none); the first intersection activates the placeholder and stops observing it.
///
/// Independent of the scroll engine: it only reads the current window on [`Self::rescan`].
#[derive(Clone, Debug)]
pub struct VisibilityLoader {
    margin: f64,
    pending: KeyMap<RenderKey, String>,
    loaded: KeySet<RenderKey>,
    connected: bool,
}

impl VisibilityLoader {
    /// `margin` expands the viewport on both ends of the scroll axis.
    pub fn new(margin: f64) -> Self {
        Self {
            margin: margin.max(0.0),
            pending: KeyMap::default(),
            loaded: KeySet::default(),
            connected: true,
        }
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of placeholders currently observed.
    pub fn observed_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_observed(&self, key: RenderKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn is_loaded(&self, key: RenderKey) -> bool {
        self.loaded.contains(&key)
    }

    /// Re-syncs observation with the mounted items.
    ///
    /// Unmounted items are forgotten; every mounted item that has not been activated yet is
    /// observed. Returns the number of newly observed placeholders. Reconnects after
    /// [`Self::disconnect`].
    pub fn rescan<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>) -> usize {
        self.connected = true;

        let mut mounted = KeySet::default();
        let mut added = 0usize;
        for item in items {
            mounted.insert(item.key);
            if self.loaded.contains(&item.key) || self.pending.contains_key(&item.key) {
                continue;
            }
            self.pending.insert(item.key, item.url.clone());
            added += 1;
        }

        self.pending.retain(|k, _| mounted.contains(k));
        self.loaded.retain(|k| mounted.contains(k));
        atrace!(added, observed = self.pending.len(), "visibility rescan");
        added
    }

    /// Handles a visibility change reported by the host.
    ///
    /// Returns the activation on the first intersection of an observed placeholder; later calls
    /// for the same key return `None`.
    pub fn on_intersection(&mut self, key: RenderKey, is_intersecting: bool) -> Option<Activation> {
        if !self.connected || !is_intersecting {
            return None;
        }
        let src = self.pending.remove(&key)?;
        self.loaded.insert(key);
        Some(Activation { key, src })
    }

    /// Observed placeholders whose extent meets the expanded viewport.
    ///
    /// `extents` must be in window order, matching `items`. Adjacent-but-not-overlapping counts
    /// as intersecting.
    pub fn intersecting<'a>(
        &self,
        viewport_start: f64,
        viewport_len: f64,
        items: impl IntoIterator<Item = &'a Item>,
        extents: &[Extent],
    ) -> Vec<RenderKey> {
        if !self.connected {
            return Vec::new();
        }
        let lo = viewport_start - self.margin;
        let hi = viewport_start + viewport_len.max(0.0) + self.margin;
        items
            .into_iter()
            .zip(extents)
            .filter(|(item, ext)| {
                self.pending.contains_key(&item.key) && ext.end >= lo && ext.start <= hi
            })
            .map(|(item, _)| item.key)
            .collect()
    }

    /// Activates every observed placeholder within the expanded viewport.
    pub fn activate_visible<'a>(
        &mut self,
        viewport_start: f64,
        viewport_len: f64,
        items: impl IntoIterator<Item = &'a Item>,
        extents: &[Extent],
    ) -> Vec<Activation> {
        let keys = self.intersecting(viewport_start, viewport_len, items, extents);
        keys.into_iter()
            .filter_map(|key| self.on_intersection(key, true))
            .collect()
    }

    /// Stops all observation and forgets every placeholder.
    pub fn disconnect(&mut self) {
        adebug!(observed = self.pending.len(), "visibility disconnect");
        self.connected = false;
        self.pending.clear();
        self.loaded.clear();
    }
}
