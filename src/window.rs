use alloc::collections::VecDeque;
use alloc::collections::vec_deque;
use alloc::vec::Vec;

use crate::{Edge, ImageRecord, Item, RenderKey};

/// What a single merge did to the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Merge {
    pub added: usize,
    pub removed: usize,
}

/// The ordered, bounded set of mounted items.
///
/// Grows one batch at a time at either edge and evicts one batch from the opposite edge when
/// the bound is exceeded.
#[derive(Clone, Debug)]
pub struct Window {
    items: VecDeque<Item>,
    batch_size: usize,
    max_items: usize,
    next_batch: u64,
}

impl Window {
    pub(crate) fn new(batch_size: usize, max_items: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(max_items.saturating_add(batch_size)),
            batch_size,
            max_items,
            next_batch: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&Item> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&Item> {
        self.items.back()
    }

    pub fn index_of(&self, key: RenderKey) -> Option<usize> {
        self.items.iter().position(|it| it.key == key)
    }

    /// Lowest and highest source pages currently mounted.
    pub fn page_span(&self) -> Option<(u32, u32)> {
        let first = self.items.front()?.source_page;
        let last = self.items.back()?.source_page;
        Some((first, last))
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the contents with a single page.
    pub(crate) fn reset(&mut self, page: u32, records: Vec<ImageRecord>) -> usize {
        self.items.clear();
        let batch = self.keyed(page, records);
        let n = batch.len();
        self.items.extend(batch);
        n
    }

    /// Merges a page at `edge`, then prunes one batch from the opposite edge if over the bound.
    pub(crate) fn merge(&mut self, edge: Edge, page: u32, records: Vec<ImageRecord>) -> Merge {
        let batch = self.keyed(page, records);
        let added = batch.len();
        match edge {
            Edge::Trailing => self.items.extend(batch),
            Edge::Leading => {
                for item in batch.into_iter().rev() {
                    self.items.push_front(item);
                }
            }
        }

        let mut removed = 0;
        if self.items.len() > self.max_items {
            let evict = self.batch_size.min(self.items.len());
            match edge.opposite() {
                Edge::Leading => {
                    self.items.drain(..evict);
                }
                Edge::Trailing => {
                    let keep = self.items.len() - evict;
                    self.items.truncate(keep);
                }
            }
            removed = evict;
        }
        debug_assert!(
            self.items.len() <= self.max_items,
            "window exceeds its bound (len={}, max={})",
            self.items.len(),
            self.max_items
        );

        Merge { added, removed }
    }

    // Pages larger than `batch_size` are cut down so that a single pruned batch restores the bound.
    fn keyed(&mut self, page: u32, records: Vec<ImageRecord>) -> Vec<Item> {
        let batch = self.next_batch;
        self.next_batch = self.next_batch.wrapping_add(1);
        records
            .into_iter()
            .take(self.batch_size)
            .enumerate()
            .map(|(slot, rec)| Item {
                id: rec.id,
                url: rec.url,
                source_page: page,
                key: RenderKey {
                    page,
                    batch,
                    slot: slot as u32,
                },
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Window {
    type Item = &'a Item;
    type IntoIter = vec_deque::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
