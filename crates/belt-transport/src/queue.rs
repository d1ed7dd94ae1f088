//! The ordered collection of items on a belt.

use std::collections::VecDeque;

use crate::TransitItem;

/// Items on one belt, front = nearest the sink.
///
/// Progress is non-increasing from front to back.  The queue itself never
/// reorders; [`TransitQueue::from_unsorted`] is the only constructor that
/// accepts arbitrary input and it sorts on the way in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitQueue {
    items: VecDeque<TransitItem>,
}

impl TransitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from items in any order.  Progress is clamped to `[0, 1]`
    /// (NaN becomes 0) and the result sorted front to back.
    pub fn from_unsorted(items: impl IntoIterator<Item = TransitItem>) -> Self {
        let mut items: Vec<TransitItem> = items
            .into_iter()
            .map(|mut item| {
                item.progress = if item.progress.is_nan() { 0.0 } else { item.progress.clamp(0.0, 1.0) };
                item
            })
            .collect();
        // Stable: equal progress keeps input order.
        items.sort_by(|a, b| b.progress.total_cmp(&a.progress));
        Self { items: items.into() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item nearest the sink.
    #[inline]
    pub fn front(&self) -> Option<&TransitItem> {
        self.items.front()
    }

    /// The item nearest the source.
    #[inline]
    pub fn back(&self) -> Option<&TransitItem> {
        self.items.back()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TransitItem> {
        self.items.get(index)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut TransitItem> {
        self.items.get_mut(index)
    }

    /// Enqueue a freshly loaded item behind everything else.
    #[inline]
    pub fn push_back(&mut self, item: TransitItem) {
        self.items.push_back(item);
    }

    #[inline]
    pub(crate) fn remove(&mut self, index: usize) -> Option<TransitItem> {
        self.items.remove(index)
    }

    /// Front-to-back iteration.
    pub fn iter(&self) -> impl Iterator<Item = &TransitItem> {
        self.items.iter()
    }

    /// Remove everything, front first.
    pub fn take_all(&mut self) -> Vec<TransitItem> {
        self.items.drain(..).collect()
    }

    /// Total count of all payloads.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| i.payload.count as u64).sum()
    }

    /// `true` when progress never increases from front to back.
    pub fn is_ordered(&self) -> bool {
        self.items
            .iter()
            .zip(self.items.iter().skip(1))
            .all(|(ahead, behind)| behind.progress <= ahead.progress)
    }
}
