use crate::store::{Sample, TimeSeriesStore};
use std::ops::Range;

/// Read-only view over a contiguous run of samples in a [`TimeSeriesStore`].
///
/// Nothing is copied until a caller asks for owned [`Sample`]s.
#[derive(Debug, Clone)]
pub struct WindowView<'a> {
    store: &'a TimeSeriesStore,
    range: Range<usize>,
    has_left_edge: bool,
}

impl<'a> WindowView<'a> {
    pub(crate) fn new(store: &'a TimeSeriesStore, range: Range<usize>, has_left_edge: bool) -> Self {
        Self {
            store,
            range,
            has_left_edge,
        }
    }

    pub(crate) fn empty(store: &'a TimeSeriesStore) -> Self {
        Self::new(store, 0..0, false)
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Whether the first sample of the view precedes the requested start time.
    pub fn has_left_edge(&self) -> bool {
        self.has_left_edge
    }

    /// Index of the view's first sample within the store.
    pub fn start_index(&self) -> usize {
        self.range.start
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + 'a {
        let store = self.store;
        store.raw_times().range(self.range.clone()).copied()
    }

    pub fn channel(&self, idx: usize) -> Option<impl Iterator<Item = f64> + 'a> {
        let store = self.store;
        let range = self.range.clone();
        store
            .raw_channel(idx)
            .map(move |channel| channel.range(range).copied())
    }

    /// The `idx`-th sample of the view.
    pub fn sample(&self, idx: usize) -> Option<Sample> {
        if idx >= self.len() {
            return None;
        }
        Some(self.store.row(self.range.start + idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + 'a {
        let store = self.store;
        self.range.clone().map(move |idx| store.row(idx))
    }

    pub fn to_samples(&self) -> Vec<Sample> {
        self.iter().collect()
    }
}
