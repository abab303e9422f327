use crate::error::{OrderingError, StoreError, ValidationError};
use crate::packet::PacketDecoder;
use crate::window::WindowView;
use layout::{ComponentDefinition, OrderingPolicy};
use log::{debug, warn};
use serde::Serialize;
use std::cell::Cell;
use std::collections::VecDeque;

/// One timestamped row of channel values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: f64,
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(timestamp: f64, values: Vec<f64>) -> Self {
        Self { timestamp, values }
    }
}

/// What [`TimeSeriesStore::push`] did with an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Stored,
    /// Older than the newest sample under [`OrderingPolicy::Drop`].
    Dropped,
}

/// Time-windowed buffer of multi-channel samples.
///
/// Samples are appended in time order and evicted from the front by
/// [`trim`](Self::trim). Each channel is low-pass filtered at push time with
/// an exponential synapse whose time constant is the smoothing factor; a
/// factor of zero stores raw values.
///
/// `times` and every entry of `channels` always have the same length.
#[derive(Debug)]
pub struct TimeSeriesStore {
    channel_count: usize,
    smoothing_factor: f64,
    ordering: OrderingPolicy,
    times: VecDeque<f64>,
    channels: Vec<VecDeque<f64>>,
    first_visible_index: Cell<usize>,
}

impl TimeSeriesStore {
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `channel_count` - Number of values every sample carries; must be positive
    /// * `smoothing_factor` - Synapse time constant in `[0, 1)`
    pub fn new(channel_count: usize, smoothing_factor: f64) -> Result<Self, ValidationError> {
        if channel_count == 0 {
            return Err(ValidationError::NoChannels);
        }
        if !(0.0..1.0).contains(&smoothing_factor) {
            return Err(ValidationError::SmoothingFactor(smoothing_factor));
        }
        Ok(Self {
            channel_count,
            smoothing_factor,
            ordering: OrderingPolicy::default(),
            times: VecDeque::new(),
            channels: vec![VecDeque::new(); channel_count],
            first_visible_index: Cell::new(0),
        })
    }

    /// Creates the store backing a layout component.
    pub fn from_component(component: &ComponentDefinition) -> Result<Self, ValidationError> {
        Ok(Self::new(component.n_lines, component.synapse())?.with_ordering(component.ordering))
    }

    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first_visible_index(&self) -> usize {
        self.first_visible_index.get()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }

    pub fn channel(&self, idx: usize) -> Option<impl Iterator<Item = f64> + '_> {
        self.channels.get(idx).map(|channel| channel.iter().copied())
    }

    /// Appends a sample, smoothing each channel against the previous sample.
    ///
    /// Malformed input fails with a [`ValidationError`] and leaves the store
    /// untouched. A timestamp older than the newest stored one is handled
    /// according to the store's [`OrderingPolicy`].
    pub fn push(&mut self, timestamp: f64, values: &[f64]) -> Result<PushOutcome, StoreError> {
        self.validate_sample(timestamp, values)?;

        if let Some(&last) = self.times.back() {
            if timestamp < last {
                match self.ordering {
                    OrderingPolicy::Reject => {
                        return Err(OrderingError { last, timestamp }.into());
                    }
                    OrderingPolicy::Drop => {
                        warn!("dropping sample at t={timestamp}, older than last stored t={last}");
                        return Ok(PushOutcome::Dropped);
                    }
                    OrderingPolicy::Rewind => self.rewind_to(timestamp),
                }
            }
        }

        let decay = self.decay(timestamp);
        for (channel, &raw) in self.channels.iter_mut().zip(values) {
            let value = match (decay, channel.back()) {
                (Some(decay), Some(&previous)) => raw * (1.0 - decay) + previous * decay,
                _ => raw,
            };
            channel.push_back(value);
        }
        self.times.push_back(timestamp);
        Ok(PushOutcome::Stored)
    }

    /// Pushes every complete row of a flat `[t, v0, .., vN-1, t, ..]` buffer.
    ///
    /// Returns the number of rows stored; rows discarded under
    /// [`OrderingPolicy::Drop`] are not counted. Values left over after the
    /// last complete row are ignored. A non-finite value anywhere rejects the
    /// whole buffer; otherwise the first row that fails stops the batch and
    /// rows before it stay in the store.
    pub fn push_packed(&mut self, data: &[f32]) -> Result<usize, StoreError> {
        let samples = PacketDecoder::new(self.channel_count)?.decode_floats(data)?;
        let mut stored = 0;
        for sample in &samples {
            if self.push(sample.timestamp, &sample.values)? == PushOutcome::Stored {
                stored += 1;
            }
        }
        Ok(stored)
    }

    /// Evicts samples older than `current_time - keep_duration`.
    ///
    /// The newest sample at or before the cutoff is kept as the left edge, so
    /// the store never empties itself.
    pub fn trim(&mut self, current_time: f64, keep_duration: f64) {
        let cutoff = current_time - keep_duration;
        let at_or_before = self.times.partition_point(|&t| t <= cutoff);
        let evict = at_or_before.saturating_sub(1);
        if evict == 0 {
            return;
        }
        self.times.drain(..evict);
        for channel in &mut self.channels {
            channel.drain(..evict);
        }
        self.first_visible_index
            .set(self.first_visible_index.get().saturating_sub(evict));
        debug!("trimmed {evict} samples older than t={cutoff}");
    }

    /// Borrows the samples with `start_time <= t <= end_time`.
    ///
    /// When the window holds at least one sample, the sample just before
    /// `start_time` (if any) is included as the left edge.
    pub fn query_window(&self, start_time: f64, end_time: f64) -> WindowView<'_> {
        if self.times.is_empty() || !(start_time <= end_time) {
            return WindowView::empty(self);
        }
        let first = self.times.partition_point(|&t| t < start_time);
        let last = self.times.partition_point(|&t| t <= end_time);
        if first >= last {
            return WindowView::empty(self);
        }
        self.first_visible_index.set(first);
        let has_left_edge = first > 0;
        let begin = if has_left_edge { first - 1 } else { first };
        WindowView::new(self, begin..last, has_left_edge)
    }

    /// Values of the newest sample, or `None` if the store holds nothing.
    pub fn latest(&self) -> Option<Vec<f64>> {
        self.latest_sample().map(|sample| sample.values)
    }

    pub fn latest_sample(&self) -> Option<Sample> {
        self.times.len().checked_sub(1).map(|idx| self.row(idx))
    }

    /// Values of the sample in effect at `time`: the newest one stamped at or
    /// before it.
    pub fn value_at(&self, time: f64) -> Option<Vec<f64>> {
        let idx = self.times.partition_point(|&t| t <= time);
        idx.checked_sub(1).map(|idx| self.row(idx).values)
    }

    /// Drops all samples; the next push is treated as the first one.
    pub fn reset(&mut self) {
        self.times.clear();
        for channel in &mut self.channels {
            channel.clear();
        }
        self.first_visible_index.set(0);
    }

    /// Widens the store to `channel_count` channels. Existing samples read
    /// `0.0` on the new channels.
    pub fn grow_channels(&mut self, channel_count: usize) -> Result<(), ValidationError> {
        if channel_count < self.channel_count {
            return Err(ValidationError::ChannelShrink {
                current: self.channel_count,
                requested: channel_count,
            });
        }
        let len = self.times.len();
        self.channels
            .resize_with(channel_count, || VecDeque::from(vec![0.0; len]));
        self.channel_count = channel_count;
        Ok(())
    }

    pub(crate) fn row(&self, idx: usize) -> Sample {
        Sample {
            timestamp: self.times[idx],
            values: self.channels.iter().map(|channel| channel[idx]).collect(),
        }
    }

    pub(crate) fn raw_times(&self) -> &VecDeque<f64> {
        &self.times
    }

    pub(crate) fn raw_channel(&self, idx: usize) -> Option<&VecDeque<f64>> {
        self.channels.get(idx)
    }

    fn validate_sample(&self, timestamp: f64, values: &[f64]) -> Result<(), ValidationError> {
        if !timestamp.is_finite() {
            return Err(ValidationError::NonFiniteTimestamp(timestamp));
        }
        if values.len() != self.channel_count {
            return Err(ValidationError::ChannelCount {
                expected: self.channel_count,
                actual: values.len(),
            });
        }
        if let Some((channel, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFiniteValue { channel, value });
        }
        Ok(())
    }

    fn decay(&self, timestamp: f64) -> Option<f64> {
        if self.smoothing_factor <= 0.0 {
            return None;
        }
        let last = *self.times.back()?;
        Some((-(timestamp - last) / self.smoothing_factor).exp())
    }

    fn rewind_to(&mut self, timestamp: f64) {
        let keep = self.times.partition_point(|&t| t < timestamp);
        let discarded = self.times.len() - keep;
        self.times.truncate(keep);
        for channel in &mut self.channels {
            channel.truncate(keep);
        }
        self.first_visible_index
            .set(self.first_visible_index.get().min(keep));
        debug!("rewound to t={timestamp}, discarded {discarded} newer samples");
    }
}
