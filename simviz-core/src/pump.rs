use crate::store::{PushOutcome, Sample, TimeSeriesStore};
use feed::FeedReceiver;
use log::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub pushed: usize,
    pub dropped: usize,
    pub rejected: usize,
}

/// Moves every queued sample into `store`. Samples the ordering policy
/// discards count as `dropped`; failed pushes are logged and count as
/// `rejected`. The rest of the queue is still drained.
pub fn drain_into(receiver: &FeedReceiver<Sample>, store: &mut TimeSeriesStore) -> DrainReport {
    let mut report = DrainReport::default();
    for sample in receiver.drain() {
        match store.push(sample.timestamp, &sample.values) {
            Ok(PushOutcome::Stored) => report.pushed += 1,
            Ok(PushOutcome::Dropped) => report.dropped += 1,
            Err(err) => {
                warn!("dropping sample at t={}: {err}", sample.timestamp);
                report.rejected += 1;
            }
        }
    }
    report
}
