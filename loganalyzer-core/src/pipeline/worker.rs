use crate::pipeline::aggregate::AggregateState;
use crate::pipeline::parse::{TimestampError, decode_record};
use crate::pipeline::queue::LineReceiver;
use crate::pipeline::types::LogRecord;
use std::sync::{Mutex, PoisonError};

/// Where a worker folds its records.
pub(crate) enum Fold<'a> {
    /// Private to this worker; handed back when it finishes.
    Sharded(AggregateState),
    /// One aggregate for every worker, held for the duration of `add`.
    Shared(&'a Mutex<AggregateState>),
}

impl Fold<'_> {
    fn add(&mut self, record: &LogRecord) -> Option<TimestampError> {
        match self {
            Fold::Sharded(state) => state.add(record),
            Fold::Shared(state) => state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .add(record),
        }
    }

    pub(crate) fn into_shard(self) -> Option<AggregateState> {
        match self {
            Fold::Sharded(state) => Some(state),
            Fold::Shared(_) => None,
        }
    }
}

/// Per-worker counters that live outside the aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WorkerTally {
    pub records: u64,
    pub malformed: u64,
    pub untimed: u64,
}

impl WorkerTally {
    pub(crate) fn merge_from(&mut self, other: &WorkerTally) {
        self.records += other.records;
        self.malformed += other.malformed;
        self.untimed += other.untimed;
    }
}

/// Drain the queue until it is closed and empty.
///
/// Bad lines and bad timestamps are reported and skipped; neither stops the
/// worker.
pub(crate) fn work(worker: usize, lines: LineReceiver, fold: &mut Fold<'_>) -> WorkerTally {
    let mut tally = WorkerTally::default();

    for line in lines {
        let record = match decode_record(&line.bytes) {
            Ok(record) => record,
            Err(err) => {
                tally.malformed += 1;
                tracing::warn!(worker, line = line.ordinal, error = %err, "skipping malformed line");
                continue;
            }
        };

        tally.records += 1;
        if let Some(err) = fold.add(&record) {
            tally.untimed += 1;
            tracing::warn!(
                worker,
                line = line.ordinal,
                error = %err,
                "record left out of hourly histogram"
            );
        }
    }

    tracing::debug!(
        worker,
        records = tally.records,
        malformed = tally.malformed,
        "worker finished"
    );
    tally
}
