use crate::pipeline::histogram::HourHistogram;
use crate::pipeline::parse::{TimestampError, parse_hour};
use crate::pipeline::types::LogRecord;
use ahash::AHashMap;

/// Running totals for one worker, or for the whole run.
///
/// Only `add` and the merge functions mutate it. Every operation is a plain
/// sum, so states can be combined in any order.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    total_requests: u64,
    response_sum: f64,
    response_count: u64,
    status_code_counts: AHashMap<String, u64>,
    hours: HourHistogram,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record in.
    ///
    /// The record always counts toward the request total and its status code.
    /// A returned `TimestampError` only means it was left out of the hourly
    /// histogram.
    pub fn add(&mut self, record: &LogRecord) -> Option<TimestampError> {
        self.total_requests += 1;

        if let Some(ms) = record.response_time_ms {
            self.response_sum += ms;
            self.response_count += 1;
        }

        *self
            .status_code_counts
            .entry(record.http_status.to_string())
            .or_insert(0) += 1;

        match parse_hour(&record.timestamp) {
            Ok(hour) => {
                self.hours.record(hour);
                None
            }
            Err(err) => Some(err),
        }
    }

    pub fn merge_from(&mut self, other: &AggregateState) {
        self.total_requests += other.total_requests;
        self.response_sum += other.response_sum;
        self.response_count += other.response_count;

        for (status, count) in &other.status_code_counts {
            *self.status_code_counts.entry(status.clone()).or_insert(0) += count;
        }

        self.hours.merge_from(&other.hours);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    pub fn response_sum(&self) -> f64 {
        self.response_sum
    }

    pub fn response_count(&self) -> u64 {
        self.response_count
    }

    pub fn status_code_counts(&self) -> &AHashMap<String, u64> {
        &self.status_code_counts
    }

    pub fn hours(&self) -> &HourHistogram {
        &self.hours
    }
}

/// Combine partial states into one. An empty input gives the empty state.
pub fn merge<I>(states: I) -> AggregateState
where
    I: IntoIterator<Item = AggregateState>,
{
    let mut iter = states.into_iter();
    let Some(mut merged) = iter.next() else {
        return AggregateState::new();
    };

    for state in iter {
        merged.merge_from(&state);
    }
    merged
}
