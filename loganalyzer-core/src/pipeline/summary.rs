use crate::pipeline::aggregate::AggregateState;
use serde::Serialize;
use std::collections::BTreeMap;

/// Final metrics for a run. Field names are the output contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_requests: u64,
    pub average_response_time_ms: f64,
    pub status_code_counts: BTreeMap<String, u64>,
    /// `null` when no record carried a usable timestamp.
    pub busiest_hour: Option<u8>,
}

impl Summary {
    pub fn from_state(state: &AggregateState) -> Self {
        let average_response_time_ms = if state.response_count() > 0 {
            state.response_sum() / state.response_count() as f64
        } else {
            0.0
        };

        Self {
            total_requests: state.total_requests(),
            average_response_time_ms,
            status_code_counts: state
                .status_code_counts()
                .iter()
                .map(|(status, count)| (status.clone(), *count))
                .collect(),
            busiest_hour: state.hours().busiest(),
        }
    }
}
