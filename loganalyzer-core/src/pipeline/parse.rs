use crate::pipeline::types::LogRecord;
use chrono::{DateTime, Timelike, Utc};
use thiserror::Error;

/// A line that could not be turned into a record. The line is skipped.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid log record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A record whose timestamp cannot be placed in the hourly histogram.
///
/// The record itself still counts toward totals and status codes.
#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("missing timestamp")]
    Missing,

    #[error("cannot parse timestamp {value:?}: {source}")]
    Unparseable {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub fn decode_record(line: &[u8]) -> Result<LogRecord, RecordError> {
    Ok(serde_json::from_slice(line)?)
}

/// UTC hour-of-day of an RFC 3339 timestamp.
pub fn parse_hour(timestamp: &str) -> Result<usize, TimestampError> {
    if timestamp.is_empty() {
        return Err(TimestampError::Missing);
    }

    let ts = DateTime::parse_from_rfc3339(timestamp).map_err(|source| {
        TimestampError::Unparseable {
            value: timestamp.to_string(),
            source,
        }
    })?;

    Ok(ts.with_timezone(&Utc).hour() as usize)
}
