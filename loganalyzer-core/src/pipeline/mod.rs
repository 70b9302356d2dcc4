//! Access Log Aggregation Pipeline
//!
//! This module turns a newline-delimited JSON access log into a handful of
//! aggregate metrics: how many requests there were, how long they took on
//! average, which status codes came back, and which hour of the day was the
//! busiest.
//!
//! Files can be far larger than memory, so nothing is ever loaded whole. A
//! single reader pulls lines off the input and pushes them into a bounded
//! queue. When the queue is full the reader waits, which keeps memory flat no
//! matter how big the file is. A fixed pool of worker threads pulls lines off
//! the other end, decodes them, and folds them into an aggregate.
//!
//! Workers either keep a private aggregate each (sharded, the default) that is
//! merged once they are all done, or share one aggregate behind a lock. Both
//! give the same answer because folding and merging only ever add counts.
//!
//! Bad lines are skipped with a warning that names the line number. Bad
//! timestamps still count as requests, they just stay out of the hourly
//! histogram.
//!
//! The overall data processing architecture is:
//!
//! LineSource
//! LineQueue
//! decode_record
//! AggregateState (one per worker, or shared)
//! merge
//! Summary
//! write_summary
//!

mod aggregate;
mod cancel;
mod constants;
mod histogram;
mod parse;
mod queue;
mod render;
mod run;
mod source;
mod summary;
mod types;
mod worker;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregateState, merge};
pub use cancel::CancelFlag;
pub use histogram::HourHistogram;
pub use parse::{RecordError, TimestampError, decode_record, parse_hour};
pub use queue::{LineQueue, LineReceiver, line_queue};
pub use render::{OutputFormat, render_summary, write_summary};
pub use run::{Analysis, Analyzer, RunPhase, RunStats};
pub use source::LineSource;
pub use summary::Summary;
pub use types::{LineItem, LogRecord};
