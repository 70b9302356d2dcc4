
use crate::pipeline::types::LogRecord;
use std::io::{self, Cursor, Read};

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------

pub fn record(timestamp: &str, status: i64, response_time_ms: Option<f64>) -> LogRecord {
    LogRecord {
        timestamp: timestamp.to_string(),
        response_time_ms,
        http_status: status,
    }
}

pub const EXAMPLE_LOG: &str = concat!(
    r#"{"timestamp":"2025-01-01T10:15:00Z","http_status":200,"response_time_ms":50}"#,
    "\n",
    r#"{"timestamp":"2025-01-01T10:20:00Z","http_status":200,"response_time_ms":150}"#,
    "\n",
    r#"{"timestamp":"2025-01-01T23:00:00Z","http_status":404,"response_time_ms":null}"#,
    "\n",
);

/// Serves `data`, then fails every read instead of reporting end of input.
pub struct FailAfter {
    data: Cursor<Vec<u8>>,
}

impl FailAfter {
    pub fn new(data: &str) -> Self {
        Self {
            data: Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(io::Error::other("device went away"));
        }
        Ok(n)
    }
}
