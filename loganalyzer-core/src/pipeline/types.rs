use serde::Deserialize;

/// One decoded access log line.
///
/// `user_id` and any other extra fields are accepted and ignored.
///
/// `http_status` is required: a line without it is malformed and skipped,
/// rather than being counted under status `"0"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogRecord {
    /// RFC 3339; a missing field decodes as empty.
    #[serde(default)]
    pub timestamp: String,
    /// `null` and a missing field both mean "not measured".
    #[serde(default)]
    pub response_time_ms: Option<f64>,
    pub http_status: i64,
}

/// A raw line and its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub ordinal: u64,
    pub bytes: Vec<u8>,
}

impl LineItem {
    pub fn new(ordinal: u64, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            ordinal,
            bytes: bytes.into(),
        }
    }
}
