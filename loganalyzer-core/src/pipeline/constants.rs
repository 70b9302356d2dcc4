pub const HOURS_PER_DAY: usize = 24;

/// Initial read buffer; it grows up to the configured line limit.
pub const READ_BUFFER_CAPACITY: usize = 64 * 1024;
