use crate::error::AnalyzeError;
use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::constants::READ_BUFFER_CAPACITY;
use crate::pipeline::types::LineItem;
use std::io::{BufRead, Read};

/// Lazily yields the non-empty lines of a reader.
///
/// The internal buffer is reused between reads, so every yielded line is an
/// owned copy. At most `max_line_bytes + 2` bytes (room for `\r\n`) are
/// buffered per line; anything longer is a `LineTooLong` error.
///
/// The iterator is fused: after the first error it only returns `None`.
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    max_line_bytes: usize,
    ordinal: u64,
    cancel: Option<CancelFlag>,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(READ_BUFFER_CAPACITY.min(max_line_bytes.saturating_add(2))),
            max_line_bytes,
            ordinal: 0,
            cancel: None,
            done: false,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Physical lines consumed so far, empty ones included.
    pub fn lines_consumed(&self) -> u64 {
        self.ordinal
    }

    fn next_line(&mut self) -> Result<Option<LineItem>, AnalyzeError> {
        let limit = (self.max_line_bytes as u64).saturating_add(2);

        loop {
            if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                return Err(AnalyzeError::Cancelled);
            }

            self.buf.clear();
            let n = self
                .reader
                .by_ref()
                .take(limit)
                .read_until(b'\n', &mut self.buf)
                .map_err(|source| AnalyzeError::Read {
                    line: self.ordinal,
                    source,
                })?;

            if n == 0 {
                return Ok(None);
            }
            self.ordinal += 1;

            let terminated = self.buf.last() == Some(&b'\n');
            if !terminated && n as u64 == limit {
                return Err(self.too_long());
            }

            if terminated {
                self.buf.pop();
            }
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }

            if self.buf.len() > self.max_line_bytes {
                return Err(self.too_long());
            }
            if self.buf.is_empty() {
                continue;
            }

            return Ok(Some(LineItem::new(self.ordinal, self.buf.as_slice())));
        }
    }

    fn too_long(&self) -> AnalyzeError {
        AnalyzeError::LineTooLong {
            line: self.ordinal,
            max: self.max_line_bytes,
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<LineItem, AnalyzeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
