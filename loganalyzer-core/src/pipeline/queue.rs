use crate::pipeline::types::LineItem;
use crossbeam_channel::{Receiver, SendError, Sender, bounded};

/// Producer half of the bounded line queue.
///
/// `push` blocks while the queue holds `capacity` lines. Dropping the last
/// `LineQueue` closes the queue; receivers still drain what is buffered.
pub struct LineQueue {
    tx: Sender<LineItem>,
}

/// Consumer half. Cloning gives another consumer on the same queue.
#[derive(Clone)]
pub struct LineReceiver {
    rx: Receiver<LineItem>,
}

pub fn line_queue(capacity: usize) -> (LineQueue, LineReceiver) {
    let (tx, rx) = bounded(capacity);
    (LineQueue { tx }, LineReceiver { rx })
}

impl LineQueue {
    /// Fails only when every receiver is gone, handing the line back.
    pub fn push(&self, line: LineItem) -> Result<(), LineItem> {
        self.tx.send(line).map_err(|SendError(line)| line)
    }

    pub fn close(self) {
        drop(self);
    }

    pub fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(usize::MAX)
    }
}

impl LineReceiver {
    /// Blocks until a line is available. `None` once closed and drained.
    pub fn pop(&self) -> Option<LineItem> {
        self.rx.recv().ok()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Iterator for LineReceiver {
    type Item = LineItem;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }
}
