use crate::pipeline::constants::HOURS_PER_DAY;

/// Request counts per UTC hour-of-day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl HourHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hours outside 0..24 are ignored.
    pub(crate) fn record(&mut self, hour: usize) {
        if let Some(count) = self.counts.get_mut(hour) {
            *count += 1;
        }
    }

    pub(crate) fn merge_from(&mut self, other: &HourHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += *theirs;
        }
    }

    pub fn counts(&self) -> &[u64; HOURS_PER_DAY] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Lowest hour holding the maximum count, or `None` if every hour is empty.
    pub fn busiest(&self) -> Option<u8> {
        let mut best: Option<(usize, u64)> = None;

        for (hour, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, max)) if count <= max => {}
                _ => best = Some((hour, count)),
            }
        }

        best.map(|(hour, _)| hour as u8)
    }
}
