use std::ops::RangeInclusive;

use serde::Serialize;

pub type BlockHeight = u64;
/// UNIX seconds as reported by the explorer.
pub type BlockTimestamp = i64;

/// Time between two consecutive blocks of the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockDelta {
    pub from_height: BlockHeight,
    pub to_height: BlockHeight,
    pub seconds: i64,
}

/// Inclusive run of heights fetched together before a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub first: BlockHeight,
    pub last: BlockHeight,
}

impl Batch {
    pub fn heights(&self) -> RangeInclusive<BlockHeight> {
        self.first..=self.last
    }

    pub fn size(&self) -> u64 {
        self.last - self.first + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// `None` when there were no deltas to average.
    pub average: Option<f64>,
    pub count_above: usize,
    pub count_below: usize,
    pub threshold_secs: i64,
}
