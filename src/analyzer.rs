use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::explorer::BlockTimeSource;
use crate::fetch_stats::{FetchSnapshot, FetchStats};
use crate::models::{Batch, BlockDelta, BlockHeight, BlockTimestamp, Summary};
use crate::summary::summarize;

/// Split `[start, end]` into contiguous inclusive batches of at most `batch_size` heights.
pub fn plan_batches(start: BlockHeight, end: BlockHeight, batch_size: u64) -> Vec<Batch> {
    let mut batches = Vec::new();
    if end < start {
        return batches;
    }

    let span = batch_size.max(1) - 1;
    let mut first = start;
    loop {
        let last = first.saturating_add(span).min(end);
        batches.push(Batch { first, last });
        if last == end {
            break;
        }
        first = last + 1;
    }
    batches
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Cursor {
    #[default]
    Absent,
    Holding {
        height: BlockHeight,
        timestamp: BlockTimestamp,
    },
}

/// Turns a stream of per-height fetch results into deltas.
///
/// The cursor is reset at every batch start, so heights on either side of
/// a batch boundary never form a pair. A failed fetch also clears the
/// cursor, so no delta is ever computed across a missing block.
#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    cursor: Cursor,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cursor = Cursor::Absent;
    }

    pub fn observe(
        &mut self,
        height: BlockHeight,
        timestamp: Option<BlockTimestamp>,
    ) -> Option<BlockDelta> {
        let delta = match (self.cursor, timestamp) {
            (
                Cursor::Holding {
                    height: prev_height,
                    timestamp: prev_time,
                },
                Some(time),
            ) => Some(BlockDelta {
                from_height: prev_height,
                to_height: height,
                seconds: time.saturating_sub(prev_time),
            }),
            _ => None,
        };

        self.cursor = match timestamp {
            Some(timestamp) => Cursor::Holding { height, timestamp },
            None => Cursor::Absent,
        };
        delta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub deltas: Vec<BlockDelta>,
    pub summary: Summary,
    pub fetch: FetchSnapshot,
}

pub struct BlockGapAnalyzer<S> {
    source: S,
    config: AnalyzerConfig,
}

impl<S: BlockTimeSource> BlockGapAnalyzer<S> {
    pub fn new(source: S, config: AnalyzerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn batches(&self) -> Vec<Batch> {
        plan_batches(
            self.config.start_height,
            self.config.end_height,
            self.config.batch_size,
        )
    }

    /// Fetch every height in the configured range and return the deltas
    /// in increasing height order.
    pub async fn compute_deltas(&self) -> Vec<BlockDelta> {
        self.compute_deltas_with(&FetchStats::new()).await
    }

    pub async fn run(&self) -> Analysis {
        let stats = FetchStats::new();
        let deltas = self.compute_deltas_with(&stats).await;

        let seconds: Vec<i64> = deltas.iter().map(|d| d.seconds).collect();
        let summary = summarize(&seconds, self.config.threshold_secs);
        let fetch = stats.snapshot();

        info!(
            batches = fetch.batches,
            fetched = fetch.fetched,
            failed = fetch.failed,
            deltas = deltas.len(),
            "block gap analysis complete"
        );

        Analysis {
            deltas,
            summary,
            fetch,
        }
    }

    async fn compute_deltas_with(&self, stats: &FetchStats) -> Vec<BlockDelta> {
        let pause = self.config.pause;
        let mut deltas = Vec::new();
        let mut accumulator = DeltaAccumulator::new();

        for (idx, batch) in self.batches().into_iter().enumerate() {
            if idx > 0 && !pause.is_zero() {
                info!("pausing for {:.1}s before next batch", pause.as_secs_f64());
                tokio::time::sleep(pause).await;
            }

            accumulator.reset();
            stats.inc_batches(1);
            debug!(
                first = batch.first,
                last = batch.last,
                size = batch.size(),
                "processing batch"
            );

            for height in batch.heights() {
                let timestamp = self.source.fetch_timestamp(height).await;
                stats.record_fetch(timestamp.is_some());
                if let Some(delta) = accumulator.observe(height, timestamp) {
                    deltas.push(delta);
                }
            }
        }

        deltas
    }
}
