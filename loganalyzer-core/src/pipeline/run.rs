use crate::config::{AggregationStrategy, AnalyzerConfig};
use crate::error::AnalyzeError;
use crate::pipeline::aggregate::{AggregateState, merge};
use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::constants::READ_BUFFER_CAPACITY;
use crate::pipeline::queue::{LineQueue, line_queue};
use crate::pipeline::source::LineSource;
use crate::pipeline::summary::Summary;
use crate::pipeline::worker::{Fold, WorkerTally, work};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    /// Source, queue and workers all running.
    Streaming,
    /// Input is closed; waiting for workers to empty the queue and join.
    Draining,
    Merging,
    Reporting,
    Done,
    Failed,
}

/// Counters reported next to the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Non-empty lines handed to the workers.
    pub lines_read: u64,
    pub records: u64,
    pub malformed_lines: u64,
    /// Records without a usable timestamp.
    pub untimed_records: u64,
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: Summary,
    pub stats: RunStats,
}

/// Runs one input through the pipeline.
pub struct Analyzer {
    config: AnalyzerConfig,
    cancel: CancelFlag,
    phase: RunPhase,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzeError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelFlag::new(),
            phase: RunPhase::Idle,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Setting the returned flag stops the run at the next line.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn analyze_file(&mut self, path: &Path) -> Result<Analysis, AnalyzeError> {
        let file = File::open(path).map_err(|e| AnalyzeError::open(path, e))?;
        tracing::info!(
            path = %path.display(),
            workers = self.config.workers,
            strategy = ?self.config.strategy,
            "analyzing access log"
        );
        self.analyze_reader(BufReader::with_capacity(READ_BUFFER_CAPACITY, file))
    }

    pub fn analyze_reader<R: BufRead>(&mut self, reader: R) -> Result<Analysis, AnalyzeError> {
        let result = self.run(reader);
        if result.is_err() {
            self.transition(RunPhase::Failed);
        }
        result
    }

    fn run<R: BufRead>(&mut self, reader: R) -> Result<Analysis, AnalyzeError> {
        let workers = self.config.workers;
        let strategy = self.config.strategy;
        let mut source =
            LineSource::new(reader, self.config.max_line_bytes).with_cancel(self.cancel.clone());
        let (queue, lines) = line_queue(self.config.queue_capacity);
        let shared = Mutex::new(AggregateState::new());

        self.transition(RunPhase::Streaming);

        let (streamed, joined) = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;
            for worker in 0..workers {
                let lines = lines.clone();
                let mut fold = match strategy {
                    AggregationStrategy::Sharded => Fold::Sharded(AggregateState::new()),
                    AggregationStrategy::Shared => Fold::Shared(&shared),
                };
                let spawned = thread::Builder::new()
                    .name(format!("loganalyzer-worker-{worker}"))
                    .spawn_scoped(scope, move || {
                        let tally = work(worker, lines, &mut fold);
                        (fold.into_shard(), tally)
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        spawn_error = Some(AnalyzeError::Spawn { worker, source });
                        break;
                    }
                }
            }
            drop(lines);

            // The queue is moved in and dropped on return, which closes it
            // whether streaming finished or failed. Workers that did start
            // see it closed and exit.
            let streamed = match spawn_error {
                Some(err) => {
                    drop(queue);
                    Err(err)
                }
                None => stream(&mut source, queue),
            };
            self.transition(RunPhase::Draining);

            let joined: Vec<_> = handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle
                        .join()
                        .map_err(|_| AnalyzeError::WorkerPanicked { worker })
                })
                .collect();

            (streamed, joined)
        });

        let lines_read = streamed?;

        let mut shards = Vec::with_capacity(workers);
        let mut tally = WorkerTally::default();
        for result in joined {
            let (shard, worker_tally) = result?;
            shards.extend(shard);
            tally.merge_from(&worker_tally);
        }

        self.transition(RunPhase::Merging);
        let state = match strategy {
            AggregationStrategy::Sharded => merge(shards),
            AggregationStrategy::Shared => {
                shared.into_inner().unwrap_or_else(PoisonError::into_inner)
            }
        };

        self.transition(RunPhase::Reporting);
        let summary = Summary::from_state(&state);
        let stats = RunStats {
            lines_read,
            records: tally.records,
            malformed_lines: tally.malformed,
            untimed_records: tally.untimed,
            workers,
        };

        tracing::info!(
            lines = stats.lines_read,
            requests = summary.total_requests,
            malformed = stats.malformed_lines,
            untimed = stats.untimed_records,
            "analysis complete"
        );

        self.transition(RunPhase::Done);
        Ok(Analysis { summary, stats })
    }

    fn transition(&mut self, next: RunPhase) {
        tracing::debug!(from = ?self.phase, to = ?next, "run phase");
        self.phase = next;
    }
}

/// Feed every line into the queue. Blocks whenever the queue is full.
fn stream<R: BufRead>(source: &mut LineSource<R>, queue: LineQueue) -> Result<u64, AnalyzeError> {
    let mut sent = 0;

    for line in source {
        let line = line?;
        if queue.push(line).is_err() {
            // Every worker is gone; joining them reports why.
            break;
        }
        sent += 1;
    }

    Ok(sent)
}
