use crate::error::AnalyzeError;
use crate::pipeline::OutputFormat;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;


pub const DEFAULT_WORKERS: usize = 4;
pub const MAX_WORKERS: usize = 1024;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_MAX_LINE_BYTES: usize = 16 * 1024 * 1024; // 16 MiB

/// How workers fold records into the aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStrategy {
    /// One private aggregate per worker, merged after join.
    #[default]
    Sharded,
    /// A single aggregate behind a mutex.
    Shared,
}

impl FromStr for AggregationStrategy {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sharded" => Ok(Self::Sharded),
            "shared" => Ok(Self::Shared),
            other => Err(AnalyzeError::argument(format!(
                "unknown aggregation strategy '{other}' (expected 'sharded' or 'shared')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Number of worker threads, always >= 1.
    pub workers: usize,
    /// Bounded queue capacity in lines.
    pub queue_capacity: usize,
    /// Longest accepted line, terminator excluded.
    pub max_line_bytes: usize,
    pub strategy: AggregationStrategy,
    pub output: OutputFormat,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            strategy: AggregationStrategy::default(),
            output: OutputFormat::default(),
        }
    }
}

/// Partial settings, as read from a TOML file or the command line.
///
/// Unset fields leave the current value alone, so overrides can be layered:
/// defaults, then the config file, then explicit flags.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub workers: Option<i64>,
    pub queue_capacity: Option<usize>,
    pub max_line_bytes: Option<usize>,
    pub strategy: Option<AggregationStrategy>,
    pub output: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn from_file(path: &Path) -> Result<Self, AnalyzeError> {
        let contents = fs::read_to_string(path).map_err(|e| AnalyzeError::open(path, e))?;
        toml::from_str(&contents).map_err(|source| AnalyzeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AnalyzerConfig {
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(workers) = overrides.workers {
            self.workers = coerce_workers(workers);
        }
        if let Some(capacity) = overrides.queue_capacity {
            self.queue_capacity = capacity;
        }
        if let Some(max) = overrides.max_line_bytes {
            self.max_line_bytes = max;
        }
        if let Some(strategy) = overrides.strategy {
            self.strategy = strategy;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
    }

    pub fn with_workers(mut self, requested: i64) -> Self {
        self.workers = coerce_workers(requested);
        self
    }

    pub fn with_strategy(mut self, strategy: AggregationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if self.workers == 0 {
            return Err(AnalyzeError::argument("workers must be at least 1"));
        }
        if self.workers > MAX_WORKERS {
            return Err(AnalyzeError::argument(format!(
                "workers must be at most {MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        if self.queue_capacity == 0 {
            return Err(AnalyzeError::argument("queue_capacity must be at least 1"));
        }
        if self.max_line_bytes == 0 {
            return Err(AnalyzeError::argument("max_line_bytes must be at least 1"));
        }
        Ok(())
    }
}

/// Non-positive worker counts fall back to a single worker.
pub fn coerce_workers(requested: i64) -> usize {
    if requested <= 0 {
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}
