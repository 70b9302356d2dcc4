use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these ends the run with a non-zero outcome.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    // IO
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input after line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write summary: {0}")]
    Output(#[source] std::io::Error),

    // Input shape
    #[error("line {line} exceeds the maximum line length of {max} bytes")]
    LineTooLong { line: u64, max: usize },

    // Arguments / configuration
    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("failed to parse config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Run control
    #[error("analysis cancelled")]
    Cancelled,

    #[error("failed to start worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

impl AnalyzeError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// True for failures to open, read, or write a file.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read { .. } | Self::Output(_))
    }
}
