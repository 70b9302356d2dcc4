pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::{AggregationStrategy, AnalyzerConfig};
pub use error::AnalyzeError;
pub use pipeline::{Analysis, Analyzer, CancelFlag, OutputFormat, Summary};
