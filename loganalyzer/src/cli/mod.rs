use anyhow::{Context, Result};
use clap::Parser;
use loganalyzer_core::config::ConfigOverrides;
use loganalyzer_core::logging::LogFormat;
use loganalyzer_core::pipeline::write_summary;
use loganalyzer_core::{AggregationStrategy, Analyzer, AnalyzerConfig, OutputFormat};
use std::io;
use std::path::PathBuf;


#[derive(Parser, Debug)]
#[command(
    name = "loganalyzer",
    version,
    about = "Analyze newline-delimited JSON access logs and print metrics as JSON"
)]
pub struct Cli {
    /// Path to the access log
    pub path: PathBuf,

    /// Number of worker threads parsing lines (values <= 0 mean 1) [default: 4]
    #[arg(short, long, allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// How workers combine results: sharded or shared
    #[arg(long)]
    pub strategy: Option<AggregationStrategy>,

    /// Lines buffered between the reader and the workers [default: 1024]
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Longest accepted line in bytes [default: 16 MiB]
    #[arg(long)]
    pub max_line_bytes: Option<usize>,

    /// Print the summary on a single line
    #[arg(long)]
    pub compact: bool,

    /// TOML file with default settings; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Diagnostics format on stderr: json or pretty
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            max_line_bytes: self.max_line_bytes,
            strategy: self.strategy,
            output: self.compact.then_some(OutputFormat::Compact),
        }
    }
}

/// Defaults, then the config file, then explicit flags.
pub fn build_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::default();
    if let Some(path) = &cli.config {
        config.apply(&ConfigOverrides::from_file(path)?);
    }
    config.apply(&cli.overrides());
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let mut analyzer = Analyzer::new(build_config(&cli)?)?;

    let cancel = analyzer.cancel_flag();
    ctrlc::set_handler(move || {
        tracing::warn!("interrupt received, stopping input");
        cancel.cancel();
    })
    .context("failed to install interrupt handler")?;

    let analysis = analyzer.analyze_file(&cli.path)?;

    write_summary(io::stdout().lock(), &analysis.summary, analyzer.config().output)?;
    Ok(())
}
