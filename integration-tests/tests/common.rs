use integration_tests::harness::{GeneratorOptions, generate_file};
use loganalyzer_core::pipeline::Analysis;
use loganalyzer_core::{AggregationStrategy, Analyzer, AnalyzerConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn analyze_path(path: &Path, workers: i64, strategy: AggregationStrategy) -> Analysis {
    let cfg = AnalyzerConfig::default()
        .with_workers(workers)
        .with_strategy(strategy);
    let mut analyzer = Analyzer::new(cfg).expect("valid config");
    analyzer.analyze_file(path).expect("analysis should succeed")
}

/// Generate a seeded fixture inside a fresh temp dir.
#[allow(dead_code)]
pub fn generated_log(lines: usize, seed: u64) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.log");
    let options = GeneratorOptions {
        lines,
        start: Some(chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        days: 3,
        users: 250,
        seed: Some(seed),
    };
    generate_file(&options, &path).expect("fixture generation");
    (dir, path)
}

#[allow(dead_code)]
pub fn assert_close(a: f64, b: f64) {
    let scale = a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= scale * 1e-9, "{a} != {b}");
}
