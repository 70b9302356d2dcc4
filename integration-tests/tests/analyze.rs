mod common;

use common::{analyze_path, assert_close, generated_log};
use integration_tests::harness::fixture_path;
use loganalyzer_core::AggregationStrategy;
use loganalyzer_core::pipeline::{OutputFormat, render_summary};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;

const STRATEGIES: [AggregationStrategy; 2] =
    [AggregationStrategy::Sharded, AggregationStrategy::Shared];

#[test]
fn example_fixture_matches_documented_output() {
    let analysis = analyze_path(&fixture_path("example.ndjson"), 4, AggregationStrategy::Sharded);

    assert_eq!(
        render_summary(&analysis.summary, OutputFormat::Compact).unwrap(),
        r#"{"total_requests":3,"average_response_time_ms":100.0,"status_code_counts":{"200":2,"404":1},"busiest_hour":10}"#
    );
}

#[test]
fn mixed_fixture_skips_bad_lines_and_keeps_counting() {
    for workers in [1, 2, 8] {
        for strategy in STRATEGIES {
            let analysis = analyze_path(&fixture_path("mixed.ndjson"), workers, strategy);
            let summary = &analysis.summary;

            assert_eq!(summary.total_requests, 7);
            assert_eq!(summary.average_response_time_ms, 150.0);
            assert_eq!(summary.status_code_counts.get("200"), Some(&3));
            assert_eq!(summary.status_code_counts.get("302"), Some(&1));
            assert_eq!(summary.status_code_counts.get("404"), Some(&1));
            assert_eq!(summary.status_code_counts.get("500"), Some(&1));
            assert_eq!(summary.status_code_counts.get("503"), Some(&1));
            assert_eq!(summary.busiest_hour, Some(8));

            assert_eq!(analysis.stats.lines_read, 9);
            assert_eq!(analysis.stats.malformed_lines, 2);
            assert_eq!(analysis.stats.untimed_records, 2);
        }
    }
}

#[test]
fn generated_log_counts_every_line_at_any_worker_count() {
    let (_dir, path) = generated_log(20_000, 42);
    let baseline = analyze_path(&path, 1, AggregationStrategy::Sharded).summary;

    assert_eq!(baseline.total_requests, 20_000);
    assert_eq!(
        baseline.status_code_counts.values().sum::<u64>(),
        baseline.total_requests
    );
    assert!(baseline.busiest_hour.is_some());

    for workers in [1, 2, 8] {
        for strategy in STRATEGIES {
            let summary = analyze_path(&path, workers, strategy).summary;

            assert_eq!(summary.total_requests, baseline.total_requests);
            assert_eq!(summary.status_code_counts, baseline.status_code_counts);
            assert_eq!(summary.busiest_hour, baseline.busiest_hour);
            assert_close(
                summary.average_response_time_ms,
                baseline.average_response_time_ms,
            );
        }
    }
}

#[test]
fn average_matches_independent_computation() {
    let (_dir, path) = generated_log(5_000, 7);

    let mut sum = 0.0;
    let mut count = 0u64;
    for line in fs::read_to_string(&path).unwrap().lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        if let Some(ms) = value["response_time_ms"].as_f64() {
            sum += ms;
            count += 1;
        }
    }

    let summary = analyze_path(&path, 4, AggregationStrategy::Sharded).summary;
    assert_close(summary.average_response_time_ms, sum / count as f64);
}

#[test]
fn malformed_lines_reduce_the_total_by_exactly_their_number() {
    let (dir, clean) = generated_log(3_000, 99);
    let dirty = dir.path().join("dirty.log");

    let mut out = fs::File::create(&dirty).unwrap();
    let mut malformed = 0;
    for (i, line) in fs::read_to_string(&clean).unwrap().lines().enumerate() {
        writeln!(out, "{line}").unwrap();
        if i % 97 == 0 {
            writeln!(out, "{{\"timestamp\":").unwrap();
            malformed += 1;
        }
        if i % 211 == 0 {
            writeln!(out, "<html>oops</html>").unwrap();
            malformed += 1;
        }
    }
    drop(out);

    for workers in [1, 8] {
        let analysis = analyze_path(&dirty, workers, AggregationStrategy::Sharded);
        assert_eq!(analysis.summary.total_requests, 3_000);
        assert_eq!(analysis.stats.malformed_lines, malformed);
        assert_eq!(analysis.stats.lines_read, 3_000 + malformed);
    }
}

#[test]
fn running_twice_gives_the_same_answer() {
    let (_dir, path) = generated_log(8_000, 2024);

    let first = analyze_path(&path, 8, AggregationStrategy::Sharded).summary;
    let second = analyze_path(&path, 8, AggregationStrategy::Sharded).summary;

    assert_eq!(first.total_requests, second.total_requests);
    assert_eq!(first.status_code_counts, second.status_code_counts);
    assert_eq!(first.busiest_hour, second.busiest_hour);
    assert_close(
        first.average_response_time_ms,
        second.average_response_time_ms,
    );
}
