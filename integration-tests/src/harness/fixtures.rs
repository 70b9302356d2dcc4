//! Synthetic access log fixtures.
//!
//! Every random draw goes through one `StdRng` seeded by the caller, so the
//! same options and seed always produce the same bytes.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use loganalyzer_core::AnalyzeError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const STATUSES: [u16; 5] = [200, 404, 500, 302, 503];
const STATUS_WEIGHTS: [f64; 5] = [0.85, 0.08, 0.02, 0.03, 0.02];

const MISSING_RESPONSE_PROBABILITY: f64 = 0.02;
const LONG_TAIL_PROBABILITY: f64 = 0.01;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub lines: usize,
    /// First day of the range; today (UTC) when unset.
    pub start: Option<NaiveDate>,
    pub days: u32,
    pub users: u32,
    /// Clock-derived when unset. The seed actually used is returned.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            lines: 1000,
            start: None,
            days: 1,
            users: 100,
            seed: None,
        }
    }
}

#[derive(Serialize)]
struct FixtureRecord {
    timestamp: String,
    user_id: String,
    response_time_ms: Option<f64>,
    http_status: u16,
}

/// Parse a `YYYY-MM-DD` start date.
pub fn parse_start_date(s: &str) -> Result<NaiveDate, AnalyzeError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| AnalyzeError::argument(format!("cannot parse start date '{s}': {e}")))
}

/// Write `options.lines` NDJSON records. Returns the seed used.
pub fn generate<W: Write>(options: &GeneratorOptions, out: W) -> Result<u64, AnalyzeError> {
    if options.days == 0 {
        return Err(AnalyzeError::argument("days must be at least 1"));
    }
    if options.users == 0 {
        return Err(AnalyzeError::argument("users must be at least 1"));
    }

    let seed = options.seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let start_day = options.start.unwrap_or_else(|| Utc::now().date_naive());
    let start = start_day.and_time(NaiveTime::MIN).and_utc().timestamp();
    let span = SECONDS_PER_DAY * i64::from(options.days);

    let mut out = BufWriter::new(out);
    for _ in 0..options.lines {
        let record = next_record(&mut rng, start, span, options.users)?;
        serde_json::to_writer(&mut out, &record).map_err(|e| AnalyzeError::Output(e.into()))?;
        out.write_all(b"\n").map_err(AnalyzeError::Output)?;
    }
    out.flush().map_err(AnalyzeError::Output)?;

    tracing::debug!(lines = options.lines, seed, "fixture generated");
    Ok(seed)
}

pub fn generate_file(options: &GeneratorOptions, path: &Path) -> Result<u64, AnalyzeError> {
    let file = File::create(path).map_err(|e| AnalyzeError::open(path, e))?;
    generate(options, file)
}

/// Path of a checked-in fixture under `fixtures/logs`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("logs")
        .join(name)
}

fn next_record(
    rng: &mut StdRng,
    start: i64,
    span: i64,
    users: u32,
) -> Result<FixtureRecord, AnalyzeError> {
    let secs = start + rng.random_range(0..span);
    let timestamp = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AnalyzeError::argument(format!("timestamp {secs} is out of range")))?
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let http_status = pick_status(rng);

    let response_time_ms = if rng.random::<f64>() < MISSING_RESPONSE_PROBABILITY {
        None
    } else {
        Some(response_ms(rng))
    };

    let user_id = format!("u{:03}", rng.random_range(0..users) + 1);

    Ok(FixtureRecord {
        timestamp,
        user_id,
        response_time_ms,
        http_status,
    })
}

fn pick_status(rng: &mut StdRng) -> u16 {
    let total: f64 = STATUS_WEIGHTS.iter().sum();
    let p = rng.random::<f64>() * total;

    let mut acc = 0.0;
    for (status, weight) in STATUSES.iter().zip(STATUS_WEIGHTS) {
        acc += weight;
        if p <= acc {
            return *status;
        }
    }
    STATUSES[STATUSES.len() - 1]
}

/// Mostly 20-399ms, with a rare long tail of up to three extra seconds.
fn response_ms(rng: &mut StdRng) -> f64 {
    let mut ms = f64::from(rng.random_range(0..380u32) + 20);
    if rng.random::<f64>() < LONG_TAIL_PROBABILITY {
        ms += f64::from(rng.random_range(0..3000u32));
    }
    ms
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
