pub mod fixtures;
pub mod tracing;

pub use fixtures::{GeneratorOptions, fixture_path, generate, generate_file, parse_start_date};
pub use self::tracing::{CapturedEvent, captured_events, init_test_tracing};
