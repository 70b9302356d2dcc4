mod cli;

use clap::Parser;
use cli::Cli;
use loganalyzer_core::logging::{default_log_format, init_logging};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    if let Err(e) = cli::run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
