mod args;
mod generator;
mod server;

use std::process::ExitCode;

use args::CliArgs;
use chrono::Local;
use clap::Parser;
use generator::LogSpec;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let spec = LogSpec {
        rows: *args.rows(),
        seed: *args.seed(),
        bad_timestamp_percent: *args.bad_timestamp_percent(),
        date: (*args.date()).unwrap_or_else(|| Local::now().date_naive()),
    };

    match args.port() {
        Some(port) => {
            if let Err(e) = server::serve(spec, *port).await {
                eprintln!("HTTP server error: {e}");
                return ExitCode::FAILURE;
            }
        }
        None => print!("{}", spec.render()),
    }
    ExitCode::SUCCESS
}
