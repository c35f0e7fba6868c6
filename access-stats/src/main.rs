mod analytics;
mod error;
mod fetch;
mod invariants;
mod logging;
mod models;
mod parser;

use std::process::ExitCode;

use analytics::{analyze_browser_popularity, analyze_hourly_hits, analyze_image_hits};
use clap::Parser;
use fetch::fetch_lines;
use parser::parse_records;

#[derive(Parser, Debug)]
#[command(version, about = "Summarises a CSV web-server access log", long_about = None)]
struct Args {
    /// URL to the datafile
    #[arg(long)]
    url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();
    let args = Args::parse();

    match run(&args.url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(url: &str) -> error::Result<()> {
    println!("Running main with URL = {url}...");

    let lines = fetch_lines(url).await?;
    let records = parse_records(&lines)?;

    analyze_image_hits(&records);
    analyze_browser_popularity(&records);
    analyze_hourly_hits(&records);
    Ok(())
}
