use chrono::NaiveDate;
use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Generate fake CSV access logs for testing", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// Fixed seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    bad_timestamp_percent: u8,

    /// Day the timestamps fall on (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Serve the log over HTTP on this port instead of printing it
    #[arg(long)]
    port: Option<u16>,
}
