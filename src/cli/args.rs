use crate::reports::ReportKind;
use crate::writers::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flight-performance")]
#[command(about = "Airline on-time and delay reports from flight records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and errors, hide progress"
    )]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Where the input tables live. Flags override the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    #[arg(short, long, help = "Directory holding airlines.csv, airports.csv and flights.csv")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Worker threads [default: number of CPUs]")]
    pub max_workers: Option<usize>,

    #[arg(long, help = "Fail on the first malformed record instead of skipping it")]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute reports and write one table per report
    Run {
        #[command(flatten)]
        data: DataArgs,

        #[arg(
            short,
            long,
            help = "Output directory [default: output/flight-reports-{YYMMDD}]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(short, long, help = "Output format: parquet or csv")]
        format: Option<OutputFormat>,

        #[arg(short, long, help = "Parquet compression: snappy, gzip, lz4, zstd, none")]
        compression: Option<String>,

        #[arg(
            short,
            long = "report",
            help = "Only compute this report (repeatable) [default: all]"
        )]
        reports: Vec<ReportKind>,

        #[arg(long, help = "Fail instead of replacing existing tables")]
        no_overwrite: bool,
    },

    /// Compute a single report and print it
    Report {
        #[arg(help = "Report name, e.g. on-time or unique-routes")]
        kind: ReportKind,

        #[command(flatten)]
        data: DataArgs,

        #[arg(long, help = "Print rows as JSON")]
        json: bool,

        #[arg(short, long, help = "Print at most this many rows")]
        limit: Option<usize>,
    },

    /// Load the input tables and print an integrity report
    Validate {
        #[command(flatten)]
        data: DataArgs,
    },
}
