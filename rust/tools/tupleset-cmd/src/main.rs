use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "tupleset-cmd")]
#[command(about = "Command-line utility for inspecting and paging partitioned query results")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the subsets of a result document and their sizes
    Inspect {
        /// Also show the fair-share quota of each subset for this row budget
        #[arg(short, long)]
        limit: Option<usize>,

        /// Path to the JSON result document
        file: String,
    },

    /// Reduce a result document to at most `limit` rows, keeping every
    /// subset fairly represented
    Reduce {
        /// Maximum number of rows in the reduced result
        #[arg(short, long)]
        limit: usize,

        /// Output file for the reduced result (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Path to the JSON result document
        file: String,
    },

    /// Print a page of rows together with the subset each row comes from
    Page {
        /// Number of rows to skip (counted from the end with --reverse)
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of rows to print
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Walk the result backwards
        #[arg(long)]
        reverse: bool,

        /// Path to the JSON result document
        file: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { limit, file } => commands::inspect::run(cli.verbose, limit, file),
        Commands::Reduce {
            limit,
            output,
            file,
        } => commands::reduce::run(limit, output, file),
        Commands::Page {
            offset,
            count,
            reverse,
            file,
        } => commands::page::run(offset, count, reverse, file),
    }
}
