use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use nba_leaders::collector;
use nba_leaders::config::Config;
use nba_leaders::dataset;
use nba_leaders::leader_rankings::LeaderReport;
use nba_leaders::report;
use nba_leaders::scoreboard_fetch::ScoreboardClient;

#[derive(Parser)]
#[command(name = "nba_leaders")]
#[command(about = "Collect NBA scoreboard leaders into a CSV and rank players by leader appearances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the scoreboard and append one row per game to the raw dataset
    Collect {
        /// Number of fetch cycles (the first runs immediately)
        #[arg(short = 'n', long)]
        runs: Option<usize>,

        /// Seconds between fetch cycles
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Raw dataset CSV
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Scoreboard endpoint
        #[arg(long)]
        url: Option<String>,

        /// HTTP request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Remove duplicate (event_id, collection_timestamp) rows
    Clean {
        /// Raw dataset CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Cleaned dataset CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clean the raw dataset and print the top scorers, rebounders and assist providers
    Report {
        /// Raw dataset CSV (or the cleaned one with --skip-clean)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Cleaned dataset CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows shown per category
        #[arg(long, default_value_t = report::DEFAULT_TOP)]
        top: usize,

        /// Read the input as already cleaned
        #[arg(long)]
        skip_clean: bool,

        /// Also export the full rankings to an .xlsx workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Collect {
            runs,
            interval_secs,
            dataset,
            url,
            timeout_secs,
        } => {
            let runs = runs.unwrap_or(config.runs).max(1);
            let interval = interval_secs
                .map(Duration::from_secs)
                .unwrap_or(config.poll_interval);
            let dataset = dataset.unwrap_or(config.raw_dataset);
            let timeout = timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(config.request_timeout);
            let source = ScoreboardClient::new(url.unwrap_or(config.scoreboard_url), timeout)?;

            let summaries =
                collector::run_schedule(&source, &dataset, runs, interval, std::thread::sleep)?;
            let rows: usize = summaries.iter().map(|s| s.rows).sum();
            println!(
                "Collected {rows} rows over {} runs into {}",
                summaries.len(),
                dataset.display()
            );
        }
        Commands::Clean { input, output } => {
            let input = input.unwrap_or(config.raw_dataset);
            let output = output.unwrap_or(config.clean_dataset);
            let (_, summary) = dataset::dedup_file(&input, &output)
                .with_context(|| format!("failed cleaning {}", input.display()))?;
            println!(
                "Duplicates removed: {} ({} -> {} rows). Cleaned data saved to {}",
                summary.removed,
                summary.rows_in,
                summary.rows_out,
                output.display()
            );
        }
        Commands::Report {
            input,
            output,
            top,
            skip_clean,
            xlsx,
        } => {
            let rows = if skip_clean {
                let input = input.unwrap_or(config.clean_dataset);
                dataset::load_rows(&input)?
            } else {
                let input = input.unwrap_or(config.raw_dataset);
                let output = output.unwrap_or(config.clean_dataset);
                dataset::dedup_file(&input, &output)?.0
            };

            let leader_report = LeaderReport::from_rows(&rows);
            println!("{}", report::format_report(&leader_report, top));
            if let Some(path) = xlsx {
                report::export_rankings_xlsx(&path, &leader_report)?;
            }
        }
    }

    Ok(())
}
