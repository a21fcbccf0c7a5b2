//! Command-line interface definitions for Malawi News.
//!
//! Each pipeline stage is its own subcommand so a stage can be re-run on
//! the files left behind by the previous one. `run` chains the scraping and
//! analysis stages for every selected source.

use crate::models::{Category, SentimentLabel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the Malawi News application.
///
/// # Examples
///
/// ```sh
/// # Scrape, fetch and annotate both sites
/// malawi_news run
///
/// # Re-annotate one file
/// malawi_news analyze --input data/times_articles.csv --output /tmp/out.csv
///
/// # Dashboard of negative politics stories
/// malawi_news report --category politics --sentiment negative
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, global = true, env = "MALAWI_NEWS_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index the latest headlines of each source
    Headlines(SourceArgs),
    /// Fetch article bodies for previously indexed headlines
    Articles(SourceArgs),
    /// Categorise and score an article table
    Analyze(AnalyzeArgs),
    /// Render the dashboard as Markdown and JSON
    Report(ReportArgs),
    /// Print category counts and spot-check titles
    Check(CheckArgs),
    /// Headlines, articles and analysis for each source in one go
    Run(SourceArgs),
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source slug or name, or `all`
    #[arg(short, long, default_value = "all")]
    pub source: String,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Article CSV to annotate instead of the per-source files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where to write the annotated CSV (defaults next to the input)
    #[arg(short, long, requires = "input")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Article CSVs to load (defaults to every source's annotated file)
    #[arg(short, long)]
    pub input: Vec<PathBuf>,

    /// Only show articles from this publisher
    #[arg(long)]
    pub publisher: Option<String>,

    /// Only show articles in this category
    #[arg(long)]
    pub category: Option<Category>,

    /// Only show articles with this sentiment label
    #[arg(long)]
    pub sentiment: Option<SentimentLabel>,

    /// Markdown output path (defaults to `<reports_dir>/dashboard.md`)
    #[arg(short, long)]
    pub markdown: Option<PathBuf>,

    /// JSON output path (defaults to `<reports_dir>/dashboard.json`)
    #[arg(short, long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Annotated CSV to check (defaults to the selected source's file)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Source whose annotated file is checked when no input is given
    #[arg(short, long, default_value = "times")]
    pub source: String,

    /// Case-insensitive phrase to look for in titles
    #[arg(short, long, default_value = "Sports Arena")]
    pub needle: String,
}
