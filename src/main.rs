//! # Malawi News
//!
//! Scrapes headlines and article bodies from Malawian news sites, tags every
//! article with a coarse topic and a sentiment score, and renders a
//! filterable dashboard report.
//!
//! ## Usage
//!
//! ```sh
//! malawi_news run
//! malawi_news report --category sports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Collect headline links from each source's feed or homepage
//! 2. **Fetching**: Download each article and extract its body text
//! 3. **Analysis**: Categorise by keyword and score sentiment with a lexicon
//! 4. **Output**: Write annotated CSVs, then Markdown and JSON dashboards
//!
//! Each stage reads the files written by the one before it, so any stage can
//! be re-run on its own.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod categorise;
mod cli;
mod config;
mod dashboard;
mod extract;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod sentiment;
mod table;
mod utils;

use cli::{AnalyzeArgs, CheckArgs, Cli, Command, ReportArgs, SourceArgs};
use config::AppConfig;
use dashboard::{Dashboard, DashboardFilter};
use fetch::http_with_retries;
use outputs::check::CategoryCheck;
use outputs::{json, markdown};
use sentiment::LexiconScorer;
use table::ArticleTable;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("malawi_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = load(args.config.as_deref())?;

    let result = match args.command {
        Command::Headlines(a) => headlines(&config, &a).await.map(|_| ()),
        Command::Articles(a) => articles(&config, &a).await.map(|_| ()),
        Command::Analyze(a) => analyze(&config, &a).map(|_| ()),
        Command::Report(a) => report(&config, &a).await,
        Command::Check(a) => check(&config, &a),
        Command::Run(a) => run(&config, &a).await,
    };
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    result
}

fn load(path: Option<&str>) -> Result<AppConfig, Box<dyn Error>> {
    config::load_config(path).inspect_err(|e| {
        error!(path = ?path, error = %e, "Failed to load configuration");
    })
}

fn build_scorer(config: &AppConfig) -> LexiconScorer {
    let scorer = config.scorer();
    if scorer.is_empty() {
        warn!("Sentiment lexicon is empty; every article will score neutral");
    }
    info!(
        words = scorer.len(),
        overrides = config.lexicon.len(),
        "Sentiment lexicon ready"
    );
    scorer
}

/// Index headlines for every selected source. Returns the total written.
#[instrument(level = "info", skip_all, fields(source = %args.source))]
async fn headlines(config: &AppConfig, args: &SourceArgs) -> Result<usize, Box<dyn Error>> {
    let sources = config.select_sources(&args.source)?;
    ensure_writable_dir(&config.data_dir).await?;
    let fetcher = http_with_retries(&config.http)?;

    let mut total = 0;
    for source in sources {
        let found = scrapers::index_headlines(source, &fetcher).await?;
        let path = config.headlines_path(source);
        table::write_headlines(&path, &found)?;
        info!(source = %source.name, count = found.len(), path = %path.display(), "Saved headlines");
        total += found.len();
    }
    Ok(total)
}

/// Fetch article bodies for every selected source's headlines. Returns the
/// total number of articles written.
#[instrument(level = "info", skip_all, fields(source = %args.source))]
async fn articles(config: &AppConfig, args: &SourceArgs) -> Result<usize, Box<dyn Error>> {
    let sources = config.select_sources(&args.source)?;
    ensure_writable_dir(&config.data_dir).await?;
    let fetcher = http_with_retries(&config.http)?;
    let delay = Duration::from_millis(config.http.delay_ms);

    let mut total = 0;
    for source in sources {
        let found = table::read_headlines(&config.headlines_path(source))?;
        if found.is_empty() {
            warn!(source = %source.name, "No headlines to fetch");
        }
        let records = scrapers::build_articles(&found, &fetcher, delay).await;
        let count = records.len();
        let path = config.articles_path(source);
        ArticleTable::from_records(records).write_path(&path)?;
        info!(source = %source.name, count, path = %path.display(), "Saved articles");
        total += count;
    }
    Ok(total)
}

/// Annotate either an explicit input file or every selected source's
/// article table. Returns the number of annotated rows.
fn analyze(config: &AppConfig, args: &AnalyzeArgs) -> Result<usize, Box<dyn Error>> {
    let scorer = build_scorer(config);

    if let Some(input) = &args.input {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| annotated_sibling(input));
        return pipeline::analyze_file(input, &output, &scorer);
    }

    let mut total = 0;
    for source in config.select_sources(&args.sources.source)? {
        total += pipeline::analyze_file(
            &config.articles_path(source),
            &config.annotated_path(source),
            &scorer,
        )?;
    }
    Ok(total)
}

/// `articles.csv` -> `articles_with_sentiment.csv` in the same directory.
fn annotated_sibling(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "articles".to_string());
    input.with_file_name(format!("{stem}_with_sentiment.csv"))
}

/// Load every input table, annotating rows that lack labels.
fn load_records(
    config: &AppConfig,
    inputs: &[PathBuf],
) -> Result<Vec<models::ArticleRecord>, Box<dyn Error>> {
    let scorer = build_scorer(config);
    let mut records = Vec::new();

    if inputs.is_empty() {
        for source in &config.sources {
            let path = config.annotated_path(source);
            if !path.exists() {
                warn!(path = %path.display(), "Annotated file not found; skipping");
                continue;
            }
            records.extend(ArticleTable::read_path(&path)?.records);
        }
    } else {
        for path in inputs {
            records.extend(ArticleTable::read_path(path)?.records);
        }
    }

    Ok(pipeline::ensure_annotated(records, &scorer))
}

/// Build the dashboard and write it as Markdown and JSON.
#[instrument(level = "info", skip_all)]
async fn report(config: &AppConfig, args: &ReportArgs) -> Result<(), Box<dyn Error>> {
    let records = load_records(config, &args.input)?;
    if records.is_empty() {
        warn!("No articles loaded; the dashboard will be empty");
    }

    let filter = DashboardFilter {
        source: args.publisher.clone(),
        category: args.category,
        sentiment: args.sentiment,
    };
    let dashboard = Dashboard::build(&records, &filter);
    info!(
        total = dashboard.total_articles,
        shown = dashboard.filtered_articles,
        "Dashboard built"
    );

    let generated_at = Local::now().to_rfc3339();
    let md_path = args
        .markdown
        .clone()
        .unwrap_or_else(|| config.reports_dir.join("dashboard.md"));
    let json_path = args
        .json
        .clone()
        .unwrap_or_else(|| config.reports_dir.join("dashboard.json"));

    if args.markdown.is_none() || args.json.is_none() {
        ensure_writable_dir(&config.reports_dir).await?;
    }

    if let Err(e) = json::write_dashboard(&dashboard, &generated_at, &json_path).await {
        error!(path = %json_path.display(), error = %e, "Failed to write JSON dashboard");
        return Err(e);
    }

    let md = markdown::dashboard_to_markdown(&dashboard, &generated_at);
    utils::ensure_parent_dir(&md_path)?;
    if let Err(e) = tokio::fs::write(&md_path, md).await {
        error!(path = %md_path.display(), error = %e, "Failed writing Markdown");
        return Err(e.into());
    }
    info!(path = %md_path.display(), "Wrote Markdown dashboard");
    Ok(())
}

/// Print category counts and titles containing the needle.
fn check(config: &AppConfig, args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let input = match &args.input {
        Some(path) => path.clone(),
        None => {
            let sources = config.select_sources(&args.source)?;
            match sources.first() {
                Some(source) => config.annotated_path(source),
                None => return Err("no sources configured".into()),
            }
        }
    };

    let records = load_records(config, std::slice::from_ref(&input))?;
    print!("{}", CategoryCheck::build(&records, &args.needle).render());
    Ok(())
}

/// Headlines, articles and annotation for each selected source.
#[instrument(level = "info", skip_all, fields(source = %args.source))]
async fn run(config: &AppConfig, args: &SourceArgs) -> Result<(), Box<dyn Error>> {
    headlines(config, args).await?;
    let collected = articles(config, args).await?;

    let analyze_args = AnalyzeArgs {
        sources: SourceArgs {
            source: args.source.clone(),
        },
        input: None,
        output: None,
    };
    analyze(config, &analyze_args)?;

    println!("Total collected: {collected} articles");
    Ok(())
}
