//! News source scrapers.
//!
//! Every configured source goes through the same two phases:
//!
//! 1. **Indexing**: discover headlines from the site's RSS feed, falling back
//!    to CSS-selected anchors on the homepage
//! 2. **Fetching**: download each article and extract its body text
//!
//! # Supported Sources
//!
//! | Source | Base URL | Feed |
//! |--------|----------|------|
//! | Times  | `https://times.mw` | `/feed/` |
//! | Nation | `https://www.mwnation.com` | `/feed/` |
//!
//! More sources can be added through the configuration file.

pub mod articles;
pub mod homepage;
pub mod rss;

use crate::config::SourceConfig;
use crate::fetch::PageFetcher;
use crate::models::{is_http_url, Headline};
use chrono::Utc;
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub use articles::build_articles;

/// Index a source's latest headlines.
///
/// The feed is tried first; if it cannot be fetched or parsed, or has no
/// items, the homepage is scraped instead. Only a homepage failure is an error.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn index_headlines<F: PageFetcher>(
    source: &SourceConfig,
    fetcher: &F,
) -> Result<Vec<Headline>, Box<dyn Error>> {
    let base = Url::parse(&source.base_url)?;

    let mut links = Vec::new();
    if let Some(feed_path) = &source.feed_path {
        let feed_url = base.join(feed_path)?;
        match fetcher.fetch(feed_url.as_str()).await {
            Ok(xml) => match rss::parse_feed(&xml) {
                Ok(items) => links = items,
                Err(e) => warn!(url = %feed_url, error = %e, "Feed did not parse"),
            },
            Err(e) => warn!(url = %feed_url, error = %e, "Feed fetch failed"),
        }
        if links.is_empty() {
            info!("Feed gave no headlines; falling back to homepage");
        }
    }

    if links.is_empty() {
        let html = fetcher.fetch(base.as_str()).await?;
        links = homepage::parse_homepage(&html, base.as_str(), &source.headline_selector)?;
    }

    let scraped_at = Utc::now().to_rfc3339();
    let headlines = finalize_headlines(&source.name, links, source.max_headlines, &scraped_at);

    info!(count = headlines.len(), "Indexed headlines");
    debug!(urls = ?headlines.iter().map(|h| &h.url).collect::<Vec<_>>(), "Headline URLs");
    Ok(headlines)
}

/// Keep absolute http(s) links, drop duplicate URLs (first wins) and cap the count.
pub fn finalize_headlines(
    source_name: &str,
    links: Vec<(String, String)>,
    max: usize,
    scraped_at: &str,
) -> Vec<Headline> {
    links
        .into_iter()
        .filter(|(_, url)| is_http_url(url))
        .unique_by(|(_, url)| url.clone())
        .take(max)
        .map(|(title, url)| Headline {
            source: source_name.to_string(),
            title,
            url,
            scraped_at: scraped_at.to_string(),
        })
        .collect()
}
