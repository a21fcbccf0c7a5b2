//! Article body fetching for indexed headlines.

use crate::categorise::categorise;
use crate::extract::extract_article_text;
use crate::fetch::PageFetcher;
use crate::models::{is_http_url, ArticleRecord, Headline};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Fetch a page and extract its body, or return an empty string on failure.
pub async fn fetch_article_text<F: PageFetcher>(fetcher: &F, url: &str) -> String {
    match fetcher.fetch(url).await {
        Ok(html) => extract_article_text(&html),
        Err(e) => {
            warn!(%url, error = %e, "Error fetching article");
            String::new()
        }
    }
}

/// Turn headlines into categorised article records.
///
/// Headlines without an absolute http(s) URL are skipped. A failed fetch
/// keeps the record with an empty body. `delay` is slept after every fetch.
#[instrument(level = "info", skip_all, fields(count = headlines.len()))]
pub async fn build_articles<F: PageFetcher>(
    headlines: &[Headline],
    fetcher: &F,
    delay: Duration,
) -> Vec<ArticleRecord> {
    let total = headlines.len();

    let articles: Vec<ArticleRecord> = stream::iter(headlines.iter().enumerate())
        .filter(|(_, h)| {
            let keep = is_http_url(&h.url);
            if !keep {
                warn!(url = %h.url, title = %h.title, "Skipping headline without an absolute URL");
            }
            std::future::ready(keep)
        })
        .then(|(idx, headline)| async move {
            info!(index = idx + 1, total, title = %headline.title, "Fetching article");
            let text = fetch_article_text(fetcher, &headline.url).await;
            if text.is_empty() {
                warn!(url = %headline.url, "No text extracted");
            } else {
                info!(chars = text.chars().count(), "Extracted article text");
            }

            let mut record = ArticleRecord::new(&headline.source, &headline.title, &headline.url, &text);
            record.category = Some(categorise(&record.title, &record.text));

            if !delay.is_zero() {
                sleep(delay).await;
            }
            record
        })
        .collect()
        .await;

    info!(count = articles.len(), "Built article records");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use std::collections::HashMap;
    use std::error::Error;

    struct StaticFetcher(HashMap<&'static str, &'static str>);

    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            self.0
                .get(url)
                .map(|s| s.to_string())
                .ok_or_else(|| format!("404 for {url}").into())
        }
    }

    fn headline(title: &str, url: &str) -> Headline {
        Headline {
            source: "Times".to_string(),
            title: title.to_string(),
            url: url.to_string(),
            scraped_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_build_articles() {
        let fetcher = StaticFetcher(HashMap::from([
            (
                "https://times.mw/a/",
                r#"<div class="entry-content"><p>The match ended in a draw at the stadium.</p></div>"#,
            ),
            ("https://times.mw/b/", "<p>Treasury officials spoke.</p>"),
        ]));
        let headlines = vec![
            headline("Weekend roundup", "https://times.mw/a/"),
            headline("Relative", "/relative/"),
            headline("Government unveils new budget", "https://times.mw/b/"),
            headline("Gone", "https://times.mw/missing/"),
        ];

        let articles = build_articles(&headlines, &fetcher, Duration::ZERO).await;
        assert_eq!(articles.len(), 3);

        assert_eq!(articles[0].text, "The match ended in a draw at the stadium.");
        assert_eq!(articles[0].category, Some(Category::Sports));

        assert_eq!(articles[1].title, "Government unveils new budget");
        assert_eq!(articles[1].category, Some(Category::Politics));

        // failed fetch keeps the record with an empty body
        assert_eq!(articles[2].url, "https://times.mw/missing/");
        assert_eq!(articles[2].text, "");
        assert_eq!(articles[2].category, Some(Category::Other));
        assert!(articles[2].sentiment.is_none());
    }

    #[tokio::test]
    async fn test_fetch_article_text_swallows_errors() {
        let fetcher = StaticFetcher(HashMap::new());
        assert_eq!(fetch_article_text(&fetcher, "https://times.mw/x").await, "");
    }
}
