//! Homepage headline scraping, used when a site's feed is unavailable.

use crate::extract::normalize_whitespace;
use scraper::{Html, Selector};
use std::error::Error;
use url::Url;

/// Select headline anchors and return `(title, absolute_url)` pairs.
///
/// Relative links are resolved against `base_url`. Anchors with no text or an
/// unresolvable `href` are skipped.
pub fn parse_homepage(
    html: &str,
    base_url: &str,
    selector: &str,
) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let base = Url::parse(base_url)?;
    let selector = Selector::parse(selector).map_err(|e| format!("bad headline selector: {e}"))?;
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        let title = normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        if title.is_empty() {
            continue;
        }
        links.push((title, resolved.to_string()));
    }
    Ok(links)
}
