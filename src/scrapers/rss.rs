//! RSS feed parsing.
//!
//! Both sites run WordPress, which publishes the latest posts at `/feed/`.
//! Only `<item><title>` and `<item><link>` are used.

use crate::extract::normalize_whitespace;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

/// Parse a feed into `(title, link)` pairs in feed order.
///
/// Items without a link are skipped; titles are whitespace-normalised.
pub fn parse_feed(xml: &str) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let rss: Rss = from_str(&scrub_html_entities_for_xml(xml))?;

    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let link = item.link.map(|l| l.trim().to_string())?;
            if link.is_empty() {
                return None;
            }
            let title = normalize_whitespace(item.title.as_deref().unwrap_or_default());
            Some((title, link))
        })
        .collect())
}

// HTML named entities are not valid XML and make the parser bail.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Times 360 Malawi</title>
    <link>https://times.mw</link>
    <description>News</description>
    <item>
      <title>Flames  camp opens&nbsp;in Blantyre</title>
      <link>https://times.mw/flames-camp-opens/</link>
      <dc:creator><![CDATA[Sports Reporter]]></dc:creator>
      <category><![CDATA[Sports]]></category>
      <category><![CDATA[Football]]></category>
      <description><![CDATA[<p>The national team ...</p>]]></description>
    </item>
    <item>
      <title><![CDATA[Kwacha & reserves]]></title>
      <link>
        https://times.mw/kwacha-reserves/
      </link>
    </item>
    <item>
      <title>No link here</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_items() {
        let items = parse_feed(FEED).unwrap();
        assert_eq!(
            items,
            vec![
                (
                    "Flames camp opens in Blantyre".to_string(),
                    "https://times.mw/flames-camp-opens/".to_string()
                ),
                (
                    "Kwacha & reserves".to_string(),
                    "https://times.mw/kwacha-reserves/".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_empty_channel() {
        let xml = "<rss><channel><title>t</title></channel></rss>";
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_html_page_is_not_a_feed() {
        assert!(parse_feed("<html><body>Not found</body></html>").is_err());
    }
}
