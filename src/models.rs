//! Data models for scraped headlines and annotated articles.
//!
//! - [`Headline`]: a title/link pair discovered on a source's feed or homepage
//! - [`ArticleRecord`]: one row of the article table, enriched in place by the
//!   categoriser and the sentiment annotator
//! - [`Category`] and [`SentimentLabel`]: the two closed label sets
//!
//! Labels are enums so that a record can never carry free text in either
//! column. They serialize to the lower-case strings used in the CSV tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Coarse topic assigned by keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sports,
    Politics,
    Economy,
    Other,
}

impl Category {
    /// Every category, in rule priority order.
    pub const ALL: [Category; 4] = [
        Category::Sports,
        Category::Politics,
        Category::Economy,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sports => "sports",
            Category::Politics => "politics",
            Category::Economy => "economy",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseLabelError::new("category", s))
    }
}

/// Sentiment bucket derived from polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Every label, in dashboard display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SentimentLabel::ALL
            .into_iter()
            .find(|l| l.as_str() == wanted)
            .ok_or_else(|| ParseLabelError::new("sentiment label", s))
    }
}

/// Returned when a string is not a member of a closed label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl Error for ParseLabelError {}

/// Sentiment scores attached to an article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Valence in `[-1.0, 1.0]`.
    pub polarity: f64,
    /// Opinion vs. fact in `[0.0, 1.0]`.
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

/// A headline discovered while indexing a news source.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Headline {
    /// Publisher name, e.g. `"Times"`.
    pub source: String,
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    /// RFC 3339 UTC timestamp of the indexing run.
    #[serde(default)]
    pub scraped_at: String,
}

/// One row of the article table.
///
/// `category` and `sentiment` are `None` until the record has been through
/// [`crate::pipeline::process`]. Columns the tool does not know about are
/// kept in `extra` so that they survive a read/annotate/write cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleRecord {
    pub source: String,
    pub title: String,
    pub url: String,
    /// Extracted article body; empty when extraction failed.
    pub text: String,
    pub category: Option<Category>,
    pub sentiment: Option<Sentiment>,
    pub extra: HashMap<String, String>,
}

impl ArticleRecord {
    pub fn new(source: &str, title: &str, url: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// True once both the category and the sentiment have been assigned.
    pub fn is_annotated(&self) -> bool {
        self.category.is_some() && self.sentiment.is_some()
    }

    /// Value of a non-annotation column by header name.
    pub fn column(&self, name: &str) -> &str {
        match name {
            "source" => &self.source,
            "title" => &self.title,
            "url" => &self.url,
            "text" => &self.text,
            other => self.extra.get(other).map(String::as_str).unwrap_or(""),
        }
    }
}

/// Absolute `http://` or `https://` URL check used before any fetch.
pub fn is_http_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
