//! YAML configuration with built-in defaults.
//!
//! Every field is optional in the file; anything left out falls back to the
//! defaults below, which describe the Times and Nation sites.
//!
//! ```yaml
//! data_dir: ./data
//! reports_dir: ./reports
//! http:
//!   timeout_secs: 20
//!   delay_ms: 1500
//! sources:
//!   - name: Times
//!     slug: times
//!     base_url: https://times.mw
//! lexicon:
//!   - word: bumper
//!     polarity: 0.6
//!     subjectivity: 0.3
//! ```

use crate::sentiment::LexiconScorer;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, instrument};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where headline and article CSVs are read and written.
    pub data_dir: PathBuf,
    /// Where dashboard reports are written.
    pub reports_dir: PathBuf,
    pub http: HttpConfig,
    pub sources: Vec<SourceConfig>,
    /// Extra or overriding sentiment lexicon entries.
    pub lexicon: Vec<LexiconEntry>,
}

/// A word added to the built-in sentiment lexicon.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LexiconEntry {
    pub word: String,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Settings for the page fetcher.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    /// Pause after each article fetch.
    pub delay_ms: u64,
    /// Extra attempts after the first failed fetch.
    pub max_retries: usize,
}

/// One news site.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Publisher name written to the `source` column.
    pub name: String,
    /// File-name prefix and CLI selector, e.g. `times`.
    pub slug: String,
    pub base_url: String,
    /// RSS feed path relative to `base_url`; `None` skips straight to the homepage.
    #[serde(default = "default_feed_path")]
    pub feed_path: Option<String>,
    /// CSS selector for headline anchors on the homepage.
    #[serde(default = "default_headline_selector")]
    pub headline_selector: String,
    #[serde(default = "default_max_headlines")]
    pub max_headlines: usize,
}

fn default_feed_path() -> Option<String> {
    Some("/feed/".to_string())
}

fn default_headline_selector() -> String {
    "h2.entry-title a, h3.entry-title a".to_string()
}

fn default_max_headlines() -> usize {
    50
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 15,
            delay_ms: 1000,
            max_retries: 2,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
            http: HttpConfig::default(),
            sources: vec![
                SourceConfig {
                    name: "Times".to_string(),
                    slug: "times".to_string(),
                    base_url: "https://times.mw".to_string(),
                    feed_path: default_feed_path(),
                    headline_selector: "h2.entry-title a, h3.entry-title a, .td-module-title a"
                        .to_string(),
                    max_headlines: default_max_headlines(),
                },
                SourceConfig {
                    name: "Nation".to_string(),
                    slug: "nation".to_string(),
                    base_url: "https://www.mwnation.com".to_string(),
                    feed_path: default_feed_path(),
                    headline_selector: "h2.entry-title a, h3.entry-title a, .jeg_post_title a"
                        .to_string(),
                    max_headlines: default_max_headlines(),
                },
            ],
            lexicon: Vec::new(),
        }
    }
}

impl AppConfig {
    /// The built-in lexicon scorer with this config's extra words applied.
    pub fn scorer(&self) -> LexiconScorer {
        self.lexicon
            .iter()
            .fold(LexiconScorer::new(), |scorer, entry| {
                scorer.with_word(&entry.word, entry.polarity, entry.subjectivity)
            })
    }

    /// Sources picked by a CLI selector: a slug, a name, or `all`.
    pub fn select_sources(&self, selector: &str) -> Result<Vec<&SourceConfig>, Box<dyn Error>> {
        if selector.eq_ignore_ascii_case("all") {
            return Ok(self.sources.iter().collect());
        }
        self.sources
            .iter()
            .find(|s| s.slug.eq_ignore_ascii_case(selector) || s.name.eq_ignore_ascii_case(selector))
            .map(|s| vec![s])
            .ok_or_else(|| {
                let known: Vec<&str> = self.sources.iter().map(|s| s.slug.as_str()).collect();
                format!("unknown source {selector:?} (known: {})", known.join(", ")).into()
            })
    }

    pub fn headlines_path(&self, source: &SourceConfig) -> PathBuf {
        self.data_dir.join(format!("{}_headlines.csv", source.slug))
    }

    pub fn articles_path(&self, source: &SourceConfig) -> PathBuf {
        self.data_dir.join(format!("{}_articles.csv", source.slug))
    }

    pub fn annotated_path(&self, source: &SourceConfig) -> PathBuf {
        self.data_dir
            .join(format!("{}_articles_with_sentiment.csv", source.slug))
    }
}

/// Parse configuration from YAML text.
pub fn parse_config(yaml: &str) -> Result<AppConfig, Box<dyn Error>> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load configuration from `path`, or return the defaults when no path is given.
#[instrument(level = "info")]
pub fn load_config(path: Option<&str>) -> Result<AppConfig, Box<dyn Error>> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)?;
            let config = parse_config(&raw)?;
            info!(path = p, sources = config.sources.len(), "Loaded configuration");
            Ok(config)
        }
        None => {
            info!("No config file given; using built-in defaults");
            Ok(AppConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_both_sites() {
        let config = AppConfig::default();
        let slugs: Vec<_> = config.sources.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["times", "nation"]);
        assert_eq!(config.http.timeout_secs, 15);
        assert_eq!(config.http.delay_ms, 1000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = parse_config("http:\n  delay_ms: 0\n").unwrap();
        assert_eq!(config.http.delay_ms, 0);
        assert_eq!(config.http.timeout_secs, 15);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_source_entries_fill_optional_fields() {
        let yaml = r#"
sources:
  - name: Malawi24
    slug: malawi24
    base_url: https://malawi24.com
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.sources.len(), 1);
        let source = &config.sources[0];
        assert_eq!(source.feed_path.as_deref(), Some("/feed/"));
        assert_eq!(source.max_headlines, 50);
    }

    #[test]
    fn test_feed_can_be_disabled() {
        let yaml = r#"
sources:
  - name: Times
    slug: times
    base_url: https://times.mw
    feed_path: null
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.sources[0].feed_path, None);
    }

    #[test]
    fn test_select_sources() {
        let config = AppConfig::default();
        assert_eq!(config.select_sources("all").unwrap().len(), 2);
        assert_eq!(config.select_sources("Nation").unwrap()[0].slug, "nation");
        assert_eq!(config.select_sources("times").unwrap()[0].name, "Times");

        let err = config.select_sources("bbc").unwrap_err();
        assert!(err.to_string().contains("times, nation"));
    }

    #[test]
    fn test_paths_follow_slug() {
        let config = AppConfig::default();
        let times = &config.sources[0];
        assert_eq!(config.headlines_path(times), PathBuf::from("data/times_headlines.csv"));
        assert_eq!(config.articles_path(times), PathBuf::from("data/times_articles.csv"));
        assert_eq!(
            config.annotated_path(times),
            PathBuf::from("data/times_articles_with_sentiment.csv")
        );
    }

    #[test]
    fn test_lexicon_entries_extend_scorer() {
        use crate::sentiment::SentimentScorer;

        let yaml = "lexicon:\n  - word: bumper\n    polarity: 0.6\n    subjectivity: 0.3\n";
        let config = parse_config(yaml).unwrap();
        let score = config.scorer().score("a bumper harvest");
        assert!((score.polarity - 0.6).abs() < 1e-9);
        assert_eq!(AppConfig::default().scorer().score("a bumper harvest").polarity, 0.0);
    }

    #[test]
    fn test_load_config_without_path() {
        assert_eq!(load_config(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        assert!(load_config(Some("/nonexistent/config.yaml")).is_err());
    }
}
