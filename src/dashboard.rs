//! Dashboard view model over an annotated article table.
//!
//! The dashboard answers the same questions as the interactive page it
//! replaces: how many articles, how they split by sentiment, and how
//! polarity and subjectivity vary by category, all under an optional
//! source / category / sentiment filter.

use crate::models::{ArticleRecord, Category, SentimentLabel};
use itertools::Itertools;
use serde::Serialize;

/// Filter selection; `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardFilter {
    pub source: Option<String>,
    pub category: Option<Category>,
    pub sentiment: Option<SentimentLabel>,
}

impl DashboardFilter {
    pub fn matches(&self, record: &ArticleRecord) -> bool {
        let source_ok = self.source.as_deref().is_none_or(|s| record.source == s);
        let category_ok = self.category.is_none_or(|c| record.category == Some(c));
        let sentiment_ok = self
            .sentiment
            .is_none_or(|l| record.sentiment.map(|s| s.label) == Some(l));
        source_ok && category_ok && sentiment_ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentCount {
    pub label: SentimentLabel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverages {
    pub category: Category,
    pub articles: usize,
    pub mean_polarity: f64,
    pub mean_subjectivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardArticle {
    pub source: String,
    pub title: String,
    pub url: String,
    pub text: String,
    pub category: Category,
    pub sentiment_label: SentimentLabel,
    pub sentiment_polarity: f64,
    pub sentiment_subjectivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filter: DashboardFilter,
    /// Annotated articles before filtering.
    pub total_articles: usize,
    pub filtered_articles: usize,
    /// `None` when the filter leaves nothing.
    pub mean_polarity: Option<f64>,
    pub mean_subjectivity: Option<f64>,
    /// Always positive, neutral, negative, including zero counts.
    pub sentiment_counts: Vec<SentimentCount>,
    pub by_category: Vec<CategoryAverages>,
    /// Filter menu choices, from the unfiltered table.
    pub sources: Vec<String>,
    pub categories: Vec<Category>,
    pub articles: Vec<DashboardArticle>,
}

impl Dashboard {
    /// Build the dashboard. Records without annotations are ignored.
    pub fn build(records: &[ArticleRecord], filter: &DashboardFilter) -> Self {
        let annotated: Vec<DashboardArticle> = records.iter().filter_map(to_article).collect();

        let sources = annotated
            .iter()
            .map(|a| a.source.clone())
            .filter(|s| !s.is_empty())
            .unique()
            .sorted()
            .collect();
        let categories = annotated.iter().map(|a| a.category).unique().sorted().collect();

        let filtered: Vec<DashboardArticle> = records
            .iter()
            .filter(|r| filter.matches(r))
            .filter_map(to_article)
            .collect();

        let mean_polarity = mean(filtered.iter().map(|a| a.sentiment_polarity));
        let mean_subjectivity = mean(filtered.iter().map(|a| a.sentiment_subjectivity));

        let counts = filtered.iter().map(|a| a.sentiment_label).counts();
        let sentiment_counts = SentimentLabel::ALL
            .into_iter()
            .map(|label| SentimentCount {
                label,
                count: counts.get(&label).copied().unwrap_or(0),
            })
            .collect();

        let by_category = filtered
            .iter()
            .into_group_map_by(|a| a.category)
            .into_iter()
            .sorted_by_key(|(category, _)| *category)
            .map(|(category, group)| CategoryAverages {
                category,
                articles: group.len(),
                mean_polarity: mean(group.iter().map(|a| a.sentiment_polarity)).unwrap_or(0.0),
                mean_subjectivity: mean(group.iter().map(|a| a.sentiment_subjectivity))
                    .unwrap_or(0.0),
            })
            .collect();

        Self {
            filter: filter.clone(),
            total_articles: annotated.len(),
            filtered_articles: filtered.len(),
            mean_polarity,
            mean_subjectivity,
            sentiment_counts,
            by_category,
            sources,
            categories,
            articles: filtered,
        }
    }
}

fn to_article(record: &ArticleRecord) -> Option<DashboardArticle> {
    let category = record.category?;
    let sentiment = record.sentiment?;
    Some(DashboardArticle {
        source: record.source.clone(),
        title: record.title.clone(),
        url: record.url.clone(),
        text: record.text.clone(),
        category,
        sentiment_label: sentiment.label,
        sentiment_polarity: sentiment.polarity,
        sentiment_subjectivity: sentiment.subjectivity,
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    fn record(source: &str, category: Category, polarity: f64, subjectivity: f64) -> ArticleRecord {
        let mut r = ArticleRecord::new(source, "t", "https://example.mw/x", "body");
        r.category = Some(category);
        r.sentiment = Some(Sentiment {
            polarity,
            subjectivity,
            label: crate::sentiment::label_for(polarity),
        });
        r
    }

    fn table() -> Vec<ArticleRecord> {
        vec![
            record("Times", Category::Sports, 0.5, 0.4),
            record("Times", Category::Politics, -0.3, 0.6),
            record("Nation", Category::Sports, 0.0, 0.2),
            record("Nation", Category::Economy, 0.25, 0.8),
            ArticleRecord::new("Nation", "raw", "https://example.mw/raw", ""),
        ]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_unfiltered_summary() {
        let d = Dashboard::build(&table(), &DashboardFilter::default());
        assert_eq!(d.total_articles, 4);
        assert_eq!(d.filtered_articles, 4);
        assert!(close(d.mean_polarity.unwrap(), 0.1125));
        assert!(close(d.mean_subjectivity.unwrap(), 0.5));
        assert_eq!(d.sources, vec!["Nation", "Times"]);
        assert_eq!(
            d.categories,
            vec![Category::Sports, Category::Politics, Category::Economy]
        );

        let counts: Vec<_> = d.sentiment_counts.iter().map(|c| (c.label, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (SentimentLabel::Positive, 2),
                (SentimentLabel::Neutral, 1),
                (SentimentLabel::Negative, 1)
            ]
        );
    }

    #[test]
    fn test_category_averages() {
        let d = Dashboard::build(&table(), &DashboardFilter::default());
        let sports = &d.by_category[0];
        assert_eq!(sports.category, Category::Sports);
        assert_eq!(sports.articles, 2);
        assert!(close(sports.mean_polarity, 0.25));
        assert!(close(sports.mean_subjectivity, 0.3));
        assert_eq!(d.by_category.len(), 3);
    }

    #[test]
    fn test_filters_combine() {
        let filter = DashboardFilter {
            source: Some("Times".to_string()),
            category: Some(Category::Sports),
            sentiment: None,
        };
        let d = Dashboard::build(&table(), &filter);
        assert_eq!(d.total_articles, 4);
        assert_eq!(d.filtered_articles, 1);
        // menus still list everything
        assert_eq!(d.sources.len(), 2);

        let filter = DashboardFilter {
            sentiment: Some(SentimentLabel::Negative),
            ..Default::default()
        };
        let d = Dashboard::build(&table(), &filter);
        assert_eq!(d.articles.len(), 1);
        assert_eq!(d.articles[0].category, Category::Politics);
    }

    #[test]
    fn test_empty_selection() {
        let filter = DashboardFilter {
            source: Some("Malawi24".to_string()),
            ..Default::default()
        };
        let d = Dashboard::build(&table(), &filter);
        assert_eq!(d.filtered_articles, 0);
        assert_eq!(d.mean_polarity, None);
        assert!(d.by_category.is_empty());
        assert!(d.sentiment_counts.iter().all(|c| c.count == 0));
        assert_eq!(d.sentiment_counts.len(), 3);
    }
}
