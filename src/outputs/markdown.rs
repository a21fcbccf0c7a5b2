//! Markdown rendering of the dashboard.
//!
//! Layout, top to bottom: title, active filters, summary numbers, the
//! sentiment count table, per-category averages, an article index grouped by
//! category, then one section per category holding its articles.

use crate::dashboard::{Dashboard, DashboardArticle};
use crate::models::Category;
use crate::utils::{slugify_title, upcase};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render a [`Dashboard`] as a Markdown document.
///
/// # Arguments
///
/// * `dashboard` - The filtered dashboard to render
/// * `generated_at` - Timestamp shown under the title
///
/// # Output
///
/// Articles are grouped by category in rule order (sports, politics,
/// economy, other). Each index entry links to the article's slugified
/// heading.
pub fn dashboard_to_markdown(dashboard: &Dashboard, generated_at: &str) -> String {
    let mut md = String::new();

    writeln!(md, "# Malawi News Sentiment Dashboard\n").unwrap();
    writeln!(md, "_Generated {generated_at}_\n").unwrap();

    let filter = &dashboard.filter;
    writeln!(md, "## Filters\n").unwrap();
    writeln!(md, "- Source: {}", filter.source.as_deref().unwrap_or("All")).unwrap();
    writeln!(
        md,
        "- Category: {}",
        filter.category.map(|c| c.to_string()).unwrap_or_else(|| "All".into())
    )
    .unwrap();
    writeln!(
        md,
        "- Sentiment: {}\n",
        filter.sentiment.map(|s| s.to_string()).unwrap_or_else(|| "All".into())
    )
    .unwrap();

    writeln!(md, "## Summary\n").unwrap();
    writeln!(md, "- Total articles: {}", dashboard.total_articles).unwrap();
    writeln!(md, "- Filtered articles: {}", dashboard.filtered_articles).unwrap();
    if let (Some(pol), Some(subj)) = (dashboard.mean_polarity, dashboard.mean_subjectivity) {
        writeln!(md, "- Average polarity (filtered): {pol:.3}").unwrap();
        writeln!(md, "- Average subjectivity (filtered): {subj:.3}").unwrap();
    }
    md.push('\n');

    writeln!(md, "## Sentiment counts\n").unwrap();
    if dashboard.filtered_articles == 0 {
        writeln!(md, "No articles for current filters.\n").unwrap();
    } else {
        writeln!(md, "| Sentiment | Articles |").unwrap();
        writeln!(md, "|-----------|----------|").unwrap();
        for c in &dashboard.sentiment_counts {
            writeln!(md, "| {} | {} |", c.label, c.count).unwrap();
        }
        md.push('\n');
    }

    writeln!(md, "## By category\n").unwrap();
    if dashboard.by_category.is_empty() {
        writeln!(md, "No category data.\n").unwrap();
    } else {
        writeln!(md, "| Category | Articles | Avg polarity | Avg subjectivity |").unwrap();
        writeln!(md, "|----------|----------|--------------|------------------|").unwrap();
        for c in &dashboard.by_category {
            writeln!(
                md,
                "| {} | {} | {:.3} | {:.3} |",
                upcase(c.category.as_str()),
                c.articles,
                c.mean_polarity,
                c.mean_subjectivity
            )
            .unwrap();
        }
        md.push('\n');
    }

    writeln!(md, "## Articles\n").unwrap();
    if dashboard.articles.is_empty() {
        writeln!(md, "No articles match your filters.").unwrap();
        return md;
    }

    // Group articles by category
    let mut articles_by_category: BTreeMap<Category, Vec<&DashboardArticle>> = BTreeMap::new();
    for article in &dashboard.articles {
        articles_by_category
            .entry(article.category)
            .or_default()
            .push(article);
    }

    for (category, articles) in &articles_by_category {
        writeln!(
            md,
            "- [**{}**](#{})",
            upcase(category.as_str()),
            category.as_str()
        )
        .unwrap();
        for article in articles {
            let title = display_title(&article.title);
            writeln!(
                md,
                "\t- <small>`{}`</small> - [{}](#{})",
                article.source,
                title,
                slugify_title(title)
            )
            .unwrap();
        }
    }
    md.push('\n');

    for (category, articles) in articles_by_category {
        writeln!(md, "### {}\n", upcase(category.as_str())).unwrap();
        for article in articles {
            let title = display_title(&article.title);
            writeln!(md, "#### {title}\n").unwrap();
            writeln!(
                md,
                "Source: {} | Sentiment: **{}** (polarity={:.2}, subjectivity={:.2})\n",
                article.source,
                article.sentiment_label,
                article.sentiment_polarity,
                article.sentiment_subjectivity
            )
            .unwrap();
            if !article.text.is_empty() {
                writeln!(md, "{}\n", article.text).unwrap();
            }
            writeln!(md, "[Open article]({})\n", article.url).unwrap();
            writeln!(md, "---\n").unwrap();
        }
    }

    md
}

fn display_title(title: &str) -> &str {
    if title.is_empty() { "(untitled)" } else { title }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardFilter;
    use crate::models::{ArticleRecord, Category, SentimentLabel};
    use crate::pipeline::process;
    use crate::sentiment::LexiconScorer;

    fn records() -> Vec<ArticleRecord> {
        process(
            vec![
                ArticleRecord::new(
                    "Times",
                    "Flames beat rivals in Sports Arena clash",
                    "https://times.mw/flames/",
                    "An excellent win.",
                ),
                ArticleRecord::new("Nation", "Local bakery opens", "https://www.mwnation.com/b/", ""),
            ],
            &LexiconScorer::new(),
        )
    }

    #[test]
    fn test_markdown_contains_sections() {
        let d = Dashboard::build(&records(), &DashboardFilter::default());
        let md = dashboard_to_markdown(&d, "2025-11-02 08:00");

        assert!(md.starts_with("# Malawi News Sentiment Dashboard"));
        assert!(md.contains("_Generated 2025-11-02 08:00_"));
        assert!(md.contains("- Source: All"));
        assert!(md.contains("- Total articles: 2"));
        assert!(md.contains("| positive | 1 |"));
        assert!(md.contains("| neutral | 1 |"));
        assert!(md.contains("| negative | 0 |"));
        assert!(md.contains("| Sports | 1 |"));
        assert!(md.contains("#### Flames beat rivals in Sports Arena clash"));
        assert!(md.contains("Sentiment: **positive** (polarity=0.90, subjectivity="));
        assert!(md.contains("[Open article](https://www.mwnation.com/b/)"));
    }

    #[test]
    fn test_markdown_empty_selection() {
        let filter = DashboardFilter {
            category: Some(Category::Economy),
            sentiment: Some(SentimentLabel::Negative),
            ..Default::default()
        };
        let d = Dashboard::build(&records(), &filter);
        let md = dashboard_to_markdown(&d, "now");

        assert!(md.contains("- Category: economy"));
        assert!(md.contains("- Sentiment: negative"));
        assert!(md.contains("No articles for current filters."));
        assert!(md.contains("No category data."));
        assert!(md.trim_end().ends_with("No articles match your filters."));
        assert!(!md.contains("Average polarity"));
    }

    #[test]
    fn test_article_index_links_to_headings() {
        let d = Dashboard::build(&records(), &DashboardFilter::default());
        let md = dashboard_to_markdown(&d, "now");
        assert!(md.contains("- [**Other**](#other)"));
        assert!(md.contains("\t- <small>`Nation`</small> - [Local bakery opens](#local-bakery-opens)"));
    }

    #[test]
    fn test_articles_grouped_by_category_in_rule_order() {
        let mut input = records();
        input.reverse();
        let d = Dashboard::build(&input, &DashboardFilter::default());
        let md = dashboard_to_markdown(&d, "now");

        let sports = md.find("### Sports\n").unwrap();
        let other = md.find("### Other\n").unwrap();
        assert!(sports < other);
        assert!(md.find("#### Flames beat rivals").unwrap() > sports);
        assert!(md.find("#### Local bakery opens").unwrap() > other);
    }
}
