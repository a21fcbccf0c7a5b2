//! Category sanity check.
//!
//! Prints how many articles landed in each category and which articles have
//! a given phrase in their title, to eyeball whether the keyword rules are
//! doing what they should (e.g. the Times "Sports Arena" column).

use crate::models::{ArticleRecord, Category};
use itertools::Itertools;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCheck {
    /// `None` counts records that carry no category.
    pub counts: Vec<(Option<Category>, usize)>,
    pub needle: String,
    pub matches: Vec<(String, Option<Category>)>,
}

impl CategoryCheck {
    /// Count categories (most common first, ties by category) and collect
    /// titles containing `needle`, case-insensitively.
    pub fn build(records: &[ArticleRecord], needle: &str) -> Self {
        let counts = records
            .iter()
            .map(|r| r.category)
            .counts()
            .into_iter()
            .sorted_by(|(a_cat, a_n), (b_cat, b_n)| b_n.cmp(a_n).then(a_cat.cmp(b_cat)))
            .collect();

        let lowered = needle.to_lowercase();
        let matches = records
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&lowered))
            .map(|r| (r.title.clone(), r.category))
            .collect();

        Self {
            counts,
            needle: needle.to_string(),
            matches,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Category counts:").unwrap();
        for (category, n) in &self.counts {
            let name = category.map(|c| c.to_string()).unwrap_or_else(|| "(none)".into());
            writeln!(out, "{name:<10} {n}").unwrap();
        }

        writeln!(out, "\nCheck {:?} articles:", self.needle).unwrap();
        if self.matches.is_empty() {
            writeln!(out, "(no matching titles)").unwrap();
        }
        for (title, category) in &self.matches {
            let name = category.map(|c| c.to_string()).unwrap_or_else(|| "(none)".into());
            writeln!(out, "{name:<10} {title}").unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, category: Option<Category>) -> ArticleRecord {
        let mut r = ArticleRecord::new("Times", title, "", "");
        r.category = category;
        r
    }

    #[test]
    fn test_counts_sorted_by_frequency_then_category() {
        let records = vec![
            rec("a", Some(Category::Other)),
            rec("b", Some(Category::Politics)),
            rec("c", Some(Category::Other)),
            rec("d", Some(Category::Sports)),
            rec("e", None),
        ];
        let check = CategoryCheck::build(&records, "x");
        assert_eq!(
            check.counts,
            vec![
                (Some(Category::Other), 2),
                (None, 1),
                (Some(Category::Sports), 1),
                (Some(Category::Politics), 1),
            ]
        );
    }

    #[test]
    fn test_needle_is_case_insensitive() {
        let records = vec![
            rec("SPORTS ARENA: Flames held", Some(Category::Sports)),
            rec("Budget debate", Some(Category::Economy)),
            rec("Inside the sports arena", Some(Category::Sports)),
        ];
        let check = CategoryCheck::build(&records, "Sports Arena");
        assert_eq!(check.matches.len(), 2);

        let text = check.render();
        assert!(text.starts_with("Category counts:\nsports     2\neconomy    1\n"));
        assert!(text.contains("Check \"Sports Arena\" articles:"));
        assert!(text.contains("sports     Inside the sports arena"));
    }

    #[test]
    fn test_render_without_matches() {
        let check = CategoryCheck::build(&[], "Sports Arena");
        assert!(check.render().contains("(no matching titles)"));
    }
}
