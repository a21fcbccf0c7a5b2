//! Article body extraction from raw HTML.
//!
//! WordPress-style news sites wrap the story in one of a handful of content
//! containers. The first container that yields any paragraph text wins;
//! otherwise every `<p>` on the page is used.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["div.entry-content", "div.post-content", "div.td-post-content"]
        .iter()
        .map(|s| Selector::parse(s).expect("valid content selector"))
        .collect()
});

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Extract the article body as newline-separated paragraphs.
///
/// Returns an empty string when the page has no paragraph text at all.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in CONTENT_SELECTORS.iter() {
        if let Some(container) = document.select(selector).next() {
            let text = paragraphs_text(container);
            if !text.is_empty() {
                return text;
            }
        }
    }

    paragraphs_text(document.root_element())
}

fn paragraphs_text(root: ElementRef<'_>) -> String {
    root.select(&PARAGRAPH)
        .map(|p| normalize_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_entry_content() {
        let html = r#"
            <html><body>
              <nav><p>Home | Sports | Politics</p></nav>
              <div class="entry-content">
                <p>The Flames drew 1-1.</p>
                <p>   </p>
                <p>Coach   praised the
                   defence.</p>
              </div>
              <footer><p>Copyright Times Group</p></footer>
            </body></html>
        "#;
        assert_eq!(
            extract_article_text(html),
            "The Flames drew 1-1.\nCoach praised the defence."
        );
    }

    #[test]
    fn test_falls_through_to_next_container() {
        let html = r#"
            <div class="entry-content"><div>no paragraphs here</div></div>
            <div class="td-post-content"><p>Treasury releases figures.</p></div>
        "#;
        assert_eq!(extract_article_text(html), "Treasury releases figures.");
    }

    #[test]
    fn test_post_content_container() {
        let html = r#"<div class="post-content"><p>One.</p><p>Two.</p></div><p>Sidebar</p>"#;
        assert_eq!(extract_article_text(html), "One.\nTwo.");
    }

    #[test]
    fn test_falls_back_to_all_paragraphs() {
        let html = r#"<main><p>First <b>bold</b> line.</p><section><p>Second.</p></section></main>"#;
        assert_eq!(extract_article_text(html), "First bold line.\nSecond.");
    }

    #[test]
    fn test_no_paragraphs_is_empty() {
        assert_eq!(extract_article_text("<html><body><div>Hi</div></body></html>"), "");
        assert_eq!(extract_article_text(""), "");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
    }
}
