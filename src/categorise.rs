//! Keyword-based topic categorisation.
//!
//! Each category has two keyword tiers: a broad one matched against the
//! headline and a narrower one matched against the article body. Every title
//! rule is tried before any body rule, because article bodies carry site
//! boilerplate (menus, "related stories", footers) that would otherwise drown
//! out the headline.
//!
//! Matching is plain substring containment on lower-cased input. There is no
//! tokenisation and no word-boundary check, so `"goal"` also matches
//! `"goalkeeper"` and `"caf"` matches `"cafe"`. Changing that would silently
//! move articles between categories.

use crate::models::Category;

pub const SPORTS_TITLE_KEYWORDS: &[&str] = &[
    "sports arena",
    "sports",
    "sport",
    "football",
    "soccer",
    "flames",
    "super league",
    "match",
    "matches",
    "goal",
    "goals",
    "coach",
    "player",
    "players",
    "tournament",
    "stadium",
    "afcon",
    "caf",
    "champions league",
    "fifa",
    "netball",
    "basketball",
    "league",
    "cup",
    "fixture",
    "kick-off",
    "kick off",
];

pub const SPORTS_BODY_KEYWORDS: &[&str] = &[
    "football",
    "soccer",
    "flames",
    "super league",
    "match",
    "tournament",
    "afcon",
    "stadium",
    "caf",
    "champions league",
    "fifa",
    "league",
    "cup",
];

pub const POLITICS_TITLE_KEYWORDS: &[&str] = &[
    "election",
    "elections",
    "parliament",
    // padded so it only hits the standalone abbreviation
    " mp ",
    "member of parliament",
    "president",
    "presidential",
    "minister",
    "cabinet",
    "politics",
    "politician",
    "campaign",
    "vote",
    "voting",
    "government",
    "opposition",
    "ruling party",
];

pub const POLITICS_BODY_KEYWORDS: &[&str] = &[
    "government",
    "ministry",
    "parliament",
    "president",
    "minister",
    "cabinet",
    "mps",
    "party",
    "coalition",
];

pub const ECONOMY_TITLE_KEYWORDS: &[&str] = &[
    "economy",
    "economic",
    "budget",
    "finance",
    "financial",
    "inflation",
    "kwacha",
    "reserve bank",
    "rbm",
    "trade",
    "investment",
    "business",
    "tax",
    "revenue",
    "loan",
    "debt",
];

pub const ECONOMY_BODY_KEYWORDS: &[&str] = &[
    "economy",
    "economic",
    "budget",
    "finance",
    "financial",
    "inflation",
    "kwacha",
    "reserve bank",
    "rbm",
    "trade",
    "investment",
    "business",
    "tax",
    "revenue",
    "loan",
    "debt",
    "imports",
    "exports",
];

/// Which part of the article a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
}

/// A single step of the precedence chain.
#[derive(Debug)]
pub struct Rule {
    pub field: Field,
    pub keywords: &'static [&'static str],
    pub category: Category,
}

/// The precedence chain, evaluated top to bottom; the first hit wins.
pub const RULES: &[Rule] = &[
    Rule {
        field: Field::Title,
        keywords: SPORTS_TITLE_KEYWORDS,
        category: Category::Sports,
    },
    Rule {
        field: Field::Title,
        keywords: POLITICS_TITLE_KEYWORDS,
        category: Category::Politics,
    },
    Rule {
        field: Field::Title,
        keywords: ECONOMY_TITLE_KEYWORDS,
        category: Category::Economy,
    },
    Rule {
        field: Field::Body,
        keywords: SPORTS_BODY_KEYWORDS,
        category: Category::Sports,
    },
    Rule {
        field: Field::Body,
        keywords: POLITICS_BODY_KEYWORDS,
        category: Category::Politics,
    },
    Rule {
        field: Field::Body,
        keywords: ECONOMY_BODY_KEYWORDS,
        category: Category::Economy,
    },
];

/// True if any keyword occurs anywhere in `haystack`.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

/// Return the first rule in [`RULES`] that matches, if any.
pub fn matching_rule(title: &str, text: &str) -> Option<&'static Rule> {
    let title = title.to_lowercase();
    let body = text.to_lowercase();

    RULES.iter().find(|rule| {
        let haystack = match rule.field {
            Field::Title => &title,
            Field::Body => &body,
        };
        contains_any(haystack, rule.keywords)
    })
}

/// Assign a category to an article from its headline and body.
///
/// Total over all inputs: anything no rule claims is [`Category::Other`].
pub fn categorise(title: &str, text: &str) -> Category {
    matching_rule(title, text)
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}
