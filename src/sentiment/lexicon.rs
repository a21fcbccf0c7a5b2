//! Lexicon-based sentiment scorer.
//!
//! Every known word carries a `(polarity, subjectivity)` pair. The text score
//! is the mean over all lexicon hits, after two adjustments borrowed from the
//! usual pattern-style scorers:
//!
//! - an intensifier (`very`, `extremely`, `slightly`, ...) multiplies the next
//!   hit's polarity and subjectivity;
//! - a negation (`not`, `never`, `isn't`, ...) multiplies the next hit's
//!   polarity by `-0.5`.
//!
//! Modifiers expire after [`MODIFIER_WINDOW`] intervening plain words, so
//! "not a good" still negates but a stray "no" three clauses back does not.

use super::{Score, SentimentScorer};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const NEGATION_FACTOR: f64 = -0.5;
pub const MODIFIER_WINDOW: usize = 2;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("valid token regex"));

/// `(word, polarity, subjectivity)`
const WORDS: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("successful", 0.75, 0.95),
    ("success", 0.3, 0.4),
    ("win", 0.8, 0.4),
    ("wins", 0.8, 0.4),
    ("won", 0.6, 0.4),
    ("victory", 0.5, 0.5),
    ("celebrate", 0.5, 0.6),
    ("celebrated", 0.5, 0.6),
    ("impressive", 1.0, 1.0),
    ("strong", 0.43, 0.73),
    ("positive", 0.23, 0.55),
    ("progress", 0.3, 0.4),
    ("growth", 0.3, 0.3),
    ("improve", 0.4, 0.4),
    ("improved", 0.4, 0.4),
    ("hope", 0.4, 0.7),
    ("hopeful", 0.5, 0.8),
    ("safe", 0.5, 0.5),
    ("peaceful", 0.5, 0.6),
    ("proud", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("wonderful", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("important", 0.4, 1.0),
    ("new", 0.136, 0.454),
    ("free", 0.4, 0.8),
    ("fair", 0.7, 0.9),
    ("benefit", 0.3, 0.4),
    ("welcome", 0.8, 0.9),
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("crisis", -0.5, 0.6),
    ("corruption", -0.5, 0.6),
    ("corrupt", -0.5, 0.5),
    ("fraud", -0.6, 0.6),
    ("violence", -0.6, 0.7),
    ("violent", -0.8, 0.9),
    ("dead", -0.2, 0.4),
    ("death", -0.3, 0.4),
    ("killed", -0.2, 0.4),
    ("attack", -0.4, 0.5),
    ("fail", -0.5, 0.4),
    ("failed", -0.5, 0.4),
    ("failure", -0.6, 0.6),
    ("loss", -0.4, 0.5),
    ("lost", -0.4, 0.5),
    ("lose", -0.4, 0.5),
    ("defeat", -0.4, 0.4),
    ("concern", -0.2, 0.4),
    ("concerned", -0.3, 0.5),
    ("worried", -0.5, 0.8),
    ("angry", -0.5, 1.0),
    ("shortage", -0.4, 0.4),
    ("shortages", -0.4, 0.4),
    ("hunger", -0.5, 0.5),
    ("poverty", -0.5, 0.5),
    ("difficult", -0.5, 1.0),
    ("problem", -0.4, 0.5),
    ("problems", -0.4, 0.5),
    ("dangerous", -0.6, 0.9),
    ("illegal", -0.5, 0.5),
    ("arrested", -0.3, 0.3),
    ("scandal", -0.6, 0.7),
    ("disappointing", -0.6, 0.7),
    ("wrong", -0.5, 0.9),
    ("hard", -0.29, 0.54),
    ("shameful", -0.8, 1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("highly", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("fairly", 0.8),
    ("somewhat", 0.7),
    ("slightly", 0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nobody", "nothing", "cannot", "without",
    "hardly", "barely",
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    polarity: f64,
    subjectivity: f64,
}

/// Default scorer used by the pipeline.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, Entry>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Scorer loaded with the built-in lexicon.
    pub fn new() -> Self {
        let words = WORDS
            .iter()
            .map(|&(w, polarity, subjectivity)| {
                (
                    w.to_string(),
                    Entry {
                        polarity,
                        subjectivity,
                    },
                )
            })
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|&(w, factor)| (w.to_string(), factor))
            .collect();

        Self {
            words,
            intensifiers,
        }
    }

    /// Add or override a lexicon entry.
    pub fn with_word(mut self, word: &str, polarity: f64, subjectivity: f64) -> Self {
        self.words.insert(
            word.to_lowercase(),
            Entry {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn is_negation(tok: &str) -> bool {
        NEGATIONS.contains(&tok) || tok.ends_with("n't")
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Score {
        let lower = text.to_lowercase();

        let mut hits: Vec<(f64, f64)> = Vec::new();
        let mut multiplier = 1.0;
        let mut negated = false;
        let mut gap = 0usize;

        for m in TOKEN.find_iter(&lower) {
            let tok = m.as_str().trim_matches('\'');
            if tok.is_empty() {
                continue;
            }

            if Self::is_negation(tok) {
                negated = true;
                gap = 0;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(tok) {
                multiplier *= factor;
                gap = 0;
                continue;
            }

            match self.words.get(tok) {
                Some(entry) => {
                    let mut polarity = entry.polarity * multiplier;
                    if negated {
                        polarity *= NEGATION_FACTOR;
                    }
                    let subjectivity = entry.subjectivity * multiplier;
                    hits.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));

                    multiplier = 1.0;
                    negated = false;
                    gap = 0;
                }
                None => {
                    gap += 1;
                    if gap > MODIFIER_WINDOW {
                        multiplier = 1.0;
                        negated = false;
                    }
                }
            }
        }

        if hits.is_empty() {
            return Score::default();
        }

        let n = hits.len() as f64;
        let polarity = hits.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = hits.iter().map(|(_, s)| s).sum::<f64>() / n;

        Score {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}
