//! Sentiment scoring and labelling.
//!
//! Scoring is delegated to a [`SentimentScorer`]; this module only owns the
//! contract around it: scores are clamped into range and the label is derived
//! from polarity with fixed, exclusive cutoffs.
//!
//! | polarity          | label      |
//! |-------------------|------------|
//! | `> 0.1`           | `positive` |
//! | `< -0.1`          | `negative` |
//! | `[-0.1, 0.1]`     | `neutral`  |

pub mod lexicon;

use crate::models::{Sentiment, SentimentLabel};

pub use lexicon::LexiconScorer;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Raw output of a scorer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Anything that can turn text into a polarity/subjectivity pair.
///
/// Implementations should return `Score::default()` for text they cannot
/// score. Out-of-range values are clamped by [`annotate`].
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Score;
}

/// Map a polarity onto its label.
pub fn label_for(polarity: f64) -> SentimentLabel {
    if polarity > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Score `text` and attach a label.
pub fn annotate<S: SentimentScorer + ?Sized>(scorer: &S, text: &str) -> Sentiment {
    let Score {
        polarity,
        subjectivity,
    } = scorer.score(text);
    let polarity = clamp_or_zero(polarity, -1.0, 1.0);
    let subjectivity = clamp_or_zero(subjectivity, 0.0, 1.0);

    Sentiment {
        polarity,
        subjectivity,
        label: label_for(polarity),
    }
}

// NaN from a misbehaving scorer would otherwise escape the range check.
fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}
