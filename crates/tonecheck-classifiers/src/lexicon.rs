//! Lexicon-based financial tone classifier
//!
//! Counts hits against positive and negative term lists. Text without any
//! hit is neutral. Useful offline and in tests; selected explicitly through
//! configuration, never as a stand-in for a model that failed to load.

use crate::classifier::{ranked_predictions, ClassificationResult, Classifier};
use crate::model_config::FINBERT_LABELS;
use aho_corasick::{AhoCorasick, MatchKind};
use std::time::Instant;
use tonecheck_core::Result;

const POSITIVE_TERMS: &[&str] = &[
    "growth",
    "profit",
    "profits",
    "profitable",
    "gain",
    "gains",
    "increase",
    "increased",
    "exciting",
    "opportunity",
    "outperform",
    "outperformed",
    "beat expectations",
    "record high",
    "strong",
    "stronger",
    "upgrade",
    "upgraded",
    "rally",
    "surge",
    "surged",
    "dividend",
    "dividends",
];

const NEGATIVE_TERMS: &[&str] = &[
    "loss",
    "losses",
    "decline",
    "declined",
    "decrease",
    "decreased",
    "downturn",
    "bankruptcy",
    "defaulted",
    "insolvency",
    "miss expectations",
    "missed expectations",
    "weak",
    "weaker",
    "weakness",
    "downgrade",
    "downgraded",
    "plunge",
    "plunged",
    "layoff",
    "layoffs",
    "recession",
    "impairment",
    "writedown",
];

/// Weight of the neutral class, below a single term hit
const NEUTRAL_PSEUDO_COUNT: f64 = 0.5;

pub struct LexiconClassifier {
    name: String,
    positive: AhoCorasick,
    negative: AhoCorasick,
    labels: Vec<String>,
}

impl LexiconClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("financial-lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            positive: build_matcher(POSITIVE_TERMS, "positive")?,
            negative: build_matcher(NEGATIVE_TERMS, "negative")?,
            labels: FINBERT_LABELS.iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Probabilities in `FINBERT_LABELS` order.
    ///
    /// Neutral keeps a half pseudo-count, so text with no hits is fully
    /// neutral and a single hit already outranks it.
    fn probabilities(&self, text: &str) -> [f64; 3] {
        let positive_hits = count_words(&self.positive, text) as f64;
        let negative_hits = count_words(&self.negative, text) as f64;
        let total = NEUTRAL_PSEUDO_COUNT + positive_hits + negative_hits;

        [
            NEUTRAL_PSEUDO_COUNT / total,
            positive_hits / total,
            negative_hits / total,
        ]
    }
}

fn build_matcher(terms: &[&str], side: &str) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(terms)
        .map_err(|e| {
            tonecheck_core::Error::classifier(format!(
                "Failed to build {side} tone matcher: {e}"
            ))
        })
}

/// Count matches that form whole words
fn count_words(matcher: &AhoCorasick, text: &str) -> usize {
    matcher
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}

#[async_trait::async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<ClassificationResult>> {
        let start = Instant::now();
        let probs = self.probabilities(text);

        Ok(ranked_predictions(
            &self.labels,
            &probs,
            &self.name,
            start.elapsed().as_micros() as u64,
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
