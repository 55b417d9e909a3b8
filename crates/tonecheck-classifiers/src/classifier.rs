//! Classifier trait and common types

use async_trait::async_trait;
use tonecheck_core::Result;

/// Trait for all sentiment classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text.
    ///
    /// Predictions are ordered by descending score, so the first entry is the
    /// top label. An empty vector means the backend produced nothing.
    async fn classify(&self, text: &str) -> Result<Vec<ClassificationResult>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Classification label
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub score: f64,

    /// Additional metadata
    pub metadata: ClassificationMetadata,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
            metadata: ClassificationMetadata::default(),
            latency_us: 0,
        }
    }

    /// Check if score is strictly above threshold
    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.score > threshold
    }
}

/// Metadata about classification
#[derive(Debug, Clone, Default)]
pub struct ClassificationMetadata {
    /// Model name or version
    pub model: Option<String>,

    /// All class scores (for multi-class classifiers)
    pub all_scores: Option<Vec<(String, f64)>>,
}

/// Build predictions from per-label probabilities, highest first.
pub fn ranked_predictions(
    labels: &[String],
    probs: &[f64],
    model: &str,
    latency_us: u64,
) -> Vec<ClassificationResult> {
    let all_scores: Vec<(String, f64)> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (label.clone(), probs.get(idx).copied().unwrap_or(0.0)))
        .collect();

    let mut ranked: Vec<ClassificationResult> = all_scores
        .iter()
        .map(|(label, score)| ClassificationResult {
            label: label.clone(),
            score: *score,
            metadata: ClassificationMetadata {
                model: Some(model.to_string()),
                all_scores: Some(all_scores.clone()),
            },
            latency_us,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds_threshold_is_strict() {
        let result = ClassificationResult::new("Neutral", 0.8);
        assert!(!result.exceeds_threshold(0.8));
        assert!(result.exceeds_threshold(0.79));
        assert!(result.exceeds_threshold(0.799_999_99));
    }

    #[test]
    fn test_ranked_predictions_order() {
        let labels = vec![
            "Neutral".to_string(),
            "Positive".to_string(),
            "Negative".to_string(),
        ];
        let ranked = ranked_predictions(&labels, &[0.1, 0.7, 0.2], "finbert-tone", 42);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].label, "Positive");
        assert_eq!(ranked[1].label, "Negative");
        assert_eq!(ranked[2].label, "Neutral");
        assert_eq!(ranked[0].latency_us, 42);
        assert_eq!(
            ranked[0].metadata.all_scores.as_ref().map(|s| s.len()),
            Some(3)
        );
    }

    #[test]
    fn test_ranked_predictions_missing_probs() {
        let labels = vec!["Neutral".to_string(), "Positive".to_string()];
        let ranked = ranked_predictions(&labels, &[0.9], "m", 0);
        assert_eq!(ranked[0].label, "Neutral");
        assert_eq!(ranked[1].score, 0.0);
    }
}
