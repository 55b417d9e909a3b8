//! Mock classifiers for testing
//!
//! Configurable implementations of the Classifier trait used to drive the
//! validator through every outcome without loading a model.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use tonecheck_classifiers::{ClassificationResult, Classifier};
use tonecheck_core::Result;

/// Returns a fixed list of predictions on every call
pub struct MockClassifier {
    name: String,
    predictions: Vec<(String, f64)>,
    call_count: AtomicU32,
}

impl MockClassifier {
    /// Classifier whose top prediction is `label` with `score`
    pub fn new(label: &str, score: f64) -> Self {
        Self {
            name: "mock".to_string(),
            predictions: vec![(label.to_string(), score)],
            call_count: AtomicU32::new(0),
        }
    }

    /// Classifier that produces no predictions
    pub fn empty() -> Self {
        Self {
            name: "mock-empty".to_string(),
            predictions: Vec::new(),
            call_count: AtomicU32::new(0),
        }
    }

    /// Append a lower-ranked prediction
    pub fn with_runner_up(mut self, label: &str, score: f64) -> Self {
        self.predictions.push((label.to_string(), score));
        self
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ClassificationResult>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        Ok(self
            .predictions
            .iter()
            .map(|(label, score)| ClassificationResult::new(label.clone(), *score))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A classifier that always fails - for testing error paths
pub struct FailingClassifier {
    error_message: String,
}

impl FailingClassifier {
    pub fn new(message: &str) -> Self {
        Self {
            error_message: message.to_string(),
        }
    }
}

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ClassificationResult>> {
        Err(tonecheck_core::Error::classifier(&self.error_message))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
