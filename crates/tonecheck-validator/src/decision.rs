//! Pass/fail decision over a classifier prediction

use crate::config::UnknownLabelPolicy;
use crate::request::{Metadata, ValidationRequest};
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use tonecheck_classifiers::{ClassificationResult, Classifier};
use tonecheck_core::{Error, Result};
use tracing::{debug, warn};

/// Result of validating one piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Pass,
    Fail {
        message: String,
        /// The caller's metadata for the failed call
        #[serde(default, skip_serializing_if = "Metadata::is_empty")]
        metadata: Metadata,
    },
}

impl ValidationOutcome {
    /// Failure naming the tone the text should have had
    pub fn tone_mismatch(expected: Tone) -> Self {
        Self::Fail {
            message: format!("The generated text didn't have tone {}.", expected),
            metadata: Metadata::new(),
        }
    }

    /// Attach caller metadata to a failure
    pub fn with_metadata(self, metadata: Metadata) -> Self {
        match self {
            Self::Pass => Self::Pass,
            Self::Fail { message, .. } => Self::Fail { message, metadata },
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail { message, .. } => Some(message),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail { .. } => "fail",
        }
    }
}

/// Turns the classifier's top prediction into an outcome.
///
/// Passes iff the predicted label names the expected tone and its score is
/// strictly greater than the threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneDecision {
    on_unknown_label: UnknownLabelPolicy,
}

impl ToneDecision {
    pub fn new(on_unknown_label: UnknownLabelPolicy) -> Self {
        Self { on_unknown_label }
    }

    /// Classify `request.text` once and decide
    pub async fn evaluate(
        &self,
        classifier: &dyn Classifier,
        request: &ValidationRequest,
    ) -> Result<ValidationOutcome> {
        let predictions = classifier.classify(&request.text).await?;
        self.decide(request, &predictions)
    }

    /// Decide from predictions ordered best first
    pub fn decide(
        &self,
        request: &ValidationRequest,
        predictions: &[ClassificationResult],
    ) -> Result<ValidationOutcome> {
        let top = predictions
            .first()
            .ok_or_else(|| Error::upstream("Failed to get model prediction."))?;

        let predicted = match Tone::from_label(&top.label) {
            Some(tone) => tone,
            None => match self.on_unknown_label {
                UnknownLabelPolicy::Error => {
                    return Err(Error::contract_violation(format!(
                        "classifier returned label '{}', expected one of Positive, Negative, Neutral",
                        top.label
                    )))
                }
                UnknownLabelPolicy::Reject => {
                    warn!(
                        label = %top.label,
                        "Classifier returned an unknown label, rejecting"
                    );
                    return Ok(ValidationOutcome::tone_mismatch(request.expected_tone)
                        .with_metadata(request.metadata.clone()));
                }
            },
        };

        debug!(label = %top.label, confidence = top.score, "Predicted tone");

        if predicted == request.expected_tone && top.exceeds_threshold(request.threshold) {
            Ok(ValidationOutcome::Pass)
        } else {
            Ok(ValidationOutcome::tone_mismatch(request.expected_tone)
                .with_metadata(request.metadata.clone()))
        }
    }
}
