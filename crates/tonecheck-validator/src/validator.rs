//! Host-facing validator surface

use crate::config::{Backend, ToneDefaults, ValidatorConfig};
use crate::decision::{ToneDecision, ValidationOutcome};
use crate::request::{Metadata, ValidationRequest};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tonecheck_classifiers::{Classifier, LexiconClassifier, ModelConfig};
use tonecheck_core::Result;
use tracing::info;

/// A validation rule a host framework can run against generated values
#[async_trait]
pub trait Validator: Send + Sync {
    /// Registered name of the rule
    fn name(&self) -> &str;

    /// Data type of the values the rule accepts
    fn data_type(&self) -> &str {
        "string"
    }

    /// Validate `value` using options from `metadata`
    async fn validate(&self, value: &str, metadata: &Metadata) -> Result<ValidationOutcome>;
}

/// Validates that generated text has a given financial tone.
///
/// | option | effect | default |
/// |---|---|---|
/// | `financial_tone` | `positive`, `negative`, or `neutral` | `neutral` |
/// | `financial_tone_threshold` | confidence the prediction must exceed | `0.8` |
///
/// The classifier is built once and shared by every call.
pub struct FinancialTone {
    classifier: Arc<dyn Classifier>,
    defaults: ToneDefaults,
    decision: ToneDecision,
}

impl FinancialTone {
    pub const NAME: &'static str = "cartesia/financial-tone";

    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self::with_config(classifier, &ValidatorConfig::default())
    }

    /// Use `classifier` with defaults and label policy from `config`.
    /// `config.backend` and `config.model` are ignored.
    pub fn with_config(classifier: Arc<dyn Classifier>, config: &ValidatorConfig) -> Self {
        Self {
            classifier,
            defaults: config.defaults,
            decision: ToneDecision::new(config.on_unknown_label),
        }
    }

    /// Build the configured backend, fetching model files on first use
    pub async fn from_config(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        let classifier: Arc<dyn Classifier> = match config.backend {
            Backend::Lexicon => Arc::new(LexiconClassifier::new()?),
            Backend::Finbert => load_finbert(&config.model).await?,
        };
        info!(
            "FinancialTone validator ready with classifier '{}'",
            classifier.name()
        );
        Ok(Self::with_config(classifier, &config))
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    pub fn defaults(&self) -> &ToneDefaults {
        &self.defaults
    }

    /// Build the request `validate` would run
    pub fn request(&self, value: &str, metadata: &Metadata) -> Result<ValidationRequest> {
        ValidationRequest::from_metadata(value, metadata, &self.defaults)
    }
}

#[async_trait]
impl Validator for FinancialTone {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn validate(&self, value: &str, metadata: &Metadata) -> Result<ValidationOutcome> {
        let start = Instant::now();

        let result: Result<ValidationOutcome> = async {
            let request = self.request(value, metadata)?;
            self.decision.evaluate(&*self.classifier, &request).await
        }
        .await;

        let outcome = match &result {
            Ok(outcome) => outcome.kind(),
            Err(_) => "error",
        };
        metrics::counter!("tonecheck_validations_total", "outcome" => outcome).increment(1);
        metrics::histogram!("tonecheck_validation_latency_us")
            .record(start.elapsed().as_micros() as f64);

        result
    }
}

#[cfg(feature = "ml-models")]
async fn load_finbert(model: &ModelConfig) -> Result<Arc<dyn Classifier>> {
    use tonecheck_classifiers::{FinbertClassifier, ModelResources};

    let owned;
    let resources = if model.source == Default::default() {
        ModelResources::finbert()
    } else {
        owned = ModelResources::new(model.source.clone());
        &owned
    };

    Ok(Arc::new(FinbertClassifier::load(model, resources).await?))
}

#[cfg(not(feature = "ml-models"))]
async fn load_finbert(_model: &ModelConfig) -> Result<Arc<dyn Classifier>> {
    Err(tonecheck_core::Error::missing_dependency(
        "You must enable the `ml-models` feature in order to use the FinBERT backend \
         of the FinancialTone validator.",
    ))
}
