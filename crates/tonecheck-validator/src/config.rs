//! Validator configuration

use crate::request::{check_threshold, DEFAULT_THRESHOLD, DEFAULT_TONE};
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tonecheck_classifiers::ModelConfig;
use tonecheck_core::Result;

/// Configuration for the financial tone validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Which classifier backs the validator
    #[serde(default)]
    pub backend: Backend,

    /// Model settings for the `finbert` backend
    #[serde(default)]
    pub model: ModelConfig,

    /// Values used when metadata omits a key
    #[serde(default)]
    pub defaults: ToneDefaults,

    /// What to do when the classifier returns a label outside its vocabulary
    #[serde(default)]
    pub on_unknown_label: UnknownLabelPolicy,
}

/// Classifier backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// FinBERT tone model, requires the `ml-models` feature
    #[default]
    Finbert,
    /// Term-list matching, no model files
    Lexicon,
}

/// Handling of classifier labels other than Positive, Negative, Neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLabelPolicy {
    /// Raise a contract violation
    #[default]
    Error,
    /// Fail the validation with the usual message
    Reject,
}

/// Defaults for metadata keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneDefaults {
    #[serde(default = "default_tone")]
    pub financial_tone: Tone,

    #[serde(default = "default_threshold")]
    pub financial_tone_threshold: f64,
}

impl Default for ToneDefaults {
    fn default() -> Self {
        Self {
            financial_tone: default_tone(),
            financial_tone_threshold: default_threshold(),
        }
    }
}

fn default_tone() -> Tone {
    DEFAULT_TONE
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl ValidatorConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Configuration using the lexicon backend
    pub fn lexicon() -> Self {
        Self {
            backend: Backend::Lexicon,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_threshold(self.defaults.financial_tone_threshold)?;
        Ok(())
    }
}
