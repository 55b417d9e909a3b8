//! Model configuration structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hugging Face repository of the financial tone model
pub const FINBERT_REPO: &str = "yiyanghkust/finbert-tone";

/// Label order of the FinBERT tone head when `config.json` carries no `id2label`
pub const FINBERT_LABELS: [&str; 3] = ["Neutral", "Positive", "Negative"];

/// Configuration for the sentiment model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name reported in classification metadata
    #[serde(default = "default_name")]
    pub name: String,

    /// Model source (where to load from)
    #[serde(default)]
    pub source: ModelSource,

    /// Device to run on (cpu, cuda, metal)
    #[serde(default = "default_device")]
    pub device: String,

    /// Maximum sequence length in tokens
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Labels by class index, used when the model config has none
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
}

/// Model source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelSource {
    /// Load from a local model directory
    Local { path: PathBuf },

    /// Download from Hugging Face Hub
    HuggingFace {
        repo: String,
        #[serde(default = "default_revision")]
        revision: String,
    },
}

impl Default for ModelSource {
    fn default() -> Self {
        Self::HuggingFace {
            repo: FINBERT_REPO.to_string(),
            revision: default_revision(),
        }
    }
}

impl ModelSource {
    /// Short description for log lines
    pub fn describe(&self) -> String {
        match self {
            Self::Local { path } => path.display().to_string(),
            Self::HuggingFace { repo, revision } => format!("{}@{}", repo, revision),
        }
    }
}

fn default_name() -> String {
    "finbert-tone".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_max_length() -> usize {
    512
}

fn default_labels() -> Vec<String> {
    FINBERT_LABELS.iter().map(|l| l.to_string()).collect()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            source: ModelSource::default(),
            device: default_device(),
            max_length: default_max_length(),
            labels: default_labels(),
        }
    }
}

impl ModelConfig {
    /// Configuration for a model directory on disk
    pub fn from_local(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ModelSource::Local { path: path.into() },
            ..Default::default()
        }
    }

    /// Set device
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Set maximum sequence length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}
