//! tonecheck Classifiers
//!
//! Sentiment classifiers that label text as `Positive`, `Negative`, or
//! `Neutral` with a confidence score.
//!
//! - [`FinbertClassifier`] runs the FinBERT tone model with Candle
//!   (requires the `ml-models` feature)
//! - [`LexiconClassifier`] matches financial term lists, no model needed
//!
//! Model files are acquired once through [`ModelResources`].

pub mod bootstrap;
pub mod classifier;
#[cfg(feature = "ml-models")]
pub mod finbert;
pub mod lexicon;
pub mod model_config;

pub use bootstrap::ModelResources;
pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
#[cfg(feature = "ml-models")]
pub use finbert::FinbertClassifier;
pub use lexicon::LexiconClassifier;
pub use model_config::{ModelConfig, ModelSource, FINBERT_LABELS, FINBERT_REPO};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bootstrap::ModelResources;
    pub use crate::classifier::{ClassificationResult, Classifier};
    #[cfg(feature = "ml-models")]
    pub use crate::finbert::FinbertClassifier;
    pub use crate::lexicon::LexiconClassifier;
    pub use crate::model_config::{ModelConfig, ModelSource};
}
