//! tonecheck Validator
//!
//! A validation rule that checks generated text carries an expected
//! financial tone. The text is classified once; the rule passes when the
//! top label matches the expected tone and its confidence is strictly above
//! the threshold, and otherwise fails with
//! `The generated text didn't have tone {tone}.`
//!
//! ```no_run
//! use std::sync::Arc;
//! use tonecheck_classifiers::LexiconClassifier;
//! use tonecheck_validator::{FinancialTone, Metadata, Validator};
//!
//! # async fn run() -> tonecheck_core::Result<()> {
//! let validator = FinancialTone::new(Arc::new(LexiconClassifier::new()?));
//! let outcome = validator.validate("I'm okay.", &Metadata::new()).await?;
//! assert!(outcome.is_pass());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decision;
pub mod request;
pub mod tone;
pub mod validator;

pub use config::{Backend, ToneDefaults, UnknownLabelPolicy, ValidatorConfig};
pub use decision::{ToneDecision, ValidationOutcome};
pub use request::{
    Metadata, ValidationRequest, DEFAULT_THRESHOLD, DEFAULT_TONE, FINANCIAL_TONE,
    FINANCIAL_TONE_THRESHOLD,
};
pub use tone::Tone;
pub use validator::{FinancialTone, Validator};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::ValidatorConfig;
    pub use crate::decision::ValidationOutcome;
    pub use crate::request::Metadata;
    pub use crate::tone::Tone;
    pub use crate::validator::{FinancialTone, Validator};
}
