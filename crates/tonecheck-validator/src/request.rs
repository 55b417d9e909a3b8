//! Validation requests built from caller metadata

use crate::config::ToneDefaults;
use crate::tone::Tone;
use serde_json::Value;
use tonecheck_core::{Error, Result};

/// Caller metadata passed alongside the value under validation
pub type Metadata = serde_json::Map<String, Value>;

/// Metadata key holding the expected tone
pub const FINANCIAL_TONE: &str = "financial_tone";

/// Metadata key holding the confidence threshold
pub const FINANCIAL_TONE_THRESHOLD: &str = "financial_tone_threshold";

pub const DEFAULT_TONE: Tone = Tone::Neutral;

pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// One validation: the text, the tone it must carry, and the confidence
/// the classifier must strictly exceed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub text: String,
    pub expected_tone: Tone,
    pub threshold: f64,
    /// Caller metadata, handed back on failure
    pub metadata: Metadata,
}

impl ValidationRequest {
    pub fn new(text: impl Into<String>, expected_tone: Tone, threshold: f64) -> Result<Self> {
        Ok(Self {
            text: text.into(),
            expected_tone,
            threshold: check_threshold(threshold)?,
            metadata: Metadata::new(),
        })
    }

    /// Read tone and threshold from `metadata`, falling back to `defaults`
    pub fn from_metadata(
        text: impl Into<String>,
        metadata: &Metadata,
        defaults: &ToneDefaults,
    ) -> Result<Self> {
        let expected_tone = match metadata.get(FINANCIAL_TONE) {
            None => defaults.financial_tone,
            Some(Value::String(tone)) => tone.parse()?,
            Some(other) => {
                return Err(Error::invalid_configuration(format!(
                    "The key `{}` must be a string, got {}",
                    FINANCIAL_TONE, other
                )))
            }
        };

        let threshold = match metadata.get(FINANCIAL_TONE_THRESHOLD) {
            None => defaults.financial_tone_threshold,
            Some(value) => check_threshold(parse_threshold(value)?)?,
        };

        Ok(Self {
            text: text.into(),
            expected_tone,
            threshold,
            metadata: metadata.clone(),
        })
    }
}

/// Numbers and numeric strings are both accepted
fn parse_threshold(value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        Error::invalid_configuration(format!(
            "The key `{}` must be a number, got {}",
            FINANCIAL_TONE_THRESHOLD, value
        ))
    })
}

pub(crate) fn check_threshold(threshold: f64) -> Result<f64> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(Error::invalid_configuration(format!(
            "The key `{}` must be within [0, 1], got {}",
            FINANCIAL_TONE_THRESHOLD, threshold
        )));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_metadata_uses_defaults() {
        let request =
            ValidationRequest::from_metadata("I'm okay.", &Metadata::new(), &ToneDefaults::default())
                .unwrap();

        assert_eq!(request.expected_tone, Tone::Neutral);
        assert_eq!(request.threshold, 0.8);
        assert_eq!(request.text, "I'm okay.");
    }

    #[test]
    fn test_reads_tone_and_threshold() {
        let meta = metadata(json!({
            "financial_tone": "positive",
            "financial_tone_threshold": 0.65
        }));
        let request =
            ValidationRequest::from_metadata("text", &meta, &ToneDefaults::default()).unwrap();

        assert_eq!(request.expected_tone, Tone::Positive);
        assert_eq!(request.threshold, 0.65);
        assert_eq!(request.metadata, meta);
    }

    #[test]
    fn test_threshold_keeps_full_precision() {
        let meta = metadata(json!({ "financial_tone_threshold": 0.79999999 }));
        let request =
            ValidationRequest::from_metadata("text", &meta, &ToneDefaults::default()).unwrap();

        assert_eq!(request.threshold, 0.79999999);
        assert!(request.threshold < 0.8);
    }

    #[test]
    fn test_threshold_as_string() {
        let meta = metadata(json!({ "financial_tone_threshold": " 0.9 " }));
        let request =
            ValidationRequest::from_metadata("text", &meta, &ToneDefaults::default()).unwrap();
        assert_eq!(request.threshold, 0.9);
    }

    #[test]
    fn test_invalid_tone() {
        for tone in [json!("bullish"), json!("Positive"), json!(1), json!(null)] {
            let meta = metadata(json!({ "financial_tone": tone }));
            let err = ValidationRequest::from_metadata("text", &meta, &ToneDefaults::default())
                .unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_invalid_threshold() {
        for threshold in [json!("high"), json!(1.5), json!(-0.1), json!(true)] {
            let meta = metadata(json!({ "financial_tone_threshold": threshold }));
            let err = ValidationRequest::from_metadata("text", &meta, &ToneDefaults::default())
                .unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_new_checks_threshold() {
        assert!(ValidationRequest::new("t", Tone::Negative, 0.0).is_ok());
        assert!(ValidationRequest::new("t", Tone::Negative, 1.0).is_ok());
        assert!(ValidationRequest::new("t", Tone::Negative, f64::NAN).is_err());
    }
}
