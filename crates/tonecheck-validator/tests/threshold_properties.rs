//! Property tests for the tone decision rule

use proptest::prelude::*;
use tonecheck_classifiers::ClassificationResult;
use tonecheck_core::Error;
use tonecheck_validator::{Metadata, ToneDecision, Tone, ToneDefaults, ValidationRequest};

fn tone() -> impl Strategy<Value = Tone> {
    prop::sample::select(Tone::ALL.to_vec())
}

fn label() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Positive", "Negative", "Neutral", "POSITIVE", "neutral"])
        .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn pass_iff_label_matches_and_score_above_threshold(
        expected in tone(),
        label in label(),
        threshold in 0.0f64..=1.0,
        score in 0.0f64..=1.0,
    ) {
        let request = ValidationRequest::new("text", expected, threshold).unwrap();
        let predictions = vec![ClassificationResult::new(label.clone(), score)];

        let outcome = ToneDecision::default().decide(&request, &predictions).unwrap();
        let matches = label.eq_ignore_ascii_case(expected.as_str());

        prop_assert_eq!(outcome.is_pass(), matches && score > threshold);
    }

    #[test]
    fn score_equal_to_threshold_never_passes(expected in tone(), threshold in 0.0f64..=1.0) {
        let request = ValidationRequest::new("text", expected, threshold).unwrap();
        let label = expected.as_str().to_string();
        let predictions = vec![ClassificationResult::new(label, threshold)];

        let outcome = ToneDecision::default().decide(&request, &predictions).unwrap();
        prop_assert!(!outcome.is_pass());
    }

    #[test]
    fn unknown_tone_is_invalid(tone in "[a-zA-Z_ ]{0,12}", threshold in 0.0f64..=1.0) {
        prop_assume!(!["positive", "negative", "neutral"].contains(&tone.as_str()));

        let mut metadata = Metadata::new();
        metadata.insert("financial_tone".to_string(), tone.into());
        metadata.insert("financial_tone_threshold".to_string(), threshold.into());

        let err = ValidationRequest::from_metadata("text", &metadata, &ToneDefaults::default())
            .unwrap_err();
        prop_assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
