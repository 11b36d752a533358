//! Severity band grids over every reachable score, plus submission
//! validation and wire-format checks.

use std::sync::Arc;

use crate::error::EngineError;
use crate::metrics::TriageMetrics;
use crate::models::{InstrumentKind, ScreeningRequest, SeverityLabel};
use crate::screening::{ScreeningClassifier, RULE_BASED_CONFIDENCE};

fn classifier() -> ScreeningClassifier {
    ScreeningClassifier::new("v1.0", Arc::new(TriageMetrics::new()))
}

/// Builds an answer vector for the given instrument summing to `total`.
fn answers_for(instrument: InstrumentKind, total: i64) -> Vec<i64> {
    let mut answers = vec![0i64; instrument.item_count()];
    let mut remaining = total;
    for answer in answers.iter_mut() {
        let take = remaining.min(3);
        *answer = take;
        remaining -= take;
    }
    answers
}

fn expected_phq9(score: i64) -> SeverityLabel {
    match score {
        0..=4 => SeverityLabel::None,
        5..=9 => SeverityLabel::Mild,
        10..=14 => SeverityLabel::Moderate,
        15..=19 => SeverityLabel::ModeratelySevere,
        _ => SeverityLabel::Severe,
    }
}

fn expected_gad7(score: i64) -> SeverityLabel {
    match score {
        0..=4 => SeverityLabel::None,
        5..=9 => SeverityLabel::Mild,
        10..=14 => SeverityLabel::Moderate,
        _ => SeverityLabel::Severe,
    }
}

#[test]
fn test_phq9_full_score_grid() {
    let classifier = classifier();
    for score in 0..=27 {
        let request = ScreeningRequest {
            instrument: InstrumentKind::Phq9,
            answers: answers_for(InstrumentKind::Phq9, score),
            free_text: None,
        };
        let outcome = classifier.classify(&request).unwrap();
        assert_eq!(outcome.score, score);
        assert_eq!(outcome.risk_level, expected_phq9(score), "score {}", score);
    }
}

#[test]
fn test_gad7_full_score_grid() {
    let classifier = classifier();
    for score in 0..=21 {
        let request = ScreeningRequest {
            instrument: InstrumentKind::Gad7,
            answers: answers_for(InstrumentKind::Gad7, score),
            free_text: None,
        };
        let outcome = classifier.classify(&request).unwrap();
        assert_eq!(outcome.risk_level, expected_gad7(score), "score {}", score);
    }
}

#[test]
fn test_scenario_a_maximum_phq9() {
    let classifier = classifier();
    let request = ScreeningRequest {
        instrument: InstrumentKind::Phq9,
        answers: vec![3, 3, 3, 3, 3, 3, 3, 3, 3],
        free_text: None,
    };
    let outcome = classifier.classify(&request).unwrap();
    assert_eq!(outcome.score, 27);
    assert_eq!(outcome.risk_level, SeverityLabel::Severe);
}

#[test]
fn test_submission_never_truncated_or_padded() {
    let classifier = classifier();

    // Too long for GAD-7 even though it would fit PHQ-9.
    let long = ScreeningRequest {
        instrument: InstrumentKind::Gad7,
        answers: vec![0; 9],
        free_text: None,
    };
    assert!(matches!(
        classifier.classify(&long),
        Err(EngineError::Validation(_))
    ));

    let short = ScreeningRequest {
        instrument: InstrumentKind::Phq9,
        answers: vec![0; 7],
        free_text: None,
    };
    assert!(matches!(
        classifier.classify(&short),
        Err(EngineError::Validation(_))
    ));

    let empty = ScreeningRequest {
        instrument: InstrumentKind::Phq9,
        answers: Vec::new(),
        free_text: None,
    };
    assert!(classifier.classify(&empty).is_err());
}

#[test]
fn test_outcome_wire_format() {
    let classifier = classifier();
    let request = ScreeningRequest {
        instrument: InstrumentKind::Phq9,
        answers: answers_for(InstrumentKind::Phq9, 16),
        free_text: None,
    };
    let outcome = classifier.classify(&request).unwrap();
    assert_eq!(outcome.confidence, RULE_BASED_CONFIDENCE);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["riskLevel"], "moderately-severe");
    assert_eq!(json["explanation"]["method"], "rule-based");
    assert_eq!(json["modelVersion"], "v1.0");
    assert_eq!(json["score"], 16);
}

#[test]
fn test_free_text_is_accepted_and_ignored() {
    let classifier = classifier();
    let request = ScreeningRequest {
        instrument: InstrumentKind::Gad7,
        answers: answers_for(InstrumentKind::Gad7, 3),
        free_text: Some("mostly fine, some rough mornings".to_string()),
    };
    let outcome = classifier.classify(&request).unwrap();
    assert_eq!(outcome.risk_level, SeverityLabel::None);
}
