//! Screening Severity Classifier.
//!
//! Deterministic, auditable mapping from a submitted answer vector to a
//! clinical severity label via per-instrument band tables. Shares the
//! zero-surprise design of the safety layer: fixed tables, no statistics.

use std::sync::Arc;
use tracing::{debug, error};
use validator::Validate;

use crate::error::EngineError;
use crate::metrics::TriageMetrics;
use crate::models::{
    ClassificationMethod, Explanation, InstrumentKind, ScreeningOutcome, ScreeningRequest,
    SeverityLabel,
};

/// Fixed confidence reported for rule-based severity classification.
pub const RULE_BASED_CONFIDENCE: f32 = 0.95;

/// One inclusive score range of a severity band table.
#[derive(Debug, Clone, Copy)]
pub struct SeverityBand {
    pub lo: i64,
    pub hi: i64,
    pub label: SeverityLabel,
}

/// PHQ-9 severity bands, covering [0, 27] exactly once.
const PHQ9_BANDS: &[SeverityBand] = &[
    SeverityBand { lo: 0, hi: 4, label: SeverityLabel::None },
    SeverityBand { lo: 5, hi: 9, label: SeverityLabel::Mild },
    SeverityBand { lo: 10, hi: 14, label: SeverityLabel::Moderate },
    SeverityBand { lo: 15, hi: 19, label: SeverityLabel::ModeratelySevere },
    SeverityBand { lo: 20, hi: 27, label: SeverityLabel::Severe },
];

/// GAD-7 severity bands, covering [0, 21] exactly once.
const GAD7_BANDS: &[SeverityBand] = &[
    SeverityBand { lo: 0, hi: 4, label: SeverityLabel::None },
    SeverityBand { lo: 5, hi: 9, label: SeverityLabel::Mild },
    SeverityBand { lo: 10, hi: 14, label: SeverityLabel::Moderate },
    SeverityBand { lo: 15, hi: 21, label: SeverityLabel::Severe },
];

impl InstrumentKind {
    /// The severity band table for this instrument.
    pub fn bands(&self) -> &'static [SeverityBand] {
        match self {
            InstrumentKind::Phq9 => PHQ9_BANDS,
            InstrumentKind::Gad7 => GAD7_BANDS,
        }
    }
}

/// Verifies that both band tables are ordered, non-overlapping, and cover
/// `[0, max_score]` exactly once.
///
/// Called during startup; a violation here is a configuration defect in the
/// tables themselves and is fatal, never a per-request condition.
pub fn verify_band_tables() -> Result<(), EngineError> {
    for instrument in [InstrumentKind::Phq9, InstrumentKind::Gad7] {
        let bands = instrument.bands();
        let mut expected_lo = 0i64;
        for band in bands {
            if band.lo != expected_lo || band.hi < band.lo {
                return Err(EngineError::Internal(format!(
                    "{} band table is not contiguous at [{}, {}]",
                    instrument, band.lo, band.hi
                )));
            }
            expected_lo = band.hi + 1;
        }
        if expected_lo != instrument.max_score() + 1 {
            return Err(EngineError::Internal(format!(
                "{} band table covers [0, {}], expected [0, {}]",
                instrument,
                expected_lo - 1,
                instrument.max_score()
            )));
        }
    }
    Ok(())
}

/// Maps a submitted questionnaire to a severity label.
pub struct ScreeningClassifier {
    model_version: String,
    metrics: Arc<TriageMetrics>,
}

impl ScreeningClassifier {
    pub fn new(model_version: impl Into<String>, metrics: Arc<TriageMetrics>) -> Self {
        Self {
            model_version: model_version.into(),
            metrics,
        }
    }

    /// Classifies a screening submission.
    ///
    /// Rejects malformed input with `EngineError::Validation`; never fails for
    /// a validly-shaped submission. A total score the band table does not
    /// cover is an internal invariant violation, not a user error.
    pub fn classify(&self, request: &ScreeningRequest) -> Result<ScreeningOutcome, EngineError> {
        request.validate()?;

        let score: i64 = request.answers.iter().sum();
        let label = self.lookup_band(request.instrument, score)?;

        debug!(
            instrument = %request.instrument,
            score,
            label = %label,
            "screening classified"
        );

        self.metrics.inc_predictions();
        if label.is_high_risk() {
            self.metrics.inc_high_risk();
        }

        Ok(ScreeningOutcome {
            score,
            risk_level: label,
            confidence: RULE_BASED_CONFIDENCE,
            explanation: Explanation {
                method: ClassificationMethod::RuleBased,
            },
            model_version: self.model_version.clone(),
        })
    }

    fn lookup_band(
        &self,
        instrument: InstrumentKind,
        score: i64,
    ) -> Result<SeverityLabel, EngineError> {
        instrument
            .bands()
            .iter()
            .find(|band| (band.lo..=band.hi).contains(&score))
            .map(|band| band.label)
            .ok_or_else(|| {
                // A validated submission cannot sum outside [0, max]; reaching
                // this branch means the table itself is defective.
                error!(
                    instrument = %instrument,
                    score,
                    "score outside band table coverage"
                );
                EngineError::Internal(format!(
                    "score {} is outside the {} band table",
                    score, instrument
                ))
            })
    }
}
