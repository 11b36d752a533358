//! Triage Pipeline - orchestrator of the risk and intent cascade.
//!
//! Four ordered stages per chat message:
//! 1. Safety check (terminal on match)
//! 2. Risk scoring (fail-open when the scorer is absent)
//! 3. Intent resolution (keyword tier first, statistical fallback)
//! 4. Confidence aggregation and response selection
//!
//! The operation is total: for any input text it returns a well-formed
//! `TriageResult`. A model failure degrades the remaining pipeline to a fixed
//! safe result instead of propagating an error to the caller.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::catalog::ResponseCatalog;
use super::intent::{KeywordIntentMatcher, DEFAULT_INTENT};
use super::label_space::IntentLabelSpace;
use super::safety::{SafetyScreen, CRISIS_INTENT, EMERGENCY_RESPONSE};
use super::traits::{IntentClassifier, RiskScorer};
use crate::config::EngineConfig;
use crate::metrics::TriageMetrics;
use crate::models::{ChatRequest, RiskLevel, TriageResult};

/// Intent reported on the degraded (model-failure) path.
pub const DEGRADED_INTENT: &str = "general";

/// Neutral apology returned when a model failure degrades the pipeline.
pub const DEGRADED_RESPONSE: &str =
    "I'm having trouble processing that right now, but I'm here to listen.";

/// Decision thresholds for the cascade. Tunable configuration; the defaults
/// are the values the thresholds shipped with, not validated constants.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Statistical intent predictions at or below this score are discarded.
    pub intent_accept: f32,
    /// Risk scores above this cut point discretize to at least medium.
    pub risk_medium: f32,
    /// Risk scores above this cut point discretize to high.
    pub risk_high: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            intent_accept: 0.4,
            risk_medium: 0.4,
            risk_high: 0.7,
        }
    }
}

impl From<&EngineConfig> for Thresholds {
    fn from(config: &EngineConfig) -> Self {
        Self {
            intent_accept: config.intent_accept_threshold,
            risk_medium: config.risk_medium_cutoff,
            risk_high: config.risk_high_cutoff,
        }
    }
}

/// Explicit outcome of one cascade stage, interpreted deterministically by the
/// pipeline instead of using errors as inter-stage control flow.
enum StageOutcome<T> {
    /// The stage produced a value.
    Ok(T),
    /// The backing collaborator is not loaded; the stage's default applies.
    Unavailable,
    /// The collaborator failed at inference; the pipeline degrades.
    Failed,
}

/// The per-message decision cascade. Immutable after startup; shared by
/// reference across all concurrent requests.
pub struct TriagePipeline {
    safety: SafetyScreen,
    keyword_matcher: KeywordIntentMatcher,
    catalog: ResponseCatalog,
    label_space: Option<IntentLabelSpace>,
    risk_scorer: Option<Arc<dyn RiskScorer>>,
    intent_classifier: Option<Arc<dyn IntentClassifier>>,
    thresholds: Thresholds,
    metrics: Arc<TriageMetrics>,
}

impl TriagePipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        safety: SafetyScreen,
        catalog: ResponseCatalog,
        label_space: Option<IntentLabelSpace>,
        risk_scorer: Option<Arc<dyn RiskScorer>>,
        intent_classifier: Option<Arc<dyn IntentClassifier>>,
        thresholds: Thresholds,
        metrics: Arc<TriageMetrics>,
    ) -> Self {
        Self {
            safety,
            keyword_matcher: KeywordIntentMatcher::new(),
            catalog,
            label_space,
            risk_scorer,
            intent_classifier,
            thresholds,
            metrics,
        }
    }

    /// Triages a chat message.
    pub async fn triage(&self, request: &ChatRequest) -> TriageResult {
        let mut rng = StdRng::from_entropy();
        self.triage_with_rng(request, &mut rng).await
    }

    /// Triages a chat message with an injected randomness source, so callers
    /// and tests can make response selection reproducible.
    pub async fn triage_with_rng<R: Rng>(
        &self,
        request: &ChatRequest,
        rng: &mut R,
    ) -> TriageResult {
        let request_id = Uuid::new_v4();
        let message = request.message.as_str();

        // 1. Safety check: terminal, never pre-empted by any model.
        if self.safety.check(message) {
            warn!(%request_id, "safety layer triggered");
            self.metrics.inc_safety_triggers();
            return TriageResult {
                risk_level: RiskLevel::Severe,
                risk_score: 1.0,
                intent: CRISIS_INTENT.to_string(),
                intent_score: 1.0,
                emergency: true,
                confidence: 1.0,
                response: EMERGENCY_RESPONSE.to_string(),
            };
        }

        // 2. Risk scoring.
        let (risk_level, risk_score) = match self.score_risk(message).await {
            StageOutcome::Ok(scored) => scored,
            // Fail-open: no scorer means low risk, not an error.
            StageOutcome::Unavailable => (RiskLevel::Low, 0.0),
            StageOutcome::Failed => return self.degraded_result(request_id),
        };

        // 3. Intent resolution.
        let (intent, intent_score) = match self.resolve_intent(message).await {
            StageOutcome::Ok(resolved) => resolved,
            StageOutcome::Unavailable => (DEFAULT_INTENT.to_string(), 0.0),
            StageOutcome::Failed => return self.degraded_result(request_id),
        };

        // 4. Confidence aggregation.
        let confidence = risk_score.max(intent_score);

        // 5. Response selection.
        let response = self.catalog.select(&intent, risk_level, rng).to_string();
        self.metrics.inc_predictions();
        if risk_level.is_high_risk() {
            self.metrics.inc_high_risk();
        }

        info!(
            %request_id,
            risk = %risk_level,
            intent = %intent,
            confidence,
            "triage complete"
        );

        TriageResult {
            risk_level,
            risk_score,
            intent,
            intent_score,
            emergency: false,
            confidence,
            response,
        }
    }

    async fn score_risk(&self, message: &str) -> StageOutcome<(RiskLevel, f32)> {
        let Some(scorer) = self.risk_scorer.as_ref() else {
            return StageOutcome::Unavailable;
        };
        match scorer.score(message).await {
            Ok(score) => {
                let score = score.clamp(0.0, 1.0);
                StageOutcome::Ok((self.discretize(score), score))
            }
            Err(e) => {
                warn!("risk scorer failed: {}", e);
                StageOutcome::Failed
            }
        }
    }

    fn discretize(&self, score: f32) -> RiskLevel {
        if score > self.thresholds.risk_high {
            RiskLevel::High
        } else if score > self.thresholds.risk_medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    async fn resolve_intent(&self, message: &str) -> StageOutcome<(String, f32)> {
        // Keyword tier is authoritative; the model only sees novel phrasing.
        if let Some(hit) = self.keyword_matcher.resolve(message) {
            return StageOutcome::Ok((hit.intent.to_string(), 0.0));
        }

        let Some(classifier) = self.intent_classifier.as_ref() else {
            return StageOutcome::Unavailable;
        };
        match classifier.classify(message).await {
            Ok(prediction) => {
                // A weak prediction on the fallback tier means "don't know",
                // not a commitment.
                if prediction.score > self.thresholds.intent_accept {
                    if let Some(label) = self
                        .label_space
                        .as_ref()
                        .and_then(|space| space.label_for(prediction.index))
                    {
                        debug!(
                            intent = label,
                            score = prediction.score,
                            "statistical tier accepted"
                        );
                        return StageOutcome::Ok((label.to_string(), prediction.score));
                    }
                    warn!(
                        index = prediction.index,
                        "intent index has no label, keeping default"
                    );
                }
                StageOutcome::Ok((DEFAULT_INTENT.to_string(), 0.0))
            }
            Err(e) => {
                warn!("intent classifier failed: {}", e);
                StageOutcome::Failed
            }
        }
    }

    fn degraded_result(&self, request_id: Uuid) -> TriageResult {
        warn!(%request_id, "model failure, degrading to safe result");
        self.metrics.inc_model_failures();
        TriageResult {
            risk_level: RiskLevel::Low,
            risk_score: 0.0,
            intent: DEGRADED_INTENT.to_string(),
            intent_score: 0.0,
            emergency: false,
            confidence: 0.0,
            response: DEGRADED_RESPONSE.to_string(),
        }
    }
}
