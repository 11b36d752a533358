//! Wire types for the two request-time operations.
//!
//! Field names serialize in camelCase (`riskLevel`, `riskScore`, `intentScore`)
//! to match the contract the chat and screening clients already speak.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Discretized danger category for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Severe,
}

impl RiskLevel {
    /// Returns the wire label for the risk level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        }
    }

    /// High and severe results feed the high-risk observability counter.
    pub fn is_high_risk(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Severe)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clinical severity label produced by the screening path.
///
/// The two instruments share one label set; GAD-7 simply never produces
/// `ModeratelySevere`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLabel {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "mild")]
    Mild,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "moderately-severe")]
    ModeratelySevere,
    #[serde(rename = "severe")]
    Severe,
}

impl SeverityLabel {
    /// Returns the wire label for the severity band.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLabel::None => "none",
            SeverityLabel::Mild => "mild",
            SeverityLabel::Moderate => "moderate",
            SeverityLabel::ModeratelySevere => "moderately-severe",
            SeverityLabel::Severe => "severe",
        }
    }

    /// Moderately-severe and severe screenings feed the high-risk counter.
    pub fn is_high_risk(&self) -> bool {
        matches!(self, SeverityLabel::ModeratelySevere | SeverityLabel::Severe)
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two supported screening instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// PHQ-9 depression questionnaire, 9 items scored 0-3.
    #[serde(rename = "PHQ9")]
    Phq9,
    /// GAD-7 anxiety questionnaire, 7 items scored 0-3.
    #[serde(rename = "GAD7")]
    Gad7,
}

impl InstrumentKind {
    /// Returns the wire label for the instrument.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Phq9 => "PHQ9",
            InstrumentKind::Gad7 => "GAD7",
        }
    }

    /// Fixed number of items the instrument carries.
    pub fn item_count(&self) -> usize {
        match self {
            InstrumentKind::Phq9 => 9,
            InstrumentKind::Gad7 => 7,
        }
    }

    /// Maximum possible total score (item_count * 3).
    pub fn max_score(&self) -> i64 {
        self.item_count() as i64 * 3
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted screening questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_screening_shape"))]
pub struct ScreeningRequest {
    /// Which instrument the answers belong to.
    #[serde(rename = "type")]
    pub instrument: InstrumentKind,
    /// Ordered per-item scores, each in [0, 3].
    pub answers: Vec<i64>,
    /// Optional free-text the student attached; not used by the classifier.
    #[serde(default)]
    pub free_text: Option<String>,
}

/// Shape validation for a screening submission: exact item count and per-item
/// range. Violations are rejected, never silently truncated or padded.
fn validate_screening_shape(request: &ScreeningRequest) -> Result<(), ValidationError> {
    let expected = request.instrument.item_count();
    if request.answers.len() != expected {
        let mut err = ValidationError::new("item_count");
        err.message = Some(
            format!(
                "{} requires exactly {} answers, got {}",
                request.instrument,
                expected,
                request.answers.len()
            )
            .into(),
        );
        return Err(err);
    }
    if let Some(bad) = request.answers.iter().find(|a| !(0..=3).contains(*a)) {
        let mut err = ValidationError::new("answer_range");
        err.message = Some(format!("answer {} is outside [0, 3]", bad).into());
        return Err(err);
    }
    Ok(())
}

/// Tag distinguishing deterministic from statistical screening answers, so
/// downstream consumers never have to inspect internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationMethod {
    #[serde(rename = "rule-based")]
    RuleBased,
    #[serde(rename = "model")]
    Model,
}

/// How a screening outcome was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub method: ClassificationMethod,
}

/// Result of the screening operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningOutcome {
    /// Total score, the sum of all item answers.
    pub score: i64,
    /// Severity label from the instrument's band table.
    pub risk_level: SeverityLabel,
    /// Fixed confidence for the rule-based method.
    pub confidence: f32,
    pub explanation: Explanation,
    pub model_version: String,
}

/// A single prior turn of the conversation. Accepted for forward
/// compatibility; the core decision logic does not read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub sender: String,
    pub message: String,
}

/// An inbound chat message to triage.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// The message text.
    #[validate(length(min = 1))]
    pub message: String,
    /// Optional free-form client context, unused by the cascade.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
    /// Optional prior-turn history, unused by the cascade.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

impl ChatRequest {
    /// Convenience constructor for a bare message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            history: Vec::new(),
        }
    }
}

/// Result of the chat triage operation. Ephemeral and owned by the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub risk_level: RiskLevel,
    pub risk_score: f32,
    pub intent: String,
    pub intent_score: f32,
    pub emergency: bool,
    pub confidence: f32,
    pub response: String,
}

/// A frequent token and its count, from the keyword-analysis operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}
