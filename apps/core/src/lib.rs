//! # Mindline Decision Core
//!
//! Request-time decision engine for a student mental-health support product.
//! Two operations: triaging a free-text chat message into a risk level, an
//! intent, and a selected reply; and mapping a screening questionnaire
//! (PHQ-9 / GAD-7) to a clinical severity label.
//!
//! The chat path is a layered cascade: a zero-tolerance safety check, an
//! optional statistical risk scorer, a keyword-first intent resolver with a
//! statistical fallback, and a response selector with a defined fallback
//! chain. Every stage degrades gracefully; the triage operation is total.
//!
//! The HTTP layer, chat persistence, and escalation workflow live in sibling
//! services; this crate owns only the decisions.

pub mod config;
pub mod error;
pub mod keywords;
pub mod metrics;
pub mod models;
pub mod screening;
pub mod state;
pub mod telemetry;
pub mod triage;

pub use config::EngineConfig;
pub use error::EngineError;
pub use keywords::KeywordAnalyzer;
pub use metrics::{MetricsSnapshot, TriageMetrics};
pub use models::{
    ChatRequest, InstrumentKind, KeywordCount, RiskLevel, ScreeningOutcome, ScreeningRequest,
    SeverityLabel, TriageResult,
};
pub use screening::ScreeningClassifier;
pub use state::{EngineState, StateReport};
pub use triage::{IntentClassifier, IntentPrediction, RiskScorer, TriagePipeline};

#[cfg(test)]
mod tests;
