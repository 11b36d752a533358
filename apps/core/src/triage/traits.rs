use async_trait::async_trait;

use crate::error::EngineError;

/// Defines the public interface for an external risk-scoring model.
///
/// This trait abstracts the specific implementation, allowing different
/// backends (in-process inference, remote service) to be used interchangeably.
/// Calls are synchronous from the pipeline's point of view and boundedly
/// latent; request-level timeouts are the caller's responsibility.
#[async_trait]
pub trait RiskScorer: Send + Sync + 'static {
    /// Scores a message's risk in [0.0, 1.0].
    async fn score(&self, message: &str) -> Result<f32, EngineError>;
}

/// A raw intent prediction from the statistical classifier: an index into the
/// intent label space plus a confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentPrediction {
    pub index: usize,
    pub score: f32,
}

/// Defines the public interface for an external intent-classification model.
#[async_trait]
pub trait IntentClassifier: Send + Sync + 'static {
    /// Predicts the most likely intent index and its confidence.
    async fn classify(&self, message: &str) -> Result<IntentPrediction, EngineError>;
}
