//! Triage Metrics Module
//!
//! Monotonic in-memory counters for the observability sink. All fields are
//! atomic for safe concurrent increment; counters never influence decision
//! outcomes.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Decision-path counters, shared read-mostly across all requests.
pub struct TriageMetrics {
    /// Total triage and screening predictions served.
    pub predictions_total: AtomicU64,
    /// Messages short-circuited by the safety layer.
    pub safety_triggers_total: AtomicU64,
    /// High-risk outcomes (chat: high/severe; screening: moderately-severe/severe).
    pub high_risk_total: AtomicU64,
    /// Requests degraded because an external model failed at inference.
    pub model_failures_total: AtomicU64,
}

impl Default for TriageMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TriageMetrics {
    pub const fn new() -> Self {
        Self {
            predictions_total: AtomicU64::new(0),
            safety_triggers_total: AtomicU64::new(0),
            high_risk_total: AtomicU64::new(0),
            model_failures_total: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn inc_predictions(&self) {
        self.predictions_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_safety_triggers(&self) {
        self.safety_triggers_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_high_risk(&self) {
        self.high_risk_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_model_failures(&self) {
        self.model_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time snapshot for the external observability sink.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            predictions_total: self.predictions_total.load(Ordering::Relaxed),
            safety_triggers_total: self.safety_triggers_total.load(Ordering::Relaxed),
            high_risk_total: self.high_risk_total.load(Ordering::Relaxed),
            model_failures_total: self.model_failures_total.load(Ordering::Relaxed),
        }
    }
}

/// Serializable snapshot of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub predictions_total: u64,
    pub safety_triggers_total: u64,
    pub high_risk_total: u64,
    pub model_failures_total: u64,
}
