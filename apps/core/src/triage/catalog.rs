//! Response Catalog and selector.
//!
//! Maps `(intent, risk level)` to a bucket of candidate replies. The catalog
//! is loaded once at startup, either from the embedded default data or from a
//! JSON file override, and is read-only afterward. Selection within a bucket
//! is uniform-random through an injected RNG so tests can seed it.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::EngineError;
use crate::models::RiskLevel;

/// Embedded default catalog, the curated reply set the product ships with.
const DEFAULT_CATALOG_JSON: &str = include_str!("../../resources/responses.json");

/// Last-resort reply when an intent has no usable bucket at all.
const GENERIC_FALLBACK: &[&str] = &["I'm here to listen. Tell me more."];

/// Immutable `intent -> (risk level -> candidate replies)` table.
///
/// Not every (intent, risk level) pair is covered; absence is a defined
/// fallback case, not an error.
pub struct ResponseCatalog {
    intents: HashMap<String, HashMap<RiskLevel, Vec<String>>>,
}

impl ResponseCatalog {
    /// Parses the catalog shipped inside the binary.
    pub fn embedded_default() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CATALOG_JSON)
            .map_err(|e| EngineError::Config(format!("embedded response catalog: {}", e)))
    }

    /// Loads a catalog override from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
            .map_err(|e| EngineError::Config(format!("response catalog {:?}: {}", path, e)))
    }

    fn from_json(raw: &str) -> Result<Self, EngineError> {
        let intents: HashMap<String, HashMap<RiskLevel, Vec<String>>> =
            serde_json::from_str(raw)?;

        for (intent, buckets) in &intents {
            if buckets.is_empty() {
                return Err(EngineError::Validation(format!(
                    "intent {:?} has no buckets",
                    intent
                )));
            }
            for (risk, candidates) in buckets {
                if candidates.is_empty() {
                    return Err(EngineError::Validation(format!(
                        "bucket ({:?}, {}) is empty",
                        intent, risk
                    )));
                }
            }
        }

        Ok(Self { intents })
    }

    /// Number of intents with at least one bucket.
    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    /// The candidate list for an exact `(intent, risk)` pair, if present.
    pub fn bucket(&self, intent: &str, risk: RiskLevel) -> Option<&[String]> {
        self.intents
            .get(intent)
            .and_then(|buckets| buckets.get(&risk))
            .map(Vec::as_slice)
    }

    /// Selects one reply for `(intent, risk)`.
    ///
    /// Lookup order: the exact bucket, then the intent's low-risk bucket, then
    /// the generic fallback. Within the resolved bucket the choice is
    /// uniform-random; only membership is guaranteed.
    pub fn select<'a, R: Rng>(&'a self, intent: &str, risk: RiskLevel, rng: &mut R) -> &'a str {
        if let Some(candidates) = self
            .bucket(intent, risk)
            .or_else(|| self.bucket(intent, RiskLevel::Low))
        {
            if let Some(reply) = candidates.choose(rng) {
                return reply;
            }
        }

        debug!(intent, risk = %risk, "no catalog bucket, using generic fallback");
        GENERIC_FALLBACK
            .choose(rng)
            .copied()
            .unwrap_or(GENERIC_FALLBACK[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_embedded_default_parses() {
        let catalog = ResponseCatalog::embedded_default().unwrap();
        assert!(catalog.intent_count() >= 10);
        assert!(catalog.bucket("crisis", RiskLevel::Severe).is_some());
        assert!(catalog.bucket("academic_stress", RiskLevel::High).is_some());
    }

    #[test]
    fn test_exact_bucket_membership() {
        let catalog = ResponseCatalog::embedded_default().unwrap();
        let bucket = catalog.bucket("anxiety", RiskLevel::Medium).unwrap();

        let mut rng = rng();
        for _ in 0..20 {
            let reply = catalog.select("anxiety", RiskLevel::Medium, &mut rng);
            assert!(bucket.iter().any(|candidate| candidate == reply));
        }
    }

    #[test]
    fn test_falls_back_to_low_bucket() {
        let catalog = ResponseCatalog::embedded_default().unwrap();
        // small_talk has no high bucket, only low
        assert!(catalog.bucket("small_talk", RiskLevel::High).is_none());
        let low_bucket = catalog.bucket("small_talk", RiskLevel::Low).unwrap();

        let mut rng = rng();
        for _ in 0..20 {
            let reply = catalog.select("small_talk", RiskLevel::High, &mut rng);
            assert!(low_bucket.iter().any(|candidate| candidate == reply));
        }
    }

    #[test]
    fn test_unknown_intent_uses_generic_fallback() {
        let catalog = ResponseCatalog::embedded_default().unwrap();
        let mut rng = rng();
        let reply = catalog.select("time_travel", RiskLevel::Low, &mut rng);
        assert_eq!(reply, GENERIC_FALLBACK[0]);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let catalog = ResponseCatalog::embedded_default().unwrap();

        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                catalog.select("depression", RiskLevel::Medium, &mut first),
                catalog.select("depression", RiskLevel::Medium, &mut second)
            );
        }
    }

    #[test]
    fn test_file_override_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"general_info": {{"low": ["Hello from the override."]}}}}"#
        )
        .unwrap();

        let catalog = ResponseCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.intent_count(), 1);

        let mut rng = rng();
        assert_eq!(
            catalog.select("general_info", RiskLevel::Low, &mut rng),
            "Hello from the override."
        );
    }

    #[test]
    fn test_rejects_empty_bucket() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"general_info": {{"low": []}}}}"#).unwrap();
        assert!(ResponseCatalog::from_path(file.path()).is_err());
    }

    #[test]
    fn test_rejects_unknown_risk_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"general_info": {{"catastrophic": ["x"]}}}}"#).unwrap();
        assert!(ResponseCatalog::from_path(file.path()).is_err());
    }
}
