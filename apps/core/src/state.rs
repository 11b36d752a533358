//! Engine state wiring.
//!
//! Everything the two request-time operations share is built exactly once
//! here, then treated as immutable: band tables verified, safety patterns
//! compiled, catalog and label space loaded, optional models attached as
//! explicit fields. Absence of a model degrades the cascade; it never blocks
//! startup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::keywords::KeywordAnalyzer;
use crate::metrics::TriageMetrics;
use crate::screening::{verify_band_tables, ScreeningClassifier};
use crate::triage::{
    IntentClassifier, IntentLabelSpace, ResponseCatalog, RiskScorer, SafetyScreen, Thresholds,
    TriagePipeline,
};

/// Where the active response catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Embedded,
    File,
}

/// Startup report naming which optional collaborators loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    pub loaded_at: DateTime<Utc>,
    pub risk_scorer_loaded: bool,
    pub intent_classifier_loaded: bool,
    /// Number of labels in the intent label space, when one loaded.
    pub label_space_size: Option<usize>,
    pub catalog_intents: usize,
    pub catalog_source: CatalogSource,
}

/// Process-wide immutable state, built once during startup and shared
/// read-only across all concurrent requests.
pub struct EngineState {
    pub pipeline: TriagePipeline,
    pub screening: ScreeningClassifier,
    pub keywords: KeywordAnalyzer,
    pub metrics: Arc<TriageMetrics>,
    pub report: StateReport,
}

impl EngineState {
    /// Builds the engine state from configuration and the optionally-present
    /// statistical models.
    ///
    /// Fatal conditions: safety patterns failing to compile, band tables
    /// violating their coverage invariant, or a configured catalog override
    /// that cannot be loaded. A missing or malformed label-map artifact only
    /// disables the statistical intent tier.
    pub fn initialize(
        config: &EngineConfig,
        risk_scorer: Option<Arc<dyn RiskScorer>>,
        intent_classifier: Option<Arc<dyn IntentClassifier>>,
    ) -> Result<Self, EngineError> {
        verify_band_tables()?;
        let safety = SafetyScreen::compile()?;

        let (catalog, catalog_source) = match config.responses_path.as_deref() {
            Some(path) => {
                let catalog = ResponseCatalog::from_path(path)?;
                info!(?path, "response catalog loaded from file");
                (catalog, CatalogSource::File)
            }
            None => (ResponseCatalog::embedded_default()?, CatalogSource::Embedded),
        };

        let label_space = match config.label_map_path.as_deref() {
            Some(path) => match IntentLabelSpace::from_path(path) {
                Ok(space) => {
                    info!(?path, labels = space.len(), "intent label space loaded");
                    Some(space)
                }
                Err(e) => {
                    warn!(?path, "label space unavailable, statistical intents disabled: {}", e);
                    None
                }
            },
            None => None,
        };

        let report = StateReport {
            loaded_at: Utc::now(),
            risk_scorer_loaded: risk_scorer.is_some(),
            intent_classifier_loaded: intent_classifier.is_some(),
            label_space_size: label_space.as_ref().map(IntentLabelSpace::len),
            catalog_intents: catalog.intent_count(),
            catalog_source,
        };
        info!(
            risk_scorer = report.risk_scorer_loaded,
            intent_classifier = report.intent_classifier_loaded,
            catalog_intents = report.catalog_intents,
            "engine state initialized"
        );

        let metrics = Arc::new(TriageMetrics::new());
        let pipeline = TriagePipeline::new(
            safety,
            catalog,
            label_space,
            risk_scorer,
            intent_classifier,
            Thresholds::from(config),
            metrics.clone(),
        );
        let screening = ScreeningClassifier::new(config.model_version.clone(), metrics.clone());

        Ok(Self {
            pipeline,
            screening,
            keywords: KeywordAnalyzer::new(),
            metrics,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_initialize_with_defaults() {
        let state = EngineState::initialize(&EngineConfig::default(), None, None).unwrap();
        assert!(!state.report.risk_scorer_loaded);
        assert!(!state.report.intent_classifier_loaded);
        assert!(state.report.label_space_size.is_none());
        assert_eq!(state.report.catalog_source, CatalogSource::Embedded);
        assert!(state.report.catalog_intents >= 10);
    }

    #[test]
    fn test_initialize_with_label_map_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"crisis": 0, "support": 1}}"#).unwrap();

        let config = EngineConfig {
            label_map_path: Some(file.path().to_path_buf()),
            ..EngineConfig::default()
        };
        let state = EngineState::initialize(&config, None, None).unwrap();
        assert_eq!(state.report.label_space_size, Some(2));
    }

    #[test]
    fn test_malformed_label_map_degrades() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "garbage").unwrap();

        let config = EngineConfig {
            label_map_path: Some(file.path().to_path_buf()),
            ..EngineConfig::default()
        };
        let state = EngineState::initialize(&config, None, None).unwrap();
        assert!(state.report.label_space_size.is_none());
    }

    #[test]
    fn test_broken_catalog_override_is_fatal() {
        let config = EngineConfig {
            responses_path: Some(PathBuf::from("/nonexistent/responses.json")),
            ..EngineConfig::default()
        };
        assert!(EngineState::initialize(&config, None, None).is_err());
    }

    #[test]
    fn test_catalog_override_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"general_info": {{"low": ["Override reply."]}}}}"#
        )
        .unwrap();

        let config = EngineConfig {
            responses_path: Some(file.path().to_path_buf()),
            ..EngineConfig::default()
        };
        let state = EngineState::initialize(&config, None, None).unwrap();
        assert_eq!(state.report.catalog_source, CatalogSource::File);
        assert_eq!(state.report.catalog_intents, 1);
    }
}
