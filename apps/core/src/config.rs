//! Engine configuration.
//!
//! All knobs are read once at startup from the environment (a `.env` file is
//! honored via `dotenv`). The three decision thresholds ship with the values
//! the original service used, but live here rather than in the cascade: they
//! are tunable configuration, not clinically validated constants.

use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Default acceptance threshold for the statistical intent tier.
pub const DEFAULT_INTENT_ACCEPT_THRESHOLD: f32 = 0.4;
/// Default cut point above which a risk score discretizes to medium.
pub const DEFAULT_RISK_MEDIUM_CUTOFF: f32 = 0.4;
/// Default cut point above which a risk score discretizes to high.
pub const DEFAULT_RISK_HIGH_CUTOFF: f32 = 0.7;
/// Default model version reported on screening outcomes.
pub const DEFAULT_MODEL_VERSION: &str = "v1.0";

/// Startup configuration for the decision engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Optional path to a response-catalog JSON file overriding the embedded
    /// default catalog.
    pub responses_path: Option<PathBuf>,
    /// Optional path to the intent label map artifact written by the trainer.
    pub label_map_path: Option<PathBuf>,
    /// Version string reported on screening outcomes.
    pub model_version: String,
    /// Statistical intent predictions at or below this score are discarded.
    pub intent_accept_threshold: f32,
    /// Risk scores above this cut point discretize to at least medium.
    pub risk_medium_cutoff: f32,
    /// Risk scores above this cut point discretize to high.
    pub risk_high_cutoff: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            responses_path: None,
            label_map_path: None,
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            intent_accept_threshold: DEFAULT_INTENT_ACCEPT_THRESHOLD,
            risk_medium_cutoff: DEFAULT_RISK_MEDIUM_CUTOFF,
            risk_high_cutoff: DEFAULT_RISK_HIGH_CUTOFF,
        }
    }
}

impl EngineConfig {
    /// Builds a configuration from the process environment.
    ///
    /// Unset variables fall back to defaults; unparsable numeric values are
    /// logged and ignored rather than failing startup.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("MINDLINE_RESPONSES_PATH") {
            if !path.is_empty() {
                config.responses_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(path) = env::var("MINDLINE_LABEL_MAP_PATH") {
            if !path.is_empty() {
                config.label_map_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(version) = env::var("MINDLINE_MODEL_VERSION") {
            if !version.is_empty() {
                config.model_version = version;
            }
        }

        config.intent_accept_threshold = read_threshold(
            "MINDLINE_INTENT_ACCEPT_THRESHOLD",
            config.intent_accept_threshold,
        );
        config.risk_medium_cutoff =
            read_threshold("MINDLINE_RISK_MEDIUM_CUTOFF", config.risk_medium_cutoff);
        config.risk_high_cutoff =
            read_threshold("MINDLINE_RISK_HIGH_CUTOFF", config.risk_high_cutoff);

        config
    }
}

/// Reads a [0, 1] threshold from the environment, keeping the default when the
/// variable is unset, unparsable, or out of range.
fn read_threshold(name: &str, default: f32) -> f32 {
    match env::var(name) {
        Ok(raw) => match raw.parse::<f32>() {
            Ok(value) if (0.0..=1.0).contains(&value) => value,
            Ok(value) => {
                warn!("{} = {} is outside [0, 1], keeping {}", name, value, default);
                default
            }
            Err(_) => {
                warn!("{} = {:?} is not a number, keeping {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
