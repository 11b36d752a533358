//! Intent Label Space.
//!
//! Bidirectional mapping between intent names and the small integer indices
//! the statistical classifier emits, loaded once at startup from the
//! `label_map.json` artifact written by the trainer.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::EngineError;

/// Validated label <-> index mapping. Indices are contiguous `0..N-1` and
/// both directions are total over the loaded set.
pub struct IntentLabelSpace {
    by_label: HashMap<String, usize>,
    by_index: Vec<String>,
}

impl IntentLabelSpace {
    /// Builds a label space from a raw `{label: index}` map, validating
    /// contiguity and bijectivity.
    pub fn from_map(map: HashMap<String, usize>) -> Result<Self, EngineError> {
        if map.is_empty() {
            return Err(EngineError::Validation(
                "label map is empty".to_string(),
            ));
        }

        let mut by_index = vec![None; map.len()];
        for (label, &index) in &map {
            let slot = by_index.get_mut(index).ok_or_else(|| {
                EngineError::Validation(format!(
                    "label {:?} has index {} outside 0..{}",
                    label,
                    index,
                    map.len()
                ))
            })?;
            if let Some(existing) = slot {
                return Err(EngineError::Validation(format!(
                    "labels {:?} and {:?} share index {}",
                    existing, label, index
                )));
            }
            *slot = Some(label.clone());
        }

        let by_index: Vec<String> = by_index.into_iter().flatten().collect();
        if by_index.len() != map.len() {
            return Err(EngineError::Internal(
                "label map indices are not contiguous".to_string(),
            ));
        }

        Ok(Self {
            by_label: map,
            by_index,
        })
    }

    /// Loads and validates a label space from a JSON artifact.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path)?;
        let map: HashMap<String, usize> = serde_json::from_str(&raw)?;
        Self::from_map(map)
    }

    /// Reverse mapping: classifier index to intent label.
    pub fn label_for(&self, index: usize) -> Option<&str> {
        self.by_index.get(index).map(String::as_str)
    }

    /// Forward mapping: intent label to classifier index.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_map() -> HashMap<String, usize> {
        [
            ("crisis", 0),
            ("escalate", 1),
            ("support", 2),
            ("faq", 3),
            ("resource", 4),
            ("booking", 5),
        ]
        .into_iter()
        .map(|(label, index)| (label.to_string(), index))
        .collect()
    }

    #[test]
    fn test_round_trips_both_directions() {
        let space = IntentLabelSpace::from_map(sample_map()).unwrap();
        assert_eq!(space.len(), 6);
        for index in 0..space.len() {
            let label = space.label_for(index).unwrap();
            assert_eq!(space.index_of(label), Some(index));
        }
    }

    #[test]
    fn test_rejects_gap_in_indices() {
        let mut map = sample_map();
        map.remove("support"); // leaves a hole at index 2
        assert!(matches!(
            IntentLabelSpace::from_map(map),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_index() {
        let mut map = sample_map();
        map.insert("extra".to_string(), 0);
        assert!(matches!(
            IntentLabelSpace::from_map(map),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_map() {
        assert!(IntentLabelSpace::from_map(HashMap::new()).is_err());
    }

    #[test]
    fn test_unknown_index_is_none() {
        let space = IntentLabelSpace::from_map(sample_map()).unwrap();
        assert!(space.label_for(17).is_none());
        assert!(space.index_of("unheard_of").is_none());
    }

    #[test]
    fn test_loads_trainer_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"crisis": 0, "support": 1, "faq": 2}}"#).unwrap();

        let space = IntentLabelSpace::from_path(file.path()).unwrap();
        assert_eq!(space.label_for(1), Some("support"));
        assert_eq!(space.index_of("faq"), Some(2));
    }

    #[test]
    fn test_malformed_artifact_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a label map").unwrap();
        assert!(IntentLabelSpace::from_path(file.path()).is_err());
    }
}
