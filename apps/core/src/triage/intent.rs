//! Keyword Intent Tier.
//!
//! Authoritative first tier of intent resolution: cheap, interpretable,
//! ordered substring rules over the lowercased message. The statistical tier
//! only runs when nothing here matches.

use tracing::debug;

/// Intent assigned when neither tier produces a confident label.
pub const DEFAULT_INTENT: &str = "general_info";

/// One keyword rule: a category and the trigger terms that select it.
struct KeywordRule {
    intent: &'static str,
    triggers: &'static [&'static str],
}

/// Ordered rule list; ties between categories are broken by declaration
/// order, not confidence.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        intent: "academic_stress",
        triggers: &["exam", "study", "grade"],
    },
    KeywordRule {
        intent: "anxiety",
        triggers: &["anxiet", "panic", "worry"],
    },
    KeywordRule {
        intent: "depression",
        triggers: &["depress", "sad", "hopeless"],
    },
    KeywordRule {
        intent: "relationship_issues",
        triggers: &["relationship", "breakup", "lonely"],
    },
    KeywordRule {
        intent: "coping_strategies",
        triggers: &["breath", "cope", "help"],
    },
    KeywordRule {
        intent: "small_talk",
        triggers: &["hello", "hi"],
    },
];

/// A keyword-tier hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub intent: &'static str,
    /// The trigger term that fired, for interpretability.
    pub trigger: &'static str,
}

/// First-match-wins matcher over the declared rule list.
pub struct KeywordIntentMatcher {
    rules: &'static [KeywordRule],
}

impl Default for KeywordIntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordIntentMatcher {
    pub fn new() -> Self {
        Self {
            rules: KEYWORD_RULES,
        }
    }

    /// Resolves the message against the rule list.
    ///
    /// The first category whose trigger set matches any substring of the
    /// lowercased message wins.
    pub fn resolve(&self, message: &str) -> Option<KeywordMatch> {
        let lowered = message.to_lowercase();
        for rule in self.rules {
            if let Some(trigger) = rule
                .triggers
                .iter()
                .find(|trigger| lowered.contains(**trigger))
            {
                debug!(intent = rule.intent, trigger, "keyword tier matched");
                return Some(KeywordMatch {
                    intent: rule.intent,
                    trigger,
                });
            }
        }
        None
    }
}
