//! Safety Layer.
//!
//! Zero-tolerance lexical check for explicit crisis language, evaluated before
//! any probabilistic stage. Recall is prioritized absolutely over precision: a
//! false positive routes to a safe canned message, a false negative is the
//! unacceptable failure mode.

use regex::Regex;

use crate::error::EngineError;

/// Crisis language patterns, case-insensitive.
const CRISIS_PATTERNS: &[&str] = &[
    r"(?i)\b(kill|suicide|sucide|die|death|hurt myself|end my life|want to die)\b",
    r"(?i)\b(hang myself|cut(ting)? myself|overdose|shoot myself)\b",
    r"(?i)\b(no reason to live|better off dead|hopeless)\b",
];

/// Fixed message returned on a safety match, directing the user to immediate
/// human help.
pub const EMERGENCY_RESPONSE: &str = "I am detecting that you might be in a crisis. \
    I am an AI and cannot provide the help you need right now. \
    Please contact emergency services immediately or call a suicide prevention hotline (like 988 in the US). \
    Your life matters, and there are people who want to help you.";

/// Intent label reported for safety-triggered results.
pub const CRISIS_INTENT: &str = "crisis";

/// Compiled crisis pattern set. Stateless after construction.
pub struct SafetyScreen {
    patterns: Vec<Regex>,
}

impl SafetyScreen {
    /// Compiles the pattern set.
    ///
    /// A pattern that fails to compile makes the whole engine unable to honor
    /// its safety contract, so this is a fatal startup condition rather than
    /// something to degrade around.
    pub fn compile() -> Result<Self, EngineError> {
        let patterns = CRISIS_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    EngineError::Config(format!("invalid safety pattern {:?}: {}", pattern, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if any crisis pattern matches the text.
    ///
    /// Order-independent; a single match suffices. Always produces a boolean
    /// in bounded time.
    pub fn check(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}
