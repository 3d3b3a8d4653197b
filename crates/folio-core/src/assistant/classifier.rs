//! Pure text-to-response resolution.

use std::sync::Arc;

use super::rules::RuleTable;

/// Classifies free-text visitor input against an ordered rule table.
///
/// Classification is a pure function of (normalized input, rule order): the
/// input is trimmed and lowercased, rules are tested in declaration order,
/// and the first rule with a matching substring wins. The table sits behind
/// an `Arc` so sessions and their scheduled callbacks share one immutable
/// copy.
#[derive(Clone)]
pub struct IntentClassifier {
    table: Arc<RuleTable>,
}

impl IntentClassifier {
    /// Creates a classifier over the given rule table.
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    /// Resolves raw visitor text to the canned response of the first
    /// matching rule, falling back to the catch-all.
    pub fn classify(&self, raw_text: &str) -> &str {
        let normalized = raw_text.trim().to_lowercase();
        let rule = self.table.resolve(&normalized);
        tracing::debug!(intent = %rule.name, "classified visitor input");
        &rule.response
    }
}
