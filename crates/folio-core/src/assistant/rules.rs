//! Intent rules and the ordered rule table.
//!
//! Rules are declared once, in order, and never reordered at runtime. The
//! default table is built on first access and cached for the lifetime of the
//! process; callers share it read-only.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

/// A single intent rule: a set of matcher substrings and the canned response
/// returned when any of them is found in the normalized input.
///
/// Matching is plain substring containment, not whole-word matching: "ai"
/// matches inside "contain". An empty matcher set matches everything, which
/// is how the fallback rule is expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    /// Canonical intent name, used for logging and tests.
    pub name: String,
    /// Lowercase substrings; the rule matches if the input contains any one.
    pub matchers: Vec<String>,
    /// The canned response for this intent.
    pub response: String,
}

impl IntentRule {
    /// Creates a rule. Matchers are lowercased here so the lowercase
    /// invariant holds regardless of where the rule came from.
    pub fn new(
        name: impl Into<String>,
        matchers: Vec<impl Into<String>>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            matchers: matchers
                .into_iter()
                .map(|m| m.into().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    /// Creates the catch-all rule that backs every table.
    pub fn catch_all(response: impl Into<String>) -> Self {
        Self {
            name: "fallback".to_string(),
            matchers: Vec::new(),
            response: response.into(),
        }
    }

    /// Whether this rule matches the given normalized (trimmed, lowercased)
    /// input. An empty matcher set always matches.
    pub fn matches(&self, normalized: &str) -> bool {
        self.matchers.is_empty() || self.matchers.iter().any(|m| normalized.contains(m.as_str()))
    }
}

/// An ordered, immutable list of intent rules plus a dedicated fallback.
///
/// Order is significant: the first matching rule wins, so an earlier, broader
/// rule always beats a later, more specific one. Holding the fallback in its
/// own slot makes classification total by construction.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<IntentRule>,
    fallback: IntentRule,
}

impl RuleTable {
    /// Creates a table from rules in declaration order and a fallback rule.
    pub fn new(rules: Vec<IntentRule>, fallback: IntentRule) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|rule| IntentRule::new(rule.name, rule.matchers, rule.response))
                .collect(),
            fallback,
        }
    }

    /// Resolves normalized input to the first matching rule, falling back to
    /// the catch-all.
    pub fn resolve(&self, normalized: &str) -> &IntentRule {
        self.rules
            .iter()
            .find(|rule| rule.matches(normalized))
            .unwrap_or(&self.fallback)
    }

    /// The rules in declaration order, excluding the fallback.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// The catch-all rule.
    pub fn fallback(&self) -> &IntentRule {
        &self.fallback
    }
}

/// Static storage for the default rule table (initialized once).
static DEFAULT_TABLE: OnceLock<Arc<RuleTable>> = OnceLock::new();

/// Returns the default rule table shared by all sessions that do not supply
/// their own.
///
/// The table is initialized on first access and cached for subsequent calls.
/// Declaration order is load-bearing: greeting is tested first, fallback
/// last.
pub fn default_table() -> Arc<RuleTable> {
    DEFAULT_TABLE
        .get_or_init(|| {
            Arc::new(RuleTable::new(
                vec![
                    IntentRule::new(
                        "greeting",
                        vec!["hello", "hi", "hey", "good morning", "good afternoon"],
                        "Hey there! Thanks for stopping by. Ask me about Daniel's \
                         skills, projects, or services - or how to get in touch.",
                    ),
                    IntentRule::new(
                        "skills",
                        vec!["skill", "tech", "stack", "language", "framework"],
                        "Daniel works across the stack: Rust, TypeScript, and Python \
                         on the backend, React on the frontend, and Postgres or Redis \
                         underneath. Tooling of choice: tokio, axum, and Docker.",
                    ),
                    IntentRule::new(
                        "projects",
                        vec!["project", "portfolio", "case stud", "built", "work"],
                        "Recent projects include a real-time analytics pipeline, an \
                         embedded search service, and this very site. The 'projects' \
                         command in the terminal widget has the full case studies.",
                    ),
                    IntentRule::new(
                        "services",
                        vec!["service", "pricing", "price", "hire", "cost", "offer"],
                        "Daniel offers product engineering, API design, and applied-AI \
                         consulting, on either a project or a retainer basis. Reach out \
                         for a quote - scope drives pricing.",
                    ),
                    IntentRule::new(
                        "contact",
                        vec!["contact", "email", "reach", "linkedin", "github"],
                        "The fastest route is email: daniel@reyes.dev. There are also \
                         links to GitHub and LinkedIn in the footer.",
                    ),
                    IntentRule::new(
                        "experience",
                        vec!["experience", "background", "career", "education", "degree"],
                        "Eight years of shipping production software, from startups to \
                         a platform team at a fintech. Before that, a CS degree with a \
                         focus on distributed systems.",
                    ),
                    IntentRule::new(
                        "ai",
                        vec!["ai", "machine learning", "ml", "model", "deep learning"],
                        "Daniel builds applied-AI features: retrieval pipelines, \
                         evaluation harnesses, and LLM integrations that degrade \
                         gracefully. No model training from scratch - integration is \
                         the sweet spot.",
                    ),
                ],
                IntentRule::catch_all(
                    "I'm not sure I caught that. Try asking about skills, projects, \
                     services, or how to get in touch.",
                ),
            ))
        })
        .clone()
}
