//! Optional TOML configuration for the interaction engines.
//!
//! Defaults are compiled in; a missing `folio.toml` is not an error. The
//! file customizes the assistant greeting, reply delay, quick replies, and
//! optionally replaces the whole rule table.
//!
//! ```toml
//! [assistant]
//! greeting = "Hello! Ask me anything about this site."
//! reply_delay_ms = 600
//! quick_replies = ["What do you build?", "How do I reach you?"]
//!
//! [[assistant.rule]]
//! name = "availability"
//! matchers = ["available", "book"]
//! response = "Currently booking projects for next quarter."
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assistant::{
    DEFAULT_GREETING, DEFAULT_REPLY_DELAY, IntentRule, RuleTable, default_quick_replies,
    default_table,
};
use crate::error::Result;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Root of the optional `folio.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub assistant: AssistantConfig,
}

impl FolioConfig {
    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to compiled-in
    /// defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            Ok(Self::default())
        }
    }
}

/// Assistant widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Greeting seeded as the first transcript message.
    pub greeting: String,
    /// Simulated typing latency before the reply is appended.
    pub reply_delay_ms: u64,
    /// Candidate questions offered before the visitor has typed.
    pub quick_replies: Vec<String>,
    /// Replacement intent rules; empty keeps the builtin table.
    #[serde(rename = "rule")]
    pub rules: Vec<RuleConfig>,
    /// Replacement response for input no rule matches.
    pub fallback_response: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            reply_delay_ms: DEFAULT_REPLY_DELAY.as_millis() as u64,
            quick_replies: default_quick_replies(),
            rules: Vec::new(),
            fallback_response: None,
        }
    }
}

impl AssistantConfig {
    /// The rule table the assistant classifies against: the builtin table
    /// unless the config replaces the rules or the fallback response.
    pub fn rule_table(&self) -> Arc<RuleTable> {
        if self.rules.is_empty() && self.fallback_response.is_none() {
            return default_table();
        }

        let defaults = default_table();
        let rules = if self.rules.is_empty() {
            defaults.rules().to_vec()
        } else {
            self.rules
                .iter()
                .map(|rule| {
                    IntentRule::new(
                        rule.name.clone(),
                        rule.matchers.clone(),
                        rule.response.clone(),
                    )
                })
                .collect()
        };
        let fallback = match &self.fallback_response {
            Some(response) => IntentRule::catch_all(response.clone()),
            None => defaults.fallback().clone(),
        };
        Arc::new(RuleTable::new(rules, fallback))
    }

    /// The reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// One `[[assistant.rule]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub matchers: Vec<String>,
    pub response: String,
}
