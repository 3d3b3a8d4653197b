//! Rule-based conversational assistant.
//!
//! The assistant maps free-text visitor questions onto a fixed set of intents
//! and replies with canned answers after a simulated typing delay.
//!
//! # Module Structure
//!
//! - `message`: transcript message types (`MessageRole`, `ChatMessage`)
//! - `rules`: intent rules and the ordered rule table (`IntentRule`,
//!   `RuleTable`, `default_table`)
//! - `classifier`: pure text-to-response resolution (`IntentClassifier`)
//! - `event`: observable session events (`SessionEvent`)
//! - `session`: transcript ownership and the submit pipeline
//!   (`ConversationSession`)

mod classifier;
mod event;
mod message;
mod rules;
mod session;

// Re-export public API
pub use classifier::IntentClassifier;
pub use event::SessionEvent;
pub use message::{ChatMessage, MessageRole};
pub use rules::{IntentRule, RuleTable, default_table};
pub use session::{
    ConversationSession, DEFAULT_GREETING, DEFAULT_REPLY_DELAY, default_quick_replies,
};
