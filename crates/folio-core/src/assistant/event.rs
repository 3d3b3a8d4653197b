//! Observable session events.

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// High-level events a conversation session publishes to its renderer.
///
/// Every transcript mutation is observable: renderers subscribe and react
/// (auto-scroll, typing indicator) instead of polling the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the transcript.
    MessageAppended { message: ChatMessage },
    /// The pending-response flag changed.
    PendingChanged { pending: bool },
}
