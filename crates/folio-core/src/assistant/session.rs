//! Transcript ownership and the submit pipeline.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::schedule::Scheduler;

use super::classifier::IntentClassifier;
use super::event::SessionEvent;
use super::message::ChatMessage;
use super::rules::{RuleTable, default_table};

/// Simulated typing latency used when none is configured.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Greeting seeded as the first transcript message.
pub const DEFAULT_GREETING: &str =
    "Hi! I'm the site assistant. Ask me about Daniel's skills, projects, or \
     services - or how to get in touch.";

/// Candidate questions offered before the visitor has typed anything.
pub fn default_quick_replies() -> Vec<String> {
    [
        "What skills do you have?",
        "Show me your projects",
        "What services do you offer?",
        "How can I contact you?",
    ]
    .map(String::from)
    .to_vec()
}

struct SessionState {
    transcript: Vec<ChatMessage>,
    pending: bool,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

/// One visitor's conversation with the assistant widget.
///
/// The session owns its transcript exclusively. `submit` appends the visitor
/// message synchronously, then schedules the delayed assistant reply through
/// the injected [`Scheduler`]; rendering code reads but never mutates.
///
/// Overlapping submits are neither deduplicated nor cancelled: if a second
/// message arrives while a reply is still pending, both replies are
/// eventually appended, in the order their callbacks resolve. Likewise,
/// tearing the session down does not cancel an in-flight reply.
///
/// The state sits behind a `Mutex` solely so the scheduled callback, which
/// may run on another worker, can append its reply; sessions are never
/// shared across visitors.
pub struct ConversationSession {
    id: String,
    classifier: IntentClassifier,
    scheduler: Arc<dyn Scheduler>,
    reply_delay: Duration,
    quick_replies: Vec<String>,
    state: Arc<Mutex<SessionState>>,
}

impl ConversationSession {
    /// Creates a session with a seeded greeting message.
    pub fn new(
        table: Arc<RuleTable>,
        scheduler: Arc<dyn Scheduler>,
        greeting: impl Into<String>,
        quick_replies: Vec<String>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            classifier: IntentClassifier::new(table),
            scheduler,
            reply_delay,
            quick_replies,
            state: Arc::new(Mutex::new(SessionState {
                transcript: vec![ChatMessage::assistant(greeting)],
                pending: false,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Creates a session over the default rule table, greeting, quick
    /// replies, and reply delay.
    pub fn with_defaults(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::new(
            default_table(),
            scheduler,
            DEFAULT_GREETING,
            default_quick_replies(),
            DEFAULT_REPLY_DELAY,
        )
    }

    /// Unique session identifier (UUID format).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Submits visitor-typed text. Empty or whitespace-only input is a
    /// guarded no-op, not a failure.
    pub fn submit(&self, text: &str) {
        if text.trim().is_empty() {
            tracing::debug!(session_id = %self.id, "ignoring empty submit");
            return;
        }
        self.accept(text);
    }

    /// Submits a pre-written quick reply. Same pipeline as [`submit`]
    /// without the typed-input guard.
    ///
    /// [`submit`]: Self::submit
    pub fn submit_quick_reply(&self, text: &str) {
        self.accept(text);
    }

    /// A snapshot of the transcript in submission order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        lock(&self.state).transcript.clone()
    }

    /// Whether a scheduled reply has not resolved yet.
    pub fn pending(&self) -> bool {
        lock(&self.state).pending
    }

    /// Quick replies are offered exactly while the transcript holds only
    /// the seeded greeting; the first user message hides them for good.
    pub fn quick_replies_visible(&self) -> bool {
        lock(&self.state).transcript.len() == 1
    }

    /// The configured candidate questions.
    pub fn quick_replies(&self) -> &[String] {
        &self.quick_replies
    }

    /// Registers a renderer; every subsequent transcript or pending-flag
    /// mutation is delivered as a [`SessionEvent`].
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.state).subscribers.push(tx);
        rx
    }

    fn accept(&self, text: &str) {
        {
            let mut state = lock(&self.state);
            push_message(&mut state, ChatMessage::user(text));
            set_pending(&mut state, true);
        }

        let classifier = self.classifier.clone();
        let state = Arc::clone(&self.state);
        let text = text.to_string();
        let session_id = self.id.clone();
        self.scheduler.schedule(
            self.reply_delay,
            Box::new(move || {
                let response = classifier.classify(&text).to_string();
                tracing::debug!(session_id = %session_id, "appending delayed reply");
                let mut state = lock(&state);
                push_message(&mut state, ChatMessage::assistant(response));
                set_pending(&mut state, false);
            }),
        );
    }
}

fn lock(state: &Arc<Mutex<SessionState>>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn push_message(state: &mut SessionState, message: ChatMessage) {
    state.transcript.push(message.clone());
    broadcast(state, SessionEvent::MessageAppended { message });
}

fn set_pending(state: &mut SessionState, pending: bool) {
    state.pending = pending;
    broadcast(state, SessionEvent::PendingChanged { pending });
}

fn broadcast(state: &mut SessionState, event: SessionEvent) {
    state.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::message::MessageRole;
    use crate::schedule::ManualScheduler;

    fn session() -> (Arc<ManualScheduler>, ConversationSession) {
        let scheduler = Arc::new(ManualScheduler::new());
        let session = ConversationSession::with_defaults(scheduler.clone());
        (scheduler, session)
    }

    #[test]
    fn test_new_session_seeds_greeting() {
        let (_, session) = session();
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, MessageRole::Assistant);
        assert_eq!(transcript[0].content, DEFAULT_GREETING);
        assert!(!session.pending());
    }

    #[test]
    fn test_empty_submit_is_a_noop() {
        let (scheduler, session) = session();
        session.submit("");
        session.submit("   \t  ");
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.pending());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_submit_appends_user_message_synchronously() {
        let (_, session) = session();
        session.submit("What services do you offer?");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].role, MessageRole::User);
        assert_eq!(transcript[1].content, "What services do you offer?");
        assert!(session.pending());
    }

    #[test]
    fn test_reply_resolves_after_delay() {
        let (scheduler, session) = session();
        session.submit("What services do you offer?");

        scheduler.advance(Duration::from_millis(999));
        assert_eq!(session.transcript().len(), 2);
        assert!(session.pending());

        scheduler.advance(Duration::from_millis(1));
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].role, MessageRole::Assistant);
        assert!(transcript[2].content.contains("product engineering"));
        assert!(!session.pending());
    }

    #[test]
    fn test_transcript_growth_law() {
        // After N accepted submits and all callbacks resolved: 1 + 2N.
        let (scheduler, session) = session();
        for text in ["Hi", "What skills do you have?", "How do I contact you?"] {
            session.submit(text);
            scheduler.advance(Duration::from_millis(1000));
        }
        assert_eq!(session.transcript().len(), 7);
        assert!(!session.pending());
    }

    #[test]
    fn test_quick_replies_visible_only_before_first_user_turn() {
        let (scheduler, session) = session();
        assert!(session.quick_replies_visible());

        session.submit("Hi");
        assert!(!session.quick_replies_visible());

        scheduler.advance(Duration::from_millis(1000));
        assert!(!session.quick_replies_visible());
    }

    #[test]
    fn test_quick_reply_bypasses_typed_input_guard() {
        let (scheduler, session) = session();
        session.submit_quick_reply("What skills do you have?");
        scheduler.advance(Duration::from_millis(1000));

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert!(transcript[2].content.contains("Rust"));
    }

    #[test]
    fn test_overlapping_submits_append_both_replies() {
        // Two submits before the first callback resolves: no deduplication,
        // no cancellation. Both replies land, in callback-resolution order
        // (equal delays resolve in submission order).
        let (scheduler, session) = session();
        session.submit("What skills do you have?");
        session.submit("How do I contact you?");

        assert_eq!(session.transcript().len(), 3);
        assert_eq!(scheduler.pending(), 2);

        scheduler.advance(Duration::from_millis(1000));
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 5);
        assert!(transcript[3].content.contains("Rust"));
        assert!(transcript[4].content.contains("daniel@reyes.dev"));
        assert!(!session.pending());
    }

    #[test]
    fn test_subscribers_observe_every_mutation() {
        let (scheduler, session) = session();
        let mut events = session.subscribe();
        session.submit("Hi");
        scheduler.advance(Duration::from_millis(1000));

        let mut observed = Vec::new();
        while let Ok(event) = events.try_recv() {
            observed.push(event);
        }
        assert_eq!(observed.len(), 4);
        assert!(matches!(
            &observed[0],
            SessionEvent::MessageAppended { message } if message.role == MessageRole::User
        ));
        assert!(matches!(
            observed[1],
            SessionEvent::PendingChanged { pending: true }
        ));
        assert!(matches!(
            &observed[2],
            SessionEvent::MessageAppended { message } if message.role == MessageRole::Assistant
        ));
        assert!(matches!(
            observed[3],
            SessionEvent::PendingChanged { pending: false }
        ));
    }
}
