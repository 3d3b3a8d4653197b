use std::sync::Arc;
use std::time::Duration;

use folio_core::assistant::{
    ConversationSession, IntentClassifier, MessageRole, default_table,
};
use folio_core::config::{AssistantConfig, FolioConfig};
use folio_core::schedule::ManualScheduler;
use folio_core::terminal::{HELP_HINT, Line, LineKind, TerminalSession, builtin_table};
use tempfile::TempDir;

#[test]
fn test_greeting_question_gets_a_greeting_acknowledgment() {
    let classifier = IntentClassifier::new(default_table());
    let response = classifier.classify("Hi");
    assert!(
        response.starts_with("Hey there!"),
        "expected a greeting acknowledgment, got: {}",
        response
    );
}

#[test]
fn test_services_question_gets_the_services_canned_text() {
    let classifier = IntentClassifier::new(default_table());
    let table = default_table();
    let services = table
        .rules()
        .iter()
        .find(|rule| rule.name == "services")
        .unwrap();
    assert_eq!(
        classifier.classify("What services do you offer?"),
        services.response
    );
}

#[test]
fn test_full_conversation_on_virtual_time() {
    let scheduler = Arc::new(ManualScheduler::new());
    let session = ConversationSession::with_defaults(scheduler.clone());

    assert!(session.quick_replies_visible());
    assert_eq!(session.quick_replies().len(), 4);

    session.submit("Hi");
    assert!(session.pending());
    assert!(!session.quick_replies_visible());

    scheduler.advance(Duration::from_millis(1000));
    assert!(!session.pending());

    session.submit("What services do you offer?");
    scheduler.advance(Duration::from_millis(1000));

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 5);
    let roles: Vec<MessageRole> = transcript.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant
        ]
    );
}

#[test]
fn test_rapid_submits_race_is_preserved() {
    // Two submits before the first reply resolves: both replies are
    // eventually appended, in callback-resolution order, with no
    // deduplication and no cancellation.
    let scheduler = Arc::new(ManualScheduler::new());
    let session = ConversationSession::with_defaults(scheduler.clone());

    session.submit("What skills do you have?");
    session.submit("What services do you offer?");
    assert_eq!(scheduler.pending(), 2);

    scheduler.advance(Duration::from_millis(1000));

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 5);
    assert!(transcript[3].content.contains("Rust"));
    assert!(transcript[4].content.contains("product engineering"));
}

#[test]
fn test_help_then_clear_leaves_only_the_banner() {
    let mut session = TerminalSession::new();
    session.run_line("help");
    assert!(session.scrollback().len() > 4);

    session.run_line("clear");
    assert_eq!(
        session.scrollback(),
        &[
            Line::output("Terminal cleared."),
            Line::output(""),
        ]
    );
}

#[test]
fn test_clear_lookup_survives_case_and_whitespace() {
    for spelling in ["clear", "CLEAR", "  clear  "] {
        let mut session = TerminalSession::new();
        session.run_line("about");
        session.run_line(spelling);
        assert_eq!(session.scrollback().len(), 2, "spelling {:?}", spelling);
    }
}

#[test]
fn test_unknown_command_appends_not_found_and_hint_entries() {
    let mut session = TerminalSession::new();
    let before = session.scrollback().len();
    session.run_line("nonexistentcmd");

    let appended = &session.scrollback()[before..];
    assert_eq!(appended[0].kind, LineKind::Input);
    assert_eq!(
        appended[1],
        Line::output("Command not found: nonexistentcmd")
    );
    assert_eq!(appended[2], Line::output(HELP_HINT));
    assert_eq!(appended[3], Line::blank());
}

#[test]
fn test_help_lists_every_non_clear_command() {
    let mut session = TerminalSession::new();
    session.run_line("help");

    let output: String = session
        .scrollback()
        .iter()
        .filter(|line| line.kind == LineKind::Output)
        .map(|line| line.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    for entry in builtin_table().entries() {
        if entry.name == "clear" {
            continue;
        }
        assert!(output.contains(entry.name), "missing '{}'", entry.name);
    }
}

#[test]
fn test_config_file_drives_the_assistant() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("folio.toml");
    std::fs::write(
        &path,
        r#"
[assistant]
greeting = "Welcome! Ask away."
reply_delay_ms = 50
quick_replies = ["Are you available?"]
fallback_response = "Hmm, rephrase that?"

[[assistant.rule]]
name = "availability"
matchers = ["available"]
response = "Booking for next quarter."
"#,
    )
    .unwrap();

    let config = FolioConfig::load_or_default(&path).expect("config should load");
    let scheduler = Arc::new(ManualScheduler::new());
    let session = ConversationSession::new(
        config.assistant.rule_table(),
        scheduler.clone(),
        config.assistant.greeting.clone(),
        config.assistant.quick_replies.clone(),
        config.assistant.reply_delay(),
    );

    assert_eq!(session.transcript()[0].content, "Welcome! Ask away.");
    assert_eq!(session.quick_replies(), ["Are you available?"]);

    session.submit_quick_reply("Are you available?");
    scheduler.advance(Duration::from_millis(50));
    assert_eq!(
        session.transcript()[2].content,
        "Booking for next quarter."
    );

    session.submit("qwerty");
    scheduler.advance(Duration::from_millis(50));
    assert_eq!(session.transcript()[4].content, "Hmm, rephrase that?");
}

#[test]
fn test_default_assistant_config_matches_builtin_table() {
    let config = AssistantConfig::default();
    let table = config.rule_table();
    assert!(Arc::ptr_eq(&table, &default_table()));
}
