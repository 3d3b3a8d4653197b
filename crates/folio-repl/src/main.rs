use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use folio_core::assistant::{ConversationSession, MessageRole, SessionEvent};
use folio_core::config::{CONFIG_FILE_NAME, FolioConfig};
use folio_core::schedule::TokioScheduler;
use folio_core::terminal::{LineKind, TerminalSession, builtin_table};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = builtin_table()
            .entries()
            .iter()
            .map(|entry| entry.name.to_string())
            .collect();
        commands.extend(["/terminal", "/chat", "quit"].map(String::from));
        Self { commands }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.is_empty() {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if !line.is_empty() && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Which widget the next line of input is routed to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Widget {
    Terminal,
    Chat,
}

/// The main entry point for the folio REPL application.
///
/// This async function sets up a rustyline-based REPL that:
/// 1. Loads the optional `folio.toml` configuration
/// 2. Builds both interaction engines over a tokio-backed scheduler
/// 3. Forwards assistant session events to the screen as they resolve
/// 4. Routes each input line to the terminal or chat widget
/// 5. Displays colored output for input echoes, replies, and system text
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ===== Engine Initialization =====
    let config = FolioConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?;

    let scheduler = Arc::new(TokioScheduler::new());
    let assistant = Arc::new(ConversationSession::new(
        config.assistant.rule_table(),
        scheduler,
        config.assistant.greeting.clone(),
        config.assistant.quick_replies.clone(),
        config.assistant.reply_delay(),
    ));
    let mut terminal = TerminalSession::new();

    // Forward assistant events to the screen as their callbacks resolve
    let mut events = assistant.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::MessageAppended { message }
                    if message.role == MessageRole::Assistant =>
                {
                    for line in message.content.lines() {
                        println!("{}", line.bright_blue());
                    }
                    println!();
                }
                SessionEvent::PendingChanged { pending: true } => {
                    println!("{}", "assistant is typing...".bright_black());
                }
                _ => {}
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== folio REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/terminal' or '/chat' to switch widgets, 'quit' to exit.".bright_black()
    );
    println!();

    let mut widget = Widget::Terminal;
    let mut printed = render_scrollback(&terminal, 0);

    // ===== Main REPL Loop =====
    loop {
        let prompt = match widget {
            Widget::Terminal => ">> ",
            Widget::Chat => "?? ",
        };
        let readline = rl.readline(prompt);

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle quit command
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(&line);

                // Handle widget switches
                match trimmed {
                    "/terminal" => {
                        widget = Widget::Terminal;
                        printed = render_scrollback(&terminal, 0);
                        continue;
                    }
                    "/chat" => {
                        widget = Widget::Chat;
                        show_chat_intro(&assistant);
                        continue;
                    }
                    _ => {}
                }

                match widget {
                    Widget::Terminal => {
                        terminal.run_line(trimmed);
                        printed = render_scrollback(&terminal, printed);
                    }
                    Widget::Chat => {
                        if let Some(reply) = pick_quick_reply(&assistant, trimmed) {
                            println!("{}", format!("> {}", reply).green());
                            assistant.submit_quick_reply(&reply);
                        } else {
                            println!("{}", format!("> {}", trimmed).green());
                            assistant.submit(trimmed);
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // A pending scheduled reply can keep the event channel alive, so stop
    // the printer instead of waiting for it to drain.
    printer.abort();

    Ok(())
}

/// Prints scrollback lines added since the last render and returns the new
/// watermark. A clear shrinks the scrollback, so a shorter log means a
/// reset: reprint from the top.
fn render_scrollback(session: &TerminalSession, mut printed: usize) -> usize {
    let lines = session.scrollback();
    if lines.len() < printed {
        printed = 0;
    }
    for line in &lines[printed..] {
        match line.kind {
            LineKind::Input => println!("{}", line.content.green()),
            LineKind::Output => println!("{}", line.content.bright_blue()),
        }
    }
    lines.len()
}

/// Replays the greeting and offers the numbered quick replies, while they
/// are still on offer.
fn show_chat_intro(session: &ConversationSession) {
    if !session.quick_replies_visible() {
        return;
    }
    if let Some(greeting) = session.transcript().first() {
        for line in greeting.content.lines() {
            println!("{}", line.bright_blue());
        }
    }
    for (index, reply) in session.quick_replies().iter().enumerate() {
        println!("{}", format!("  {}. {}", index + 1, reply).bright_black());
    }
    println!();
}

/// A bare number in chat mode selects one of the offered quick replies.
fn pick_quick_reply(session: &ConversationSession, input: &str) -> Option<String> {
    if !session.quick_replies_visible() {
        return None;
    }
    let index: usize = input.parse().ok()?;
    session.quick_replies().get(index.checked_sub(1)?).cloned()
}
