//! Scrollback ownership and the run-line loop.

use std::sync::Arc;

use super::commands::{CommandOutcome, CommandTable, builtin_table};
use super::interpreter::CommandInterpreter;
use super::line::Line;

/// Prompt marker prefixed to echoed input lines.
pub const PROMPT: &str = "visitor@folio:~$ ";

/// One visitor's terminal widget session.
///
/// The session owns its scrollback exclusively. The scrollback is
/// append-only except for `clear`, which replaces it wholesale with the
/// clear banner. There is exactly one state: a request/response loop over
/// a growing log.
pub struct TerminalSession {
    scrollback: Vec<Line>,
    input_buffer: String,
    interpreter: CommandInterpreter,
}

impl TerminalSession {
    /// Creates a session over the builtin command table.
    pub fn new() -> Self {
        Self::with_table(builtin_table())
    }

    /// Creates a session over a substitute command table.
    pub fn with_table(table: Arc<CommandTable>) -> Self {
        Self {
            scrollback: welcome_banner(),
            input_buffer: String::new(),
            interpreter: CommandInterpreter::new(table),
        }
    }

    /// Submits one line: echoes it with the prompt marker, clears the
    /// input buffer, then appends (or resets to) whatever the command
    /// produced.
    pub fn run_line(&mut self, raw_line: &str) {
        self.scrollback
            .push(Line::input(format!("{}{}", PROMPT, raw_line)));
        self.input_buffer.clear();

        match self.interpreter.execute(raw_line) {
            None => {}
            Some(CommandOutcome::Text(body)) => {
                for line in body.lines() {
                    self.scrollback.push(Line::output(line));
                }
                self.scrollback.push(Line::blank());
            }
            Some(CommandOutcome::Clear) => {
                tracing::debug!("scrollback reset");
                self.scrollback = clear_banner();
            }
        }
    }

    /// The scrollback in display order.
    pub fn scrollback(&self) -> &[Line] {
        &self.scrollback
    }

    /// The in-progress, unsubmitted command line.
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Mutable access for the rendering collaborator capturing keystrokes.
    pub fn input_buffer_mut(&mut self) -> &mut String {
        &mut self.input_buffer
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The scrollback a fresh session starts with.
fn welcome_banner() -> Vec<Line> {
    vec![
        Line::output("Welcome to the folio terminal."),
        Line::output("Type 'help' to see available commands."),
        Line::blank(),
    ]
}

/// The scrollback after a clear.
fn clear_banner() -> Vec<Line> {
    vec![Line::output("Terminal cleared."), Line::blank()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::line::LineKind;

    #[test]
    fn test_new_session_seeds_welcome_banner() {
        let session = TerminalSession::new();
        assert_eq!(session.scrollback(), welcome_banner().as_slice());
        assert_eq!(session.input_buffer(), "");
    }

    #[test]
    fn test_run_line_echoes_input_and_clears_buffer() {
        let mut session = TerminalSession::new();
        session.input_buffer_mut().push_str("whoami");
        session.run_line("whoami");

        assert_eq!(session.input_buffer(), "");
        let echoed = &session.scrollback()[3];
        assert_eq!(echoed.kind, LineKind::Input);
        assert_eq!(echoed.content, format!("{}whoami", PROMPT));
    }

    #[test]
    fn test_text_outcome_appends_lines_and_spacer() {
        let mut session = TerminalSession::new();
        session.run_line("whoami");

        let appended: Vec<&Line> = session.scrollback().iter().skip(3).collect();
        assert_eq!(appended.len(), 3);
        assert_eq!(appended[1], &Line::output("visitor"));
        assert_eq!(appended[2], &Line::blank());
    }

    #[test]
    fn test_multi_line_output_lands_as_separate_entries() {
        let mut session = TerminalSession::new();
        session.run_line("frobnicate");

        let appended: Vec<&Line> = session.scrollback().iter().skip(3).collect();
        assert_eq!(appended.len(), 4);
        assert_eq!(
            appended[1],
            &Line::output("Command not found: frobnicate")
        );
        assert_eq!(
            appended[2],
            &Line::output("Type 'help' to see available commands.")
        );
        assert_eq!(appended[3], &Line::blank());
    }

    #[test]
    fn test_empty_line_echoes_but_produces_no_output() {
        let mut session = TerminalSession::new();
        session.run_line("   ");

        assert_eq!(session.scrollback().len(), 4);
        assert_eq!(session.scrollback()[3].kind, LineKind::Input);
    }

    #[test]
    fn test_clear_replaces_scrollback_with_banner() {
        let mut session = TerminalSession::new();
        session.run_line("help");
        session.run_line("about");
        session.run_line("clear");

        assert_eq!(
            session.scrollback(),
            &[Line::output("Terminal cleared."), Line::blank()]
        );
    }
}
