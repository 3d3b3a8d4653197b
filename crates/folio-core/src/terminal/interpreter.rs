//! Raw-line-to-outcome resolution.

use std::sync::Arc;

use super::commands::{CommandOutcome, CommandTable};

/// Hint appended after an unknown command.
pub const HELP_HINT: &str = "Type 'help' to see available commands.";

/// Resolves raw input lines against an immutable command table.
#[derive(Clone)]
pub struct CommandInterpreter {
    table: Arc<CommandTable>,
}

impl CommandInterpreter {
    /// Creates an interpreter over the given command table.
    pub fn new(table: Arc<CommandTable>) -> Self {
        Self { table }
    }

    /// Executes one raw line. Returns `None` when the line is empty after
    /// trimming; the caller skips processing entirely.
    ///
    /// Lookup is exact-match on the trimmed, lowercased command name. A
    /// miss is a handled outcome, not an error: the visitor sees a
    /// not-found line carrying the literal text they typed, plus a help
    /// hint on the next line.
    pub fn execute(&self, raw_line: &str) -> Option<CommandOutcome> {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let name = trimmed.to_lowercase();
        match self.table.get(&name) {
            Some(entry) => {
                tracing::debug!(command = entry.name, "dispatching command");
                Some((entry.handler)())
            }
            None => {
                tracing::debug!(input = trimmed, "unknown command");
                Some(CommandOutcome::Text(format!(
                    "Command not found: {}\n{}",
                    trimmed, HELP_HINT
                )))
            }
        }
    }
}
