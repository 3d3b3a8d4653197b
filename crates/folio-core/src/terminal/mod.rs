//! Command-line "terminal" widget.
//!
//! Resolves single-line commands against a fixed command table and maintains
//! a scrollback transcript with a reset ("clear") operation.
//!
//! # Module Structure
//!
//! - `line`: scrollback line types (`LineKind`, `Line`)
//! - `commands`: command entries and the builtin table (`CommandEntry`,
//!   `CommandTable`, `CommandOutcome`, `builtin_table`)
//! - `interpreter`: raw-line-to-outcome resolution (`CommandInterpreter`)
//! - `session`: scrollback ownership and the run-line loop
//!   (`TerminalSession`)

mod commands;
mod interpreter;
mod line;
mod session;

// Re-export public API
pub use commands::{CommandEntry, CommandOutcome, CommandTable, builtin_table};
pub use interpreter::{CommandInterpreter, HELP_HINT};
pub use line::{Line, LineKind};
pub use session::{PROMPT, TerminalSession};
