//! Command entries and the builtin command table.
//!
//! The builtin table is always available and never modified at runtime.
//! It is built once on first access and cached for the lifetime of the
//! process; all terminal sessions share it read-only.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::error::{FolioError, Result};

/// What a command handler asks the terminal session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Append this text to the scrollback, one entry per line of text.
    Text(String),
    /// Reset the scrollback to the clear banner.
    Clear,
}

/// A single terminal command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandEntry {
    /// Command name as typed by the visitor.
    pub name: &'static str,
    /// One-line description, mirrored by the `help` output.
    pub summary: &'static str,
    /// Handler producing the command's outcome.
    #[serde(skip)]
    pub handler: fn() -> CommandOutcome,
}

impl CommandEntry {
    /// Creates a new command entry.
    pub const fn new(
        name: &'static str,
        summary: &'static str,
        handler: fn() -> CommandOutcome,
    ) -> Self {
        Self {
            name,
            summary,
            handler,
        }
    }
}

/// An immutable command table keyed by case-insensitive, trimmed name.
///
/// Dispatch is an enumerable finite mapping, so the set of valid commands
/// can be listed and exhaustively tested.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    /// Creates a table, rejecting entries whose names collide after
    /// normalization (trim, lowercase).
    pub fn new(entries: Vec<CommandEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            let key = entry.name.trim().to_lowercase();
            if !seen.insert(key.clone()) {
                return Err(FolioError::config(format!(
                    "duplicate command name after normalization: {}",
                    key
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Looks up an entry by normalized (trimmed, lowercased) name.
    pub fn get(&self, normalized: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.trim().to_lowercase() == normalized)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }
}

fn help() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "Available commands:",
            "  help       Show available commands",
            "  about      Who Daniel is and what he does",
            "  skills     Languages, frameworks, and tooling",
            "  education  Degrees and coursework",
            "  certs      Professional certifications",
            "  contact    How to get in touch",
            "  projects   Selected case studies",
            "  whoami     The short version",
        ]
        .join("\n"),
    )
}

fn about() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "Daniel Reyes - Product Engineer",
            "",
            "I design and ship backend-heavy product features: APIs, data",
            "pipelines, and the occasional terminal widget on a portfolio",
            "site. Currently taking on select freelance projects.",
        ]
        .join("\n"),
    )
}

fn skills() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "Languages   Rust, TypeScript, Python, SQL",
            "Backend     tokio, axum, PostgreSQL, Redis",
            "Frontend    React, Vite, Tailwind",
            "Tooling     Docker, GitHub Actions, Terraform",
        ]
        .join("\n"),
    )
}

fn education() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "B.Sc. Computer Science - University of Texas at Austin, 2016",
            "Focus: distributed systems and databases",
        ]
        .join("\n"),
    )
}

fn certs() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "AWS Certified Solutions Architect - Associate",
            "CKA: Certified Kubernetes Administrator",
        ]
        .join("\n"),
    )
}

fn contact() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "Email      daniel@reyes.dev",
            "GitHub     github.com/dreyes",
            "LinkedIn   linkedin.com/in/danielreyes",
        ]
        .join("\n"),
    )
}

fn projects() -> CommandOutcome {
    CommandOutcome::Text(
        [
            "pulsemetrics   Real-time analytics pipeline (Rust, Kafka, ClickHouse)",
            "hayfinder      Embedded search service for product catalogs (Rust, tantivy)",
            "folio          This site, including the assistant and this terminal",
        ]
        .join("\n"),
    )
}

fn whoami() -> CommandOutcome {
    CommandOutcome::Text("visitor".to_string())
}

fn clear() -> CommandOutcome {
    CommandOutcome::Clear
}

/// Static storage for the builtin table (initialized once).
static BUILTIN_TABLE: OnceLock<Arc<CommandTable>> = OnceLock::new();

/// Returns the builtin command table shared by all terminal sessions that
/// do not supply their own.
///
/// The table is initialized on first access and cached for subsequent
/// calls.
pub fn builtin_table() -> Arc<CommandTable> {
    BUILTIN_TABLE
        .get_or_init(|| {
            let table = CommandTable::new(vec![
                CommandEntry::new("help", "Show available commands", help),
                CommandEntry::new("about", "Who Daniel is and what he does", about),
                CommandEntry::new("skills", "Languages, frameworks, and tooling", skills),
                CommandEntry::new("education", "Degrees and coursework", education),
                CommandEntry::new("certs", "Professional certifications", certs),
                CommandEntry::new("contact", "How to get in touch", contact),
                CommandEntry::new("projects", "Selected case studies", projects),
                CommandEntry::new("whoami", "The short version", whoami),
                CommandEntry::new("clear", "Clear the terminal", clear),
            ]);
            Arc::new(table.expect("builtin command names are distinct"))
        })
        .clone()
}
