//! Deterministic text-interaction engines for a portfolio site.
//!
//! Two widgets share one underlying pattern, a deterministic mapping from raw
//! text input to looked-up output plus session-state mutation:
//!
//! - [`assistant`]: a rule-based conversational assistant that classifies
//!   free-text questions into a fixed set of intents and replies with canned
//!   answers after a simulated typing delay.
//! - [`terminal`]: a command-line widget that resolves single-line commands
//!   against a fixed command table and maintains a scrollback transcript.
//!
//! The [`schedule`] module provides the one-shot delayed-callback capability
//! the assistant uses to simulate latency; [`config`] loads the optional TOML
//! configuration that customizes greeting, delay, quick replies, and rules.

pub mod assistant;
pub mod config;
pub mod error;
pub mod schedule;
pub mod terminal;

// Re-export common error type
pub use error::FolioError;
