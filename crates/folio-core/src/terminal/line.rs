//! Scrollback line types.

use serde::{Deserialize, Serialize};

/// Distinguishes echoed input from command output in the scrollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// A visitor-typed line, echoed with the prompt marker.
    Input,
    /// A line produced by a command, or part of a banner.
    Output,
}

/// A single line of terminal scrollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Whether the line echoes input or carries output.
    pub kind: LineKind,
    /// The visible text of the line.
    pub content: String,
}

impl Line {
    /// Creates an echoed input line.
    pub fn input(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Input,
            content: content.into(),
        }
    }

    /// Creates an output line.
    pub fn output(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            content: content.into(),
        }
    }

    /// A blank output line used as a visual spacer.
    pub fn blank() -> Self {
        Self::output("")
    }
}
