//! User-facing status lines.
//!
//! Status lines are the human-readable progress channel (one line per
//! finished step), separate from diagnostic logging.

use std::fmt;

use parking_lot::Mutex;
use tracing::{info, warn};

/// Result part of a status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The step completed
    Done,
    /// The step failed, optionally with a reason
    Fail { reason: Option<String> },
    /// The remote service reported an error message
    Error(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::Fail { reason: None } => write!(f, "fail"),
            Self::Fail {
                reason: Some(reason),
            } => write!(f, "fail (reason: {})", reason),
            Self::Error(message) => write!(f, "{}", message),
        }
    }
}

/// One status line: a step label and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub label: String,
    pub outcome: Outcome,
}

impl StatusLine {
    pub fn done(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: Outcome::Done,
        }
    }

    pub fn fail(label: impl Into<String>, reason: Option<String>) -> Self {
        Self {
            label: label.into(),
            outcome: Outcome::Fail { reason },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            label: "Error:".to_string(),
            outcome: Outcome::Error(message.into()),
        }
    }

    /// Whether the line reports a failure or error
    pub fn is_failure(&self) -> bool {
        !matches!(self.outcome, Outcome::Done)
    }
}

/// Sink for status lines
pub trait StatusReporter: Send + Sync {
    fn report(&self, line: StatusLine);
}

/// Forwards status lines to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&self, line: StatusLine) {
        if line.is_failure() {
            warn!("{} {}", line.label, line.outcome);
        } else {
            info!("{} {}", line.label, line.outcome);
        }
    }
}

/// Keeps every reported line in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<StatusLine>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines reported so far
    pub fn lines(&self) -> Vec<StatusLine> {
        self.lines.lock().clone()
    }

    /// Lines that report a failure or error
    pub fn failures(&self) -> Vec<StatusLine> {
        self.lines
            .lock()
            .iter()
            .filter(|l| l.is_failure())
            .cloned()
            .collect()
    }
}

impl StatusReporter for MemoryReporter {
    fn report(&self, line: StatusLine) {
        self.lines.lock().push(line);
    }
}
