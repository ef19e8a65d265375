//! Terminal rendering of status lines and resolution results

use std::io::Write;

use crossterm::style::Stylize;

use email2github_core::{Identity, StatusLine, StatusReporter};

/// Whether color output is enabled (TTY + NO_COLOR not set)
pub fn use_color(enabled: bool) -> bool {
    use std::io::IsTerminal;
    enabled && std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Width of the label column
const LABEL_WIDTH: usize = 40;

/// Format one status line as `"<label padded to 40> <outcome>"`
pub fn render_status(line: &StatusLine, color: bool) -> String {
    let outcome = line.outcome.to_string();
    let outcome = match (color, line.is_failure()) {
        (false, _) => outcome,
        (true, true) => outcome.red().to_string(),
        (true, false) => outcome.green().to_string(),
    };
    format!("{:<width$} {}", line.label, outcome, width = LABEL_WIDTH)
}

/// Format the result for one identity
pub fn render_result(identity: &Identity, color: bool) -> String {
    let result = match identity.account() {
        Some(account) => format!("{} ({})", account.login, account.html_url),
        None if color => "not found".dark_grey().to_string(),
        None => "not found".to_string(),
    };
    format!("{:<width$} {}", identity.address(), result, width = LABEL_WIDTH)
}

/// Prints status lines to stdout
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self {
            color: use_color(color),
        }
    }

    pub fn color(&self) -> bool {
        self.color
    }
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, line: StatusLine) {
        tracing::debug!("{}: {}", line.label, line.outcome);
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not worth aborting a resolution run for
        let _ = writeln!(stdout, "{}", render_status(&line, self.color));
    }
}
