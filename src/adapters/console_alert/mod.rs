// Console alert adapter - Blocking alerts rendered on stderr

use std::io::Write;

use tracing::warn;

use crate::ports::AlertPort;

/// Writes each alert as an `Error:` line on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAlert;

impl ConsoleAlert {
    pub fn new() -> Self {
        Self
    }

    fn render(message: &str) -> String {
        format!("Error: {}", message)
    }
}

impl AlertPort for ConsoleAlert {
    fn alert(&self, message: &str) {
        warn!(alert = %message, "User alert");
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", Self::render(message));
    }
}
