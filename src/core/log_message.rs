//! Log message: a context plus the rendered text

use super::log_context::LogContext;
use super::log_level::LogLevel;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct LogMessage {
    pub context: LogContext,
    text: String,
}

impl LogMessage {
    pub fn new(context: LogContext) -> Self {
        Self {
            context,
            text: String::new(),
        }
    }

    pub fn with_text(context: LogContext, text: impl Into<String>) -> Self {
        Self {
            context,
            text: text.into(),
        }
    }

    /// Append the `Display` form of `value` to the text buffer.
    pub fn append(&mut self, value: impl fmt::Display) -> &mut Self {
        // Writing into a String cannot fail.
        let _ = fmt::Write::write_fmt(self, format_args!("{}", value));
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.context.level
    }
}

impl fmt::Write for LogMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}
