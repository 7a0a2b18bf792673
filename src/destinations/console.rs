//! Console destination implementation
//!
//! Renders one line per message:
//!
//! ```text
//! [app: ][2025-01-08T10:30:45[.123456] ][    [info] ][[4242-worker] ]message[ (from src/main.rs:10)]
//! ```
//!
//! Every bracketed field is controlled by its [`DetailsFilter`] bit. Thread
//! info is additionally never shown for the main thread.

use crate::core::{DetailsFilter, Destination, LogLevel, LogMessage, Result, DEFAULT_TIME_FORMAT};
use crate::core::timestamp::format_datetime;
use chrono::{DateTime, Local};
use parking_lot::{Mutex, RwLock};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Arc, OnceLock};

#[cfg(feature = "console")]
use colored::Colorize;

/// Width of the right-aligned level tag column.
const LEVEL_TAG_WIDTH: usize = 11;

pub struct ConsoleDestination {
    time_format: RwLock<String>,
    use_colors: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleDestination {
    /// Console destination writing to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console destination writing to an arbitrary stream
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_facade::destinations::{CaptureBuffer, ConsoleDestination};
    ///
    /// let buffer = CaptureBuffer::new();
    /// let console = ConsoleDestination::with_writer(buffer.clone());
    /// ```
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            time_format: RwLock::new(DEFAULT_TIME_FORMAT.to_string()),
            use_colors: false,
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Set the strftime format used for the timestamp field
    #[must_use]
    pub fn with_time_format(self, format: &str) -> Self {
        self.set_time_format(format);
        self
    }

    /// Colour the level tag with ANSI escapes (off by default)
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn set_time_format(&self, format: &str) {
        *self.time_format.write() = format.to_string();
    }

    pub fn time_format(&self) -> String {
        self.time_format.read().clone()
    }

    /// Render `message` as a console line (without the trailing newline).
    ///
    /// # Errors
    ///
    /// Fails if the configured time format is invalid.
    pub fn format_line(
        &self,
        message: &LogMessage,
        details: DetailsFilter,
        now: DateTime<Local>,
    ) -> Result<String> {
        let mut line = String::with_capacity(message.text().len() + 64);
        let context = &message.context;

        if details.shows(DetailsFilter::WITHOUT_APP_NAME) {
            line.push_str(application_name());
            line.push_str(": ");
        }

        if details.shows(DetailsFilter::WITHOUT_TIME) {
            line.push_str(&format_datetime(&now, &self.time_format.read())?);
            if details.shows(DetailsFilter::WITHOUT_MICROSECONDS) {
                let _ = write!(line, ".{:06}", now.timestamp_subsec_micros() % 1_000_000);
            }
            line.push(' ');
        }

        if details.shows(DetailsFilter::WITHOUT_LEVEL) {
            let tag = format!("{:>width$}", level_tag(context.level), width = LEVEL_TAG_WIDTH);
            line.push_str(&self.paint(tag, context.level));
        }

        if details.shows(DetailsFilter::WITHOUT_THREAD_INFO) && !context.is_main_thread() {
            let _ = write!(line, "[{}", context.thread.id);
            if let Some(name) = context.thread.name.as_deref().filter(|n| !n.is_empty()) {
                line.push('-');
                line.push_str(name);
            }
            line.push_str("] ");
        }

        line.push_str(&sanitize_message(message.text()));

        if details.shows(DetailsFilter::WITHOUT_SOURCE_CODE) {
            let _ = write!(line, " (from {}:{})", context.file, context.line);
        }

        Ok(line)
    }

    #[cfg(feature = "console")]
    fn paint(&self, tag: String, level: LogLevel) -> String {
        if self.use_colors {
            tag.color(level.color_code()).to_string()
        } else {
            tag
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, tag: String, _level: LogLevel) -> String {
        tag
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::new()
    }
}

impl Destination for ConsoleDestination {
    fn write(&self, message: &LogMessage, details: DetailsFilter) -> Result<()> {
        let line = self.format_line(message, details, Local::now())?;

        // One lock per line keeps concurrent writers from interleaving.
        let mut out = self.out.lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Fixed console tag for each level, trailing space included
pub fn level_tag(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "[trace] ",
        LogLevel::Debug => "[debug] ",
        LogLevel::Info => "[info] ",
        LogLevel::Warning => "[warning] ",
        LogLevel::Error => "[error!] ",
        LogLevel::Fatal => "[fatal!!!] ",
    }
}

/// Escape line breaks so one message always renders as one line
fn sanitize_message(message: &str) -> std::borrow::Cow<'_, str> {
    if message.contains(['\n', '\r']) {
        message.replace('\n', "\\n").replace('\r', "\\r").into()
    } else {
        message.into()
    }
}

/// Name of the running program, resolved once.
pub fn application_name() -> &'static str {
    static APP_NAME: OnceLock<String> = OnceLock::new();
    APP_NAME.get_or_init(resolve_application_name)
}

#[cfg(target_os = "linux")]
fn resolve_application_name() -> String {
    std::fs::read_to_string("/proc/self/comm")
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}

#[cfg(not(target_os = "linux"))]
fn resolve_application_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

/// Cloneable in-memory stream for capturing console output.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
