//! Main logger implementation
//!
//! The [`Logger`] owns the severity and detail filters, the ordered list of
//! destinations and the enabled latch. Output stays disabled until one of the
//! `init_*` methods (or [`Logger::unlock`]) opens the latch.

use super::{
    config::LoggerConfig,
    destination::{Destination, HandlerDestination},
    details::DetailsFilter,
    error::{LoggerError, Result},
    log_context::LogContext,
    log_level::{LevelFilter, LogLevel},
    log_message::LogMessage,
    metrics::LoggerMetrics,
    trace::trace_signal_fmt,
};
use crate::destinations::{ConsoleDestination, SyslogDestination, SyslogFacility};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

static INSTANCE: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// Built-in destinations registered so far on one logger
#[derive(Default)]
struct BuiltinDestinations {
    console: Option<Arc<ConsoleDestination>>,
    syslog: bool,
}

pub struct Logger {
    level_filter: AtomicU32,
    details_filter: AtomicU32,
    enabled: AtomicBool,
    /// Copy-on-write: writers take a snapshot and release the lock before fan-out.
    destinations: RwLock<Arc<Vec<Arc<dyn Destination>>>>,
    builtins: Mutex<BuiltinDestinations>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with output disabled, every level passing and the
    /// application name hidden.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level_filter: AtomicU32::new(LevelFilter::default().bits()),
            details_filter: AtomicU32::new(DetailsFilter::default().bits()),
            enabled: AtomicBool::new(false),
            destinations: RwLock::new(Arc::new(Vec::new())),
            builtins: Mutex::new(BuiltinDestinations::default()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// The process-wide logger, created on first access.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_facade::{info, Logger};
    ///
    /// let logger = Logger::instance();
    /// info!(logger, "listening on port {}", 8080);
    /// ```
    pub fn instance() -> Arc<Logger> {
        if let Some(logger) = INSTANCE.read().as_ref() {
            return Arc::clone(logger);
        }
        let mut slot = INSTANCE.write();
        Arc::clone(slot.get_or_insert_with(|| Arc::new(Logger::new())))
    }

    /// Drop the process-wide logger so the next [`Logger::instance`] call
    /// starts from a fresh one. Handles already obtained stay valid.
    pub fn destroy() {
        INSTANCE.write().take();
    }

    pub fn set_level(&self, filter: LevelFilter) -> &Self {
        self.level_filter.store(filter.bits(), Ordering::Relaxed);
        self
    }

    /// Set the severity filter from a raw bitmask.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is outside `[0, LevelFilter::MAX_BITS]`.
    pub fn set_level_bits(&self, bits: i64) -> &Self {
        match self.try_set_level_bits(bits) {
            Ok(logger) => logger,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked variant of [`Logger::set_level_bits`].
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidFilter`] for an out-of-range value.
    pub fn try_set_level_bits(&self, bits: i64) -> Result<&Self> {
        let filter = LevelFilter::from_bits(bits)?;
        Ok(self.set_level(filter))
    }

    /// Read the severity filter from the environment variable `var_name`.
    ///
    /// A missing or non-numeric value is ignored.
    ///
    /// # Panics
    ///
    /// Panics on a numeric value outside the valid range.
    pub fn set_level_from_environment(&self, var_name: &str) -> &Self {
        match read_env_integer(var_name) {
            Some(bits) => self.set_level_bits(bits),
            None => self,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        // Only ever stores validated filters.
        LevelFilter::from_bits(i64::from(self.level_filter.load(Ordering::Relaxed)))
            .unwrap_or_default()
    }

    pub fn set_details(&self, filter: DetailsFilter) -> &Self {
        self.details_filter.store(filter.bits(), Ordering::Relaxed);
        self
    }

    /// Set the detail filter from a raw bitmask.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is outside `[0, DetailsFilter::MAX_BITS]`.
    pub fn set_details_bits(&self, bits: i64) -> &Self {
        match self.try_set_details_bits(bits) {
            Ok(logger) => logger,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidFilter`] for an out-of-range value.
    pub fn try_set_details_bits(&self, bits: i64) -> Result<&Self> {
        let filter = DetailsFilter::from_bits(bits)?;
        Ok(self.set_details(filter))
    }

    /// Read the detail filter from the environment variable `var_name`.
    ///
    /// # Panics
    ///
    /// Panics on a numeric value outside the valid range.
    pub fn set_details_from_environment(&self, var_name: &str) -> &Self {
        match read_env_integer(var_name) {
            Some(bits) => self.set_details_bits(bits),
            None => self,
        }
    }

    pub fn details_filter(&self) -> DetailsFilter {
        DetailsFilter::from_bits(i64::from(self.details_filter.load(Ordering::Relaxed)))
            .unwrap_or_default()
    }

    /// Append a destination. Registering the same destination twice makes
    /// it receive every message twice.
    pub fn add_destination(&self, destination: Arc<dyn Destination>) -> &Self {
        let mut destinations = self.destinations.write();
        let mut updated = Vec::with_capacity(destinations.len() + 1);
        updated.extend(destinations.iter().cloned());
        updated.push(destination);
        *destinations = Arc::new(updated);
        drop(destinations);
        self
    }

    /// Append a closure destination.
    pub fn add_handler<F>(&self, name: &str, handler: F) -> &Self
    where
        F: Fn(&LogMessage, DetailsFilter) + Send + Sync + 'static,
    {
        self.add_destination(Arc::new(HandlerDestination::new(name, handler)))
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.read().len()
    }

    /// Register the stdout console destination and enable output.
    ///
    /// Only the first call registers a destination; later calls replace the
    /// time format of the one already registered.
    pub fn init_cli_log(&self, time_format: &str) -> &Self {
        self.init_cli_log_to(time_format, io::stdout())
    }

    /// Like [`Logger::init_cli_log`], writing to `writer`. The writer is
    /// ignored if a console destination is already registered.
    pub fn init_cli_log_to(&self, time_format: &str, writer: impl Write + Send + 'static) -> &Self {
        {
            let mut builtins = self.builtins.lock();
            match builtins.console.as_ref() {
                Some(console) => console.set_time_format(time_format),
                None => {
                    let console =
                        Arc::new(ConsoleDestination::with_writer(writer).with_time_format(time_format));
                    self.add_destination(Arc::clone(&console) as Arc<dyn Destination>);
                    builtins.console = Some(console);
                }
            }
        }
        self.unlock();
        self
    }

    /// Register the syslog destination and enable output.
    ///
    /// # Panics
    ///
    /// Panics if the platform has no system log.
    pub fn init_sys_log(&self) -> &Self {
        match self.try_init_sys_log() {
            Ok(logger) => logger,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`LoggerError::Unsupported`] if the platform has no system log.
    pub fn try_init_sys_log(&self) -> Result<&Self> {
        self.try_init_sys_log_with(SyslogFacility::default(), None)
    }

    /// Register the syslog destination with an explicit facility and ident.
    ///
    /// # Errors
    ///
    /// Fails if the platform has no system log or the ident is invalid.
    pub fn try_init_sys_log_with(&self, facility: SyslogFacility, ident: Option<&str>) -> Result<&Self> {
        {
            let mut builtins = self.builtins.lock();
            if !builtins.syslog {
                let syslog = SyslogDestination::open(facility, ident)?;
                self.add_destination(Arc::new(syslog));
                builtins.syslog = true;
            }
        }
        self.unlock();
        Ok(self)
    }

    /// Apply a [`LoggerConfig`]: built-in destinations, then the filters, with
    /// any environment overrides it names taking precedence.
    ///
    /// Nothing is changed if the configuration is rejected.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or if syslog is unavailable.
    pub fn apply_config(&self, config: &LoggerConfig) -> Result<&Self> {
        config.validate()?;

        // Resolve everything that can fail before touching the logger.
        let facility = match config.syslog_facility.as_deref() {
            Some(name) => SyslogFacility::from_name(name).ok_or_else(|| {
                LoggerError::config("syslog_facility", format!("unknown facility '{}'", name))
            })?,
            None => SyslogFacility::default(),
        };
        let level = match config.level_env.as_deref().and_then(read_env_integer) {
            Some(bits) => LevelFilter::from_bits(bits)?,
            None => config.level,
        };
        let details = match config.details_env.as_deref().and_then(read_env_integer) {
            Some(bits) => DetailsFilter::from_bits(bits)?,
            None => config.details,
        };

        if config.syslog {
            self.try_init_sys_log_with(facility, config.syslog_ident.as_deref())?;
        }
        if config.console {
            self.init_cli_log(&config.time_format);
        }
        self.set_level(level).set_details(details);

        Ok(self)
    }

    /// Disable output without touching filters or destinations.
    pub fn lock(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    pub fn unlock(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Dispatch `message` to every destination if output is enabled and its
    /// level passes the severity filter.
    ///
    /// **Per-Destination Isolation**: an error or panic in one destination is
    /// reported on stderr and the remaining destinations still run. Nothing
    /// propagates to the caller.
    pub fn write(&self, message: &LogMessage) {
        if !self.is_enabled() {
            self.metrics.record_suppressed();
            return;
        }
        if !self.level_filter().passes(message.level()) {
            self.metrics.record_filtered();
            return;
        }

        let details = self.details_filter();
        // A destination may log or register destinations on this logger.
        let destinations = Arc::clone(&self.destinations.read());

        for (idx, destination) in destinations.iter().enumerate() {
            let result =
                panic::catch_unwind(AssertUnwindSafe(|| destination.write(message, details)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.metrics.record_destination_failure();
                    trace_signal_fmt(format_args!(
                        "[LOGGER ERROR] Destination #{} ({}) failed: {}",
                        idx,
                        destination.name(),
                        e
                    ));
                }
                Err(panic_info) => {
                    self.metrics.record_destination_failure();
                    trace_signal_fmt(format_args!(
                        "[LOGGER CRITICAL] Destination #{} ({}) panicked: {}. \
                         Other destinations continue to function.",
                        idx,
                        destination.name(),
                        panic_message(&panic_info)
                    ));
                }
            }
        }

        self.metrics.record_written();
    }

    /// Build a message from its parts and [`write`](Logger::write) it.
    pub fn log(
        &self,
        level: LogLevel,
        file: impl Into<String>,
        line: u32,
        function: impl Into<String>,
        text: impl Into<String>,
    ) {
        let context = LogContext::new(level, file, line, function);
        self.write(&LogMessage::with_text(context, text));
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic_info: &Box<dyn Any + Send>) -> &str {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Unknown panic"
    }
}

/// Base-10 integer from the environment; `None` if unset or malformed.
fn read_env_integer(var_name: &str) -> Option<i64> {
    std::env::var(var_name).ok()?.trim_start().parse().ok()
}

/// A pending registration, applied in the order it was requested
enum PendingDestination {
    Console {
        time_format: String,
        writer: Option<Box<dyn Write + Send>>,
    },
    Syslog {
        facility: SyslogFacility,
        ident: Option<String>,
    },
    Custom(Arc<dyn Destination>),
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LevelFilter::INFO)
///     .details(DetailsFilter::MESSAGE_WITH_LEVEL)
///     .console_to(DEFAULT_TIME_FORMAT, CaptureBuffer::new())
///     .build()
///     .expect("valid logger");
/// assert!(logger.is_enabled());
/// ```
pub struct LoggerBuilder {
    level: LevelFilter,
    details: DetailsFilter,
    pending: Vec<PendingDestination>,
    unlocked: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LevelFilter::default(),
            details: DetailsFilter::default(),
            pending: Vec::new(),
            unlocked: false,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, filter: LevelFilter) -> Self {
        self.level = filter;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn details(mut self, filter: DetailsFilter) -> Self {
        self.details = filter;
        self
    }

    /// Add the stdout console destination
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, time_format: &str) -> Self {
        self.pending.push(PendingDestination::Console {
            time_format: time_format.to_string(),
            writer: None,
        });
        self
    }

    /// Add a console destination writing to `writer`
    #[must_use = "builder methods return a new value"]
    pub fn console_to(mut self, time_format: &str, writer: impl Write + Send + 'static) -> Self {
        self.pending.push(PendingDestination::Console {
            time_format: time_format.to_string(),
            writer: Some(Box::new(writer)),
        });
        self
    }

    /// Add the syslog destination
    #[must_use = "builder methods return a new value"]
    pub fn syslog(mut self, facility: SyslogFacility, ident: Option<&str>) -> Self {
        self.pending.push(PendingDestination::Syslog {
            facility,
            ident: ident.map(String::from),
        });
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Arc<dyn Destination>) -> Self {
        self.pending.push(PendingDestination::Custom(destination));
        self
    }

    /// Enable output even when no built-in destination was requested
    #[must_use = "builder methods return a new value"]
    pub fn unlocked(mut self) -> Self {
        self.unlocked = true;
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Fails if a requested syslog destination cannot be opened.
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new();
        logger.set_level(self.level).set_details(self.details);

        for pending in self.pending {
            match pending {
                PendingDestination::Console { time_format, writer: Some(writer) } => {
                    logger.init_cli_log_to(&time_format, writer);
                }
                PendingDestination::Console { time_format, writer: None } => {
                    logger.init_cli_log(&time_format);
                }
                PendingDestination::Syslog { facility, ident } => {
                    logger.try_init_sys_log_with(facility, ident.as_deref())?;
                }
                PendingDestination::Custom(destination) => {
                    logger.add_destination(destination);
                }
            }
        }

        if self.unlocked {
            logger.unlock();
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
