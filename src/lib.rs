//! # Rust Logger Facade
//!
//! A process-wide structured logging facade: one place to filter messages by
//! severity, choose which details are rendered, and fan each message out to
//! the console, the system log, or custom destinations.
//!
//! ## Features
//!
//! - **Bitmask filters**: severity and detail filters that can be set from
//!   code, environment variables or a JSON config file
//! - **Multiple Destinations**: console, syslog, and custom handlers
//! - **Isolation**: a failing destination never stops the others
//! - **Thread Safe**: one logger shared across threads through [`Logger::instance`]
//! - **Signal-safe tracing**: [`trace_signal`] writes straight to stderr
//!
//! ## Quick start
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::info;
//!
//! let logger = Logger::instance();
//! logger
//!     .set_level(LevelFilter::DEBUG)
//!     .set_details(DetailsFilter::MESSAGE_WITHOUT_SOURCE_CODE)
//!     .init_cli_log(DEFAULT_TIME_FORMAT);
//!
//! info!(logger, "service ready on {}", "0.0.0.0:8080");
//! # Logger::destroy();
//! ```

pub mod core;
pub mod destinations;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Destination, DetailsFilter, HandlerDestination, LevelFilter, LogContext, LogLevel,
        LogMessage, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result,
        DEFAULT_TIME_FORMAT,
    };
    pub use crate::destinations::{CaptureBuffer, ConsoleDestination, SyslogFacility};
}

pub use crate::core::{
    format_time, parse_time, trace_signal, trace_signal_fmt, trim_file_path, Destination,
    DetailsFilter, HandlerDestination, LevelFilter, LogContext, LogLevel, LogMessage, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, ThreadInfo,
    DEFAULT_TIME_FORMAT,
};
pub use destinations::{CaptureBuffer, ConsoleDestination, SyslogDestination, SyslogFacility};
