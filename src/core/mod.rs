//! Core logger types and traits

pub mod config;
pub mod destination;
pub mod details;
pub mod error;
pub mod log_context;
pub mod log_level;
pub mod log_message;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod trace;

pub use config::LoggerConfig;
pub use destination::{Destination, HandlerDestination};
pub use details::DetailsFilter;
pub use error::{LoggerError, Result};
pub use log_context::{trim_file_path, LogContext, ThreadInfo};
pub use log_level::{LevelFilter, LogLevel};
pub use log_message::LogMessage;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::{format_time, parse_time, DEFAULT_TIME_FORMAT};
pub use trace::{trace_signal, trace_signal_fmt};
