//! Severity levels and the cumulative severity filter

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered from the most to the least severe.
///
/// Each level owns one bit of the severity filter, except `Fatal` whose bit
/// is zero: a fatal message can never be filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Fatal,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// All levels in severity order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Filter bit owned by this level
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            LogLevel::Fatal => 0x0,
            LogLevel::Error => 0x1,
            LogLevel::Warning => 0x2,
            LogLevel::Info => 0x4,
            LogLevel::Debug => 0x8,
            LogLevel::Trace => 0x10,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Severity filter: the set of level bits that are blocked.
///
/// The named presets are cumulative, so `LevelFilter::WARNING` lets fatal,
/// error and warning messages through and blocks everything noisier.
///
/// | preset    | bits | passes                                    |
/// |-----------|------|-------------------------------------------|
/// | `TRACE`   | 0    | fatal, error, warning, info, debug, trace |
/// | `DEBUG`   | 16   | fatal, error, warning, info, debug        |
/// | `INFO`    | 24   | fatal, error, warning, info               |
/// | `WARNING` | 28   | fatal, error, warning                     |
/// | `ERROR`   | 30   | fatal, error                              |
///
/// # Examples
///
/// ```
/// use rust_logger_facade::{LevelFilter, LogLevel};
///
/// assert!(LevelFilter::WARNING.passes(LogLevel::Error));
/// assert!(!LevelFilter::WARNING.passes(LogLevel::Info));
/// assert!(LevelFilter::ERROR.passes(LogLevel::Fatal));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct LevelFilter(u32);

impl LevelFilter {
    pub const TRACE: Self = Self(LogLevel::Fatal.bit());
    pub const DEBUG: Self = Self(LogLevel::Trace.bit());
    pub const INFO: Self = Self(Self::DEBUG.0 + LogLevel::Debug.bit());
    pub const WARNING: Self = Self(Self::INFO.0 + LogLevel::Info.bit());
    pub const ERROR: Self = Self(Self::WARNING.0 + LogLevel::Warning.bit());

    /// Largest valid filter: every non-fatal level blocked.
    pub const MAX_BITS: u32 = LogLevel::Error.bit()
        + LogLevel::Warning.bit()
        + LogLevel::Info.bit()
        + LogLevel::Debug.bit()
        + LogLevel::Trace.bit();

    /// Validate a raw bitmask.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidFilter`] when `bits` is outside
    /// `[0, MAX_BITS]`.
    pub fn from_bits(bits: i64) -> Result<Self> {
        if (0..=i64::from(Self::MAX_BITS)).contains(&bits) {
            Ok(Self(bits as u32))
        } else {
            Err(LoggerError::invalid_filter("level", bits, Self::MAX_BITS))
        }
    }

    /// Filter that passes fatal through `level` inclusive.
    pub const fn from_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warning => Self::WARNING,
            LogLevel::Error => Self::ERROR,
            LogLevel::Fatal => Self(Self::MAX_BITS),
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether a message at `level` is emitted under this filter.
    #[inline]
    pub const fn passes(self, level: LogLevel) -> bool {
        let bit = level.bit();
        bit == 0 || (!self.0 & bit) != 0
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::TRACE
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        Self::from_level(level)
    }
}

impl TryFrom<i64> for LevelFilter {
    type Error = LoggerError;

    fn try_from(bits: i64) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl From<LevelFilter> for u32 {
    fn from(filter: LevelFilter) -> Self {
        filter.0
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
