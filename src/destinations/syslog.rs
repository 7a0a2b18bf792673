//! System log destination
//!
//! Routes messages to syslog(3) through libc. The channel is opened once with
//! `openlog(ident, LOG_CONS | LOG_PID | LOG_NDELAY, facility)`; on targets
//! without syslog, constructing the destination fails up front.

use crate::core::{DetailsFilter, Destination, LogLevel, LogMessage, LoggerError, Result};
use std::fmt;

/// Syslog facilities available to applications.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SyslogFacility {
    User,
    Daemon,
    Local0,
    Local1,
    #[default]
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl SyslogFacility {
    /// Case-insensitive lookup by the usual facility name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }

    #[cfg(unix)]
    const fn as_raw(self) -> libc::c_int {
        match self {
            Self::User => libc::LOG_USER,
            Self::Daemon => libc::LOG_DAEMON,
            Self::Local0 => libc::LOG_LOCAL0,
            Self::Local1 => libc::LOG_LOCAL1,
            Self::Local2 => libc::LOG_LOCAL2,
            Self::Local3 => libc::LOG_LOCAL3,
            Self::Local4 => libc::LOG_LOCAL4,
            Self::Local5 => libc::LOG_LOCAL5,
            Self::Local6 => libc::LOG_LOCAL6,
            Self::Local7 => libc::LOG_LOCAL7,
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The syslog severities this facade emits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyslogPriority {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl SyslogPriority {
    pub const fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Fatal => Self::Critical,
            LogLevel::Error => Self::Error,
            LogLevel::Warning => Self::Warning,
            LogLevel::Info => Self::Info,
            LogLevel::Debug | LogLevel::Trace => Self::Debug,
        }
    }

    #[cfg(unix)]
    const fn as_raw(self) -> libc::c_int {
        match self {
            Self::Critical => libc::LOG_CRIT,
            Self::Error => libc::LOG_ERR,
            Self::Warning => libc::LOG_WARNING,
            Self::Info => libc::LOG_INFO,
            Self::Debug => libc::LOG_DEBUG,
        }
    }
}

/// Destination writing to the system log.
///
/// # Example
///
/// ```no_run
/// use rust_logger_facade::destinations::{SyslogDestination, SyslogFacility};
///
/// let syslog = SyslogDestination::open(SyslogFacility::Daemon, Some("my-service"))
///     .expect("syslog available");
/// ```
#[derive(Debug)]
pub struct SyslogDestination {
    facility: SyslogFacility,
}

impl SyslogDestination {
    /// Open the syslog channel.
    ///
    /// With `ident` unset the system uses the program name.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Unsupported`] on targets without syslog, and
    /// [`LoggerError::InvalidConfiguration`] if `ident` contains a NUL byte.
    #[cfg(unix)]
    pub fn open(facility: SyslogFacility, ident: Option<&str>) -> Result<Self> {
        use std::ffi::CString;
        use std::sync::OnceLock;

        // syslog(3) keeps the ident pointer, so it lives for the whole process.
        // The first ident opened wins.
        static IDENT: OnceLock<Option<CString>> = OnceLock::new();

        let ident = match ident {
            Some(name) => Some(
                CString::new(name)
                    .map_err(|_| LoggerError::config("syslog", "ident contains a NUL byte"))?,
            ),
            None => None,
        };
        let ident = IDENT.get_or_init(|| ident);
        let ident_ptr = ident.as_ref().map_or(std::ptr::null(), |s| s.as_ptr());

        // SAFETY: ident_ptr is null or points to a CString stored in a static.
        unsafe {
            libc::openlog(
                ident_ptr,
                libc::LOG_CONS | libc::LOG_PID | libc::LOG_NDELAY,
                facility.as_raw(),
            );
        }

        Ok(Self { facility })
    }

    #[cfg(not(unix))]
    pub fn open(_facility: SyslogFacility, _ident: Option<&str>) -> Result<Self> {
        Err(LoggerError::unsupported("syslog"))
    }

    pub fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Message body as sent to syslog
    pub fn format_message(message: &LogMessage, details: DetailsFilter) -> String {
        if details.shows(DetailsFilter::WITHOUT_SOURCE_CODE) {
            format!(
                "{} (from {}:{})",
                message.text(),
                message.context.file,
                message.context.line
            )
        } else {
            message.text().to_string()
        }
    }
}

impl Destination for SyslogDestination {
    #[cfg(unix)]
    fn write(&self, message: &LogMessage, details: DetailsFilter) -> Result<()> {
        let body = std::ffi::CString::new(Self::format_message(message, details))
            .map_err(|_| LoggerError::destination("syslog", "message contains a NUL byte"))?;
        let priority = SyslogPriority::for_level(message.level());

        // SAFETY: "%s" consumes exactly one C string argument, and body is
        // NUL-terminated. syslog(3) is thread-safe once openlog has run.
        unsafe {
            libc::syslog(
                priority.as_raw(),
                b"%s\0".as_ptr().cast::<libc::c_char>(),
                body.as_ptr(),
            );
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn write(&self, _message: &LogMessage, _details: DetailsFilter) -> Result<()> {
        Err(LoggerError::unsupported("syslog"))
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogContext;

    fn message(level: LogLevel) -> LogMessage {
        let context = LogContext::new(level, "src/worker.rs", 88, "run");
        LogMessage::with_text(context, "job finished")
    }

    #[test]
    fn test_priority_mapping() {
        assert_eq!(SyslogPriority::for_level(LogLevel::Fatal), SyslogPriority::Critical);
        assert_eq!(SyslogPriority::for_level(LogLevel::Error), SyslogPriority::Error);
        assert_eq!(SyslogPriority::for_level(LogLevel::Warning), SyslogPriority::Warning);
        assert_eq!(SyslogPriority::for_level(LogLevel::Info), SyslogPriority::Info);
        assert_eq!(SyslogPriority::for_level(LogLevel::Debug), SyslogPriority::Debug);
        assert_eq!(SyslogPriority::for_level(LogLevel::Trace), SyslogPriority::Debug);
    }

    #[test]
    fn test_body_with_source() {
        let body = SyslogDestination::format_message(&message(LogLevel::Info), DetailsFilter::ALL);
        assert_eq!(body, "job finished (from src/worker.rs:88)");
    }

    #[test]
    fn test_body_without_source() {
        let body = SyslogDestination::format_message(
            &message(LogLevel::Info),
            DetailsFilter::MESSAGE_WITHOUT_SOURCE_CODE,
        );
        assert_eq!(body, "job finished");
    }

    #[test]
    fn test_facility_names() {
        assert_eq!(SyslogFacility::default(), SyslogFacility::Local2);
        assert_eq!(SyslogFacility::from_name("DAEMON"), Some(SyslogFacility::Daemon));
        assert_eq!(SyslogFacility::from_name("kern"), None);
        assert_eq!(SyslogFacility::Local5.to_string(), "local5");
    }

    #[cfg(not(unix))]
    #[test]
    fn test_open_unsupported() {
        let result = SyslogDestination::open(SyslogFacility::default(), None);
        assert!(matches!(result, Err(LoggerError::Unsupported { .. })));
    }
}
