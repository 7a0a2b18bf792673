//! Built-in destinations

pub mod console;
pub mod syslog;

pub use console::{application_name, level_tag, CaptureBuffer, ConsoleDestination};
pub use syslog::{SyslogDestination, SyslogFacility, SyslogPriority};
