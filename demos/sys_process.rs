//! Console and syslog logging from a small "system process"
//!
//! Filters come from the environment:
//!
//! ```text
//! LOG_LEVEL=16 LOG_DETAILS=33 cargo run --example sys_process
//! ```
//!
//! On platforms without syslog only the console destination is used.

use rust_logger_facade::prelude::*;
use rust_logger_facade::{debug, function_name, info, trace, warn};
use std::thread;
use std::time::Duration;

/// Prefix every message with the subsystem and calling function.
macro_rules! sys_log {
    ($level:ident, $($arg:tt)+) => {
        $level!(Logger::instance(), "SYS> {}: {}", function_name!(), format!($($arg)+))
    };
}

fn payload() {
    sys_log!(trace, "Start Payload #1");
    thread::sleep(Duration::from_millis(111));
    sub_payload();
    sys_log!(trace, "End Payload #1");
}

fn sub_payload() {
    sys_log!(trace, "Start Payload #2");
    thread::sleep(Duration::from_millis(555));
    sys_log!(warn, "Smth");
    sys_log!(trace, "End Payload #2");
}

fn main() {
    let logger = Logger::instance();
    logger.init_cli_log(DEFAULT_TIME_FORMAT);
    if let Err(e) = logger.try_init_sys_log() {
        warn!(logger, "system log unavailable: {}", e);
    }
    logger
        .set_level_from_environment("LOG_LEVEL")
        .set_details_from_environment("LOG_DETAILS");

    sys_log!(debug, "Start");
    sys_log!(info, "Sys Hello");

    payload();

    sys_log!(debug, "End");
}
