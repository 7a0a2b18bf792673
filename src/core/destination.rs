//! Destination trait for log output sinks

use super::{details::DetailsFilter, error::Result, log_message::LogMessage};

/// A consumer of accepted log messages.
///
/// Destinations receive every message that passed the severity filter along
/// with the logger's current detail filter, and decide on their own which
/// fields to render. Each destination guards whatever stream it owns.
pub trait Destination: Send + Sync {
    fn write(&self, message: &LogMessage, details: DetailsFilter) -> Result<()>;
    fn name(&self) -> &str;
}

/// Adapts a closure into a [`Destination`].
///
/// # Example
///
/// ```
/// use rust_logger_facade::core::destination::{Destination, HandlerDestination};
///
/// let handler = HandlerDestination::new("stderr", |message, _details| {
///     eprintln!("{}", message.text());
/// });
/// assert_eq!(handler.name(), "stderr");
/// ```
pub struct HandlerDestination<F> {
    name: String,
    handler: F,
}

impl<F> HandlerDestination<F>
where
    F: Fn(&LogMessage, DetailsFilter) + Send + Sync,
{
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> Destination for HandlerDestination<F>
where
    F: Fn(&LogMessage, DetailsFilter) + Send + Sync,
{
    fn write(&self, message: &LogMessage, details: DetailsFilter) -> Result<()> {
        (self.handler)(message, details);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
