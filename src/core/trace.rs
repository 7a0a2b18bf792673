//! Allocation-free side channel for failures on the logging path
//!
//! When a destination fails, reporting the failure through the logger itself
//! could fail the same way. These helpers format into a fixed stack buffer and
//! hand it to a single raw `write(2)` on stderr, so they are safe to call from
//! a signal handler or from inside a broken destination.

use std::fmt;

const TRACE_BUFFER_SIZE: usize = 1024;

/// Fixed-capacity text buffer; input beyond the capacity is dropped.
pub(crate) struct TraceBuffer {
    buf: [u8; TRACE_BUFFER_SIZE],
    len: usize,
}

impl TraceBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; TRACE_BUFFER_SIZE],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, text: &str) {
        // One byte stays reserved for the trailing newline.
        let room = TRACE_BUFFER_SIZE - 1 - self.len;
        let bytes = text.as_bytes();
        let n = bytes.len().min(room);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn finish(&mut self) -> &[u8] {
        self.buf[self.len] = b'\n';
        &self.buf[..self.len + 1]
    }
}

impl fmt::Write for TraceBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s);
        Ok(())
    }
}

/// Write `text` and a newline to stderr.
pub fn trace_signal(text: &str) {
    let mut buffer = TraceBuffer::new();
    buffer.push(text);
    raw_write(buffer.finish());
}

/// Format `args` into the fixed buffer and write it to stderr.
///
/// Formatting only allocates if one of the arguments' `Display` impls does.
pub fn trace_signal_fmt(args: fmt::Arguments<'_>) {
    let mut buffer = TraceBuffer::new();
    let _ = fmt::Write::write_fmt(&mut buffer, args);
    raw_write(buffer.finish());
}

#[cfg(unix)]
fn raw_write(bytes: &[u8]) {
    // SAFETY: the pointer and length describe a live stack buffer; write(2)
    // is async-signal-safe. A short or failed write is ignored.
    unsafe {
        libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len());
    }
}

#[cfg(not(unix))]
fn raw_write(bytes: &[u8]) {
    use std::io::Write;
    let _ = std::io::stderr().write_all(bytes);
}
