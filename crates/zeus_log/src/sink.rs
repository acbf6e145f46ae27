//! Output sinks for the logging facade.
//!
//! A sink receives fully formatted lines and is responsible for delivering
//! them. Delivery failures stay inside the sink: nothing here returns an
//! error, so a log call can never change the caller's control flow.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::facade::Severity;

/// Destination for formatted log lines.
///
/// Implementations must be safe to call from several threads at once.
pub trait LineSink: Send + Sync {
    /// Delivers a single formatted line.
    fn write_line(&self, severity: Severity, line: &str);

    /// Delivers several lines as one contiguous block.
    ///
    /// Sinks that can hold a lock across the whole block should override
    /// this so concurrent writers cannot interleave with it.
    fn write_block(&self, severity: Severity, lines: &[String]) {
        for line in lines {
            self.write_line(severity, line);
        }
    }
}

impl<S: LineSink + ?Sized> LineSink for Arc<S> {
    fn write_line(&self, severity: Severity, line: &str) {
        (**self).write_line(severity, line);
    }

    fn write_block(&self, severity: Severity, lines: &[String]) {
        (**self).write_block(severity, lines);
    }
}

impl<S: LineSink + ?Sized> LineSink for &S {
    fn write_line(&self, severity: Severity, line: &str) {
        (**self).write_line(severity, line);
    }

    fn write_block(&self, severity: Severity, lines: &[String]) {
        (**self).write_block(severity, lines);
    }
}

/// Writes each line followed by `\n`, ignoring I/O errors.
fn write_lines<'a, W: Write + ?Sized>(out: &mut W, lines: impl IntoIterator<Item = &'a str>) {
    for line in lines {
        let _ = out.write_all(line.as_bytes());
        let _ = out.write_all(b"\n");
    }
    let _ = out.flush();
}

/// Writes lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LineSink for ConsoleSink {
    fn write_line(&self, _severity: Severity, line: &str) {
        write_lines(&mut std::io::stdout().lock(), [line]);
    }

    fn write_block(&self, _severity: Severity, lines: &[String]) {
        write_lines(&mut std::io::stdout().lock(), lines.iter().map(String::as_str));
    }
}

/// Writes lines to any [`Write`] target, one lock per line or block.
///
/// Produces the same bytes as [`ConsoleSink`].
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> LineSink for WriterSink<W> {
    fn write_line(&self, _severity: Severity, line: &str) {
        write_lines(&mut *self.writer(), [line]);
    }

    fn write_block(&self, _severity: Severity, lines: &[String]) {
        write_lines(&mut *self.writer(), lines.iter().map(String::as_str));
    }
}

/// Forwards lines to the active `tracing` subscriber under the `zeus` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LineSink for TracingSink {
    fn write_line(&self, severity: Severity, line: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "zeus", "{}", line),
            Severity::Warning => tracing::warn!(target: "zeus", "{}", line),
            Severity::Error => tracing::error!(target: "zeus", "{}", line),
        }
    }
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    // A writer that panicked mid-push still leaves a usable Vec behind.
    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, _severity: Severity, line: &str) {
        self.buffer().push(line.to_string());
    }

    fn write_block(&self, _severity: Severity, lines: &[String]) {
        self.buffer().extend(lines.iter().cloned());
    }
}
